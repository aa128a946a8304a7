//! `ValueRange` response decoding.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::entities::RedirectEntry;

/// Body of a `spreadsheets.values.get` response.
///
/// The API omits `values` entirely when the range is empty, and omits
/// trailing empty cells in each row or column.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub major_dimension: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl ValueRange {
    /// Returns true if the response carried no cells.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Vec::is_empty)
    }

    /// Converts the range into entries in table order.
    ///
    /// With `COLUMNS` (the dimension requested, and the assumed default) the
    /// first inner array holds source paths and the second holds targets, and
    /// rows are formed by index. With `ROWS` each inner array is one row.
    /// Rows with a blank source path or target are skipped.
    pub fn into_entries(self) -> Vec<RedirectEntry> {
        let pairs: Vec<(Value, Value)> = match self.major_dimension.as_deref() {
            Some("ROWS") => self
                .values
                .into_iter()
                .map(|row| {
                    let mut cells = row.into_iter();
                    (
                        cells.next().unwrap_or(Value::Null),
                        cells.next().unwrap_or(Value::Null),
                    )
                })
                .collect(),
            _ => {
                let mut columns = self.values.into_iter();
                let paths = columns.next().unwrap_or_default();
                let mut targets = columns.next().unwrap_or_default().into_iter();

                paths
                    .into_iter()
                    .map(|path| (path, targets.next().unwrap_or(Value::Null)))
                    .collect()
            }
        };

        pairs
            .into_iter()
            .filter_map(|(path, target)| {
                let path = cell_text(path);
                let target = cell_text(target);
                if path.is_empty() || target.is_empty() {
                    None
                } else {
                    Some(RedirectEntry::new(path, target))
                }
            })
            .collect()
    }
}

/// Renders a cell as text. Formatted values are strings; anything else is
/// rendered as its JSON text.
fn cell_text(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
