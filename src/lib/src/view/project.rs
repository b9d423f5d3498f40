use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{Cell, RecordId};

/// Snapshot returned by every read and mutation of a project. Mutations only
/// fill `columns`, `rows` and usually `dtypes`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ProjectResponse {
    #[serde(default)]
    pub project_id: Option<RecordId>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    #[serde(default)]
    pub dtypes: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub row_count: Option<usize>,
    #[serde(default)]
    pub total_rows: Option<usize>,
    #[serde(default)]
    pub total_pages: Option<usize>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl ProjectResponse {
    /// Rows in the whole table, not just the returned page
    pub fn total_rows(&self) -> usize {
        self.total_rows
            .or(self.row_count)
            .unwrap_or(self.rows.len())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecentProjectView {
    pub project_id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub last_modified: chrono::NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_rows_fallbacks() {
        let body = r#"{"columns": ["a"], "rows": [[1], [2]]}"#;
        let mut response: ProjectResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.total_rows(), 2);
        assert!(response.dtypes.is_none());

        response.row_count = Some(120);
        assert_eq!(response.total_rows(), 120);
        response.total_rows = Some(130);
        assert_eq!(response.total_rows(), 130);
    }

    #[test]
    fn test_full_snapshot() {
        let body = r#"{
            "project_id": "6f1c",
            "filename": "titanic.csv",
            "file_path": "uploads/titanic.csv",
            "columns": ["name", "age"],
            "rows": [["Ann", 29], ["Bo", null]],
            "row_count": 891,
            "dtypes": {"name": "object", "age": "float64"},
            "total_pages": 18,
            "page": 1,
            "page_size": 50
        }"#;
        let response: ProjectResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.project_id, Some(RecordId::from("6f1c")));
        assert_eq!(response.total_rows(), 891);
        assert_eq!(response.rows[1][1], serde_json::Value::Null);
    }
}
