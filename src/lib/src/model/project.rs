use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::SERIAL_COLUMN_NAME;
use crate::core::column_order::ColumnOrder;
use crate::model::RecordId;
use crate::view::{ProjectResponse, RecentProjectView};

const UPLOAD_SUFFIX: &str = ".csv";

/// A table cell as the server sends it: string, number, bool or null
pub type Cell = serde_json::Value;

/// The open project as last returned by the server. Never patched locally, every
/// server response replaces it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Project {
    pub id: RecordId,
    pub name: String,
    pub columns: Vec<String>,
    /// Rows of the current page
    pub rows: Vec<Vec<Cell>>,
    pub dtypes: BTreeMap<String, String>,
    pub column_order: ColumnOrder,
}

/// A row as shown: the 1-based serial number then the cells in display order
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub serial: usize,
    pub cells: Vec<Cell>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecentProject {
    pub project_id: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub last_modified: chrono::NaiveDateTime,
}

impl From<RecentProjectView> for RecentProject {
    fn from(view: RecentProjectView) -> Self {
        RecentProject {
            project_id: view.project_id,
            name: view.name,
            description: view.description,
            last_modified: view.last_modified,
        }
    }
}

/// The server sends the free text project name in `filename`, older uploads
/// still carry the `.csv` suffix of the uploaded file.
fn name_from_filename(filename: &str) -> String {
    let name = filename.trim();
    let suffix_start = name.len().saturating_sub(UPLOAD_SUFFIX.len());
    match name.get(suffix_start..) {
        Some(suffix) if suffix_start > 0 && suffix.eq_ignore_ascii_case(UPLOAD_SUFFIX) => {
            name[..suffix_start].to_string()
        }
        _ => name.to_string(),
    }
}

impl Project {
    pub fn from_response(id: RecordId, response: ProjectResponse) -> Project {
        let name = response
            .filename
            .as_deref()
            .map(name_from_filename)
            .unwrap_or_default();
        let column_order = ColumnOrder::identity(response.columns.len());
        Project {
            id,
            name,
            columns: response.columns,
            rows: response.rows,
            dtypes: response.dtypes.unwrap_or_default(),
            column_order,
        }
    }

    /// Replace the table with a fresh server snapshot. The column order survives
    /// only if the column count did not change.
    pub fn replace_with(&mut self, response: ProjectResponse) {
        if let Some(filename) = response.filename.as_deref() {
            self.name = name_from_filename(filename);
        }
        self.column_order.reconcile(response.columns.len());
        self.columns = response.columns;
        self.rows = response.rows;
        self.dtypes = response.dtypes.unwrap_or_default();
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Header labels in display order, starting with the serial column
    pub fn display_columns(&self) -> Vec<String> {
        let mut columns = vec![SERIAL_COLUMN_NAME.to_string()];
        columns.extend(self.column_order.arrange(&self.columns));
        columns
    }

    /// Name of the column shown at `display_index`
    pub fn column_name(&self, display_index: usize) -> Option<&str> {
        let backend = self
            .column_order
            .to_backend(display_index, self.columns.len())
            .ok()?;
        self.columns.get(backend).map(String::as_str)
    }

    /// Rows of the current page in display order. `page` is 1-based.
    pub fn display_rows(&self, page: usize, page_size: usize) -> Vec<DisplayRow> {
        let offset = page.saturating_sub(1) * page_size;
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| DisplayRow {
                serial: offset + i + 1,
                cells: self.column_order.arrange(row),
            })
            .collect()
    }
}
