//! Transform operations, one variant per `operation_type` the server accepts.
//!
//! An `Operation` is built in display coordinates: column index fields hold the
//! index of the clicked column in the table as shown (0 is the row number
//! column), row index fields hold the 0-based row within the current page.
//! The dispatcher turns it into a [`BackendOperation`], whose indices are the
//! server's column positions and absolute row numbers. Only a
//! `BackendOperation` can be sent.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::LoomError;
use crate::model::Cell;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "operation_type", rename_all = "camelCase")]
pub enum Operation {
    Filter { parameters: FilterParams },
    Sort { sort_params: SortParams },
    AddRow { row_params: RowParams },
    DelRow { row_params: RowParams },
    AddCol { col_params: AddColParams },
    DelCol { col_params: DelColParams },
    RenameCol { rename_col_params: RenameColParams },
    ChangeCellValue { change_cell_value: ChangeCellValueParams },
    FillEmpty { fill_empty_params: FillEmptyParams },
    DropDuplicate { drop_duplicate: DropDuplicateParams },
    AdvQueryFilter { adv_query: AdvQueryParams },
    PivotTables { pivot_query: PivotParams },
    CastDataType { cast_data_type_params: CastDataTypeParams },
    TrimWhitespace { trim_whitespace_params: TrimWhitespaceParams },
    StringReplace { string_replace_params: StringReplaceParams },
    Melt { melt_params: MeltParams },
    Sample { sample_params: SampleParams },
    Groupby { groupby_params: GroupByParams },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCondition {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<=")]
    Lte,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FilterParams {
    pub column: String,
    pub condition: FilterCondition,
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SortParams {
    pub column: String,
    pub ascending: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowParams {
    pub index: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AddColParams {
    pub index: usize,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelColParams {
    pub index: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RenameColParams {
    pub col_index: usize,
    pub new_name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChangeCellValueParams {
    pub col_index: usize,
    pub row_index: usize,
    pub fill_value: Cell,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FillEmptyParams {
    /// `None` fills every column
    pub index: Option<usize>,
    pub fill_value: Cell,
}

/// Which duplicate survives. `DropAll` removes every copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKeep {
    First,
    Last,
    DropAll,
}

impl Serialize for DuplicateKeep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DuplicateKeep::First => serializer.serialize_str("first"),
            DuplicateKeep::Last => serializer.serialize_str("last"),
            DuplicateKeep::DropAll => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for DuplicateKeep {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) if s == "first" => Ok(DuplicateKeep::First),
            serde_json::Value::String(s) if s == "last" => Ok(DuplicateKeep::Last),
            serde_json::Value::Bool(false) => Ok(DuplicateKeep::DropAll),
            other => Err(de::Error::custom(format!(
                "invalid keep value {other}, expected \"first\", \"last\" or false"
            ))),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DropDuplicateParams {
    /// Comma separated column names
    pub columns: String,
    pub keep: DuplicateKeep,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AdvQueryParams {
    pub query: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AggFunc {
    Sum,
    Mean,
    Median,
    Min,
    Max,
    Count,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PivotParams {
    pub index: String,
    #[serde(default)]
    pub column: Option<String>,
    pub value: String,
    pub aggfun: AggFunc,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CastTarget {
    String,
    Integer,
    Float,
    Boolean,
    Datetime,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CastDataTypeParams {
    pub column: String,
    pub target_type: CastTarget,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrimWhitespaceParams {
    pub column: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StringReplaceParams {
    pub column: String,
    pub old_value: String,
    pub new_value: String,
    #[serde(default)]
    pub regex: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MeltParams {
    pub id_vars: Vec<String>,
    #[serde(default)]
    pub value_vars: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SampleParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frac: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_state: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GroupByParams {
    pub by: Vec<String>,
    /// column -> aggregation
    pub aggregations: BTreeMap<String, AggFunc>,
}

impl Operation {
    pub fn filter(column: impl AsRef<str>, condition: FilterCondition, value: impl AsRef<str>) -> Self {
        Operation::Filter {
            parameters: FilterParams {
                column: column.as_ref().to_string(),
                condition,
                value: value.as_ref().to_string(),
            },
        }
    }

    pub fn sort(column: impl AsRef<str>, ascending: bool) -> Self {
        Operation::Sort {
            sort_params: SortParams {
                column: column.as_ref().to_string(),
                ascending,
            },
        }
    }

    /// Insert an empty row at `row_in_page` of the current page
    pub fn add_row(row_in_page: usize) -> Self {
        Operation::AddRow {
            row_params: RowParams { index: row_in_page },
        }
    }

    pub fn del_row(row_in_page: usize) -> Self {
        Operation::DelRow {
            row_params: RowParams { index: row_in_page },
        }
    }

    /// Insert a column next to the clicked header, `0` inserts at the front
    pub fn add_col(display_index: usize, name: impl AsRef<str>) -> Self {
        Operation::AddCol {
            col_params: AddColParams {
                index: display_index,
                name: name.as_ref().to_string(),
            },
        }
    }

    pub fn del_col(display_index: usize) -> Self {
        Operation::DelCol {
            col_params: DelColParams {
                index: display_index,
            },
        }
    }

    pub fn rename_col(display_index: usize, new_name: impl AsRef<str>) -> Self {
        Operation::RenameCol {
            rename_col_params: RenameColParams {
                col_index: display_index,
                new_name: new_name.as_ref().to_string(),
            },
        }
    }

    pub fn change_cell(row_in_page: usize, display_index: usize, value: impl Into<Cell>) -> Self {
        Operation::ChangeCellValue {
            change_cell_value: ChangeCellValueParams {
                col_index: display_index,
                row_index: row_in_page,
                fill_value: value.into(),
            },
        }
    }

    pub fn fill_empty(display_index: Option<usize>, value: impl Into<Cell>) -> Self {
        Operation::FillEmpty {
            fill_empty_params: FillEmptyParams {
                index: display_index,
                fill_value: value.into(),
            },
        }
    }

    pub fn drop_duplicate(columns: impl AsRef<str>, keep: DuplicateKeep) -> Self {
        Operation::DropDuplicate {
            drop_duplicate: DropDuplicateParams {
                columns: columns.as_ref().to_string(),
                keep,
            },
        }
    }

    pub fn adv_query(query: impl AsRef<str>) -> Self {
        Operation::AdvQueryFilter {
            adv_query: AdvQueryParams {
                query: query.as_ref().to_string(),
            },
        }
    }

    pub fn cast(column: impl AsRef<str>, target_type: CastTarget) -> Self {
        Operation::CastDataType {
            cast_data_type_params: CastDataTypeParams {
                column: column.as_ref().to_string(),
                target_type,
            },
        }
    }

    pub fn trim_whitespace(column: impl AsRef<str>) -> Self {
        Operation::TrimWhitespace {
            trim_whitespace_params: TrimWhitespaceParams {
                column: column.as_ref().to_string(),
            },
        }
    }

    pub fn operation_type(&self) -> &'static str {
        match self {
            Operation::Filter { .. } => "filter",
            Operation::Sort { .. } => "sort",
            Operation::AddRow { .. } => "addRow",
            Operation::DelRow { .. } => "delRow",
            Operation::AddCol { .. } => "addCol",
            Operation::DelCol { .. } => "delCol",
            Operation::RenameCol { .. } => "renameCol",
            Operation::ChangeCellValue { .. } => "changeCellValue",
            Operation::FillEmpty { .. } => "fillEmpty",
            Operation::DropDuplicate { .. } => "dropDuplicate",
            Operation::AdvQueryFilter { .. } => "advQueryFilter",
            Operation::PivotTables { .. } => "pivotTables",
            Operation::CastDataType { .. } => "castDataType",
            Operation::TrimWhitespace { .. } => "trimWhitespace",
            Operation::StringReplace { .. } => "stringReplace",
            Operation::Melt { .. } => "melt",
            Operation::Sample { .. } => "sample",
            Operation::Groupby { .. } => "groupby",
        }
    }

    /// Whether the row set may be reordered or resized, in which case the view
    /// goes back to page 1. Value level edits keep the current page.
    pub fn resets_pagination(&self) -> bool {
        !matches!(
            self,
            Operation::ChangeCellValue { .. }
                | Operation::RenameCol { .. }
                | Operation::CastDataType { .. }
                | Operation::TrimWhitespace { .. }
                | Operation::StringReplace { .. }
                | Operation::FillEmpty { .. }
        )
    }

    /// Rejects empty required fields before anything is sent
    pub fn validate(&self) -> Result<(), LoomError> {
        fn require(value: &str, field: &str) -> Result<(), LoomError> {
            if value.trim().is_empty() {
                Err(LoomError::required_field(field))
            } else {
                Ok(())
            }
        }

        match self {
            Operation::Filter { parameters } => {
                require(&parameters.column, "Column")?;
                require(&parameters.value, "Filter value")
            }
            Operation::Sort { sort_params } => require(&sort_params.column, "Column"),
            Operation::AddRow { .. } | Operation::DelRow { .. } | Operation::DelCol { .. } => Ok(()),
            Operation::AddCol { col_params } => require(&col_params.name, "Column name"),
            Operation::RenameCol { rename_col_params } => {
                require(&rename_col_params.new_name, "New column name")
            }
            Operation::ChangeCellValue { .. } | Operation::FillEmpty { .. } => Ok(()),
            Operation::DropDuplicate { drop_duplicate } => {
                require(&drop_duplicate.columns, "Columns")
            }
            Operation::AdvQueryFilter { adv_query } => require(&adv_query.query, "Query"),
            Operation::PivotTables { pivot_query } => {
                require(&pivot_query.index, "Index column")?;
                require(&pivot_query.value, "Value column")
            }
            Operation::CastDataType {
                cast_data_type_params,
            } => require(&cast_data_type_params.column, "Column"),
            Operation::TrimWhitespace {
                trim_whitespace_params,
            } => require(&trim_whitespace_params.column, "Column"),
            Operation::StringReplace {
                string_replace_params,
            } => {
                require(&string_replace_params.column, "Column")?;
                // Replacing with an empty string is allowed
                if string_replace_params.old_value.is_empty() {
                    return Err(LoomError::required_field("Text to replace"));
                }
                Ok(())
            }
            Operation::Melt { melt_params } => {
                if melt_params.id_vars.iter().all(|v| v.trim().is_empty()) {
                    return Err(LoomError::required_field("Id columns"));
                }
                Ok(())
            }
            Operation::Sample { sample_params } => match (sample_params.n, sample_params.frac) {
                (None, None) => Err(LoomError::validation(
                    "Sample needs a number of rows or a fraction",
                )),
                (Some(_), Some(_)) => Err(LoomError::validation(
                    "Sample takes either a number of rows or a fraction, not both",
                )),
                (None, Some(frac)) if !(frac > 0.0 && frac <= 1.0) => Err(LoomError::validation(
                    "Sample fraction must be in (0, 1]",
                )),
                _ => Ok(()),
            },
            Operation::Groupby { groupby_params } => {
                if groupby_params.by.iter().all(|c| c.trim().is_empty()) {
                    return Err(LoomError::required_field("Group by columns"));
                }
                if groupby_params.aggregations.is_empty() {
                    return Err(LoomError::required_field("Aggregations"));
                }
                Ok(())
            }
        }
    }
}

/// An operation whose indices are server column positions and absolute row
/// numbers. Produced by `TransformDispatcher::translate`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct BackendOperation(Operation);

impl BackendOperation {
    pub(crate) fn from_translated(operation: Operation) -> Self {
        BackendOperation(operation)
    }

    pub fn operation(&self) -> &Operation {
        &self.0
    }

    pub fn operation_type(&self) -> &'static str {
        self.0.operation_type()
    }
}
