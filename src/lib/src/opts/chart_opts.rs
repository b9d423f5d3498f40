use serde::Serialize;

use crate::constants::{DEFAULT_CHART_LIMIT, MAX_CHART_LIMIT};
use crate::error::LoomError;
use crate::model::AggFunc;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Scatter,
    Histogram,
    Pie,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Scatter => "scatter",
            ChartType::Histogram => "histogram",
            ChartType::Pie => "pie",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOpts {
    pub chart_type: ChartType,
    pub x_column: String,
    pub y_column: Option<String>,
    pub group_by: Option<String>,
    pub agg_function: AggFunc,
    pub limit: usize,
}

impl ChartOpts {
    pub fn new(chart_type: ChartType, x_column: impl AsRef<str>) -> ChartOpts {
        ChartOpts {
            chart_type,
            x_column: x_column.as_ref().to_string(),
            y_column: None,
            group_by: None,
            agg_function: AggFunc::Mean,
            limit: DEFAULT_CHART_LIMIT,
        }
    }

    pub fn with_y(mut self, y_column: impl AsRef<str>) -> ChartOpts {
        self.y_column = Some(y_column.as_ref().to_string());
        self
    }

    pub fn validate(&self) -> Result<(), LoomError> {
        if self.x_column.trim().is_empty() {
            return Err(LoomError::required_field("X axis column"));
        }
        if self.chart_type == ChartType::Scatter && self.y_column.is_none() {
            return Err(LoomError::required_field("Y axis column"));
        }
        if self.limit == 0 || self.limit > MAX_CHART_LIMIT {
            return Err(LoomError::validation(format!(
                "Limit must be between 1 and {MAX_CHART_LIMIT}"
            )));
        }
        Ok(())
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let agg = match self.agg_function {
            AggFunc::Sum => "sum",
            AggFunc::Mean => "mean",
            AggFunc::Median => "median",
            AggFunc::Min => "min",
            AggFunc::Max => "max",
            AggFunc::Count => "count",
        };
        let mut pairs = vec![
            ("chart_type", self.chart_type.as_str().to_string()),
            ("x_column", self.x_column.to_owned()),
            ("agg_function", agg.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(y) = &self.y_column {
            pairs.push(("y_column", y.to_owned()));
        }
        if let Some(group_by) = &self.group_by {
            pairs.push(("group_by", group_by.to_owned()));
        }
        pairs
    }
}
