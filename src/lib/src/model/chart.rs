use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChartColumn {
    pub name: String,
    /// numeric, categorical, datetime or boolean
    pub dtype: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChartData {
    pub chart_type: String,
    /// A list of points, or a map of group -> points for grouped scatter plots
    pub data: serde_json::Value,
    pub x_column: String,
    #[serde(default)]
    pub y_column: Option<String>,
    #[serde(default)]
    pub grouped: Option<bool>,
    #[serde(default)]
    pub series: Option<Vec<String>>,
}
