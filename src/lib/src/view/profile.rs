use serde::{Deserialize, Serialize};

/// Per column statistics and a dataset summary, computed by the server over
/// the whole table
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProfileResponse {
    pub summary: DatasetSummary,
    pub columns: Vec<ColumnProfile>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub row_count: usize,
    pub column_count: usize,
    pub missing_count: usize,
    pub memory_usage_bytes: u64,
    pub duplicate_row_count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProfileDtype {
    Numeric,
    Categorical,
    Datetime,
    Boolean,
    #[serde(other)]
    Other,
}

impl ProfileDtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileDtype::Numeric => "numeric",
            ProfileDtype::Categorical => "categorical",
            ProfileDtype::Datetime => "datetime",
            ProfileDtype::Boolean => "boolean",
            ProfileDtype::Other => "other",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: ProfileDtype,
    pub missing_count: usize,
    pub missing_percentage: f64,
    pub unique_count: usize,
    pub numeric_stats: Option<NumericStats>,
    pub categorical_stats: Option<CategoricalStats>,
}

/// Stats the server could not compute, such as the std of a single value,
/// arrive as null
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct NumericStats {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub q1: Option<f64>,
    pub q3: Option<f64>,
    pub skewness: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoricalStats {
    pub top_values: Vec<FrequentValue>,
    pub mode: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FrequentValue {
    pub value: String,
    pub count: usize,
}

impl ProfileResponse {
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl ColumnProfile {
    /// One line description of the stats for this column's dtype
    pub fn stats_summary(&self) -> String {
        if let Some(stats) = &self.numeric_stats {
            return format!(
                "mean {} median {} min {} max {}",
                fmt_stat(stats.mean),
                fmt_stat(stats.median),
                fmt_stat(stats.min),
                fmt_stat(stats.max)
            );
        }
        if let Some(stats) = &self.categorical_stats {
            let top: Vec<String> = stats
                .top_values
                .iter()
                .map(|v| format!("{} ({})", v.value, v.count))
                .collect();
            return format!("top {}", top.join(", "));
        }
        String::new()
    }
}

fn fmt_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => String::from("-"),
    }
}

#[cfg(test)]
mod tests {
    use crate::error::LoomError;
    use crate::view::profile::{ProfileDtype, ProfileResponse};

    #[test]
    fn test_decode_profile_with_null_stats() -> Result<(), LoomError> {
        let body = r#"{
            "summary": {"row_count": 3, "column_count": 2, "missing_count": 1,
                        "memory_usage_bytes": 512, "duplicate_row_count": 0},
            "columns": [
                {"name": "age", "dtype": "numeric", "missing_count": 0,
                 "missing_percentage": 0.0, "unique_count": 1,
                 "numeric_stats": {"mean": 30.0, "median": 30.0, "std": null,
                                   "min": 30.0, "max": 30.0, "q1": 30.0, "q3": 30.0,
                                   "skewness": null},
                 "categorical_stats": null},
                {"name": "city", "dtype": "categorical", "missing_count": 1,
                 "missing_percentage": 33.33, "unique_count": 2,
                 "numeric_stats": null,
                 "categorical_stats": {"top_values": [{"value": "Oslo", "count": 2}],
                                       "mode": "Oslo"}}
            ]
        }"#;
        let profile: ProfileResponse = serde_json::from_str(body)?;

        assert_eq!(profile.summary.memory_usage_bytes, 512);
        let age = profile.column("age").ok_or(LoomError::basic_str("no age"))?;
        assert_eq!(age.dtype, ProfileDtype::Numeric);
        assert_eq!(age.numeric_stats.as_ref().and_then(|s| s.std), None);
        assert_eq!(age.stats_summary(), "mean 30.00 median 30.00 min 30.00 max 30.00");

        let city = profile.column("city").ok_or(LoomError::basic_str("no city"))?;
        assert_eq!(city.stats_summary(), "top Oslo (2)");
        assert!(profile.column("missing").is_none());
        Ok(())
    }

    #[test]
    fn test_unknown_dtype_decodes_as_other() -> Result<(), LoomError> {
        let dtype: ProfileDtype = serde_json::from_str(r#""timedelta""#)?;
        assert_eq!(dtype, ProfileDtype::Other);
        Ok(())
    }
}
