use serde::{Deserialize, Serialize};

use crate::model::ChartColumn;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChartColumnsResponse {
    pub columns: Vec<ChartColumn>,
}
