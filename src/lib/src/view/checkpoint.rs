use serde::Deserialize;

use crate::model::checkpoint::{self, Checkpoint};

/// The checkpoints endpoint returns a list, an older variant returns only the
/// latest checkpoint as a single object.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum CheckpointsResponse {
    Many(Vec<Checkpoint>),
    One(Checkpoint),
}

impl CheckpointsResponse {
    /// Newest first
    pub fn into_checkpoints(self) -> Vec<Checkpoint> {
        let mut checkpoints = match self {
            CheckpointsResponse::Many(checkpoints) => checkpoints,
            CheckpointsResponse::One(checkpoint) => vec![checkpoint],
        };
        checkpoint::sort_newest_first(&mut checkpoints);
        checkpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_and_single_shapes() {
        let list = r#"[
            {"id": 1, "message": "cleaned", "created_at": "2024-03-01T10:00:00"},
            {"id": 2, "message": "dedup", "created_at": "2024-03-02T10:00:00"}
        ]"#;
        let response: CheckpointsResponse = serde_json::from_str(list).unwrap();
        let checkpoints = response.into_checkpoints();
        assert_eq!(checkpoints.len(), 2);
        assert_eq!(checkpoints[0].message, "dedup");

        let single = r#"{"id": "a1", "message": "latest", "created_at": "2024-03-02T10:00:00.5"}"#;
        let response: CheckpointsResponse = serde_json::from_str(single).unwrap();
        let checkpoints = response.into_checkpoints();
        assert_eq!(checkpoints.len(), 1);
        assert_eq!(checkpoints[0].id.as_str(), "a1");
    }
}
