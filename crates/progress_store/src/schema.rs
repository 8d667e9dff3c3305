use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressRecordType {
    Progress,
}

/// Persisted play state: the stage being attempted, the cumulative score,
/// and the hint penalty count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgressRecord {
    #[serde(rename = "type")]
    pub record_type: ProgressRecordType,
    pub version: u32,
    pub stage_index: usize,
    pub score: u32,
    pub hint_count: u32,
    pub updated_at: String,
}

impl ProgressRecord {
    #[must_use]
    pub fn v1(
        stage_index: usize,
        score: u32,
        hint_count: u32,
        updated_at: impl Into<String>,
    ) -> Self {
        Self {
            record_type: ProgressRecordType::Progress,
            version: 1,
            stage_index,
            score,
            hint_count,
            updated_at: updated_at.into(),
        }
    }
}
