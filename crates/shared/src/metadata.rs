use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request context attached to every published integration event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub requested_by: String,
    pub request_id: Uuid,
    pub issued_at: DateTime<Utc>,
}

impl Metadata {
    pub fn new(requested_by: impl Into<String>) -> Self {
        Self {
            requested_by: requested_by.into(),
            request_id: Uuid::new_v4(),
            issued_at: Utc::now(),
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new("system")
    }
}
