use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event the admin is currently working on; drives every event-scoped endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_published: bool,
}
