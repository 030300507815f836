use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the append-only status ledger. Written only by the lifecycle
/// service, never mutated or deleted; `actor` is `None` for system-driven
/// transitions such as the stale-request sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub request_id: Uuid,
    pub status: super::request::RequestStatus,
    pub timestamp: DateTime<Utc>,
    pub note: String,
    pub actor: Option<Uuid>,
}
