use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::history::HistoryEntry;
use crate::models::request::{Request, RequestStatus};

/// Durable home of requests and their append-only status ledger.
///
/// `mutate` applies the precondition check and the field changes under the
/// entry's exclusive guard, so a concurrent sweep and accept on the same
/// request resolve to one winner instead of a lost update. The guard is never
/// held across an await point.
pub struct RequestStore {
    requests: DashMap<Uuid, Request>,
    ledger: DashMap<Uuid, Vec<HistoryEntry>>,
}

impl RequestStore {
    pub fn new() -> Self {
        Self {
            requests: DashMap::new(),
            ledger: DashMap::new(),
        }
    }

    pub fn insert(&self, request: Request) {
        self.requests.insert(request.id, request);
    }

    pub fn get(&self, id: &Uuid) -> Option<Request> {
        self.requests.get(id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Atomically validate and mutate one request, returning the updated copy.
    /// The closure works on a draft; an error aborts the write and is
    /// surfaced unchanged, leaving the stored entity as it was.
    pub fn mutate<F>(&self, id: Uuid, apply: F) -> Result<Request, AppError>
    where
        F: FnOnce(&mut Request) -> Result<(), AppError>,
    {
        let mut entry = self
            .requests
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("request {id} not found")))?;

        let mut draft = entry.value().clone();
        apply(&mut draft)?;
        *entry.value_mut() = draft;
        Ok(entry.value().clone())
    }

    pub fn append_history(&self, entry: HistoryEntry) {
        self.ledger.entry(entry.request_id).or_default().push(entry);
    }

    pub fn history_for(&self, id: &Uuid) -> Vec<HistoryEntry> {
        self.ledger
            .get(id)
            .map(|rows| rows.value().clone())
            .unwrap_or_default()
    }

    pub fn by_sender(&self, sender: Uuid, status: Option<RequestStatus>) -> Vec<Request> {
        self.filtered(|req| req.sender_id == sender && status.is_none_or(|s| req.status == s))
    }

    pub fn by_carrier(&self, carrier: Uuid, status: Option<RequestStatus>) -> Vec<Request> {
        self.filtered(|req| {
            req.carrier_id == Some(carrier) && status.is_none_or(|s| req.status == s)
        })
    }

    /// Pending requests created inside the sweep window: older than
    /// `older_than`, but not before `newer_than`.
    pub fn stale_pending(
        &self,
        older_than: DateTime<Utc>,
        newer_than: DateTime<Utc>,
    ) -> Vec<Request> {
        self.filtered(|req| {
            req.status == RequestStatus::Pending
                && req.created_at < older_than
                && req.created_at > newer_than
        })
    }

    pub fn delivered_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<Request> {
        self.filtered(|req| {
            req.status == RequestStatus::Delivered
                && req.created_at >= from
                && req.created_at < to
        })
    }

    fn filtered<P>(&self, predicate: P) -> Vec<Request>
    where
        P: Fn(&Request) -> bool,
    {
        self.requests
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl Default for RequestStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::request::{GoodsType, SpaceClass};

    fn pending_request(id_seed: u128, created_at: DateTime<Utc>) -> Request {
        Request {
            id: Uuid::from_u128(id_seed),
            sender_id: Uuid::from_u128(100),
            carrier_id: None,
            ride_id: None,
            goods_description: "crated parts".to_string(),
            goods_type: GoodsType::Other,
            weight_kg: None,
            quantity: None,
            required_space: SpaceClass::Small,
            origin: "Depot A".to_string(),
            destination: "Depot B".to_string(),
            origin_coords: None,
            destination_coords: None,
            fare: None,
            special_instructions: None,
            delivery_date: None,
            status: RequestStatus::Pending,
            created_at,
            updated_at: created_at,
            accepted_at: None,
            picked_up_at: None,
            delivered_at: None,
            rejection_reason: None,
        }
    }

    #[test]
    fn mutate_on_unknown_id_is_not_found() {
        let store = RequestStore::new();
        let err = store.mutate(Uuid::from_u128(9), |_| Ok(())).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn failed_mutation_leaves_request_untouched() {
        let store = RequestStore::new();
        let request = pending_request(1, Utc::now());
        store.insert(request.clone());

        let result = store.mutate(request.id, |req| {
            req.status = RequestStatus::Cancelled;
            Err(AppError::InvalidState("nope".to_string()))
        });

        assert!(result.is_err());
        let stored = store.get(&request.id).unwrap();
        assert_eq!(stored.status, RequestStatus::Pending);
    }

    #[test]
    fn stale_pending_honors_both_window_edges() {
        let store = RequestStore::new();
        let now = Utc::now();
        store.insert(pending_request(1, now - chrono::Duration::minutes(5)));
        store.insert(pending_request(2, now - chrono::Duration::minutes(30)));
        store.insert(pending_request(3, now - chrono::Duration::hours(3)));

        let stale = store.stale_pending(
            now - chrono::Duration::minutes(15),
            now - chrono::Duration::hours(2),
        );

        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].id, Uuid::from_u128(2));
    }

    #[test]
    fn ledger_is_append_only_per_request() {
        let store = RequestStore::new();
        let request = pending_request(1, Utc::now());
        store.insert(request.clone());

        for note in ["created", "accepted"] {
            store.append_history(HistoryEntry {
                request_id: request.id,
                status: RequestStatus::Pending,
                timestamp: Utc::now(),
                note: note.to_string(),
                actor: None,
            });
        }

        let rows = store.history_for(&request.id);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].note, "created");
        assert_eq!(rows[1].note, "accepted");
    }
}
