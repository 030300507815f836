pub mod settlement;
pub mod sweeper;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::cache::{BanRegistry, LocationCache, LocationFix};
use crate::clients::{Geocoder, IdentityClient, PaymentGateway, RideClient};
use crate::error::AppError;
use crate::models::history::HistoryEntry;
use crate::models::request::{GeoPoint, NewRequest, Request, RequestPatch, RequestStatus};
use crate::notify::{Envelope, Notifier};
use crate::observability::metrics::Metrics;
use crate::store::RequestStore;
use crate::token::{ACTION_TOKEN_TTL_MINUTES, TokenSigner};

use settlement::Settlement;

/// External services the lifecycle consults. All calls are best-effort
/// enrichment except payment, which settlement wraps with its retry policy.
pub struct Collaborators {
    pub identity: Arc<dyn IdentityClient>,
    pub rides: Arc<dyn RideClient>,
    pub geocoder: Arc<dyn Geocoder>,
    pub gateway: Arc<dyn PaymentGateway>,
}

#[derive(Debug, Serialize)]
pub struct StatusView {
    pub request_id: Uuid,
    pub status: RequestStatus,
    pub accepted_at: Option<DateTime<Utc>>,
    pub picked_up_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct RequestSummary {
    pub total: usize,
    pub pending: usize,
    pub accepted: usize,
    pub in_transit: usize,
    pub delivered: usize,
    pub cancelled: usize,
}

#[derive(Debug, Serialize)]
pub struct TransactionReport {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub total_transactions: usize,
    pub total_amount: f64,
    pub commission_earned: f64,
}

/// The request state machine. Validates actor authorization and the current
/// status, mutates the request, appends ledger history, then fans out
/// notifications (and settlement on delivery). No lock is held across any
/// collaborator call; the precondition check and the write share the store
/// entry's guard.
pub struct Lifecycle {
    pub store: Arc<RequestStore>,
    pub bans: Arc<BanRegistry>,
    locations: Arc<LocationCache>,
    notifier: Arc<Notifier>,
    identity: Arc<dyn IdentityClient>,
    rides: Arc<dyn RideClient>,
    geocoder: Arc<dyn Geocoder>,
    settlement: Settlement,
    tokens: TokenSigner,
    metrics: Metrics,
    public_base_url: String,
}

impl Lifecycle {
    pub fn new(
        store: Arc<RequestStore>,
        bans: Arc<BanRegistry>,
        locations: Arc<LocationCache>,
        notifier: Arc<Notifier>,
        collaborators: Collaborators,
        tokens: TokenSigner,
        metrics: Metrics,
        public_base_url: String,
    ) -> Self {
        let settlement = Settlement::new(
            collaborators.gateway,
            notifier.clone(),
            metrics.clone(),
        );

        Self {
            store,
            bans,
            locations,
            notifier,
            identity: collaborators.identity,
            rides: collaborators.rides,
            geocoder: collaborators.geocoder,
            settlement,
            tokens,
            metrics,
            public_base_url,
        }
    }

    /// Creates a request in `Pending`. Ride lookup (to pre-assign a carrier)
    /// and geocoding are best-effort: a failure leaves the field empty and is
    /// only logged.
    pub async fn create(&self, spec: NewRequest, sender_id: Uuid) -> Result<Request, AppError> {
        self.ensure_not_banned(sender_id)?;

        let mut carrier_id = spec.carrier_id;
        if carrier_id.is_none() {
            if let Some(ride_id) = spec.ride_id {
                match self.rides.get_ride(ride_id).await {
                    Ok(ride) => carrier_id = ride.carrier_id,
                    Err(err) => {
                        warn!(%ride_id, error = %err, "ride lookup failed; request stays unassigned");
                    }
                }
            }
        }

        let origin_coords = self.resolve_coords(&spec.origin).await;
        let destination_coords = self.resolve_coords(&spec.destination).await;

        let now = Utc::now();
        let request = Request {
            id: Uuid::new_v4(),
            sender_id,
            carrier_id,
            ride_id: spec.ride_id,
            goods_description: spec.goods_description,
            goods_type: spec.goods_type,
            weight_kg: spec.weight_kg,
            quantity: spec.quantity,
            required_space: spec.required_space,
            origin: spec.origin,
            destination: spec.destination,
            origin_coords,
            destination_coords,
            fare: spec.fare,
            special_instructions: spec.special_instructions,
            delivery_date: spec.delivery_date,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
            accepted_at: None,
            picked_up_at: None,
            delivered_at: None,
            rejection_reason: None,
        };

        self.store.insert(request.clone());
        self.record_history(request.id, RequestStatus::Pending, "Request created", Some(sender_id));
        self.metrics.transition("create");
        self.metrics.requests_open.inc();

        self.fan_out_created(&request).await;

        info!(request_id = %request.id, %sender_id, "request created");
        Ok(request)
    }

    pub fn get(&self, id: Uuid, requester_id: Uuid) -> Result<Request, AppError> {
        self.ensure_not_banned(requester_id)?;
        let request = self.find(id)?;

        if request.sender_id != requester_id && request.carrier_id != Some(requester_id) {
            return Err(AppError::Forbidden(
                "only the sender or the assigned carrier may view this request".to_string(),
            ));
        }
        Ok(request)
    }

    /// Sender-only edit, valid while the request is still pending.
    pub async fn update(
        &self,
        id: Uuid,
        patch: RequestPatch,
        requester_id: Uuid,
    ) -> Result<Request, AppError> {
        self.ensure_not_banned(requester_id)?;

        let updated = self.store.mutate(id, |req| {
            if req.sender_id != requester_id {
                return Err(AppError::Forbidden(
                    "only the sender may update this request".to_string(),
                ));
            }
            if req.status != RequestStatus::Pending {
                return Err(AppError::InvalidState(
                    "only pending requests can be updated".to_string(),
                ));
            }

            if let Some(description) = patch.goods_description {
                req.goods_description = description;
            }
            if let Some(weight) = patch.weight_kg {
                req.weight_kg = Some(weight);
            }
            if let Some(quantity) = patch.quantity {
                req.quantity = Some(quantity);
            }
            if let Some(origin) = patch.origin {
                req.origin = origin;
            }
            if let Some(destination) = patch.destination {
                req.destination = destination;
            }
            if let Some(instructions) = patch.special_instructions {
                req.special_instructions = Some(instructions);
            }
            req.updated_at = Utc::now();
            Ok(())
        })?;

        self.record_history(id, updated.status, "Request updated", Some(requester_id));
        self.metrics.transition("update");

        self.notifier
            .notify_user(
                requester_id,
                "Request updated",
                notification(id, "Request updated successfully"),
            )
            .await;
        if let Some(carrier_id) = updated.carrier_id {
            self.notifier
                .notify_user(
                    carrier_id,
                    "Request updated",
                    notification(id, "Request details updated by sender"),
                )
                .await;
        }

        Ok(updated)
    }

    /// Sender-only cancellation, valid while the request is still pending.
    pub async fn cancel(&self, id: Uuid, requester_id: Uuid) -> Result<Request, AppError> {
        self.ensure_not_banned(requester_id)?;

        let updated = self.store.mutate(id, |req| {
            if req.sender_id != requester_id {
                return Err(AppError::Forbidden(
                    "only the sender may cancel this request".to_string(),
                ));
            }
            if req.status != RequestStatus::Pending {
                return Err(AppError::InvalidState(
                    "only pending requests can be cancelled".to_string(),
                ));
            }

            req.status = RequestStatus::Cancelled;
            req.updated_at = Utc::now();
            Ok(())
        })?;

        self.record_history(id, RequestStatus::Cancelled, "Cancelled by sender", Some(requester_id));
        self.metrics.transition("cancel");
        self.metrics.requests_open.dec();

        self.notifier
            .notify_user(
                requester_id,
                "Request cancelled",
                notification(id, "Request cancelled successfully"),
            )
            .await;
        if let Some(carrier_id) = updated.carrier_id {
            self.notifier
                .notify_user(
                    carrier_id,
                    "Request cancelled",
                    notification(id, "Request cancelled by sender"),
                )
                .await;
        }

        Ok(updated)
    }

    /// Carrier accepts a pending request assigned to them.
    pub async fn accept(&self, id: Uuid, carrier_id: Uuid) -> Result<Request, AppError> {
        self.ensure_not_banned(carrier_id)?;

        let updated = self.store.mutate(id, |req| {
            if req.carrier_id != Some(carrier_id) {
                return Err(AppError::Forbidden(
                    "you are not the assigned carrier for this request".to_string(),
                ));
            }
            if req.status != RequestStatus::Pending {
                return Err(AppError::InvalidState(
                    "only pending requests can be accepted".to_string(),
                ));
            }

            let now = Utc::now();
            req.status = RequestStatus::Accepted;
            req.accepted_at = Some(now);
            req.updated_at = now;
            Ok(())
        })?;

        self.record_history(id, RequestStatus::Accepted, "Accepted by carrier", Some(carrier_id));
        self.metrics.transition("accept");

        self.notifier
            .notify_user(
                updated.sender_id,
                "Request accepted",
                notification(id, "Request accepted by carrier"),
            )
            .await;
        self.notifier
            .notify_user(
                carrier_id,
                "Request accepted",
                notification(id, "Request accepted successfully"),
            )
            .await;
        self.notifier
            .tracking_update(
                updated.sender_id,
                Some(carrier_id),
                id,
                RequestStatus::Accepted,
                updated.origin.clone(),
            )
            .await;

        Ok(updated)
    }

    /// Accept via a signed email-link token instead of a session. The token's
    /// embedded carrier id becomes the acting user, then the normal accept
    /// path applies.
    pub async fn accept_with_token(&self, id: Uuid, token: &str) -> Result<Request, AppError> {
        let carrier_id = self.tokens.verify(token, id)?;
        self.accept(id, carrier_id).await
    }

    /// Carrier declines a request assigned to them. Works from any status:
    /// the request is recycled to `Pending` with the carrier cleared, so it
    /// becomes available for rematching.
    pub async fn reject(
        &self,
        id: Uuid,
        carrier_id: Uuid,
        reason: Option<String>,
    ) -> Result<Request, AppError> {
        self.ensure_not_banned(carrier_id)?;

        let updated = self.store.mutate(id, |req| {
            if req.carrier_id != Some(carrier_id) {
                return Err(AppError::Forbidden(
                    "you can only reject requests assigned to you".to_string(),
                ));
            }

            req.carrier_id = None;
            req.status = RequestStatus::Pending;
            req.updated_at = Utc::now();
            Ok(())
        })?;

        let note = match &reason {
            Some(reason) => format!("Rejected by carrier: {reason}"),
            None => "Rejected by carrier".to_string(),
        };
        self.record_history(id, RequestStatus::Pending, &note, Some(carrier_id));
        self.metrics.transition("reject");

        let sender_message = match &reason {
            Some(reason) => format!("Request rejected: {reason}"),
            None => "Request rejected".to_string(),
        };
        self.notifier
            .notify_user(updated.sender_id, "Request rejected", notification(id, &sender_message))
            .await;
        self.notifier
            .notify_user(
                carrier_id,
                "Request rejected",
                notification(id, "Request rejection confirmed"),
            )
            .await;
        self.notifier
            .broadcast_to_carriers(notification(id, "Request available again after rejection"));

        Ok(updated)
    }

    pub async fn reject_with_token(&self, id: Uuid, token: &str) -> Result<Request, AppError> {
        let carrier_id = self.tokens.verify(token, id)?;
        self.reject(id, carrier_id, Some("Rejected via email link".to_string()))
            .await
    }

    /// Carrier confirms pickup; the request moves to `InTransit`. The
    /// tracking event uses the carrier's last-known position, falling back to
    /// the origin address when no fix is cached.
    pub async fn mark_picked_up(&self, id: Uuid, carrier_id: Uuid) -> Result<Request, AppError> {
        self.ensure_not_banned(carrier_id)?;

        let updated = self.store.mutate(id, |req| {
            if req.carrier_id != Some(carrier_id) {
                return Err(AppError::Forbidden(
                    "only the assigned carrier can mark this request picked up".to_string(),
                ));
            }
            if req.status != RequestStatus::Accepted {
                return Err(AppError::InvalidState(
                    "only accepted requests can be marked picked up".to_string(),
                ));
            }

            let now = Utc::now();
            req.status = RequestStatus::InTransit;
            req.picked_up_at = Some(now);
            req.updated_at = now;
            Ok(())
        })?;

        self.record_history(id, RequestStatus::InTransit, "Goods picked up by carrier", Some(carrier_id));
        self.metrics.transition("pickup");

        let location = self
            .locations
            .last_fix(&carrier_id)
            .map(|fix| fix.to_string())
            .unwrap_or_else(|| updated.origin.clone());
        self.notifier
            .tracking_update(updated.sender_id, Some(carrier_id), id, RequestStatus::InTransit, location)
            .await;
        self.notifier
            .notify_user(
                updated.sender_id,
                "Goods picked up",
                notification(id, "Your goods have been picked up"),
            )
            .await;
        self.notifier
            .notify_user(
                carrier_id,
                "Pickup confirmed",
                notification(id, "Pickup confirmed, goods in transit"),
            )
            .await;

        Ok(updated)
    }

    /// Carrier confirms delivery. Settlement runs synchronously but its
    /// failure never rolls back the `Delivered` status: delivery is truth,
    /// payment is reconciled separately.
    pub async fn mark_delivered(
        &self,
        id: Uuid,
        carrier_id: Uuid,
        notes: Option<String>,
    ) -> Result<Request, AppError> {
        self.ensure_not_banned(carrier_id)?;

        let updated = self.store.mutate(id, |req| {
            if req.carrier_id != Some(carrier_id) {
                return Err(AppError::Forbidden(
                    "only the assigned carrier can mark this request delivered".to_string(),
                ));
            }
            if req.status != RequestStatus::InTransit {
                return Err(AppError::InvalidState(
                    "only in-transit requests can be marked delivered".to_string(),
                ));
            }

            let now = Utc::now();
            req.status = RequestStatus::Delivered;
            req.delivered_at = Some(now);
            req.updated_at = now;
            Ok(())
        })?;

        let note = match &notes {
            Some(notes) => format!("Goods delivered. Notes: {notes}"),
            None => "Goods delivered".to_string(),
        };
        self.record_history(id, RequestStatus::Delivered, &note, Some(carrier_id));
        self.metrics.transition("deliver");
        self.metrics.requests_open.dec();

        if let Err(err) = self.settlement.settle(&updated).await {
            error!(request_id = %id, error = %err, "settlement failed; request stays delivered");
        }

        let location = self
            .locations
            .last_fix(&carrier_id)
            .map(|fix| fix.to_string())
            .unwrap_or_else(|| updated.destination.clone());
        self.notifier
            .tracking_update(updated.sender_id, Some(carrier_id), id, RequestStatus::Delivered, location)
            .await;
        self.notifier
            .notify_user(
                updated.sender_id,
                "Goods delivered",
                notification(id, "Goods delivered successfully"),
            )
            .await;
        self.notifier
            .notify_user(
                carrier_id,
                "Delivery confirmed",
                notification(id, "Delivery confirmed"),
            )
            .await;

        Ok(updated)
    }

    /// Records the carrier's own position (1-hour TTL).
    pub fn update_carrier_location(
        &self,
        carrier_id: Uuid,
        point: GeoPoint,
    ) -> Result<(), AppError> {
        self.ensure_not_banned(carrier_id)?;
        self.locations.record(
            carrier_id,
            LocationFix {
                lat: point.lat,
                lng: point.lng,
                recorded_at: Utc::now(),
            },
        );
        info!(%carrier_id, "carrier location updated");
        Ok(())
    }

    /// Records a shipment position keyed by request id and pushes a tracking
    /// event to both parties.
    pub async fn update_tracking(
        &self,
        id: Uuid,
        point: GeoPoint,
        carrier_id: Uuid,
    ) -> Result<(), AppError> {
        self.ensure_not_banned(carrier_id)?;
        let request = self.find(id)?;
        if request.carrier_id != Some(carrier_id) {
            return Err(AppError::Forbidden(
                "only the assigned carrier can update tracking".to_string(),
            ));
        }

        let fix = LocationFix {
            lat: point.lat,
            lng: point.lng,
            recorded_at: Utc::now(),
        };
        let location = fix.to_string();
        self.locations.record(id, fix);

        self.notifier
            .tracking_update(request.sender_id, Some(carrier_id), id, request.status, location)
            .await;
        Ok(())
    }

    /// Last-known shipment position; `None` means no tracking data.
    pub fn get_tracking(
        &self,
        id: Uuid,
        requester_id: Uuid,
    ) -> Result<Option<LocationFix>, AppError> {
        self.ensure_not_banned(requester_id)?;
        let request = self.find(id)?;
        if request.sender_id != requester_id && request.carrier_id != Some(requester_id) {
            return Err(AppError::Forbidden(
                "only the sender or the assigned carrier may view tracking".to_string(),
            ));
        }
        Ok(self.locations.last_fix(&id))
    }

    pub fn status(&self, id: Uuid, requester_id: Uuid) -> Result<StatusView, AppError> {
        let request = self.get(id, requester_id)?;
        Ok(StatusView {
            request_id: request.id,
            status: request.status,
            accepted_at: request.accepted_at,
            picked_up_at: request.picked_up_at,
            delivered_at: request.delivered_at,
        })
    }

    /// The request's append-only status ledger, oldest first.
    pub fn history(&self, id: Uuid, requester_id: Uuid) -> Result<Vec<HistoryEntry>, AppError> {
        self.get(id, requester_id)?;
        Ok(self.store.history_for(&id))
    }

    pub fn summary(&self, sender_id: Uuid) -> Result<RequestSummary, AppError> {
        self.ensure_not_banned(sender_id)?;
        let requests = self.store.by_sender(sender_id, None);

        let mut by_status: HashMap<RequestStatus, usize> = HashMap::new();
        for request in &requests {
            *by_status.entry(request.status).or_default() += 1;
        }

        let count = |status| by_status.get(&status).copied().unwrap_or(0);
        Ok(RequestSummary {
            total: requests.len(),
            pending: count(RequestStatus::Pending),
            accepted: count(RequestStatus::Accepted),
            in_transit: count(RequestStatus::InTransit),
            delivered: count(RequestStatus::Delivered),
            cancelled: count(RequestStatus::Cancelled),
        })
    }

    pub fn requests_by_sender(
        &self,
        sender_id: Uuid,
        status: Option<RequestStatus>,
    ) -> Result<Vec<Request>, AppError> {
        self.ensure_not_banned(sender_id)?;
        Ok(self.store.by_sender(sender_id, status))
    }

    pub fn requests_by_carrier(
        &self,
        carrier_id: Uuid,
        status: Option<RequestStatus>,
    ) -> Result<Vec<Request>, AppError> {
        self.ensure_not_banned(carrier_id)?;
        Ok(self.store.by_carrier(carrier_id, status))
    }

    /// Delivered volume and commission earned over a created-at window.
    pub fn transaction_report(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> TransactionReport {
        let delivered = self.store.delivered_between(from, to);
        let total_amount: f64 = delivered.iter().filter_map(|req| req.fare).sum();

        TransactionReport {
            from,
            to,
            total_transactions: delivered.len(),
            total_amount,
            commission_earned: total_amount * settlement::COMMISSION_RATE,
        }
    }

    /// Writes a 30-day ban marker after confirming the user exists. The rest
    /// of the lifecycle only ever reads the marker.
    pub async fn ban_user(&self, user_id: Uuid, reason: &str) -> Result<(), AppError> {
        self.identity
            .get_user(user_id)
            .await
            .map_err(|_| AppError::NotFound(format!("user {user_id} not found")))?;

        self.bans.ban(user_id, reason);
        self.notifier
            .notify_user(
                user_id,
                "Account banned",
                Envelope::Notification {
                    request_id: None,
                    body: format!("Your account has been banned. Reason: {reason}"),
                },
            )
            .await;

        info!(%user_id, reason, "user banned");
        Ok(())
    }

    /// Sweeper entry point: rejects one stale pending request. Re-checks the
    /// status under the store guard, so a concurrent accept wins cleanly.
    pub(crate) async fn auto_reject(&self, id: Uuid) -> Result<(), AppError> {
        let updated = self.store.mutate(id, |req| {
            if req.status != RequestStatus::Pending {
                return Err(AppError::InvalidState(
                    "request is no longer pending".to_string(),
                ));
            }

            req.status = RequestStatus::Rejected;
            req.rejection_reason = Some("no carrier responded in time".to_string());
            req.updated_at = Utc::now();
            Ok(())
        })?;

        self.record_history(id, RequestStatus::Rejected, "Auto-rejected: no carrier responded in time", None);
        self.metrics.sweeper_rejections_total.inc();
        self.metrics.requests_open.dec();

        self.notifier
            .notify_user(
                updated.sender_id,
                "Carrier did not respond",
                notification(id, "Request was automatically rejected: no carrier responded in time"),
            )
            .await;

        Ok(())
    }

    fn find(&self, id: Uuid) -> Result<Request, AppError> {
        self.store
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("request {id} not found")))
    }

    fn ensure_not_banned(&self, user_id: Uuid) -> Result<(), AppError> {
        match self.bans.reason_for(&user_id) {
            Some(reason) => Err(AppError::Forbidden(format!("user is banned: {reason}"))),
            None => Ok(()),
        }
    }

    async fn resolve_coords(&self, address: &str) -> Option<GeoPoint> {
        match self.geocoder.resolve(address).await {
            Ok(point) => Some(point),
            Err(err) => {
                warn!(address, error = %err, "geocoding failed; storing request without coordinates");
                None
            }
        }
    }

    fn record_history(&self, request_id: Uuid, status: RequestStatus, note: &str, actor: Option<Uuid>) {
        self.store.append_history(HistoryEntry {
            request_id,
            status,
            timestamp: Utc::now(),
            note: note.to_string(),
            actor,
        });
    }

    /// Creation fan-out: an assigned carrier gets a push plus an email with
    /// signed accept/decline links; an unassigned request is broadcast to the
    /// carrier topic. The sender always gets a push and a confirmation email.
    async fn fan_out_created(&self, request: &Request) {
        match request.carrier_id {
            Some(carrier_id) => {
                self.notifier.push(
                    carrier_id,
                    notification(
                        request.id,
                        &format!(
                            "New request for your ride from {} to {}",
                            request.origin, request.destination
                        ),
                    ),
                );

                let token = self.tokens.issue(request.id, carrier_id);
                let accept_url = format!(
                    "{}/requests/{}/accept?token={token}",
                    self.public_base_url, request.id
                );
                let reject_url = format!(
                    "{}/requests/{}/reject?token={token}",
                    self.public_base_url, request.id
                );
                self.notifier
                    .email_user(
                        carrier_id,
                        "New transport request: action required",
                        &carrier_assignment_email(request, &accept_url, &reject_url),
                    )
                    .await;
            }
            None => {
                self.notifier.broadcast_to_carriers(notification(
                    request.id,
                    &format!(
                        "New request available from {} to {}",
                        request.origin, request.destination
                    ),
                ));
            }
        }

        self.notifier.push(
            request.sender_id,
            notification(request.id, "Request created successfully"),
        );
        self.notifier
            .email_user(
                request.sender_id,
                "Transport request confirmation",
                &sender_confirmation_email(request),
            )
            .await;
    }
}

fn notification(request_id: Uuid, body: &str) -> Envelope {
    Envelope::Notification {
        request_id: Some(request_id),
        body: body.to_string(),
    }
}

fn fare_text(fare: Option<f64>) -> String {
    match fare {
        Some(fare) => format!("{fare:.2}"),
        None => "not quoted".to_string(),
    }
}

fn carrier_assignment_email(request: &Request, accept_url: &str, reject_url: &str) -> String {
    format!(
        "You have been assigned a new transport request.\n\n\
         Request: {}\n\
         Pickup: {}\n\
         Destination: {}\n\
         Goods: {}\n\
         Fare: {}\n\n\
         Accept: {accept_url}\n\
         Decline: {reject_url}\n\n\
         These links expire in {ACTION_TOKEN_TTL_MINUTES} minutes.",
        request.id,
        request.origin,
        request.destination,
        request.goods_description,
        fare_text(request.fare),
    )
}

fn sender_confirmation_email(request: &Request) -> String {
    format!(
        "Your transport request has been created and is awaiting a carrier.\n\n\
         Request: {}\n\
         Pickup: {}\n\
         Destination: {}\n\
         Goods: {}\n\n\
         We will notify you as soon as a carrier responds.",
        request.id, request.origin, request.destination, request.goods_description,
    )
}
