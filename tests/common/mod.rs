#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use transport_requests::api;
use transport_requests::cache::{BanRegistry, LocationCache};
use transport_requests::clients::{
    Geocoder, IdentityClient, MailTransport, PaymentGateway, PaymentInstruction, PaymentState,
    PaymentStatus, Ride, RideClient, UserProfile,
};
use transport_requests::error::AppError;
use transport_requests::lifecycle::{Collaborators, Lifecycle};
use transport_requests::models::request::{GeoPoint, GoodsType, NewRequest, SpaceClass};
use transport_requests::notify::Notifier;
use transport_requests::observability::metrics::Metrics;
use transport_requests::state::AppState;
use transport_requests::store::RequestStore;
use transport_requests::token::TokenSigner;

pub const TOKEN_SECRET: &str = "test-signing-secret";

pub fn sender() -> Uuid {
    Uuid::from_u128(0x51)
}

pub fn carrier() -> Uuid {
    Uuid::from_u128(0xC1)
}

pub struct FakeIdentity {
    users: DashMap<Uuid, UserProfile>,
}

impl FakeIdentity {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    pub fn add_user(&self, id: Uuid, email: Option<&str>) {
        self.users.insert(
            id,
            UserProfile {
                display_name: format!("user-{id}"),
                email: email.map(str::to_string),
                phone: None,
            },
        );
    }
}

#[async_trait]
impl IdentityClient for FakeIdentity {
    async fn get_user(&self, id: Uuid) -> Result<UserProfile, AppError> {
        self.users
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::NotFound(format!("user {id} not found")))
    }
}

pub struct FakeRides {
    rides: DashMap<Uuid, Ride>,
}

impl FakeRides {
    pub fn new() -> Self {
        Self {
            rides: DashMap::new(),
        }
    }

    pub fn add_ride(&self, id: Uuid, carrier_id: Option<Uuid>) {
        self.rides.insert(id, Ride { id, carrier_id });
    }
}

#[async_trait]
impl RideClient for FakeRides {
    async fn get_ride(&self, id: Uuid) -> Result<Ride, AppError> {
        self.rides
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::NotFound(format!("ride {id} not found")))
    }
}

/// Deterministic geocoder: any address containing "nowhere" fails, everything
/// else resolves to a fixed point.
pub struct FakeGeocoder;

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn resolve(&self, address: &str) -> Result<GeoPoint, AppError> {
        if address.contains("nowhere") {
            return Err(AppError::NotFound(format!("no match for address: {address}")));
        }
        Ok(GeoPoint {
            lat: 12.9716,
            lng: 77.5946,
        })
    }
}

/// Gateway whose settlement statuses follow a script; once the script runs
/// dry every attempt succeeds. Records submitted instructions for assertions.
pub struct ScriptedGateway {
    script: Mutex<VecDeque<PaymentState>>,
    pub submitted: Mutex<Vec<PaymentInstruction>>,
    pub submit_count: AtomicUsize,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            submitted: Mutex::new(Vec::new()),
            submit_count: AtomicUsize::new(0),
        }
    }

    pub fn script(&self, states: &[PaymentState]) {
        self.script.lock().unwrap().extend(states.iter().copied());
    }

    pub fn submits(&self) -> usize {
        self.submit_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn submit(&self, instruction: &PaymentInstruction) -> Result<(), AppError> {
        self.submit_count.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(instruction.clone());
        Ok(())
    }

    async fn status(&self, _request_id: Uuid) -> Result<PaymentStatus, AppError> {
        let state = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(PaymentState::Success);
        Ok(PaymentStatus {
            state,
            message: None,
        })
    }
}

pub struct RecordingMailer {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn subjects_to(&self, address: &str) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(to, _)| to == address)
            .map(|(_, subject)| subject.clone())
            .collect()
    }
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), AppError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string()));
        Ok(())
    }
}

pub struct Harness {
    pub lifecycle: Arc<Lifecycle>,
    pub notifier: Arc<Notifier>,
    pub metrics: Metrics,
    pub identity: Arc<FakeIdentity>,
    pub rides: Arc<FakeRides>,
    pub gateway: Arc<ScriptedGateway>,
    pub mailer: Arc<RecordingMailer>,
}

impl Harness {
    pub fn app(&self) -> axum::Router {
        api::rest::router(Arc::new(AppState::new(
            self.lifecycle.clone(),
            self.notifier.clone(),
            self.metrics.clone(),
        )))
    }
}

/// Fully wired lifecycle over in-memory fakes, with the default sender and
/// carrier registered in the identity service.
pub fn harness() -> Harness {
    let identity = Arc::new(FakeIdentity::new());
    identity.add_user(sender(), Some("sender@example.com"));
    identity.add_user(carrier(), Some("carrier@example.com"));

    let rides = Arc::new(FakeRides::new());
    let gateway = Arc::new(ScriptedGateway::new());
    let mailer = Arc::new(RecordingMailer::new());

    let metrics = Metrics::new();
    let notifier = Arc::new(Notifier::new(identity.clone(), mailer.clone(), 64));
    let lifecycle = Arc::new(Lifecycle::new(
        Arc::new(RequestStore::new()),
        Arc::new(BanRegistry::new()),
        Arc::new(LocationCache::new()),
        notifier.clone(),
        Collaborators {
            identity: identity.clone(),
            rides: rides.clone(),
            geocoder: Arc::new(FakeGeocoder),
            gateway: gateway.clone(),
        },
        TokenSigner::new(TOKEN_SECRET),
        metrics.clone(),
        "http://localhost:3000".to_string(),
    ));

    Harness {
        lifecycle,
        notifier,
        metrics,
        identity,
        rides,
        gateway,
        mailer,
    }
}

pub fn new_request_spec(carrier_id: Option<Uuid>) -> NewRequest {
    NewRequest {
        ride_id: None,
        carrier_id,
        goods_description: "two crates of machine parts".to_string(),
        goods_type: GoodsType::Other,
        weight_kg: Some(42.5),
        quantity: Some(2),
        required_space: SpaceClass::Medium,
        origin: "Jayanagar, Bengaluru".to_string(),
        destination: "Whitefield, Bengaluru".to_string(),
        fare: Some(100.0),
        special_instructions: None,
        delivery_date: None,
    }
}
