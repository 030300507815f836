pub mod http;
pub mod smtp;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::request::GeoPoint;

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub display_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ride {
    pub id: Uuid,
    pub carrier_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentInstruction {
    pub request_id: Uuid,
    pub payer_id: Uuid,
    pub amount: f64,
    pub method: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PaymentState {
    Success,
    Failed,
    Pending,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentStatus {
    pub state: PaymentState,
    pub message: Option<String>,
}

/// User identity/profile lookup, owned by the identity service.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    async fn get_user(&self, id: Uuid) -> Result<UserProfile, AppError>;
}

/// Ride inventory lookup, owned by the ride service.
#[async_trait]
pub trait RideClient: Send + Sync {
    async fn get_ride(&self, id: Uuid) -> Result<Ride, AppError>;
}

/// Free-text address to coordinates. Callers treat failure as non-fatal.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, address: &str) -> Result<GeoPoint, AppError>;
}

/// Payment gateway: submit an instruction, then poll its settlement status.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn submit(&self, instruction: &PaymentInstruction) -> Result<(), AppError>;
    async fn status(&self, request_id: Uuid) -> Result<PaymentStatus, AppError>;
}

/// Outbound email transport. The fan-out layer wraps this best-effort.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError>;
}
