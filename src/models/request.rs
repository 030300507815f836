use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GoodsType {
    Electronics,
    Furniture,
    Food,
    Documents,
    Fragile,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpaceClass {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RequestStatus {
    Scheduled,
    Pending,
    Accepted,
    Rejected,
    InTransit,
    Delivered,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Scheduled => "SCHEDULED",
            RequestStatus::Pending => "PENDING",
            RequestStatus::Accepted => "ACCEPTED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::InTransit => "IN_TRANSIT",
            RequestStatus::Delivered => "DELIVERED",
            RequestStatus::Cancelled => "CANCELLED",
        }
    }
}

/// A single unit of goods-transport demand moving through its lifecycle.
///
/// Mutated exclusively through the lifecycle operations; every transition
/// stamps `updated_at` together with the fields it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub carrier_id: Option<Uuid>,
    pub ride_id: Option<Uuid>,
    pub goods_description: String,
    pub goods_type: GoodsType,
    pub weight_kg: Option<f64>,
    pub quantity: Option<u32>,
    pub required_space: SpaceClass,
    pub origin: String,
    pub destination: String,
    pub origin_coords: Option<GeoPoint>,
    pub destination_coords: Option<GeoPoint>,
    pub fare: Option<f64>,
    pub special_instructions: Option<String>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub picked_up_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

/// Caller-supplied fields for a new request. Coordinates and the carrier
/// assignment are resolved by the lifecycle service, not the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRequest {
    pub ride_id: Option<Uuid>,
    pub carrier_id: Option<Uuid>,
    pub goods_description: String,
    pub goods_type: GoodsType,
    pub weight_kg: Option<f64>,
    pub quantity: Option<u32>,
    pub required_space: SpaceClass,
    pub origin: String,
    pub destination: String,
    pub fare: Option<f64>,
    pub special_instructions: Option<String>,
    pub delivery_date: Option<DateTime<Utc>>,
}

/// Sender-editable fields; only applies while the request is still pending.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestPatch {
    pub goods_description: Option<String>,
    pub weight_kg: Option<f64>,
    pub quantity: Option<u32>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub special_instructions: Option<String>,
}
