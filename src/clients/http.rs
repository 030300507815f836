use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::clients::{
    Geocoder, IdentityClient, PaymentGateway, PaymentInstruction, PaymentStatus, Ride,
    RideClient, UserProfile,
};
use crate::error::AppError;
use crate::models::request::GeoPoint;

fn transport_error(context: &str, err: reqwest::Error) -> AppError {
    AppError::Internal(format!("{context}: {err}"))
}

pub struct HttpIdentityClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpIdentityClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl IdentityClient for HttpIdentityClient {
    async fn get_user(&self, id: Uuid) -> Result<UserProfile, AppError> {
        let response = self
            .http
            .get(format!("{}/users/{id}", self.base_url))
            .send()
            .await
            .map_err(|err| transport_error("identity service unreachable", err))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("user {id} not found")));
        }

        response
            .error_for_status()
            .map_err(|err| transport_error("identity service error", err))?
            .json()
            .await
            .map_err(|err| transport_error("identity response malformed", err))
    }
}

pub struct HttpRideClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpRideClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl RideClient for HttpRideClient {
    async fn get_ride(&self, id: Uuid) -> Result<Ride, AppError> {
        let response = self
            .http
            .get(format!("{}/rides/{id}", self.base_url))
            .send()
            .await
            .map_err(|err| transport_error("ride service unreachable", err))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("ride {id} not found")));
        }

        response
            .error_for_status()
            .map_err(|err| transport_error("ride service error", err))?
            .json()
            .await
            .map_err(|err| transport_error("ride response malformed", err))
    }
}

/// Nominatim-style forward geocoder: first search hit wins.
pub struct OsmGeocoder {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct OsmPlace {
    lat: String,
    lon: String,
}

impl OsmGeocoder {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Geocoder for OsmGeocoder {
    async fn resolve(&self, address: &str) -> Result<GeoPoint, AppError> {
        let places: Vec<OsmPlace> = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|err| transport_error("geocoder unreachable", err))?
            .error_for_status()
            .map_err(|err| transport_error("geocoder error", err))?
            .json()
            .await
            .map_err(|err| transport_error("geocoder response malformed", err))?;

        let place = places
            .first()
            .ok_or_else(|| AppError::NotFound(format!("no match for address: {address}")))?;

        let lat = place
            .lat
            .parse()
            .map_err(|_| AppError::Internal("geocoder returned non-numeric lat".to_string()))?;
        let lng = place
            .lon
            .parse()
            .map_err(|_| AppError::Internal("geocoder returned non-numeric lon".to_string()))?;

        Ok(GeoPoint { lat, lng })
    }
}

pub struct HttpPaymentGateway {
    base_url: String,
    http: reqwest::Client,
}

impl HttpPaymentGateway {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn submit(&self, instruction: &PaymentInstruction) -> Result<(), AppError> {
        self.http
            .post(format!("{}/payments", self.base_url))
            .json(instruction)
            .send()
            .await
            .map_err(|err| transport_error("payment gateway unreachable", err))?
            .error_for_status()
            .map_err(|err| transport_error("payment submit rejected", err))?;

        Ok(())
    }

    async fn status(&self, request_id: Uuid) -> Result<PaymentStatus, AppError> {
        self.http
            .get(format!("{}/payments/{request_id}/status", self.base_url))
            .send()
            .await
            .map_err(|err| transport_error("payment gateway unreachable", err))?
            .error_for_status()
            .map_err(|err| transport_error("payment status rejected", err))?
            .json()
            .await
            .map_err(|err| transport_error("payment status malformed", err))
    }
}
