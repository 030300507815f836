use std::env;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub public_base_url: String,
    pub token_secret: String,
    pub sweep_interval_secs: u64,
    pub event_buffer_size: usize,
    pub identity_url: String,
    pub ride_service_url: String,
    pub payment_url: String,
    pub geocoder_url: String,
    pub smtp_relay: String,
    pub smtp_from: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            token_secret: env::var("TOKEN_SECRET")
                .map_err(|_| AppError::Internal("TOKEN_SECRET must be set".to_string()))?,
            sweep_interval_secs: parse_or_default("SWEEP_INTERVAL_SECS", 300)?,
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            identity_url: env::var("IDENTITY_URL")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
            ride_service_url: env::var("RIDE_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8082".to_string()),
            payment_url: env::var("PAYMENT_URL")
                .unwrap_or_else(|_| "http://localhost:8083".to_string()),
            geocoder_url: env::var("GEOCODER_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string()),
            smtp_relay: env::var("SMTP_RELAY").unwrap_or_else(|_| "localhost".to_string()),
            smtp_from: env::var("SMTP_FROM")
                .unwrap_or_else(|_| "Goods Transport <noreply@goodstransport.example>".to_string()),
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
