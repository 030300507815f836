use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

pub const ACTION_TOKEN_TTL_MINUTES: i64 = 5;

/// Capability claims for accepting or rejecting one request from an email
/// link, without an authenticated session. Validated independently of the
/// identity system; the embedded carrier id becomes the acting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionToken {
    pub request_id: Uuid,
    pub carrier_id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies `ActionToken`s as `base64(claims).base64(hmac)`.
pub struct TokenSigner {
    secret: Vec<u8>,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
        }
    }

    pub fn issue(&self, request_id: Uuid, carrier_id: Uuid) -> String {
        let issued_at = Utc::now();
        self.sign(&ActionToken {
            request_id,
            carrier_id,
            issued_at,
            expires_at: issued_at + Duration::minutes(ACTION_TOKEN_TTL_MINUTES),
        })
    }

    /// Checks signature, expiry, and that the token was minted for
    /// `request_id`; returns the embedded carrier id on success.
    pub fn verify(&self, token: &str, request_id: Uuid) -> Result<Uuid, AppError> {
        let (payload_b64, sig_b64) = token
            .split_once('.')
            .ok_or_else(|| AppError::InvalidToken("malformed token".to_string()))?;

        let signature = URL_SAFE_NO_PAD
            .decode(sig_b64)
            .map_err(|_| AppError::InvalidToken("malformed signature".to_string()))?;

        let mut mac = self.mac();
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AppError::InvalidToken("signature mismatch".to_string()))?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AppError::InvalidToken("malformed payload".to_string()))?;
        let claims: ActionToken = serde_json::from_slice(&payload)
            .map_err(|_| AppError::InvalidToken("malformed claims".to_string()))?;

        if claims.expires_at < Utc::now() {
            return Err(AppError::InvalidToken("token expired".to_string()));
        }
        if claims.request_id != request_id {
            return Err(AppError::InvalidToken(
                "token was issued for a different request".to_string(),
            ));
        }

        Ok(claims.carrier_id)
    }

    fn sign(&self, claims: &ActionToken) -> String {
        let payload = serde_json::to_vec(claims).expect("action token claims serialize");
        let payload_b64 = URL_SAFE_NO_PAD.encode(payload);

        let mut mac = self.mac();
        mac.update(payload_b64.as_bytes());
        let signature = mac.finalize().into_bytes();

        format!("{payload_b64}.{}", URL_SAFE_NO_PAD.encode(signature))
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("hmac accepts any key length")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-signing-secret")
    }

    #[test]
    fn issued_token_verifies_and_yields_carrier() {
        let signer = signer();
        let request_id = Uuid::from_u128(1);
        let carrier_id = Uuid::from_u128(2);

        let token = signer.issue(request_id, carrier_id);
        let verified = signer.verify(&token, request_id).unwrap();

        assert_eq!(verified, carrier_id);
    }

    #[test]
    fn token_for_other_request_is_rejected() {
        let signer = signer();
        let token = signer.issue(Uuid::from_u128(1), Uuid::from_u128(2));

        let err = signer.verify(&token, Uuid::from_u128(99)).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let signer = signer();
        let issued_at = Utc::now() - Duration::minutes(10);
        let token = signer.sign(&ActionToken {
            request_id: Uuid::from_u128(1),
            carrier_id: Uuid::from_u128(2),
            issued_at,
            expires_at: issued_at + Duration::minutes(ACTION_TOKEN_TTL_MINUTES),
        });

        let err = signer.verify(&token, Uuid::from_u128(1)).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken(_)));
    }

    #[test]
    fn tampered_payload_fails_signature_check() {
        let signer = signer();
        let token = signer.issue(Uuid::from_u128(1), Uuid::from_u128(2));
        let (_, sig) = token.split_once('.').unwrap();

        let forged_claims = ActionToken {
            request_id: Uuid::from_u128(1),
            carrier_id: Uuid::from_u128(77),
            issued_at: Utc::now(),
            expires_at: Utc::now() + Duration::minutes(5),
        };
        let forged_payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{forged_payload}.{sig}");

        let err = signer.verify(&forged, Uuid::from_u128(1)).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken(_)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = signer().issue(Uuid::from_u128(1), Uuid::from_u128(2));
        let other = TokenSigner::new("a-different-secret");

        let err = other.verify(&token, Uuid::from_u128(1)).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken(_)));
    }
}
