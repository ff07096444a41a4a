//! Signed, time-boxed password-reset token codec.
//!
//! The token is the sole artifact bridging a verified forgot-password
//! OTP and the password overwrite: a self-contained HS256 JWT carrying
//! the verified email and its creation instant. There is no server-side
//! redemption ledger, so a leaked unredeemed token stays valid until its
//! natural expiry; rotation of the signing secret invalidates every
//! outstanding token.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::TokenError;

const RESET_PURPOSE: &str = "password_reset";

#[derive(Debug, Serialize, Deserialize)]
struct ResetClaims {
    /// Verified email address
    sub: String,
    /// Distinguishes reset tokens from the auth token pair
    purpose: String,
    /// Creation timestamp (seconds)
    iat: i64,
    /// Expiry timestamp (seconds)
    exp: i64,
}

/// Issues and validates password-reset tokens.
pub struct ResetTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    max_age_seconds: i64,
}

impl ResetTokenCodec {
    pub fn new(secret: &str, max_age_seconds: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the injected clock, not the
        // library's view of system time.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            max_age_seconds,
        }
    }

    /// Mint a token for `email`. Called only immediately after a
    /// successful OTP verification on the forgot-password subject.
    pub fn issue(&self, email: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = ResetClaims {
            sub: email.to_string(),
            purpose: RESET_PURPOSE.to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + self.max_age_seconds,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::GenerationFailed)
    }

    /// Validate a token and return the embedded email.
    ///
    /// Age is read from the claims before the signature is checked, so
    /// a token past `max_age_seconds` is `Expired` even when it fails
    /// signature verification; everything else malformed or tampered is
    /// `Invalid`.
    pub fn redeem(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let mut peek = Validation::new(Algorithm::HS256);
        peek.insecure_disable_signature_validation();
        peek.validate_exp = false;
        let unverified = decode::<ResetClaims>(token, &self.decoding_key, &peek)
            .map_err(|_| TokenError::Invalid)?;
        if now.timestamp() - unverified.claims.iat > self.max_age_seconds {
            return Err(TokenError::Expired);
        }

        let data = decode::<ResetClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::Invalid)?;

        let claims = data.claims;
        if claims.purpose != RESET_PURPOSE {
            return Err(TokenError::Invalid);
        }

        Ok(claims.sub)
    }
}
