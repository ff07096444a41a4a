//! JWT access/refresh token pair for authenticated sessions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jl_shared::config::AuthConfig;

use crate::domain::clock::Clock;
use crate::domain::entities::Role;
use crate::errors::TokenError;

/// Claims carried by both tokens of a pair; `token_type` tells them
/// apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub sub: String,
    /// Role at issuance time
    pub role: String,
    /// "access" or "refresh"
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

/// Access and refresh tokens issued together on login or on completed
/// registration.
#[derive(Debug, Clone, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

pub struct AuthTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_expiry_seconds: i64,
    refresh_expiry_seconds: i64,
    issuer: String,
    clock: Arc<dyn Clock>,
}

impl AuthTokenService {
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            access_expiry_seconds: config.access_token_expiry,
            refresh_expiry_seconds: config.refresh_token_expiry,
            issuer: config.issuer.clone(),
            clock,
        }
    }

    /// Issue an access/refresh pair for an account.
    pub fn generate_pair(&self, account_id: Uuid, role: Role) -> Result<AuthTokens, TokenError> {
        let now = self.clock.now();
        let access_token =
            self.sign(account_id, role, "access", now, self.access_expiry_seconds)?;
        let refresh_token =
            self.sign(account_id, role, "refresh", now, self.refresh_expiry_seconds)?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_expiry_seconds,
        })
    }

    /// Validate an access token and return its claims. Refresh tokens
    /// are rejected here.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.decode_claims(token)?;
        if claims.token_type != "access" {
            return Err(TokenError::Invalid);
        }
        Ok(claims)
    }

    /// Validate a refresh token and mint a fresh pair for its subject.
    pub fn refresh_pair(&self, refresh_token: &str) -> Result<AuthTokens, TokenError> {
        let claims = self.decode_claims(refresh_token)?;
        if claims.token_type != "refresh" {
            return Err(TokenError::Invalid);
        }
        let account_id = Uuid::parse_str(&claims.sub).map_err(|_| TokenError::Invalid)?;
        let role = match claims.role.as_str() {
            "jobseeker" => Role::JobSeeker,
            "recruiter" => Role::Recruiter,
            _ => return Err(TokenError::Invalid),
        };
        self.generate_pair(account_id, role)
    }

    fn sign(
        &self,
        account_id: Uuid,
        role: Role,
        token_type: &str,
        now: DateTime<Utc>,
        expiry_seconds: i64,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: account_id.to_string(),
            role: role.as_str().to_string(),
            token_type: token_type.to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + expiry_seconds,
            iss: self.issuer.clone(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::GenerationFailed)
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_exp = false;
        validation.leeway = 0;

        let data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|_| TokenError::Invalid)?;
        if data.claims.exp <= self.clock.now().timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct TestClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl TestClock {
        fn at(now: DateTime<Utc>) -> Self {
            Self {
                now: Mutex::new(now),
            }
        }

        fn advance(&self, seconds: i64) {
            let mut now = self.now.lock().unwrap();
            *now += chrono::Duration::seconds(seconds);
        }
    }

    impl Clock for TestClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn config() -> AuthConfig {
        AuthConfig {
            secret: "test-secret".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604_800,
            issuer: "joblane".to_string(),
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generated_access_token_validates() {
        let service = AuthTokenService::new(&config(), Arc::new(TestClock::at(t0())));
        let id = Uuid::new_v4();
        let tokens = service.generate_pair(id, Role::Recruiter).unwrap();

        let claims = service.validate_access_token(&tokens.access_token).unwrap();
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.role, "recruiter");
        assert_eq!(claims.iss, "joblane");
        assert_eq!(tokens.expires_in, 900);
    }

    #[test]
    fn test_refresh_token_rejected_as_access_token() {
        let service = AuthTokenService::new(&config(), Arc::new(TestClock::at(t0())));
        let tokens = service
            .generate_pair(Uuid::new_v4(), Role::JobSeeker)
            .unwrap();

        assert!(matches!(
            service.validate_access_token(&tokens.refresh_token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_access_token_expires() {
        let clock = Arc::new(TestClock::at(t0()));
        let service = AuthTokenService::new(&config(), Arc::clone(&clock) as Arc<dyn Clock>);
        let tokens = service
            .generate_pair(Uuid::new_v4(), Role::JobSeeker)
            .unwrap();

        clock.advance(901);
        assert!(matches!(
            service.validate_access_token(&tokens.access_token),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_refresh_pair_outlives_access_token() {
        let clock = Arc::new(TestClock::at(t0()));
        let service = AuthTokenService::new(&config(), Arc::clone(&clock) as Arc<dyn Clock>);
        let id = Uuid::new_v4();
        let tokens = service.generate_pair(id, Role::JobSeeker).unwrap();

        clock.advance(3600);
        let renewed = service.refresh_pair(&tokens.refresh_token).unwrap();
        let claims = service.validate_access_token(&renewed.access_token).unwrap();
        assert_eq!(claims.sub, id.to_string());
    }

    #[test]
    fn test_access_token_rejected_for_refresh() {
        let service = AuthTokenService::new(&config(), Arc::new(TestClock::at(t0())));
        let tokens = service
            .generate_pair(Uuid::new_v4(), Role::JobSeeker)
            .unwrap();

        assert!(matches!(
            service.refresh_pair(&tokens.access_token),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let service = AuthTokenService::new(&config(), Arc::new(TestClock::at(t0())));
        let mut other_config = config();
        other_config.issuer = "someone-else".to_string();
        let other = AuthTokenService::new(&other_config, Arc::new(TestClock::at(t0())));

        let tokens = other.generate_pair(Uuid::new_v4(), Role::JobSeeker).unwrap();
        assert!(matches!(
            service.validate_access_token(&tokens.access_token),
            Err(TokenError::Invalid)
        ));
    }
}
