//! JWT token utilities for authentication and authorization.
//!
//! Provides token creation, validation, and claims management for user
//! authentication. The signing secret is injected at construction and never
//! read from the environment afterwards; a single `JwtUtils` instance is
//! shared across the whole process.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::{ServiceError, ServiceResult};

/// JWT Claims structure containing user authentication data
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from the given configuration.
    pub fn new(config: &Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Expiry is exact; no clock-skew window.
        validation.leeway = 0;

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds: config.jwt_expires_in_seconds,
        }
    }

    /// Token lifetime in seconds, as configured.
    pub fn expires_in_seconds(&self) -> u64 {
        self.expires_in_seconds
    }

    /// Generate a new signed JWT token for the given user
    pub fn generate_token(&self, user_id: &str) -> ServiceResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in_seconds as i64);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a JWT token.
    ///
    /// Fails with `Unauthenticated` on signature mismatch, malformed payload,
    /// or elapsed expiry. Signature comparison is constant-time inside
    /// `jsonwebtoken`.
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|_| ServiceError::unauthenticated("Invalid or expired token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout_seconds: 3,
            jwt_secret: "test-secret-key-for-unit-tests".to_string(),
            jwt_expires_in_seconds: 3600,
            server_port: 0,
        }
    }

    #[test]
    fn test_generate_and_validate_roundtrip() {
        let jwt = JwtUtils::new(&test_config());

        let token = jwt.generate_token("u1").unwrap();
        let claims = jwt.validate_token(&token).unwrap();

        assert_eq!(claims.user_id(), "u1");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = test_config();
        let jwt = JwtUtils::new(&config);

        // Hand-craft a token whose expiry already elapsed, signed with the
        // same secret.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "u1".to_string(),
            exp: (now - 100) as usize,
            iat: (now - 200) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        let result = jwt.validate_token(&token);
        assert!(matches!(
            result,
            Err(ServiceError::Unauthenticated { .. })
        ));
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let jwt = JwtUtils::new(&test_config());
        let token = jwt.generate_token("u1").unwrap();

        // Flip the last character of the signature segment.
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });
        assert_ne!(token, tampered);

        assert!(jwt.validate_token(&tampered).is_err());
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let jwt = JwtUtils::new(&test_config());
        let token = jwt.generate_token("u1").unwrap();

        // Swap out the payload segment while keeping the original signature.
        let parts: Vec<&str> = token.split('.').collect();
        let other = jwt.generate_token("u2").unwrap();
        let other_parts: Vec<&str> = other.split('.').collect();
        let tampered = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);

        assert!(jwt.validate_token(&tampered).is_err());
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        let jwt = JwtUtils::new(&test_config());

        assert!(jwt.validate_token("not-a-token").is_err());
        assert!(jwt.validate_token("").is_err());
    }

    #[test]
    fn test_different_secret_is_rejected() {
        let jwt = JwtUtils::new(&test_config());
        let mut other_config = test_config();
        other_config.jwt_secret = "a-completely-different-secret".to_string();
        let other_jwt = JwtUtils::new(&other_config);

        let token = other_jwt.generate_token("u1").unwrap();
        assert!(jwt.validate_token(&token).is_err());
    }
}
