use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use kernel::model::{auth::AccessToken, id::UserId};
use shared::{
    config::AuthConfig,
    error::{AppError, AppResult},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: UserId,
    pub email: String,
    pub exp: i64,
}

/// Issues and validates the signed access tokens. Token state lives
/// entirely in the token itself; there is no server-side session store.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(cfg: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(cfg.secret.as_bytes()),
            ttl: Duration::seconds(cfg.ttl),
            validation,
        }
    }

    pub fn issue(&self, user_id: UserId, email: &str) -> AppResult<AccessToken> {
        let claims = TokenClaims {
            sub: user_id,
            email: email.to_string(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map(AccessToken)
            .map_err(AppError::TokenCreationError)
    }

    /// Signature and expiry are both checked; any failure is an
    /// authorization failure, never a 500.
    pub fn validate(&self, token: &AccessToken) -> AppResult<TokenClaims> {
        decode::<TokenClaims>(&token.0, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::UnauthorizedError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(&AuthConfig {
            ttl: 3600,
            secret: "test-secret".into(),
        })
    }

    #[test]
    fn issued_token_round_trips() -> anyhow::Result<()> {
        let user_id = UserId::new();
        let token = codec().issue(user_id, "a@example.com")?;

        let claims = codec().validate(&token)?;
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "a@example.com");
        Ok(())
    }

    #[test]
    fn expired_token_is_unauthorized() -> anyhow::Result<()> {
        let claims = TokenClaims {
            sub: UserId::new(),
            email: "a@example.com".into(),
            exp: (Utc::now() - Duration::hours(1)).timestamp(),
        };
        let token = AccessToken(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )?);

        let res = codec().validate(&token);
        assert!(matches!(res, Err(AppError::UnauthorizedError)));
        Ok(())
    }

    #[test]
    fn tampered_token_is_unauthorized() -> anyhow::Result<()> {
        let token = codec().issue(UserId::new(), "a@example.com")?;
        let tampered = AccessToken(format!("{}x", token.0));

        let res = codec().validate(&tampered);
        assert!(matches!(res, Err(AppError::UnauthorizedError)));
        Ok(())
    }

    #[test]
    fn token_signed_with_other_secret_is_unauthorized() -> anyhow::Result<()> {
        let other = TokenCodec::new(&AuthConfig {
            ttl: 3600,
            secret: "other-secret".into(),
        });
        let token = other.issue(UserId::new(), "a@example.com")?;

        let res = codec().validate(&token);
        assert!(matches!(res, Err(AppError::UnauthorizedError)));
        Ok(())
    }

    #[test]
    fn garbage_token_is_unauthorized() {
        let res = codec().validate(&AccessToken("definitely not a jwt".into()));
        assert!(matches!(res, Err(AppError::UnauthorizedError)));
    }
}
