use super::model::AuthenticatedUser;
use crate::core::config::AuthConfig;
use crate::core::error::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

/// Validates HS256 access tokens minted by the admin token issuer.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,

    // Standard time claims checked by the jsonwebtoken library
    #[serde(rename = "exp")]
    _exp: u64,
    #[serde(rename = "iat", default)]
    _iat: Option<u64>,

    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    roles: Vec<String>,
}

impl JwtValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.jwt_leeway.as_secs();

        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let claims = token_data.claims;

        Ok(AuthenticatedUser {
            sub: claims.sub,
            username: claims.username,
            roles: claims.roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    const SECRET: &str = "test-secret-test-secret-test-secret!";

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        exp: u64,
        iat: u64,
        username: Option<String>,
        roles: Vec<String>,
    }

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: SECRET.to_string(),
            issuer: None,
            audience: None,
            jwt_leeway: Duration::from_secs(0),
        }
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn mint(claims: &TestClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_yields_user() {
        let validator = JwtValidator::new(&test_config());
        let token = mint(
            &TestClaims {
                sub: "admin-1".to_string(),
                exp: now_secs() + 3600,
                iat: now_secs(),
                username: Some("hanh".to_string()),
                roles: vec!["admin".to_string()],
            },
            SECRET,
        );

        let user = validator.validate_token(&token).unwrap();
        assert_eq!(user.sub, "admin-1");
        assert_eq!(user.username.as_deref(), Some("hanh"));
        assert!(user.is_admin());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let validator = JwtValidator::new(&test_config());
        let token = mint(
            &TestClaims {
                sub: "admin-1".to_string(),
                exp: now_secs() - 120,
                iat: now_secs() - 3600,
                username: None,
                roles: vec![],
            },
            SECRET,
        );

        assert!(matches!(
            validator.validate_token(&token),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let validator = JwtValidator::new(&test_config());
        let token = mint(
            &TestClaims {
                sub: "admin-1".to_string(),
                exp: now_secs() + 3600,
                iat: now_secs(),
                username: None,
                roles: vec!["admin".to_string()],
            },
            "another-secret-another-secret-another!",
        );

        assert!(validator.validate_token(&token).is_err());
    }

    #[test]
    fn test_missing_roles_defaults_to_empty() {
        #[derive(Serialize)]
        struct Minimal {
            sub: String,
            exp: u64,
        }

        let validator = JwtValidator::new(&test_config());
        let token = encode(
            &Header::default(),
            &Minimal {
                sub: "viewer-1".to_string(),
                exp: now_secs() + 3600,
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let user = validator.validate_token(&token).unwrap();
        assert!(user.roles.is_empty());
        assert!(!user.is_admin());
    }
}
