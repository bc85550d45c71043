//! Local inspection of stored bearer tokens
//!
//! The client cannot verify signatures (it never holds the server secret),
//! so this only rejects tokens that are structurally broken or carry an
//! `exp` claim in the past. The server stays the authority.

use chrono::{DateTime, Utc};
use diabetes_risk_shared::validation::validate_token_structure;
use diabetes_risk_shared::AuthError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::debug;

/// Claims the client reads from a token; everything else is ignored
#[derive(Debug, Clone, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: Option<serde_json::Value>,
    #[serde(default)]
    exp: Option<i64>,
}

/// What the client knows about a token without asking the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub subject: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

fn inspection_rules() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.required_spec_claims.clear();
    validation.validate_aud = false;
    validation.leeway = 0;
    validation
}

/// Check a token's shape and expiry
pub fn inspect_token(token: &str) -> Result<TokenInfo, AuthError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    validate_token_structure(token).map_err(|_| AuthError::MalformedToken)?;

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &inspection_rules())
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            other => {
                debug!(error = ?other, "Token rejected");
                AuthError::MalformedToken
            }
        })?;

    let subject = data.claims.sub.map(|sub| match sub {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    });
    let expires_at = data
        .claims
        .exp
        .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0));

    Ok(TokenInfo { subject, expires_at })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        exp: Option<i64>,
    }

    /// Signed with a secret the client never sees
    pub(crate) fn make_token(exp_offset_secs: Option<i64>) -> String {
        let claims = TestClaims {
            sub: "7".to_string(),
            exp: exp_offset_secs.map(|offset| Utc::now().timestamp() + offset),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"server-side-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token() {
        let info = inspect_token(&make_token(Some(3600))).unwrap();
        assert_eq!(info.subject.as_deref(), Some("7"));
        assert!(info.expires_at.unwrap() > Utc::now());
    }

    #[test]
    fn test_token_without_expiry_is_accepted() {
        let info = inspect_token(&make_token(None)).unwrap();
        assert!(info.expires_at.is_none());
    }

    #[test]
    fn test_expired_token() {
        assert_eq!(
            inspect_token(&make_token(Some(-3600))),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(inspect_token(""), Err(AuthError::MissingToken));
        assert_eq!(inspect_token("not-a-token"), Err(AuthError::MalformedToken));
        // Right shape, but the header is not base64-encoded JSON
        assert_eq!(inspect_token("aaa.bbb.ccc"), Err(AuthError::MalformedToken));
    }
}
