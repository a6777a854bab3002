//! Session token issuance and verification
//!
//! Tokens are stateless: the server keeps nothing per session, the signed
//! claim set is the whole session. HS256 with a shared secret, 20-minute
//! lifetime by default (see `AuthConfig`).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::user::Role;

/// The authenticated identity derived from a verified token.
///
/// Always passed explicitly to the functions that need it; there is no
/// ambient "current authentication" anywhere in the crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub subject: String,
    pub role: Role,
}

/// Claim set carried inside a signed token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Typed verification failures. Externally they all read as "unauthenticated";
/// the distinction exists for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Malformed,
    BadSignature,
    NotYetValid,
    Expired,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TokenError::Malformed => "malformed token",
            TokenError::BadSignature => "bad signature",
            TokenError::NotYetValid => "token not yet valid",
            TokenError::Expired => "token expired",
        };
        f.write_str(s)
    }
}

/// Build a signed session token for a verified principal.
///
/// Invariant: `exp > iat` (the TTL is validated as positive at config load).
pub fn issue(
    principal: &Principal,
    now: DateTime<Utc>,
    secret: &str,
    ttl: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: principal.subject.clone(),
        role: principal.role,
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a raw token and extract its principal.
///
/// Steps, in order: parse the signed structure, check the signature, check
/// the validity window against the caller-supplied `now`, extract subject
/// and role. A token is valid exactly from its issue instant up to but not
/// including its expiry.
pub fn verify(raw: &str, now: DateTime<Utc>, secret: &str) -> Result<Principal, TokenError> {
    // Expiry is checked below against the supplied clock, not the system one.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(raw, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Malformed,
        })?;

    if now.timestamp() < data.claims.iat {
        return Err(TokenError::NotYetValid);
    }
    if now.timestamp() >= data.claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(Principal {
        subject: data.claims.sub,
        role: data.claims.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SECRET: &str = "unit-test-secret";

    fn ttl() -> Duration {
        Duration::minutes(20)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn reader() -> Principal {
        Principal {
            subject: "alice".to_string(),
            role: Role::User,
        }
    }

    #[test]
    fn round_trip_returns_original_principal() {
        let token = issue(&reader(), now(), SECRET, ttl()).unwrap();
        let principal = verify(&token, now(), SECRET).unwrap();
        assert_eq!(principal, reader());
    }

    #[test]
    fn valid_until_just_before_expiry() {
        let token = issue(&reader(), now(), SECRET, ttl()).unwrap();
        let last_valid = now() + ttl() - Duration::seconds(1);
        assert!(verify(&token, last_valid, SECRET).is_ok());
    }

    #[test]
    fn rejected_before_issuance() {
        let token = issue(&reader(), now(), SECRET, ttl()).unwrap();
        assert_eq!(
            verify(&token, now() - Duration::seconds(1), SECRET),
            Err(TokenError::NotYetValid)
        );
        assert_eq!(
            verify(&token, now() - Duration::hours(1), SECRET),
            Err(TokenError::NotYetValid)
        );
        // The issue instant itself is inside the validity window.
        assert!(verify(&token, now(), SECRET).is_ok());
    }

    #[test]
    fn expired_exactly_at_ttl() {
        let token = issue(&reader(), now(), SECRET, ttl()).unwrap();
        assert_eq!(verify(&token, now() + ttl(), SECRET), Err(TokenError::Expired));
        assert_eq!(
            verify(&token, now() + ttl() + Duration::hours(1), SECRET),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let token = issue(&reader(), now(), SECRET, ttl()).unwrap();
        let sig_start = token.rfind('.').unwrap() + 1;

        // Flip every signature character in turn; each variant must fail
        // signature verification, never decode. The final character is left
        // alone: its low bits are base64 padding, not signature material.
        for i in sig_start..token.len() - 1 {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();
            if tampered == token {
                continue;
            }
            assert_eq!(
                verify(&tampered, now(), SECRET),
                Err(TokenError::BadSignature),
                "flipping signature byte {} should invalidate the token",
                i
            );
        }
    }

    #[test]
    fn wrong_secret_is_a_bad_signature() {
        let token = issue(&reader(), now(), SECRET, ttl()).unwrap();
        assert_eq!(
            verify(&token, now(), "other-secret"),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(
            verify("not-a-token", now(), SECRET),
            Err(TokenError::Malformed)
        );
        assert_eq!(verify("", now(), SECRET), Err(TokenError::Malformed));
    }

    #[test]
    fn expiry_checked_before_claims_are_trusted() {
        // A token that expired must fail even though its signature is fine.
        let token = issue(&reader(), now() - Duration::hours(2), SECRET, ttl()).unwrap();
        assert_eq!(verify(&token, now(), SECRET), Err(TokenError::Expired));
    }
}
