use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, Result};

/// Immutable signing configuration, injected at codec construction.
///
/// There is no global: the secret, issuer, and lifetime are read once at
/// startup and owned by the codec for the life of the process.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    /// Symmetric HMAC secret used for signing and verification
    pub secret: String,
    /// Issuer stamped into every token and required back on verification
    pub issuer: String,
    /// Validity window measured from issuance
    pub lifetime: Duration,
}

/// Claims carried by a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account identifier
    pub sub: Uuid,
    /// Issuer
    pub iss: String,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expires-at, seconds since the epoch
    pub exp: i64,
}

/// Stateless bearer-token codec: HS256-signed claims binding a subject to a
/// validity window.
///
/// Verification collapses every rejection (wrong algorithm, bad signature,
/// expired, malformed, issuer mismatch) into [`AuthError::TokenInvalid`];
/// the specific cause is only logged at debug level. Callers must not be able
/// to distinguish the cases.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    lifetime: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("issuer", &self.issuer)
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(settings: TokenSettings) -> Result<Self> {
        if settings.secret.is_empty() {
            return Err(AuthError::Internal(
                "token signing secret must not be empty".into(),
            ));
        }

        // Restricting the validation to HS256 rejects any token whose header
        // claims a different algorithm, whatever else checks out.
        let mut validation = Validation::new(Algorithm::HS256);
        // A token with expires-at in the past is rejected, full stop; the
        // library's default 60-second leeway would accept it.
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(settings.secret.as_ref()),
            decoding: DecodingKey::from_secret(settings.secret.as_ref()),
            validation,
            issuer: settings.issuer,
            lifetime: settings.lifetime,
        })
    }

    /// Issue a signed token for `subject`, valid from now until now plus the
    /// configured lifetime.
    pub fn issue(&self, subject: Uuid) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject,
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| {
                AuthError::Internal(format!("token signing failed: {err}"))
            })
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| {
                tracing::debug!(error = %err, "rejected bearer token");
                AuthError::TokenInvalid
            })?;

        if data.claims.iss != self.issuer {
            tracing::debug!(issuer = %data.claims.iss, "rejected token from foreign issuer");
            return Err(AuthError::TokenInvalid);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec(lifetime: Duration) -> TokenCodec {
        TokenCodec::new(TokenSettings {
            secret: "test-signing-secret".into(),
            issuer: "backdesk".into(),
            lifetime,
        })
        .unwrap()
    }

    #[test]
    fn issues_and_verifies_round_trip() {
        let codec = codec(Duration::hours(1));
        let subject = Uuid::now_v7();

        let token = codec.issue(subject).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.sub, subject);
        assert_eq!(claims.iss, "backdesk");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_expired_token() {
        // Negative lifetime mints an already-expired token.
        let codec = codec(Duration::hours(-2));
        let token = codec.issue(Uuid::now_v7()).unwrap();
        assert!(matches!(
            codec.verify(&token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn rejects_token_expired_by_seconds() {
        // Inside the 60-second window a default Validation would still
        // accept; expiry must hold with no leeway at all.
        let codec = codec(Duration::seconds(-30));
        let token = codec.issue(Uuid::now_v7()).unwrap();
        assert!(matches!(
            codec.verify(&token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let ours = codec(Duration::hours(1));
        let theirs = TokenCodec::new(TokenSettings {
            secret: "a-different-secret".into(),
            issuer: "backdesk".into(),
            lifetime: Duration::hours(1),
        })
        .unwrap();

        let token = theirs.issue(Uuid::now_v7()).unwrap();
        assert!(matches!(ours.verify(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn rejects_non_hmac_sha256_algorithm() {
        let codec = codec(Duration::hours(1));
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::now_v7(),
            iss: "backdesk".into(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };

        // Same secret, different HMAC width: the algorithm pin must reject it.
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret("test-signing-secret".as_ref()),
        )
        .unwrap();

        assert!(matches!(codec.verify(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn rejects_foreign_issuer() {
        let ours = codec(Duration::hours(1));
        let foreign = TokenCodec::new(TokenSettings {
            secret: "test-signing-secret".into(),
            issuer: "someone-else".into(),
            lifetime: Duration::hours(1),
        })
        .unwrap();

        let token = foreign.issue(Uuid::now_v7()).unwrap();
        assert!(matches!(ours.verify(&token), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn rejects_malformed_token() {
        let codec = codec(Duration::hours(1));
        assert!(matches!(
            codec.verify("not.a.token"),
            Err(AuthError::TokenInvalid)
        ));
        assert!(matches!(codec.verify(""), Err(AuthError::TokenInvalid)));
    }

    #[test]
    fn empty_secret_is_rejected_at_construction() {
        let result = TokenCodec::new(TokenSettings {
            secret: String::new(),
            issuer: "backdesk".into(),
            lifetime: Duration::hours(1),
        });
        assert!(result.is_err());
    }
}
