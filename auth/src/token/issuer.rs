use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Issues and verifies signed access tokens.
///
/// Tokens are HS256 JWTs signed with a process-wide symmetric secret; the
/// secret never leaves this type. Expiry is checked against the caller's
/// clock, not the wall clock, so both halves take an explicit `now`.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Duration,
}

impl TokenIssuer {
    /// Create an issuer with the given signing secret and token lifetime.
    ///
    /// The secret should be at least 256 bits for HS256 and come from
    /// configuration, never from source. The lifetime must be positive so
    /// every issued token expires strictly after issuance.
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        assert!(
            lifetime > Duration::zero(),
            "token lifetime must be positive"
        );

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            lifetime,
        }
    }

    /// Issue a token for `subject` valid for the configured lifetime from `now`.
    ///
    /// # Errors
    /// * `SigningFailed` - encoding or signing failed
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::new(subject, now, now + self.lifetime);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token's signature and structure, then its expiry against `now`.
    ///
    /// # Returns
    /// The decoded claims, subject included
    ///
    /// # Errors
    /// * `Invalid` - signature mismatch or malformed token
    /// * `Expired` - `now` is at or past the token's expiry
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is enforced below against the caller-supplied clock.
        validation.validate_exp = false;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        if token_data.claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(SECRET, Duration::minutes(30))
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let issuer = issuer();
        let now = Utc::now();

        let token = issuer.issue("42", now).expect("Failed to issue token");
        let claims = issuer.verify(&token, now).expect("Failed to verify token");

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_verify_within_lifetime() {
        let issuer = issuer();
        let issued_at = Utc::now();

        let token = issuer.issue("42", issued_at).expect("Failed to issue token");

        assert!(issuer.verify(&token, issued_at).is_ok());
        assert!(issuer
            .verify(&token, issued_at + Duration::minutes(29))
            .is_ok());
    }

    #[test]
    fn test_verify_at_and_past_expiry() {
        let issuer = issuer();
        let issued_at = Utc::now();

        let token = issuer.issue("42", issued_at).expect("Failed to issue token");

        let at_expiry = issuer.verify(&token, issued_at + Duration::minutes(30));
        assert!(matches!(at_expiry, Err(TokenError::Expired)));

        let past_expiry = issuer.verify(&token, issued_at + Duration::hours(2));
        assert!(matches!(past_expiry, Err(TokenError::Expired)));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let issuer = issuer();
        let other = TokenIssuer::new(b"a_different_secret_32_bytes_long!!", Duration::minutes(30));
        let now = Utc::now();

        let token = issuer.issue("42", now).expect("Failed to issue token");

        let result = other.verify(&token, now);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_malformed_token() {
        let issuer = issuer();

        let result = issuer.verify("not.a.token", Utc::now());
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_tampered_token() {
        let issuer = issuer();
        let now = Utc::now();

        let token = issuer.issue("42", now).expect("Failed to issue token");

        // Swap the payload segment for one claiming another subject.
        let forged_payload =
            jsonwebtoken::encode(&Header::new(Algorithm::HS256), &Claims::new("1", now, now + Duration::minutes(30)), &EncodingKey::from_secret(b"attacker"))
                .unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged_payload.split('.').collect();
        parts[1] = forged_parts[1];
        let tampered = parts.join(".");

        let result = issuer.verify(&tampered, now);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    #[should_panic(expected = "token lifetime must be positive")]
    fn test_zero_lifetime_is_rejected() {
        TokenIssuer::new(SECRET, Duration::zero());
    }
}
