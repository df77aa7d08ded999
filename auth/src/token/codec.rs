use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Encodes and decodes signed bearer tokens.
///
/// Tokens are compact JWTs signed with HMAC-SHA256 over a shared secret.
/// Decoding verifies the signature first and only accepts the algorithm this
/// codec mints, so a token asserting `none` or an asymmetric algorithm is
/// rejected before its claims are ever looked at.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    empty_secret: bool,
}

impl TokenCodec {
    /// Create a codec over a shared signing secret.
    ///
    /// The secret should be at least 32 bytes and come from configuration,
    /// never from code. An empty secret is remembered and rejected at
    /// encode time.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            empty_secret: secret.is_empty(),
        }
    }

    /// Encode claims into a signed token string.
    ///
    /// # Errors
    /// * `EmptySecret` - Codec was constructed with an empty secret
    /// * `SigningFailed` - Serialization or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        if self.empty_secret {
            return Err(TokenError::EmptySecret);
        }

        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Decode a token string, verifying signature, algorithm, and expiry.
    ///
    /// The expiry check is done here against the current wall clock rather
    /// than delegated to the JWT library, so the rule is explicit: a token
    /// whose `exp` equals the current second is already expired.
    ///
    /// # Errors
    /// * `Malformed` - Token is structurally invalid or asserts an
    ///   unexpected signing algorithm
    /// * `BadSignature` - MAC does not match
    /// * `Expired` - `exp` is at or before the current time
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature => TokenError::BadSignature,
                    _ => TokenError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
