//! Request signing for the Binance REST API.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::error::BinanceError;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 signer producing the lowercase hex `signature` parameter.
#[derive(Clone)]
pub struct RequestSigner {
    secret: String,
}

impl RequestSigner {
    /// Creates a new request signer.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Signs a query string.
    ///
    /// # Errors
    ///
    /// Returns `BinanceError::Signing` if the HMAC cannot be keyed.
    pub fn sign(&self, payload: &str) -> Result<String, BinanceError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| BinanceError::Signing(format!("Failed to create HMAC: {e}")))?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner").finish_non_exhaustive()
    }
}
