//! The `id` module generates outbound message identifiers.
//!
//! IDs have the form `m-` followed by 24 lowercase hex digits (12 random
//! bytes). Colliding IDs are indistinguishable to CCS and would misroute acks,
//! so a failing random source is an error and never falls back to a weaker
//! generator.

use rand::TryRngCore;
use rand::rngs::OsRng;

use crate::utils::error::EntropyError;

/// Prefix of every generated message ID.
pub const ID_PREFIX: &str = "m-";

/// Number of random bytes behind each ID.
pub const ID_BYTES: usize = 12;

/// Produces message IDs from an explicitly provided random source.
#[derive(Debug, Clone)]
pub struct IdGenerator<R = OsRng> {
    rng: R,
}

impl IdGenerator<OsRng> {
    /// Generator backed by the operating system CSPRNG.
    pub fn os() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for IdGenerator<OsRng> {
    fn default() -> Self {
        Self::os()
    }
}

impl<R: TryRngCore> IdGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self) -> Result<String, EntropyError> {
        let mut bytes = [0u8; ID_BYTES];
        self.rng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| EntropyError(e.to_string()))?;
        Ok(format!("{ID_PREFIX}{}", hex::encode(bytes)))
    }
}
