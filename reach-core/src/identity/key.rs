//! Identity key material and data container identifiers.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::{ZeroizeOnDrop, Zeroizing};

use super::error::{IdentityError, Result};

/// Length of the fingerprint returned by [`IdentityKey::fingerprint`], in
/// hex characters.
const FINGERPRINT_LEN: usize = 16;

/// The session's signing key, as handed over by the host application.
///
/// Reach never generates or persists key material; the remote transport
/// uses it to authenticate upload and status requests. The secret bytes are
/// zeroized when the key (or any clone of it) is dropped.
///
/// # Example
///
/// ```
/// use reach_core::identity::IdentityKey;
///
/// let key = IdentityKey::new([7u8; 32], [9u8; 32]);
/// assert_eq!(key.public_hex().len(), 64);
/// assert_eq!(key.fingerprint().len(), 16);
/// ```
#[derive(Clone, ZeroizeOnDrop)]
pub struct IdentityKey {
    /// The secret key bytes (zeroized on drop).
    secret_bytes: [u8; 32],

    /// Public key bytes (not sensitive, skip zeroization).
    #[zeroize(skip)]
    public_bytes: [u8; 32],
}

impl IdentityKey {
    /// Creates a key from raw secret and public bytes.
    #[must_use]
    pub const fn new(secret_bytes: [u8; 32], public_bytes: [u8; 32]) -> Self {
        Self {
            secret_bytes,
            public_bytes,
        }
    }

    /// Creates a key from hex-encoded secret and public halves.
    ///
    /// # Errors
    ///
    /// Returns an error if either half is not valid hex or not 32 bytes.
    pub fn from_hex(secret_hex: &str, public_hex: &str) -> Result<Self> {
        let secret = Zeroizing::new(hex::decode(secret_hex)?);
        let public = hex::decode(public_hex)?;

        let secret_bytes: [u8; 32] = secret.as_slice().try_into().map_err(|_| {
            IdentityError::InvalidKey(format!("secret key must be 32 bytes, got {}", secret.len()))
        })?;
        let public_bytes: [u8; 32] = public.as_slice().try_into().map_err(|_| {
            IdentityError::InvalidKey(format!("public key must be 32 bytes, got {}", public.len()))
        })?;

        Ok(Self::new(secret_bytes, public_bytes))
    }

    /// Returns the public key as a 64-character hex string.
    #[must_use]
    pub fn public_hex(&self) -> String {
        hex::encode(self.public_bytes)
    }

    /// Returns a short, non-sensitive fingerprint for logging.
    ///
    /// This is a prefix of the SHA-256 of the public key.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.public_bytes);
        let mut fingerprint = hex::encode(digest);
        fingerprint.truncate(FINGERPRINT_LEN);
        fingerprint
    }

    /// Returns the raw public key bytes.
    #[must_use]
    pub const fn public_bytes(&self) -> [u8; 32] {
        self.public_bytes
    }

    /// Returns the raw secret bytes, wrapped in `Zeroizing`.
    ///
    /// # Security Warning
    ///
    /// Only transports that sign requests should call this, i.e.
    /// [`JsonTransport`](crate::remote::JsonTransport) implementors and
    /// host-side [`RemoteIdentityService`](crate::remote::RemoteIdentityService)
    /// implementations.
    #[must_use]
    pub fn secret_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.secret_bytes)
    }
}

impl PartialEq for IdentityKey {
    fn eq(&self, other: &Self) -> bool {
        let same = self.secret_bytes[..].ct_eq(&other.secret_bytes[..])
            & self.public_bytes[..].ct_eq(&other.public_bytes[..]);
        same.into()
    }
}

impl Eq for IdentityKey {}

impl std::fmt::Debug for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the secret key
        f.debug_struct("IdentityKey")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

/// Opaque identifier of the user's remote data namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(Vec<u8>);

impl ContainerId {
    /// Wraps raw container bytes.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parses a hex-encoded container id.
    ///
    /// # Errors
    ///
    /// Returns an error if `hex_str` is not valid hex.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        Ok(Self(hex::decode(hex_str)?))
    }

    /// Returns the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the id as lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Returns the id in standard base64, as used on the wire.
    #[must_use]
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.0)
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
