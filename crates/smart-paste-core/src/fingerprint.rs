use std::fmt;

use md5::{Digest, Md5};

/// Content-identity key for clipboard images.
///
/// MD5 over the encoded bytes. The sync server keys uploads by the same
/// digest, so the hex form doubles as the `/check/{hash}` path segment.
/// Not a security boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    /// Fingerprint the given bytes.
    pub fn of(bytes: &[u8]) -> Self {
        let digest = Md5::digest(bytes);
        let mut raw = [0u8; 16];
        raw.copy_from_slice(&digest);
        Self(raw)
    }

    /// Lowercase hex rendering, as used on the wire.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
