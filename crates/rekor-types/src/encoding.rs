//! String wrappers for the two wire encodings Rekor uses
//!
//! Rekor serves hashes as lowercase hex and entry bodies as standard
//! base64. These newtypes keep the two apart until the bytes are needed.

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

macro_rules! encoded_string {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an already encoded string. Validity is checked by `decode()`.
            pub fn new(s: impl Into<String>) -> Self {
                $name(s.into())
            }

            /// The encoded text
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

encoded_string! {
    /// Standard-alphabet base64 text, such as an entry body
    Base64
}

encoded_string! {
    /// Hex text, such as a node hash
    Hex
}

impl Base64 {
    /// Encode raw bytes
    pub fn encode(bytes: &[u8]) -> Self {
        Base64(STANDARD.encode(bytes))
    }

    /// Decode to raw bytes
    pub fn decode(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.0)
            .map_err(|e| Error::InvalidEncoding(format!("invalid base64: {}", e)))
    }
}

impl Hex {
    /// Encode raw bytes as lowercase hex
    pub fn encode(bytes: &[u8]) -> Self {
        Hex(hex::encode(bytes))
    }

    /// Decode to raw bytes; either case is accepted
    pub fn decode(&self) -> Result<Vec<u8>> {
        hex::decode(&self.0).map_err(|e| Error::InvalidEncoding(format!("invalid hex: {}", e)))
    }
}

/// Decode an ordered list of hex hashes, keeping their order
pub fn decode_hashes(hashes: &[Hex]) -> Result<Vec<Vec<u8>>> {
    hashes.iter().map(Hex::decode).collect()
}
