//! Object identifier (SHA-256 hash)
//!
//! Object IDs are 64-character lowercase hexadecimal strings: the SHA-256 digest of an
//! object's hashed content. They name every object in the database, and the object file
//! itself is stored as `objects/<id>`.

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::{RepositoryError, Result};
use sha2::{Digest, Sha256};

/// Object identifier (SHA-256 hash)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Surrounding whitespace is ignored; upper-case hex digits are accepted and normalised.
    pub fn try_parse(id: impl AsRef<str>) -> Result<Self> {
        let id = id.as_ref().trim();

        if id.len() != OBJECT_ID_LENGTH || !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RepositoryError::InvalidObjectId(id.to_string()));
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Hash the given bytes and return their ID
    pub fn digest(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Get abbreviated form of the object ID
    pub fn to_short_oid(&self) -> &str {
        &self.0[..12]
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ObjectId {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
