//! Blob object
//!
//! Blobs store file content verbatim. They carry no metadata: the path a blob was staged
//! under lives in the index entry and in the commit's file list.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::errors::{RepositoryError, Result};
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn data(&self) -> &[u8] {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> Bytes {
        self.content.clone()
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> Result<Self> {
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(|err| RepositoryError::Corrupt(format!("unreadable blob: {err}")))?;

        Ok(Self::new(content.into()))
    }
}

impl Object for Blob {
    fn content(&self) -> Bytes {
        self.content.clone()
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}
