use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use bytes::Bytes;
use std::io::BufRead;

/// Bytes written to the object file.
pub trait Packable {
    fn serialize(&self) -> Bytes;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    /// Bytes the object id is computed from.
    fn content(&self) -> Bytes;

    fn display(&self) -> String;

    fn object_id(&self) -> ObjectId {
        ObjectId::digest(&self.content())
    }
}
