use crate::artifacts::core::Result;
use crate::artifacts::objects::encoding;
use crate::artifacts::objects::object_id::ObjectId;
use serde::Serialize;

/// Common behavior of stored objects (blobs, trees, commits)
///
/// An object's identity is the digest of its canonical encoding; nothing
/// else about the value participates.
pub trait Object: Serialize {
    fn object_id(&self) -> Result<ObjectId>
    where
        Self: Sized,
    {
        encoding::hash_value(self)
    }
}
