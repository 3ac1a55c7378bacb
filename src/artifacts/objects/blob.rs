use crate::artifacts::objects::object::Object;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Immutable file-content object
///
/// Content is treated as text; the blob's identity is the digest of its
/// canonical encoding.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, new)]
pub struct Blob {
    content: String,
}

impl Blob {
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Object for Blob {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identical_content_hashes_identically() {
        let a = Blob::new("hello".to_string());
        let b = Blob::new("hello".to_string());
        assert_eq!(a.object_id().unwrap(), b.object_id().unwrap());
    }

    #[test]
    fn different_content_hashes_differently() {
        let a = Blob::new("hello".to_string());
        let b = Blob::new("hello world".to_string());
        assert_ne!(a.object_id().unwrap(), b.object_id().unwrap());
    }
}
