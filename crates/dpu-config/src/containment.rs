//! Cheap "could this blob hold a `T`?" checks.
//!
//! These are literal substring tests against the blob text, not parses. A
//! `true` answer is only a hint: callers pick a candidate type with it and
//! then confirm by deserializing. A false positive surfaces as a
//! serialization failure from that deserialize call.

use crate::codec::{ConfigCodec, ConfigType};

/// Whether `blob` contains `tag` as a literal substring.
///
/// An empty tag never matches.
pub fn can_contain_tag(blob: &str, tag: &str) -> bool {
    !tag.is_empty() && blob.contains(tag)
}

impl ConfigCodec {
    /// Whether `blob` may hold a `T` serialized by this codec or by a codec
    /// without aliases.
    pub fn can_contain<T: ConfigType>(&self, blob: &str) -> bool {
        if let Some(alias) = self.alias_for::<T>() {
            if can_contain_tag(blob, alias) {
                return true;
            }
        }
        can_contain_tag(blob, &T::type_tag())
    }

    /// Filter `candidates` down to the tags that appear in `blob`, keeping order.
    pub fn contained_tags<'a>(&self, blob: &str, candidates: &[&'a str]) -> Vec<&'a str> {
        candidates
            .iter()
            .copied()
            .filter(|tag| can_contain_tag(blob, tag))
            .collect()
    }
}
