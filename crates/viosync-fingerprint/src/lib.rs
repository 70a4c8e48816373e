//! # viosync-fingerprint
//!
//! **Tier 0.5 (Utilities)**
//!
//! This crate is the canonical source of issue fingerprints. A fingerprint
//! is the SHA-256 digest of a key-path's components, fed in order as raw
//! UTF-8 bytes with nothing between them.
//!
//! Trackers already hold fingerprints produced this way, so the byte stream
//! must not change: `["ab", "c"]` and `["a", "bc"]` share a fingerprint.
//! Grouping never emits both within one report unless the key values
//! themselves are that ambiguous.

use sha2::{Digest, Sha256};
use viosync_types::{Fingerprint, GroupedUnit, KeyPath};

/// Fingerprint an ordered sequence of key components.
///
/// # Example
///
/// ```
/// use viosync_fingerprint::fingerprint_components;
///
/// let fp = fingerprint_components(["left-pad", "license"]);
/// assert_eq!(fp.as_str().len(), 64);
///
/// // Order matters.
/// assert_ne!(fp, fingerprint_components(["license", "left-pad"]));
/// ```
pub fn fingerprint_components<I, S>(components: I) -> Fingerprint
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = Sha256::new();
    for part in components {
        hasher.update(part.as_ref().as_bytes());
    }
    Fingerprint::from_digest(hasher.finalize().into())
}

pub fn fingerprint_key_path(key_path: &KeyPath) -> Fingerprint {
    fingerprint_components(key_path.components())
}

pub fn fingerprint_unit(unit: &GroupedUnit) -> Fingerprint {
    fingerprint_key_path(&unit.key_path)
}
