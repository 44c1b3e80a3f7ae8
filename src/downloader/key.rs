//! Storage key handling

use super::{DownloadError, DownloadResult};
use crate::ResumeKey;

/// Suffix of sym file keys
pub const SYM_SUFFIX: &str = ".sym";

/// Whether a catalog key names a sym file
pub fn is_sym_key(key: &str) -> bool {
    key.ends_with(SYM_SUFFIX)
}

/// Strip a leading `try/` and then a leading `v1/` segment
///
/// `try/v1/foo/bar/baz.sym` and `v1/foo/bar/baz.sym` both become
/// `foo/bar/baz.sym`; keys without these prefixes are returned unchanged.
pub fn normalize_key(key: &str) -> &str {
    let key = key.strip_prefix("try/").unwrap_or(key);
    key.strip_prefix("v1/").unwrap_or(key)
}

/// Characters the textual resume scan cannot read back from a CSV row
pub const UNRECORDABLE_CHARS: [char; 4] = [',', '"', '\r', '\n'];

/// Whether every field of `key` survives a write and a later resume scan
///
/// The CSV writer quotes fields holding any of [`UNRECORDABLE_CHARS`], and the
/// resume scan splits lines on `,` without unquoting, so such keys would never
/// be recognized on a rerun.
pub fn is_recordable(key: &ResumeKey) -> bool {
    [&key.module, &key.debug_id, &key.debug_filename]
        .iter()
        .all(|field| !field.contains(UNRECORDABLE_CHARS))
}

/// Take the last three path components of a normalized key
pub fn resume_key_from(normalized: &str) -> DownloadResult<ResumeKey> {
    let mut parts = normalized.rsplit('/');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(debug_filename), Some(debug_id), Some(module)) => {
            Ok(ResumeKey::new(module, debug_id, debug_filename))
        }
        _ => Err(DownloadError::MalformedKey(normalized.to_string())),
    }
}
