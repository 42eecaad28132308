//! Object key generation.
//!
//! Keys are `{prefix}/{timestamp}-{random}-{sanitized name}`: human-traceable
//! and collision-resistant without any coordination step. No uniqueness check
//! is performed against existing keys — millisecond timestamps plus the
//! random component make collisions practically impossible at this workload.

use chrono::Utc;
use rand::distr::{Alphanumeric, SampleString};

/// Length of the random component in generated keys.
const RANDOM_LEN: usize = 8;

/// Generate a storage key for a newly uploaded file.
pub fn generate_object_key(prefix: &str, original_name: &str) -> String {
    let timestamp = Utc::now().timestamp_millis();
    let random = Alphanumeric.sample_string(&mut rand::rng(), RANDOM_LEN);
    let key = format!("{timestamp}-{random}-{}", sanitize_file_name(original_name));

    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        key
    } else {
        format!("{prefix}/{key}")
    }
}

/// Replace everything outside `[A-Za-z0-9.-]` with underscores.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
