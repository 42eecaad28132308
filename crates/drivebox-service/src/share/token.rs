//! Share link token generation.

use chrono::Utc;
use rand::distr::{Alphanumeric, SampleString};

/// Length of the random suffix appended to the timestamp component.
const SUFFIX_LEN: usize = 10;

/// Generates opaque share link tokens.
///
/// Tokens are a base36 millisecond timestamp plus a random alphanumeric
/// suffix: collision-resistant and unguessable enough for URL-path use,
/// not a cryptographic credential.
#[derive(Debug, Clone)]
pub struct ShareTokenGenerator;

impl ShareTokenGenerator {
    /// Creates a new token generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh share token.
    pub fn generate(&self) -> String {
        let millis = Utc::now().timestamp_millis();
        let suffix = Alphanumeric
            .sample_string(&mut rand::rng(), SUFFIX_LEN)
            .to_lowercase();
        format!("{}{}", to_base36(millis), suffix)
    }
}

impl Default for ShareTokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a non-negative integer in base36.
fn to_base36(mut n: i64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n <= 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ASCII")
}
