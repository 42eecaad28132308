//! Extraction of the signing timestamp from issued URLs.
//!
//! S3 presigned URLs carry `X-Amz-Date` (`YYYYMMDDTHHMMSSZ`); the local
//! provider stamps an `issued` unix-seconds parameter. A URL whose
//! timestamp cannot be parsed is treated as stale so the caller refreshes
//! it rather than serving a URL of unknown age.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// The `X-Amz-Date` format used by AWS Signature V4.
const AMZ_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Parse the instant at which a URL was signed, if it can be determined.
pub fn signed_at(url: &str) -> Option<DateTime<Utc>> {
    let query = url.split_once('?')?.1;
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        match key {
            "X-Amz-Date" => {
                return NaiveDateTime::parse_from_str(value, AMZ_DATE_FORMAT)
                    .ok()
                    .map(|dt| dt.and_utc());
            }
            "issued" => {
                return value
                    .parse::<i64>()
                    .ok()
                    .and_then(|secs| DateTime::from_timestamp(secs, 0));
            }
            _ => {}
        }
    }
    None
}

/// Whether a URL's signing timestamp is older than `max_age` (or unknown).
pub fn is_stale(url: &str, max_age: Duration) -> bool {
    match signed_at(url) {
        Some(at) => Utc::now() - at > max_age,
        None => true,
    }
}
