//! String format hint detection.
//!
//! Hints are fixed regular-language tests checked in priority order; the
//! first match wins. iso-datetime must be checked before iso-date since a
//! datetime string is not a bare date.

use once_cell::sync::Lazy;
use regex::Regex;

use schemadrift_core::FormatHint;

static ISO_DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\d{4}-\d{2}-\d{2}[Tt ]\d{2}:\d{2}:\d{2}(\.\d+)?(Z|z|[+-]\d{2}:?\d{2})?$",
    )
    .expect("iso-datetime regex")
});

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("iso-date regex"));

static UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
    )
    .expect("uuid regex")
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex")
});

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^\s]+$").expect("url regex")
});

static IPV4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").expect("ipv4 regex")
});

static IPV6: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9a-fA-F]{0,4}:){2,7}[0-9a-fA-F]{0,4}$").expect("ipv6 regex")
});

/// Detect a format hint for a string sample.
pub fn detect_string_format(value: &str) -> Option<FormatHint> {
    let checks: [(&Regex, FormatHint); 7] = [
        (&ISO_DATETIME, FormatHint::IsoDateTime),
        (&ISO_DATE, FormatHint::IsoDate),
        (&UUID, FormatHint::Uuid),
        (&EMAIL, FormatHint::Email),
        (&URL, FormatHint::Url),
        (&IPV4, FormatHint::Ipv4),
        (&IPV6, FormatHint::Ipv6),
    ];
    checks
        .into_iter()
        .find(|(regex, _)| regex.is_match(value))
        .map(|(_, hint)| hint)
}
