//! Duration string parsing for `SESSION_TIMEOUT`.
//!
//! Accepts the Go `time.ParseDuration` grammar that existing deployments already use:
//! an optional sign followed by one or more `<decimal><unit>` terms, e.g. `"300ms"`,
//! `"1.5h"`, `"2h45m"`. Valid units are `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m`, `h`.
//! A bare `"0"` needs no unit.
//!
//! Invariants:
//! - Magnitudes up to `2^63` nanoseconds are accepted for negative input and up to
//!   `i64::MAX` for positive input; anything larger is an overflow error.
//! - A negative duration is a successful parse that clamps to `Duration::ZERO`,
//!   since `std::time::Duration` is unsigned.

use std::time::Duration;
use thiserror::Error;

const MAX_NANOS: u64 = i64::MAX as u64;
/// Largest magnitude accepted while accumulating terms (`i64::MIN` in absolute value).
const MAX_MAGNITUDE: u64 = 1 << 63;

/// Errors produced by [`parse_go_duration`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationParseError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("invalid duration {0:?}: out of range")]
    Overflow(String),
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(3_600 * 1_000_000_000),
        _ => None,
    }
}

/// Split `s` into its leading ASCII digits and the remainder.
fn split_leading_digits(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Parse a Go-style duration string such as `"90s"` or `"1h30m"`.
///
/// # Errors
/// Returns a [`DurationParseError`] for empty input, malformed numbers,
/// missing or unknown units, and values out of the signed 64-bit nanosecond range.
///
/// Negative input such as `"-5s"` is valid and yields `Duration::ZERO`.
pub fn parse_go_duration(input: &str) -> Result<Duration, DurationParseError> {
    let invalid = || DurationParseError::Invalid(input.to_string());
    let overflow = || DurationParseError::Overflow(input.to_string());

    let mut rest = input;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, after_whole) = split_leading_digits(rest);
        let value: u64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u64>()
                .ok()
                .filter(|v| *v <= MAX_MAGNITUDE)
                .ok_or_else(overflow)?
        };
        rest = after_whole;

        let mut fraction: u64 = 0;
        let mut scale: f64 = 1.0;
        let mut has_fraction = false;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (digits, after_digits) = split_leading_digits(after_dot);
            has_fraction = !digits.is_empty();
            let mut saturated = false;
            for digit in digits.bytes() {
                // Precision past this point is dropped, not rejected.
                if saturated {
                    continue;
                }
                match fraction
                    .checked_mul(10)
                    .and_then(|f| f.checked_add(u64::from(digit - b'0')))
                    .filter(|f| *f <= MAX_MAGNITUDE)
                {
                    Some(next) => {
                        fraction = next;
                        scale *= 10.0;
                    }
                    None => saturated = true,
                }
            }
            rest = after_digits;
        }

        if whole.is_empty() && !has_fraction {
            return Err(invalid());
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (unit, after_unit) = rest.split_at(unit_end);
        if unit.is_empty() {
            return Err(DurationParseError::MissingUnit(input.to_string()));
        }
        let per_unit = unit_nanos(unit).ok_or_else(|| DurationParseError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let mut nanos = value
            .checked_mul(per_unit)
            .filter(|v| *v <= MAX_MAGNITUDE)
            .ok_or_else(overflow)?;
        if fraction > 0 {
            let fractional_nanos = (fraction as f64 * (per_unit as f64 / scale)) as u64;
            nanos = nanos
                .checked_add(fractional_nanos)
                .filter(|v| *v <= MAX_MAGNITUDE)
                .ok_or_else(overflow)?;
        }

        total = total
            .checked_add(nanos)
            .filter(|v| *v <= MAX_MAGNITUDE)
            .ok_or_else(overflow)?;
        rest = after_unit;
    }

    if negative {
        return Ok(Duration::ZERO);
    }
    if total > MAX_NANOS {
        return Err(overflow());
    }

    Ok(Duration::from_nanos(total))
}
