//! Duration strings for the `--older-than` flag
//!
//! Accepts compound forms like `30s`, `10m`, `8h`, `1h30m`, and `2d`. A bare
//! `0` is allowed as shorthand for "no age filter".

use crate::error::NukeError;
use chrono::Duration;

/// Parse a duration string into a `chrono::Duration`.
///
/// Supported units: `ms`, `s`, `m`, `h`, `d`. Segments may be chained and are
/// summed; negative and empty values are rejected.
pub fn parse_duration(input: &str) -> Result<Duration, NukeError> {
    let err = |reason: &str| NukeError::DurationParse {
        value: input.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(err("empty duration"));
    }
    if trimmed == "0" {
        return Ok(Duration::zero());
    }
    if trimmed.starts_with('-') {
        return Err(err("negative durations are not allowed"));
    }

    let mut total = Duration::zero();
    let mut rest = trimmed;

    while !rest.is_empty() {
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| err("missing unit suffix"))?;
        if digits_end == 0 {
            return Err(err("expected a number"));
        }

        let (digits, tail) = rest.split_at(digits_end);
        let amount: i64 = digits.parse().map_err(|_| err("number out of range"))?;

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(tail.len());
        let (unit, remainder) = tail.split_at(unit_end);

        let segment = match unit {
            "ms" => Duration::milliseconds(amount),
            "s" => Duration::seconds(amount),
            "m" => Duration::minutes(amount),
            "h" => Duration::hours(amount),
            "d" => Duration::days(amount),
            other => return Err(err(&format!("unknown unit '{other}'"))),
        };

        total = total + segment;
        rest = remainder;
    }

    Ok(total)
}
