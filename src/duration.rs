//! Duration strings for TTLs and configuration.
//!
//! Accepts the compact `<number><unit>` form used by consul and most
//! lock clients (`30s`, `1m30s`, `1.5s`, `250ms`). Units: `ns`, `us`/`µs`,
//! `ms`, `s`, `m`, `h`. A bare `0` is accepted as zero; any other number must
//! carry a unit.

use chrono::Duration;

const NANOS_PER_MICRO: i128 = 1_000;
const NANOS_PER_MILLI: i128 = 1_000_000;
const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_MINUTE: i128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MINUTE;

/// Parse a duration string such as `30s` or `1m30s`.
///
/// Returns `None` for empty input, unknown units, signs, or values that do
/// not fit in a `chrono::Duration`.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if s == "0" {
        return Some(Duration::zero());
    }

    let mut rest = s;
    let mut total: i128 = 0;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return None;
        }
        let (number, tail) = rest.split_at(number_len);

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);

        let unit_nanos = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => NANOS_PER_MICRO,
            "ms" => NANOS_PER_MILLI,
            "s" => NANOS_PER_SECOND,
            "m" => NANOS_PER_MINUTE,
            "h" => NANOS_PER_HOUR,
            _ => return None,
        };

        total = total.checked_add(segment_nanos(number, unit_nanos)?)?;
        rest = next;
    }

    let nanos = i64::try_from(total).ok()?;
    Some(Duration::nanoseconds(nanos))
}

fn segment_nanos(number: &str, unit_nanos: i128) -> Option<i128> {
    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    if (whole.is_empty() && frac.is_empty()) || frac.contains('.') {
        return None;
    }

    let whole_value: i128 = if whole.is_empty() {
        0
    } else {
        whole.parse().ok()?
    };
    let mut nanos = whole_value.checked_mul(unit_nanos)?;

    if !frac.is_empty() {
        // Digits past nanosecond precision of the largest unit are noise.
        let frac = &frac[..frac.len().min(18)];
        let frac_value: i128 = frac.parse().ok()?;
        let scale = 10i128.pow(frac.len() as u32);
        nanos = nanos.checked_add(frac_value * unit_nanos / scale)?;
    }

    Some(nanos)
}

/// Format a duration in the same shape `parse_duration` accepts.
///
/// Sub-second values use the largest fitting unit (`250ms`, `1.5µs`);
/// longer values use `h`/`m`/`s` segments (`1h0m5s`, `1m30.5s`).
pub fn format_duration(duration: Duration) -> String {
    let Some(nanos) = duration.num_nanoseconds() else {
        return format!("{}s", duration.num_seconds());
    };
    if nanos == 0 {
        return "0s".to_string();
    }

    let sign = if nanos < 0 { "-" } else { "" };
    let nanos = i128::from(nanos).abs();

    if nanos < NANOS_PER_MICRO {
        return format!("{sign}{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{sign}{}µs", fixed(nanos, NANOS_PER_MICRO));
    }
    if nanos < NANOS_PER_SECOND {
        return format!("{sign}{}ms", fixed(nanos, NANOS_PER_MILLI));
    }

    let hours = nanos / NANOS_PER_HOUR;
    let minutes = (nanos % NANOS_PER_HOUR) / NANOS_PER_MINUTE;
    let seconds = fixed(nanos % NANOS_PER_MINUTE, NANOS_PER_SECOND);

    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{seconds}s")
    } else {
        format!("{sign}{seconds}s")
    }
}

/// Render `value / unit` with trailing fractional zeros trimmed.
fn fixed(value: i128, unit: i128) -> String {
    let whole = value / unit;
    let rem = value % unit;
    if rem == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let frac = format!("{rem:0width$}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}
