//! Byte size, transfer speed and time interval parsing/formatting.

const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Parse a byte count with an optional binary unit suffix.
///
/// Accepts `512`, `10K`, `10k`, `10KB`, `10KiB`, `3M`, `1G`, `2T` and `4B`.
/// Every multiplier is a power of 1024.
pub fn parse_size(input: &str) -> Option<u64> {
    let input = input.trim();
    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (digits, suffix) = input.split_at(split);
    if digits.is_empty() {
        return None;
    }
    let value: u64 = digits.parse().ok()?;

    let suffix = suffix.trim_start().to_ascii_lowercase();
    let shift = match suffix.as_str() {
        "" | "b" => 0,
        "k" | "kb" | "kib" => 10,
        "m" | "mb" | "mib" => 20,
        "g" | "gb" | "gib" => 30,
        "t" | "tb" | "tib" => 40,
        _ => return None,
    };
    value.checked_mul(1u64 << shift)
}

/// Format a byte count for display, e.g. `1.50 MiB`.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// Parse a transfer speed: a byte count with an optional `/s` suffix.
pub fn parse_speed(input: &str) -> Option<u64> {
    let input = input.trim();
    let input = input
        .strip_suffix("/s")
        .or_else(|| input.strip_suffix("/S"))
        .unwrap_or(input);
    parse_size(input)
}

pub fn format_speed(bytes_per_second: u64) -> String {
    format!("{}/s", format_size(bytes_per_second))
}

/// Parse a time interval such as `30`, `45s`, `5m` or `1h30m`.
///
/// A bare number is a count of seconds. Units: s, m, h, d, w.
pub fn parse_interval(input: &str) -> Option<u64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if input.bytes().all(|b| b.is_ascii_digit()) {
        return input.parse().ok();
    }

    let mut total: u64 = 0;
    let mut digits = String::new();
    for c in input.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if digits.is_empty() {
            return None;
        }
        let multiplier = match c.to_ascii_lowercase() {
            's' => 1,
            'm' => 60,
            'h' => 3600,
            'd' => 86_400,
            'w' => 604_800,
            _ => return None,
        };
        let value: u64 = digits.parse().ok()?;
        total = total.checked_add(value.checked_mul(multiplier)?)?;
        digits.clear();
    }

    // Trailing digits without a unit ("1h30") are ambiguous.
    if !digits.is_empty() {
        return None;
    }
    Some(total)
}

/// Format a number of seconds as a compact interval, e.g. `1h30m`.
pub fn format_interval(seconds: u64) -> String {
    if seconds == 0 {
        return "0s".to_string();
    }
    let parts = [
        (604_800, 'w'),
        (86_400, 'd'),
        (3600, 'h'),
        (60, 'm'),
        (1, 's'),
    ];
    let mut rest = seconds;
    let mut out = String::new();
    for (size, unit) in parts {
        if rest >= size {
            out.push_str(&format!("{}{}", rest / size, unit));
            rest %= size;
        }
    }
    out
}
