//! Number formatting for the dashboard panels.

use bytesize::ByteSize;

/// Byte counters such as `1.2 GB`.
pub fn bytes(count: u64) -> String {
    ByteSize::b(count).to_string()
}

/// `123.5 Mbps`
pub fn mbps(speed: f64) -> String {
    format!("{} Mbps", sysdash_core::presentation::format_speed(speed))
}

/// Packet counters with thousands separators: `12,345`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Battery minutes as `4h 05m` or `35m`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn minutes(mins: f64) -> String {
    let total = mins.max(0.0).round() as u64;
    let (h, m) = (total / 60, total % 60);
    if h > 0 { format!("{h}h {m:02}m") } else { format!("{m}m") }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn thousands_separators() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn minutes_split_hours() {
        assert_eq!(minutes(35.4), "35m");
        assert_eq!(minutes(245.0), "4h 05m");
        assert_eq!(minutes(-5.0), "0m");
        assert_eq!(mbps(93.27), "93.3 Mbps");
    }
}
