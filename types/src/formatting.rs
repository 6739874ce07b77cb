//! Display formatting for console and overlay front ends.
//!
//! Everything the CLI prints about rewards, positions and session clocks goes
//! through here so the textual output stays uniform.

/// Insert `,` every three digits.
///
/// # Examples
/// ```
/// use eewatch_types::formatting::format_thousands;
/// assert_eq!(format_thousands(0), "0");
/// assert_eq!(format_thousands(950), "950");
/// assert_eq!(format_thousands(12_500), "12,500");
/// assert_eq!(format_thousands(1_500_000), "1,500,000");
/// ```
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a large amount with K/M suffix for compact display.
///
/// # Examples
/// ```
/// use eewatch_types::formatting::format_compact;
/// assert_eq!(format_compact(500), "500");
/// assert_eq!(format_compact(1_500), "1.50K");
/// assert_eq!(format_compact(2_250_000), "2.25M");
/// ```
pub fn format_compact(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Format a session timestamp (seconds since game start) as `H:MM:SS`.
///
/// Negative and non-finite values render as `0:00:00`.
pub fn format_session_time(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs as u64
    } else {
        0
    };
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

/// Format a world position with one decimal per axis.
pub fn format_position(pos: (f64, f64, f64)) -> String {
    format!("({:.1}, {:.1}, {:.1})", pos.0, pos.1, pos.2)
}
