//! Subcommand implementations.

pub mod config;
pub mod events;
pub mod rotate;
pub mod team;

/// Formats a minute count as `45m`, `6h 05m` or `2d 3h`.
pub fn format_minutes(minutes: i64) -> String {
    let minutes = minutes.max(0);
    let (days, hours, mins) = (minutes / 1440, minutes % 1440 / 60, minutes % 60);
    match (days, hours) {
        (0, 0) => format!("{mins}m"),
        (0, _) => format!("{hours}h {mins:02}m"),
        _ => format!("{days}d {hours}h"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(365), "6h 05m");
        assert_eq!(format_minutes(2339), "1d 14h");
        assert_eq!(format_minutes(-3), "0m");
    }
}
