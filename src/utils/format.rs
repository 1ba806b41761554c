//! Elapsed-time text

/// Format a number of seconds as `MM:SS`, or `H:MM:SS` from one hour up
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_times_use_minutes_and_seconds() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(9), "00:09");
        assert_eq!(format_elapsed(754), "12:34");
    }

    #[test]
    fn hours_are_unpadded() {
        assert_eq!(format_elapsed(3600), "1:00:00");
        assert_eq!(format_elapsed(36_061), "10:01:01");
    }
}
