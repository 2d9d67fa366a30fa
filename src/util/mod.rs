/// Current time in epoch milliseconds.
///
/// The crate also builds as an rlib for native unit tests, where `js_sys`
/// is unavailable, so the clock is cfg-split.
#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> i64 {
    js_sys::Date::now().round() as i64
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Human-readable age of a note card ("Just now", "5 min ago", ...).
pub(crate) fn relative_time(posted_on_ms: i64, now_ms: i64) -> String {
    let minutes = (now_ms - posted_on_ms) / 1000 / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{} min ago", minutes)
    } else if hours < 24 {
        format!("{} hour ago", hours)
    } else {
        format!("{} day ago", days)
    }
}

/// Header greeting for the given local hour (0..=23).
pub(crate) fn greeting_for_hour(hour: u32) -> String {
    let period = match hour {
        0..=4 => "Night",
        5..=11 => "Morning",
        12..=14 => "Noon",
        15..=16 => "Afternoon",
        17..=19 => "Evening",
        _ => "Night",
    };
    format!("Good {}", period)
}

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Header date line, e.g. "Sun, Aug 23".
pub(crate) fn date_line(weekday: u32, month: u32, day: u32) -> String {
    let w = WEEKDAYS.get(weekday as usize).copied().unwrap_or("");
    let m = MONTHS.get(month as usize).copied().unwrap_or("");
    format!("{}, {} {}", w, m, day)
}

/// Greeting for the browser's local time. Only reachable in the wasm UI.
pub(crate) fn greeting() -> String {
    let d = js_sys::Date::new_0();
    greeting_for_hour(d.get_hours())
}

/// Date line for the browser's local time. Only reachable in the wasm UI.
pub(crate) fn today_line() -> String {
    let d = js_sys::Date::new_0();
    date_line(d.get_day(), d.get_month(), d.get_date())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_time_buckets() {
        let now = 1_700_000_000_000;
        assert_eq!(relative_time(now, now), "Just now");
        assert_eq!(relative_time(now - 59 * 1000, now), "Just now");
        assert_eq!(relative_time(now - 5 * 60 * 1000, now), "5 min ago");
        assert_eq!(relative_time(now - 3 * 60 * 60 * 1000, now), "3 hour ago");
        assert_eq!(relative_time(now - 48 * 60 * 60 * 1000, now), "2 day ago");
    }

    #[test]
    fn test_greeting_follows_the_hour() {
        assert_eq!(greeting_for_hour(3), "Good Night");
        assert_eq!(greeting_for_hour(9), "Good Morning");
        assert_eq!(greeting_for_hour(13), "Good Noon");
        assert_eq!(greeting_for_hour(16), "Good Afternoon");
        assert_eq!(greeting_for_hour(18), "Good Evening");
        assert_eq!(greeting_for_hour(23), "Good Night");
    }

    #[test]
    fn test_date_line_formatting() {
        assert_eq!(date_line(0, 7, 23), "Sun, Aug 23");
        assert_eq!(date_line(4, 0, 4), "Thu, Jan 4");
    }
}
