use chrono::NaiveTime;

use crate::code::TimeOfDay;

const DEFAULT_SUNRISE_HOUR: u32 = 6;
const DEFAULT_SUNSET_HOUR: u32 = 18;

fn at_hour(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Parse an astronomy time as served by the backend (`"06:12"`) or by the
/// provider's astro block (`"06:12 AM"`).
pub fn parse_astro_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();

    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%I:%M %p"))
        .ok()
}

impl TimeOfDay {
    /// Derive day/night for payloads that carry no `is_day` flag.
    ///
    /// Unparseable sunrise/sunset values fall back to 06:00 and 18:00.
    pub fn from_astro(now: NaiveTime, sunrise: &str, sunset: &str) -> Self {
        let sunrise = parse_astro_time(sunrise).unwrap_or_else(|| at_hour(DEFAULT_SUNRISE_HOUR));
        let sunset = parse_astro_time(sunset).unwrap_or_else(|| at_hour(DEFAULT_SUNSET_HOUR));

        TimeOfDay::from(sunrise <= now && now < sunset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parses_both_formats() {
        assert_eq!(parse_astro_time("05:47"), Some(t(5, 47)));
        assert_eq!(parse_astro_time("05:47 AM"), Some(t(5, 47)));
        assert_eq!(parse_astro_time("06:31 PM"), Some(t(18, 31)));
        assert_eq!(parse_astro_time("sometime"), None);
    }

    #[test]
    fn day_between_sunrise_and_sunset() {
        assert_eq!(TimeOfDay::from_astro(t(12, 0), "05:47 AM", "06:31 PM"), TimeOfDay::Day);
        assert_eq!(TimeOfDay::from_astro(t(5, 47), "05:47 AM", "06:31 PM"), TimeOfDay::Day);
        assert_eq!(TimeOfDay::from_astro(t(18, 31), "05:47 AM", "06:31 PM"), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_astro(t(3, 0), "05:47", "18:31"), TimeOfDay::Night);
    }

    #[test]
    fn unparseable_times_use_defaults() {
        assert_eq!(TimeOfDay::from_astro(t(6, 30), "", "n/a"), TimeOfDay::Day);
        assert_eq!(TimeOfDay::from_astro(t(18, 0), "", "n/a"), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_astro(t(5, 59), "garbage", "19:00"), TimeOfDay::Night);
    }
}
