//! Zone time conversions - maps a shared reference instant into per-zone
//! wall-clock fields and computes inter-zone offset labels.
//!
//! Every displayed time in the app is a projection of one absolute instant
//! through an IANA zone; nothing here ever subtracts wall-clock fields.

use chrono::{DateTime, Datelike, Local, Offset, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// AM/PM indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Meridiem {
    AM,
    PM,
}

impl std::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Meridiem::AM => write!(f, "AM"),
            Meridiem::PM => write!(f, "PM"),
        }
    }
}

/// Wall-clock fields for one zone at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneClock {
    /// Year (e.g., 2025)
    pub year: i32,
    /// Month (1-12)
    pub month: u32,
    /// Day of month (1-31)
    pub day: u32,
    /// Day of week
    pub weekday: Weekday,
    /// Hour in 12-hour format (1-12)
    pub hour12: u32,
    /// Hour in 24-hour format (0-23)
    pub hour24: u32,
    /// Minute (0-59)
    pub minute: u32,
    /// Second (0-59)
    pub second: u32,
    /// AM/PM indicator
    pub meridiem: Meridiem,
    /// UTC offset in minutes (e.g., -480 for UTC-8)
    pub utc_offset_minutes: i32,
}

impl ZoneClock {
    /// Extract wall-clock fields from a zoned datetime
    pub fn from_datetime<Z: TimeZone>(dt: &DateTime<Z>) -> Self {
        let hour24 = dt.hour();
        let hour12 = match hour24 {
            0 => 12,
            1..=12 => hour24,
            _ => hour24 - 12,
        };
        let meridiem = if hour24 < 12 { Meridiem::AM } else { Meridiem::PM };
        let utc_offset_minutes = dt.offset().fix().local_minus_utc() / 60;

        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            weekday: dt.weekday(),
            hour12,
            hour24,
            minute: dt.minute(),
            second: dt.second(),
            meridiem,
            utc_offset_minutes,
        }
    }

    /// Format the time as "HH:MM" (24-hour) or "H:MM AM|PM" (12-hour)
    pub fn format_time(&self, use_24_hour: bool) -> String {
        if use_24_hour {
            format!("{:02}:{:02}", self.hour24, self.minute)
        } else {
            format!("{}:{:02} {}", self.hour12, self.minute, self.meridiem)
        }
    }

    /// Format the date as "Wed, Jan 15"
    pub fn format_date(&self) -> String {
        let month_abbrev = match self.month {
            1 => "Jan",
            2 => "Feb",
            3 => "Mar",
            4 => "Apr",
            5 => "May",
            6 => "Jun",
            7 => "Jul",
            8 => "Aug",
            9 => "Sep",
            10 => "Oct",
            11 => "Nov",
            12 => "Dec",
            _ => "???",
        };
        format!("{}, {} {}", self.weekday, month_abbrev, self.day)
    }

    /// Minutes since the zone-local midnight (0..1439)
    pub fn minute_of_day(&self) -> i32 {
        (self.hour24 * 60 + self.minute) as i32
    }
}

/// Project a reference instant into a zone's wall-clock time.
///
/// An unknown zone identifier degrades to the host's local wall-clock time
/// at the same instant; the fault is logged and the caller keeps rendering.
pub fn local_clock(iana_name: &str, instant: DateTime<Utc>) -> ZoneClock {
    match iana_name.parse::<Tz>() {
        Ok(tz) => ZoneClock::from_datetime(&instant.with_timezone(&tz)),
        Err(_) => {
            log::warn!("invalid time zone {iana_name:?}, showing host local time");
            ZoneClock::from_datetime(&instant.with_timezone(&Local))
        }
    }
}

/// A zone's UTC offset in minutes at the given instant.
///
/// Unknown zones resolve to 0, the same baseline used when no home zone is
/// set - degraded output stays renderable instead of failing.
pub fn utc_offset_minutes(iana_name: &str, instant: DateTime<Utc>) -> i32 {
    match iana_name.parse::<Tz>() {
        Ok(tz) => instant.with_timezone(&tz).offset().fix().local_minus_utc() / 60,
        Err(_) => {
            log::warn!("invalid time zone {iana_name:?}, treating offset as zero");
            0
        }
    }
}

/// Relative offset label between two zones at an instant.
///
/// Both zones are resolved to their UTC offsets at the instant first, so the
/// label stays correct when the zones sit on different calendar dates or on
/// opposite sides of a DST transition.
pub fn offset_between(zone_a: &str, zone_b: &str, instant: DateTime<Utc>) -> String {
    let diff = utc_offset_minutes(zone_b, instant) - utc_offset_minutes(zone_a, instant);
    offset_label(diff)
}

/// Render a signed minute difference as "Same", "+5h", "-5h30m", ...
pub fn offset_label(diff_minutes: i32) -> String {
    if diff_minutes == 0 {
        return "Same".to_string();
    }
    let sign = if diff_minutes > 0 { '+' } else { '-' };
    let abs_minutes = diff_minutes.abs();
    let hours = abs_minutes / 60;
    let minutes = abs_minutes % 60;
    if minutes == 0 {
        format!("{}{}h", sign, hours)
    } else {
        format!("{}{}h{:02}m", sign, hours, minutes)
    }
}

/// Short zone abbreviation (e.g. "PST") at the given instant.
///
/// Unknown zones yield an empty string; rows simply omit the tag.
pub fn zone_abbreviation(iana_name: &str, instant: DateTime<Utc>) -> String {
    match iana_name.parse::<Tz>() {
        Ok(tz) => instant.with_timezone(&tz).format("%Z").to_string(),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).single().unwrap()
    }

    #[test]
    fn local_clock_projects_fields() {
        // 2025-01-15 17:30 UTC is 12:30 in New York (EST, UTC-5)
        let clock = local_clock("America/New_York", instant(2025, 1, 15, 17, 30, 0));
        assert_eq!(clock.hour24, 12);
        assert_eq!(clock.minute, 30);
        assert_eq!(clock.meridiem, Meridiem::PM);
        assert_eq!(clock.utc_offset_minutes, -300);
        assert_eq!(clock.day, 15);
    }

    #[test]
    fn local_clock_survives_unknown_zone() {
        let clock = local_clock("Not/AZone", instant(2025, 1, 15, 17, 30, 0));
        assert!(clock.hour24 < 24);
        assert!(clock.minute < 60);
    }

    #[test]
    fn midnight_is_twelve_am() {
        let clock = local_clock("UTC", instant(2025, 6, 1, 0, 5, 0));
        assert_eq!(clock.hour12, 12);
        assert_eq!(clock.meridiem, Meridiem::AM);
        assert_eq!(clock.format_time(false), "12:05 AM");
        assert_eq!(clock.format_time(true), "00:05");
    }

    #[test]
    fn format_date_abbreviates() {
        let clock = local_clock("UTC", instant(2025, 1, 15, 12, 0, 0));
        assert_eq!(clock.format_date(), "Wed, Jan 15");
    }

    #[test]
    fn same_zone_is_same() {
        let t = instant(2025, 1, 15, 12, 0, 0);
        assert_eq!(offset_between("Asia/Tokyo", "Asia/Tokyo", t), "Same");
    }

    #[test]
    fn equal_offsets_are_same_not_plus_zero() {
        // London sits on GMT in January, identical to UTC
        let t = instant(2025, 1, 15, 12, 0, 0);
        assert_eq!(offset_between("UTC", "Europe/London", t), "Same");
    }

    #[test]
    fn new_york_in_winter_is_minus_five() {
        let t = instant(2025, 1, 15, 12, 0, 0);
        assert_eq!(offset_between("UTC", "America/New_York", t), "-5h");
    }

    #[test]
    fn half_hour_offsets_are_not_truncated() {
        let t = instant(2025, 1, 15, 12, 0, 0);
        assert_eq!(offset_between("Asia/Kolkata", "UTC", t), "-5h30m");
        assert_eq!(offset_between("UTC", "Asia/Kolkata", t), "+5h30m");
    }

    #[test]
    fn forty_five_minute_offsets_label_correctly() {
        let t = instant(2025, 1, 15, 12, 0, 0);
        // Kathmandu is UTC+5:45 year-round
        assert_eq!(offset_between("UTC", "Asia/Kathmandu", t), "+5h45m");
    }

    #[test]
    fn labels_are_antisymmetric() {
        let t = instant(2025, 7, 15, 12, 0, 0);
        let pairs = [
            ("UTC", "Asia/Tokyo"),
            ("America/Los_Angeles", "Europe/London"),
            ("Asia/Kolkata", "Australia/Sydney"),
        ];
        for (a, b) in pairs {
            let forward = offset_between(a, b, t);
            let backward = offset_between(b, a, t);
            assert_eq!(backward, negate_label(&forward), "{a} vs {b}");
        }
    }

    fn negate_label(label: &str) -> String {
        match label.chars().next() {
            Some('+') => format!("-{}", &label[1..]),
            Some('-') => format!("+{}", &label[1..]),
            _ => label.to_string(),
        }
    }

    #[test]
    fn offset_holds_across_day_boundary() {
        // 02:00 UTC on Jan 16: Tokyo is already on Jan 16, LA still on Jan 15.
        // A naive wall-clock subtraction would misorder here.
        let t = instant(2025, 1, 16, 2, 0, 0);
        assert_eq!(offset_between("America/Los_Angeles", "Asia/Tokyo", t), "+17h");
    }

    #[test]
    fn offset_tracks_dst_transition() {
        // New York springs forward at 2025-03-09 07:00 UTC
        let before = instant(2025, 3, 9, 6, 30, 0);
        let after = instant(2025, 3, 9, 7, 30, 0);
        assert_eq!(offset_between("UTC", "America/New_York", before), "-5h");
        assert_eq!(offset_between("UTC", "America/New_York", after), "-4h");
        // Phoenix skips DST, so the gap to New York narrows mid-transition
        assert_eq!(
            offset_between("America/New_York", "America/Phoenix", after),
            "-3h"
        );
    }

    #[test]
    fn unknown_zone_offsets_to_zero() {
        let t = instant(2025, 1, 15, 12, 0, 0);
        assert_eq!(utc_offset_minutes("Not/AZone", t), 0);
        assert_eq!(offset_between("Not/AZone", "UTC", t), "Same");
    }

    #[test]
    fn abbreviation_resolves_or_empties() {
        let t = instant(2025, 1, 15, 12, 0, 0);
        assert_eq!(zone_abbreviation("America/Los_Angeles", t), "PST");
        assert_eq!(zone_abbreviation("Not/AZone", t), "");
    }
}
