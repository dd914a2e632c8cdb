//! Row projection - turns the registry plus the shared reference instant
//! into per-zone display data for one frame.

use chrono::{DateTime, Utc};
use engine::{
    local_clock, offset_label, utc_offset_minutes, zone_abbreviation, DayPhase, ZoneRegistry,
};

/// Everything the board needs to render one zone column
#[derive(Debug, Clone)]
pub struct ZoneRowData {
    pub zone_id: String,
    pub iana_name: String,
    pub label: String,
    pub time_text: String,
    pub date_text: String,
    /// None for the home zone itself
    pub offset_text: Option<String>,
    pub abbreviation: String,
    pub phase: DayPhase,
    pub is_home: bool,
}

/// Project every registered zone through the shared instant.
///
/// Offsets are measured against the home zone's UTC offset at the instant;
/// with no home set, the baseline is the reference instant itself (offset
/// zero), so the board keeps rendering.
pub fn build_rows(
    registry: &ZoneRegistry,
    instant: DateTime<Utc>,
    use_24_hour: bool,
) -> Vec<ZoneRowData> {
    let home_offset = registry
        .home_zone()
        .map(|zone| utc_offset_minutes(&zone.iana_name, instant))
        .unwrap_or(0);

    registry
        .zones()
        .iter()
        .map(|zone| {
            let clock = local_clock(&zone.iana_name, instant);
            let is_home = registry.home_zone_id() == Some(zone.id.as_str());
            let offset_text = if is_home {
                None
            } else {
                let zone_offset = utc_offset_minutes(&zone.iana_name, instant);
                Some(offset_label(zone_offset - home_offset))
            };

            ZoneRowData {
                zone_id: zone.id.clone(),
                iana_name: zone.iana_name.clone(),
                label: zone.label.clone(),
                time_text: clock.format_time(use_24_hour),
                date_text: clock.format_date(),
                offset_text,
                abbreviation: zone_abbreviation(&zone.iana_name, instant),
                phase: DayPhase::for_hour(clock.hour24),
                is_home,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use engine::Zone;

    fn instant(h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, h, mi, 0).single().unwrap()
    }

    fn board() -> ZoneRegistry {
        let mut registry = ZoneRegistry::new();
        registry.add_zone("America/Los_Angeles", "San Francisco");
        registry.add_zone("America/New_York", "New York");
        registry.add_zone("Asia/Kolkata", "Mumbai");
        registry
    }

    #[test]
    fn home_row_carries_no_offset_label() {
        let rows = build_rows(&board(), instant(12, 0), true);
        assert!(rows[0].is_home);
        assert_eq!(rows[0].offset_text, None);
        assert_eq!(rows[1].offset_text.as_deref(), Some("+3h"));
        assert_eq!(rows[2].offset_text.as_deref(), Some("+13h30m"));
    }

    #[test]
    fn missing_home_measures_against_the_instant() {
        let zones = vec![Zone {
            id: "z1".to_string(),
            iana_name: "Asia/Tokyo".to_string(),
            label: "Tokyo".to_string(),
        }];
        let registry = ZoneRegistry::from_parts(zones, None);
        let rows = build_rows(&registry, instant(12, 0), true);
        assert_eq!(rows[0].offset_text.as_deref(), Some("+9h"));
    }

    #[test]
    fn all_rows_share_the_reference_instant() {
        let registry = board();
        let before = build_rows(&registry, instant(20, 0), true);
        let after = build_rows(&registry, instant(21, 0), true);
        // 20:00 UTC -> SF 12:00, NY 15:00, Mumbai 01:30 (next day)
        assert_eq!(before[0].time_text, "12:00");
        assert_eq!(before[1].time_text, "15:00");
        assert_eq!(before[2].time_text, "01:30");
        // one shared hour later, every column advanced one hour
        assert_eq!(after[0].time_text, "13:00");
        assert_eq!(after[1].time_text, "16:00");
        assert_eq!(after[2].time_text, "02:30");
    }

    #[test]
    fn phases_follow_local_hours() {
        let rows = build_rows(&board(), instant(20, 0), true);
        assert_eq!(rows[0].phase, DayPhase::Day); // SF 12:00
        assert_eq!(rows[1].phase, DayPhase::Day); // NY 15:00
        assert_eq!(rows[2].phase, DayPhase::Night); // Mumbai 01:30
    }

    #[test]
    fn twelve_hour_formatting_carries_meridiem() {
        let rows = build_rows(&board(), instant(20, 0), false);
        assert_eq!(rows[0].time_text, "12:00 PM");
        assert_eq!(rows[2].time_text, "1:30 AM");
    }
}
