//! Planning timeline - the Live/Planning state machine that owns the shared
//! reference instant, plus the scroll quantizer that turns wheel input into
//! whole-minute steps.

use chrono::{DateTime, Duration, Utc};

use crate::zone_time::local_clock;

/// Minutes applied per discrete wheel detent
pub const SCROLL_STEP_MINUTES: i64 = 5;

/// Accumulated trackpad pixels per scroll step
pub const PIXELS_PER_STEP: f32 = 40.0;

/// Timeline state - Live tracks wall-clock now, Planning pins an instant
#[derive(Debug, Clone, PartialEq)]
enum TimelineMode {
    /// Reference instant follows the wall clock
    Live,
    /// Reference instant is pinned until the next gesture or reset
    Planning { pinned: DateTime<Utc> },
}

/// Owns the effective reference instant for the whole board.
///
/// Every zone column is a projection of the instant this controller hands
/// out; gestures mutate it here and nowhere else.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    mode: TimelineMode,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            mode: TimelineMode::Live,
        }
    }

    pub fn is_planning(&self) -> bool {
        matches!(self.mode, TimelineMode::Planning { .. })
    }

    /// The instant all zone times are derived from.
    ///
    /// Live mode samples the wall clock at the call; Planning mode returns
    /// the pinned instant unchanged.
    pub fn effective_instant(&self) -> DateTime<Utc> {
        match &self.mode {
            TimelineMode::Live => Utc::now(),
            TimelineMode::Planning { pinned } => *pinned,
        }
    }

    /// Apply a relative adjustment in minutes.
    ///
    /// A nonzero delta while Live pins "now + delta"; while Planning it
    /// accumulates on the pinned instant. Zero deltas are no-ops and never
    /// change state.
    pub fn shift_minutes(&mut self, delta: i64) {
        if delta == 0 {
            return;
        }
        let pinned = self.effective_instant() + Duration::minutes(delta);
        self.mode = TimelineMode::Planning { pinned };
    }

    /// Pin the reference instant to an absolute value.
    pub fn set_instant(&mut self, instant: DateTime<Utc>) {
        self.mode = TimelineMode::Planning { pinned: instant };
    }

    /// Return to Live; the next effective instant is wall-clock now.
    pub fn reset(&mut self) {
        self.mode = TimelineMode::Live;
    }

    /// Direct time edit: make one zone show the typed wall time.
    ///
    /// The minute-of-day delta between the requested time and the zone's
    /// currently displayed time is applied to the shared instant, so every
    /// other zone moves by the same amount. Returns false (and mutates
    /// nothing) when the input does not parse or is out of range; typing the
    /// time already shown is an accepted no-op.
    pub fn edit_zone_time(&mut self, iana_name: &str, input: &str) -> bool {
        let Some((hour, minute)) = parse_wall_time(input) else {
            return false;
        };
        let base = self.effective_instant();
        let shown = local_clock(iana_name, base);
        let delta = (hour * 60 + minute) as i64 - shown.minute_of_day() as i64;
        if delta != 0 {
            self.set_instant(base + Duration::minutes(delta));
        }
        true
    }
}

/// Parse "HH:MM" (24-hour) or "H:MM AM|PM" (12-hour, case-insensitive,
/// optional space) into (hour24, minute). Returns None for anything else.
pub fn parse_wall_time(input: &str) -> Option<(u32, u32)> {
    let lower = input.trim().to_ascii_lowercase();
    let (body, meridiem) = if let Some(rest) = lower.strip_suffix("am") {
        (rest.trim_end(), Some(false))
    } else if let Some(rest) = lower.strip_suffix("pm") {
        (rest.trim_end(), Some(true))
    } else {
        (lower.as_str(), None)
    };

    let (hour_str, minute_str) = body.split_once(':')?;
    let hour: u32 = hour_str.trim().parse().ok()?;
    let minute: u32 = minute_str.trim().parse().ok()?;
    if minute > 59 {
        return None;
    }

    match meridiem {
        None if hour <= 23 => Some((hour, minute)),
        None => None,
        Some(_) if !(1..=12).contains(&hour) => None,
        Some(false) => Some((if hour == 12 { 0 } else { hour }, minute)),
        Some(true) => Some((if hour == 12 { 12 } else { hour + 12 }, minute)),
    }
}

/// Quantizes wheel input into deterministic whole-minute steps.
///
/// Discrete wheel detents map to one fixed step each; trackpad pixel deltas
/// accumulate and emit a step per threshold crossing, carrying the
/// remainder. Scrolling down moves the reference time forward.
#[derive(Debug, Clone)]
pub struct ScrollQuantizer {
    step_minutes: i64,
    pixels_per_step: f32,
    accumulated: f32,
}

impl Default for ScrollQuantizer {
    fn default() -> Self {
        Self::new(SCROLL_STEP_MINUTES, PIXELS_PER_STEP)
    }
}

impl ScrollQuantizer {
    pub fn new(step_minutes: i64, pixels_per_step: f32) -> Self {
        Self {
            step_minutes,
            pixels_per_step,
            accumulated: 0.0,
        }
    }

    /// Minutes to apply for a discrete wheel event (positive y = scroll up).
    pub fn wheel_lines(&self, y: f32) -> i64 {
        if y < 0.0 {
            self.step_minutes
        } else if y > 0.0 {
            -self.step_minutes
        } else {
            0
        }
    }

    /// Minutes to apply for an accumulated trackpad delta.
    pub fn wheel_pixels(&mut self, dy: f32) -> i64 {
        self.accumulated += dy;
        let steps = (self.accumulated / self.pixels_per_step).trunc();
        if steps != 0.0 {
            self.accumulated -= steps * self.pixels_per_step;
        }
        -(steps as i64) * self.step_minutes
    }

    /// Drop any sub-threshold remainder (gesture ended).
    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}
