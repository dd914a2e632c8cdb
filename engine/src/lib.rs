//! Core engine for the Meridian time planner: zone time projection, offset
//! labels, day-phase buckets, the planning timeline state machine, the zone
//! registry, and configuration persistence.
//!
//! Everything here is synchronous and local; the GUI shell in `planner`
//! consumes these types and adds no time math of its own.

mod catalog;
mod config;
mod day_phase;
mod registry;
mod timeline;
mod zone_time;

pub use catalog::{default_label, search_cities, search_timezones, CitySuggestion, COMMON_CITIES};
pub use config::{config_path, load_config, save_config, AppConfig, ConfigError};
pub use day_phase::DayPhase;
pub use registry::{Zone, ZoneRegistry};
pub use timeline::{
    parse_wall_time, ScrollQuantizer, Timeline, PIXELS_PER_STEP, SCROLL_STEP_MINUTES,
};
pub use zone_time::{
    local_clock, offset_between, offset_label, utc_offset_minutes, zone_abbreviation, Meridiem,
    ZoneClock,
};
