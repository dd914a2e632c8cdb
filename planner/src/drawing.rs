//! Drawing module - renders the zone columns with day-phase gradients plus
//! the planning banner and scroll hint.

use engine::DayPhase;
use nannou::prelude::*;

use crate::rows::ZoneRowData;

/// Gap between zone columns
const COLUMN_GAP: f32 = 14.0;

/// Horizontal strips used to fake a vertical gradient
const GRADIENT_STRIPS: usize = 32;

/// Color palette for the board
pub mod colors {
    use nannou::prelude::*;

    /// Window background
    pub const BACKGROUND: Srgb<u8> = Srgb {
        red: 2,
        green: 6,
        blue: 23,
        standard: std::marker::PhantomData,
    };

    /// Home zone highlight ring
    pub const HOME_RING: Srgb<u8> = Srgb {
        red: 148,
        green: 163,
        blue: 184,
        standard: std::marker::PhantomData,
    };

    /// Hint text
    pub const HINT: Srgb<u8> = Srgb {
        red: 100,
        green: 116,
        blue: 139,
        standard: std::marker::PhantomData,
    };

    /// Planning banner text
    pub const PLANNING: Srgb<u8> = Srgb {
        red: 251,
        green: 191,
        blue: 36,
        standard: std::marker::PhantomData,
    };

    /// Empty-board message text
    pub const EMPTY_TEXT: Srgb<u8> = Srgb {
        red: 100,
        green: 116,
        blue: 139,
        standard: std::marker::PhantomData,
    };
}

/// Gradient endpoints and text color for one day phase
pub struct PhaseTheme {
    pub top: Srgb<u8>,
    pub bottom: Srgb<u8>,
    pub text: Srgb<u8>,
}

const fn rgb_const(red: u8, green: u8, blue: u8) -> Srgb<u8> {
    Srgb {
        red,
        green,
        blue,
        standard: std::marker::PhantomData,
    }
}

/// Display treatment per phase. Dark slate for night, indigo dawn, blue
/// morning/day, orange-pink dusk, violet evening.
pub fn phase_theme(phase: DayPhase) -> PhaseTheme {
    match phase {
        DayPhase::Night => PhaseTheme {
            top: rgb_const(15, 23, 42),
            bottom: rgb_const(30, 41, 59),
            text: rgb_const(226, 232, 240),
        },
        DayPhase::Dawn => PhaseTheme {
            top: rgb_const(49, 46, 129),
            bottom: rgb_const(76, 29, 149),
            text: rgb_const(224, 231, 255),
        },
        DayPhase::Morning => PhaseTheme {
            top: rgb_const(3, 105, 161),
            bottom: rgb_const(14, 165, 233),
            text: rgb_const(240, 249, 255),
        },
        DayPhase::Day => PhaseTheme {
            top: rgb_const(2, 132, 199),
            bottom: rgb_const(34, 211, 238),
            text: rgb_const(240, 249, 255),
        },
        DayPhase::Dusk => PhaseTheme {
            top: rgb_const(234, 88, 12),
            bottom: rgb_const(219, 39, 119),
            text: rgb_const(255, 247, 237),
        },
        DayPhase::Evening => PhaseTheme {
            top: rgb_const(76, 29, 149),
            bottom: rgb_const(49, 46, 129),
            text: rgb_const(243, 232, 255),
        },
    }
}

/// Layout of the board area to the right of the side panel
#[derive(Debug, Clone)]
pub struct BoardLayout {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl BoardLayout {
    /// Calculate from window dimensions, accounting for the egui side panel
    pub fn calculate(window_rect: Rect, panel_width: f32) -> Self {
        let margin = 18.0;
        let left = window_rect.left() + panel_width + margin;
        let right = window_rect.right() - margin;
        let top = window_rect.top() - margin;
        let bottom = window_rect.bottom() + margin;

        Self {
            left,
            right,
            top,
            bottom,
            width: right - left,
            height: top - bottom,
        }
    }
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

fn lerp_color(a: Srgb<u8>, b: Srgb<u8>, t: f32) -> Srgb<u8> {
    srgb(
        lerp_channel(a.red, b.red, t),
        lerp_channel(a.green, b.green, t),
        lerp_channel(a.blue, b.blue, t),
    )
}

/// Draw all zone columns left to right in display order.
pub fn draw_zone_columns(draw: &Draw, layout: &BoardLayout, rows: &[ZoneRowData]) {
    if rows.is_empty() {
        draw.text("No time zones added yet.")
            .x_y(
                (layout.left + layout.right) / 2.0,
                (layout.top + layout.bottom) / 2.0,
            )
            .color(colors::EMPTY_TEXT)
            .font_size(18)
            .w(layout.width);
        return;
    }

    let count = rows.len() as f32;
    let column_w = (layout.width - COLUMN_GAP * (count - 1.0)) / count;
    let column_h = layout.height;
    let center_y = (layout.top + layout.bottom) / 2.0;

    for (i, row) in rows.iter().enumerate() {
        let center_x = layout.left + i as f32 * (column_w + COLUMN_GAP) + column_w / 2.0;
        draw_zone_column(draw, row, center_x, center_y, column_w, column_h);
    }
}

fn draw_zone_column(
    draw: &Draw,
    row: &ZoneRowData,
    center_x: f32,
    center_y: f32,
    width: f32,
    height: f32,
) {
    let theme = phase_theme(row.phase);

    // Home zone gets a thin ring behind its column
    if row.is_home {
        draw.rect()
            .x_y(center_x, center_y)
            .w_h(width + 4.0, height + 4.0)
            .no_fill()
            .stroke(colors::HOME_RING)
            .stroke_weight(2.0);
    }

    // Vertical gradient as stacked strips
    let strip_h = height / GRADIENT_STRIPS as f32;
    for strip in 0..GRADIENT_STRIPS {
        let t = strip as f32 / (GRADIENT_STRIPS - 1) as f32;
        let strip_y = center_y + height / 2.0 - (strip as f32 + 0.5) * strip_h;
        draw.rect()
            .x_y(center_x, strip_y)
            .w_h(width, strip_h + 1.0)
            .color(lerp_color(theme.top, theme.bottom, t));
    }

    // Abbreviation tag, top of the column
    if !row.abbreviation.is_empty() {
        draw.text(&row.abbreviation)
            .x_y(center_x, center_y + height / 2.0 - 22.0)
            .color(srgba(theme.text.red, theme.text.green, theme.text.blue, 170u8))
            .font_size(12)
            .w(width);
    }

    // The time itself, centered
    let time_size = (width * 0.18).clamp(20.0, 56.0) as u32;
    draw.text(&row.time_text)
        .x_y(center_x, center_y + 10.0)
        .color(theme.text)
        .font_size(time_size)
        .w(width);

    // Offset pill under the time (home zone has none)
    if let Some(offset_text) = &row.offset_text {
        let pill_y = center_y - 34.0;
        draw.rect()
            .x_y(center_x, pill_y)
            .w_h(width * 0.42, 22.0)
            .color(srgba(255u8, 255u8, 255u8, 40u8));
        draw.text(offset_text)
            .x_y(center_x, pill_y)
            .color(theme.text)
            .font_size(13)
            .w(width);
    }

    // City label and date at the bottom
    draw.text(&row.label)
        .x_y(center_x, center_y - height / 2.0 + 56.0)
        .color(theme.text)
        .font_size(18)
        .w(width - 12.0);
    draw.text(&row.date_text)
        .x_y(center_x, center_y - height / 2.0 + 32.0)
        .color(srgba(theme.text.red, theme.text.green, theme.text.blue, 200u8))
        .font_size(13)
        .w(width);
}

/// "Scroll to plan" hint shown while Live
pub fn draw_scroll_hint(draw: &Draw, layout: &BoardLayout) {
    draw.text("Scroll to plan")
        .x_y((layout.left + layout.right) / 2.0, layout.bottom + 10.0)
        .color(colors::HINT)
        .font_size(13)
        .w(layout.width);
}

/// Planning banner shown while the instant is pinned
pub fn draw_planning_banner(draw: &Draw, layout: &BoardLayout) {
    draw.text("Planning - Esc returns to now")
        .x_y((layout.left + layout.right) / 2.0, layout.top - 6.0)
        .color(colors::PLANNING)
        .font_size(14)
        .w(layout.width);
}
