//! Meridian - a multi-timezone planning clock.
//!
//! An ordered board of zone columns, all projected from one shared reference
//! instant. Scrolling, stepping, or typing a time into a zone pins that
//! instant ("Planning"); Esc returns to the live wall clock.

mod drawing;
mod rows;
mod ui;

use chrono::Utc;
use engine::{
    local_clock, AppConfig, ScrollQuantizer, Timeline, ZoneRegistry, SCROLL_STEP_MINUTES,
};
use nannou::prelude::*;
use nannou_egui::{self, Egui};

use crate::drawing::{colors, draw_planning_banner, draw_scroll_hint, draw_zone_columns, BoardLayout};
use crate::rows::{build_rows, ZoneRowData};
use crate::ui::{draw_side_panel, draw_zone_picker, PickerState, TimeEdit};

const PANEL_WIDTH: f32 = 260.0;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    nannou::app(model).update(update).run();
}

/// Application state
struct Model {
    /// Ordered zones and the home designation
    registry: ZoneRegistry,
    /// Owns the shared reference instant
    timeline: Timeline,
    /// 24-hour display toggle
    use_24_hour: bool,
    /// Per-zone display data for the current frame
    rows: Vec<ZoneRowData>,
    /// Last wall-clock second the rows were sampled at (Live mode gate)
    last_live_second: Option<i64>,
    /// Rows need a rebuild after a gesture or registry change
    rows_dirty: bool,
    /// Wheel input quantizer
    scroll: ScrollQuantizer,
    /// Add-zone picker state
    picker: PickerState,
    /// Active direct time edit, if any
    edit: Option<TimeEdit>,
    /// egui integration
    egui: Egui,
}

impl Model {
    fn refresh_rows(&mut self) {
        self.rows = build_rows(
            &self.registry,
            self.timeline.effective_instant(),
            self.use_24_hour,
        );
        self.rows_dirty = false;
    }

    /// Apply a quantized minute delta from any input device.
    fn apply_step(&mut self, minutes: i64) {
        if minutes != 0 {
            self.timeline.shift_minutes(minutes);
            self.rows_dirty = true;
        }
    }

    fn reset_planning(&mut self) {
        self.timeline.reset();
        self.scroll.reset();
        self.rows_dirty = true;
    }

    /// Reference line for the side panel: home zone's date and time, or the
    /// instant itself when no home is set.
    fn reference_text(&self) -> String {
        let instant = self.timeline.effective_instant();
        let iana = self
            .registry
            .home_zone()
            .map(|zone| zone.iana_name.clone())
            .unwrap_or_else(|| "UTC".to_string());
        let clock = local_clock(&iana, instant);
        format!("{}  {}", clock.format_date(), clock.format_time(self.use_24_hour))
    }
}

fn save_config(model: &Model) {
    let config = AppConfig::from_registry(&model.registry, model.use_24_hour);
    if let Err(e) = engine::save_config(&config) {
        log::error!("failed to save config: {}", e);
    }
}

fn model(app: &App) -> Model {
    let window_id = app
        .new_window()
        .title("Meridian")
        .size(1280, 720)
        .min_size(900, 520)
        .view(view)
        .key_pressed(key_pressed)
        .mouse_wheel(mouse_wheel)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    let config = match engine::load_config() {
        Ok(Some(config)) => config,
        Ok(None) => AppConfig::default(),
        Err(e) => {
            log::warn!("failed to load config, using defaults: {}", e);
            AppConfig::default()
        }
    };
    let use_24_hour = config.use_24_hour;
    let registry = config.into_registry();
    let timeline = Timeline::new();
    let rows = build_rows(&registry, timeline.effective_instant(), use_24_hour);

    Model {
        registry,
        timeline,
        use_24_hour,
        rows,
        last_live_second: None,
        rows_dirty: false,
        scroll: ScrollQuantizer::default(),
        picker: PickerState::default(),
        edit: None,
        egui,
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    // Collect state for the UI before borrowing egui
    let is_planning = model.timeline.is_planning();
    let reference_text = model.reference_text();
    let mut use_24_hour = model.use_24_hour;

    // Begin egui frame
    model.egui.set_elapsed_time(update.since_start);
    let ctx = model.egui.begin_frame();

    let panel_result = draw_side_panel(
        &ctx,
        &model.rows,
        is_planning,
        &reference_text,
        &mut use_24_hour,
        &mut model.edit,
    );
    let picker_result = draw_zone_picker(&ctx, &mut model.picker);

    drop(ctx);

    // Apply panel results
    if panel_result.open_picker {
        model.picker.open();
    }
    if panel_result.reset_planning {
        model.reset_planning();
    }
    if let Some(minutes) = panel_result.step_minutes {
        model.apply_step(minutes);
    }
    if let Some(id) = panel_result.set_home {
        if model.registry.set_home(&id) {
            model.rows_dirty = true;
            save_config(model);
        }
    }
    if let Some(id) = panel_result.remove_zone {
        if model.registry.remove_zone(&id) {
            model.rows_dirty = true;
            save_config(model);
        }
    }
    if let Some((from, to)) = panel_result.move_zone {
        model.registry.reorder(from, to);
        model.rows_dirty = true;
        save_config(model);
    }
    if let Some(id) = panel_result.begin_edit {
        let current = model
            .rows
            .iter()
            .find(|row| row.zone_id == id)
            .map(|row| row.time_text.clone())
            .unwrap_or_default();
        model.edit = Some(TimeEdit::new(id, current));
    }
    if let Some((zone_id, input)) = panel_result.submit_edit {
        // Invalid input falls through untouched; dropping the edit state
        // reverts the display on its own.
        if let Some(position) = model.registry.position(&zone_id) {
            let iana = model.registry.zones()[position].iana_name.clone();
            if model.timeline.edit_zone_time(&iana, &input) {
                model.rows_dirty = true;
            }
        }
        model.edit = None;
    }
    if panel_result.cancel_edit {
        model.edit = None;
    }
    if panel_result.format_changed {
        model.use_24_hour = use_24_hour;
        model.rows_dirty = true;
        save_config(model);
    }

    // Apply picker results
    if let Some((iana_name, label)) = picker_result.add_zone {
        model.registry.add_zone(&iana_name, &label);
        model.rows_dirty = true;
        save_config(model);
    }
    if picker_result.close_picker {
        model.picker.close();
    }

    // Live mode resamples once per second; Planning only rebuilds after a
    // gesture, so the pinned instant is never raced by the tick.
    let needs_refresh = if model.timeline.is_planning() {
        model.rows_dirty
    } else {
        let second = Utc::now().timestamp();
        let ticked = model.last_live_second != Some(second);
        if ticked {
            model.last_live_second = Some(second);
        }
        ticked || model.rows_dirty
    };
    if needs_refresh {
        model.refresh_rows();
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();

    draw.background().color(colors::BACKGROUND);

    let layout = BoardLayout::calculate(window_rect, PANEL_WIDTH);
    draw_zone_columns(&draw, &layout, &model.rows);

    if model.timeline.is_planning() {
        draw_planning_banner(&draw, &layout);
    } else if !model.rows.is_empty() {
        draw_scroll_hint(&draw, &layout);
    }

    draw.to_frame(app, &frame).unwrap();
    model.egui.draw_to_frame(&frame).unwrap();
}

fn key_pressed(app: &App, model: &mut Model, key: Key) {
    let mods = app.keys.mods;

    match key {
        // Escape - close picker, cancel edit, or return to live
        Key::Escape => {
            if model.picker.is_open {
                model.picker.close();
            } else if model.edit.is_some() {
                model.edit = None;
            } else if model.timeline.is_planning() {
                model.reset_planning();
            }
        }

        // Arrow keys - step the reference time
        Key::Left => {
            if model.edit.is_none() && !model.picker.is_open {
                let minutes = if mods.ctrl() || mods.logo() {
                    -60
                } else {
                    -SCROLL_STEP_MINUTES
                };
                model.apply_step(minutes);
            }
        }
        Key::Right => {
            if model.edit.is_none() && !model.picker.is_open {
                let minutes = if mods.ctrl() || mods.logo() {
                    60
                } else {
                    SCROLL_STEP_MINUTES
                };
                model.apply_step(minutes);
            }
        }

        // R - reset to now
        Key::R => {
            if model.edit.is_none() && !model.picker.is_open {
                model.reset_planning();
            }
        }

        // T - toggle 12/24 hour display
        Key::T => {
            if model.edit.is_none() && !model.picker.is_open {
                model.use_24_hour = !model.use_24_hour;
                model.rows_dirty = true;
                save_config(model);
            }
        }

        // A or / - open the add-zone picker
        Key::A | Key::Slash => {
            if model.edit.is_none() && !model.picker.is_open {
                model.picker.open();
            }
        }

        _ => {}
    }
}

fn mouse_wheel(_app: &App, model: &mut Model, delta: MouseScrollDelta, phase: TouchPhase) {
    if model.picker.is_open {
        return;
    }

    if phase == TouchPhase::Ended || phase == TouchPhase::Cancelled {
        model.scroll.reset();
        return;
    }

    let minutes = match delta {
        MouseScrollDelta::LineDelta(_, y) => model.scroll.wheel_lines(y),
        MouseScrollDelta::PixelDelta(pos) => model.scroll.wheel_pixels(pos.y as f32),
    };
    model.apply_step(minutes);
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
