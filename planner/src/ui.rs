//! UI module - egui side panel (zones, planning controls, settings) and the
//! add-zone picker window.

use chrono_tz::Tz;
use engine::{default_label, search_cities, search_timezones, CitySuggestion};
use nannou_egui::egui;

use crate::rows::ZoneRowData;

/// Cap on rendered search results so the picker stays responsive
const MAX_ZONE_RESULTS: usize = 250;

/// State for the add-zone picker
#[derive(Default)]
pub struct PickerState {
    /// Whether the picker is currently open
    pub is_open: bool,
    /// Current search query
    pub search_query: String,
    /// Matching curated cities
    pub city_results: Vec<CitySuggestion>,
    /// Matching IANA zones
    pub zone_results: Vec<Tz>,
    /// Whether the search field should grab focus
    pub should_focus_search: bool,
}

impl PickerState {
    pub fn open(&mut self) {
        self.is_open = true;
        self.search_query.clear();
        self.update_search();
        self.should_focus_search = true;
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.search_query.clear();
        self.city_results.clear();
        self.zone_results.clear();
    }

    pub fn update_search(&mut self) {
        self.city_results = search_cities(&self.search_query);
        self.zone_results = search_timezones(&self.search_query);
    }
}

/// An in-progress direct time edit on one zone
pub struct TimeEdit {
    pub zone_id: String,
    pub buffer: String,
    pub focus_requested: bool,
}

impl TimeEdit {
    pub fn new(zone_id: String, current_text: String) -> Self {
        Self {
            zone_id,
            buffer: current_text,
            focus_requested: false,
        }
    }
}

/// Result of side panel interactions
#[derive(Default)]
pub struct PanelResult {
    pub open_picker: bool,
    pub reset_planning: bool,
    pub step_minutes: Option<i64>,
    pub set_home: Option<String>,
    pub remove_zone: Option<String>,
    pub move_zone: Option<(usize, usize)>,
    pub begin_edit: Option<String>,
    /// (zone id, typed text)
    pub submit_edit: Option<(String, String)>,
    pub cancel_edit: bool,
    pub format_changed: bool,
}

/// Result of add-zone picker interactions
#[derive(Default)]
pub struct PickerResult {
    /// (IANA name, label)
    pub add_zone: Option<(String, String)>,
    pub close_picker: bool,
}

fn dim_label(text: impl Into<String>) -> egui::RichText {
    egui::RichText::new(text.into())
        .size(10.0)
        .color(egui::Color32::from_rgb(120, 125, 135))
}

/// Draw the left side panel: planning controls, zone list, settings.
pub fn draw_side_panel(
    ctx: &egui::Context,
    rows: &[ZoneRowData],
    is_planning: bool,
    reference_text: &str,
    use_24_hour: &mut bool,
    edit: &mut Option<TimeEdit>,
) -> PanelResult {
    let mut result = PanelResult::default();

    egui::SidePanel::left("board_panel")
        .resizable(false)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.add_space(10.0);
            ui.heading("Meridian");
            ui.add_space(10.0);

            // Planning status and stepper
            let status = if is_planning { "Planning" } else { "Live" };
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(status)
                        .size(13.0)
                        .color(if is_planning {
                            egui::Color32::from_rgb(251, 191, 36)
                        } else {
                            egui::Color32::from_rgb(100, 200, 150)
                        }),
                );
                ui.label(
                    egui::RichText::new(reference_text)
                        .size(13.0)
                        .color(egui::Color32::from_rgb(200, 205, 215)),
                );
            });
            ui.add_space(5.0);

            ui.horizontal(|ui| {
                if ui.button("-1h").clicked() {
                    result.step_minutes = Some(-60);
                }
                if ui.button("-15m").clicked() {
                    result.step_minutes = Some(-15);
                }
                if ui.button("+15m").clicked() {
                    result.step_minutes = Some(15);
                }
                if ui.button("+1h").clicked() {
                    result.step_minutes = Some(60);
                }
            });
            if is_planning && ui.button("Reset to Now").clicked() {
                result.reset_planning = true;
            }

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(10.0);

            ui.label(
                egui::RichText::new(format!("Zones ({})", rows.len()))
                    .size(12.0)
                    .color(egui::Color32::from_rgb(160, 165, 175)),
            );
            ui.add_space(5.0);

            egui::ScrollArea::vertical()
                .max_height(360.0)
                .show(ui, |ui| {
                    for (i, row) in rows.iter().enumerate() {
                        draw_zone_entry(ui, i, row, rows.len(), edit, &mut result);
                    }
                });

            ui.add_space(10.0);
            if ui.button("+ Add Time Zone").clicked() {
                result.open_picker = true;
            }

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(10.0);

            ui.label("Time Format");
            ui.horizontal(|ui| {
                if ui.radio_value(use_24_hour, false, "12-hour").changed() {
                    result.format_changed = true;
                }
                if ui.radio_value(use_24_hour, true, "24-hour").changed() {
                    result.format_changed = true;
                }
            });

            ui.add_space(10.0);
            ui.label(dim_label("Scroll the board to plan; Esc returns to now"));
        });

    result
}

fn draw_zone_entry(
    ui: &mut egui::Ui,
    index: usize,
    row: &ZoneRowData,
    count: usize,
    edit: &mut Option<TimeEdit>,
    result: &mut PanelResult,
) {
    ui.horizontal(|ui| {
        let name = if row.is_home {
            format!("⌂ {}", row.label)
        } else {
            row.label.clone()
        };
        ui.label(egui::RichText::new(name).size(13.0));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(&row.time_text)
                    .size(13.0)
                    .color(egui::Color32::from_rgb(200, 205, 215)),
            );
        });
    });
    ui.horizontal(|ui| {
        ui.label(dim_label(row.iana_name.clone()));
    });

    let editing_this = edit
        .as_ref()
        .map(|e| e.zone_id == row.zone_id)
        .unwrap_or(false);

    ui.horizontal(|ui| {
        if !row.is_home && ui.small_button("⌂").clicked() {
            result.set_home = Some(row.zone_id.clone());
        }
        if index > 0 && ui.small_button("◀").clicked() {
            result.move_zone = Some((index, index - 1));
        }
        if index + 1 < count && ui.small_button("▶").clicked() {
            result.move_zone = Some((index, index + 1));
        }
        if !editing_this && ui.small_button("edit time").clicked() {
            result.begin_edit = Some(row.zone_id.clone());
        }
        if ui.small_button("✕").clicked() {
            result.remove_zone = Some(row.zone_id.clone());
        }
    });

    if editing_this {
        if let Some(active) = edit.as_mut() {
            let response = ui.text_edit_singleline(&mut active.buffer);
            if !active.focus_requested {
                response.request_focus();
                active.focus_requested = true;
            }
            if response.lost_focus() {
                if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    result.submit_edit =
                        Some((active.zone_id.clone(), active.buffer.clone()));
                } else {
                    result.cancel_edit = true;
                }
            }
        }
    }

    ui.add_space(4.0);
    ui.separator();
}

/// Draw the add-zone picker overlay.
pub fn draw_zone_picker(ctx: &egui::Context, picker_state: &mut PickerState) -> PickerResult {
    let mut result = PickerResult::default();

    if !picker_state.is_open {
        return result;
    }

    egui::Window::new("Add Time Zone")
        .collapsible(false)
        .resizable(true)
        .default_width(420.0)
        .default_height(500.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Search:");
                let response = ui.text_edit_singleline(&mut picker_state.search_query);
                if picker_state.should_focus_search {
                    response.request_focus();
                    picker_state.should_focus_search = false;
                }
                if response.changed() {
                    picker_state.update_search();
                }
            });

            ui.separator();

            egui::ScrollArea::vertical()
                .max_height(380.0)
                .show(ui, |ui| {
                    if !picker_state.city_results.is_empty() {
                        ui.label(
                            egui::RichText::new("Popular Cities")
                                .size(11.0)
                                .color(egui::Color32::from_rgb(160, 165, 175)),
                        );
                        for city in &picker_state.city_results {
                            let text = format!("{}  ({})", city.label, city.iana_name);
                            if ui.selectable_label(false, &text).clicked() {
                                result.add_zone =
                                    Some((city.iana_name.to_string(), city.label.to_string()));
                                result.close_picker = true;
                            }
                        }
                        ui.separator();
                    }

                    ui.label(
                        egui::RichText::new(format!(
                            "All Time Zones ({})",
                            picker_state.zone_results.len()
                        ))
                        .size(11.0)
                        .color(egui::Color32::from_rgb(160, 165, 175)),
                    );
                    for tz in picker_state.zone_results.iter().take(MAX_ZONE_RESULTS) {
                        if ui.selectable_label(false, tz.name()).clicked() {
                            result.add_zone =
                                Some((tz.name().to_string(), default_label(tz.name())));
                            result.close_picker = true;
                        }
                    }
                    if picker_state.zone_results.len() > MAX_ZONE_RESULTS {
                        ui.label(dim_label(format!(
                            "{} more - keep typing to narrow",
                            picker_state.zone_results.len() - MAX_ZONE_RESULTS
                        )));
                    }
                });

            ui.separator();
            if ui.button("Close").clicked() {
                result.close_picker = true;
            }
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        result.close_picker = true;
    }

    result
}
