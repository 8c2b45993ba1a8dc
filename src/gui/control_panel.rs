//! Control Panel Widget
//! Left side panel: data source, export, current axes and dataset summary.

use crate::chart::Selection;
use crate::data::DatasetSummary;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// User settings for the session
#[derive(Clone)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub open_after_export: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            csv_path: None,
            open_after_export: true,
        }
    }
}

/// Left side control panel with file selection and export controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub summary: Option<DatasetSummary>,
    pub selection: Option<Selection>,
    pub status: String,
    pub is_error: bool,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            summary: None,
            selection: None,
            status: "Ready".to_string(),
            is_error: false,
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.is_error = false;
    }

    pub fn set_error(&mut self, error: &str) {
        self.status = format!("Error: {}", error);
        self.is_error = true;
    }

    /// Update the summary after a load; `None` clears it.
    pub fn update_summary(&mut self, summary: Option<DatasetSummary>) {
        self.export_enabled = summary.is_some();
        self.summary = summary;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, is_loading: bool) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("Census Scatter")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let path_text = self
                    .settings
                    .csv_path
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "No file selected".to_string());
                ui.label(RichText::new(&path_text).size(12.0));

                ui.add_space(5.0);
                if ui
                    .add_enabled(!is_loading, egui::Button::new("Load CSV..."))
                    .clicked()
                {
                    action = ControlPanelAction::BrowseCsv;
                }
            });

        ui.add_space(10.0);

        // ===== Export Section =====
        ui.label(RichText::new("Export").size(14.0).strong());
        ui.add_space(5.0);
        ui.checkbox(&mut self.settings.open_after_export, "Open after export");
        if ui
            .add_enabled(self.export_enabled, egui::Button::new("Export SVG / PNG..."))
            .clicked()
        {
            action = ControlPanelAction::Export;
        }

        ui.add_space(10.0);
        ui.separator();

        // ===== Current Axes =====
        if let Some(selection) = &self.selection {
            ui.label(RichText::new("Plotted").size(14.0).strong());
            egui::Grid::new("plotted_axes")
                .num_columns(2)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.label("X");
                    ui.label(selection.x.label());
                    ui.end_row();
                    ui.label("Y");
                    ui.label(selection.y.label());
                    ui.end_row();
                });
            ui.add_space(10.0);
        }

        // ===== Dataset Summary =====
        if let Some(summary) = &self.summary {
            ui.label(
                RichText::new(format!("Dataset ({} rows)", summary.rows))
                    .size(14.0)
                    .strong(),
            );
            egui::Grid::new("dataset_summary")
                .striped(true)
                .num_columns(4)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Field").strong().size(11.0));
                    ui.label(RichText::new("Min").strong().size(11.0));
                    ui.label(RichText::new("Max").strong().size(11.0));
                    ui.label(RichText::new("Missing").strong().size(11.0));
                    ui.end_row();

                    for field in &summary.fields {
                        ui.label(RichText::new(field.column).size(11.0));
                        ui.label(RichText::new(format!("{:.2}", field.min)).size(11.0));
                        ui.label(RichText::new(format!("{:.2}", field.max)).size(11.0));
                        let missing_color = if field.missing > 0 {
                            Color32::from_rgb(220, 53, 69)
                        } else {
                            ui.visuals().text_color()
                        };
                        ui.label(
                            RichText::new(field.missing.to_string())
                                .size(11.0)
                                .color(missing_color),
                        );
                        ui.end_row();
                    }
                });
            ui.add_space(10.0);
        }

        ui.separator();

        // ===== Status =====
        let status_color = if self.is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.horizontal(|ui| {
            if is_loading {
                ui.spinner();
            }
            ui.label(RichText::new(&self.status).size(12.0).color(status_color));
        });

        action
    }
}

/// Actions from the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    Export,
}
