//! Census Scatter Main Application
//! Main window with control panel and chart view.

use crate::chart::{ChartController, Container};
use crate::config::AppConfig;
use crate::data::{DataLoader, DatasetSummary, Record};
use crate::gui::{ChartView, ControlPanel, ControlPanelAction};
use crate::render::StaticChartRenderer;
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, warn};

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete { records: Vec<Record>, path: PathBuf },
    Error(String),
}

/// Main application window.
pub struct ScatterApp {
    config: AppConfig,
    loader: DataLoader,
    control_panel: ControlPanel,
    chart_view: ChartView,
    controller: Option<ChartController>,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl ScatterApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            chart_view: ChartView::new(),
            controller: None,
            load_rx: None,
            is_loading: false,
            config,
        };
        let path = app.config.data_path.clone();
        app.start_load(path);
        app
    }

    /// Read the CSV on a background thread; the chart is built once it arrives.
    fn start_load(&mut self, path: PathBuf) {
        if self.is_loading {
            return;
        }

        self.control_panel.settings.csv_path = Some(path.clone());
        self.control_panel.set_status("Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

            match DataLoader::read_csv(&path) {
                Ok(records) => {
                    let _ = tx.send(LoadResult::Complete { records, path });
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_load(path);
        }
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    LoadResult::Complete { records, path } => {
                        self.on_dataset_loaded(records, path);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(err) => {
                        error!(error = %err, "dataset load failed");
                        // No partial chart survives a failed load.
                        self.controller = None;
                        self.chart_view.reset();
                        self.control_panel.update_summary(None);
                        self.control_panel.set_error(&err);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    fn on_dataset_loaded(&mut self, records: Vec<Record>, path: PathBuf) {
        let summary = DatasetSummary::from_records(&records);
        if summary.missing_cells() > 0 {
            warn!(
                missing = summary.missing_cells(),
                "some numeric cells could not be parsed"
            );
        }

        self.loader.set_records(records, path);
        match self.loader.records() {
            Ok(dataset) => {
                self.controller = Some(ChartController::new(
                    Container::new(self.config.mount_selector.clone()),
                    dataset,
                    self.config.canvas,
                    self.config.style,
                ));
                self.chart_view.reset();
                self.control_panel.update_summary(Some(summary));
                self.control_panel.settings.csv_path = self.loader.get_file_path().cloned();
                self.control_panel
                    .set_status(&format!("Loaded {} rows", self.loader.get_row_count()));
            }
            Err(e) => self.control_panel.set_error(&e.to_string()),
        }
    }

    /// Export the current chart to SVG or PNG
    fn handle_export(&mut self) {
        let Some(surface) = self.controller.as_ref().and_then(|c| c.surface()) else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .add_filter("PNG", &["png"])
            .set_file_name("scatter.svg")
            .save_file()
        else {
            return; // User cancelled
        };

        match StaticChartRenderer::render_to_file(surface, &path) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", path.display()));
                if self.control_panel.settings.open_after_export {
                    if let Err(e) = open::that(&path) {
                        warn!(error = %e, "could not open exported chart");
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "export failed");
                self.control_panel.set_error(&e.to_string());
            }
        }
    }
}

impl eframe::App for ScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        self.control_panel.selection = self.controller.as_ref().map(|c| c.selection());

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui, self.is_loading) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::Export => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_view.show(ctx, ui, self.controller.as_mut());
        });
    }
}

