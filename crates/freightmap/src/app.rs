use eframe::egui::{self, RichText};

use crate::cli::QueryArgs;
use crate::client::{RouteQuery, parse_seed};
use crate::config::Config;
use crate::model::Algorithm;
use crate::normalize::EndpointSelection;
use crate::orchestrator::{FetchOrchestrator, FetchState};
use crate::render::color::{CHEAP_HUE, EXPENSIVE_HUE, hsl_color};
use crate::render::map::{self, MapFrame};
use crate::render::markers::{self, MarkerStyle};
use crate::render::viewport::{FIT_PADDING_PX, FitRequest, MapSurface, MapView, ViewportFitter};
use crate::render::RenderState;
use crate::summary::{self, RouteSummaryView};
use crate::theme::Theme;

const SIDE_PANEL_WIDTH: f32 = 300.0;

struct RouteApp {
    orchestrator: FetchOrchestrator,
    render_state: RenderState,
    /// Orchestrator revision `render_state` was derived from.
    rendered_revision: u64,
    fitter: ViewportFitter,
    camera: MapView,
    theme: Theme,
    algorithm: Algorithm,
    seed_text: String,
    hovered: Option<String>,
}

impl RouteApp {
    fn new(orchestrator: FetchOrchestrator, query: &RouteQuery, theme: Theme) -> Self {
        Self {
            orchestrator,
            render_state: RenderState::default(),
            rendered_revision: 0,
            fitter: ViewportFitter::new(),
            camera: MapView::default(),
            theme,
            algorithm: query.algorithm,
            seed_text: query.seed.to_string(),
            hovered: None,
        }
    }

    fn current_query(&self) -> RouteQuery {
        let selection = self.orchestrator.selection();
        RouteQuery {
            algorithm: self.algorithm,
            seed: parse_seed(&self.seed_text),
            start: selection.from.clone(),
            goal: selection.to.clone(),
        }
    }

    fn submit(&mut self) {
        let query = self.current_query();
        self.seed_text = query.seed.to_string();
        self.orchestrator.submit(query);
    }

    /// Rebuild derived state after a commit.
    fn sync_render_state(&mut self) {
        if self.orchestrator.revision() == self.rendered_revision {
            return;
        }
        let view = self.orchestrator.view();
        self.render_state = RenderState::derive(view);
        self.fitter.update(&view.locations, &mut self.camera);
        self.rendered_revision = self.orchestrator.revision();
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme = self.theme.toggled();
        apply_visuals(ctx, &self.theme);
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Freight route");
        ui.add_space(8.0);

        let ids: Vec<String> = self
            .orchestrator
            .view()
            .location_ids()
            .map(String::from)
            .collect();
        let mut selection = self.orchestrator.selection().clone();
        location_combo(ui, "Start", &mut selection.from, &ids);
        location_combo(ui, "End", &mut selection.to, &ids);
        if &selection != self.orchestrator.selection() {
            *self.orchestrator.selection_mut() = selection;
        }

        egui::ComboBox::from_label("Algorithm")
            .selected_text(self.algorithm.display_name())
            .show_ui(ui, |ui| {
                for algo in Algorithm::all() {
                    ui.selectable_value(&mut self.algorithm, *algo, algo.display_name());
                }
            });

        ui.horizontal(|ui| {
            ui.label("Seed");
            ui.add(egui::TextEdit::singleline(&mut self.seed_text).desired_width(80.0));
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let loading = self.orchestrator.is_loading();
            if ui
                .add_enabled(!loading, egui::Button::new("Find route"))
                .clicked()
            {
                self.submit();
            }
            if loading {
                ui.spinner();
            }
            if let Some(bounds) = self.render_state.bounds {
                if ui.button("Fit map").clicked() {
                    self.camera.fit_bounds(FitRequest {
                        bounds,
                        padding_px: FIT_PADDING_PX,
                    });
                }
            }
        });

        if let Some(message) = self.orchestrator.error().map(String::from) {
            ui.add_space(8.0);
            self.draw_error(ui, &message);
        }

        ui.separator();
        self.draw_summary(ui);
        ui.separator();
        self.draw_legend(ui);

        ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
            ui.label(
                RichText::new(self.orchestrator.source_description())
                    .small()
                    .color(self.theme.muted),
            );
        });
    }

    fn draw_error(&mut self, ui: &mut egui::Ui, message: &str) {
        egui::Frame::new()
            .fill(self.theme.error_background)
            .corner_radius(6.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new(message).color(self.theme.error_foreground));
                    if ui.small_button("✕").on_hover_text("Dismiss").clicked() {
                        self.orchestrator.dismiss_error();
                    }
                });
            });
    }

    fn draw_summary(&self, ui: &mut egui::Ui) {
        let view = self.orchestrator.view();
        let Some(s) = RouteSummaryView::from_view_model(view) else {
            let text = match self.orchestrator.state() {
                FetchState::Loading { .. } => "Loading route…",
                _ => "No route",
            };
            ui.label(RichText::new(text).color(self.theme.muted));
            return;
        };

        ui.label(RichText::new(s.headline()).strong());
        if let (Some(start), Some(end)) = (&s.start, &s.end) {
            ui.label(format!("{start} → {end}"));
        }
        if let Some(line) = s.comparison_line() {
            ui.label(line);
        }
        if let Some(c) = &view.comparison {
            ui.label(
                RichText::new(format!(
                    "Optimized {} / baseline {}",
                    summary::format_cost(c.optimized_fuel_cost),
                    summary::format_cost(c.baseline_fuel_cost)
                ))
                .small(),
            );
        }
        ui.label(
            RichText::new(format!("{} nodes expanded", s.expanded))
                .small()
                .color(self.theme.muted),
        );
        if let Some(notes) = &s.notes {
            ui.label(RichText::new(notes).italics());
        }
    }

    fn draw_legend(&self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Optimized route").color(self.theme.route));
        ui.label(RichText::new("Baseline (shortest distance)").color(self.theme.baseline));
        if let Some(range) = self.render_state.price_range {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("${:.2}", range.min)).color(hsl_color(CHEAP_HUE)),
                );
                ui.label("→");
                ui.label(
                    RichText::new(format!("${:.2}", range.max)).color(hsl_color(EXPENSIVE_HUE)),
                );
                ui.label("per gallon");
            });
        }
        if let Some(id) = &self.hovered {
            ui.label(RichText::new(id).small().color(self.theme.muted));
        }
    }
}

impl eframe::App for RouteApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.orchestrator.poll();
        self.sync_render_state();

        let typing = ctx.wants_keyboard_input();
        if !typing && ctx.input(|i| i.key_pressed(egui::Key::T)) {
            self.toggle_theme(ctx);
        }

        egui::SidePanel::left("controls")
            .resizable(false)
            .exact_width(SIDE_PANEL_WIDTH)
            .frame(
                egui::Frame::new()
                    .fill(self.theme.panel_background)
                    .inner_margin(16.0),
            )
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.theme.background).inner_margin(0.0))
            .show(ctx, |ui| {
                let selection = self.orchestrator.selection().clone();
                self.hovered = map::draw(
                    ui,
                    &mut self.camera,
                    MapFrame {
                        view: self.orchestrator.view(),
                        state: &self.render_state,
                        selection: &selection,
                        theme: &self.theme,
                    },
                );
            });
    }
}

fn location_combo(ui: &mut egui::Ui, label: &str, value: &mut Option<String>, ids: &[String]) {
    egui::ComboBox::from_label(label)
        .selected_text(value.as_deref().unwrap_or("auto"))
        .width(200.0)
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut *value, None, "auto");
            for id in ids {
                ui.selectable_value(&mut *value, Some(id.clone()), id.as_str());
            }
        });
}

fn apply_visuals(ctx: &egui::Context, theme: &Theme) {
    ctx.set_visuals(if theme.is_dark() {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
}

fn window_title(source: &str) -> String {
    format!("freightmap: {source}")
}

pub fn run(args: &QueryArgs, windowed: bool) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let query = args.to_query(&config);
    let source = args.source(&config);
    let theme = Theme::from_name(config.theme_name());

    markers::init(MarkerStyle::default());

    let title = window_title(&source.describe());
    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let selection = EndpointSelection::new(query.start.clone(), query.goal.clone());
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            apply_visuals(&cc.egui_ctx, &theme);
            let ctx = cc.egui_ctx.clone();
            let mut orchestrator = FetchOrchestrator::new(source)
                .with_selection(selection)
                .with_waker(move || ctx.request_repaint());
            orchestrator.submit(query.clone());
            Ok(Box::new(RouteApp::new(orchestrator, &query, theme)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
