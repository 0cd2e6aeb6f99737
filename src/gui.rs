// src/gui.rs
use eframe::egui;
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};
use log::warn;
use crate::dsp::{AnalysisSession, Histogram, NamedSeries, SignalError};
use crate::types::{DisplayMode, PlotMode};

// 每个视图已经计算好的绘图数据
enum ViewContent {
    Lines(Vec<NamedSeries>),
    Bars(Vec<(String, Histogram)>),
    Failed(String),
}

struct ViewState {
    title: String,
    caption: Option<Result<String, String>>,
    mode: PlotMode,
    // None 表示需要重新计算（模式刚切换）
    content: Option<ViewContent>,
}

pub struct CaptureScopeApp {
    session: AnalysisSession,
    views: Vec<ViewState>,
}

impl CaptureScopeApp {
    pub fn new(session: AnalysisSession) -> Self {
        let views = (0..session.view_count())
            .map(|view| ViewState {
                title: session.view_title(view),
                caption: session
                    .caption(view)
                    .map(|c| c.map_err(|e| e.to_string())),
                mode: PlotMode::default(),
                content: None,
            })
            .collect();
        Self { session, views }
    }

    fn compute(session: &AnalysisSession, view: usize, mode: PlotMode) -> ViewContent {
        let result = match session.display() {
            DisplayMode::Interactive => session.mode_series(view, mode).map(ViewContent::Lines),
            DisplayMode::Filtered { low_hz, high_hz, order } => session
                .filtered_series(view, low_hz, high_hz, order)
                .map(ViewContent::Lines),
            DisplayMode::Histogram { bins } => {
                session.histograms(view, bins).map(ViewContent::Bars)
            }
        };
        let result = result.and_then(|content| match content {
            ViewContent::Lines(series) if series.iter().all(|s| s.series.bounds().is_none()) => Err(
                SignalError::Plot("series has no finite values".into()),
            ),
            other => Ok(other),
        });
        result.unwrap_or_else(|e| {
            warn!("view {view}: {e}");
            ViewContent::Failed(e.to_string())
        })
    }

    fn show_view(ui: &mut egui::Ui, session: &AnalysisSession, view: usize, state: &mut ViewState) {
        // 悬停显示文件完整路径
        ui.horizontal_wrapped(|ui| {
            for r in session.view_records(view) {
                ui.small(r.label.as_str())
                    .on_hover_text(r.path.display().to_string());
            }
        });

        match &state.caption {
            Some(Ok(text)) => {
                ui.label(egui::RichText::new(text).monospace());
            }
            Some(Err(e)) => {
                ui.label(egui::RichText::new(e).color(Color32::RED));
            }
            None => {}
        }

        // 单选按钮：default / spectr / int / dint
        if session.display() == DisplayMode::Interactive {
            ui.horizontal(|ui| {
                for mode in PlotMode::ALL {
                    if ui.radio_value(&mut state.mode, mode, mode.label()).changed() {
                        state.content = None;
                    }
                }
            });
        }

        if state.mode == PlotMode::Spectrum && session.display() == DisplayMode::Interactive {
            ui.horizontal_wrapped(|ui| {
                for r in session.view_records(view) {
                    ui.small(format!("{}: slice {} Hz", r.label, r.record.slice_frequency()));
                }
            });
        }

        let content = state
            .content
            .get_or_insert_with(|| Self::compute(session, view, state.mode));

        let (x_label, y_label) = match session.display() {
            DisplayMode::Interactive => (state.mode.x_label(), state.mode.y_label()),
            DisplayMode::Filtered { .. } => ("time (s)", ""),
            DisplayMode::Histogram { .. } => ("value", "count"),
        };

        match content {
            ViewContent::Failed(msg) => {
                ui.label(egui::RichText::new(msg.as_str()).color(Color32::RED));
            }
            ViewContent::Lines(series) => {
                Plot::new(("plot", view))
                    .legend(Legend::default())
                    .x_axis_label(x_label)
                    .y_axis_label(y_label)
                    .show(ui, |plot_ui| {
                        for named in series.iter() {
                            plot_ui.line(
                                Line::new(PlotPoints::new(named.series.points()))
                                    .name(&named.label),
                            );
                        }
                    });
            }
            ViewContent::Bars(hists) => {
                Plot::new(("hist", view))
                    .legend(Legend::default())
                    .x_axis_label(x_label)
                    .y_axis_label(y_label)
                    .show(ui, |plot_ui| {
                        for (label, hist) in hists.iter() {
                            let width = hist.bin_width();
                            let bars = hist
                                .centers()
                                .zip(&hist.counts)
                                .map(|(x, &count)| Bar::new(x, count as f64).width(width))
                                .collect();
                            plot_ui.bar_chart(BarChart::new(bars).name(label));
                        }
                    });
            }
        }
    }
}

impl eframe::App for CaptureScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());
        let Self { session, views } = self;

        if views.len() == 1 {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.heading(views[0].title.as_str());
                Self::show_view(ui, session, 0, &mut views[0]);
            });
            return;
        }

        // 多窗口模式：每个记录一个窗口
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(format!("{} captures", views.len()));
        });
        for (view, state) in views.iter_mut().enumerate() {
            egui::Window::new(state.title.clone())
                .id(egui::Id::new(("view", view)))
                .default_size([720.0, 420.0])
                .show(ctx, |ui| {
                    Self::show_view(ui, session, view, state);
                });
        }
    }
}
