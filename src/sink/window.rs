use anyhow::{anyhow, Result};
use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot, PlotPoint, PlotPoints, PlotUi,
    Points, Polygon, Text,
};

use super::RenderSink;
use crate::analysis::stats::Histogram;
use crate::chart::{BoxGroup, Chart, ChartKind, PairCell, ScatterGroup};
use crate::color::{self, ColorMap, Rgb8};

const BAR_COLOR: Color32 = Color32::from_rgb(76, 114, 176);

fn color32(c: Rgb8) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

// ---------------------------------------------------------------------------
// WindowSink – one native window per chart
// ---------------------------------------------------------------------------

/// Shows each chart in its own window and returns when the user closes it.
#[derive(Debug, Default)]
pub struct WindowSink;

impl RenderSink for WindowSink {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        let (w, h) = window_size(&chart.kind);
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([w, h])
                .with_min_inner_size([400.0, 300.0]),
            run_and_return: true,
            ..Default::default()
        };

        let window = ChartWindow {
            chart: chart.clone(),
        };
        eframe::run_native(
            &chart.title,
            options,
            Box::new(|_cc| Ok(Box::new(window))),
        )
        .map_err(|e| anyhow!("showing chart '{}': {e}", chart.title))
    }
}

/// Figure sizes in points (100 per inch of the matplotlib figures).
fn window_size(kind: &ChartKind) -> (f32, f32) {
    match kind {
        ChartKind::PairGrid { .. } => (1000.0, 1000.0),
        ChartKind::Heatmap { .. } => (1000.0, 600.0),
        ChartKind::Histogram(_) => (640.0, 480.0),
        ChartKind::BoxPlot { .. } | ChartKind::Scatter { .. } => (800.0, 600.0),
    }
}

struct ChartWindow {
    chart: Chart,
}

impl eframe::App for ChartWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("title").show(ctx, |ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading(self.chart.title.as_str());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let chart = &self.chart;
            match &chart.kind {
                ChartKind::PairGrid { columns, cells } => pair_grid(ui, columns, cells),
                ChartKind::Heatmap { labels, values } => heatmap(ui, labels, values),
                ChartKind::Histogram(h) => {
                    show_plot(ui, chart, false, |plot_ui| plot_ui.bar_chart(histogram_bars(h)));
                }
                ChartKind::BoxPlot { groups } => box_plot(ui, chart, groups),
                ChartKind::Scatter { groups } => scatter(ui, chart, groups),
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Plot builders
// ---------------------------------------------------------------------------

/// Zoomable plot with the chart's axis labels.
fn show_plot(ui: &mut Ui, chart: &Chart, legend: bool, add: impl FnOnce(&mut PlotUi)) {
    let mut plot = Plot::new(chart.slug())
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if legend {
        plot = plot.legend(Legend::default());
    }
    plot.show(ui, add);
}

fn histogram_bars(h: &Histogram) -> BarChart {
    let bars = h
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let (lo, hi) = (h.edges[i], h.edges[i + 1]);
            Bar::new((lo + hi) / 2.0, count as f64).width(hi - lo)
        })
        .collect();
    BarChart::new(bars).color(BAR_COLOR)
}

fn box_plot(ui: &mut Ui, chart: &Chart, groups: &[BoxGroup]) {
    let colors = ColorMap::new(groups.iter().map(|g| g.label.as_str()));
    show_plot(ui, chart, true, |plot_ui| {
        for (i, g) in groups.iter().enumerate() {
            let s = &g.summary;
            let fill = color32(colors.color_for(&g.label));
            let elem = BoxElem::new(
                i as f64,
                BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
            )
            .name(&g.label)
            .box_width(0.6)
            .fill(fill.gamma_multiply(0.6))
            .stroke(egui::Stroke::new(1.5, fill));
            plot_ui.box_plot(BoxPlot::new(vec![elem]).name(&g.label).color(fill));

            if !s.outliers.is_empty() {
                let outliers: Vec<[f64; 2]> = s.outliers.iter().map(|&o| [i as f64, o]).collect();
                plot_ui.points(Points::new(outliers).radius(2.0).color(fill));
            }
        }
    });
}

fn scatter(ui: &mut Ui, chart: &Chart, groups: &[ScatterGroup]) {
    let colors = ColorMap::new(groups.iter().map(|g| g.label.as_str()));
    show_plot(ui, chart, true, |plot_ui| {
        for g in groups {
            let points = Points::new(g.points.clone())
                .name(&g.label)
                .color(color32(colors.color_for(&g.label)))
                .radius(3.0);
            plot_ui.points(points);
        }
    });
}

fn heatmap(ui: &mut Ui, labels: &[String], values: &[Vec<f64>]) {
    let n = labels.len() as f64;
    Plot::new("correlation_heatmap")
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (r, row) in values.iter().enumerate() {
                // first row at the top
                let y = n - r as f64 - 1.0;
                for (c, &v) in row.iter().enumerate() {
                    let x = c as f64;
                    let fill = color::diverging(v);
                    let cell = PlotPoints::from(vec![[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0]]);
                    plot_ui.polygon(
                        Polygon::new(cell)
                            .fill_color(color32(fill))
                            .stroke(egui::Stroke::new(1.0, Color32::WHITE)),
                    );
                    let text = if v.is_nan() {
                        "NaN".to_string()
                    } else {
                        format!("{v:.2}")
                    };
                    plot_ui.text(
                        Text::new(PlotPoint::new(x + 0.5, y + 0.5), RichText::new(text).strong())
                            .color(color32(color::contrasting_text(fill))),
                    );
                }
            }
            for (i, label) in labels.iter().enumerate() {
                let i = i as f64;
                plot_ui.text(Text::new(PlotPoint::new(i + 0.5, -0.3), label.as_str()));
                plot_ui.text(Text::new(PlotPoint::new(-0.5, n - i - 0.5), label.as_str()));
            }
        });
}

fn pair_grid(ui: &mut Ui, columns: &[String], cells: &[Vec<PairCell>]) {
    let n = columns.len().max(1) as f32;
    let size = (ui.available_width().min(ui.available_height()) / n - 8.0).max(60.0);

    egui::Grid::new("pair_grid").spacing([4.0, 4.0]).show(ui, |ui| {
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let mut plot = Plot::new(("pair", r, c))
                    .width(size)
                    .height(size)
                    .show_axes([r + 1 == cells.len(), c == 0])
                    .allow_drag(false)
                    .allow_scroll(false)
                    .allow_zoom(false);
                if r + 1 == cells.len() {
                    plot = plot.x_axis_label(columns[c].clone());
                }
                if c == 0 {
                    plot = plot.y_axis_label(columns[r].clone());
                }
                plot.show(ui, |plot_ui| match cell {
                    PairCell::Histogram(h) => plot_ui.bar_chart(histogram_bars(h)),
                    PairCell::Scatter(points) => {
                        plot_ui.points(Points::new(points.clone()).radius(1.5).color(BAR_COLOR));
                    }
                });
            }
            ui.end_row();
        }
    });
}
