use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::raster::{extent, Canvas, Frame, AXIS, WHITE};
use super::RenderSink;
use crate::analysis::stats::Histogram;
use crate::chart::{BoxGroup, Chart, ChartKind, PairCell, ScatterGroup};
use crate::color::{self, ColorMap, Rgb8};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;
const MARGIN: i64 = 40;
const BAR: Rgb8 = Rgb8::new(76, 114, 176);

// ---------------------------------------------------------------------------
// FileSink – headless rendering into a directory
// ---------------------------------------------------------------------------

/// Writes every chart as `NN_<slug>.png` plus `NN_<slug>.json`.
///
/// The raster carries no text; titles, labels and the numbers behind each
/// chart live in the JSON file next to it.
pub struct FileSink {
    dir: PathBuf,
    written: usize,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating chart directory {}", dir.display()))?;
        Ok(FileSink { dir, written: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl RenderSink for FileSink {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        self.written += 1;
        let stem = format!("{:02}_{}", self.written, chart.slug());

        let png = self.dir.join(format!("{stem}.png"));
        rasterize(chart)
            .save(&png)
            .with_context(|| format!("writing {}", png.display()))?;

        let json = self.dir.join(format!("{stem}.json"));
        let body = serde_json::to_string_pretty(chart).context("serialising chart")?;
        std::fs::write(&json, body).with_context(|| format!("writing {}", json.display()))?;

        log::info!("saved '{}' to {}", chart.title, png.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rasterization per chart kind
// ---------------------------------------------------------------------------

fn rasterize(chart: &Chart) -> image::RgbImage {
    let mut canvas = Canvas::new(WIDTH, HEIGHT);
    let area = (
        MARGIN,
        MARGIN,
        i64::from(WIDTH) - 2 * MARGIN,
        i64::from(HEIGHT) - 2 * MARGIN,
    );
    match &chart.kind {
        ChartKind::PairGrid { columns, cells } => draw_pair_grid(&mut canvas, area, columns.len(), cells),
        ChartKind::Heatmap { values, .. } => draw_heatmap(&mut canvas, area, values),
        ChartKind::Histogram(h) => draw_histogram(&mut canvas, area, h),
        ChartKind::BoxPlot { groups } => draw_boxes(&mut canvas, area, groups),
        ChartKind::Scatter { groups } => draw_scatter(&mut canvas, area, groups),
    }
    canvas.into_image()
}

fn draw_histogram(canvas: &mut Canvas, area: (i64, i64, i64, i64), h: &Histogram) {
    let x = (h.edges[0], h.edges[h.edges.len() - 1]);
    let top = h.counts.iter().copied().max().unwrap_or(0).max(1) as f64;
    let frame = Frame::new(area, x, (0.0, top));
    for (i, &count) in h.counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let a = frame.px(h.edges[i], 0.0);
        let b = frame.px(h.edges[i + 1], count as f64);
        canvas.fill_rect(a, b, BAR);
        canvas.stroke_rect(a, b, WHITE);
    }
    frame.draw_axes(canvas);
}

fn draw_scatter(canvas: &mut Canvas, area: (i64, i64, i64, i64), groups: &[ScatterGroup]) {
    let points = || groups.iter().flat_map(|g| g.points.iter());
    let frame = Frame::new(
        area,
        extent(points().map(|p| p[0])),
        extent(points().map(|p| p[1])),
    );
    let colors = ColorMap::new(groups.iter().map(|g| g.label.as_str()));
    for g in groups {
        let c = colors.color_for(&g.label);
        for p in &g.points {
            canvas.dot(frame.px(p[0], p[1]), 3, c);
        }
    }
    frame.draw_axes(canvas);
}

fn draw_boxes(canvas: &mut Canvas, area: (i64, i64, i64, i64), groups: &[BoxGroup]) {
    let y = extent(groups.iter().flat_map(|g| {
        let s = &g.summary;
        [s.lower_whisker, s.upper_whisker]
            .into_iter()
            .chain(s.outliers.iter().copied())
    }));
    let frame = Frame::new(area, (-0.5, groups.len() as f64 - 0.5), y);
    let colors = ColorMap::new(groups.iter().map(|g| g.label.as_str()));
    for (i, g) in groups.iter().enumerate() {
        let s = &g.summary;
        let x = i as f64;
        let c = colors.color_for(&g.label);
        canvas.fill_rect(frame.px(x - 0.3, s.q1), frame.px(x + 0.3, s.q3), c);
        canvas.stroke_rect(frame.px(x - 0.3, s.q1), frame.px(x + 0.3, s.q3), AXIS);
        canvas.line(frame.px(x - 0.3, s.median), frame.px(x + 0.3, s.median), AXIS);
        canvas.line(frame.px(x, s.q3), frame.px(x, s.upper_whisker), AXIS);
        canvas.line(frame.px(x, s.q1), frame.px(x, s.lower_whisker), AXIS);
        for cap in [s.lower_whisker, s.upper_whisker] {
            canvas.line(frame.px(x - 0.15, cap), frame.px(x + 0.15, cap), AXIS);
        }
        for &o in &s.outliers {
            canvas.dot(frame.px(x, o), 2, AXIS);
        }
    }
    frame.draw_axes(canvas);
}

fn draw_heatmap(canvas: &mut Canvas, area: (i64, i64, i64, i64), values: &[Vec<f64>]) {
    let n = values.len().max(1) as f64;
    // square cells, row 0 at the top like a matrix
    let frame = Frame {
        left: area.0,
        top: area.1,
        width: area.2.min(area.3),
        height: area.2.min(area.3),
        x: (0.0, n),
        y: (0.0, n),
    };
    for (r, row) in values.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            let a = frame.px(c as f64, n - r as f64);
            let b = frame.px(c as f64 + 1.0, n - r as f64 - 1.0);
            canvas.fill_rect(a, b, color::diverging(v));
        }
    }
}

fn draw_pair_grid(
    canvas: &mut Canvas,
    (left, top, width, height): (i64, i64, i64, i64),
    n: usize,
    cells: &[Vec<PairCell>],
) {
    if n == 0 {
        return;
    }
    let cell_w = width / n as i64;
    let cell_h = height / n as i64;
    let gap = 6;
    for (r, row) in cells.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let area = (
                left + c as i64 * cell_w + gap,
                top + r as i64 * cell_h + gap,
                cell_w - 2 * gap,
                cell_h - 2 * gap,
            );
            match cell {
                PairCell::Histogram(h) => draw_histogram(canvas, area, h),
                PairCell::Scatter(points) => {
                    let frame = Frame::new(
                        area,
                        extent(points.iter().map(|p| p[0])),
                        extent(points.iter().map(|p| p[1])),
                    );
                    for p in points {
                        canvas.dot(frame.px(p[0], p[1]), 1, BAR);
                    }
                    frame.draw_axes(canvas);
                }
            }
        }
    }
}
