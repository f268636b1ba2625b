/// Output side of the pipeline.
///
/// ```text
///   Pipeline ──Chart──────▶ RenderSink ─┬─ WindowSink  (egui window, blocks until closed)
///            │                          ├─ FileSink    (PNG + JSON per chart)
///            │                          └─ NullSink
///            └─ReportItem──▶ ReportSink ─── ConsoleReport (stdout)
/// ```
pub mod console;
pub mod file;
mod raster;
pub mod window;

use anyhow::Result;

use crate::chart::Chart;
use crate::report::ReportItem;

pub use console::ConsoleReport;
pub use file::FileSink;
pub use window::WindowSink;

/// Accepts chart requests, one at a time. `render` returns once the chart
/// has been shown (and dismissed) or persisted.
pub trait RenderSink {
    fn render(&mut self, chart: &Chart) -> Result<()>;
}

/// Accepts printable text and tables.
pub trait ReportSink {
    fn emit(&mut self, item: &ReportItem) -> Result<()>;
}

/// Drops every chart.
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, chart: &Chart) -> Result<()> {
        log::debug!("skipping chart '{}'", chart.title);
        Ok(())
    }
}
