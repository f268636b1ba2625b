use anyhow::Result;

use crate::data::loader::load_file;
use crate::data::locator::{locate, CandidatePaths};
use crate::pipeline::Pipeline;
use crate::sink::{RenderSink, ReportSink};

// ---------------------------------------------------------------------------
// One analysis run: locate → load → pipeline
// ---------------------------------------------------------------------------

/// Find the dataset, load it and run every pipeline step over it.
///
/// Nothing reaches the sinks unless a dataset was found and loaded.
pub fn run(
    candidates: &CandidatePaths,
    pipeline: &Pipeline,
    render: &mut dyn RenderSink,
    report: &mut dyn ReportSink,
) -> Result<()> {
    let path = locate(candidates)?;
    let table = load_file(&path)?;
    pipeline.run(&table, render, report)
}
