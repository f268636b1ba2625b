mod analysis;
mod app;
mod chart;
mod cli;
mod color;
mod data;
mod error;
mod pipeline;
mod report;
mod sink;

use anyhow::Result;
use clap::Parser;

use cli::Args;
use pipeline::Pipeline;
use sink::{ConsoleReport, FileSink, NullSink, RenderSink, WindowSink};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::debug!("arguments: {args:?}");

    let mut render: Box<dyn RenderSink> = match (&args.save_charts, args.no_charts) {
        (Some(dir), _) => {
            let sink = FileSink::new(dir)?;
            log::info!("writing charts to {}", sink.dir().display());
            Box::new(sink)
        }
        (None, true) => Box::new(NullSink),
        (None, false) => Box::new(WindowSink),
    };
    let mut report = ConsoleReport::stdout();

    app::run(
        &args.candidates(),
        &Pipeline::default(),
        render.as_mut(),
        &mut report,
    )
}
