use std::io::Write;

use anyhow::{Context, Result};

use super::ReportSink;
use crate::report::ReportItem;

/// Plain-text report written to any `Write`, normally stdout.
pub struct ConsoleReport<W: Write> {
    out: W,
}

impl ConsoleReport<std::io::Stdout> {
    pub fn stdout() -> Self {
        ConsoleReport {
            out: std::io::stdout(),
        }
    }
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(out: W) -> Self {
        ConsoleReport { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for ConsoleReport<W> {
    fn emit(&mut self, item: &ReportItem) -> Result<()> {
        match item {
            ReportItem::Heading(text) => writeln!(self.out, "{text}:"),
            ReportItem::Line(text) => writeln!(self.out, "{text}"),
            ReportItem::Table(table) => write!(self.out, "{}", table.render()),
            ReportItem::Blank => writeln!(self.out),
        }
        .context("writing report")?;
        self.out.flush().context("flushing report")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::TextTable;

    #[test]
    fn writes_items_in_order() {
        let mut report = ConsoleReport::new(Vec::new());
        report.emit(&ReportItem::Heading("Insights".into())).unwrap();
        report.emit(&ReportItem::Line("- one".into())).unwrap();
        report.emit(&ReportItem::Blank).unwrap();
        report
            .emit(&ReportItem::Table(TextTable::new(["Sex", "Survived"]).row(["male", "0.0"])))
            .unwrap();

        let text = String::from_utf8(report.into_inner()).unwrap();
        assert_eq!(text, "Insights:\n- one\n\nSex   Survived\nmale       0.0\n");
    }
}
