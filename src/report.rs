// ---------------------------------------------------------------------------
// Textual output handed to a report sink
// ---------------------------------------------------------------------------

/// One unit of printable output.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportItem {
    Heading(String),
    Line(String),
    Table(TextTable),
    Blank,
}

/// A small table of pre-formatted cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Printed under the table, e.g. `Name: Survived, dtype: float64`.
    pub footer: Option<String>,
}

impl TextTable {
    pub fn new(header: impl IntoIterator<Item = impl Into<String>>) -> Self {
        TextTable {
            header: header.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn row(mut self, cells: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    /// Render with columns padded to their widest cell. The first column is
    /// left-aligned, the rest right-aligned.
    pub fn render(&self) -> String {
        let n_cols = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0);
        let mut widths = vec![0; n_cols];
        for line in std::iter::once(&self.header).chain(&self.rows) {
            for (i, cell) in line.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        for line in std::iter::once(&self.header).chain(&self.rows) {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, &w)| {
                    let cell = line.get(i).map(String::as_str).unwrap_or("");
                    if i == 0 {
                        format!("{cell:<w$}")
                    } else {
                        format!("{cell:>w$}")
                    }
                })
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }
        if let Some(footer) = &self.footer {
            out.push_str(footer);
            out.push('\n');
        }
        out
    }
}

/// Format a float the way summary tables show it.
pub fn fmt_float(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v:.6}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_columns_to_widest_cell() {
        let table = TextTable::new(["Pclass", "Survived"])
            .row(["1", "0.629630"])
            .row(["3", "0.242363"])
            .footer("Name: Survived, dtype: float64");
        assert_eq!(
            table.render(),
            "Pclass  Survived\n\
             1       0.629630\n\
             3       0.242363\n\
             Name: Survived, dtype: float64\n"
        );
    }

    #[test]
    fn nan_prints_as_nan() {
        assert_eq!(fmt_float(f64::NAN), "NaN");
        assert_eq!(fmt_float(0.5), "0.500000");
    }
}
