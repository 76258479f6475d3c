//! Header shapes for output files.

/// A titled span of columns in a grouped layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnGroup {
    pub title: String,
    pub columns: Vec<String>,
}

impl ColumnGroup {
    #[must_use]
    pub fn new(title: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            title: title.into(),
            columns,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvLayout {
    /// A single header row.
    Simple { columns: Vec<String> },
    /// Blank separator line, then three stacked header rows: leading column
    /// names, group titles, and per-group column names.
    Grouped {
        leading: Vec<String>,
        groups: Vec<ColumnGroup>,
    },
}

impl CsvLayout {
    #[must_use]
    pub fn simple<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        CsvLayout::Simple {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn grouped<S: Into<String>>(
        leading: impl IntoIterator<Item = S>,
        groups: Vec<ColumnGroup>,
    ) -> Self {
        CsvLayout::Grouped {
            leading: leading.into_iter().map(Into::into).collect(),
            groups,
        }
    }

    /// Number of columns every data row must have.
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            CsvLayout::Simple { columns } => columns.len(),
            CsvLayout::Grouped { leading, groups } => {
                leading.len() + groups.iter().map(|g| g.columns.len()).sum::<usize>()
            }
        }
    }

    /// Whether a blank line precedes the header rows.
    #[must_use]
    pub fn leading_blank_line(&self) -> bool {
        matches!(self, CsvLayout::Grouped { .. })
    }

    /// Header rows, each padded to [`Self::width`].
    #[must_use]
    pub fn header_rows(&self) -> Vec<Vec<String>> {
        match self {
            CsvLayout::Simple { columns } => vec![columns.clone()],
            CsvLayout::Grouped { leading, groups } => {
                let width = self.width();

                let mut names = leading.clone();
                names.resize(width, String::new());

                let mut titles = vec![String::new(); leading.len()];
                let mut columns = titles.clone();
                for group in groups {
                    let start = titles.len();
                    titles.resize(start + group.columns.len(), String::new());
                    if let Some(first) = titles.get_mut(start) {
                        first.clone_from(&group.title);
                    }
                    columns.extend(group.columns.iter().cloned());
                }

                vec![names, titles, columns]
            }
        }
    }
}
