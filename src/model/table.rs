use serde::Serialize;

/// A match detail page together with the tab variants the pipeline reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchUrl {
    pub url: String,
    pub overview: String,
    pub performance: String,
}

/// Cell text of one HTML table, split into its header row and data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table from extracted rows, treating the first row as the header.
    ///
    /// Returns `None` when there are no rows at all.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Option<Self> {
        let mut rows = rows.into_iter();
        let header = rows.next()?;
        Some(Self {
            header,
            rows: rows.collect(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Both table passes extracted from one match detail page, aligned by map index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchTables {
    pub first_pass: Vec<RawTable>,
    pub second_pass: Vec<RawTable>,
}
