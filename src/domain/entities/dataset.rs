/// Header plus text rows, the shape every reader produces and every writer consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabularData {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Header lookup, ignoring surrounding whitespace and ASCII case.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.columns
            .iter()
            .position(|column| column.trim().eq_ignore_ascii_case(wanted))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Pads short rows and truncates long ones to the header width, and
    /// drops rows without any non-blank cell.
    pub fn normalized(self) -> Self {
        let width = self.columns.len();
        let rows = self
            .rows
            .into_iter()
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self {
            columns: self.columns.into_iter().map(|c| c.trim().to_string()).collect(),
            rows,
        }
    }
}
