pub use crate::config::*;

/// A builder for tables.
///
/// Readers feed it with the cells of each row as they come. It is also the simplest
/// way to create a table in memory.
///
/// ```
/// use roster_import::builder::TableBuilder;
///
/// let mut builder = TableBuilder::new(&["Apellido", "Nombre", "DNI"]);
/// builder.add_row(&["Gomez", "Ana", "111"]);
/// // Short rows are padded with empty cells.
/// builder.add_row(&["Diaz", "Luis"]);
/// // Blank rows are skipped.
/// builder.add_row(&["", " ", ""]);
///
/// let table = builder.build();
/// assert_eq!(table.num_rows(), 2);
/// assert_eq!(table.cell(1, 2), "");
/// ```
pub struct TableBuilder {
    pub(crate) _headers: Vec<String>,
    pub(crate) _rows: Vec<Vec<String>>,
}

impl TableBuilder {
    pub fn new<S: AsRef<str>>(headers: &[S]) -> TableBuilder {
        TableBuilder {
            _headers: headers.iter().map(|h| h.as_ref().to_string()).collect(),
            _rows: Vec::new(),
        }
    }

    /// Adds a row of cells, in the order of the headers.
    ///
    /// Cells beyond the last header are dropped. Returns false if the row was
    /// skipped because all its cells are blank.
    pub fn add_row<S: AsRef<str>>(&mut self, cells: &[S]) -> bool {
        let row: Vec<String> = cells.iter().map(|c| c.as_ref().to_string()).collect();
        self.add_row_owned(row)
    }

    pub fn add_row_owned(&mut self, mut row: Vec<String>) -> bool {
        if row.iter().all(|c| c.trim().is_empty()) {
            return false;
        }
        row.resize(self._headers.len(), String::new());
        self._rows.push(row);
        true
    }

    pub fn num_rows(&self) -> usize {
        self._rows.len()
    }

    pub fn build(self) -> RawTable {
        RawTable {
            headers: self._headers,
            rows: self._rows,
        }
    }
}
