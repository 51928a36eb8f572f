// ********* Input data structures ***********

use std::borrow::Cow;
use std::error::Error;
use std::fmt::Display;
use std::path::Path;

/// A table as read from an input file, before any interpretation of the columns.
///
/// Every row holds exactly one cell per header. Use the [`crate::builder::TableBuilder`]
/// to assemble one: it takes care of padding short rows and dropping blank rows.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawTable {
    pub(crate) headers: Vec<String>,
    pub(crate) rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The content of a cell, or the empty string if the cell does not exist.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
            .unwrap_or("")
    }
}

/// The substrings that identify the columns of interest in a normalized header.
///
/// The markers are stored in normalized form, so that they can be compared directly
/// with normalized headers.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MarkerSet {
    pub surname: Cow<'static, str>,
    pub first_name: Cow<'static, str>,
    pub national_id: Cow<'static, str>,
}

impl MarkerSet {
    /// The markers for rosters with Spanish headers (Apellido, Nombre, DNI).
    pub const DEFAULT_MARKERS: MarkerSet = MarkerSet {
        surname: Cow::Borrowed("apellido"),
        first_name: Cow::Borrowed("nombre"),
        national_id: Cow::Borrowed("dni"),
    };

    pub fn new(surname: &str, first_name: &str, national_id: &str) -> MarkerSet {
        MarkerSet {
            surname: Cow::Owned(crate::normalize_header(surname)),
            first_name: Cow::Owned(crate::normalize_header(first_name)),
            national_id: Cow::Owned(crate::normalize_header(national_id)),
        }
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        MarkerSet::DEFAULT_MARKERS
    }
}

/// The kind of file a roster is imported from.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputFormat {
    /// Excel workbooks (.xlsx, .xls)
    Spreadsheet,
    /// Delimited text (.csv)
    Csv,
}

impl InputFormat {
    /// Decides the format from the extension of the file name. No file is opened.
    pub fn from_path(path: &str) -> Result<InputFormat, ImportError> {
        let p = Path::new(path);
        let ext = p
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("xlsx") | Some("xls") => Ok(InputFormat::Spreadsheet),
            Some("csv") => Ok(InputFormat::Csv),
            _ => Err(ImportError::UnsupportedFormat {
                file_name: p
                    .file_name()
                    .and_then(|f| f.to_str())
                    .unwrap_or(path)
                    .to_string(),
            }),
        }
    }
}

// ******** Output data structures *********

/// The columns of a table that play a role in the construction of the records.
/// Each role is the index of a header in the table.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct ColumnRoles {
    pub surname: Option<usize>,
    pub first_name: Option<usize>,
    pub national_id: Option<usize>,
}

/// A member of a roster, in canonical form.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct MemberRecord {
    pub full_name: String,
    pub national_id: String,
    pub voted: bool,
}

impl MemberRecord {
    pub fn new(full_name: &str, national_id: &str) -> MemberRecord {
        MemberRecord {
            full_name: full_name.to_string(),
            national_id: national_id.to_string(),
            voted: false,
        }
    }

    /// A record entered by hand. All the fields are required.
    pub fn from_parts(surname: &str, first_name: &str, national_id: &str) -> Option<MemberRecord> {
        let (surname, first_name, national_id) =
            (surname.trim(), first_name.trim(), national_id.trim());
        if surname.is_empty() || first_name.is_empty() || national_id.is_empty() {
            return None;
        }
        Some(MemberRecord::new(
            format!("{} {}", surname, first_name).as_str(),
            national_id,
        ))
    }
}

/// Errors that prevent a table from being imported.
///
/// No text meant for the operator is produced here: the variants carry the data
/// needed to build such a message.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ImportError {
    /// The file is neither a spreadsheet nor a CSV file.
    UnsupportedFormat { file_name: String },
    /// No header contains the national ID marker. The normalized headers are
    /// provided in their original order.
    MissingIdColumn { detected_headers: Vec<String> },
}

impl Error for ImportError {}

impl Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::UnsupportedFormat { .. } => write!(f, "ImportError: unsupported format"),
            ImportError::MissingIdColumn { .. } => write!(f, "ImportError: missing id column"),
        }
    }
}
