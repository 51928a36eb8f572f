/*!
Normalization of member rosters.

Rosters arrive as spreadsheets or CSV files with no fixed layout: the columns may
be named and ordered in any way, and some may be missing. This crate maps such a
table onto canonical [`MemberRecord`]s:

```
use roster_import::builder::TableBuilder;
use roster_import::*;

let mut builder = TableBuilder::new(&["Apellido", "Nombre", "DNI"]);
builder.add_row(&["Gomez", "Ana", "111"]);
builder.add_row(&["Gomez", "Ana", "111"]);
builder.add_row(&["Diaz", "Luis", "222"]);

let records = import_table(&builder.build(), &MarkerSet::DEFAULT_MARKERS)?;
assert_eq!(records, vec![
    MemberRecord::new("Gomez Ana", "111"),
    MemberRecord::new("Diaz Luis", "222"),
]);
# Ok::<(), ImportError>(())
```

Reading the files themselves is left to the caller, see the [`manual`].
*/

pub mod builder;
mod config;
pub mod manual;

use log::{debug, info};
use std::collections::HashSet;

pub use crate::config::*;

/// Reduces a header to the form used for matching: lower case, no surrounding
/// whitespace, no spaces or underscores.
pub fn normalize_header(header: &str) -> String {
    header
        .to_lowercase()
        .trim()
        .chars()
        .filter(|c| *c != ' ' && *c != '_')
        .collect()
}

/// Finds the columns holding the surname, the first name and the national ID.
///
/// For each role, the first header (from the left) that contains the marker wins.
/// The surname is resolved before the first name, and a column cannot hold both:
/// a header like `Apellido y Nombre` is the surname column and the search for the
/// first name continues with the other columns. The national ID is searched over
/// all the headers, so `Nombre y DNI` can be both the first name and the ID.
pub fn resolve_columns<S: AsRef<str>>(headers: &[S], markers: &MarkerSet) -> ColumnRoles {
    let normalized: Vec<String> = headers
        .iter()
        .map(|h| normalize_header(h.as_ref()))
        .collect();
    debug!("resolve_columns: normalized headers: {:?}", normalized);

    let find = |marker: &str, skip: Option<usize>| -> Option<usize> {
        normalized
            .iter()
            .enumerate()
            .find(|(idx, h)| Some(*idx) != skip && h.contains(marker))
            .map(|(idx, _)| idx)
    };

    let surname = find(&markers.surname, None);
    let first_name = find(&markers.first_name, surname);
    let national_id = find(&markers.national_id, None);
    let roles = ColumnRoles {
        surname,
        first_name,
        national_id,
    };
    debug!("resolve_columns: roles: {:?}", roles);
    roles
}

/// Builds the records of a table, given the roles of its columns.
///
/// When neither name column was found, the first column is taken to hold the full
/// name. Both fields are trimmed, and rows repeating an earlier (name, id) pair are
/// dropped. The order of the rows is preserved.
pub fn normalize_records(
    table: &RawTable,
    roles: &ColumnRoles,
) -> Result<Vec<MemberRecord>, ImportError> {
    let id_col = match roles.national_id {
        Some(idx) => idx,
        None => {
            return Err(ImportError::MissingIdColumn {
                detected_headers: table
                    .headers()
                    .iter()
                    .map(|h| normalize_header(h))
                    .collect(),
            });
        }
    };

    let name_fallback = roles.surname.is_none() && roles.first_name.is_none();
    if name_fallback {
        info!(
            "No surname or first name column, using column {:?} as the full name",
            table.headers().first()
        );
    }

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut res: Vec<MemberRecord> = Vec::new();
    for row_idx in 0..table.num_rows() {
        let name = if name_fallback {
            table.cell(row_idx, 0).to_string()
        } else {
            let surname = roles.surname.map(|c| table.cell(row_idx, c)).unwrap_or("");
            let first_name = roles
                .first_name
                .map(|c| table.cell(row_idx, c))
                .unwrap_or("");
            format!("{} {}", surname, first_name)
        };
        let name = name.trim().to_string();
        let id = table.cell(row_idx, id_col).trim().to_string();

        if seen.insert((name.clone(), id.clone())) {
            res.push(MemberRecord::new(&name, &id));
        } else {
            debug!(
                "normalize_records: row {}: duplicate {:?} {:?}",
                row_idx, name, id
            );
        }
    }
    info!(
        "normalize_records: {} records out of {} rows",
        res.len(),
        table.num_rows()
    );
    Ok(res)
}

/// Resolves the columns of a table and builds its records.
pub fn import_table(
    table: &RawTable,
    markers: &MarkerSet,
) -> Result<Vec<MemberRecord>, ImportError> {
    let roles = resolve_columns(table.headers(), markers);
    normalize_records(table, &roles)
}
