// Primitives for reading CSV files.

use std::fs::File;
use std::io::{BufRead, BufReader};

use roster_import::builder::TableBuilder;

use crate::padron::{
    io_common::{decode_field, detect_delimiter},
    *,
};

pub fn read_csv_table(path: &str) -> PadronResult<RawTable> {
    let delimiter = sniff_delimiter(path)?;
    debug!(
        "read_csv_table: path: {:?} delimiter: {:?}",
        path, delimiter as char
    );

    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.into_byte_records();

    let header = match records.next() {
        Some(r) => r.context(CsvLineParseSnafu { lineno: 1usize })?,
        None => return EmptyCsvSnafu { path }.fail(),
    };
    let headers: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let s = decode_field(field);
            if idx == 0 {
                s.trim_start_matches('\u{feff}').to_string()
            } else {
                s
            }
        })
        .collect();
    debug!("read_csv_table: header: {:?}", headers);

    let mut builder = TableBuilder::new(&headers);
    for (idx, line_r) in records.enumerate() {
        // The header is line 1
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let cells: Vec<String> = line.iter().map(decode_field).collect();
        if !builder.add_row_owned(cells) {
            debug!("read_csv_table: lineno: {:?} blank line skipped", lineno);
        }
    }
    Ok(builder.build())
}

fn sniff_delimiter(path: &str) -> PadronResult<u8> {
    let f = File::open(path).context(CsvReadSnafu { path })?;
    let mut first_line: Vec<u8> = Vec::new();
    BufReader::new(f)
        .read_until(b'\n', &mut first_line)
        .context(CsvReadSnafu { path })?;
    Ok(detect_delimiter(&first_line))
}
