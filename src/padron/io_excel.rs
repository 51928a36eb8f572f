use calamine::{open_workbook_auto, Reader};
use roster_import::builder::TableBuilder;

use crate::padron::{io_common::cell_text, *};

/// Reads the first worksheet of an Excel workbook (.xlsx or .xls).
pub fn read_excel_table(path: &str) -> PadronResult<RawTable> {
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;
    let wrange = workbook
        .worksheet_range_at(0)
        .context(EmptyExcelSnafu { path })?
        .context(OpeningExcelSnafu { path })?;

    let mut iter = wrange.rows();
    let header: Vec<String> = iter
        .next()
        .context(EmptyExcelSnafu { path })?
        .iter()
        .map(cell_text)
        .collect();
    debug!("read_excel_table: header: {:?}", header);

    let mut builder = TableBuilder::new(&header);
    for (idx, row) in iter.enumerate() {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        if !builder.add_row_owned(cells) {
            // Rows are counted from 1, the header being row 1
            debug!("read_excel_table: row {:?} is blank, skipped", idx + 2);
        }
    }
    Ok(builder.build())
}
