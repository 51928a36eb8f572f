use log::{debug, info, warn};

use roster_import::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use crate::args::{Args, Command};
use crate::padron::config_reader::*;
use crate::padron::roster::{search, Tally};
use crate::padron::store::{JsonRosterStore, RosterStore, StoredMember};

pub mod config_reader;
mod export;
mod io_common;
mod io_csv;
mod io_excel;
mod roster;
mod store;

#[derive(Debug, Snafu)]
pub enum PadronError {
    #[snafu(display("Unsupported file {file_name}: only Excel (.xlsx, .xls) or CSV (.csv) files can be imported"))]
    UnsupportedFormat { file_name: String },
    #[snafu(display(
        "No national ID column found (a column name containing {marker:?} is required). Columns: {detected_headers:?}"
    ))]
    MissingIdColumn {
        marker: String,
        detected_headers: Vec<String>,
    },

    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("The workbook {path} has no worksheet or no header row"))]
    EmptyExcel { path: String },
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading file {path}"))]
    CsvRead {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("The file {path} has no header row"))]
    EmptyCsv { path: String },

    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing the export"))]
    WritingExport { source: csv::Error },

    #[snafu(display("Unknown operator {operator:?}, expected one of {known:?}"))]
    UnknownOperator { operator: String, known: Vec<String> },
    #[snafu(display("An operator must be provided with --operator"))]
    MissingOperator {},
    #[snafu(display("The surname, the first name and the national ID are all required"))]
    IncompleteMember {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type PadronResult<T> = Result<T, PadronError>;

fn import_error(e: ImportError, markers: &MarkerSet) -> PadronError {
    match e {
        ImportError::UnsupportedFormat { file_name } => {
            PadronError::UnsupportedFormat { file_name }
        }
        ImportError::MissingIdColumn { detected_headers } => PadronError::MissingIdColumn {
            marker: markers.national_id.to_string(),
            detected_headers,
        },
    }
}

/// Reads a roster file into a table. The format is decided from the extension
/// before the file is opened.
pub fn read_table(path: &str) -> PadronResult<RawTable> {
    let format = match InputFormat::from_path(path) {
        Ok(format) => format,
        Err(ImportError::UnsupportedFormat { file_name }) => {
            return UnsupportedFormatSnafu { file_name }.fail();
        }
        Err(e) => whatever!("Cannot read {}: {}", path, e),
    };
    info!("Attempting to read roster file {:?} ({:?})", path, format);
    let table = match format {
        InputFormat::Spreadsheet => io_excel::read_excel_table(path)?,
        InputFormat::Csv => io_csv::read_csv_table(path)?,
    };
    debug!(
        "read_table: headers: {:?} rows: {}",
        table.headers(),
        table.num_rows()
    );
    Ok(table)
}

/// Replaces the roster of an operator with the content of a file.
///
/// Nothing is written unless the whole file could be normalized.
pub fn import_roster(
    store: &mut dyn RosterStore,
    operator: &str,
    path: &str,
    markers: &MarkerSet,
) -> PadronResult<usize> {
    let table = read_table(path)?;
    let records = import_table(&table, markers).map_err(|e| import_error(e, markers))?;
    let count = store.replace_all(operator, &records)?;
    info!(
        "Imported {} members for {} from {} ({} rows)",
        count,
        operator,
        path,
        table.num_rows()
    );
    Ok(count)
}

pub fn add_member(
    store: &mut dyn RosterStore,
    operator: &str,
    surname: &str,
    first_name: &str,
    national_id: &str,
) -> PadronResult<u64> {
    let record =
        MemberRecord::from_parts(surname, first_name, national_id)
            .context(IncompleteMemberSnafu {})?;
    let id = store.insert(operator, &record)?;
    info!("Added member {} {:?} for {}", id, record.full_name, operator);
    Ok(id)
}

fn format_member(m: &StoredMember) -> String {
    format!(
        "{:>6}  {:<40} {:<12} {}",
        m.id,
        m.full_name,
        m.national_id,
        if m.voted { "VOTÓ" } else { "-" }
    )
}

/// The operator the command applies to, checked against the configuration.
fn session_operator(config: &PadronConfig, args: &Args) -> PadronResult<String> {
    let operator = args.operator.clone().context(MissingOperatorSnafu {})?;
    config.check_operator(&operator)?;
    Ok(operator)
}

fn data_directory(config: &PadronConfig, args: &Args) -> PathBuf {
    match &args.data_dir {
        Some(d) => PathBuf::from(d),
        None => config.data_directory_path(args.config.as_deref().map(Path::new)),
    }
}

/// Runs one command of the command line.
pub fn run_command(args: &Args) -> PadronResult<()> {
    let config = match &args.config {
        Some(p) => read_config(p)?,
        None => PadronConfig::default(),
    };
    debug!("config: {:?}", config);
    let markers = config.marker_set()?;

    if let Command::Operators = args.command {
        for op in config.operators.iter() {
            println!("{}", op);
        }
        return Ok(());
    }

    let operator = session_operator(&config, args)?;
    let data_dir = data_directory(&config, args);
    let mut store = JsonRosterStore::new(data_dir);

    match &args.command {
        Command::Operators => {}
        Command::Import { input } => {
            let count = import_roster(&mut store, &operator, input, &markers)?;
            println!("{} members imported", count);
        }
        Command::List { search: query } => {
            let members = store.members(&operator)?;
            let found = search(&members, query.as_deref().unwrap_or(""));
            for m in found.iter() {
                println!("{}", format_member(m));
            }
            let tally = Tally::from_members(&members);
            println!(
                "total: {}  voted: {}  remaining: {}",
                tally.total, tally.voted, tally.remaining
            );
        }
        Command::Vote { id } => {
            if !store.mark_voted(&operator, *id)? {
                warn!("No member with id {} for {}", id, operator);
            }
        }
        Command::Delete { id } => {
            if !store.delete(&operator, *id)? {
                warn!("No member with id {} for {}", id, operator);
            }
        }
        Command::Add {
            surname,
            first_name,
            national_id,
        } => {
            let id = add_member(&mut store, &operator, surname, first_name, national_id)?;
            println!("{}", id);
        }
        Command::Export { out } => {
            let out_path = out
                .clone()
                .unwrap_or_else(|| export::default_file_name(&operator));
            let members = store.members(&operator)?;
            let tally = Tally::from_members(&members);
            let file = fs::File::create(&out_path).context(WritingFileSnafu {
                path: out_path.clone(),
            })?;
            export::write_roster(file, &members, &tally)?;
            info!("Exported {} members to {}", members.len(), out_path);
            println!("{}", out_path);
        }
    }
    Ok(())
}
