use log::{debug, info, warn};

use schulze_voting::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

mod config_reader;
mod io_common;
mod io_csv;
mod io_text;
mod io_xlsx;

use crate::tabulate::config_reader::*;

#[derive(Debug, Snafu)]
pub enum TabulateError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file has no worksheet or no header row"))]
    EmptyExcel {},
    #[snafu(display("Worksheet {name} not found"))]
    MissingWorksheet { name: String },
    #[snafu(display("Line {lineno}: could not read the cell: {content}"))]
    ExcelWrongCellType { lineno: usize, content: String },

    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a positive number or a column letter"))]
    ParsingJsonNumber {},
    #[snafu(display("The first vote row must leave room for the header row"))]
    MissingHeaderRow {},
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Unknown provider {provider}"))]
    UnknownProvider { provider: String },
    #[snafu(display("No ballots: provide an input file or a configuration with file sources"))]
    MissingInput {},

    #[snafu(display("Error opening file {path}"))]
    OpeningText {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Unexpected end of file, expected {expected}"))]
    TextUnexpectedEnd { expected: String },
    #[snafu(display("Line {lineno}: expected a number, found {content:?}"))]
    TextParseNumber { lineno: usize, content: String },
    #[snafu(display("Line {lineno}: a rank must be followed by a candidate name"))]
    TextMissingName { lineno: usize },
    #[snafu(display("The number of ballots may not be negative, but it was {num_ballots}"))]
    NegativeBallotCount { num_ballots: i64 },

    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading a line of the CSV file"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Line {lineno}: the line is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("The file has no header row"))]
    CsvMissingHeader {},

    #[snafu(display("Line {lineno}: invalid rank {content:?}"))]
    InvalidRank { lineno: usize, content: String },
    #[snafu(display("Line {lineno}: invalid count {content:?}"))]
    InvalidCount { lineno: usize, content: String },

    #[snafu(display("Tabulation failed"))]
    Voting { source: VotingErrors },

    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},
}

pub type BTabResult<T> = Result<T, Box<TabulateError>>;

/// A ballot, as parsed by the readers.
/// The names of the candidates are checked during the tabulation.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedBallot {
    pub id: Option<String>,
    pub count: Option<u64>,
    pub choices: Vec<(i64, String)>,
}

/// The content of an input file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionData {
    /// The number of candidates announced by the file, if the format has one.
    pub declared_candidates: Option<i64>,
    /// The candidates named by the file, in order.
    pub candidates: Vec<String>,
    pub ballots: Vec<ParsedBallot>,
}

/// Options of the command line that do not go through a configuration file.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RunOptions {
    pub input: Option<String>,
    pub input_type: Option<String>,
    pub candidates: Option<Vec<String>>,
    pub excel_worksheet_name: Option<String>,
    pub out: Option<String>,
    pub reference: Option<String>,
}

// Ballots with a count of 0 are kept: they add nothing, but their names are still checked.
fn validate_ballots(parsed_ballots: &[ParsedBallot]) -> Vec<Ballot> {
    let mut res: Vec<Ballot> = Vec::new();
    for pb in parsed_ballots.iter() {
        // Default of 1 if not specified
        let count = pb.count.unwrap_or(1);
        if count == 0 {
            debug!("validate_ballots: ballot {:?} has a count of 0", pb.id);
        }
        let entries: Vec<BallotEntry> = pb
            .choices
            .iter()
            .map(|(rank, name)| BallotEntry::new(*rank, name))
            .collect();
        res.push(Ballot { entries, count });
    }
    res
}

fn read_ranking_data(root_path: Option<&Path>, cfs: &FileSource) -> BTabResult<ElectionData> {
    let p: PathBuf = match root_path {
        Some(root) => root.join(&cfs.file_path),
        None => PathBuf::from(&cfs.file_path),
    };
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read rank file {:?}", p2);
    match cfs.provider.as_str() {
        "text" => io_text::read_text_election(&p2),
        "csv_likert" => io_csv::read_csv_likert(&p2, cfs),
        "xlsx_likert" => io_xlsx::read_xlsx_likert(&p2, cfs),
        x => Err(Box::new(TabulateError::UnknownProvider {
            provider: x.to_string(),
        })),
    }
}

/// Runs the tabulation on the ballots of all the sources.
///
/// The registered candidates take precedence over the names found in the files.
fn tabulate(registered: &[String], sources: &[ElectionData]) -> BTabResult<VotingResult> {
    let names: Vec<String> = if !registered.is_empty() {
        registered.to_vec()
    } else {
        sources
            .iter()
            .map(|d| d.candidates.clone())
            .find(|c| !c.is_empty())
            .unwrap_or_default()
    };
    let candidates: Vec<Candidate> = names.iter().map(|n| Candidate::new(n)).collect();

    let mut ballots: Vec<Ballot> = Vec::new();
    for data in sources.iter() {
        ballots.append(&mut validate_ballots(&data.ballots));
    }
    info!("tabulate: {} ballots from {} sources", ballots.len(), sources.len());

    // A single source announcing its own candidates is checked against its count.
    let res = match sources {
        [ElectionData {
            declared_candidates: Some(declared),
            ..
        }] if registered.is_empty() => run_election(*declared, &candidates, &ballots),
        _ => run_schulze(&ballots, &candidates),
    };
    res.context(VotingSnafu {}).map_err(Box::new)
}

fn result_to_json(rv: &VotingResult) -> JSValue {
    let ranking: Vec<JSValue> = rv
        .ranking
        .iter()
        .map(|rc| json!({"name": rc.name, "wins": rc.wins}))
        .collect();
    json!({
        "ballots": rv.num_ballots,
        "ranking": ranking,
        "winners": rv.winners,
        "pairwise": rv.pairwise.to_rows(),
        "paths": rv.paths.to_rows()
    })
}

fn build_summary_js(settings: &OutputSettings, rv: &VotingResult) -> JSValue {
    let c = OutputConfig {
        contest: settings.contest_name.clone(),
        date: settings.contest_date.clone(),
        jurisdiction: settings.contest_jurisdiction.clone(),
        office: settings.contest_office.clone(),
    };
    json!({
        "config": c,
        "results": result_to_json(rv) })
}

/// The ranking, as printed by the command line: one `Name (k wins)` line per candidate.
pub fn format_ranking(rv: &VotingResult) -> String {
    rv.ranking
        .iter()
        .map(|rc| format!("{} ({} wins)\n", rc.name, rc.wins))
        .collect()
}

fn write_outputs(summary: &JSValue, rv: &VotingResult, out: Option<&str>) -> BTabResult<()> {
    let pretty_js_stats = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    match out {
        Some("stdout") => {
            println!("{}", pretty_js_stats);
        }
        Some(path) => {
            print!("{}", format_ranking(rv));
            info!("Writing summary to {:?}", path);
            fs::write(path, pretty_js_stats).context(WritingOutputSnafu { path })?;
        }
        None => {
            print!("{}", format_ranking(rv));
        }
    }
    Ok(())
}

fn check_reference(summary: &JSValue, reference_path: &str) -> BTabResult<()> {
    let summary_ref = read_summary(reference_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    let pretty_js_stats = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(
            pretty_js_summary_ref.as_str(),
            pretty_js_stats.as_ref(),
            "\n",
        );
        return Err(Box::new(TabulateError::ReferenceMismatch {}));
    }
    info!("The summary matches the reference {:?}", reference_path);
    Ok(())
}

fn finish(settings: &OutputSettings, rv: &VotingResult, opts: &RunOptions) -> BTabResult<()> {
    let summary = build_summary_js(settings, rv);
    write_outputs(&summary, rv, opts.out.as_deref())?;
    if let Some(reference) = opts.reference.as_deref() {
        check_reference(&summary, reference)?;
    }
    Ok(())
}

/// Runs an election described by a configuration file.
///
/// The input file given in the options replaces the file sources of the configuration.
pub fn run_election_config(config_path: &str, opts: &RunOptions) -> BTabResult<()> {
    let config = read_config(config_path)?;
    info!("config: {:?}", config);
    let root_p = Path::new(config_path)
        .parent()
        .context(MissingParentDirSnafu {})?;

    let sources: Vec<FileSource> = match opts.input.as_deref() {
        Some(input) => vec![command_line_source(input, opts)],
        None => config.cvr_file_sources.clone(),
    };
    if sources.is_empty() {
        return Err(Box::new(TabulateError::MissingInput {}));
    }

    let mut data: Vec<ElectionData> = Vec::new();
    for cfs in sources.iter() {
        let root = if opts.input.is_some() { None } else { Some(root_p) };
        data.push(read_ranking_data(root, cfs)?);
    }

    let registered: Vec<String> = match opts.candidates.clone() {
        Some(names) => names,
        None => config.candidates.iter().map(|c| c.name.clone()).collect(),
    };
    let result = tabulate(&registered, &data)?;

    let mut opts2 = opts.clone();
    if opts2.out.is_none() {
        if let Some(dir) = config.output_settings.output_directory.as_deref() {
            let p: PathBuf = root_p
                .join(dir)
                .join(format!("{}_summary.json", config.output_settings.contest_name));
            opts2.out = Some(p.display().to_string());
        }
    }
    finish(&config.output_settings, &result, &opts2)
}

/// Runs an election from a single input file.
pub fn run_election_input(opts: &RunOptions) -> BTabResult<()> {
    let input = opts.input.as_deref().context(MissingInputSnafu {})?;
    let cfs = command_line_source(input, opts);
    let data = read_ranking_data(None, &cfs)?;
    let registered = opts.candidates.clone().unwrap_or_default();
    let result = tabulate(&registered, &[data])?;
    let settings = OutputSettings {
        contest_name: io_common::simplify_file_name(input),
        ..Default::default()
    };
    finish(&settings, &result, opts)
}

fn command_line_source(input: &str, opts: &RunOptions) -> FileSource {
    let mut cfs = FileSource::from_path(opts.input_type.as_deref().unwrap_or("text"), input);
    cfs.excel_worksheet_name = opts.excel_worksheet_name.clone();
    cfs
}
