// Primitives for reading CSV files.

use crate::tabulate::{
    io_common::{make_default_id, parse_count, parse_rank},
    *,
};

pub fn read_csv_likert(path: &str, cfs: &FileSource) -> BTabResult<ElectionData> {
    info!("Attempting to read csv file {:?}", path);
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    read_likert_records(rdr.into_records(), cfs, path)
}

/// Reads a table with one column per candidate. The header holds the names of the
/// candidates and each cell holds the rank of this candidate in the ballot.
pub fn read_likert_records<I>(records: I, cfs: &FileSource, path: &str) -> BTabResult<ElectionData>
where
    I: Iterator<Item = Result<csv::StringRecord, csv::Error>>,
{
    let default_id = make_default_id(path);
    let id_idx_o = cfs.id_column_index_int()?;
    let count_idx_o = cfs.count_column_index_int()?;
    let choices_start_col = cfs.first_vote_column_index()?;
    let header_row = cfs.first_vote_row_index()? - 1;

    let mut records = records.enumerate().skip(header_row);
    let (_, header_r) = records.next().context(CsvMissingHeaderSnafu {})?;
    let header = header_r.context(CsvLineParseSnafu {})?;
    let columns = candidate_columns(header.iter(), choices_start_col);
    debug!("read_likert_records: columns: {:?}", columns);

    let mut res: Vec<ParsedBallot> = Vec::new();
    for (idx, line_r) in records {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu {})?;
        let id = if let Some(id_idx) = id_idx_o {
            line.get(id_idx)
                .context(CsvLineTooShortSnafu { lineno })?
                .to_string()
        } else {
            default_id(lineno)
        };

        let count: u64 = if let Some(count_idx) = count_idx_o {
            let cell = line
                .get(count_idx)
                .context(CsvLineTooShortSnafu { lineno })?;
            parse_count(cell, lineno)?
        } else {
            1
        };

        let mut choices: Vec<(i64, String)> = Vec::new();
        for (col, name) in columns.iter() {
            // Missing trailing cells are not ranked.
            if let Some(rank) = parse_rank(line.get(*col).unwrap_or(""), lineno)? {
                choices.push((rank, name.clone()));
            }
        }
        debug!(
            "read_likert_records: lineno: {:?} choices: {:?}",
            lineno, &choices
        );

        res.push(ParsedBallot {
            id: Some(id),
            count: Some(count),
            choices,
        });
    }

    Ok(ElectionData {
        declared_candidates: None,
        candidates: columns.into_iter().map(|(_, name)| name).collect(),
        ballots: res,
    })
}

/// The columns holding ranks, and the candidate named in the header for each of them.
pub fn candidate_columns<'a>(
    header: impl Iterator<Item = &'a str>,
    choices_start_col: usize,
) -> Vec<(usize, String)> {
    header
        .enumerate()
        .skip(choices_start_col)
        .filter_map(|(col, cell)| {
            let name = cell.trim();
            if name.is_empty() {
                warn!("candidate_columns: column {} has no name, skipping it", col + 1);
                None
            } else {
                Some((col, name.to_string()))
            }
        })
        .collect()
}
