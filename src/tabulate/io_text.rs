// Reader for the line-based election format.
//
// 3            <- number of candidates
// Alice        <- one name per line
// Bob
// Charlie
// 2            <- number of ballots
// 1 Alice      <- <rank> <name>
// 2 Charlie
// 0            <- end of the ballot
// ...
//
// Blank lines are ignored.

use crate::tabulate::{io_common::make_default_id, *};

pub fn read_text_election(path: &str) -> BTabResult<ElectionData> {
    info!("Attempting to read text file {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningTextSnafu { path })?;
    parse_text_election(&contents, path)
}

pub fn parse_text_election(contents: &str, path: &str) -> BTabResult<ElectionData> {
    let default_id = make_default_id(path);
    let mut lines = contents
        .lines()
        .enumerate()
        .map(|(idx, l)| (idx + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let declared = read_number(lines.next(), "the number of candidates")?;
    if declared < 0 {
        // The tabulation reports the invalid count.
        return Ok(ElectionData {
            declared_candidates: Some(declared),
            candidates: vec![],
            ballots: vec![],
        });
    }

    let mut candidates: Vec<String> = Vec::new();
    for _ in 0..declared {
        let (_, name) = lines.next().context(TextUnexpectedEndSnafu {
            expected: "a candidate name",
        })?;
        candidates.push(name.to_string());
    }
    debug!("parse_text_election: candidates: {:?}", candidates);

    let num_ballots = read_number(lines.next(), "the number of ballots")?;
    if num_ballots < 0 {
        return Err(Box::new(TabulateError::NegativeBallotCount { num_ballots }));
    }

    let mut ballots: Vec<ParsedBallot> = Vec::new();
    for _ in 0..num_ballots {
        let mut choices: Vec<(i64, String)> = Vec::new();
        let mut first_line: Option<usize> = None;
        loop {
            let (lineno, line) = lines.next().context(TextUnexpectedEndSnafu {
                expected: "a ranking or the end of a ballot",
            })?;
            first_line.get_or_insert(lineno);
            let (rank_s, name) = line
                .split_once(char::is_whitespace)
                .unwrap_or((line, ""));
            let rank = rank_s
                .parse::<i64>()
                .ok()
                .context(TextParseNumberSnafu {
                    lineno,
                    content: line,
                })?;
            if rank <= 0 {
                break;
            }
            let name = name.trim();
            if name.is_empty() {
                return Err(Box::new(TabulateError::TextMissingName { lineno }));
            }
            choices.push((rank, name.to_string()));
        }
        debug!("parse_text_election: choices: {:?}", choices);
        ballots.push(ParsedBallot {
            id: first_line.map(&default_id),
            count: Some(1),
            choices,
        });
    }

    if let Some((lineno, _)) = lines.next() {
        warn!(
            "parse_text_election: ignoring the content after line {} (all {} ballots read)",
            lineno, num_ballots
        );
    }

    Ok(ElectionData {
        declared_candidates: Some(declared),
        candidates,
        ballots,
    })
}

fn read_number(line: Option<(usize, &str)>, expected: &str) -> BTabResult<i64> {
    let (lineno, content) = line.context(TextUnexpectedEndSnafu { expected })?;
    let x = content
        .parse::<i64>()
        .ok()
        .context(TextParseNumberSnafu { lineno, content })?;
    Ok(x)
}
