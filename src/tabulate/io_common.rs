use std::path::Path;

use crate::tabulate::*;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

pub fn make_default_id(path: &str) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(path);
    move |lineno| format!("{}-{:08}", simplified_file_name, lineno)
}

/// Reads the content of a rank cell.
///
/// Empty cells and non-positive ranks mean that the candidate was not ranked.
pub fn parse_rank(cell: &str, lineno: usize) -> BTabResult<Option<i64>> {
    let s = cell.trim();
    if s.is_empty() {
        return Ok(None);
    }
    let rank: i64 = match s.parse::<i64>() {
        Ok(x) => x,
        // Spreadsheets tend to export integers as floats.
        Err(_) => match s.parse::<f64>() {
            Ok(f) if f.fract() == 0.0 => f as i64,
            _ => {
                return Err(Box::new(TabulateError::InvalidRank {
                    lineno,
                    content: cell.to_string(),
                }))
            }
        },
    };
    if rank <= 0 {
        warn!(
            "parse_rank: line {}: rank {} is not positive, candidate treated as not ranked",
            lineno, rank
        );
        return Ok(None);
    }
    Ok(Some(rank))
}

pub fn parse_count(cell: &str, lineno: usize) -> BTabResult<u64> {
    let s = cell.trim();
    match s.parse::<u64>() {
        Ok(x) => Ok(x),
        Err(_) => match s.parse::<f64>() {
            Ok(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as u64),
            _ => Err(Box::new(TabulateError::InvalidCount {
                lineno,
                content: cell.to_string(),
            })),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks() {
        assert_eq!(parse_rank(" 2 ", 1).unwrap(), Some(2));
        assert_eq!(parse_rank("3.0", 1).unwrap(), Some(3));
        assert_eq!(parse_rank("", 1).unwrap(), None);
        assert_eq!(parse_rank("0", 1).unwrap(), None);
        assert!(parse_rank("first", 4).is_err());
        assert!(parse_rank("1.5", 4).is_err());
    }

    #[test]
    fn counts() {
        assert_eq!(parse_count("20", 1).unwrap(), 20);
        assert_eq!(parse_count("7.0", 1).unwrap(), 7);
        assert!(parse_count("-1", 1).is_err());
    }

    #[test]
    fn default_ids() {
        let f = make_default_id("/tmp/data/ballots.csv");
        assert_eq!(f(12), "ballots.csv-00000012");
    }
}
