use crate::tabulate::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
    #[serde(rename = "contestJurisdiction")]
    pub contest_jurisdiction: Option<String>,
    #[serde(rename = "contestOffice")]
    pub contest_office: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub date: Option<String>,
    pub jurisdiction: Option<String>,
    pub office: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "firstVoteColumnIndex")]
    pub _first_vote_column_index: Option<JSValue>,
    #[serde(rename = "firstVoteRowIndex")]
    pub _first_vote_row_index: Option<JSValue>,
    #[serde(rename = "idColumnIndex")]
    pub id_column_index: Option<JSValue>,
    #[serde(rename = "countColumnIndex")]
    pub count_column_index: Option<JSValue>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl FileSource {
    /// A source for a single file, as given on the command line.
    pub fn from_path(provider: &str, file_path: &str) -> FileSource {
        FileSource {
            provider: provider.to_string(),
            file_path: file_path.to_string(),
            ..Default::default()
        }
    }

    /// The first column holding ranks (0-based). Defaults to the first column
    /// after the id and count columns.
    pub fn first_vote_column_index(&self) -> BTabResult<usize> {
        if self._first_vote_column_index.is_some() {
            let x = read_js_int(&self._first_vote_column_index)?;
            return one_based(x);
        }
        let id_idx = self.id_column_index_int()?.map(|x| x + 1).unwrap_or(0);
        let count_idx = self.count_column_index_int()?.map(|x| x + 1).unwrap_or(0);
        Ok(id_idx.max(count_idx))
    }

    /// The first row holding a ballot (0-based). The row before it is the header.
    pub fn first_vote_row_index(&self) -> BTabResult<usize> {
        if self._first_vote_row_index.is_some() {
            let x = read_js_int(&self._first_vote_row_index)?;
            let idx = one_based(x)?;
            if idx == 0 {
                return Err(Box::new(TabulateError::MissingHeaderRow {}));
            }
            Ok(idx)
        } else {
            Ok(1)
        }
    }

    pub fn id_column_index_int(&self) -> BTabResult<Option<usize>> {
        if self.id_column_index.is_some() {
            read_js_int(&self.id_column_index)
                .and_then(one_based)
                .map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn count_column_index_int(&self) -> BTabResult<Option<usize>> {
        if self.count_column_index.is_some() {
            read_js_int(&self.count_column_index)
                .and_then(one_based)
                .map(Some)
        } else {
            Ok(None)
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ConfigCandidate {
    pub name: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "cvrFileSources")]
    pub cvr_file_sources: Vec<FileSource>,
    #[serde(default)]
    pub candidates: Vec<ConfigCandidate>,
}

pub fn read_config(path: &str) -> BTabResult<ElectionConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: ElectionConfig =
        serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> BTabResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_summary: {:?}", js);
    Ok(js)
}

fn one_based(x: usize) -> BTabResult<usize> {
    x.checked_sub(1)
        .context(ParsingJsonNumberSnafu {})
        .map_err(Box::new)
}

// Indexes start at 1, either as numbers or as Excel-style column letters.
fn read_js_int(x: &Option<JSValue>) -> BTabResult<usize> {
    let res = match x {
        Some(JSValue::Number(n)) => n.as_u64().map(|x| x as usize),
        Some(JSValue::String(s)) if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic()) => {
            s.to_ascii_lowercase().chars().try_fold(0usize, |acc, c| {
                acc.checked_mul(26)?
                    .checked_add((c as usize) - ('a' as usize) + 1)
            })
        }
        Some(JSValue::String(s)) => s.parse::<usize>().ok(),
        _ => None,
    };
    Ok(res.context(ParsingJsonNumberSnafu {})?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn column_indexes() {
        assert_eq!(read_js_int(&Some(json!(3))).unwrap(), 3);
        assert_eq!(read_js_int(&Some(json!("12"))).unwrap(), 12);
        assert_eq!(read_js_int(&Some(json!("C"))).unwrap(), 3);
        assert_eq!(read_js_int(&Some(json!("aa"))).unwrap(), 27);
        assert!(read_js_int(&Some(json!(-1))).is_err());
        assert!(read_js_int(&None).is_err());
        assert!(one_based(0).is_err());
    }

    #[test]
    fn very_long_column_letters() {
        assert_eq!(read_js_int(&Some(json!("ZZ"))).unwrap(), 702);
        let res = read_js_int(&Some(json!("A".repeat(20))));
        assert!(matches!(
            *res.unwrap_err(),
            TabulateError::ParsingJsonNumber {}
        ));
    }

    #[test]
    fn default_columns() {
        let mut cfs = FileSource::from_path("csv_likert", "x.csv");
        assert_eq!(cfs.first_vote_column_index().unwrap(), 0);
        assert_eq!(cfs.first_vote_row_index().unwrap(), 1);
        cfs.id_column_index = Some(json!(1));
        cfs.count_column_index = Some(json!("B"));
        assert_eq!(cfs.first_vote_column_index().unwrap(), 2);
        assert_eq!(cfs.count_column_index_int().unwrap(), Some(1));
        cfs._first_vote_column_index = Some(json!(5));
        assert_eq!(cfs.first_vote_column_index().unwrap(), 4);
        cfs._first_vote_row_index = Some(json!(1));
        assert!(cfs.first_vote_row_index().is_err());
    }

    #[test]
    fn parse_config() {
        let js = r#"{
            "outputSettings": {"contestName": "Board", "contestDate": "2022-10-01"},
            "cvrFileSources": [{"provider": "text", "filePath": "ballots.txt"}],
            "candidates": [{"name": "Alice"}, {"name": "Bob"}]
        }"#;
        let config: ElectionConfig = serde_json::from_str(js).unwrap();
        assert_eq!(config.output_settings.contest_name, "Board");
        assert_eq!(config.cvr_file_sources[0].provider, "text");
        assert_eq!(config.candidates.len(), 2);
    }
}
