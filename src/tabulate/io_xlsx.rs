use calamine::{open_workbook, DataType, Range, Reader, Xlsx};

use crate::tabulate::{
    io_common::{make_default_id, parse_count, parse_rank},
    io_csv::candidate_columns,
    *,
};

/// Same layout as the csv_likert format, in an Excel worksheet.
// TODO: accept the transposed layout (one row per candidate) exported by some form tools.
pub fn read_xlsx_likert(path: &str, cfs: &FileSource) -> BTabResult<ElectionData> {
    let wrange = get_range(path, cfs)?;
    read_likert_range(&wrange, cfs, path)
}

fn read_likert_range(
    wrange: &Range<DataType>,
    cfs: &FileSource,
    path: &str,
) -> BTabResult<ElectionData> {
    let default_id = make_default_id(path);
    let id_idx_o = cfs.id_column_index_int()?;
    let count_idx_o = cfs.count_column_index_int()?;
    let choices_start_col = cfs.first_vote_column_index()?;
    let header_row = cfs.first_vote_row_index()? - 1;

    let mut iter = wrange.rows().enumerate().skip(header_row);
    let (_, header) = iter.next().context(EmptyExcelSnafu {})?;
    let header_names: Vec<String> = header.iter().map(cell_to_string).collect();
    let columns = candidate_columns(header_names.iter().map(|s| s.as_str()), choices_start_col);
    debug!("read_likert_range: columns: {:?}", columns);

    let mut res: Vec<ParsedBallot> = Vec::new();
    for (idx, row) in iter {
        let lineno = idx + 1;
        debug!("read_likert_range: lineno: {:?} row: {:?}", lineno, row);
        let id = match id_idx_o {
            Some(id_idx) => row
                .get(id_idx)
                .map(cell_to_string)
                .context(ExcelWrongCellTypeSnafu {
                    lineno,
                    content: format!("{:?}", row),
                })?,
            None => default_id(lineno),
        };
        let count: u64 = match count_idx_o {
            Some(count_idx) => {
                let cell = row.get(count_idx).map(cell_to_string).unwrap_or_default();
                parse_count(&cell, lineno)?
            }
            None => 1,
        };

        let mut choices: Vec<(i64, String)> = Vec::new();
        for (col, name) in columns.iter() {
            let rank = match row.get(*col) {
                None | Some(DataType::Empty) => None,
                Some(DataType::Int(i)) => parse_rank(&i.to_string(), lineno)?,
                Some(DataType::Float(f)) => parse_rank(&f.to_string(), lineno)?,
                Some(DataType::String(s)) => parse_rank(s, lineno)?,
                Some(v) => {
                    return Err(Box::new(TabulateError::ExcelWrongCellType {
                        lineno,
                        content: format!("{:?} IN {:?}", v, row),
                    }));
                }
            };
            if let Some(rank) = rank {
                choices.push((rank, name.clone()));
            }
        }

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

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => "".to_string(),
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        x => format!("{:?}", x),
    }
}

fn get_range(path: &str, cfs: &FileSource) -> BTabResult<Range<DataType>> {
    let worksheet_name_o = cfs.excel_worksheet_name.clone();
    info!(
        "Attempting to read excel file {:?} worksheet: {:?}",
        path, &worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(&worksheet_name)
            .context(MissingWorksheetSnafu {
                name: worksheet_name.clone(),
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let wrange = workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu {})?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sheet(rows: &[Vec<DataType>]) -> Range<DataType> {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(1);
        let mut r = Range::new((0, 0), (rows.len() as u32 - 1, width as u32 - 1));
        for (i, row) in rows.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                r.set_value((i as u32, j as u32), cell.clone());
            }
        }
        r
    }

    fn s(x: &str) -> DataType {
        DataType::String(x.to_string())
    }

    #[test]
    fn cell_types() {
        let cfs = FileSource::from_path("xlsx_likert", "test.xlsx");
        let wrange = sheet(&[
            vec![s("A"), s("B"), s("C"), s("D")],
            vec![
                DataType::Int(1),
                DataType::Float(2.0),
                s(" 3 "),
                DataType::Empty,
            ],
            vec![DataType::Float(0.0), s(""), DataType::Int(-1), DataType::Int(1)],
        ]);
        let data = read_likert_range(&wrange, &cfs, "test.xlsx").unwrap();
        assert_eq!(data.candidates, vec!["A", "B", "C", "D"]);
        assert_eq!(
            data.ballots[0].choices,
            vec![
                (1, "A".to_string()),
                (2, "B".to_string()),
                (3, "C".to_string())
            ]
        );
        assert_eq!(data.ballots[0].id, Some("test.xlsx-00000002".to_string()));
        assert_eq!(data.ballots[1].choices, vec![(1, "D".to_string())]);
    }

    #[test]
    fn fractional_and_boolean_ranks_are_rejected() {
        let cfs = FileSource::from_path("xlsx_likert", "test.xlsx");
        let wrange = sheet(&[vec![s("A"), s("B")], vec![DataType::Float(1.5), DataType::Int(1)]]);
        assert!(matches!(
            *read_likert_range(&wrange, &cfs, "test.xlsx").unwrap_err(),
            TabulateError::InvalidRank { lineno: 2, .. }
        ));

        let wrange = sheet(&[
            vec![s("A"), s("B")],
            vec![DataType::Int(1), DataType::Int(2)],
            vec![DataType::Bool(true), DataType::Int(1)],
        ]);
        assert!(matches!(
            *read_likert_range(&wrange, &cfs, "test.xlsx").unwrap_err(),
            TabulateError::ExcelWrongCellType { lineno: 3, .. }
        ));
    }

    #[test]
    fn id_and_count_cells() {
        let mut cfs = FileSource::from_path("xlsx_likert", "test.xlsx");
        cfs.id_column_index = Some(json!(1));
        cfs.count_column_index = Some(json!("B"));
        let wrange = sheet(&[
            vec![s("id"), s("count"), s("A"), s("B")],
            vec![DataType::Int(17), DataType::Float(3.0), DataType::Empty, DataType::Int(1)],
        ]);
        let data = read_likert_range(&wrange, &cfs, "test.xlsx").unwrap();
        assert_eq!(data.candidates, vec!["A", "B"]);
        assert_eq!(data.ballots[0].id, Some("17".to_string()));
        assert_eq!(data.ballots[0].count, Some(3));
        assert_eq!(data.ballots[0].choices, vec![(1, "B".to_string())]);
    }

    #[test]
    fn cells_as_text() {
        assert_eq!(cell_to_string(&DataType::Empty), "");
        assert_eq!(cell_to_string(&DataType::Int(4)), "4");
        assert_eq!(cell_to_string(&DataType::Float(2.0)), "2");
        assert_eq!(cell_to_string(&DataType::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&DataType::Bool(false)), "false");
        assert_eq!(cell_to_string(&s("x")), "x");
    }

    #[test]
    fn workbook_on_disk() {
        let mut cfs = FileSource::from_path("xlsx_likert", "demos/likert.xlsx");
        cfs.id_column_index = Some(json!(1));
        cfs.count_column_index = Some(json!(2));
        let data = read_xlsx_likert("demos/likert.xlsx", &cfs).unwrap();
        assert_eq!(data.candidates, vec!["A", "B", "C"]);
        assert_eq!(data.ballots.len(), 3);
        assert_eq!(data.ballots[0].id, Some("v1".to_string()));
        assert_eq!(data.ballots[0].count, Some(2));
        assert_eq!(
            data.ballots[0].choices,
            vec![
                (1, "A".to_string()),
                (2, "B".to_string()),
                (3, "C".to_string())
            ]
        );
        assert_eq!(
            data.ballots[1].choices,
            vec![(3, "A".to_string()), (1, "C".to_string())]
        );
        assert_eq!(
            data.ballots[2].choices,
            vec![(2, "A".to_string()), (1, "B".to_string())]
        );

        cfs.excel_worksheet_name = Some("Ballots".to_string());
        assert!(read_xlsx_likert("demos/likert.xlsx", &cfs).is_ok());
    }

    #[test]
    fn worksheet_lookup_errors() {
        let mut cfs = FileSource::from_path("xlsx_likert", "demos/likert.xlsx");
        cfs.excel_worksheet_name = Some("Votes".to_string());
        assert!(matches!(
            *read_xlsx_likert("demos/likert.xlsx", &cfs).unwrap_err(),
            TabulateError::MissingWorksheet { ref name } if name == "Votes"
        ));
        assert!(matches!(
            *read_xlsx_likert("demos/missing.xlsx", &cfs).unwrap_err(),
            TabulateError::OpeningExcel { .. }
        ));
    }
}
