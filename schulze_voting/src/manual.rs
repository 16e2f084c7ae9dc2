/*!

This is the long-form manual for `schulze_voting` and the `schulze` command.

## How the count works

1. **Pairwise preferences.** For every ballot, a candidate is preferred to all the
   candidates placed at a later rank and to all the candidates that do not appear
   on the ballot. Candidates sharing a rank are not preferred to each other.
   Each ballot adds its weight (1 by default) to `pairwise[i][j]` when it prefers i to j.

2. **Strongest paths.** There is a link from i to j when `pairwise[i][j] > pairwise[j][i]`,
   with the strength `pairwise[i][j]`. The strength of a path is the strength of its
   weakest link, and `paths[i][j]` is the strength of the strongest path from i to j.

3. **Ranking.** Candidate i beats j when `paths[i][j] > paths[j][i]`. The candidates are
   sorted by the number of candidates they beat. Candidates with the same number of
   wins are listed in the order in which they were registered.

The winners are the candidates that nobody beats. There may be more than one.

## Input formats

The following formats are supported by the command line:
* `text` the line-based format described below (default)
* `csv_likert` Comma Separated Values, one column per candidate
* `xlsx_likert` Excel spreadsheet, one column per candidate

### `text`

```text
3
Alice
Bob
Charlie
2
1 Alice
2 Charlie
0
1 Bob
1 Charlie
0
```

The first line is the number of candidates, followed by one name per line. Then comes
the number of ballots. Each ballot is a list of lines `<rank> <name>` and ends with a line
holding a rank of `0` (or any negative number). The lowest rank is the most preferred.

### `csv_likert`

```text
id,count,Alice,Bob,Charlie
id1,20,1,2,
id2,3,2,1,1
```

The header holds the names of the candidates. Each cell is the rank given to this
candidate by the ballot, or empty if the candidate was not ranked.
The `id` and `count` columns are optional, see the configuration below.

### `xlsx_likert`

Same layout as `csv_likert`, in the first worksheet of an Excel file (or the worksheet
named with `--excel-worksheet-name`).

## Configuration

The program accepts a configuration file in JSON:

```text
{
  "outputSettings": { "contestName": "Board election", "contestDate": "2022-10-01" },
  "cvrFileSources": [
    { "provider": "csv_likert", "filePath": "ballots.csv",
      "firstVoteColumnIndex": 3, "idColumnIndex": 1, "countColumnIndex": 2 }
  ],
  "candidates": [ { "name": "Alice" }, { "name": "Bob" }, { "name": "Charlie" } ]
}
```

FileSource options:
 - `provider` (string): one of the input formats above.
 - `filePath` (string): relative to the directory of the configuration file.
 - `firstVoteColumnIndex` (number or Excel-style letter, optional): first column holding ranks.
 - `firstVoteRowIndex` (number, optional): first row holding a ballot. The row before it is the header.
 - `idColumnIndex` (optional): the column holding the ballot identifier.
 - `countColumnIndex` (optional): the column holding the weight of the ballot. If not provided,
   every ballot is assigned a count of 1.
 - `excelWorksheetName` (string, optional): for Excel-based inputs, the name of the worksheet.

Column and row indexes start at 1.

 */
