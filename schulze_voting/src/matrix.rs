use std::fmt::Display;

/// A square matrix of counts, indexed by candidate index.
///
/// Stored as a single row-major vector: `cells[i * dim + j]` holds the entry
/// for the ordered pair (i, j).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CandidateMatrix {
    dim: usize,
    cells: Vec<u64>,
}

impl CandidateMatrix {
    /// A `dim` x `dim` matrix filled with zeros.
    pub fn zeros(dim: usize) -> CandidateMatrix {
        CandidateMatrix {
            dim,
            cells: vec![0; dim * dim],
        }
    }

    /// Builds a matrix from nested rows.
    ///
    /// Returns None if the rows do not form a square.
    pub fn from_rows(rows: &[Vec<u64>]) -> Option<CandidateMatrix> {
        let dim = rows.len();
        if rows.iter().any(|r| r.len() != dim) {
            return None;
        }
        Some(CandidateMatrix {
            dim,
            cells: rows.iter().flatten().cloned().collect(),
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, i: usize, j: usize) -> u64 {
        self.cells[i * self.dim + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: u64) {
        self.cells[i * self.dim + j] = value;
    }

    /// Adds `value` to the entry (i, j).
    ///
    /// Returns the new value, or None if it does not fit. The entry is then left unchanged.
    pub fn checked_add(&mut self, i: usize, j: usize, value: u64) -> Option<u64> {
        let cell = &mut self.cells[i * self.dim + j];
        *cell = cell.checked_add(value)?;
        Some(*cell)
    }

    pub fn row(&self, i: usize) -> &[u64] {
        &self.cells[i * self.dim..(i + 1) * self.dim]
    }

    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        (0..self.dim).map(|i| self.row(i).to_vec()).collect()
    }
}

impl Display for CandidateMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.dim {
            let line: Vec<String> = self.row(i).iter().map(|c| c.to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
