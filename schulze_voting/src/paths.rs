// Strongest path computation.

use crate::matrix::CandidateMatrix;

/// The direct edges of the majority graph.
///
/// There is an edge from i to j, of weight `beats[i][j]`, when more voters prefer
/// i over j than the converse. A pairwise tie produces no edge in either direction.
pub fn seed_paths(beats: &CandidateMatrix) -> CandidateMatrix {
    let n = beats.dim();
    let mut paths = CandidateMatrix::zeros(n);
    for i in 0..n {
        for j in 0..n {
            if i != j && beats.get(i, j) > beats.get(j, i) {
                paths.set(i, j, beats.get(i, j));
            }
        }
    }
    paths
}

/// Widest path closure, in place.
///
/// The intermediate candidate must be the outermost loop.
pub fn close_paths(paths: &mut CandidateMatrix) {
    let n = paths.dim();
    for i in 0..n {
        for j in 0..n {
            if j == i {
                continue;
            }
            for k in 0..n {
                if k == i || k == j {
                    continue;
                }
                let through_i = paths.get(j, i).min(paths.get(i, k));
                if through_i > paths.get(j, k) {
                    paths.set(j, k, through_i);
                }
            }
        }
    }
}

/// `paths[i][j]` is the strength of the strongest path from i to j.
pub fn strongest_paths(beats: &CandidateMatrix) -> CandidateMatrix {
    let mut paths = seed_paths(beats);
    close_paths(&mut paths);
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[Vec<u64>]) -> CandidateMatrix {
        CandidateMatrix::from_rows(rows).unwrap()
    }

    // The classic 45 voters example from Schulze's paper.
    fn wikipedia_beats() -> CandidateMatrix {
        m(&[
            vec![0, 20, 26, 30, 22],
            vec![25, 0, 16, 33, 18],
            vec![19, 29, 0, 17, 24],
            vec![15, 12, 28, 0, 14],
            vec![23, 27, 21, 31, 0],
        ])
    }

    #[test]
    fn seed_keeps_majority_edges_only() {
        let beats = m(&[vec![0, 3, 2], vec![1, 0, 2], vec![2, 2, 0]]);
        let seeded = seed_paths(&beats);
        assert_eq!(
            seeded.to_rows(),
            vec![vec![0, 3, 0], vec![0, 0, 0], vec![0, 0, 0]]
        );
    }

    #[test]
    fn strongest_paths_reference_example() {
        let paths = strongest_paths(&wikipedia_beats());
        assert_eq!(
            paths.to_rows(),
            vec![
                vec![0, 28, 28, 30, 24],
                vec![25, 0, 28, 33, 24],
                vec![25, 29, 0, 29, 24],
                vec![25, 28, 28, 0, 24],
                vec![25, 28, 28, 31, 0],
            ]
        );
    }

    #[test]
    fn closure_is_idempotent() {
        let paths = strongest_paths(&wikipedia_beats());
        let mut again = paths.clone();
        close_paths(&mut again);
        assert_eq!(again, paths);
    }

    #[test]
    fn diagonal_stays_empty() {
        let paths = strongest_paths(&wikipedia_beats());
        for i in 0..paths.dim() {
            assert_eq!(paths.get(i, i), 0);
        }
    }

    #[test]
    fn increasing_a_preference_never_weakens_its_path() {
        let beats = wikipedia_beats();
        let before = strongest_paths(&beats);
        for i in 0..beats.dim() {
            for j in 0..beats.dim() {
                if i == j {
                    continue;
                }
                let mut stronger = beats.clone();
                stronger.checked_add(i, j, 10);
                let after = strongest_paths(&stronger);
                assert!(after.get(i, j) >= before.get(i, j));
            }
        }
    }

    #[test]
    fn empty_and_single() {
        assert_eq!(strongest_paths(&CandidateMatrix::zeros(0)).dim(), 0);
        assert_eq!(
            strongest_paths(&CandidateMatrix::zeros(1)),
            CandidateMatrix::zeros(1)
        );
    }
}
