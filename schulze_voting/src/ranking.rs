// Final ordering of the candidates from the strongest paths.

use crate::config::*;
use crate::matrix::CandidateMatrix;
use crate::tally::CandidateIndex;

/// i beats j when the strongest path from i to j is stronger than the converse.
pub fn path_beats(paths: &CandidateMatrix, i: usize, j: usize) -> bool {
    i != j && paths.get(i, j) > paths.get(j, i)
}

/// For each candidate, the number of other candidates it beats.
pub fn win_counts(paths: &CandidateMatrix) -> Vec<u32> {
    let n = paths.dim();
    (0..n)
        .map(|i| (0..n).filter(|&j| path_beats(paths, i, j)).count() as u32)
        .collect()
}

/// Orders the candidates by decreasing number of wins.
///
/// Candidates with the same number of wins keep their registration order.
pub fn resolve_ranking(paths: &CandidateMatrix, index: &CandidateIndex) -> Ranking {
    let wins = win_counts(paths);
    let mut order: Vec<usize> = (0..wins.len()).collect();
    order.sort_by_key(|&cid| std::cmp::Reverse(wins[cid]));
    order
        .into_iter()
        .map(|cid| RankedCandidate {
            name: index.name_of(cid).to_string(),
            wins: wins[cid],
        })
        .collect()
}

/// The candidates that no other candidate beats, in registration order.
///
/// The relation is transitive, so this set is never empty when there is at
/// least one candidate.
pub fn schulze_winners(paths: &CandidateMatrix, index: &CandidateIndex) -> Vec<String> {
    let n = paths.dim();
    (0..n)
        .filter(|&i| !(0..n).any(|j| path_beats(paths, j, i)))
        .map(|i| index.name_of(i).to_string())
        .collect()
}
