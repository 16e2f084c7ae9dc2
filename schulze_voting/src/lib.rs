/*!
Tabulation of ranked ballots with the Schulze method.

The Schulze method is a Condorcet method: it counts, for every pair of candidates,
how many voters prefer one over the other, computes the strongest beatpaths in the
resulting graph and ranks the candidates by how many others they beat along these
paths.

The computation runs in three steps, each available on its own:
- [tally::tally_ballots] counts the pairwise preferences of the ballots,
- [paths::strongest_paths] computes the strength of the strongest paths,
- [ranking::resolve_ranking] orders the candidates by number of wins.

```
use schulze_voting::*;

let candidates = vec![Candidate::new("Alice"), Candidate::new("Bob")];
let ballots = vec![Ballot::single(vec![
    BallotEntry::new(1, "Bob"),
    BallotEntry::new(2, "Alice"),
])];
let result = run_schulze(&ballots, &candidates)?;
assert_eq!(result.winners, vec!["Bob".to_string()]);
# Ok::<(), VotingErrors>(())
```
*/

pub mod builder;
mod config;
pub mod manual;
pub mod matrix;
pub mod paths;
pub mod ranking;
pub mod tally;

use log::{debug, info};

pub use crate::config::*;
pub use crate::matrix::CandidateMatrix;
pub use crate::tally::CandidateIndex;

/// Runs the Schulze method on the given ballots.
///
/// Arguments:
/// * `ballots` the ballots to count. Every name must belong to a registered candidate.
/// * `candidates` the registered candidates. Their order is used to break ties in the ranking.
pub fn run_schulze(
    ballots: &[Ballot],
    candidates: &[Candidate],
) -> Result<VotingResult, VotingErrors> {
    let index = CandidateIndex::new(candidates)?;
    run_with_index(ballots, &index)
}

/// Same as [run_schulze], for inputs that announce the number of candidates first.
///
/// Fails if the announced number is negative or does not match the list of names.
pub fn run_election(
    candidate_count: i64,
    candidates: &[Candidate],
    ballots: &[Ballot],
) -> Result<VotingResult, VotingErrors> {
    let index = CandidateIndex::with_count(candidate_count, candidates)?;
    run_with_index(ballots, &index)
}

fn run_with_index(
    ballots: &[Ballot],
    index: &CandidateIndex,
) -> Result<VotingResult, VotingErrors> {
    let num_ballots: u64 = ballots
        .iter()
        .try_fold(0u64, |acc, b| acc.checked_add(b.count))
        .ok_or(VotingErrors::WeightOverflow)?;
    info!(
        "run_schulze: Processing {:?} ballots ({} votes), {} candidates",
        ballots.len(),
        num_ballots,
        index.len()
    );
    for (idx, name) in index.names().iter().enumerate() {
        info!("Candidate: {}: {}", idx, name);
    }

    let pairwise = tally::tally_ballots(index, ballots)?;
    debug!("run_schulze: pairwise preferences:\n{}", pairwise);

    let paths = paths::strongest_paths(&pairwise);
    debug!("run_schulze: path strengths:\n{}", paths);

    let ranking = ranking::resolve_ranking(&paths, index);
    let winners = ranking::schulze_winners(&paths, index);
    for rc in ranking.iter() {
        info!("{:>6} wins {}", rc.wins, rc.name);
    }
    info!("run_schulze: winners: {:?}", winners);

    Ok(VotingResult {
        ranking,
        winners,
        pairwise,
        paths,
        num_ballots,
    })
}
