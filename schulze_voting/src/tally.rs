// Pairwise preference counting.

use log::{debug, warn};
use std::collections::HashMap;

use crate::config::*;
use crate::matrix::CandidateMatrix;

/// Resolves candidate names to their index in the registration list.
///
/// Built once before the tally starts and never modified afterwards.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct CandidateIndex {
    names: Vec<String>,
    by_name: HashMap<String, usize>,
}

impl CandidateIndex {
    /// Registers the candidates, in order. Names must be unique and not empty.
    pub fn new(candidates: &[Candidate]) -> Result<CandidateIndex, VotingErrors> {
        let mut names: Vec<String> = Vec::with_capacity(candidates.len());
        let mut by_name: HashMap<String, usize> = HashMap::new();
        for (idx, c) in candidates.iter().enumerate() {
            if c.name.trim().is_empty() {
                return Err(VotingErrors::EmptyCandidateName);
            }
            if by_name.insert(c.name.clone(), idx).is_some() {
                return Err(VotingErrors::DuplicateCandidate(c.name.clone()));
            }
            names.push(c.name.clone());
        }
        Ok(CandidateIndex { names, by_name })
    }

    /// Same as `new`, after checking the number of candidates announced by the input.
    pub fn with_count(
        declared: i64,
        candidates: &[Candidate],
    ) -> Result<CandidateIndex, VotingErrors> {
        if declared < 0 || declared as usize != candidates.len() {
            return Err(VotingErrors::InvalidCandidateCount {
                declared,
                found: candidates.len(),
            });
        }
        CandidateIndex::new(candidates)
    }

    pub fn index_of(&self, name: &str) -> Result<usize, VotingErrors> {
        self.by_name
            .get(name)
            .cloned()
            .ok_or_else(|| VotingErrors::UnknownCandidate(name.to_string()))
    }

    pub fn name_of(&self, idx: usize) -> &str {
        self.names[idx].as_str()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Adds the preferences expressed by one ballot to `beats`.
///
/// Every candidate of a rank is credited against all the candidates placed at a
/// later rank and against all the candidates absent from the ballot. Candidates
/// sharing a rank are not credited against each other.
///
/// If a candidate appears several times, only its best rank is kept.
pub fn tally_ballot(
    index: &CandidateIndex,
    ballot: &Ballot,
    beats: &mut CandidateMatrix,
) -> Result<(), VotingErrors> {
    let num_candidates = index.len();

    let mut preferences: Vec<(i64, usize)> = Vec::new();
    for entry in ballot.entries.iter().take_while(|e| e.rank > 0) {
        let cid = index.index_of(&entry.candidate)?;
        preferences.push((entry.rank, cid));
    }
    if ballot.count == 0 {
        return Ok(());
    }
    // The sort is stable: candidates keep the ballot order within a rank.
    preferences.sort_by_key(|p| p.0);

    let mut mentioned = vec![false; num_candidates];
    preferences.retain(|(rank, cid)| {
        if mentioned[*cid] {
            warn!(
                "tally_ballot: candidate {} appears again at rank {}, ignoring it",
                index.name_of(*cid),
                rank
            );
            false
        } else {
            mentioned[*cid] = true;
            true
        }
    });
    debug!("tally_ballot: preferences: {:?}", preferences);

    let mut processed = vec![false; num_candidates];
    let mut start = 0;
    while start < preferences.len() {
        let rank = preferences[start].0;
        let end = preferences[start..]
            .iter()
            .position(|p| p.0 != rank)
            .map(|offset| start + offset)
            .unwrap_or(preferences.len());
        let bucket = &preferences[start..end];

        // The whole bucket is marked before crediting anyone.
        for (_, cid) in bucket {
            processed[*cid] = true;
        }
        for (_, cid) in bucket {
            for (other, done) in processed.iter().enumerate() {
                if !done {
                    beats
                        .checked_add(*cid, other, ballot.count)
                        .ok_or(VotingErrors::WeightOverflow)?;
                }
            }
        }
        start = end;
    }
    Ok(())
}

/// Counts the pairwise preferences of all the ballots.
///
/// Fails on the first ballot that cannot be read, or when a count no longer fits:
/// no partial tally is returned.
pub fn tally_ballots(
    index: &CandidateIndex,
    ballots: &[Ballot],
) -> Result<CandidateMatrix, VotingErrors> {
    let mut beats = CandidateMatrix::zeros(index.len());
    for ballot in ballots.iter() {
        tally_ballot(index, ballot, &mut beats)?;
    }
    Ok(beats)
}
