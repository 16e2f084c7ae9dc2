pub use crate::config::*;
use crate::tally::CandidateIndex;

/// A builder for adding ballots.
///
/// Names are checked against the registered candidates when the ballot is added,
/// so that a bad ballot is reported as soon as possible.
///
/// ```
/// pub use schulze_voting::builder::Builder;
/// # use schulze_voting::VotingErrors;
///
/// let mut builder = Builder::new()
///     .candidates(&["Anna".to_string(), "Bob".to_string(), "Clara".to_string()])?;
///
/// builder.add_ballot_simple(&["Clara".to_string(), "Anna".to_string()])?;
/// builder.add_ballot(&[(1, "Anna".to_string()), (1, "Bob".to_string())], 2)?;
///
/// let result = builder.run()?;
/// assert_eq!(result.ranking[0].name, "Anna");
///
/// # Ok::<(), VotingErrors>(())
/// ```
pub struct Builder {
    pub(crate) _index: CandidateIndex,
    pub(crate) _candidates: Vec<Candidate>,
    pub(crate) _ballots: Vec<Ballot>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _index: CandidateIndex::default(),
            _candidates: Vec::new(),
            _ballots: Vec::new(),
        }
    }

    /// Registers the candidates. This discards the ballots added so far.
    pub fn candidates(self, cands: &[String]) -> Result<Builder, VotingErrors> {
        let candidates: Vec<Candidate> = cands.iter().map(|name| Candidate::new(name)).collect();
        Ok(Builder {
            _index: CandidateIndex::new(&candidates)?,
            _candidates: candidates,
            _ballots: Vec::new(),
        })
    }

    /// Adds a ballot listing candidates from the most to the least preferred.
    ///
    /// It is the simplest use case for most cases.
    pub fn add_ballot_simple(&mut self, candidates: &[String]) -> Result<(), VotingErrors> {
        let ranks: Vec<(i64, String)> = candidates
            .iter()
            .enumerate()
            .map(|(idx, name)| ((idx + 1) as i64, name.clone()))
            .collect();
        self.add_ballot(&ranks, 1)
    }

    /// Adds a ballot made of (rank, candidate) pairs, with a potential weight attached to it.
    ///
    /// Ranks do not need to be sorted or distinct.
    pub fn add_ballot(&mut self, ranks: &[(i64, String)], count: u64) -> Result<(), VotingErrors> {
        let entries: Vec<BallotEntry> = ranks
            .iter()
            .map(|(rank, name)| BallotEntry::new(*rank, name))
            .collect();
        self.add_ballot_2(&Ballot { entries, count })
    }

    pub fn add_ballot_2(&mut self, ballot: &Ballot) -> Result<(), VotingErrors> {
        for entry in ballot.entries.iter().take_while(|e| e.rank > 0) {
            self._index.index_of(&entry.candidate)?;
        }
        self._ballots.push(ballot.clone());
        Ok(())
    }

    pub fn run(&self) -> Result<VotingResult, VotingErrors> {
        crate::run_schulze(&self._ballots, &self._candidates)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn rejects_unknown_names_early() {
        let mut b = Builder::new().candidates(&s(&["A", "B"])).unwrap();
        assert_eq!(
            b.add_ballot_simple(&s(&["A", "C"])),
            Err(VotingErrors::UnknownCandidate("C".to_string()))
        );
        assert!(b._ballots.is_empty());
    }

    #[test]
    fn rejects_duplicate_registration() {
        assert!(matches!(
            Builder::new().candidates(&s(&["A", "A"])),
            Err(VotingErrors::DuplicateCandidate(_))
        ));
    }

    #[test]
    fn runs_the_election() {
        let mut b = Builder::new().candidates(&s(&["A", "B", "C"])).unwrap();
        b.add_ballot_simple(&s(&["C", "B"])).unwrap();
        b.add_ballot_simple(&s(&["C", "A"])).unwrap();
        b.add_ballot(&[(2, "A".to_string()), (1, "B".to_string())], 3)
            .unwrap();
        let res = b.run().unwrap();
        assert_eq!(res.num_ballots, 5);
        assert_eq!(res.winners, s(&["B"]));
        let order: Vec<&str> = res.ranking.iter().map(|rc| rc.name.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }

    #[test]
    fn empty_builder() {
        let res = Builder::default().run().unwrap();
        assert!(res.ranking.is_empty());
        assert_eq!(res.num_ballots, 0);
    }
}
