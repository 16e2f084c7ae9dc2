// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

use crate::matrix::CandidateMatrix;

/// A registered candidate.
///
/// The position of the candidate in the registration list is its index in
/// all the matrices produced by the tabulation.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Candidate {
    pub name: String,
}

impl Candidate {
    pub fn new(name: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
        }
    }
}

/// One line of a ballot: a rank and the name of the candidate placed at this rank.
///
/// Lower ranks are preferred. Several entries may share a rank to express
/// indifference between candidates. A rank of zero or below ends the ballot:
/// this entry and all the entries after it are ignored.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct BallotEntry {
    pub rank: i64,
    pub candidate: String,
}

impl BallotEntry {
    pub fn new(rank: i64, candidate: &str) -> BallotEntry {
        BallotEntry {
            rank,
            candidate: candidate.to_string(),
        }
    }
}

/// The preferences of a voter, and the number of voters who submitted the same ballot.
///
/// Candidates missing from the ballot are ranked below all the listed candidates,
/// and tied among themselves.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Ballot {
    pub entries: Vec<BallotEntry>,
    pub count: u64,
}

impl Ballot {
    /// A ballot with a weight of 1.
    pub fn single(entries: Vec<BallotEntry>) -> Ballot {
        Ballot { entries, count: 1 }
    }
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankedCandidate {
    pub name: String,
    /// The number of other candidates beaten under the strongest path relation.
    pub wins: u32,
}

/// The final order of the candidates, by decreasing number of wins.
pub type Ranking = Vec<RankedCandidate>;

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VotingResult {
    pub ranking: Ranking,
    /// The candidates that are not beaten by any other candidate.
    pub winners: Vec<String>,
    /// `pairwise[i][j]` is the number of voters that prefer i over j.
    pub pairwise: CandidateMatrix,
    /// `paths[i][j]` is the strength of the strongest path from i to j.
    pub paths: CandidateMatrix,
    /// The total weight of the ballots that were tallied.
    pub num_ballots: u64,
}

/// Errors that prevent the algorithm from completing successfully.
///
/// They all invalidate the whole election: no partial result is returned.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VotingErrors {
    /// A ballot mentions a candidate that was not registered.
    UnknownCandidate(String),
    /// The declared number of candidates is negative or does not match the names.
    InvalidCandidateCount { declared: i64, found: usize },
    /// The same name was registered twice.
    DuplicateCandidate(String),
    EmptyCandidateName,
    /// The weights of the ballots add up to more than a count can hold.
    WeightOverflow,
}

impl Error for VotingErrors {}

impl Display for VotingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingErrors::UnknownCandidate(name) => {
                write!(f, "ballot references unknown candidate {:?}", name)
            }
            VotingErrors::InvalidCandidateCount { declared, found } => write!(
                f,
                "invalid candidate count: {} declared, {} names provided",
                declared, found
            ),
            VotingErrors::DuplicateCandidate(name) => {
                write!(f, "candidate {:?} is registered more than once", name)
            }
            VotingErrors::EmptyCandidateName => write!(f, "candidate names may not be empty"),
            VotingErrors::WeightOverflow => {
                write!(f, "the total weight of the ballots is too large")
            }
        }
    }
}
