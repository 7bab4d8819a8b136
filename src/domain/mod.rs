//! Provider-agnostic domain types: candidates, scores, verdicts, leaderboards.

pub mod candidate;
pub mod leaderboard;
pub mod outcome;
pub mod score;
pub mod security;
pub mod series;

pub use candidate::Candidate;
pub use leaderboard::Leaderboard;
pub use outcome::{Outcome, RejectReason, Verdict};
pub use score::{ScoreWeights, ScoredCandidate};
pub use security::{RiskFlag, SecurityAssessment, SecurityPolicy, SecurityScore};
pub use series::ReturnSeries;
