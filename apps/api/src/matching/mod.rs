// Match-scoring engine: rule-based matchers, the composite scorer, the
// optional remote matcher and the batch orchestrator that chooses between them.

pub mod education;
pub mod experience;
pub mod handlers;
pub mod orchestrator;
pub mod remote;
pub mod scorer;
pub mod skills;
pub mod strategy;
