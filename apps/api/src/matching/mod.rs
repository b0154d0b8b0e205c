// Skill matching: normalize skills, score jobs against a candidate, rank.
// Pure and synchronous; handlers load inputs from the stores.

pub mod handlers;
pub mod ranker;
pub mod scorer;
pub mod skills;
