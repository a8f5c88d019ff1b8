
pub mod logging;
pub mod input_validator;

// Criteria, tag filtering and the search orchestrator
pub mod search;
