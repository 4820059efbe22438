pub mod automaton;
pub mod config;
pub mod conversion;
pub mod generation;
pub mod logger;
pub mod simulation;
pub mod validation;
