use thiserror::Error;

use crate::automaton::State;

/// Errors reported by construction, conversion and simulation calls.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    /// The state was not created on the automaton it was passed to.
    #[error("state {0} does not belong to this automaton")]
    UnknownState(State),

    /// An epsilon transition on an epsilon-free automaton, or a symbol that is
    /// not part of the declared alphabet.
    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    /// A conversion or simulation was started before a start state was set.
    #[error("automaton has no start state")]
    NoStartState,
}

pub type Result<T> = std::result::Result<T, AutomatonError>;
