pub mod closure;
pub mod epsilon_elimination;
pub mod subset_construction;

pub use closure::{all_closures, epsilon_closure, state_closure};
pub use epsilon_elimination::{eliminate_epsilons, EpsilonEliminator};
pub use subset_construction::{to_dfa, Determinized, StateNaming, SubsetConstructionOptions};
