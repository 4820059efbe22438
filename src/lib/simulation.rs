use crate::{
    automaton::{error::Result, state_set::StateSet, Automaton, State, Symbol},
    conversion::closure::extend_to_closure,
};

/// Runs an automaton one symbol at a time.
///
/// The set of active states is closed under epsilon transitions after every
/// step, so the same code runs DFAs, NFAs and ε-NFAs. A symbol that is not
/// part of the alphabet has no transitions and empties the active set, which
/// can never be repopulated.
#[derive(Debug, Clone)]
pub struct Simulator<'a, S: Symbol> {
    automaton: &'a Automaton<S>,
    current: Vec<State>,
}

impl<'a, S: Symbol> Simulator<'a, S> {
    pub fn new(automaton: &'a Automaton<S>) -> Result<Self> {
        let mut current = vec![automaton.initial()?];
        extend_to_closure(automaton, &mut current);

        Ok(Simulator { automaton, current })
    }

    pub fn step(&mut self, symbol: &S) {
        let mut next = vec![];

        for &state in &self.current {
            next.extend(self.automaton.symbol_targets(state, symbol));
        }

        extend_to_closure(self.automaton, &mut next);

        tracing::trace!(symbol = ?symbol, active = next.len(), "simulation step");

        self.current = next;
    }

    /// Consumes `input`, stopping early once no state is active.
    pub fn run<'b>(&mut self, input: impl IntoIterator<Item = &'b S>)
    where
        S: 'b,
    {
        for symbol in input {
            if self.is_dead() {
                break;
            }

            self.step(symbol);
        }
    }

    /// Whether no state is active anymore.
    pub fn is_dead(&self) -> bool {
        self.current.is_empty()
    }

    pub fn is_accepting(&self) -> bool {
        self.current
            .iter()
            .any(|&state| self.automaton.node(state).accepting)
    }

    pub fn current(&self) -> StateSet {
        StateSet::from_unsorted(self.current.clone())
    }
}

pub fn accepts<'a, S: Symbol + 'a>(
    automaton: &Automaton<S>,
    input: impl IntoIterator<Item = &'a S>,
) -> Result<bool> {
    let mut simulator = Simulator::new(automaton)?;
    simulator.run(input);

    Ok(simulator.is_accepting())
}

pub fn resulting_states<'a, S: Symbol + 'a>(
    automaton: &Automaton<S>,
    input: impl IntoIterator<Item = &'a S>,
) -> Result<StateSet> {
    let mut simulator = Simulator::new(automaton)?;
    simulator.run(input);

    Ok(simulator.current())
}
