use std::collections::VecDeque;

use hashbrown::HashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    automaton::{error::Result, state_set::StateSet, Automaton, Label, State, Symbol},
    config::ConversionConfig,
    conversion::closure::closure_of,
    logger::{LogLevel, Logger},
};

/// How the states of a determinized automaton are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateNaming {
    /// `s0, s1, ...` in discovery order, `s0` being the start state.
    #[default]
    Numbered,
    /// The source states a derived state stands for, e.g. `{q0, q2}`.
    SourceSets,
}

#[derive(Debug, Clone, Default)]
pub struct SubsetConstructionOptions<'l> {
    complete: bool,
    naming: StateNaming,
    logger: Option<&'l Logger>,
}

impl<'l> SubsetConstructionOptions<'l> {
    pub fn new() -> Self {
        SubsetConstructionOptions::default()
    }

    pub fn from_config(config: &ConversionConfig) -> Self {
        SubsetConstructionOptions::new()
            .with_completion(*config.get_complete_dfa())
            .with_naming(*config.get_state_naming())
    }

    /// Adds a non-accepting sink state for all otherwise missing transitions.
    pub fn with_completion(mut self, complete: bool) -> Self {
        self.complete = complete;
        self
    }

    pub fn with_naming(mut self, naming: StateNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_logger(mut self, logger: &'l Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Determinizes an NFA or ε-NFA to a DFA.
    /// Every state of the DFA stands for the set of source states it was
    /// built from, which is the epsilon closure of the states reached on a
    /// symbol. Sets are explored breadth-first from the closure of the source
    /// start state; an empty target set becomes a missing transition.
    pub fn determinize<S: Symbol>(&self, automaton: &Automaton<S>) -> Result<Determinized<S>> {
        let source_start = automaton.initial()?;

        let _span = tracing::debug_span!(
            "subset_construction",
            source_states = automaton.state_count(),
            alphabet = automaton.alphabet().len()
        )
        .entered();

        let mut determinized = Determinized {
            automaton: Automaton::dfa(automaton.alphabet().to_vec()),
            labels: vec![],
        };
        let mut state_map = HashMap::new();

        let start_set = closure_of(automaton, [source_start]);
        let dfa_start = self.add_derived_state(automaton, &mut determinized, &start_set);
        determinized.automaton.set_start(dfa_start)?;
        state_map.insert(start_set.clone(), dfa_start);

        let mut worklist = VecDeque::from([(start_set, dfa_start)]);

        while let Some((set, derived)) = worklist.pop_front() {
            for symbol in automaton.alphabet() {
                let moved = set
                    .iter()
                    .flat_map(|state| automaton.symbol_targets(state, symbol))
                    .collect_vec();
                let target_set = closure_of(automaton, moved);

                if target_set.is_empty() {
                    continue;
                }

                let target = if let Some(&existing) = state_map.get(&target_set) {
                    existing
                } else {
                    let new_state =
                        self.add_derived_state(automaton, &mut determinized, &target_set);
                    tracing::debug!(
                        state = %new_state,
                        set = %automaton.format_state_set(&target_set),
                        "discovered derived state"
                    );
                    state_map.insert(target_set.clone(), new_state);
                    worklist.push_back((target_set, new_state));
                    new_state
                };

                determinized
                    .automaton
                    .add_transition(derived, Label::Symbol(symbol.clone()), target)?;
            }
        }

        if self.complete {
            if let Some(sink) = determinized.automaton.complete_with_sink() {
                let name = self.derived_name(automaton, sink, &StateSet::new());
                determinized.automaton.set_name(sink, name)?;
                determinized.labels.push(StateSet::new());
            }
        }

        tracing::debug!(
            states = determinized.automaton.state_count(),
            transitions = determinized.automaton.transition_count(),
            "determinized"
        );

        if let Some(logger) = self.logger {
            logger
                .object("Subset Construction")
                .add_field("source.states", automaton.state_count())
                .add_field("source.transitions", automaton.transition_count())
                .add_field("dfa.states", determinized.automaton.state_count())
                .add_field("dfa.transitions", determinized.automaton.transition_count())
                .add_field("dfa.complete", determinized.automaton.is_complete())
                .log(LogLevel::Info);
        }

        Ok(determinized)
    }

    fn add_derived_state<S: Symbol>(
        &self,
        source: &Automaton<S>,
        determinized: &mut Determinized<S>,
        set: &StateSet,
    ) -> State {
        let next = State::new(determinized.automaton.state_count());
        let name = self.derived_name(source, next, set);
        let state = determinized
            .automaton
            .add_named_state(name, source.contains_accepting(set));

        determinized.labels.push(set.clone());
        state
    }

    fn derived_name<S: Symbol>(&self, source: &Automaton<S>, state: State, set: &StateSet) -> String {
        match self.naming {
            StateNaming::Numbered => format!("s{}", state.index()),
            StateNaming::SourceSets => source.format_state_set(set),
        }
    }
}

/// A DFA built by subset construction, together with the set of source states
/// each of its states stands for.
#[derive(Debug, Clone)]
pub struct Determinized<S: Symbol> {
    automaton: Automaton<S>,
    labels: Vec<StateSet>,
}

impl<S: Symbol> Determinized<S> {
    pub fn automaton(&self) -> &Automaton<S> {
        &self.automaton
    }

    pub fn into_automaton(self) -> Automaton<S> {
        self.automaton
    }

    /// The source states `state` stands for. The sink stands for the empty set.
    pub fn label(&self, state: State) -> Option<&StateSet> {
        self.labels.get(state.index())
    }

    pub fn state_for(&self, set: &StateSet) -> Option<State> {
        self.labels
            .iter()
            .position(|label| label == set)
            .map(State::new)
    }

    pub fn sink(&self) -> Option<State> {
        self.state_for(&StateSet::new())
    }

    pub fn labels(&self) -> impl Iterator<Item = (State, &StateSet)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .map(|(index, label)| (State::new(index), label))
    }
}

/// Converts an NFA or ε-NFA into an equivalent, possibly partial, DFA.
pub fn to_dfa<S: Symbol>(automaton: &Automaton<S>) -> Result<Automaton<S>> {
    SubsetConstructionOptions::new()
        .determinize(automaton)
        .map(Determinized::into_automaton)
}
