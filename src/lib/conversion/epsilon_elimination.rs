use crate::{
    automaton::{
        error::Result, node::StateNode, state_set::StateSet, Automaton, Label, Symbol,
    },
    conversion::closure::all_closures,
    logger::{LogLevel, Logger},
};

/// Removes epsilon transitions while keeping the states of the source.
///
/// State `q` of the result is accepting iff the closure of `q` contains an
/// accepting state, and `q` moves on `a` to every target of `a` from any
/// state in the closure of `q`.
#[derive(Debug, Clone, Default)]
pub struct EpsilonEliminator<'l> {
    logger: Option<&'l Logger>,
}

impl<'l> EpsilonEliminator<'l> {
    pub fn new() -> Self {
        EpsilonEliminator { logger: None }
    }

    pub fn with_logger(mut self, logger: &'l Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn run<S: Symbol>(&self, automaton: &Automaton<S>) -> Result<Automaton<S>> {
        let start = automaton.initial()?;

        let _span = tracing::debug_span!(
            "eliminate_epsilons",
            states = automaton.state_count(),
            transitions = automaton.transition_count()
        )
        .entered();

        let closures = all_closures(automaton);
        let mut nfa = Automaton::nfa(automaton.alphabet().to_vec());

        // same insertion order, so every state keeps its index
        for (state, closure) in automaton.states().zip(&closures) {
            let node = automaton.node(state);
            nfa.add_node(StateNode::new(
                automaton.contains_accepting(closure),
                node.name.clone(),
            ));
        }

        nfa.set_start(start)?;

        for (state, closure) in automaton.states().zip(&closures) {
            for symbol in automaton.alphabet() {
                let targets: StateSet = closure
                    .iter()
                    .flat_map(|source| automaton.symbol_targets(source, symbol))
                    .collect();

                for target in &targets {
                    nfa.add_transition(state, Label::Symbol(symbol.clone()), target)?;
                }
            }
        }

        tracing::debug!(
            transitions = nfa.transition_count(),
            accepting = nfa.accepting_states().len(),
            "removed epsilon transitions"
        );

        if let Some(logger) = self.logger {
            logger
                .object("Epsilon Elimination")
                .add_field("states", nfa.state_count())
                .add_field("source.transitions", automaton.transition_count())
                .add_field("nfa.transitions", nfa.transition_count())
                .log(LogLevel::Info);
        }

        Ok(nfa)
    }
}

/// Converts an ε-NFA into an equivalent NFA over the same states.
pub fn eliminate_epsilons<S: Symbol>(automaton: &Automaton<S>) -> Result<Automaton<S>> {
    EpsilonEliminator::new().run(automaton)
}
