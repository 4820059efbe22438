use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

use hashbrown::HashSet;
use itertools::{repeat_n, Itertools};
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
    Direction,
};
use serde::{Deserialize, Serialize};

use crate::{conversion, simulation};

pub mod error;
pub mod index_set;
pub mod node;
pub mod state_set;

use error::{AutomatonError, Result};
use node::StateNode;
use state_set::StateSet;

/// Types that can be used as input symbols of an automaton.
pub trait Symbol: Debug + Clone + PartialEq + Eq + Hash + Ord {}
impl<T> Symbol for T where T: Debug + Clone + PartialEq + Eq + Hash + Ord {}

/// The label of a transition: either a symbol of the alphabet or epsilon.
///
/// Epsilon is a separate variant, so it can never be a member of an alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label<S: Symbol> {
    Symbol(S),
    Epsilon,
}

impl<S: Symbol> Label<S> {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Label::Epsilon)
    }

    pub fn symbol(&self) -> Option<&S> {
        match self {
            Label::Symbol(s) => Some(s),
            Label::Epsilon => None,
        }
    }

    /// Checks whether this label is consumed by reading `symbol`.
    pub fn matches(&self, symbol: &S) -> bool {
        match self {
            Label::Symbol(s) => s == symbol,
            Label::Epsilon => false,
        }
    }
}

impl<S: Symbol> From<Option<S>> for Label<S> {
    fn from(value: Option<S>) -> Self {
        match value {
            Some(s) => Label::Symbol(s),
            None => Label::Epsilon,
        }
    }
}

impl<S: Symbol> Display for Label<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Symbol(s) => write!(f, "{:?}", s),
            Label::Epsilon => write!(f, "ε"),
        }
    }
}

/// Identifies a state within the automaton that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State(NodeIndex);

impl State {
    pub(crate) fn new(index: usize) -> Self {
        State(NodeIndex::new(index))
    }

    pub fn index(self) -> usize {
        self.0.index()
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.index())
    }
}

/// The declared variant of an automaton.
///
/// Only epsilon transitions are gated by the declared kind. Whether the
/// transition table actually is deterministic is always re-checked with
/// [`Automaton::is_deterministic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutomatonKind {
    Deterministic,
    Nondeterministic,
    EpsilonNondeterministic,
}

impl AutomatonKind {
    pub fn allows_epsilon(&self) -> bool {
        matches!(self, AutomatonKind::EpsilonNondeterministic)
    }
}

impl Display for AutomatonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutomatonKind::Deterministic => write!(f, "DFA"),
            AutomatonKind::Nondeterministic => write!(f, "NFA"),
            AutomatonKind::EpsilonNondeterministic => write!(f, "ε-NFA"),
        }
    }
}

/// A finite automaton over the symbol type `S`.
///
/// States are nodes of the underlying graph, transitions are edges labeled
/// with a [`Label`]. The transition relation is a set, adding the same
/// `(from, label, to)` triple twice has no effect.
#[derive(Debug, Clone)]
pub struct Automaton<S: Symbol> {
    kind: AutomatonKind,
    start: Option<State>,
    graph: DiGraph<StateNode, Label<S>>,
    alphabet: Vec<S>,
}

impl<S: Symbol> Automaton<S> {
    /// Creates an empty automaton. Duplicate symbols in `alphabet` are
    /// dropped, keeping the first occurrence.
    pub fn new(kind: AutomatonKind, alphabet: Vec<S>) -> Self {
        Automaton {
            kind,
            start: None,
            graph: DiGraph::new(),
            alphabet: alphabet.into_iter().unique().collect(),
        }
    }

    pub fn dfa(alphabet: Vec<S>) -> Self {
        Automaton::new(AutomatonKind::Deterministic, alphabet)
    }

    pub fn nfa(alphabet: Vec<S>) -> Self {
        Automaton::new(AutomatonKind::Nondeterministic, alphabet)
    }

    pub fn epsilon_nfa(alphabet: Vec<S>) -> Self {
        Automaton::new(AutomatonKind::EpsilonNondeterministic, alphabet)
    }

    pub fn kind(&self) -> AutomatonKind {
        self.kind
    }

    pub fn add_state(&mut self, accepting: bool) -> State {
        self.add_node(StateNode::new(accepting, None))
    }

    pub fn add_named_state(&mut self, name: impl Into<String>, accepting: bool) -> State {
        self.add_node(StateNode::named(name, accepting))
    }

    pub(crate) fn add_node(&mut self, node: StateNode) -> State {
        State(self.graph.add_node(node))
    }

    /// Sets the start state, replacing any previous one.
    pub fn set_start(&mut self, state: State) -> Result<()> {
        self.check_state(state)?;
        self.start = Some(state);
        Ok(())
    }

    pub fn set_accepting(&mut self, state: State, accepting: bool) -> Result<()> {
        self.check_state(state)?;
        self.graph[state.0].accepting = accepting;
        Ok(())
    }

    pub fn set_name(&mut self, state: State, name: impl Into<String>) -> Result<()> {
        self.check_state(state)?;
        self.graph[state.0].name = Some(name.into());
        Ok(())
    }

    /// Adds a transition from `from` to `to`.
    ///
    /// Returns `false` if the transition already existed. Fails with
    /// [`AutomatonError::UnknownState`] for states of another automaton and
    /// with [`AutomatonError::InvalidSymbol`] for epsilon on an epsilon-free
    /// automaton or a symbol outside the alphabet.
    pub fn add_transition(&mut self, from: State, label: Label<S>, to: State) -> Result<bool> {
        self.check_state(from)?;
        self.check_state(to)?;
        self.check_label(&label)?;

        if self
            .graph
            .edges_connecting(from.0, to.0)
            .any(|edge| edge.weight() == &label)
        {
            return Ok(false);
        }

        self.graph.add_edge(from.0, to.0, label);
        Ok(true)
    }

    pub fn add_symbol_transition(&mut self, from: State, symbol: S, to: State) -> Result<bool> {
        self.add_transition(from, Label::Symbol(symbol), to)
    }

    pub fn add_epsilon_transition(&mut self, from: State, to: State) -> Result<bool> {
        self.add_transition(from, Label::Epsilon, to)
    }

    fn check_label(&self, label: &Label<S>) -> Result<()> {
        match label {
            Label::Epsilon if !self.kind.allows_epsilon() => Err(AutomatonError::InvalidSymbol(
                format!("epsilon transitions are not allowed in a {}", self.kind),
            )),
            Label::Symbol(symbol) if !self.has_symbol(symbol) => Err(
                AutomatonError::InvalidSymbol(format!("{:?} is not part of the alphabet", symbol)),
            ),
            _ => Ok(()),
        }
    }

    pub fn contains(&self, state: State) -> bool {
        state.index() < self.graph.node_count()
    }

    pub fn check_state(&self, state: State) -> Result<()> {
        if self.contains(state) {
            Ok(())
        } else {
            Err(AutomatonError::UnknownState(state))
        }
    }

    pub fn start(&self) -> Option<State> {
        self.start
    }

    /// Returns the start state or [`AutomatonError::NoStartState`].
    pub fn initial(&self) -> Result<State> {
        self.start.ok_or(AutomatonError::NoStartState)
    }

    pub fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn states(&self) -> impl Iterator<Item = State> + '_ {
        self.graph.node_indices().map(State)
    }

    pub fn alphabet(&self) -> &[S] {
        &self.alphabet
    }

    pub fn has_symbol(&self, symbol: &S) -> bool {
        self.alphabet.contains(symbol)
    }

    pub fn is_accepting(&self, state: State) -> Result<bool> {
        self.check_state(state)?;
        Ok(self.graph[state.0].accepting)
    }

    pub fn accepting_states(&self) -> StateSet {
        self.states()
            .filter(|state| self.graph[state.0].accepting)
            .collect()
    }

    /// Checks if a set of states contains an accepting state.
    pub fn contains_accepting(&self, states: &StateSet) -> bool {
        states
            .iter()
            .any(|state| self.graph.node_weight(state.0).is_some_and(|n| n.accepting))
    }

    pub(crate) fn node(&self, state: State) -> &StateNode {
        &self.graph[state.0]
    }

    pub fn name(&self, state: State) -> Result<Option<&str>> {
        self.check_state(state)?;
        Ok(self.graph[state.0].name())
    }

    /// The display name of a state: its name if it has one, `q<index>`
    /// otherwise.
    pub fn state_name(&self, state: State) -> String {
        match self.graph.node_weight(state.0).and_then(StateNode::name) {
            Some(name) => name.to_string(),
            None => state.to_string(),
        }
    }

    pub fn state_by_name(&self, name: &str) -> Option<State> {
        self.states()
            .find(|state| self.graph[state.0].name() == Some(name))
    }

    /// Renders a set of states using their display names, e.g. `{q0, q1}`.
    pub fn format_state_set(&self, states: &StateSet) -> String {
        if states.is_empty() {
            return "∅".to_string();
        }

        format!(
            "{{{}}}",
            states.iter().map(|state| self.state_name(state)).join(", ")
        )
    }

    /// Iterates the targets of `state` under `label`.
    pub fn targets<'a>(
        &'a self,
        state: State,
        label: &'a Label<S>,
    ) -> impl Iterator<Item = State> + 'a {
        self.graph
            .edges_directed(state.0, Direction::Outgoing)
            .filter(move |edge| edge.weight() == label)
            .map(|edge| State(edge.target()))
    }

    pub fn symbol_targets<'a>(&'a self, state: State, symbol: &'a S) -> impl Iterator<Item = State> + 'a {
        self.graph
            .edges_directed(state.0, Direction::Outgoing)
            .filter(move |edge| edge.weight().matches(symbol))
            .map(|edge| State(edge.target()))
    }

    pub fn epsilon_targets(&self, state: State) -> impl Iterator<Item = State> + '_ {
        self.graph
            .edges_directed(state.0, Direction::Outgoing)
            .filter(|edge| edge.weight().is_epsilon())
            .map(|edge| State(edge.target()))
    }

    /// Iterates all transitions as `(from, label, to)` triples.
    pub fn transitions(&self) -> impl Iterator<Item = (State, &Label<S>, State)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (State(edge.source()), edge.weight(), State(edge.target())))
    }

    pub fn transition_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Read-only access to the underlying graph, e.g. for rendering.
    pub fn graph(&self) -> &DiGraph<StateNode, Label<S>> {
        &self.graph
    }

    pub fn is_epsilon_free(&self) -> bool {
        !self.graph.edge_weights().any(Label::is_epsilon)
    }

    /// Checks the transition table itself: no epsilon transitions and at most
    /// one target per state and symbol.
    pub fn is_deterministic(&self) -> bool {
        self.graph.node_indices().all(|node| {
            let mut seen = HashSet::new();

            self.graph
                .edges_directed(node, Direction::Outgoing)
                .all(|edge| match edge.weight() {
                    Label::Symbol(symbol) => seen.insert(symbol),
                    Label::Epsilon => false,
                })
        })
    }

    fn missing_transitions(&self) -> Vec<(State, S)> {
        let mut missing = Vec::new();

        for state in self.states() {
            for symbol in self.alphabet.iter() {
                if self.symbol_targets(state, symbol).next().is_none() {
                    missing.push((state, symbol.clone()));
                }
            }
        }

        missing
    }

    /// Whether every state has a transition for every symbol of the alphabet.
    pub fn is_complete(&self) -> bool {
        self.missing_transitions().is_empty()
    }

    /// Adds a non-accepting sink state if needed. Every missing transition is
    /// routed to the sink, and the sink loops to itself on every symbol.
    ///
    /// Returns the sink, or `None` if the automaton was already complete.
    pub fn complete_with_sink(&mut self) -> Option<State> {
        let missing = self.missing_transitions();

        if missing.is_empty() {
            return None;
        }

        let sink = self.add_state(false);

        for (state, symbol) in missing {
            self.graph.add_edge(state.0, sink.0, Label::Symbol(symbol));
        }

        for symbol in self.alphabet.clone() {
            self.graph.add_edge(sink.0, sink.0, Label::Symbol(symbol));
        }

        Some(sink)
    }

    /// All words over the alphabet of length `0..=max_length`, shortest first
    /// and in alphabet order within one length.
    pub fn words(&self, max_length: usize) -> impl Iterator<Item = Vec<S>> + '_ {
        (0..=max_length).flat_map(move |length| words_of_length(&self.alphabet, length))
    }

    pub fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a S>) -> Result<bool>
    where
        S: 'a,
    {
        simulation::accepts(self, input)
    }

    /// The set of active states after consuming `input`.
    pub fn resulting_states<'a>(&self, input: impl IntoIterator<Item = &'a S>) -> Result<StateSet>
    where
        S: 'a,
    {
        simulation::resulting_states(self, input)
    }

    /// Strict check of a word. Unlike [`Automaton::accepts`], which rejects
    /// unknown symbols, this reports them as [`AutomatonError::InvalidSymbol`].
    pub fn verify_word<'a>(&self, word: impl IntoIterator<Item = &'a S>) -> Result<()>
    where
        S: 'a,
    {
        for symbol in word {
            if !self.has_symbol(symbol) {
                return Err(AutomatonError::InvalidSymbol(format!(
                    "{:?} is not part of the alphabet",
                    symbol
                )));
            }
        }

        self.initial().map(|_| ())
    }

    /// All accepted words of length `0..=max_length`.
    pub fn accepted_words(&self, max_length: usize) -> Result<Vec<Vec<S>>> {
        self.initial()?;

        let mut accepted = vec![];
        for word in self.words(max_length) {
            if self.accepts(&word)? {
                accepted.push(word);
            }
        }

        Ok(accepted)
    }

    pub fn eliminate_epsilons(&self) -> Result<Automaton<S>> {
        conversion::eliminate_epsilons(self)
    }

    pub fn to_dfa(&self) -> Result<Automaton<S>> {
        conversion::to_dfa(self)
    }
}

fn words_of_length<S: Symbol>(alphabet: &[S], length: usize) -> Box<dyn Iterator<Item = Vec<S>> + '_> {
    if length == 0 {
        return Box::new(std::iter::once(Vec::new()));
    }

    Box::new(
        repeat_n(alphabet, length)
            .multi_cartesian_product()
            .map(|word| word.into_iter().cloned().collect_vec()),
    )
}
