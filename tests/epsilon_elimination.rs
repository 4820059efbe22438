use finite_automata::{
    automaton::{error::AutomatonError, Automaton, AutomatonKind},
    conversion::{eliminate_epsilons, EpsilonEliminator},
    logger::{LogLevel, Logger},
    validation::same_language::assert_same_language,
};

fn word(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[test]
fn scenario_epsilon_into_symbol() {
    let mut enfa = Automaton::<char>::epsilon_nfa(vec!['a']);
    let q0 = enfa.add_state(false);
    let q1 = enfa.add_state(false);
    let q2 = enfa.add_state(true);
    enfa.set_start(q0).unwrap();

    enfa.add_epsilon_transition(q0, q1).unwrap();
    enfa.add_symbol_transition(q1, 'a', q2).unwrap();

    let nfa = eliminate_epsilons(&enfa).unwrap();

    assert_eq!(nfa.kind(), AutomatonKind::Nondeterministic);
    assert!(nfa.is_epsilon_free());
    assert_eq!(nfa.state_count(), 3);
    assert_eq!(nfa.start(), Some(q0));

    // q0 inherits the 'a' transition of q1
    assert_eq!(nfa.symbol_targets(q0, &'a').collect::<Vec<_>>(), vec![q2]);

    assert!(nfa.accepts(&word("a")).unwrap());
    assert!(!nfa.accepts(&word("")).unwrap());
    assert!(!nfa.accepts(&word("aa")).unwrap());

    assert_same_language(&enfa, &nfa, 6);
}

#[test]
fn accepting_states_propagate_backwards() {
    let mut enfa = Automaton::<char>::epsilon_nfa(vec!['a', 'b']);
    let q0 = enfa.add_named_state("start", false);
    let q1 = enfa.add_named_state("middle", false);
    let q2 = enfa.add_named_state("end", true);
    enfa.set_start(q0).unwrap();

    enfa.add_epsilon_transition(q0, q1).unwrap();
    enfa.add_epsilon_transition(q1, q2).unwrap();
    enfa.add_symbol_transition(q2, 'b', q0).unwrap();

    let nfa = enfa.eliminate_epsilons().unwrap();

    assert!(nfa.is_accepting(q0).unwrap());
    assert!(nfa.is_accepting(q1).unwrap());
    assert!(nfa.is_accepting(q2).unwrap());
    assert!(nfa.accepts(&word("")).unwrap());
    assert!(nfa.accepts(&word("bbb")).unwrap());
    assert!(!nfa.accepts(&word("a")).unwrap());

    // names and identities survive
    assert_eq!(nfa.state_by_name("middle"), Some(q1));
    assert_eq!(nfa.state_name(q2), "end");

    assert_same_language(&enfa, &nfa, 6);
}

#[test]
fn epsilon_cycles() {
    let mut enfa = Automaton::<char>::epsilon_nfa(vec!['a', 'b']);
    let q0 = enfa.add_state(false);
    let q1 = enfa.add_state(false);
    let q2 = enfa.add_state(false);
    let q3 = enfa.add_state(true);
    enfa.set_start(q0).unwrap();

    enfa.add_epsilon_transition(q0, q0).unwrap();
    enfa.add_epsilon_transition(q0, q1).unwrap();
    enfa.add_epsilon_transition(q1, q2).unwrap();
    enfa.add_epsilon_transition(q2, q0).unwrap();
    enfa.add_symbol_transition(q1, 'a', q2).unwrap();
    enfa.add_symbol_transition(q2, 'b', q3).unwrap();
    enfa.add_epsilon_transition(q3, q3).unwrap();

    let nfa = eliminate_epsilons(&enfa).unwrap();

    assert!(nfa.is_epsilon_free());
    assert!(nfa.accepts(&word("b")).unwrap());
    assert!(nfa.accepts(&word("aab")).unwrap());
    assert!(!nfa.accepts(&word("ba")).unwrap());

    assert_same_language(&enfa, &nfa, 7);
}

#[test]
fn epsilon_free_input_is_unchanged_in_language() {
    let mut nfa = Automaton::<char>::nfa(vec!['a', 'b']);
    let s0 = nfa.add_state(false);
    let s1 = nfa.add_state(true);
    nfa.set_start(s0).unwrap();
    nfa.add_symbol_transition(s0, 'a', s1).unwrap();
    nfa.add_symbol_transition(s1, 'b', s0).unwrap();

    let eliminated = eliminate_epsilons(&nfa).unwrap();

    assert_eq!(eliminated.transition_count(), nfa.transition_count());
    assert_eq!(eliminated.accepting_states(), nfa.accepting_states());
    assert_same_language(&nfa, &eliminated, 6);
}

#[test]
fn source_is_not_modified() {
    let mut enfa = Automaton::<char>::epsilon_nfa(vec!['a']);
    let q0 = enfa.add_state(false);
    let q1 = enfa.add_state(true);
    enfa.set_start(q0).unwrap();
    enfa.add_epsilon_transition(q0, q1).unwrap();

    let before = enfa.transition_count();
    let _ = eliminate_epsilons(&enfa).unwrap();

    assert_eq!(enfa.transition_count(), before);
    assert!(!enfa.is_epsilon_free());
    assert!(!enfa.is_accepting(q0).unwrap());
}

#[test]
fn requires_start_state() {
    let mut enfa = Automaton::<char>::epsilon_nfa(vec!['a']);
    enfa.add_state(true);

    assert!(matches!(
        eliminate_epsilons(&enfa),
        Err(AutomatonError::NoStartState)
    ));
}

#[test]
fn with_logger() {
    let logger = Logger::new(LogLevel::Error, "Epsilon Elimination");

    let mut enfa = Automaton::<char>::epsilon_nfa(vec!['a']);
    let q0 = enfa.add_state(false);
    let q1 = enfa.add_state(true);
    enfa.set_start(q0).unwrap();
    enfa.add_epsilon_transition(q0, q1).unwrap();
    enfa.add_symbol_transition(q1, 'a', q1).unwrap();

    let nfa = EpsilonEliminator::new()
        .with_logger(&logger)
        .run(&enfa)
        .unwrap();

    assert_same_language(&enfa, &nfa, 5);
}
