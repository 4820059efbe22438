/// The data stored for every state of an automaton.
///
/// A state is identified by its index in the automaton; the name is only used
/// for display and lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StateNode {
    pub accepting: bool,
    pub name: Option<String>,
}

impl StateNode {
    pub fn new(accepting: bool, name: Option<String>) -> Self {
        StateNode { accepting, name }
    }

    pub fn named(name: impl Into<String>, accepting: bool) -> Self {
        StateNode::new(accepting, Some(name.into()))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
