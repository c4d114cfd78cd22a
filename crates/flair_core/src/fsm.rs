//! Flat state machines for presentation states
//!
//! Effects model their discrete presentation (hidden/visible, idle/hovered)
//! as a small state machine so that the allowed transitions are data rather
//! than scattered `if` checks. A machine that lacks a transition simply
//! ignores the event, which is how one-way machines (reveal once) are built.

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an input event
pub type EventId = u32;

/// A transition between two states
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from_state: StateId,
    pub event: EventId,
    pub to_state: StateId,
}

impl Transition {
    pub const fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// Builder for [`StateMachine`]
#[derive(Clone, Debug)]
pub struct StateMachineBuilder {
    initial_state: StateId,
    transitions: Vec<Transition>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: Vec::new(),
        }
    }

    /// Add a transition `from --event--> to`
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine::new(self.initial_state, self.transitions)
    }
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine {
    initial_state: StateId,
    current_state: StateId,
    transitions: Vec<Transition>,
}

impl StateMachine {
    pub fn new(initial_state: StateId, transitions: Vec<Transition>) -> Self {
        Self {
            initial_state,
            current_state: initial_state,
            transitions,
        }
    }

    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    fn target_for(&self, event: EventId) -> Option<StateId> {
        self.transitions
            .iter()
            .find(|t| t.from_state == self.current_state && t.event == event)
            .map(|t| t.to_state)
    }

    /// Whether `event` would trigger a transition from the current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.target_for(event).is_some()
    }

    /// Feed an event; returns the state after handling it.
    ///
    /// Events with no matching transition leave the machine untouched.
    pub fn send(&mut self, event: EventId) -> StateId {
        if let Some(to_state) = self.target_for(event) {
            tracing::trace!(from = self.current_state, event, to = to_state, "fsm transition");
            self.current_state = to_state;
        }
        self.current_state
    }

    /// Jump back to the initial state
    pub fn reset(&mut self) {
        self.current_state = self.initial_state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIDDEN: StateId = 0;
    const VISIBLE: StateId = 1;

    const ENTER_VIEW: EventId = 1;
    const EXIT_VIEW: EventId = 2;

    #[test]
    fn test_simple_transitions() {
        let mut fsm = StateMachine::builder(HIDDEN)
            .on(HIDDEN, ENTER_VIEW, VISIBLE)
            .on(VISIBLE, EXIT_VIEW, HIDDEN)
            .build();

        assert!(fsm.is_in(HIDDEN));
        assert_eq!(fsm.send(ENTER_VIEW), VISIBLE);
        assert_eq!(fsm.send(ENTER_VIEW), VISIBLE);
        assert_eq!(fsm.send(EXIT_VIEW), HIDDEN);
    }

    #[test]
    fn test_one_way_machine_ignores_exit() {
        let mut fsm = StateMachine::new(HIDDEN, vec![Transition::new(HIDDEN, ENTER_VIEW, VISIBLE)]);

        assert!(!fsm.can_send(EXIT_VIEW));
        fsm.send(ENTER_VIEW);
        assert!(!fsm.can_send(EXIT_VIEW));
        fsm.send(EXIT_VIEW);
        assert!(fsm.is_in(VISIBLE));
    }

    #[test]
    fn test_reset() {
        let mut fsm = StateMachine::builder(HIDDEN)
            .on(HIDDEN, ENTER_VIEW, VISIBLE)
            .build();

        fsm.send(ENTER_VIEW);
        fsm.reset();
        assert!(fsm.is_in(HIDDEN));
        assert!(fsm.can_send(ENTER_VIEW));
    }
}
