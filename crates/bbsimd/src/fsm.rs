//! Per-entity state machines.
//!
//! Table-driven: each machine is a set of (state, event, next-state) rows
//! plus a pluggable observer notified on every transition. Side effects
//! (indication emission) belong to the mailbox loop driving the machine,
//! never to the machine itself. An event with no matching row is rejected
//! without mutating the current state.

use std::sync::Arc;

use tracing::debug;

use crate::error::{BbsimError, Result};

/// Readable label for states and events, used in indications and logs.
pub trait Labeled {
    fn label(&self) -> &'static str;
}

/// Hook notified after every successful transition.
pub trait TransitionObserver: Send + Sync {
    fn on_transition(&self, machine: &str, event: &str, from: &str, to: &str);
}

/// Default observer: logs transitions via tracing.
pub struct TracingObserver;

impl TransitionObserver for TracingObserver {
    fn on_transition(&self, machine: &str, event: &str, from: &str, to: &str) {
        debug!(machine, event, from, to, "state transition");
    }
}

/// A table-driven state machine.
pub struct Fsm<S: 'static, E: 'static> {
    name: String,
    state: S,
    table: &'static [(S, E, S)],
    observer: Arc<dyn TransitionObserver>,
}

impl<S, E> Fsm<S, E>
where
    S: Copy + PartialEq + Labeled,
    E: Copy + PartialEq + Labeled,
{
    pub fn new(name: impl Into<String>, initial: S, table: &'static [(S, E, S)]) -> Self {
        Self {
            name: name.into(),
            state: initial,
            table,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn TransitionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Applies an event. Fails without mutating the state when the current
    /// state has no row for the event.
    pub fn fire(&mut self, event: E) -> Result<S> {
        for (from, ev, to) in self.table {
            if *from == self.state && *ev == event {
                self.observer
                    .on_transition(&self.name, event.label(), from.label(), to.label());
                self.state = *to;
                return Ok(*to);
            }
        }
        Err(BbsimError::InvalidTransition {
            machine: self.name.clone(),
            event: event.label(),
            state: self.state.label(),
        })
    }

    pub fn state(&self) -> S {
        self.state
    }

    /// Current state as the label carried in indications.
    pub fn label(&self) -> &'static str {
        self.state.label()
    }
}

/// Operational state of a device or port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperState {
    Down,
    Up,
}

impl Labeled for OperState {
    fn label(&self) -> &'static str {
        match self {
            OperState::Down => "down",
            OperState::Up => "up",
        }
    }
}

/// Events accepted by operational machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperEvent {
    Enable,
    Disable,
}

impl Labeled for OperEvent {
    fn label(&self) -> &'static str {
        match self {
            OperEvent::Enable => "enable",
            OperEvent::Disable => "disable",
        }
    }
}

/// OLT lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OltState {
    Created,
    Enabled,
    Disabled,
}

impl Labeled for OltState {
    fn label(&self) -> &'static str {
        match self {
            OltState::Created => "created",
            OltState::Enabled => "enabled",
            OltState::Disabled => "disabled",
        }
    }
}

/// ONU internal lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnuState {
    Created,
    Discovered,
    Enabled,
    Disabled,
}

impl Labeled for OnuState {
    fn label(&self) -> &'static str {
        match self {
            OnuState::Created => "created",
            OnuState::Discovered => "discovered",
            OnuState::Enabled => "enabled",
            OnuState::Disabled => "disabled",
        }
    }
}

/// Events accepted by the ONU internal machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnuEvent {
    Discover,
    Enable,
    Disable,
}

impl Labeled for OnuEvent {
    fn label(&self) -> &'static str {
        match self {
            OnuEvent::Discover => "discover",
            OnuEvent::Enable => "enable",
            OnuEvent::Disable => "disable",
        }
    }
}

pub type OperFsm = Fsm<OperState, OperEvent>;
pub type OltLifecycleFsm = Fsm<OltState, OltEvent>;
pub type OnuInternalFsm = Fsm<OnuState, OnuEvent>;

/// Events accepted by the OLT lifecycle machine.
pub type OltEvent = OperEvent;

const OPER_TABLE: &[(OperState, OperEvent, OperState)] = &[
    (OperState::Down, OperEvent::Enable, OperState::Up),
    (OperState::Up, OperEvent::Disable, OperState::Down),
];

const OLT_LIFECYCLE_TABLE: &[(OltState, OltEvent, OltState)] = &[
    (OltState::Created, OperEvent::Enable, OltState::Enabled),
    (OltState::Enabled, OperEvent::Disable, OltState::Disabled),
];

// Activation may arrive without a preceding discovery round-trip, so
// `enable` is accepted from both created and discovered.
const ONU_INTERNAL_TABLE: &[(OnuState, OnuEvent, OnuState)] = &[
    (OnuState::Created, OnuEvent::Discover, OnuState::Discovered),
    (OnuState::Created, OnuEvent::Enable, OnuState::Enabled),
    (OnuState::Discovered, OnuEvent::Enable, OnuState::Enabled),
    (OnuState::Enabled, OnuEvent::Disable, OnuState::Disabled),
];

/// Operational machine for the OLT and each NNI/PON port; starts down.
pub fn oper_state_machine(name: impl Into<String>) -> OperFsm {
    Fsm::new(name, OperState::Down, OPER_TABLE)
}

/// Lifecycle machine for the OLT; starts created.
pub fn olt_lifecycle_machine(name: impl Into<String>) -> OltLifecycleFsm {
    Fsm::new(name, OltState::Created, OLT_LIFECYCLE_TABLE)
}

/// Internal machine for an ONU; starts created.
pub fn onu_internal_machine(name: impl Into<String>) -> OnuInternalFsm {
    Fsm::new(name, OnuState::Created, ONU_INTERNAL_TABLE)
}
