//! Lifecycle of a single repository operation.
//!
//! ```text
//! Idle ──Invoke──► Loading ──Succeed──► Succeeded
//!                     │  ▲                 │
//!                     │  └─────Invoke──────┤
//!                     └──Fail──► Failed ───┘
//! ```
//!
//! A new invocation may start from any state. Terminal inputs are also
//! accepted from the terminal states, since overlapping invocations of the
//! same operation each deliver their own terminal result.

use rust_fsm::*;

state_machine! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub operation_machine(Idle)

    Idle => {
        Invoke => Loading
    },
    Loading => {
        Invoke => Loading,
        Succeed => Succeeded,
        Fail => Failed
    },
    Succeeded => {
        Invoke => Loading,
        Succeed => Succeeded,
        Fail => Failed
    },
    Failed => {
        Invoke => Loading,
        Succeed => Succeeded,
        Fail => Failed
    }
}

pub use operation_machine::Input as OperationInput;
pub use operation_machine::State as OperationMachineState;
pub use operation_machine::StateMachine as OperationMachine;

/// Coarse phase of an operation, for callers that do not need the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationPhase {
    /// Never invoked.
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl OperationPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationPhase::Succeeded | OperationPhase::Failed)
    }
}

impl From<&OperationMachineState> for OperationPhase {
    fn from(state: &OperationMachineState) -> Self {
        match state {
            OperationMachineState::Idle => OperationPhase::Idle,
            OperationMachineState::Loading => OperationPhase::Loading,
            OperationMachineState::Succeeded => OperationPhase::Succeeded,
            OperationMachineState::Failed => OperationPhase::Failed,
        }
    }
}
