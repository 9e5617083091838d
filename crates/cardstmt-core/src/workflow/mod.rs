//! Extraction workflow: the interaction state machine and its controller.

mod controller;
mod state;

pub use controller::{ParseRequest, WorkflowController};
pub use state::{Completion, Event, Ignored, ParseTicket, WorkflowState, transition};
