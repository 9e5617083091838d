//! Workflow states and the transition function.

use crate::error::{PreconditionError, ServiceError, ValidationError};
use crate::models::candidate::CandidateId;
use crate::models::record::ExtractedRecord;

/// Tag identifying one outbound request.
///
/// A response is applied only while the controller is still parsing under
/// the same ticket; anything else is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseTicket {
    /// Candidate the request was issued for.
    pub candidate: CandidateId,
    /// Monotonic attempt counter.
    pub attempt: u64,
}

/// What the interaction surface should currently show. Exactly one is active.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    /// Nothing selected yet.
    Idle,
    /// A candidate is installed and no request is in flight.
    FileReady,
    /// One request is in flight. `notice` holds a validation error raised
    /// meanwhile; the response replaces it.
    Parsing {
        ticket: ParseTicket,
        notice: Option<String>,
    },
    /// The service returned a record.
    Success(ExtractedRecord),
    /// The last selection or attempt failed.
    Failed(String),
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FileReady => "file_ready",
            Self::Parsing { .. } => "parsing",
            Self::Success(_) => "success",
            Self::Failed(_) => "failed",
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A new candidate was installed.
    FileAccepted,
    /// A selection or drop was rejected by validation.
    SelectionRejected(ValidationError),
    /// Parse was triggered; `ticket` is `None` when no candidate is installed.
    ParseTriggered { ticket: Option<ParseTicket> },
    /// The request issued under `ticket` finished.
    ResponseResolved {
        ticket: ParseTicket,
        outcome: Result<ExtractedRecord, ServiceError>,
    },
}

/// Why an event left the state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// Parse triggered while a request is already in flight.
    AlreadyParsing,
    /// Response for a ticket that is no longer current.
    StaleResponse,
}

/// Result of applying a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

/// Next state for `(state, event)`, or the reason it stays put.
pub fn transition(state: &WorkflowState, event: Event) -> Result<WorkflowState, Ignored> {
    use WorkflowState::*;

    match (state, event) {
        (_, Event::FileAccepted) => Ok(FileReady),

        (Parsing { ticket, .. }, Event::SelectionRejected(error)) => Ok(Parsing {
            ticket: *ticket,
            notice: Some(error.to_string()),
        }),
        (_, Event::SelectionRejected(error)) => Ok(Failed(error.to_string())),

        (Parsing { .. }, Event::ParseTriggered { .. }) => Err(Ignored::AlreadyParsing),
        (_, Event::ParseTriggered { ticket: None }) => {
            Ok(Failed(PreconditionError::NoFile.to_string()))
        }
        (_, Event::ParseTriggered { ticket: Some(ticket) }) => Ok(Parsing {
            ticket,
            notice: None,
        }),

        (Parsing { ticket: current, .. }, Event::ResponseResolved { ticket, outcome })
            if *current == ticket =>
        {
            Ok(match outcome {
                Ok(record) => Success(record),
                Err(error) => Failed(error.user_message()),
            })
        }
        (_, Event::ResponseResolved { .. }) => Err(Ignored::StaleResponse),
    }
}
