//! Workflow controller: owns the candidate file and drives the state machine.

use tracing::{debug, info, warn};

use crate::error::{ServiceError, ValidationError};
use crate::input::{self, DropEvent, GestureEvent, SelectionSource};
use crate::models::candidate::{CandidateFile, CandidateId, FilePayload};
use crate::models::record::ExtractedRecord;
use crate::service::ParseService;

use super::state::{Completion, Event, Ignored, ParseTicket, WorkflowState, transition};

/// A request the caller must issue and later hand back via
/// [`WorkflowController::complete`].
#[derive(Debug, Clone)]
pub struct ParseRequest<F> {
    ticket: ParseTicket,
    file: CandidateFile<F>,
}

impl<F: FilePayload> ParseRequest<F> {
    pub fn ticket(&self) -> ParseTicket {
        self.ticket
    }

    pub fn file(&self) -> &CandidateFile<F> {
        &self.file
    }
}

/// Single source of truth for the upload-and-extract interaction.
///
/// At most one request is in flight at a time. Responses are tagged with the
/// ticket they were issued under and dropped if the controller moved on.
#[derive(Debug)]
pub struct WorkflowController<F> {
    state: WorkflowState,
    candidate: Option<CandidateFile<F>>,
    next_candidate: u64,
    next_attempt: u64,
}

impl<F: FilePayload> Default for WorkflowController<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FilePayload> WorkflowController<F> {
    pub fn new() -> Self {
        Self {
            state: WorkflowState::Idle,
            candidate: None,
            next_candidate: 0,
            next_attempt: 0,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn candidate(&self) -> Option<&CandidateFile<F>> {
        self.candidate.as_ref()
    }

    /// Record from the last successful attempt, if the view shows one.
    pub fn record(&self) -> Option<&ExtractedRecord> {
        match &self.state {
            WorkflowState::Success(record) => Some(record),
            _ => None,
        }
    }

    /// Message of the current failure, or of a selection rejected while parsing.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            WorkflowState::Failed(message) => Some(message),
            WorkflowState::Parsing { notice, .. } => notice.as_deref(),
            _ => None,
        }
    }

    pub fn is_parsing(&self) -> bool {
        matches!(self.state, WorkflowState::Parsing { .. })
    }

    /// Whether a trigger would issue a request right now.
    pub fn can_parse(&self) -> bool {
        self.candidate.is_some() && !self.is_parsing()
    }

    /// Handle a manual file chooser selection.
    pub fn select_from_picker<I>(&mut self, selection: I) -> Result<CandidateId, ValidationError>
    where
        I: IntoIterator<Item = F>,
    {
        self.select(selection, SelectionSource::Picker)
    }

    /// Handle a drop gesture. The default action is suppressed whatever the payload.
    pub fn select_from_drop<E>(&mut self, event: &E) -> Result<CandidateId, ValidationError>
    where
        E: DropEvent<File = F>,
    {
        input::suppress(event);
        self.select(event.files(), SelectionSource::Drop)
    }

    /// Handle a drag-over so the drop target can receive the following drop.
    pub fn accept_drag_over<E: GestureEvent + ?Sized>(&self, event: &E) {
        input::suppress(event);
    }

    fn select<I>(&mut self, files: I, source: SelectionSource) -> Result<CandidateId, ValidationError>
    where
        I: IntoIterator<Item = F>,
    {
        match input::accept_first(files, source) {
            Ok(file) => {
                self.next_candidate += 1;
                let id = CandidateId(self.next_candidate);
                info!("Accepted {} from {:?} as candidate {}", file.name(), source, id);

                self.candidate = Some(CandidateFile::new(id, file));
                self.apply(Event::FileAccepted);
                Ok(id)
            }
            Err(error) => {
                // A rejected re-selection keeps the previous candidate.
                self.apply(Event::SelectionRejected(error));
                Err(error)
            }
        }
    }

    /// Start a parse attempt.
    ///
    /// Returns the request to issue, or `None` when nothing should be sent:
    /// either no candidate is installed (state becomes Failed) or a request
    /// is already in flight (no-op).
    pub fn begin_parse(&mut self) -> Option<ParseRequest<F>> {
        if self.is_parsing() {
            debug!("Parse already in flight, ignoring trigger");
            return None;
        }

        let request = self.candidate.as_ref().map(|file| {
            self.next_attempt += 1;
            ParseRequest {
                ticket: ParseTicket {
                    candidate: file.id(),
                    attempt: self.next_attempt,
                },
                file: file.clone(),
            }
        });

        let ticket = request.as_ref().map(ParseRequest::ticket);
        self.apply(Event::ParseTriggered { ticket });

        if let Some(request) = &request {
            info!(
                "Parsing {} (candidate {}, attempt {})",
                request.file.name(),
                request.ticket.candidate,
                request.ticket.attempt
            );
        }
        request
    }

    /// Apply the outcome of the request issued under `ticket`.
    pub fn complete(
        &mut self,
        ticket: ParseTicket,
        outcome: Result<ExtractedRecord, ServiceError>,
    ) -> Completion {
        if let Err(error) = &outcome {
            warn!("Parse attempt {} failed: {}", ticket.attempt, error);
        }

        match self.apply(Event::ResponseResolved { ticket, outcome }) {
            Ok(()) => Completion::Applied,
            Err(_) => Completion::Stale,
        }
    }

    /// Trigger a parse and await its single response.
    pub async fn trigger_parse<S: ParseService>(&mut self, service: &S) -> &WorkflowState {
        if let Some(request) = self.begin_parse() {
            let outcome = service.parse(request.file().payload()).await;
            self.complete(request.ticket(), outcome);
        }
        &self.state
    }

    fn apply(&mut self, event: Event) -> Result<(), Ignored> {
        match transition(&self.state, event) {
            Ok(next) => {
                debug!("Workflow {} -> {}", self.state.name(), next.name());
                self.state = next;
                Ok(())
            }
            Err(reason) => {
                debug!("Workflow stays {}: {:?}", self.state.name(), reason);
                Err(reason)
            }
        }
    }
}
