//! Core library for the credit card statement parser client.
//!
//! This crate provides:
//! - Input acquisition (file picker and drag-and-drop) with PDF-only validation
//! - The extraction workflow state machine and single-flight request discipline
//! - Result shaping of extracted records into display rows
//! - An HTTP client for the remote parsing service

pub mod error;
pub mod input;
pub mod models;
pub mod service;
pub mod shaping;
pub mod view;
pub mod workflow;

pub use error::{CardstmtError, PreconditionError, Result, ServiceError, ValidationError};
pub use input::{ACCEPTED_MEDIA_TYPE, DropEvent, GestureEvent, SelectionSource};
pub use models::candidate::{CandidateFile, CandidateId, FilePayload, InMemoryFile};
pub use models::config::ClientConfig;
pub use models::record::ExtractedRecord;
pub use service::ParseService;
#[cfg(feature = "http")]
pub use service::http::HttpParseService;
pub use shaping::{DisplayField, display_label, shape_record};
pub use view::View;
pub use workflow::{Completion, ParseRequest, ParseTicket, WorkflowController, WorkflowState};
