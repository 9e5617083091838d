//! What the interaction surface renders for a given controller.

use serde::Serialize;

use crate::models::candidate::FilePayload;
use crate::shaping::{DisplayField, shape_record};
use crate::workflow::{WorkflowController, WorkflowState};

pub const TITLE: &str = "Credit Card Statement Parser";
pub const SUBTITLE: &str = "Upload a PDF statement to extract key details automatically.";
pub const EMPTY_PROMPT: &str = "📁 Drag & drop a PDF or click to upload";
pub const PARSE_LABEL: &str = "Parse Statement";
pub const PARSING_LABEL: &str = "Parsing...";
pub const SPINNER_TEXT: &str = "Extracting data, please wait...";

/// Parse button appearance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    pub label: &'static str,
    pub enabled: bool,
}

/// Complete render model. `results` never appears with `spinner` or `error`;
/// `error` shows beside the spinner when a selection is rejected mid-parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Drop-zone text.
    pub prompt: String,
    pub parse_button: ButtonView,
    pub spinner: Option<&'static str>,
    pub error: Option<String>,
    pub results: Option<Vec<DisplayField>>,
}

impl<F: FilePayload> From<&WorkflowController<F>> for View {
    fn from(controller: &WorkflowController<F>) -> Self {
        let prompt = match controller.candidate() {
            Some(file) => format!("📄 Selected: {}", file.name()),
            None => EMPTY_PROMPT.to_string(),
        };

        let parsing = controller.is_parsing();
        let (spinner, error, results) = match controller.state() {
            WorkflowState::Idle | WorkflowState::FileReady => (None, None, None),
            WorkflowState::Parsing { notice, .. } => (Some(SPINNER_TEXT), notice.clone(), None),
            WorkflowState::Success(record) => (None, None, Some(shape_record(record))),
            WorkflowState::Failed(message) => (None, Some(message.clone()), None),
        };

        Self {
            title: TITLE,
            subtitle: SUBTITLE,
            prompt,
            parse_button: ButtonView {
                label: if parsing { PARSING_LABEL } else { PARSE_LABEL },
                enabled: controller.can_parse(),
            },
            spinner,
            error,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::models::candidate::InMemoryFile;
    use crate::models::record::ExtractedRecord;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn pdf(name: &str) -> InMemoryFile {
        InMemoryFile::new(name, "application/pdf", b"%PDF".to_vec())
    }

    #[test]
    fn test_idle_view() {
        let controller: WorkflowController<InMemoryFile> = WorkflowController::new();
        let view = View::from(&controller);

        assert_eq!(view.prompt, EMPTY_PROMPT);
        assert_eq!(view.parse_button, ButtonView { label: PARSE_LABEL, enabled: false });
        assert_eq!(view.spinner, None);
        assert_eq!(view.error, None);
        assert_eq!(view.results, None);
    }

    #[test]
    fn test_parsing_view() {
        let mut controller = WorkflowController::new();
        controller.select_from_picker(vec![pdf("june.pdf")]).unwrap();
        assert!(View::from(&controller).parse_button.enabled);

        controller.begin_parse().unwrap();
        let view = View::from(&controller);
        assert_eq!(view.prompt, "📄 Selected: june.pdf");
        assert_eq!(view.parse_button, ButtonView { label: PARSING_LABEL, enabled: false });
        assert_eq!(view.spinner, Some(SPINNER_TEXT));
    }

    #[test]
    fn test_rejected_drop_while_parsing_shows_error() {
        use crate::input::{DropEvent, GestureEvent};

        struct PngDrop;

        impl GestureEvent for PngDrop {
            fn prevent_default(&self) {}
            fn stop_propagation(&self) {}
        }

        impl DropEvent for PngDrop {
            type File = InMemoryFile;

            fn files(&self) -> Vec<InMemoryFile> {
                vec![InMemoryFile::new("scan.png", "image/png", b"\x89PNG".to_vec())]
            }
        }

        let mut controller = WorkflowController::new();
        controller.select_from_picker(vec![pdf("june.pdf")]).unwrap();
        let request = controller.begin_parse().unwrap();

        assert!(controller.select_from_drop(&PngDrop).is_err());
        let view = View::from(&controller);
        assert_eq!(view.error.as_deref(), Some("Please drop a valid PDF file."));
        assert_eq!(view.spinner, Some(SPINNER_TEXT));
        assert_eq!(view.prompt, "📄 Selected: june.pdf");

        let record = ExtractedRecord::try_from(json!({"issuer": "Chase"})).unwrap();
        controller.complete(request.ticket(), Ok(record));
        let view = View::from(&controller);
        assert_eq!(view.error, None);
        assert!(view.results.is_some());
    }

    #[test]
    fn test_success_and_failure_views() {
        let mut controller = WorkflowController::new();
        controller.select_from_picker(vec![pdf("june.pdf")]).unwrap();

        let request = controller.begin_parse().unwrap();
        let record = ExtractedRecord::try_from(json!({"issuer": "Chase"})).unwrap();
        controller.complete(request.ticket(), Ok(record));
        let view = View::from(&controller);
        assert_eq!(view.error, None);
        assert_eq!(
            view.results.unwrap()[0].as_pair(),
            ("Card Issuer", "Chase")
        );

        let request = controller.begin_parse().unwrap();
        controller.complete(request.ticket(), Err(ServiceError::rejected(500, None)));
        let view = View::from(&controller);
        assert_eq!(view.error.as_deref(), Some("Server error."));
        assert_eq!(view.results, None);
        assert!(view.parse_button.enabled);
    }
}
