//! Input acquisition: candidate files from the picker or a drop gesture.

use tracing::debug;

use crate::error::ValidationError;
use crate::models::candidate::FilePayload;

/// The only media type the parsing service accepts.
pub const ACCEPTED_MEDIA_TYPE: &str = "application/pdf";

/// Where a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    /// Manual file chooser.
    Picker,
    /// Drag-and-drop onto the drop zone.
    Drop,
}

impl SelectionSource {
    /// Error reported when this source yields nothing acceptable.
    pub fn rejection(self) -> ValidationError {
        match self {
            Self::Picker => ValidationError::InvalidSelection,
            Self::Drop => ValidationError::InvalidDrop,
        }
    }
}

/// A UI event whose platform default and propagation can be suppressed.
pub trait GestureEvent {
    /// Cancel the platform default (e.g. navigating to a dropped file).
    fn prevent_default(&self);

    /// Stop the event from reaching enclosing handlers.
    fn stop_propagation(&self);
}

/// A drop gesture carrying zero or more files.
pub trait DropEvent: GestureEvent {
    type File: FilePayload;

    /// Files in the drop payload, in platform order.
    fn files(&self) -> Vec<Self::File>;
}

/// Suppress both the default action and propagation of a gesture.
pub fn suppress<E: GestureEvent + ?Sized>(event: &E) {
    event.prevent_default();
    event.stop_propagation();
}

/// Whether a declared media type is accepted.
pub fn is_accepted_media_type(media_type: &str) -> bool {
    media_type == ACCEPTED_MEDIA_TYPE
}

/// Take the first file of a selection and check its declared type.
///
/// Further files are ignored. An empty selection is a rejection.
pub fn accept_first<F, I>(files: I, source: SelectionSource) -> Result<F, ValidationError>
where
    F: FilePayload,
    I: IntoIterator<Item = F>,
{
    match files.into_iter().next() {
        Some(file) if is_accepted_media_type(file.media_type()) => Ok(file),
        Some(file) => {
            debug!(
                "Rejected {:?} from {:?}: declared type {:?}",
                file.name(),
                source,
                file.media_type()
            );
            Err(source.rejection())
        }
        None => {
            debug!("Rejected empty selection from {:?}", source);
            Err(source.rejection())
        }
    }
}
