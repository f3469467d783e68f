//! Component state for the template form dialog.
//!
//! All form data lives in the engine `FormSession`; the component only adds
//! what the browser needs around it (the dialog node, library loading status
//! and the submission awaiting the backend).

use common::engine::filter::FormKind;
use common::model::submission::SubmissionPackage;
use common::FormSession;
use yew::prelude::*;

use super::props::LibrarySource;

pub struct TemplateFormComponent {
    /// Engine session: offered templates, selection and record.
    pub session: FormSession,

    /// Reference to the top-sheet node wrapping the dialog.
    pub dialog_ref: NodeRef,

    /// Guard to fetch the library only once.
    pub loaded: bool,

    /// `true` while the library request is in flight.
    pub loading: bool,

    /// Last library loading error, shown instead of the picker.
    pub load_error: Option<String>,

    /// Package posted to the backend and not yet answered. Edits and new
    /// submits are ignored while it is set.
    pub pending: Option<SubmissionPackage>,
}

impl TemplateFormComponent {
    pub fn new(kind: FormKind, source: LibrarySource) -> Self {
        Self {
            session: FormSession::new(kind, source.filter(kind)),
            dialog_ref: NodeRef::default(),
            loaded: false,
            loading: false,
            load_error: None,
            pending: None,
        }
    }
}
