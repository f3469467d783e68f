//! Submission hand-off.
//!
//! The pipeline runs in three gates: the engine precondition (a template is
//! selected), the native input constraints of the rendered widgets, then the
//! sink. Only a sink that accepts the package ends the session.
//!
//! A sink that answers later (an HTTP endpoint) splits the run in two:
//! `prepare` builds the package to send, and once the answer is known
//! `submit` is replayed with a [`Delivery`] as the sink.

use log::{debug, info, warn};

use crate::engine::binder::RecordBinder;
use crate::engine::filter::FormKind;
use crate::engine::validator::missing_required;
use crate::error::EngineError;
use crate::model::notification::Notification;
use crate::model::submission::SubmissionPackage;

pub const ERROR_TITLE: &str = "Erreur";
pub const NO_TEMPLATE_MESSAGE: &str = "Veuillez sélectionner un formulaire depuis la bibliothèque.";
pub const SINK_REJECTED_MESSAGE: &str = "L'enregistrement a échoué. Veuillez réessayer.";

/// Workflow collaborator receiving completed packages.
pub trait SubmissionSink {
    /// Returns whether the package was accepted.
    fn accept(&mut self, package: &SubmissionPackage) -> bool;
}

/// Collecting sink, always accepts.
impl SubmissionSink for Vec<SubmissionPackage> {
    fn accept(&mut self, package: &SubmissionPackage) -> bool {
        self.push(package.clone());
        true
    }
}

/// User-facing notification channel (toasts).
pub trait Notifier {
    fn info(&mut self, title: &str, message: &str);
    fn error(&mut self, title: &str, message: &str);
}

impl Notifier for Vec<Notification> {
    fn info(&mut self, title: &str, message: &str) {
        self.push(Notification::info(title, message));
    }

    fn error(&mut self, title: &str, message: &str) {
        self.push(Notification::error(title, message));
    }
}

/// The dialog hosting the form.
pub trait DialogHost {
    fn close(&mut self);
}

impl<F: FnMut()> DialogHost for F {
    fn close(&mut self) {
        self()
    }
}

/// Delivery result of a package sent ahead through [`prepare`], replayed as
/// the sink once the transport has answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Accepted,
    Refused,
}

impl From<bool> for Delivery {
    fn from(accepted: bool) -> Self {
        if accepted {
            Delivery::Accepted
        } else {
            Delivery::Refused
        }
    }
}

impl SubmissionSink for Delivery {
    fn accept(&mut self, _package: &SubmissionPackage) -> bool {
        *self == Delivery::Accepted
    }
}

/// Runs the first two gates and builds the package, without touching the
/// binder. Only the missing-selection gate notifies.
pub fn prepare<N>(binder: &RecordBinder, notifier: &mut N) -> Result<SubmissionPackage, EngineError>
where
    N: Notifier + ?Sized,
{
    let Some(template) = binder.selected() else {
        notifier.error(ERROR_TITLE, NO_TEMPLATE_MESSAGE);
        return Err(EngineError::NoTemplateSelected);
    };

    let missing = missing_required(template, binder.record());
    if !missing.is_empty() {
        debug!(
            "Submission of `{}` blocked, required fields empty: {:?}",
            template.id, missing
        );
        return Err(EngineError::MissingRequired(missing));
    }

    Ok(SubmissionPackage::new(template, binder.record().clone()))
}

/// Submits the binder's current selection and record.
///
/// On success the package has been accepted by `sink`, an info notification
/// names the template, `dialog` has been closed and the binder is cleared.
/// On any error the binder is left exactly as it was.
pub fn submit<S, N, D>(
    binder: &mut RecordBinder,
    kind: FormKind,
    sink: &mut S,
    notifier: &mut N,
    dialog: &mut D,
) -> Result<SubmissionPackage, EngineError>
where
    S: SubmissionSink + ?Sized,
    N: Notifier + ?Sized,
    D: DialogHost + ?Sized,
{
    let package = prepare(binder, notifier)?;
    if !sink.accept(&package) {
        warn!("Submission of `{}` rejected by the sink", package.template_id);
        notifier.error(ERROR_TITLE, SINK_REJECTED_MESSAGE);
        return Err(EngineError::SinkRejected(package.template_id));
    }

    info!(
        "Submitted `{}` with {} fields",
        package.template_id,
        package.data.len()
    );
    notifier.info(
        kind.success_title(),
        &kind.success_message(&package.template_name),
    );
    dialog.close();
    binder.clear();
    Ok(package)
}
