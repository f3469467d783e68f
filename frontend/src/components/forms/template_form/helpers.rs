//! Browser-side helpers for the template form dialog.
//!
//! - **User Feedback**: temporary toast notifications for the engine's info
//!   and error signals.
//! - **Collaborators**: adapters plugging the toast helper and the top-sheet
//!   dialog into the engine's `Notifier` and `DialogHost` seams.
//! - **Delivery**: settling the engine once the backend answered a post.
//! - **Messages**: wording for required fields still empty on submit.

use common::engine::pipeline::{Delivery, DialogHost, Notifier};
use common::model::notification::{Notification, NotificationLevel};
use common::model::submission::SubmissionPackage;
use common::model::template::FormTemplate;
use common::{EngineError, FormSession};
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;
use yew::{Callback, NodeRef};

use crate::tops_sheet::yw_material_top_sheet::close_top_sheet;

const TOAST_DURATION_MS: u32 = 3000;

/// Displays a temporary notification at the bottom of the screen.
///
/// The toast is a styled `div` injected into `body` that removes itself after
/// a few seconds. Errors get a red background, everything else a dark one.
pub fn show_toast(level: NotificationLevel, title: &str, message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };

    let title_el = document.create_element("strong").ok();
    let message_el = document.create_element("div").ok();
    if let (Some(title_el), Some(message_el)) = (title_el, message_el) {
        title_el.set_text_content(Some(title));
        message_el.set_text_content(Some(message));
        let _ = toast.append_child(&title_el);
        let _ = toast.append_child(&message_el);
    }

    let background = match level {
        NotificationLevel::Info => "rgba(0, 0, 0, 0.8)",
        NotificationLevel::Error => "rgba(198, 40, 40, 0.92)",
    };

    let html_toast: HtmlElement = toast.unchecked_into();
    let style = html_toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("background", background).ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();
    style.set_property("font-family", "Arial, sans-serif").ok();

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

/// Engine notifier backed by toasts.
pub struct ToastNotifier;

impl Notifier for ToastNotifier {
    fn info(&mut self, title: &str, message: &str) {
        show_toast(NotificationLevel::Info, title, message);
    }

    fn error(&mut self, title: &str, message: &str) {
        show_toast(NotificationLevel::Error, title, message);
    }
}

/// Engine dialog host: slides the top sheet away and tells the parent.
pub struct TopSheetDialog {
    pub node_ref: NodeRef,
    pub on_close: Callback<()>,
}

impl DialogHost for TopSheetDialog {
    fn close(&mut self) {
        close_top_sheet(self.node_ref.clone());
        self.on_close.emit(());
    }
}

/// Replays the submission of `sent` with the backend's answer as the sink.
///
/// Returns `None` when the session no longer holds the record that was sent
/// (the dialog was closed meanwhile); the answer is then dropped.
pub fn settle_delivery<N, D>(
    session: &mut FormSession,
    sent: &SubmissionPackage,
    delivery: Delivery,
    notifier: &mut N,
    dialog: &mut D,
) -> Option<Result<SubmissionPackage, EngineError>>
where
    N: Notifier + ?Sized,
    D: DialogHost + ?Sized,
{
    let mut quiet: Vec<Notification> = Vec::new();
    match session.prepare_submission(&mut quiet) {
        Ok(current) if current == *sent => {
            let mut delivery = delivery;
            Some(session.submit(&mut delivery, notifier, dialog))
        }
        _ => None,
    }
}

/// "Champs obligatoires manquants : Nom, Date" using field labels, falling
/// back to the identifier for fields the template does not describe.
pub fn missing_fields_message(template: Option<&FormTemplate>, field_ids: &[String]) -> String {
    let labels: Vec<&str> = field_ids
        .iter()
        .map(|id| {
            template
                .and_then(|t| t.field(id))
                .map(|f| f.label.as_str())
                .unwrap_or(id.as_str())
        })
        .collect();
    format!("Champs obligatoires manquants : {}", labels.join(", "))
}
