//! Update function for the template form dialog.
//!
//! Elm-style: receives the component state, the `Context` and a `Msg`,
//! forwards it to the engine session and returns whether the view should
//! re-render. The engine is synchronous, so a submit runs in two steps: the
//! prepared package is posted from a spawned task, and the engine submission
//! is settled with the backend's answer as the sink. Only an accepted post
//! closes the dialog and clears the record.

use common::engine::pipeline::{Delivery, ERROR_TITLE};
use common::model::notification::NotificationLevel;
use common::model::submission::{SubmissionPackage, SubmissionReceipt};
use common::EngineError;
use gloo_console::{error, log};
use gloo_net::http::Request;
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::tops_sheet::yw_material_top_sheet::close_top_sheet;

use super::helpers::{
    missing_fields_message, settle_delivery, show_toast, ToastNotifier, TopSheetDialog,
};
use super::messages::Msg;
use super::state::TemplateFormComponent;

const SUBMISSIONS_ENDPOINT: &str = "/api/submissions";

pub fn update(
    component: &mut TemplateFormComponent,
    ctx: &Context<TemplateFormComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::LibraryLoaded(templates) => {
            component.loading = false;
            component.load_error = None;
            component.session.load_templates(&templates);
            true
        }
        Msg::LibraryFailed(err) => {
            component.loading = false;
            component.load_error = Some(err);
            true
        }
        Msg::SelectTemplate(_) | Msg::FieldChanged { .. } if component.pending.is_some() => false,
        Msg::SelectTemplate(template_id) => {
            component.session.select(&template_id);
            true
        }
        Msg::FieldChanged { field_id, value } => {
            match component.session.set_field_value(&field_id, value) {
                Ok(changed) => changed,
                Err(err) => {
                    error!(format!("Edit of `{}` ignored: {}", field_id, err));
                    false
                }
            }
        }
        Msg::Submit => {
            if component.pending.is_some() {
                return false;
            }
            match component.session.prepare_submission(&mut ToastNotifier) {
                Ok(package) => {
                    log!(format!("Posting submission for `{}`", package.template_id));
                    component.pending = Some(package.clone());
                    deliver(ctx.link().clone(), package);
                }
                Err(EngineError::MissingRequired(field_ids)) => {
                    show_toast(
                        NotificationLevel::Error,
                        ERROR_TITLE,
                        &missing_fields_message(component.session.selected(), &field_ids),
                    );
                }
                // The engine already notified the user.
                Err(_) => {}
            }
            true
        }
        Msg::Cancel => {
            component.pending = None;
            component.session.close();
            close_top_sheet(component.dialog_ref.clone());
            ctx.props().on_close.emit(());
            true
        }
        Msg::SubmissionDelivered(receipt_id) => {
            log!(format!("Submission stored, receipt {}", receipt_id));
            settle(component, ctx, Delivery::Accepted)
        }
        Msg::SubmissionFailed(err) => {
            error!(format!("Submission refused by the backend: {}", err));
            settle(component, ctx, Delivery::Refused)
        }
    }
}

/// Settles the engine submission for the package in flight.
fn settle(
    component: &mut TemplateFormComponent,
    ctx: &Context<TemplateFormComponent>,
    delivery: Delivery,
) -> bool {
    let Some(sent) = component.pending.take() else {
        return false;
    };
    let mut dialog = TopSheetDialog {
        node_ref: component.dialog_ref.clone(),
        on_close: ctx.props().on_close.clone(),
    };
    match settle_delivery(&mut component.session, &sent, delivery, &mut ToastNotifier, &mut dialog) {
        Some(Ok(package)) => log!(format!("Submission of `{}` completed", package.template_id)),
        // Refusals were already toasted by the engine.
        Some(Err(err)) => error!(format!("Submission of `{}` not completed: {}", sent.template_id, err)),
        None => log!(format!("Answer for `{}` arrived after the dialog closed", sent.template_id)),
    }
    true
}

/// Posts a prepared package to the workflow endpoint and reports the answer.
fn deliver(link: Scope<TemplateFormComponent>, package: SubmissionPackage) {
    spawn_local(async move {
        let request = match Request::post(SUBMISSIONS_ENDPOINT).json(&package) {
            Ok(request) => request,
            Err(err) => {
                link.send_message(Msg::SubmissionFailed(err.to_string()));
                return;
            }
        };
        match request.send().await {
            Ok(response) if response.ok() => match response.json::<SubmissionReceipt>().await {
                Ok(receipt) => link.send_message(Msg::SubmissionDelivered(receipt.receipt_id)),
                Err(err) => link.send_message(Msg::SubmissionFailed(err.to_string())),
            },
            Ok(response) => {
                let body = response.text().await.unwrap_or_default();
                link.send_message(Msg::SubmissionFailed(body));
            }
            Err(err) => link.send_message(Msg::SubmissionFailed(err.to_string())),
        }
    });
}
