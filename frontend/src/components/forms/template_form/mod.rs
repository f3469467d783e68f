//! Template form dialog: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering and helpers.
//!
//! Responsibilities
//! - Re-export selected types (`Msg`, `TemplateFormProps`, `TemplateFormComponent`).
//! - Provide the `Component` implementation that delegates to `update::update` and `view::view`.
//! - On first render, fetch the template library for the configured source.
//! - Follow the `open` prop: opening slides the sheet in, closing discards the
//!   in-progress record.

use common::model::template::FormTemplate;
use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

use crate::tops_sheet::yw_material_top_sheet::{close_top_sheet, open_top_sheet};

pub use messages::Msg;
pub use props::{LibrarySource, TemplateFormProps};
pub use state::TemplateFormComponent;

impl Component for TemplateFormComponent {
    type Message = Msg;
    type Properties = TemplateFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        TemplateFormComponent::new(ctx.props().kind, ctx.props().source)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.kind != old_props.kind || props.source != old_props.source {
            *self = TemplateFormComponent::new(props.kind, props.source);
            return true;
        }
        match (old_props.open, props.open) {
            (false, true) => open_top_sheet(self.dialog_ref.clone()),
            (true, false) => {
                self.pending = None;
                self.session.close();
                close_top_sheet(self.dialog_ref.clone());
            }
            _ => {}
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && ctx.props().open {
            open_top_sheet(self.dialog_ref.clone());
        }
        if !self.loaded {
            self.loaded = true;
            self.loading = true;
            fetch_library(ctx.link().clone(), ctx.props().source.endpoint());
        }
    }
}

fn fetch_library(link: yew::html::Scope<TemplateFormComponent>, endpoint: &'static str) {
    spawn_local(async move {
        match Request::get(endpoint).send().await {
            Ok(resp) if resp.status() == 200 => match resp.json::<Vec<FormTemplate>>().await {
                Ok(templates) => link.send_message(Msg::LibraryLoaded(templates)),
                Err(err) => link.send_message(Msg::LibraryFailed(err.to_string())),
            },
            Ok(resp) => link.send_message(Msg::LibraryFailed(format!(
                "HTTP {}",
                resp.status()
            ))),
            Err(err) => link.send_message(Msg::LibraryFailed(err.to_string())),
        }
    });
}
