use common::engine::filter::FormKind;
use yew::{html, Component, Context, Html};

use crate::components::forms::template_form::{LibrarySource, TemplateFormComponent};

pub enum AppMsg {
    Open(FormKind),
    Closed,
}

/// Landing page: one button per form kind, each opening its dialog.
pub struct App {
    open: Option<FormKind>,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self { open: None }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let open = match msg {
            AppMsg::Open(kind) => Some(kind),
            AppMsg::Closed => None,
        };
        let changed = self.open != open;
        self.open = open;
        changed
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="app-root">
                <div class="app-actions">
                    <button onclick={link.callback(|_| AppMsg::Open(FormKind::Procedure))}>
                        { "Nouvelle procédure administrative" }
                    </button>
                    <button onclick={link.callback(|_| AppMsg::Open(FormKind::LegalText))}>
                        { "Nouveau texte juridique" }
                    </button>
                </div>
                <TemplateFormComponent
                    kind={FormKind::Procedure}
                    source={LibrarySource::Catalogue}
                    open={self.open == Some(FormKind::Procedure)}
                    on_close={link.callback(|_| AppMsg::Closed)}
                />
                <TemplateFormComponent
                    kind={FormKind::LegalText}
                    source={LibrarySource::SavedForms}
                    open={self.open == Some(FormKind::LegalText)}
                    on_close={link.callback(|_| AppMsg::Closed)}
                />
            </div>
        }
    }
}
