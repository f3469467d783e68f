//! View rendering for the template form dialog.
//!
//! The dialog has two cards: the library picker (with a short description of
//! the selected template) and, once something is selected, the generated
//! field grid. Field widgets come from the engine's resolver; this module
//! only turns each resolved shape into markup.
//!
//! Notes
//! - User-facing text is French, like the engine's notifications.
//! - Native `required` attributes let the browser block an incomplete form
//!   before `onsubmit` fires; the engine re-checks on its side.

use common::engine::widget::{ColumnSpan, OnChange, RenderableWidget, WidgetShape};
use common::model::record::FieldValue;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::tops_sheet::yw_material_top_sheet::YwMaterialTopSheet;

use super::messages::Msg;
use super::state::TemplateFormComponent;

const PICKER_PLACEHOLDER: &str = "Sélectionner un formulaire depuis la bibliothèque";

pub fn view(component: &TemplateFormComponent, ctx: &Context<TemplateFormComponent>) -> Html {
    let link = ctx.link();
    let kind = component.session.kind();

    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });

    html! {
        <YwMaterialTopSheet node_ref={component.dialog_ref.clone()}>
            <div class="form-dialog">
                <h2 class="form-dialog-title">{ kind.dialog_title() }</h2>
                <form {onsubmit} class="form-dialog-body">
                    { build_picker_card(component, link) }
                    { build_fields_card(component, link) }
                    <div class="form-dialog-actions">
                        <button type="button" class="btn-outline" onclick={link.callback(|_| Msg::Cancel)}>
                            { "Annuler" }
                        </button>
                        <button type="submit" class="btn-primary" disabled={!component.session.can_submit() || component.pending.is_some()}>
                            { kind.submit_label() }
                        </button>
                    </div>
                </form>
            </div>
        </YwMaterialTopSheet>
    }
}

/// Library picker. An empty offer renders a single disabled entry instead of
/// the template list.
fn build_picker_card(component: &TemplateFormComponent, link: &Scope<TemplateFormComponent>) -> Html {
    let session = &component.session;
    let selected_id = session.selected_id().to_string();

    let onchange = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SelectTemplate(select.value())
    });

    let entries = if component.loading {
        html! { <option value="" disabled={true}>{ "Chargement de la bibliothèque…" }</option> }
    } else if let Some(err) = &component.load_error {
        html! { <option value="" disabled={true}>{ format!("Bibliothèque indisponible ({})", err) }</option> }
    } else if session.templates().is_empty() {
        html! { <option value="" disabled={true}>{ session.kind().empty_library_message() }</option> }
    } else {
        session
            .templates()
            .iter()
            .map(|t| {
                html! {
                    <option value={t.id.clone()} selected={t.id == selected_id}>
                        { t.picker_label() }
                    </option>
                }
            })
            .collect::<Html>()
    };

    let summary = match session.selected() {
        Some(template) => html! {
            <div class="template-summary">
                <p><strong>{ "Description: " }</strong>{ template.description.clone() }</p>
                <p><strong>{ "Champs: " }</strong>{ format!("{} champs configurés", template.fields.len()) }</p>
            </div>
        },
        None => html! {},
    };

    html! {
        <section class="card">
            <h3 class="card-title">{ "Sélection du formulaire" }</h3>
            <label for="form-select">{ "Formulaire depuis la bibliothèque " }<span class="required">{ "*" }</span></label>
            <select id="form-select" {onchange}>
                <option value="" selected={selected_id.is_empty()}>{ PICKER_PLACEHOLDER }</option>
                { entries }
            </select>
            { summary }
        </section>
    }
}

fn build_fields_card(component: &TemplateFormComponent, link: &Scope<TemplateFormComponent>) -> Html {
    if component.session.selected().is_none() {
        return html! {};
    }

    let widgets = component.session.widgets(|field| {
        let field_id = field.identifier.clone();
        let link = link.clone();
        move |value: FieldValue| {
            link.send_message(Msg::FieldChanged {
                field_id: field_id.clone(),
                value,
            })
        }
    });

    html! {
        <section class="card">
            <h3 class="card-title">{ component.session.kind().details_title() }</h3>
            <div class="field-grid">
                { for widgets.iter().map(render_field) }
            </div>
        </section>
    }
}

/// One grid cell: row caption with the required marker, then the widget.
fn render_field<C: OnChange + Clone + 'static>(widget: &RenderableWidget<C>) -> Html {
    let class = match widget.span {
        ColumnSpan::Full => classes!("field", "span-full"),
        ColumnSpan::Single => classes!("field"),
    };
    let marker = match widget.required_marker() {
        Some(marker) => html! { <span class="required">{ format!(" {}", marker) }</span> },
        None => html! {},
    };

    html! {
        <div {class}>
            <label for={widget.field_id.clone()}>{ widget.label.clone() }{ marker }</label>
            { render_input(widget) }
        </div>
    }
}

fn render_input<C: OnChange + Clone + 'static>(widget: &RenderableWidget<C>) -> Html {
    let id = widget.field_id.clone();
    let required = widget.native_required();

    match &widget.shape {
        WidgetShape::MultiLine { rows, placeholder, value } => {
            let bound = widget.clone();
            let oninput = Callback::from(move |e: InputEvent| {
                let textarea: HtmlTextAreaElement = e.target_unchecked_into();
                bound.edit_text(textarea.value());
            });
            html! {
                <textarea
                    {id}
                    rows={rows.to_string()}
                    value={value.clone()}
                    placeholder={placeholder.clone()}
                    {required}
                    {oninput}
                />
            }
        }
        WidgetShape::Choice { options, placeholder, value } => {
            let bound = widget.clone();
            let onchange = Callback::from(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                bound.edit_text(select.value());
            });
            html! {
                <select {id} {required} {onchange}>
                    <option value="" disabled={true} selected={value.is_empty()}>{ placeholder.clone() }</option>
                    { for options.iter().map(|o| html! {
                        <option value={o.value.clone()} selected={*value == o.value}>{ o.label.clone() }</option>
                    }) }
                </select>
            }
        }
        WidgetShape::Toggle { caption, checked } => {
            let bound = widget.clone();
            let onchange = Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                bound.toggle(input.checked());
            });
            html! {
                <div class="toggle-row">
                    <input type="checkbox" role="switch" id={id.clone()} checked={*checked} {onchange} />
                    <label for={id}>{ caption.clone() }</label>
                </div>
            }
        }
        WidgetShape::SingleLine { kind, placeholder, value } => {
            let bound = widget.clone();
            let oninput = Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                bound.edit_text(input.value());
            });
            html! {
                <input
                    type={kind.as_str()}
                    {id}
                    value={value.clone()}
                    placeholder={placeholder.clone()}
                    {required}
                    {oninput}
                />
            }
        }
    }
}
