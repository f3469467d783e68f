use log::debug;

use crate::engine::binder::RecordBinder;
use crate::engine::catalogue::{SavedFormLibrary, TemplateCatalogue};
use crate::engine::filter::{FormKind, TemplateFilter};
use crate::engine::pipeline::{self, DialogHost, Notifier, SubmissionSink};
use crate::engine::validator::can_submit;
use crate::engine::widget::{resolve, OnChange, RenderableWidget};
use crate::error::EngineError;
use crate::model::record::{FieldValue, Record};
use crate::model::submission::SubmissionPackage;
use crate::model::template::{FieldSpec, FormTemplate};

/// Coarse engine state, see [`FormSession::state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoSelection,
    TemplateSelected,
}

/// One form dialog's engine: a kind, the filter deciding which templates it
/// offers, and the binder holding the selection and its record.
///
/// The same type serves every form kind; only the filter value differs.
#[derive(Debug, Clone)]
pub struct FormSession {
    kind: FormKind,
    filter: TemplateFilter,
    binder: RecordBinder,
}

impl FormSession {
    pub fn new(kind: FormKind, filter: TemplateFilter) -> Self {
        Self {
            kind,
            filter,
            binder: RecordBinder::default(),
        }
    }

    /// Session over the curated catalogue partition for `kind`.
    pub fn for_kind(kind: FormKind) -> Self {
        Self::new(kind, TemplateFilter::for_kind(kind))
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn filter(&self) -> &TemplateFilter {
        &self.filter
    }

    /// Offers the templates of `templates` that pass the filter.
    pub fn load_templates(&mut self, templates: &[FormTemplate]) {
        let offered = self.filter.apply(templates);
        debug!(
            "{:?} session offers {} of {} templates",
            self.kind,
            offered.len(),
            templates.len()
        );
        self.binder.replace_available(offered);
    }

    pub fn load_catalogue<C: TemplateCatalogue + ?Sized>(&mut self, catalogue: &C) {
        self.load_templates(&catalogue.list());
    }

    pub fn load_library<L: SavedFormLibrary + ?Sized>(&mut self, library: &L) {
        self.load_templates(&library.list());
    }

    /// Templates the picker offers, in source order. May be empty.
    pub fn templates(&self) -> &[FormTemplate] {
        self.binder.available()
    }

    pub fn state(&self) -> SessionState {
        match self.binder.selected() {
            Some(_) => SessionState::TemplateSelected,
            None => SessionState::NoSelection,
        }
    }

    pub fn select(&mut self, template_id: &str) -> bool {
        self.binder.select(template_id)
    }

    pub fn set_field_value(
        &mut self,
        identifier: &str,
        value: impl Into<FieldValue>,
    ) -> Result<bool, EngineError> {
        self.binder.set_field_value(identifier, value)
    }

    pub fn clear(&mut self) {
        self.binder.clear();
    }

    /// The hosting dialog was dismissed: nothing of the session survives.
    pub fn close(&mut self) {
        if self.binder.selected().is_some() {
            debug!("Dialog closed, discarding `{}`", self.binder.selected_id());
        }
        self.binder.clear();
    }

    pub fn selected(&self) -> Option<&FormTemplate> {
        self.binder.selected()
    }

    pub fn selected_id(&self) -> &str {
        self.binder.selected_id()
    }

    pub fn record(&self) -> &Record {
        self.binder.record()
    }

    /// Widgets for the selected template in field order, each bound through
    /// the handler `bind` returns for its field. Empty with no selection.
    pub fn widgets<C, F>(&self, mut bind: F) -> Vec<RenderableWidget<C>>
    where
        C: OnChange,
        F: FnMut(&FieldSpec) -> C,
    {
        let Some(template) = self.binder.selected() else {
            return Vec::new();
        };
        template
            .fields
            .iter()
            .map(|field| resolve(field, self.record().get(&field.identifier), bind(field)))
            .collect()
    }

    pub fn can_submit(&self) -> bool {
        can_submit(self.binder.selected())
    }

    /// Package the current record would submit, for sinks that answer
    /// asynchronously. Leaves the session untouched.
    pub fn prepare_submission<N: Notifier + ?Sized>(
        &self,
        notifier: &mut N,
    ) -> Result<SubmissionPackage, EngineError> {
        pipeline::prepare(&self.binder, notifier)
    }

    pub fn submit<S, N, D>(
        &mut self,
        sink: &mut S,
        notifier: &mut N,
        dialog: &mut D,
    ) -> Result<SubmissionPackage, EngineError>
    where
        S: SubmissionSink + ?Sized,
        N: Notifier + ?Sized,
        D: DialogHost + ?Sized,
    {
        pipeline::submit(&mut self.binder, self.kind, sink, notifier, dialog)
    }
}
