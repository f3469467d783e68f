//! Properties of the `TemplateFormComponent`.
//!
//! A parent mounts one component per form kind and drives it through `open`;
//! the component reports dismissal (cancel or successful submission) through
//! `on_close` so the parent can flip `open` back.

use common::engine::filter::{FormKind, TemplateFilter};
use yew::prelude::*;

/// Where the dialog loads its templates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibrarySource {
    /// Curated catalogue, partitioned by procedure categories.
    Catalogue,
    /// User-maintained saved forms, classified by category or type tag.
    SavedForms,
}

impl LibrarySource {
    pub fn endpoint(&self) -> &'static str {
        match self {
            LibrarySource::Catalogue => "/api/templates",
            LibrarySource::SavedForms => "/api/saved_forms",
        }
    }

    /// Filter a dialog of `kind` applies to this source.
    pub fn filter(&self, kind: FormKind) -> TemplateFilter {
        match (self, kind) {
            (LibrarySource::SavedForms, FormKind::LegalText) => TemplateFilter::saved_legal_texts(),
            _ => TemplateFilter::for_kind(kind),
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct TemplateFormProps {
    pub kind: FormKind,
    #[prop_or(LibrarySource::Catalogue)]
    pub source: LibrarySource,
    /// Whether the dialog is shown. Going from `true` to `false` discards the
    /// in-progress record.
    #[prop_or_default]
    pub open: bool,
    #[prop_or_default]
    pub on_close: Callback<()>,
}
