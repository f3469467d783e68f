//! The form engine, independent of any rendering environment.
//!
//! Data flows leaf to root: a [`catalogue`] supplies templates, a [`filter`]
//! keeps the ones relevant to a form kind, the [`binder`] owns the selection
//! and its record, the [`widget`] resolver maps fields to editing shapes, the
//! [`validator`] gates submission and the [`pipeline`] hands the result off.
//! [`session::FormSession`] ties them together for one dialog.

pub mod binder;
pub mod catalogue;
pub mod filter;
pub mod pipeline;
pub mod session;
pub mod validator;
pub mod widget;
