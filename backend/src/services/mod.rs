pub mod saved_forms;
pub mod submissions;
pub mod templates;
