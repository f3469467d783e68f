pub mod notification;
pub mod record;
pub mod submission;
pub mod template;
