pub mod admin;
pub mod event;
pub mod registration;
pub mod submission;
