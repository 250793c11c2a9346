pub mod config;
pub mod event;
pub mod prompt;
pub mod reminders;
pub mod settings;
pub mod start_at;
pub mod today;
pub mod transfer;

mod session;

pub(crate) use session::Session;
