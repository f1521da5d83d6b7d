pub mod commands;
pub mod messages;

pub use commands::{CommandError, parse_command};
pub use messages::{Input, Output, StatusReport, ToastSummary};
