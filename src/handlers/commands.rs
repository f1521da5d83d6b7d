//! Line-oriented command parsing for the stdin driver.
//!
//! ```text
//! toast <duration_ms> <title>: <text>
//! dismiss <id>
//! hover <id>
//! leave <id>
//! position <name>
//! max <n>
//! status
//! quit
//! ```

use super::messages::Input;
use std::fmt;
use std::str::FromStr;
use toast_stack_core::ToastId;

/// Errors raised while parsing a command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Blank line
    Empty,
    /// First word is not a known command
    Unknown(String),
    /// A required argument is absent
    MissingArgument(&'static str),
    /// An argument that should be a number is not
    InvalidNumber(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "Empty command"),
            CommandError::Unknown(cmd) => write!(f, "Unknown command: {}", cmd),
            CommandError::MissingArgument(arg) => write!(f, "Missing argument: {}", arg),
            CommandError::InvalidNumber(raw) => write!(f, "Not a number: {}", raw),
        }
    }
}

impl std::error::Error for CommandError {}

/// Parse one line of input.
pub fn parse_command(line: &str) -> Result<Input, CommandError> {
    let line = line.trim();
    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match command.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        "toast" => parse_toast(rest),
        "dismiss" => Ok(Input::Dismiss(parse_id(rest)?)),
        "hover" => Ok(Input::HoverEnter(parse_id(rest)?)),
        "leave" => Ok(Input::HoverLeave(parse_id(rest)?)),
        "position" => {
            if rest.is_empty() {
                Err(CommandError::MissingArgument("position name"))
            } else {
                Ok(Input::Position(rest.to_string()))
            }
        }
        "max" => Ok(Input::Maximum(parse_number(rest, "maximum")?)),
        "status" => Ok(Input::Status),
        "quit" | "exit" => Ok(Input::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

// `<duration_ms> <title>: <text>`, the text is optional
fn parse_toast(args: &str) -> Result<Input, CommandError> {
    let (duration, content) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
    let duration = parse_number(duration, "duration")?;

    let (title, text) = content.split_once(':').unwrap_or((content, ""));
    Ok(Input::Toast {
        duration,
        title: title.trim().to_string(),
        text: text.trim().to_string(),
    })
}

fn parse_id(raw: &str) -> Result<ToastId, CommandError> {
    parse_number::<u64>(raw, "toast id").map(ToastId::from)
}

fn parse_number<T: FromStr>(raw: &str, name: &'static str) -> Result<T, CommandError> {
    if raw.is_empty() {
        return Err(CommandError::MissingArgument(name));
    }
    raw.parse::<T>()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}
