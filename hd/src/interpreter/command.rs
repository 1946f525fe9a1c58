//! Structured mutation commands and their parser

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::RoomType;

/// One room as described by the Reasoner
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoomSpec {
    pub room_name: String,
    pub room_type: RoomType,
    pub length_ft: f64,
    pub width_ft: f64,
}

/// Floorplan mutation requested by the Reasoner
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MutationCommand {
    AddRoom(RoomSpec),
    RemoveRoom {
        room_name: String,
    },
    UpdateRoom {
        room_name: String,
        new_length_ft: f64,
        new_width_ft: f64,
    },
    AddMultipleRooms {
        rooms: Vec<RoomSpec>,
    },
    RedesignComplete {
        rooms: Vec<RoomSpec>,
        #[serde(default)]
        target_sqft: Option<f64>,
    },
}

impl MutationCommand {
    pub fn action(&self) -> &'static str {
        match self {
            Self::AddRoom(_) => "add_room",
            Self::RemoveRoom { .. } => "remove_room",
            Self::UpdateRoom { .. } => "update_room",
            Self::AddMultipleRooms { .. } => "add_multiple_rooms",
            Self::RedesignComplete { .. } => "redesign_complete",
        }
    }
}

/// Why a Reasoner reply could not be read as a command
#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("No JSON object found in reply")]
    NoPayload,

    #[error("Malformed command payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parse the command embedded in a free-text reply
///
/// The payload is the span from the first `{` to the last `}`; `//` line
/// comments outside string values are stripped before decoding. Unknown
/// actions and missing required fields are errors.
pub fn parse_command(reply: &str) -> Result<MutationCommand, InterpretError> {
    debug!(reply_len = reply.len(), "parse_command: called");
    let payload = extract_payload(reply).ok_or(InterpretError::NoPayload)?;
    let cleaned = strip_line_comments(payload);
    let command: MutationCommand = serde_json::from_str(&cleaned)?;
    debug!(action = command.action(), "parse_command: decoded");
    Ok(command)
}

fn extract_payload(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (end > start).then(|| &reply[start..=end])
}

/// Drop `//` comments up to the end of the line, leaving string values intact
fn strip_line_comments(payload: &str) -> String {
    let mut out = String::with_capacity(payload.len());
    let mut chars = payload.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                while chars.next_if(|&next| next != '\n').is_some() {}
            }
            _ => out.push(c),
        }
    }
    out
}
