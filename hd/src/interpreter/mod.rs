//! Mutation interpreter
//!
//! Turns the Reasoner's reply to a floorplan-modification prompt into a new
//! floorplan. When the reply cannot be decoded, a literal-phrase fallback may
//! still produce a floorplan; otherwise the floorplan is left unchanged.

mod command;
mod fallback;

pub use command::{InterpretError, MutationCommand, RoomSpec, parse_command};
pub use fallback::{THREE_FLOOR_ROOMS, three_floor_house, wants_three_floor_house};

use tracing::{debug, warn};

use crate::domain::{Floorplan, validate_room};

/// Outcome of interpreting one Reasoner reply
#[derive(Debug, Clone, PartialEq)]
pub enum Interpretation {
    /// A structured command was decoded and applied
    Applied {
        command: MutationCommand,
        floorplan: Floorplan,
    },
    /// Decoding failed and the literal-phrase fallback produced a floorplan
    Fallback { floorplan: Floorplan },
    /// Decoding failed and no fallback applied
    Unchanged,
}

/// Interpret a Reasoner reply against the current floorplan
///
/// `message` is the user's original request; it is only consulted when the
/// reply cannot be decoded.
pub fn interpret(reply: &str, message: &str, current: &Floorplan) -> Interpretation {
    match parse_command(reply) {
        Ok(command) => {
            let floorplan = apply(&command, current);
            Interpretation::Applied { command, floorplan }
        }
        Err(e) => {
            warn!(error = %e, "interpret: reply not usable, trying fallback");
            interpret_fallback(message)
        }
    }
}

/// Fallback path used when no usable command is available
pub fn interpret_fallback(message: &str) -> Interpretation {
    if wants_three_floor_house(message) {
        debug!("interpret_fallback: three floor house requested");
        Interpretation::Fallback {
            floorplan: three_floor_house(),
        }
    } else {
        debug!("interpret_fallback: no fallback applies");
        Interpretation::Unchanged
    }
}

/// Apply a command to a floorplan, returning the new floorplan
///
/// Name-targeted commands resolve the name to the first matching room and
/// mutate only that room.
pub fn apply(command: &MutationCommand, floorplan: &Floorplan) -> Floorplan {
    debug!(action = command.action(), rooms = floorplan.len(), "apply: called");
    match command {
        MutationCommand::AddRoom(spec) => add_spec(floorplan, spec),
        MutationCommand::RemoveRoom { room_name } => match floorplan.find_by_name(room_name) {
            Some(room) => floorplan.remove_by_id(room.id()),
            None => {
                warn!(%room_name, "apply: no room to remove");
                floorplan.clone()
            }
        },
        MutationCommand::UpdateRoom {
            room_name,
            new_length_ft,
            new_width_ft,
        } => match floorplan.find_by_name(room_name) {
            Some(room) => floorplan.update_by_id(room.id(), *new_length_ft, *new_width_ft),
            None => {
                warn!(%room_name, "apply: no room to update");
                floorplan.clone()
            }
        },
        MutationCommand::AddMultipleRooms { rooms } => {
            rooms.iter().fold(floorplan.clone(), |plan, spec| add_spec(&plan, spec))
        }
        MutationCommand::RedesignComplete { rooms, .. } => {
            rooms.iter().fold(Floorplan::new(), |plan, spec| add_spec(&plan, spec))
        }
    }
}

fn add_spec(floorplan: &Floorplan, spec: &RoomSpec) -> Floorplan {
    if let Err(e) = validate_room(&spec.room_name, spec.length_ft, spec.width_ft) {
        warn!(room = %spec.room_name, error = %e, "add_spec: unusual room accepted as given");
    }
    floorplan.add_room(spec.room_name.clone(), spec.room_type, spec.length_ft, spec.width_ft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomType;

    fn plan_with_duplicates() -> Floorplan {
        Floorplan::new()
            .add_room("Bedroom", RoomType::Bedroom, 10.0, 12.0)
            .add_room("Kitchen", RoomType::Kitchen, 12.0, 14.0)
            .add_room("Bedroom", RoomType::Bedroom, 11.0, 11.0)
    }

    #[test]
    fn test_interpret_add_room() {
        let reply = r#"{"action": "add_room", "room_name": "Master Bedroom", "room_type": "bedroom", "length_ft": 14, "width_ft": 16}"#;
        match interpret(reply, "Add a master bedroom 14x16 feet", &Floorplan::new()) {
            Interpretation::Applied { floorplan, .. } => {
                assert_eq!(floorplan.len(), 1);
                assert_eq!(floorplan.total_area(), 224.0);
            }
            other => panic!("Expected Applied, got {:?}", other),
        }
    }

    #[test]
    fn test_remove_targets_first_match_only() {
        let plan = plan_with_duplicates();
        let command = MutationCommand::RemoveRoom {
            room_name: "Bedroom".to_string(),
        };
        let after = apply(&command, &plan);
        assert_eq!(after.len(), 2);
        assert_eq!(after.find_by_name("Bedroom").unwrap().area(), 121.0);
    }

    #[test]
    fn test_update_targets_first_match_only() {
        let plan = plan_with_duplicates();
        let command = MutationCommand::UpdateRoom {
            room_name: "Bedroom".to_string(),
            new_length_ft: 14.0,
            new_width_ft: 16.0,
        };
        let after = apply(&command, &plan);
        assert_eq!(after.rooms()[0].area(), 224.0);
        assert_eq!(after.rooms()[2].area(), 121.0);
    }

    #[test]
    fn test_missing_name_is_noop() {
        let plan = plan_with_duplicates();
        let command = MutationCommand::RemoveRoom {
            room_name: "Sauna".to_string(),
        };
        assert_eq!(apply(&command, &plan), plan);
    }

    #[test]
    fn test_add_multiple_appends_in_order() {
        let plan = plan_with_duplicates();
        let command = MutationCommand::AddMultipleRooms {
            rooms: vec![
                RoomSpec {
                    room_name: "Office 2".to_string(),
                    room_type: RoomType::Office,
                    length_ft: 12.0,
                    width_ft: 14.0,
                },
                RoomSpec {
                    room_name: "Office 3".to_string(),
                    room_type: RoomType::Office,
                    length_ft: 10.0,
                    width_ft: 12.0,
                },
            ],
        };
        let after = apply(&command, &plan);
        let names: Vec<&str> = after.rooms().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Bedroom", "Kitchen", "Bedroom", "Office 2", "Office 3"]);
    }

    #[test]
    fn test_redesign_replaces_everything() {
        let plan = plan_with_duplicates();
        let command = MutationCommand::RedesignComplete {
            rooms: vec![RoomSpec {
                room_name: "Studio".to_string(),
                room_type: RoomType::Living,
                length_ft: 20.0,
                width_ft: 25.0,
            }],
            target_sqft: None,
        };
        let after = apply(&command, &plan);
        assert_eq!(after.len(), 1);
        assert_eq!(after.total_area(), 500.0);
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn test_fallback_on_malformed_reply() {
        let reply = "Here you go: {\"action\": \"redesign_complete\", \"rooms\": [ oops";
        let first = interpret(reply, "Design a THREE FLOOR house with 3 Bedrooms", &Floorplan::new());
        let second = interpret(reply, "design a three floor house with 3 bedrooms", &plan_with_duplicates());
        assert_eq!(first, second);
        match first {
            Interpretation::Fallback { floorplan } => assert_eq!(floorplan.len(), 9),
            other => panic!("Expected Fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_unchanged_without_fallback_phrase() {
        assert_eq!(
            interpret("no json here", "add a bedroom", &plan_with_duplicates()),
            Interpretation::Unchanged
        );
    }
}
