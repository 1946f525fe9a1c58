//! Literal-phrase fallback for requests the Reasoner could not structure

use crate::domain::{Floorplan, RoomType};

/// Rooms of the fixed three-tier house, in construction order
pub const THREE_FLOOR_ROOMS: [(&str, RoomType, f64, f64); 9] = [
    // First floor
    ("Living Room", RoomType::Living, 18.0, 22.0),
    ("Kitchen", RoomType::Kitchen, 12.0, 14.0),
    ("2-Car Garage", RoomType::Garage, 20.0, 20.0),
    ("Guest Bath", RoomType::Bathroom, 6.0, 8.0),
    // Second floor
    ("Master Bedroom", RoomType::Bedroom, 14.0, 16.0),
    ("Master Bath", RoomType::Bathroom, 8.0, 10.0),
    ("Bedroom 2", RoomType::Bedroom, 12.0, 14.0),
    ("Bedroom 3", RoomType::Bedroom, 10.0, 12.0),
    // Third floor
    ("Office", RoomType::Office, 12.0, 14.0),
];

/// True when the message asks for a three floor house with bedrooms
pub fn wants_three_floor_house(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("three floor") && lower.contains("bedroom")
}

/// The fixed nine-room three floor house, built on an empty floorplan
pub fn three_floor_house() -> Floorplan {
    THREE_FLOOR_ROOMS
        .iter()
        .fold(Floorplan::new(), |plan, (name, kind, length, width)| {
            plan.add_room(*name, *kind, *length, *width)
        })
}
