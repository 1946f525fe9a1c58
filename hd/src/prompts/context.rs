//! Render contexts, one per template

use serde::Serialize;

/// Room size guidance offered to the architect prompt
pub const ROOM_GUIDELINES: [&str; 12] = [
    "Master Bedroom: 12x14 to 16x18 ft (168-288 sq ft)",
    "Regular Bedroom: 10x12 to 12x14 ft (120-168 sq ft)",
    "Living Room: 14x16 to 20x24 ft (224-480 sq ft)",
    "Kitchen: 10x12 to 14x16 ft (120-224 sq ft)",
    "Dining Room: 10x12 to 14x16 ft (120-224 sq ft)",
    "Bathroom: 5x8 to 8x10 ft (40-80 sq ft)",
    "Master Bathroom: 8x10 to 10x12 ft (80-120 sq ft)",
    "Garage (1-car): 12x20 ft (240 sq ft)",
    "Garage (2-car): 20x20 ft (400 sq ft)",
    "Garage (3-car): 30x20 ft (600 sq ft)",
    "Office/Study: 10x10 to 12x14 ft (100-168 sq ft)",
    "Laundry: 6x8 to 8x10 ft (48-80 sq ft)",
];

#[derive(Debug, Clone, Serialize)]
pub struct RouterContext {
    pub message: String,
    pub room_count: usize,
    pub budget_display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArchitectContext {
    pub history: String,
    pub floorplan_summary: String,
    pub total_area: String,
    pub budget_display: String,
    pub message: String,
    pub room_types: String,
    pub guidelines: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsultantContext {
    pub message: String,
    pub history: String,
    /// Present only when the session already has rooms
    pub floorplan_summary: Option<String>,
}

/// Amounts are pre-formatted as currency
#[derive(Debug, Clone, Serialize)]
pub struct ConstraintContext {
    pub estimated_cost: String,
    pub user_budget: String,
    pub deficit: String,
    pub floorplan_summary: String,
}
