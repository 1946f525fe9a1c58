//! Floorplan domain model
//!
//! Rooms, the copy-on-write floorplan store, budget evaluation and the
//! plain-text summaries built from them.

pub mod budget;
mod floorplan;
mod room;
pub mod summary;

pub use budget::{BudgetComparison, COST_PER_SQFT, compare, estimate_cost, format_currency};
pub use floorplan::Floorplan;
pub use room::{Room, RoomId, RoomType, RoomValidationError, validate_room};
