//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Intent classification prompt
pub const ROUTER: &str = include_str!("../../prompts/router.pmt");

/// Floorplan mutation prompt
pub const ARCHITECT: &str = include_str!("../../prompts/architect.pmt");

/// Design advice prompt
pub const CONSULTANT: &str = include_str!("../../prompts/consultant.pmt");

/// Over-budget reduction prompt
pub const CONSTRAINT: &str = include_str!("../../prompts/constraint.pmt");

/// Every template name the workflow renders
pub const TEMPLATE_NAMES: [&str; 4] = ["router", "architect", "consultant", "constraint"];

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "router" => Some(ROUTER),
        "architect" => Some(ARCHITECT),
        "consultant" => Some(CONSULTANT),
        "constraint" => Some(CONSTRAINT),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
