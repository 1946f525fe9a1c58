//! Prompt templates for the Reasoner stages
//!
//! Templates are Handlebars `.pmt` files embedded at build time; a user
//! directory may override any of them by name.

mod context;
mod embedded;
mod loader;

pub use context::{ArchitectContext, ConstraintContext, ConsultantContext, ROOM_GUIDELINES, RouterContext};
pub use embedded::{TEMPLATE_NAMES, get_embedded};
pub use loader::{PromptLoader, PromptSource};
