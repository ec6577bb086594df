//! Output formatters and terminal styling

pub mod human;
pub mod jsonl;
pub mod style;

pub use human::{Availability, HumanFormatter};
pub use jsonl::JsonlFormatter;
pub use style::{Effect, Style};
