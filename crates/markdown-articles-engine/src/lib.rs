pub mod parsing;
pub mod search;

// Re-export key types for easier usage
pub use parsing::{BlockCodeKind, Document, Node, parse, strip_markdown};
pub use search::indexes_of;
