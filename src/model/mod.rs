pub mod history;
pub mod output;
pub mod variant;

// Re-export commonly used types at the model level.
pub use history::HistoryEntry;
pub use output::{Action, CommandOutput, OutputKind};
pub use variant::MirrorVariant;
