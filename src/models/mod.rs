pub mod analysis;
pub mod progress;

pub use analysis::{ComposedView, SavedAnalysis, Section};
pub use progress::UserProgress;
