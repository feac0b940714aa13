//! Preview state persisted between a preview and the apply that follows it

pub mod store;
pub mod types;

pub use store::PreviewStateStore;
pub use types::{PreviewRow, PreviewState, PreviewSummary, MAX_PREVIEW_ROWS};
