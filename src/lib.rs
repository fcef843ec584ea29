pub mod capacity;
pub mod config;
pub mod document;
pub mod models;
pub mod paginator;
pub mod reflow;

pub use capacity::estimate_capacity;
pub use config::{Config, Settings};
pub use document::{LogicalDocument, PageMapEntry, build_document};
pub use models::{ReflowState, ResumePosition, SourcePage, Typography, Viewport};
pub use paginator::{Layout, paginate};
pub use reflow::ReflowController;
