//! Views for the timeline window.

pub mod timeline_view;
pub mod utils;

pub use timeline_view::{render_timeline, TimelineViewResponse};
