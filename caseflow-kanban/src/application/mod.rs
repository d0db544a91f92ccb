//! Application commands

mod create;
mod timeline;

pub use create::CreateApplication;
pub use timeline::ListTimeline;
