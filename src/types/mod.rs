mod build_info;
mod config;
mod history;
mod record;

pub use build_info::BuildInfo;
pub use config::Config;
pub use history::History;
pub use record::{BuildRecord, BuildResult};
