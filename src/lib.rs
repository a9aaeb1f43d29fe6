pub mod commands;
pub mod output;
pub mod step;
pub mod store;
pub mod template;
pub mod types;
