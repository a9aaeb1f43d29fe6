mod format;
mod token;

pub use format::format_version;
pub use token::{parse_template, Segment, TemplateError, TokenArg};
