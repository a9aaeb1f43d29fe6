pub mod history;
pub mod init;
pub mod next;
pub mod record;
pub mod show;

pub use history::history;
pub use init::init;
pub use next::next;
pub use record::record;
pub use show::show;
