mod discovery;

pub use discovery::{find_store_root, find_store_root_from, Store, VERNUM_DIR};
