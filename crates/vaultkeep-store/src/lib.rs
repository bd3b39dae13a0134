pub mod store;
pub mod walker;

pub use store::{FsVault, DEFAULT_REFERENCES_DIR};
pub use walker::{walk, WalkRules};
