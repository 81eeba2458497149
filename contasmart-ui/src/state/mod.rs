pub mod global;
pub mod storage;

pub use storage::local_history;
