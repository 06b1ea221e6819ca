pub mod config;
pub mod error;
pub mod result;
pub mod storage;

pub use config::AppConfig;
pub use error::TodoError;
pub use result::TodoResult;
pub use storage::{KeyValueStore, THEME_KEY, TODO_LISTS_KEY};
