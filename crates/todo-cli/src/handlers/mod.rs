pub mod list;
pub mod task;
pub mod theme;
pub mod watch;
