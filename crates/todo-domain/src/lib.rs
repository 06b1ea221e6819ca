pub mod clock;
pub mod id;
pub mod list;
pub mod session;
pub mod store;
pub mod task;
pub mod theme;
mod timestamp;
pub mod validation;
pub mod view;

pub use clock::{Clock, FixedClock, SystemClock};
pub use id::{IdGenerator, SequentialIdGenerator, TimeRandomIdGenerator};
pub use list::{ListId, MoveDirection, TodoList};
pub use session::{RefreshOutcome, Session};
pub use store::ListStore;
pub use task::{Task, TaskId};
pub use theme::Theme;
pub use view::{DashboardView, ListCard, ListDetailView, TaskRow, View};
