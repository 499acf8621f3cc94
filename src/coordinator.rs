//! Join coordination: fan a batch of fetch requests out, wait for every task to
//! settle, and hand back the partitioned result set.

pub mod handle;
pub mod join;
pub mod result_set;

pub use handle::{TaskHandle, TaskState};
pub use join::JoinCoordinator;
pub use result_set::{CompletedTask, ResultSet};
