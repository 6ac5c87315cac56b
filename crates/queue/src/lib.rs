//! Queue engine (component C7, `spec.md` §4.7): enqueue, show, cancel,
//! dequeue, dummy-fill, paginated manage view, and queue-reset (`InitQueue`).

mod cancel;
mod dequeue;
mod enqueue;
mod error;
mod init_queue;
mod manage;
mod model;
mod show;
mod suffix_mint;

pub use cancel::cancel;
pub use dequeue::dequeue;
pub use enqueue::{enqueue, enqueue_dummy};
pub use error::QueueError;
pub use init_queue::init_queue;
pub use manage::manage;
pub use model::{
    Code, EnqueueOutcome, InitQueueOutcome, ManageEntry, ManagePage, QueueStatus,
    ShowQueueOutcome, TenantId, UpdateOutcome,
};
pub use show::show_queue;
