//! The operation lifecycle engine: poll asynchronous operations to terminal
//! state, apply ordered patch sequences serially, and drive the generic
//! create/read/update/delete/import state machine over any resource kind.

mod adapter;
mod driver;
mod poller;
mod sequencer;

pub use adapter::{DeletePlan, ResourceAdapter, ResourceRecord, WriteRequest};
pub use driver::LifecycleDriver;
pub use poller::wait_on_operation;
pub use sequencer::execute_patches;
