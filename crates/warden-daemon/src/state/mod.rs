mod lock;
mod store;
mod types;

pub use lock::TickLock;
pub use store::{JsonStateStore, MemoryStateStore, StateStore};
pub use types::SupervisorState;
