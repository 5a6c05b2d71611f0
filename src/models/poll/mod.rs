mod memory;
mod queries;
mod store;
mod types;

pub use memory::MemoryPollStore;
pub use queries::PgPollStore;
pub use store::PollStore;
pub use types::*;
