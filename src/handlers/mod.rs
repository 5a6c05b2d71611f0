pub mod diagnostic_handlers;
pub mod poll_handlers;
