//! Periodic maintenance tasks.

pub mod complete;
pub mod expire;

pub use complete::CompletionSweepTask;
pub use expire::PendingExpiryTask;
