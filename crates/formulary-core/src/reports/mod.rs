//! Read-only views derived from the store contents.

mod dashboard;
mod protocol;

pub use dashboard::*;
pub use protocol::*;
