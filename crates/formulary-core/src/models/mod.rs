//! Domain models for the formulary.

mod disease;
mod medicine;
mod user;

pub use disease::*;
pub use medicine::*;
pub use user::*;
