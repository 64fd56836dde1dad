//! Command implementations for the stylist CLI

mod advise;
mod misc;
mod profile;

pub use advise::*;
pub use misc::*;
pub use profile::*;
