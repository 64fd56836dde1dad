pub mod advice;
pub mod alternatives;
pub mod cli;
pub mod config;
pub mod error;
pub mod profile;
pub mod prompt;
pub mod request;
pub mod view;

pub use error::{Result, StylistError};
