#![doc = include_str!("../README.md")]

mod alias;
mod error;
mod formatter;
mod load;
mod node;
mod save;
mod secret;
mod text;
mod xml;

pub mod names;

pub use error::Error;
pub use formatter::Formatter;
pub use node::Node;
pub use secret::{SecretBox, SecretError};
