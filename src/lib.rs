//! Generate, revise and export property descriptions for publishing channels.
//!
//! Attributes are turned into a generation request by [`prompt`], the result
//! is tracked in a browsable [`history::VersionHistory`], and the selected
//! version feeds the keyword, compare and export views.

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod gateways;
pub mod history;
pub mod models;
pub mod prompt;
pub mod session;

pub use error::{Error, Result};
pub use history::VersionHistory;
pub use models::{Author, Channel, DescriptionVersion, PropertyAttributes, SavedDescription};
pub use session::Session;
