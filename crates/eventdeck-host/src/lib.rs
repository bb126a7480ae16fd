//! Host runtime: carousel ticker, live board, site configuration, CLI
//!
//! This crate provides the `eventdeck` command-line interface.

pub mod board;
pub mod cli;
pub mod commands;
pub mod config;
pub mod driver;
pub mod error;

pub use board::{BoardHandle, BoardSnapshot, LiveBoard};
pub use cli::Cli;
pub use config::SiteConfig;
pub use driver::{CarouselCommand, CarouselDriver, CarouselHandle};
pub use error::{HostError, HostResult};
