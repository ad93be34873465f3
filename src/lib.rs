#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation
)]

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod normalize;
pub mod stats;
pub mod tabulate;
pub mod tag;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::{HordeError, Result};
