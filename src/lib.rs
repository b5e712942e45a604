//! a minimal terminal system monitor.
//!
//! samples cpu, memory, and battery statistics once a second, and draws them over the whole
//! terminal.

use {self::sample::ReadError, std::io, thiserror::Error};

pub use self::{app::App, sentinel::Sentinel, window::Window};

/// the event loop.
pub mod app;

/// tick and terminal input sources.
pub mod event;

/// metric samples, and how each is displayed.
pub mod sample;

/// gathers one frame's worth of samples.
pub mod sentinel;

/// providers of cpu, memory, and battery statistics.
pub mod source;

/// terminal setup and teardown, and the render step.
pub mod window;

/// an error that stops the application.
#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal i/o failed: {0}")]
    Terminal(#[from] io::Error),
    #[error("failed to read terminal input: {0}")]
    Input(#[source] io::Error),
    #[error(transparent)]
    Read(#[from] ReadError),
}
