use std::io;

/// Errors that stop an animation run
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Terminal or output stream failure.
    #[error("terminal io error: {0}")]
    Io(#[from] io::Error),

    /// The cart state stopped being finite.
    ///
    /// Only raised when divergence checking was requested on the command line.
    #[error("simulation diverged at frame {frame} (px = {px}, vx = {vx})")]
    Diverged { frame: usize, px: f64, vx: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
