use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid grid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("Could not write frame to {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed PPM frame: {0}")]
    MalformedFrame(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
