use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::*;

pub const DEFAULT_FRAME_PREFIX: &str = "frame";
pub const DEFAULT_FRAME_SUFFIX: &str = ".ppm";

/// Receives every frame the grid renders, in order.
pub trait FrameSink {
    fn emit(&mut self, frame: &PixelBuffer) -> Result<()>;
}

/// Writes each frame to `{directory}/{prefix}{index:03}{suffix}`.
///
/// The index starts at zero and is bumped only after a frame was fully written, so the files on disk are
/// always numbered without gaps.
#[derive(Clone, Debug)]
pub struct PpmFileSink {
    directory: PathBuf,
    prefix: String,
    suffix: String,
    next_index: usize,
}

impl PpmFileSink {
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
            next_index: 0,
        }
    }

    pub fn in_directory(directory: impl Into<PathBuf>) -> Self {
        Self::new(directory, DEFAULT_FRAME_PREFIX, DEFAULT_FRAME_SUFFIX)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Number of frames written so far, which is also the index of the next one.
    pub fn frames_written(&self) -> usize {
        self.next_index
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.directory
            .join(format!("{}{:03}{}", self.prefix, index, self.suffix))
    }

    /// Paths of all frames written so far, in animation order.
    pub fn written_paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        (0..self.next_index).map(|index| self.frame_path(index))
    }
}

impl FrameSink for PpmFileSink {
    fn emit(&mut self, frame: &PixelBuffer) -> Result<()> {
        let path = self.frame_path(self.next_index);
        let io_error = |source| Error::Io {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(io_error)?;
        frame.write_ppm(BufWriter::new(file)).map_err(io_error)?;

        log::debug!("wrote {}", path.display());
        self.next_index += 1;
        Ok(())
    }
}

/// Keeps a copy of every frame in memory.
impl FrameSink for Vec<PixelBuffer> {
    fn emit(&mut self, frame: &PixelBuffer) -> Result<()> {
        self.push(frame.clone());
        Ok(())
    }
}

/// Drops frames, only counting them.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DiscardFrames {
    pub emitted: usize,
}

impl FrameSink for DiscardFrames {
    fn emit(&mut self, _frame: &PixelBuffer) -> Result<()> {
        self.emitted += 1;
        Ok(())
    }
}
