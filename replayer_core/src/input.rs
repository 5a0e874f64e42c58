use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Anything a fuzz target can be replayed against.
pub trait Input: std::fmt::Debug {
    fn as_bytes(&self) -> &[u8];
}

impl Input for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self.as_slice()
    }
}

impl Input for [u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }
}

/// Reasons an input file could not be loaded. None of them stop a replay run.
///
/// The message is only the reason; callers print the path next to it.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("no such file or directory")]
    NotFound(PathBuf),

    #[error("not a regular file")]
    NotAFile(PathBuf),

    #[error("{source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReadError {
    pub fn path(&self) -> &Path {
        match self {
            ReadError::NotFound(path) | ReadError::NotAFile(path) => path,
            ReadError::Io { path, .. } => path,
        }
    }
}

/// Reads the whole file at `path` into a fresh buffer.
pub fn read_input(path: &Path) -> Result<Vec<u8>, ReadError> {
    let metadata = fs::metadata(path).map_err(|e| classify(path, e))?;
    if !metadata.is_file() {
        return Err(ReadError::NotAFile(path.to_path_buf()));
    }
    fs::read(path).map_err(|e| classify(path, e))
}

fn classify(path: &Path, err: io::Error) -> ReadError {
    if err.kind() == io::ErrorKind::NotFound {
        ReadError::NotFound(path.to_path_buf())
    } else {
        ReadError::Io {
            path: path.to_path_buf(),
            source: err,
        }
    }
}
