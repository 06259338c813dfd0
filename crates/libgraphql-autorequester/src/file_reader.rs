use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

type Result<T> = std::result::Result<T, ReadContentError>;

pub fn read_content<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let file_path = file_path.as_ref();
    if !file_path.is_file() {
        return Err(ReadContentError::PathIsNotAFile(file_path.to_path_buf()));
    }

    let bytes = std::fs::read(file_path)
        .map_err(|err| ReadContentError::FileReadError {
            file_path: file_path.to_path_buf(),
            message: err.to_string(),
        })?;

    String::from_utf8(bytes)
        .map_err(|err| ReadContentError::FileDecodeError {
            file_path: file_path.to_path_buf(),
            message: err.to_string(),
        })
}

/// Failure to load a schema or preload document from disk.
///
/// Carries rendered messages rather than the underlying `io::Error` so the
/// error stays `Clone` and can travel through shared lazy values.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ReadContentError {
    #[error("Failed to decode `{}` as utf-8: {message}", file_path.display())]
    FileDecodeError {
        file_path: PathBuf,
        message: String,
    },

    #[error("Failed to read `{}`: {message}", file_path.display())]
    FileReadError {
        file_path: PathBuf,
        message: String,
    },

    #[error("`{}` is not a file", .0.display())]
    PathIsNotAFile(PathBuf),
}
