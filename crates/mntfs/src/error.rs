use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur in filesystem operations
#[derive(Debug, PartialEq)]
pub enum Error {
    /// Lookup below a leaf directory, which never has children
    NotFound(PathBuf),

    /// `..` cannot be resolved, nodes do not know their parents
    ParentPathInvalid(PathBuf),

    PrefixNotSupported(PathBuf),

    /// Path component could not be converted to string
    InvalidComponent(PathBuf),
}

impl Error {
    pub fn not_found<P: AsRef<Path>>(path: P) -> Self {
        Error::NotFound(path.as_ref().to_path_buf())
    }

    pub fn parent_path_invalid<P: AsRef<Path>>(path: P) -> Self {
        Error::ParentPathInvalid(path.as_ref().to_path_buf())
    }

    pub fn prefix_not_supported<P: AsRef<Path>>(path: P) -> Self {
        Error::PrefixNotSupported(path.as_ref().to_path_buf())
    }

    pub fn invalid_component<P: AsRef<Path>>(path: P) -> Self {
        Error::InvalidComponent(path.as_ref().to_path_buf())
    }

    /// True for the "no such entry" condition the kernel sees as ENOENT
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::NotFound(path) => write!(f, "Path not found: {}", path.display()),
            Error::ParentPathInvalid(path) => {
                write!(f, "Parent path invalid: {}", path.display())
            }
            Error::PrefixNotSupported(path) => {
                write!(f, "Path prefix not supported: {}", path.display())
            }
            Error::InvalidComponent(path) => write!(f, "Invalid component: {}", path.display()),
        }
    }
}

impl std::error::Error for Error {}
