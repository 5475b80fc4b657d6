pub type Result<T> = std::result::Result<T, GaugeError>;

/// Struct to represent IO errors.
#[derive(Debug)]
pub struct IoErrorStruct {
    /// The type of IO error.
    error_type: String,

    /// The error message.
    msg: String,
}

/// Struct to represent archive pipeline errors.
#[derive(Debug)]
pub struct ArchiveErrorStruct {
    /// The error message.
    msg: String,
}

/// Enum to represent different types of gauge errors.
#[derive(Debug)]
pub enum GaugeError {
    IoError(IoErrorStruct),
    ArchiveError(ArchiveErrorStruct),
}

impl std::fmt::Display for GaugeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GaugeError::IoError(io_err) => {
                write!(f, "IO {} Error: {}", io_err.error_type, io_err.msg)
            }
            GaugeError::ArchiveError(archive_err) => {
                write!(f, "Archive Error: {}", archive_err.msg)
            }
        }
    }
}

impl std::error::Error for GaugeError {}

impl From<std::io::Error> for GaugeError {
    fn from(error: std::io::Error) -> Self {
        GaugeError::IoError(IoErrorStruct {
            error_type: error.kind().to_string(),
            msg: error.to_string(),
        })
    }
}

impl From<zipline::error::ArchiveError> for GaugeError {
    fn from(error: zipline::error::ArchiveError) -> Self {
        GaugeError::ArchiveError(ArchiveErrorStruct {
            msg: error.to_string(),
        })
    }
}
