pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Struct to represent missing-archive errors.
#[derive(Debug)]
pub struct NotFoundErrorStruct {
    /// The archive key that failed to resolve.
    key: String,
}

/// Struct to represent archiver launch errors.
#[derive(Debug)]
pub struct SpawnErrorStruct {
    /// The program that could not be started.
    program: String,

    /// The error message.
    msg: String,
}

/// Struct to represent child stream errors.
#[derive(Debug)]
pub struct ChildStreamErrorStruct {
    /// The error message.
    msg: String,
}

/// Enum to represent the different ways an archive transfer can fail.
#[derive(Debug)]
pub enum ArchiveError {
    NotFound(NotFoundErrorStruct),
    SpawnError(SpawnErrorStruct),
    ChildStreamError(ChildStreamErrorStruct),
    /// The receiving side went away mid-transfer (client disconnect or
    /// shutdown). Distinct from the other variants so callers can audit
    /// interrupted downloads apart from failed ones.
    Interrupted,
}

impl ArchiveError {
    /// Create a new missing-archive error for `key`.
    pub fn not_found(key: &str) -> Self {
        ArchiveError::NotFound(NotFoundErrorStruct {
            key: key.to_string(),
        })
    }

    /// Create a new archiver launch error.
    pub fn spawn_error(program: &str, msg: String) -> Self {
        ArchiveError::SpawnError(SpawnErrorStruct {
            program: program.to_string(),
            msg,
        })
    }

    /// Create a new child stream error.
    pub fn child_stream(msg: String) -> Self {
        ArchiveError::ChildStreamError(ChildStreamErrorStruct { msg })
    }

    /// Whether this error means the transfer was cut short by the client or
    /// by cancellation rather than by a failure.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, ArchiveError::Interrupted)
    }
}

impl std::fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchiveError::NotFound(not_found_err) => {
                write!(
                    f,
                    "Archive {} does not exist or was removed",
                    not_found_err.key
                )
            }
            ArchiveError::SpawnError(spawn_err) => {
                write!(
                    f,
                    "Failed to launch archiver {}: {}",
                    spawn_err.program, spawn_err.msg
                )
            }
            ArchiveError::ChildStreamError(stream_err) => {
                write!(f, "Archiver stream error: {}", stream_err.msg)
            }
            ArchiveError::Interrupted => write!(f, "Download was interrupted"),
        }
    }
}

impl std::error::Error for ArchiveError {}

impl From<std::io::Error> for ArchiveError {
    fn from(error: std::io::Error) -> Self {
        ArchiveError::ChildStreamError(ChildStreamErrorStruct {
            msg: error.to_string(),
        })
    }
}
