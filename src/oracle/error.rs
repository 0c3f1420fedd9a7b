use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleError {
    #[error("Could not find primer3 executable '{executable}'. Install primer3 or set BISPROBE_PRIMER3_BIN")]
    ToolNotFound { executable: String },

    #[error("{message}")]
    Io { message: String },

    #[error("primer3 command failed: {executable} (status={status:?}, stderr='{stderr}')")]
    ToolFailed {
        executable: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("primer3 reported an error: {message}")]
    Reported { message: String },

    #[error("primer3 response is missing required field {key}")]
    MissingField { key: String },

    #[error("primer3 response has invalid value for {key}: '{value}'")]
    InvalidField { key: String, value: String },
}
