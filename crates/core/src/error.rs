use thiserror::Error;

#[derive(Debug, Error)]
pub enum SegtraceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("tracer error: {0}")]
    Tracer(String),
}

pub type Result<T> = std::result::Result<T, SegtraceError>;
