use thiserror::Error;

/// Programmer errors raised by the pagination core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("invalid pagination argument: {0}")]
    InvalidArgument(&'static str),
}
