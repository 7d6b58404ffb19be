#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid layout option `{field}`: {message}")]
    InvalidOption {
        field: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
