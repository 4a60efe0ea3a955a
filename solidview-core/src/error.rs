//! Errors raised while reading shape configuration

use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("malformed descriptor: {0}")]
    Syntax(String),

    #[error("unknown shape kind `{0}` (expected cuboid, sphere, cylinder or cone)")]
    UnknownShape(String),

    #[error("{shape} has no parameter `{key}`")]
    UnknownParameter { shape: &'static str, key: String },

    #[error("invalid value `{value}` for `{key}`: expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}
