use crate::model::dns::FQDNError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZoneError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(#[from] FQDNError),

    #[error("'{0}' is not a valid IPv4 address (expected four dot-separated groups of 1-3 digits)")]
    InvalidIpInput(String),

    #[error("Cannot derive a reverse zone from name server address '{0}'")]
    UnderivableReverseZone(String),

    #[error("Input closed before a valid address for {0} was entered")]
    InputClosed(String),

    #[error("No valid address for {label} after {attempts} attempts")]
    AttemptsExhausted { label: String, attempts: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ZoneError>;
