//! Error types for the blowfish-cfb64 library.

use std::fmt;

/// Errors produced by the blowfish-cfb64 library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlowfishError {
    /// The supplied key is empty; the key schedule needs at least one byte.
    EmptyKey,
    /// The cipher engine has been cleared and holds no usable schedule.
    CipherCleared,
}

impl fmt::Display for BlowfishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlowfishError::EmptyKey => {
                write!(f, "Key must be at least 1 byte long")
            }
            BlowfishError::CipherCleared => {
                write!(f, "Cipher engine has been cleared and holds no key schedule")
            }
        }
    }
}

impl std::error::Error for BlowfishError {}
