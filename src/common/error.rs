use std::fmt::{Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Input
    InvalidChar(char),
    DataTooLong,

    // Configuration
    InvalidVersion,
    InvalidMaskingPattern,

    // Placement
    DataOverflow,
    GridOverflow,
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Self::InvalidChar(c) => write!(f, "Invalid alphanumeric character: {c:?}"),
            Self::DataTooLong => f.write_str("Data too long for the largest supported version"),
            Self::InvalidVersion => f.write_str("Unsupported version"),
            Self::InvalidMaskingPattern => f.write_str("Invalid masking pattern"),
            Self::DataOverflow => f.write_str("Payload bits remain after filling the symbol"),
            Self::GridOverflow => f.write_str("Symbol modules left unset after payload ended"),
        }
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;
