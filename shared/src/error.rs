use thiserror::Error;

/// Errors that can occur while decoding a side indicator from the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SideError {
    /// The server encodes Sente as 1 and Gote as -1; anything else is invalid
    #[error("invalid side value {value} (expected 1 or -1)")]
    InvalidValue { value: i8 },
}

/// Errors that can occur while decoding a board coordinate from the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SquareError {
    /// Coordinates outside the 9x9 board
    #[error("square ({x}, {y}) is outside the 9x9 board")]
    OutOfRange { x: u8, y: u8 },
}
