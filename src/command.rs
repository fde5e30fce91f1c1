//! The fixed command vocabulary derived from keyboard input.

/// A single control command. Exactly one is produced per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    Quit,
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
    Accelerate,
    Decelerate,
    TurnLeft,
    TurnRight,
    TiltUp,
    TiltDown,
    Raise,
    Lower,
    #[default]
    None,
}

impl Command {
    /// Map a single key byte to its command.
    ///
    /// Escape sequences are handled by [`crate::input::decode_escape`];
    /// a lone `ESC` byte maps to [`Command::None`] here.
    pub fn from_key(byte: u8) -> Self {
        match byte {
            b'q' => Command::Quit,
            // Ctrl+C arrives as ETX while the terminal is in raw mode
            0x03 => Command::Quit,
            b'+' => Command::ZoomIn,
            b'-' => Command::ZoomOut,
            b'w' => Command::Accelerate,
            b's' => Command::Decelerate,
            b'a' => Command::TurnLeft,
            b'd' => Command::TurnRight,
            b'c' => Command::TiltUp,
            b'e' => Command::TiltDown,
            b'r' => Command::Raise,
            b'v' => Command::Lower,
            _ => Command::None,
        }
    }

    /// Map the final byte of an `ESC [ x` cursor-key sequence.
    pub fn from_cursor_key(byte: u8) -> Self {
        match byte {
            b'A' => Command::PanUp,
            b'B' => Command::PanDown,
            b'C' => Command::PanRight,
            b'D' => Command::PanLeft,
            _ => Command::None,
        }
    }
}
