use core::fmt;

/// Represents an error while decoding a buffer of MIDI messages.
///
/// This type is a thin pointer to a static `ErrorKind`, so it is cheap to return and to copy
/// around.
///
/// If the `std` feature is enabled, this type implements `std::error::Error`.
/// Otherwise, only `Display` and `Debug` are implemented.
///
/// Note that only malformed *data* produces an `Error`.
/// Calling an accessor that does not apply to the message kind (for example `note()` on a
/// control change) is a bug in the caller, and is caught by debug assertions instead.
#[derive(Clone, Copy)]
pub struct Error {
    inner: &'static ErrorKind,
}
impl Error {
    /// Create a new error with the given `ErrorKind`.
    #[inline]
    pub fn new(kind: &'static ErrorKind) -> Error {
        Error::from(kind)
    }

    /// More information about the error itself.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        *self.inner
    }
}
impl From<&'static ErrorKind> for Error {
    #[inline]
    fn from(inner: &'static ErrorKind) -> Error {
        Error { inner }
    }
}
impl PartialEq for Error {
    #[inline]
    fn eq(&self, other: &Error) -> bool {
        self.kind() == other.kind()
    }
}
impl Eq for Error {}
impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.kind(), f)
    }
}
impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self.inner, f)
    }
}
#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// The type of error that occurred while decoding.
///
/// There are exactly two classes of data errors, each with a non-normative string literal
/// describing what went wrong.
#[derive(Copy, Clone, Debug)]
pub enum ErrorKind {
    /// A status byte did not map to any known message kind.
    ///
    /// This usually means that a data byte is being interpreted as a status byte, for example
    /// because the buffer is misaligned or uses running status.
    InvalidMidiData(&'static str),

    /// The length of the buffer is not a multiple of the 3-byte message width.
    InvalidMidiDataLength(&'static str),
}
impl ErrorKind {
    /// Get the informative message on what exactly went wrong.
    #[inline]
    pub fn message(&self) -> &'static str {
        match *self {
            ErrorKind::InvalidMidiData(msg) => msg,
            ErrorKind::InvalidMidiDataLength(msg) => msg,
        }
    }
}
/// Two kinds are equal if they are of the same class, regardless of the message.
impl PartialEq for ErrorKind {
    #[inline]
    fn eq(&self, other: &ErrorKind) -> bool {
        core::mem::discriminant(self) == core::mem::discriminant(other)
    }
}
impl Eq for ErrorKind {}
impl fmt::Display for ErrorKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::InvalidMidiData(msg) => write!(f, "invalid midi data: {}", msg),
            ErrorKind::InvalidMidiDataLength(msg) => {
                write!(f, "invalid midi data length: {}", msg)
            }
        }
    }
}

macro_rules! err_data {
    ($msg:expr) => {{
        const ERR_KIND: &'static ErrorKind = &ErrorKind::InvalidMidiData($msg);
        ERR_KIND
    }};
}
macro_rules! err_length {
    ($msg:expr) => {{
        const ERR_KIND: &'static ErrorKind = &ErrorKind::InvalidMidiDataLength($msg);
        ERR_KIND
    }};
}

/// The result type used by the MIDI decoder.
pub type Result<T> = StdResult<T, Error>;
pub(crate) use core::result::Result as StdResult;
