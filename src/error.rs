//! Errors surfaced by the game core.

/// Failure while handling a tick or an event.
///
/// The state transition that triggered the I/O has already been applied when
/// one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<S, W> {
    /// The elapsed-time store rejected a read or write
    Storage(S),
    /// The telemetry writer failed
    Telemetry(W),
    /// A report line did not fit its buffer
    LineOverflow,
}

impl<S: core::fmt::Debug, W: core::fmt::Debug> core::fmt::Display for Error<S, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Storage(e) => write!(f, "elapsed-time store error: {e:?}"),
            Error::Telemetry(e) => write!(f, "telemetry write error: {e:?}"),
            Error::LineOverflow => f.write_str("report line overflow"),
        }
    }
}
