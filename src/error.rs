//! Error types for the encoder driver.

use core::fmt;

/// Errors that can occur while sampling the encoder lines.
///
/// Decoding itself cannot fail. The only fallible operation is the
/// digital read, and on most HALs its error type is
/// [`Infallible`](core::convert::Infallible).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderError<E> {
    /// Underlying GPIO read error.
    Pin(E),
}

// Allow ergonomic `?` propagation from raw pin errors.
impl<E> From<E> for EncoderError<E> {
    fn from(error: E) -> Self {
        EncoderError::Pin(error)
    }
}

impl<E: fmt::Debug> fmt::Display for EncoderError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncoderError::Pin(e) => write!(f, "GPIO read error: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for EncoderError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            EncoderError::Pin(e) => defmt::write!(f, "GPIO read error: {}", e),
        }
    }
}

// ── Unit Tests ───────────────────────────────────────────────────────
