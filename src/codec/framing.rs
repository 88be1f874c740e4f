//! How the end of an embedded payload is found.

use serde::{Deserialize, Serialize};

/// Size of the optional big-endian length prefix, in bits.
pub const LENGTH_PREFIX_BITS: usize = 32;

/// Payload framing mode.
///
/// [`Framing::Terminator`] is the default and never writes a terminator: the
/// decoder stops at the first all-zero byte it reads back, which is usually
/// the untouched cover noise right after the payload. A zero byte inside the
/// payload, or a cover whose trailing LSBs never form one, breaks this.
/// [`Framing::LengthPrefixed`] trades compatibility for a reliable end marker.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Framing {
    /// Stop decoding at the first `00000000` byte.
    #[default]
    Terminator,
    /// Prefix the payload with its byte length as a `u32` (big-endian).
    LengthPrefixed,
}
