use std::fmt::{Display, Formatter};

/// Protocol sequence number.
///
/// Data packets are numbered consecutively starting at 1; 0 is reserved for
/// packets that carry no meaningful value in the respective field (the `ack`
/// field of data packets, the `seq` field of ack-only packets).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct SeqNr(u32);

impl Display for SeqNr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl SeqNr {
    pub const ZERO: SeqNr = SeqNr(0);
    /// first sequence number assigned to a data packet
    pub const FIRST: SeqNr = SeqNr(1);

    pub fn from_raw(value: u32) -> Self {
        Self(value)
    }

    pub fn to_raw(&self) -> u32 {
        self.0
    }

    pub fn next(&self) -> SeqNr {
        SeqNr(
            self.0.checked_add(1)
                .expect("sequence number space exhausted")
        )
    }

    /// The slot this sequence number occupies in a circular buffer of
    ///  `window_size` slots.
    pub fn slot_in(&self, window_size: usize) -> usize {
        self.0 as usize % window_size
    }
}
