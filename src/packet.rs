use std::fmt::{Debug, Formatter};

use bytes::{Buf, BufMut, BytesMut};
use crc::Crc;

use crate::seq::SeqNr;

/// Fixed payload size of a data packet. Application messages are exactly this
///  long; ack-only packets carry an all-zero block of the same size so the
///  frame stays fixed-width.
pub const PAYLOAD_LEN: usize = 20;

/// Application-level unit of data, opaque to the protocol.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Message {
    pub data: [u8; PAYLOAD_LEN],
}

impl Message {
    /// Builds a message from up to [`PAYLOAD_LEN`] bytes, zero-filling the
    ///  remainder. Longer input is truncated.
    pub fn from_bytes(bytes: &[u8]) -> Message {
        let mut data = [0u8; PAYLOAD_LEN];
        let len = bytes.len().min(PAYLOAD_LEN);
        data[..len].copy_from_slice(&bytes[..len]);
        Message { data }
    }
}

/// Integrity checksum over a packet's logical fields.
///
/// Computed as CRC-32/iSCSI over the big-endian serialization of `seq`, `ack`
///  and the payload - i.e. over the frame with the checksum field excluded.
///  Computing over the explicit serialization rather than raw struct memory
///  keeps the value independent of layout and padding.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Checksum(pub u32);

impl Debug for Checksum {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08x?}", self.0)
    }
}

impl Checksum {
    pub fn new(seq: SeqNr, ack: SeqNr, payload: &[u8; PAYLOAD_LEN]) -> Checksum {
        let hasher = Crc::<u32>::new(&crc::CRC_32_ISCSI);
        let mut digest = hasher.digest();

        digest.update(&seq.to_raw().to_be_bytes());
        digest.update(&ack.to_raw().to_be_bytes());
        digest.update(payload);

        Checksum(
            digest.finalize()
        )
    }
}

/// A protocol frame: sequence number, cumulative ack number, checksum and a
///  fixed-size payload. Immutable once built - the checksum is derived from
///  the other fields at construction time.
///
/// Wire layout (all numbers in network byte order):
/// ```ascii
/// 0:  seq (u32)
/// 4:  ack (u32)
/// 8:  checksum (u32)
/// 12: payload (20 bytes)
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Packet {
    seq: SeqNr,
    ack: SeqNr,
    checksum: Checksum,
    payload: [u8; PAYLOAD_LEN],
}

impl Packet {
    pub const SERIALIZED_LEN: usize = 3 * size_of::<u32>() + PAYLOAD_LEN;

    /// Frames a packet, zero-filling the payload if none is given and
    ///  storing the checksum over the other fields.
    pub fn build(seq: SeqNr, ack: SeqNr, payload: Option<&Message>) -> Packet {
        let payload = match payload {
            Some(message) => message.data,
            None => [0u8; PAYLOAD_LEN],
        };

        Packet {
            seq,
            ack,
            checksum: Checksum::new(seq, ack, &payload),
            payload,
        }
    }

    /// A pure acknowledgment frame: no payload, no meaningful sequence number.
    pub fn ack_only(ack: SeqNr) -> Packet {
        Packet::build(SeqNr::ZERO, ack, None)
    }

    /// Recomputes the checksum over the logical fields and compares it to the
    ///  stored value. False means the frame was corrupted in transit.
    pub fn verify(&self) -> bool {
        Checksum::new(self.seq, self.ack, &self.payload) == self.checksum
    }

    pub fn seq(&self) -> SeqNr {
        self.seq
    }

    pub fn ack(&self) -> SeqNr {
        self.ack
    }

    pub fn payload(&self) -> &[u8; PAYLOAD_LEN] {
        &self.payload
    }

    pub fn ser(&self, buf: &mut BytesMut) {
        buf.put_u32(self.seq.to_raw());
        buf.put_u32(self.ack.to_raw());
        buf.put_u32(self.checksum.0);
        buf.put_slice(&self.payload);
    }

    /// Reads a frame from the buffer. Fails only on truncation; checksum
    ///  verification is a separate step so corrupted frames can be counted
    ///  and dropped by protocol logic rather than parse errors.
    pub fn deser(buf: &mut impl Buf) -> anyhow::Result<Packet> {
        let seq = SeqNr::from_raw(buf.try_get_u32()?);
        let ack = SeqNr::from_raw(buf.try_get_u32()?);
        let checksum = Checksum(buf.try_get_u32()?);

        let mut payload = [0u8; PAYLOAD_LEN];
        buf.try_copy_to_slice(&mut payload)?;

        Ok(Packet {
            seq,
            ack,
            checksum,
            payload,
        })
    }
}
