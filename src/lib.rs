//! Go-Back-N ARQ protocol core: the sender and receiver state machines of a
//!  sliding-window reliability protocol over an unreliable channel.
//!
//! ## Design goals
//!
//! * The channel may corrupt, delay or reorder packets in transit, but never
//!   duplicates or fabricates them - the protocol recovers from everything
//!   the channel is allowed to do
//! * Up to N packets may be in flight at once; acknowledgments are
//!   *cumulative*, i.e. an ack for sequence number k confirms everything up
//!   to and including k
//! * Recovery is by whole-window retransmission: when the single
//!   retransmission timer fires, every outstanding packet goes out again in
//!   ascending sequence order
//!   * explicitly *not* selective repeat - a deliberately simpler trade-off
//!      with fuller retransmission batches
//! * The retransmission timeout adapts to the measured round-trip time via
//!   an exponentially weighted moving average, bounded by configured limits
//! * Delivery to the application is strictly in-order; the receiver buffers
//!   nothing and answers anything unexpected with a repeat of its last good
//!   cumulative ack
//! * The core is single-threaded and event-driven: the channel/scheduler
//!   collaborator delivers one event at a time (application send request,
//!   packet arrival, timer expiry) and the handler runs to completion.
//!   Everything that does I/O or advances time sits behind a trait seam,
//!   so the core never blocks and never reads a wall clock
//! * A message refused because the window is exhausted is *not* queued -
//!   resubmission is the application's responsibility
//!
//! ## Frame layout
//!
//! Every frame has the same fixed width - all numbers in network byte order
//!  (BE):
//! ```ascii
//! 0:  sequence number (u32) - consecutive from 1 for data frames, 0 for
//!      ack-only frames
//! 4:  cumulative ack number (u32) - 0 on data frames
//! 8:  CRC-32 checksum (u32) over the rest of the frame, i.e. computed with
//!      the checksum field excluded
//! 12: payload (20 bytes) - the application message, all zeroes for
//!      ack-only frames
//! ```
//!
//! NB: Corruption is detected by checksum verification and handled by
//!      dropping the frame silently; there is no error reply on the wire.
//!      The sender's timeout and the receiver's duplicate acks carry the
//!      whole recovery burden.

pub mod channel;
pub mod config;
pub mod packet;
pub mod receiver;
pub mod send_window;
pub mod sender;
pub mod seq;
pub mod timer;
