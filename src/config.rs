use anyhow::bail;

use crate::channel::SimTime;

/// Tuning knobs for a sending entity. All times are in the scheduler's
///  simulated time units.
#[derive(Clone, Debug)]
pub struct ArqConfig {
    /// Maximum number of *packets* that may be in flight (sent but not yet
    ///  cumulatively acknowledged) at any given time. This bounds the send
    ///  buffer: a message arriving while the window is exhausted is refused.
    pub window_size: usize,

    /// Round-trip estimate assumed before the first measurement. Choosing
    ///  this too low causes spurious whole-window retransmissions on startup;
    ///  too high delays recovery from an initial loss.
    pub initial_rtt: SimTime,

    /// Lower bound for the smoothed round-trip estimate. A single
    ///  unrealistically fast ack (e.g. after a batch retransmission crossed
    ///  an ack in flight) must not collapse the retransmission timeout.
    pub min_rtt: SimTime,

    /// Upper bound for the smoothed round-trip estimate, limiting how long a
    ///  sender can stall before retransmitting.
    pub max_rtt: SimTime,
}

impl Default for ArqConfig {
    fn default() -> Self {
        ArqConfig {
            window_size: 10,
            initial_rtt: 50.0,
            min_rtt: 15.0,
            max_rtt: 100.0,
        }
    }
}

impl ArqConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.window_size == 0 {
            bail!("window size must be at least 1");
        }
        if !(self.min_rtt > 0.0) {
            bail!("minimum RTT must be positive");
        }
        if self.min_rtt > self.max_rtt {
            bail!("minimum RTT exceeds maximum RTT");
        }
        if self.initial_rtt < self.min_rtt || self.initial_rtt > self.max_rtt {
            bail!("initial RTT outside the configured RTT bounds");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::defaults(ArqConfig::default(), true)]
    #[case::small_window(ArqConfig { window_size: 1, ..ArqConfig::default() }, true)]
    #[case::zero_window(ArqConfig { window_size: 0, ..ArqConfig::default() }, false)]
    #[case::zero_min_rtt(ArqConfig { min_rtt: 0.0, initial_rtt: 1.0, ..ArqConfig::default() }, false)]
    #[case::inverted_bounds(ArqConfig { min_rtt: 100.0, max_rtt: 15.0, ..ArqConfig::default() }, false)]
    #[case::initial_below_min(ArqConfig { initial_rtt: 10.0, ..ArqConfig::default() }, false)]
    #[case::initial_above_max(ArqConfig { initial_rtt: 200.0, ..ArqConfig::default() }, false)]
    fn test_validate(#[case] config: ArqConfig, #[case] expected_ok: bool) {
        assert_eq!(config.validate().is_ok(), expected_ok);
    }
}
