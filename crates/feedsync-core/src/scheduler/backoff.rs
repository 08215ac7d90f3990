//! Delay growth arithmetic.

use super::types::PollingPolicy;

/// Which kind of unproductive fetch the delay is growing after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    Empty,
    Failure,
}

/// `min(max, round(current × factor))`, never below the policy minimum.
pub fn grow_delay(current_ms: u64, kind: Backoff, policy: &PollingPolicy) -> u64 {
    let factor = match kind {
        Backoff::Empty => policy.empty_growth,
        Backoff::Failure => policy.failure_growth,
    };
    let grown = (current_ms as f64 * factor).round();
    let capped = if grown >= policy.max_delay_ms as f64 {
        policy.max_delay_ms
    } else {
        grown as u64
    };
    capped.max(policy.min_delay_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_growth_rounds() {
        let policy = PollingPolicy::default();
        assert_eq!(grow_delay(1000, Backoff::Empty, &policy), 1700);
        assert_eq!(grow_delay(1700, Backoff::Empty, &policy), 2890);
    }

    #[test]
    fn failure_growth_doubles() {
        let policy = PollingPolicy::default();
        assert_eq!(grow_delay(2890, Backoff::Failure, &policy), 5780);
    }

    #[test]
    fn capped_at_max() {
        let policy = PollingPolicy::default();
        assert_eq!(grow_delay(10000, Backoff::Empty, &policy), 15000);
        assert_eq!(grow_delay(15000, Backoff::Failure, &policy), 15000);
    }

    #[test]
    fn empty_sequence_is_monotone_and_bounded() {
        let policy = PollingPolicy::default();
        let mut delay = policy.min_delay_ms;
        for _ in 0..50 {
            let next = grow_delay(delay, Backoff::Empty, &policy);
            assert!(next >= delay);
            assert!(next <= policy.max_delay_ms);
            delay = next;
        }
        assert_eq!(delay, policy.max_delay_ms);
    }

    #[test]
    fn normalized_policy_repairs_bounds() {
        let policy = PollingPolicy {
            min_delay_ms: 0,
            max_delay_ms: 0,
            empty_growth: 0.5,
            failure_growth: f64::NAN,
            ..PollingPolicy::default()
        }
        .normalized();
        assert_eq!(policy.min_delay_ms, 1);
        assert_eq!(policy.max_delay_ms, 1);
        assert_eq!(policy.empty_growth, 1.0);
        assert_eq!(policy.failure_growth, 1.0);
    }
}
