use std::collections::HashMap;

use crate::decode::Channel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken {
    pub channel: Channel,
    pub seq: u64,
}

/// Hands out monotonically increasing tokens and remembers the newest one per
/// channel. A response is applied only if its token is still the newest.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    next_seq: u64,
    latest: HashMap<Channel, u64>,
    in_flight: usize,
}

impl RequestTracker {
    pub fn issue(&mut self, channel: Channel) -> RequestToken {
        self.next_seq += 1;
        self.latest.insert(channel, self.next_seq);
        self.in_flight += 1;
        RequestToken {
            channel,
            seq: self.next_seq,
        }
    }

    /// Retires whatever is outstanding on `channel` without issuing a request.
    pub fn invalidate(&mut self, channel: Channel) {
        self.next_seq += 1;
        self.latest.insert(channel, self.next_seq);
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.get(&token.channel) == Some(&token.seq)
    }

    /// Marks a request as finished, stale or not. Returns whether it is current.
    pub fn settle(&mut self, token: RequestToken) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.is_current(token)
    }

    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub const fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_token_invalidates_older_on_same_channel() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue(Channel::Transactions);
        let second = tracker.issue(Channel::Transactions);
        assert!(second.seq > first.seq);
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn channels_are_independent() {
        let mut tracker = RequestTracker::default();
        let rows = tracker.issue(Channel::Transactions);
        let _senators = tracker.issue(Channel::Senators);
        assert!(tracker.is_current(rows));
    }

    #[test]
    fn invalidate_retires_outstanding_token() {
        let mut tracker = RequestTracker::default();
        let rows = tracker.issue(Channel::Transactions);
        tracker.invalidate(Channel::Transactions);
        assert!(!tracker.is_current(rows));
        assert_eq!(tracker.in_flight(), 1);

        let fresh = tracker.issue(Channel::Transactions);
        assert!(tracker.is_current(fresh));
    }

    #[test]
    fn settle_counts_down_in_flight() {
        let mut tracker = RequestTracker::default();
        let stale = tracker.issue(Channel::Activity);
        let fresh = tracker.issue(Channel::Activity);
        assert_eq!(tracker.in_flight(), 2);
        assert!(!tracker.settle(stale));
        assert!(tracker.settle(fresh));
        assert!(!tracker.is_loading());
    }
}
