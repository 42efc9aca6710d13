//! # Browser Host
//!
//! JavaScript owns `requestAnimationFrame` and the `resize` listener. This
//! host only tracks which events the viewer currently wants, so the JS loop
//! can stop scheduling once the viewer unmounts.

use yurt_scene::{Host, HostEvent, Subscription};

#[derive(Debug, Default)]
pub struct BrowserHost {
    next_id: u64,
    active: Vec<Subscription>,
}

impl BrowserHost {
    /// True while some subscription for `event` is live.
    pub fn wants(&self, event: HostEvent) -> bool {
        self.active.iter().any(|s| s.event == event)
    }
}

impl Host for BrowserHost {
    fn subscribe(&mut self, event: HostEvent) -> Subscription {
        self.next_id += 1;
        let subscription = Subscription {
            event,
            id: self.next_id,
        };
        self.active.push(subscription);
        subscription
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        self.active.retain(|s| s.id != subscription.id);
    }
}
