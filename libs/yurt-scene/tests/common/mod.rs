use yurt_scene::{Host, HostEvent, Subscription};

/// Host that records live subscriptions.
#[derive(Debug, Default)]
pub struct TestHost {
    next: u64,
    pub live: Vec<Subscription>,
}

impl Host for TestHost {
    fn subscribe(&mut self, event: HostEvent) -> Subscription {
        self.next += 1;
        let subscription = Subscription {
            event,
            id: self.next,
        };
        self.live.push(subscription);
        subscription
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        self.live.retain(|s| *s != subscription);
    }
}

#[allow(dead_code)]
pub const WALLS_GLTF: &str = include_str!("../fixtures/walls.gltf");
