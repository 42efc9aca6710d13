//! # Host Display
//!
//! The display environment a viewer is mounted in. The host owns the event
//! sources (animation frames, window resizes) and calls back into the
//! viewer; the viewer only registers and releases interest.

/// Event sources a viewer subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    AnimationFrame,
    Resize,
}

/// Handle returned by [`Host::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    pub event: HostEvent,
    pub id: u64,
}

/// Display host.
pub trait Host {
    /// Starts delivering `event` to the viewer.
    fn subscribe(&mut self, event: HostEvent) -> Subscription;

    /// Stops delivering the subscribed event.
    fn unsubscribe(&mut self, subscription: Subscription);
}
