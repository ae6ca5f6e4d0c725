//! Window chrome commands and the maximize-state push channel.

use std::sync::mpsc::{self, Receiver, Sender};

/// Commands the custom title bar sends to the native window.
pub trait WindowControls {
    fn minimize(&self);
    fn toggle_maximize(&self);
    fn close(&self);
}

/// Maximize-state notifications, host to UI.
///
/// There is at most one subscriber; subscribing again replaces it. Only real
/// state changes are delivered.
#[derive(Default)]
pub struct MaximizeEvents {
    maximized: Option<bool>,
    subscriber: Option<(u64, Sender<bool>)>,
    next_id: u64,
}

/// Receiving end handed out by [`MaximizeEvents::subscribe`].
pub struct MaximizeSubscription {
    id: u64,
    rx: Receiver<bool>,
}

impl MaximizeSubscription {
    /// The most recent state pushed since the last call, if any.
    pub fn latest(&self) -> Option<bool> {
        self.rx.try_iter().last()
    }
}

impl MaximizeEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized.unwrap_or(false)
    }

    pub fn subscribe(&mut self) -> MaximizeSubscription {
        let (tx, rx) = mpsc::channel();
        let id = self.next_id;
        self.next_id += 1;
        self.subscriber = Some((id, tx));
        MaximizeSubscription { id, rx }
    }

    pub fn unsubscribe(&mut self, subscription: MaximizeSubscription) {
        if matches!(self.subscriber, Some((id, _)) if id == subscription.id) {
            self.subscriber = None;
        }
    }

    pub fn has_subscriber(&self) -> bool {
        self.subscriber.is_some()
    }

    /// Record the window's current state. Returns true when a change was
    /// delivered to a subscriber.
    pub fn publish(&mut self, maximized: bool) -> bool {
        if self.maximized == Some(maximized) {
            return false;
        }
        self.maximized = Some(maximized);

        let Some((_, tx)) = &self.subscriber else {
            return false;
        };
        if tx.send(maximized).is_err() {
            self.subscriber = None;
            return false;
        }
        true
    }
}
