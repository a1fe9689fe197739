//! Window-level pointer listeners, scoped to a drag gesture.
//!
//! While an element is being repositioned the pointer can leave the
//! element's hit area, so moves and releases must be observed for the whole
//! window. Every such event is dispatched into a `PointerHub`, which queues
//! it for each live `PointerSubscription`. A listener exists exactly as long
//! as its guard, so dropping the drag state (release, scene replacement,
//! controller drop) always deregisters it and later events go nowhere.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use zg_core::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A window-level pointer event, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerSignal {
    Move(Point),
    Release,
}

#[derive(Debug)]
struct Listener {
    id: ListenerId,
    inbox: VecDeque<PointerSignal>,
}

#[derive(Debug, Default)]
struct Registry {
    next: u64,
    listeners: Vec<Listener>,
}

/// Window-level pointer event source.
///
/// The host feeds every pointer move and release into `dispatch`; only
/// live subscriptions receive them. Cloning yields another handle onto the
/// same registry.
#[derive(Debug, Clone, Default)]
pub struct PointerHub {
    registry: Rc<RefCell<Registry>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a listener. It is removed when the returned guard drops.
    pub fn subscribe(&self) -> PointerSubscription {
        let mut registry = self.registry.borrow_mut();
        let id = ListenerId(registry.next);
        registry.next += 1;
        registry.listeners.push(Listener {
            id,
            inbox: VecDeque::new(),
        });
        log::trace!("pointer listener {} installed", id.0);
        PointerSubscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Queue `signal` for every live listener. Returns how many received it;
    /// with no subscription the signal is dropped.
    pub fn dispatch(&self, signal: PointerSignal) -> usize {
        let mut registry = self.registry.borrow_mut();
        for listener in &mut registry.listeners {
            listener.inbox.push_back(signal);
        }
        registry.listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Guard for one installed listener.
#[derive(Debug)]
pub struct PointerSubscription {
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
}

impl PointerSubscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Take every signal delivered since the last call, oldest first.
    pub fn drain(&self) -> Vec<PointerSignal> {
        let Some(registry) = self.registry.upgrade() else {
            return Vec::new();
        };
        let mut registry = registry.borrow_mut();
        registry
            .listeners
            .iter_mut()
            .find(|l| l.id == self.id)
            .map(|l| l.inbox.drain(..).collect())
            .unwrap_or_default()
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().listeners.retain(|l| l.id != self.id);
            log::trace!("pointer listener {} removed", self.id.0);
        }
    }
}
