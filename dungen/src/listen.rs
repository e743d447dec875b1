//! Mechanism for receiving notifications of changes to a [`Dungeon`](crate::Dungeon).
//!
//! Objects which wish to send notifications use [`Notifier`]s, which manage a collection
//! of [`Listener`]s. Each listener reports when it is no longer needed and may be
//! discarded.
//!
//! When [`Notifier::notify`] is called to send a message, it is synchronously delivered
//! to all listeners; therefore, listeners are obligated to avoid making further
//! significant state changes. The typical pattern is for a listener to hold a weak
//! reference to a queue, which is read and cleared by whoever owns the queue.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Delivers messages of type `M` to a set of [`Listener`]s.
pub struct Notifier<M> {
    listeners: RefCell<Vec<Box<dyn Listener<M>>>>,
}

impl<M> Notifier<M> {
    /// Constructs a new empty [`Notifier`].
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Add a [`Listener`] to this set of listeners.
    ///
    /// Listeners which are already dead are dropped immediately.
    ///
    /// Panics if called from within [`Listener::receive`].
    pub fn listen<L: Listener<M> + 'static>(&self, listener: L) {
        if !listener.alive() {
            return;
        }
        let mut listeners = self.listeners.borrow_mut();
        listeners.retain(|l| l.alive());
        listeners.push(Box::new(listener));
    }

    /// Deliver a message to all [`Listener`]s.
    pub fn notify(&self, message: &M) {
        for listener in self.listeners.borrow().iter() {
            listener.receive(message);
        }
    }

    /// Number of listeners that are still alive.
    pub fn count(&self) -> usize {
        self.listeners.borrow().iter().filter(|l| l.alive()).count()
    }
}

impl<M> Default for Notifier<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for Notifier<M> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.listeners.try_borrow() {
            Ok(listeners) => fmt.debug_tuple("Notifier").field(&listeners.len()).finish(),
            Err(_) => fmt.debug_tuple("Notifier").field(&"?").finish(),
        }
    }
}

/// A receiver of messages which can indicate when it is no longer interested in
/// them (typically because the associated recipient has been dropped).
///
/// A listener must use interior mutability to store the message, and should limit that
/// to inserting into a queue or setting a flag.
pub trait Listener<M> {
    /// Process and store a message.
    fn receive(&self, message: &M);

    /// Returns [`false`] if the [`Listener`] should not receive any further messages.
    fn alive(&self) -> bool;
}

impl<M, F: Fn(&M)> Listener<M> for F {
    fn receive(&self, message: &M) {
        self(message);
    }

    fn alive(&self) -> bool {
        true
    }
}

/// A [`Listener`] destination which stores all the messages it receives, in order.
///
/// ```
/// use dungen::listen::{Notifier, Sink};
///
/// let notifier = Notifier::new();
/// let sink = Sink::new();
/// notifier.listen(sink.listener());
/// notifier.notify(&"a");
/// notifier.notify(&"b");
/// assert_eq!(sink.drain(), ["a", "b"]);
///
/// drop(sink);
/// assert_eq!(notifier.count(), 0);
/// ```
pub struct Sink<M> {
    messages: Rc<RefCell<Vec<M>>>,
}

/// [`Sink::listener()`] implementation.
pub struct SinkListener<M> {
    weak_messages: Weak<RefCell<Vec<M>>>,
}

impl<M> Sink<M> {
    /// Constructs a new empty [`Sink`].
    pub fn new() -> Self {
        Self {
            messages: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Returns a [`Listener`] which records the messages it receives in this Sink.
    pub fn listener(&self) -> SinkListener<M> {
        SinkListener {
            weak_messages: Rc::downgrade(&self.messages),
        }
    }

    /// Removes and returns all messages received so far.
    pub fn drain(&self) -> Vec<M> {
        std::mem::take(&mut *self.messages.borrow_mut())
    }

    /// Returns whether no messages are waiting.
    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }
}

impl<M: Clone> Listener<M> for SinkListener<M> {
    fn receive(&self, message: &M) {
        if let Some(cell) = self.weak_messages.upgrade() {
            cell.borrow_mut().push(message.clone());
        }
    }

    fn alive(&self) -> bool {
        self.weak_messages.strong_count() > 0
    }
}

impl<M> Default for Sink<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: fmt::Debug> fmt::Debug for Sink<M> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_tuple("Sink").field(&*self.messages.borrow()).finish()
    }
}

impl<M> fmt::Debug for SinkListener<M> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("SinkListener")
            .field("alive", &(self.weak_messages.strong_count() > 0))
            .finish()
    }
}
