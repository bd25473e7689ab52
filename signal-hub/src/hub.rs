use std::{
	borrow::Borrow,
	cell::RefCell,
	collections::HashMap,
	fmt::{self, Debug, Formatter},
	mem,
	rc::Rc,
};

use log::{debug, trace};

use crate::{
	receiver::ReceiverKey,
	relay::{Backbone, Relay},
	Receiver,
};

/// A synchronous, single-threaded signal/receiver registry.
///
/// Receivers subscribe to signals by name and are invoked, in subscription order, each time that
/// signal is [emitted](`SignalHub::emit`). `A` is the payload every receiver of this hub is called
/// with; use a tuple for several positional arguments.
///
/// Each (receiver, signal) pair is subscribed at most once. The same receiver may be subscribed to
/// any number of *different* signals, each independently.
///
/// All methods take `&self` and return it, so calls chain and receivers may freely call back into
/// the hub while it dispatches to them:
///
/// - A receiver removed (by anyone) before its turn in an ongoing [`emit`](`SignalHub::emit`) is
///   skipped.
/// - A receiver removing itself doesn't affect the others.
/// - Receivers subscribed during an [`emit`](`SignalHub::emit`) are only reached by later ones.
/// - [`once`](`SignalHub::once`) receivers are unsubscribed *before* they run, so emitting the same
///   signal again from inside one doesn't reach it again.
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use signal_hub::{Receiver, SignalHub};
///
/// let log = Rc::new(RefCell::new(Vec::new()));
/// let record = |name: &'static str| {
///     let log = Rc::clone(&log);
///     Receiver::new(move |&(x, y): &(i32, i32)| log.borrow_mut().push((name, x + y)))
/// };
///
/// let hub = SignalHub::<(i32, i32)>::new();
/// hub.on("add", &record("a"))
///     .once("add", &record("b"))
///     .emit("add", (1, 2))
///     .emit("add", (3, 4));
///
/// assert_eq!(*log.borrow(), [("a", 3), ("b", 3), ("a", 7)]);
/// ```
///
/// Panics in receivers are not caught. They abort the current [`emit`](`SignalHub::emit`) and leave
/// the hub in a consistent state.
pub struct SignalHub<A: ?Sized = ()> {
	registry: RefCell<Registry<A>>,
}

struct Registry<A: ?Sized> {
	relays: HashMap<ReceiverKey, HashMap<Rc<str>, Rc<Relay<A>>>>,
	backbone: Backbone<A>,
}

impl<A: ?Sized> Default for Registry<A> {
	fn default() -> Self {
		Self {
			relays: HashMap::new(),
			backbone: Backbone::default(),
		}
	}
}

impl<A: ?Sized> Registry<A> {
	/// Returns the removed relay, which is detached already.
	fn remove(&mut self, signal: &str, key: ReceiverKey) -> Option<Rc<Relay<A>>> {
		let signals = self.relays.get_mut(&key)?;
		let relay = signals.remove(signal)?;
		if signals.is_empty() {
			self.relays.remove(&key);
		}
		self.backbone.detach(signal, &relay);
		Some(relay)
	}
}

impl<A: ?Sized> Default for SignalHub<A> {
	fn default() -> Self {
		Self::new()
	}
}

impl<A: ?Sized> SignalHub<A> {
	/// Creates a new [`SignalHub`] without any subscriptions.
	#[must_use]
	pub fn new() -> Self {
		Self {
			registry: RefCell::default(),
		}
	}

	/// Subscribes `receiver` to every future emission of `signal`, until removed.
	///
	/// Does nothing if `signal` is empty or `receiver` is already subscribed to it.
	pub fn on(&self, signal: &str, receiver: &Receiver<A>) -> &Self {
		self.add(signal, receiver, false);
		self
	}

	/// Like [`on`](`SignalHub::on`), but `receiver` is unsubscribed again right before it first runs.
	///
	/// If `receiver` is already subscribed to `signal` (either way), this does nothing.
	pub fn once(&self, signal: &str, receiver: &Receiver<A>) -> &Self {
		self.add(signal, receiver, true);
		self
	}

	/// Unsubscribes `receiver` from `signal`, if it is subscribed.
	///
	/// Other subscriptions of the same receiver (or to the same signal) are unaffected.
	pub fn off(&self, signal: &str, receiver: &Receiver<A>) -> &Self {
		let removed = self.registry.borrow_mut().remove(signal, receiver.key());
		if removed.is_some() {
			trace!("Unsubscribed {receiver:?} from {signal:?}.");
		}
		// The receiver may be dropped here, which is fine now that the registry is released.
		drop(removed);
		self
	}

	/// Synchronously calls every receiver of `signal` with `args`, in subscription order.
	///
	/// Emitting a signal nobody listens to does nothing.
	///
	/// # Panics
	///
	/// Iff a receiver panics. Receivers after it are not called by this emission.
	pub fn emit(&self, signal: &str, args: impl Borrow<A>) -> &Self {
		let args: &A = args.borrow();
		let listeners = self.registry.borrow().backbone.listeners(signal);
		trace!("Emitting {signal:?} to {} receiver(s).", listeners.len());

		for relay in listeners {
			if !relay.is_attached() {
				continue;
			}
			if relay.once {
				self.off(signal, &relay.receiver);
			}
			relay.receiver.invoke(self, args);
		}
		self
	}

	/// Unsubscribes all receivers from all signals.
	///
	/// An ongoing [`emit`](`SignalHub::emit`) won't call any further receivers either.
	pub fn reset(&self) -> &Self {
		let discarded = {
			let mut registry = self.registry.borrow_mut();
			let relays = mem::take(&mut registry.relays);
			(relays, registry.backbone.drain())
		};
		trace!("Reset, discarding {} relay(s).", discarded.1.len());
		drop(discarded);
		self
	}

	/// How many receivers are currently subscribed to `signal`.
	#[must_use]
	pub fn receiver_count(&self, signal: &str) -> usize {
		self.registry.borrow().backbone.count(signal)
	}

	/// Whether `receiver` is currently subscribed to `signal`.
	#[must_use]
	pub fn is_subscribed(&self, signal: &str, receiver: &Receiver<A>) -> bool {
		self.registry
			.borrow()
			.relays
			.get(&receiver.key())
			.is_some_and(|signals| signals.contains_key(signal))
	}

	/// Whether there are no subscriptions at all.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.registry.borrow().relays.is_empty()
	}

	fn add(&self, signal: &str, receiver: &Receiver<A>, once: bool) {
		if signal.is_empty() {
			debug!("Ignored subscription of {receiver:?} to an empty signal name.");
			return;
		}

		let mut registry = self.registry.borrow_mut();
		let Registry { relays, backbone } = &mut *registry;
		let signals = relays.entry(receiver.key()).or_default();
		if signals.contains_key(signal) {
			debug!("Ignored duplicate subscription of {receiver:?} to {signal:?}.");
			return;
		}

		trace!(
			"Subscribing {receiver:?} to {signal:?}{}.",
			if once { " once" } else { "" }
		);
		let signal: Rc<str> = signal.into();
		let relay = Relay::new(receiver.clone(), once);
		signals.insert(Rc::clone(&signal), Rc::clone(&relay));
		backbone.attach(signal, relay);
	}
}

impl<A: ?Sized> Debug for SignalHub<A> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let Ok(registry) = self.registry.try_borrow() else {
			return f.debug_struct("SignalHub").finish_non_exhaustive();
		};
		let mut signals: Vec<_> = registry.backbone.signals().collect();
		signals.sort_unstable();
		f.debug_struct("SignalHub")
			.field("signals", &signals)
			.finish()
	}
}
