use std::{cell::Cell, collections::HashMap, rc::Rc};

use crate::Receiver;

/// One (receiver, signal) subscription.
pub(crate) struct Relay<A: ?Sized> {
	pub(crate) receiver: Receiver<A>,
	pub(crate) once: bool,
	attached: Cell<bool>,
}

impl<A: ?Sized> Relay<A> {
	pub(crate) fn new(receiver: Receiver<A>, once: bool) -> Rc<Self> {
		Rc::new(Self {
			receiver,
			once,
			attached: Cell::new(true),
		})
	}

	pub(crate) fn is_attached(&self) -> bool {
		self.attached.get()
	}

	/// Irreversible. A detached relay is skipped by any dispatch still holding it.
	pub(crate) fn detach(&self) {
		self.attached.set(false);
	}
}

/// Per-signal listener lists, in subscription order.
pub(crate) struct Backbone<A: ?Sized> {
	lists: HashMap<Rc<str>, Vec<Rc<Relay<A>>>>,
}

impl<A: ?Sized> Default for Backbone<A> {
	fn default() -> Self {
		Self {
			lists: HashMap::new(),
		}
	}
}

impl<A: ?Sized> Backbone<A> {
	pub(crate) fn attach(&mut self, signal: Rc<str>, relay: Rc<Relay<A>>) {
		self.lists.entry(signal).or_default().push(relay);
	}

	pub(crate) fn detach(&mut self, signal: &str, relay: &Rc<Relay<A>>) {
		relay.detach();
		if let Some(list) = self.lists.get_mut(signal) {
			list.retain(|r| !Rc::ptr_eq(r, relay));
			if list.is_empty() {
				self.lists.remove(signal);
			}
		}
	}

	/// Snapshot of the relays currently attached to `signal`.
	///
	/// Detachment after this call is visible through [`Relay::is_attached`].
	pub(crate) fn listeners(&self, signal: &str) -> Vec<Rc<Relay<A>>> {
		self.lists.get(signal).cloned().unwrap_or_default()
	}

	pub(crate) fn count(&self, signal: &str) -> usize {
		self.lists.get(signal).map_or(0, Vec::len)
	}

	pub(crate) fn signals(&self) -> impl '_ + Iterator<Item = (&str, usize)> {
		self.lists.iter().map(|(signal, list)| (&**signal, list.len()))
	}

	/// Detaches everything, returning the relays so they can be dropped outside any borrow.
	pub(crate) fn drain(&mut self) -> Vec<Rc<Relay<A>>> {
		let relays: Vec<_> = self.lists.drain().flat_map(|(_, list)| list).collect();
		for relay in &relays {
			relay.detach();
		}
		relays
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn relay() -> Rc<Relay<()>> {
		Relay::new(Receiver::<()>::new(|()| ()), false)
	}

	#[test]
	fn keeps_subscription_order() {
		let mut backbone = Backbone::default();
		let (a, b, c) = (relay(), relay(), relay());
		for r in [&a, &b, &c] {
			backbone.attach("pop".into(), Rc::clone(r));
		}

		let listeners = backbone.listeners("pop");
		assert_eq!(listeners.len(), 3);
		assert!(Rc::ptr_eq(&listeners[0], &a));
		assert!(Rc::ptr_eq(&listeners[1], &b));
		assert!(Rc::ptr_eq(&listeners[2], &c));
	}

	#[test]
	fn detach_prunes_and_flags() {
		let mut backbone = Backbone::default();
		let a = relay();
		backbone.attach("pop".into(), Rc::clone(&a));

		let snapshot = backbone.listeners("pop");
		backbone.detach("pop", &a);

		assert_eq!(backbone.count("pop"), 0);
		assert_eq!(backbone.signals().count(), 0);
		assert!(!snapshot[0].is_attached());
	}

	#[test]
	fn drain_detaches_everything() {
		let mut backbone = Backbone::default();
		let (a, b) = (relay(), relay());
		backbone.attach("pop".into(), Rc::clone(&a));
		backbone.attach("push".into(), Rc::clone(&b));

		assert_eq!(backbone.drain().len(), 2);
		assert!(!a.is_attached());
		assert!(!b.is_attached());
		assert!(backbone.listeners("pop").is_empty());
	}
}
