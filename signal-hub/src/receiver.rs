use std::{
	fmt::{self, Debug, Formatter},
	rc::Rc,
};

use crate::SignalHub;

/// A callable registered on a [`SignalHub`].
///
/// Receivers are compared by *identity*, not behaviour: clones of one [`Receiver`] are the same
/// receiver, while two receivers built from identical closures are not.
///
/// ```
/// use signal_hub::Receiver;
///
/// let a = Receiver::<()>::new(|()| ());
/// let b = Receiver::<()>::new(|()| ());
///
/// assert!(a.ptr_eq(&a.clone()));
/// assert!(!a.ptr_eq(&b));
/// ```
pub struct Receiver<A: ?Sized> {
	call: Call<A>,
}

enum Call<A: ?Sized> {
	Plain(Rc<dyn Fn(&A)>),
	Contextual(Rc<dyn Fn(&SignalHub<A>, &A)>),
}

/// Identity of a [`Receiver`] inside a hub's registry.
///
/// Only meaningful while the registry keeps the receiver alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ReceiverKey(*const ());

impl<A: ?Sized> Receiver<A> {
	/// Creates a new plain receiver.
	///
	/// It's called with the payload passed to [`SignalHub::emit`] and nothing else.
	pub fn new(f: impl 'static + Fn(&A)) -> Self {
		Self {
			call: Call::Plain(Rc::new(f)),
		}
	}

	/// Creates a new receiver that is additionally handed the [`SignalHub`] dispatching to it.
	///
	/// This is opt-in. Prefer [`Receiver::new`] and capturing what you need.
	///
	/// When registered through a [`Mixin`](`crate::Mixin`), the hub is that mixin's private instance.
	pub fn contextual(f: impl 'static + Fn(&SignalHub<A>, &A)) -> Self {
		Self {
			call: Call::Contextual(Rc::new(f)),
		}
	}

	/// Whether `self` and `other` are the same receiver.
	#[must_use]
	pub fn ptr_eq(&self, other: &Self) -> bool {
		self.key() == other.key()
	}

	/// Whether this receiver was created through [`Receiver::contextual`].
	#[must_use]
	pub fn is_contextual(&self) -> bool {
		matches!(self.call, Call::Contextual(_))
	}

	pub(crate) fn key(&self) -> ReceiverKey {
		ReceiverKey(match &self.call {
			Call::Plain(f) => Rc::as_ptr(f).cast::<()>(),
			Call::Contextual(f) => Rc::as_ptr(f).cast::<()>(),
		})
	}

	pub(crate) fn invoke(&self, hub: &SignalHub<A>, args: &A) {
		match &self.call {
			Call::Plain(f) => f(args),
			Call::Contextual(f) => f(hub, args),
		}
	}
}

impl<A: ?Sized> Clone for Receiver<A> {
	fn clone(&self) -> Self {
		Self {
			call: match &self.call {
				Call::Plain(f) => Call::Plain(Rc::clone(f)),
				Call::Contextual(f) => Call::Contextual(Rc::clone(f)),
			},
		}
	}
}

impl<A: ?Sized> Debug for Receiver<A> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_tuple(if self.is_contextual() {
			"Receiver::Contextual"
		} else {
			"Receiver"
		})
		.field(&self.key().0)
		.finish()
	}
}
