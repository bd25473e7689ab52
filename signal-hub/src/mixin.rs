use std::rc::Rc;

use log::trace;

use crate::{Receiver, SignalHub};

/// [`SignalHub`]'s operations as free-standing closures, all bound to one private hub.
///
/// Obtained from [`SignalHub::mixin`]. Store one per host *instance*, never in a `static` or
/// other shared location, as everything holding the same [`Mixin`] (or a clone of it) shares
/// its subscriptions.
///
/// ```
/// use std::{cell::Cell, rc::Rc};
///
/// use signal_hub::{Mixin, Receiver, SignalHub};
///
/// struct Balloon {
///     events: Mixin<u8>,
/// }
///
/// let (red, blue) = (
///     Balloon { events: SignalHub::mixin() },
///     Balloon { events: SignalHub::mixin() },
/// );
///
/// let pops = Rc::new(Cell::new(0));
/// let on_pop = Receiver::new({
///     let pops = Rc::clone(&pops);
///     move |&loudness: &u8| pops.set(pops.get() + loudness)
/// });
/// (red.events.on)("pop", &on_pop);
///
/// // Detached from its owner, the closure still targets `red`'s hub.
/// let emit = Rc::clone(&red.events.emit);
/// emit("pop", &3);
/// (blue.events.emit)("pop", &5);
///
/// assert_eq!(pops.get(), 3);
/// ```
pub struct Mixin<A: ?Sized + 'static = ()> {
	/// See [`SignalHub::on`].
	pub on: Rc<dyn Fn(&str, &Receiver<A>)>,
	/// See [`SignalHub::once`].
	pub once: Rc<dyn Fn(&str, &Receiver<A>)>,
	/// See [`SignalHub::off`].
	pub off: Rc<dyn Fn(&str, &Receiver<A>)>,
	/// See [`SignalHub::emit`].
	pub emit: Rc<dyn Fn(&str, &A)>,
	/// See [`SignalHub::reset`].
	pub reset: Rc<dyn Fn()>,
}

impl<A: ?Sized + 'static> SignalHub<A> {
	/// Creates a fresh [`SignalHub`] and returns its operations bound to it.
	///
	/// Each call creates a new hub, so separate [`Mixin`]s never share subscriptions.
	#[must_use]
	pub fn mixin() -> Mixin<A> {
		let hub = Rc::new(Self::new());
		trace!("Created mixin hub at {:p}.", Rc::as_ptr(&hub));
		Mixin {
			on: {
				let hub = Rc::clone(&hub);
				Rc::new(move |signal: &str, receiver: &Receiver<A>| {
					hub.on(signal, receiver);
				})
			},
			once: {
				let hub = Rc::clone(&hub);
				Rc::new(move |signal: &str, receiver: &Receiver<A>| {
					hub.once(signal, receiver);
				})
			},
			off: {
				let hub = Rc::clone(&hub);
				Rc::new(move |signal: &str, receiver: &Receiver<A>| {
					hub.off(signal, receiver);
				})
			},
			emit: {
				let hub = Rc::clone(&hub);
				Rc::new(move |signal: &str, args: &A| {
					hub.emit(signal, args);
				})
			},
			reset: Rc::new(move || {
				hub.reset();
			}),
		}
	}
}

impl<A: ?Sized + 'static> Clone for Mixin<A> {
	fn clone(&self) -> Self {
		Self {
			on: Rc::clone(&self.on),
			once: Rc::clone(&self.once),
			off: Rc::clone(&self.off),
			emit: Rc::clone(&self.emit),
			reset: Rc::clone(&self.reset),
		}
	}
}

impl<A: ?Sized + 'static> std::fmt::Debug for Mixin<A> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Mixin").finish_non_exhaustive()
	}
}
