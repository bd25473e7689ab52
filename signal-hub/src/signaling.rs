use std::borrow::Borrow;

use crate::{Receiver, SignalHub};

/// Gives a type that owns a [`SignalHub`] the hub's interface.
///
/// Only [`signal_hub`](`Signaling::signal_hub`) needs to be implemented. The provided methods
/// delegate to it and return `self` for chaining.
///
/// ```
/// use std::{cell::Cell, rc::Rc};
///
/// use signal_hub::{Receiver, SignalHub, Signaling};
///
/// #[derive(Default)]
/// struct Widget {
///     hub: SignalHub<&'static str>,
/// }
///
/// impl Signaling<&'static str> for Widget {
///     fn signal_hub(&self) -> &SignalHub<&'static str> {
///         &self.hub
///     }
/// }
///
/// let clicked = Rc::new(Cell::new(""));
/// let on_click = Receiver::new({
///     let clicked = Rc::clone(&clicked);
///     move |button: &&'static str| clicked.set(*button)
/// });
///
/// Widget::default().on("click", &on_click).emit("click", "left");
/// assert_eq!(clicked.get(), "left");
/// ```
///
/// [Contextual](`Receiver::contextual`) receivers are handed the embedded [`SignalHub`], not the
/// implementing type.
pub trait Signaling<A: ?Sized = ()> {
	/// The hub all provided methods delegate to.
	fn signal_hub(&self) -> &SignalHub<A>;

	/// See [`SignalHub::on`].
	fn on(&self, signal: &str, receiver: &Receiver<A>) -> &Self {
		self.signal_hub().on(signal, receiver);
		self
	}

	/// See [`SignalHub::once`].
	fn once(&self, signal: &str, receiver: &Receiver<A>) -> &Self {
		self.signal_hub().once(signal, receiver);
		self
	}

	/// See [`SignalHub::off`].
	fn off(&self, signal: &str, receiver: &Receiver<A>) -> &Self {
		self.signal_hub().off(signal, receiver);
		self
	}

	/// See [`SignalHub::emit`].
	fn emit(&self, signal: &str, args: impl Borrow<A>) -> &Self
	where
		Self: Sized,
	{
		self.signal_hub().emit(signal, args);
		self
	}

	/// See [`SignalHub::reset`].
	fn reset(&self) -> &Self {
		self.signal_hub().reset();
		self
	}
}
