use std::{cell::Cell, rc::Rc};

use signal_hub::{Receiver, SignalHub};

mod _validator;
use _validator::{recorder, Validator};

#[test]
fn signals_once_receivers_a_single_time() {
	let v = Validator::new();
	let hub = SignalHub::<()>::new();

	hub.on("pop", &recorder(&v, "a"))
		.once("pop", &recorder(&v, "b"))
		.on("pop", &recorder(&v, "c"));
	hub.emit("pop", ()).emit("pop", ());

	v.expect(["a", "b", "c", "a", "c"]);
}

#[test]
fn once_receiver_after_regular_ones() {
	let v = Validator::new();
	let hub = SignalHub::<()>::new();

	hub.on("pop", &recorder(&v, "A"))
		.on("pop", &recorder(&v, "B"))
		.once("pop", &recorder(&v, "C"));
	hub.emit("pop", ()).emit("pop", ());

	v.expect(["A", "B", "C", "A", "B"]);
}

#[test]
fn receivers_with_the_same_effect_do_not_interfere() {
	let v = Validator::new();
	let hub = SignalHub::<()>::new();

	hub.on("pop", &recorder(&v, "a"))
		.once("pop", &recorder(&v, "a"));
	hub.emit("pop", ()).emit("pop", ());

	v.expect(["a", "a", "a"]);
}

#[test]
fn does_not_loop_when_reemitting_from_once() {
	let hub = Rc::new(SignalHub::<()>::new());
	let ticks = Rc::new(Cell::new(0));

	hub.once("pop", &Receiver::<()>::new({
		let hub = Rc::downgrade(&hub);
		let ticks = Rc::clone(&ticks);
		move |()| {
			ticks.set(ticks.get() + 1);
			if ticks.get() < 4 {
				if let Some(hub) = hub.upgrade() {
					hub.emit("pop", ());
				}
			}
		}
	}));
	hub.emit("pop", ());

	assert_eq!(ticks.get(), 1);
	assert!(hub.is_empty());
}

#[test]
fn once_is_removed_before_it_runs() {
	let hub = Rc::new(SignalHub::<()>::new());
	let observed = Rc::new(Cell::new(None));

	let receiver = Rc::new(Cell::new(None::<Receiver<()>>));
	let once = Receiver::<()>::new({
		let hub = Rc::downgrade(&hub);
		let observed = Rc::clone(&observed);
		let receiver = Rc::clone(&receiver);
		move |()| {
			let hub = hub.upgrade().unwrap();
			let this = receiver.take().unwrap();
			observed.set(Some(hub.is_subscribed("pop", &this)));
		}
	});
	receiver.set(Some(once.clone()));

	hub.once("pop", &once).emit("pop", ());
	assert_eq!(observed.get(), Some(false));
}

#[test]
fn once_can_be_removed_before_firing() {
	let v = Validator::new();
	let hub = SignalHub::<()>::new();

	let a = recorder(&v, "a");
	hub.once("pop", &a).off("pop", &a).emit("pop", ());

	v.expect([]);
}

#[test]
fn once_can_be_resubscribed_from_within() {
	let v = Validator::new();
	let hub = Rc::new(SignalHub::<()>::new());

	let slot = Rc::new(Cell::new(None::<Receiver<()>>));
	let again = Receiver::<()>::new({
		let hub = Rc::downgrade(&hub);
		let slot = Rc::clone(&slot);
		let v = Rc::clone(&v);
		move |()| {
			v.push("again");
			if let (Some(hub), Some(this)) = (hub.upgrade(), slot.take()) {
				hub.once("pop", &this);
			}
		}
	});
	slot.set(Some(again.clone()));

	hub.once("pop", &again);
	hub.emit("pop", ()).emit("pop", ()).emit("pop", ());

	// Resubscribed during the first emission, reached by the second, which doesn't resubscribe.
	v.expect(["again", "again"]);
	assert!(hub.is_empty());
}
