#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque, fmt::Debug, rc::Rc};

use signal_hub::Receiver;

pub struct Validator<T>(RefCell<VecDeque<T>>);

impl<T> Validator<T> {
	pub fn new() -> Rc<Self> {
		Rc::new(Self(RefCell::new(VecDeque::new())))
	}

	pub fn push(&self, value: T) {
		self.0.borrow_mut().push_back(value);
	}

	#[track_caller]
	pub fn expect(&self, expected: impl IntoIterator<Item = T>)
	where
		T: Debug + Eq,
	{
		let mut binding = self.0.borrow_mut();
		let mut a = binding.drain(..);
		let mut b = expected.into_iter();
		loop {
			match (a.next(), b.next()) {
				(None, None) => break,
				(a, b) => assert_eq!(a, b),
			}
		}
	}
}

/// A new receiver that records `value` on each call, ignoring its arguments.
pub fn recorder<A: ?Sized + 'static, T: 'static + Clone>(v: &Rc<Validator<T>>, value: T) -> Receiver<A> {
	let v = Rc::clone(v);
	Receiver::new(move |_: &A| v.push(value.clone()))
}
