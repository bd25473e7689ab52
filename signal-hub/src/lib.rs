#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![warn(unreachable_pub)]
#![doc = include_str!("../README.md")]
//!
//! # Threading Notes
//!
//! Everything here is `!Send` and `!Sync`. Dispatch happens synchronously on the emitting thread.

mod hub;
mod mixin;
mod receiver;
mod relay;
mod signaling;

pub use hub::SignalHub;
pub use mixin::Mixin;
pub use receiver::Receiver;
pub use signaling::Signaling;

#[doc = include_str!("../README.md")]
mod readme {}
