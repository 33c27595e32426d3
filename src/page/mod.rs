//! Page runtime: virtual clock, timers, window events, CSS animations, and intersection observers.

pub(crate) mod animation;
pub(crate) mod events;
pub(crate) mod host;
pub(crate) mod observer;
pub(crate) mod timers;
