//! Marquee ticker engine: duplicate, measure, schedule, gate, reconcile.

pub(crate) mod backend;
pub(crate) mod config;
pub(crate) mod descriptor;
pub(crate) mod duplicate;
pub(crate) mod engine;
pub(crate) mod gate;
pub(crate) mod keyframes;
pub(crate) mod measure;
pub(crate) mod stylesheet;
pub(crate) mod tween;
