//! `swerve-middleware` – message plumbing.
//!
//! The control loop never talks to a sensor or an actuator directly; it
//! publishes to and subscribes from the internal [`EventBus`][bus::EventBus].
//! Adapters at the edges translate between the bus and whatever transport
//! the hardware actually speaks.
//!
//! # Modules
//!
//! - [`bus`] – topic-partitioned publish/subscribe event bus built on Tokio
//!   broadcast channels.

pub mod bus;

pub use bus::{EventBus, Topic, TopicReceiver};
