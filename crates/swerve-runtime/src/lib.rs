//! `swerve-runtime` – the reactive loop engine.
//!
//! Where the (very small amount of) deciding happens: each sensor sweep is
//! reduced to the shared obstacle flag, and on every timer tick the fixed
//! motion policy turns that flag into a velocity command.
//!
//! # Modules
//!
//! - [`control_loop`] – [`ControlLoop`][control_loop::ControlLoop]:
//!   owns the detector, the flag, the policy, and the event bus; spawns the
//!   sampler and ticker tasks behind a plain start/stop
//!   [`ControlHandle`][control_loop::ControlHandle].
//! - [`policy`] – [`MotionPolicy`][policy::MotionPolicy]:
//!   the pure two-row mapping from the obstacle flag to one of two fixed
//!   velocity commands.
//! - [`adapter`] – [`SensorAdapter`][adapter::SensorAdapter] and
//!   [`DriveAdapter`][adapter::DriveAdapter]:
//!   bridge [`swerve_hal`] drivers onto the event bus so the loop itself
//!   never touches hardware.
//! - [`telemetry`] – [`init_tracing`][telemetry::init_tracing]:
//!   initialises the global `tracing` subscriber with an optional OTLP span
//!   exporter.  Set `OTEL_EXPORTER_OTLP_ENDPOINT` to enable live trace
//!   export to an OTLP-compatible collector.

pub mod adapter;
pub mod control_loop;
pub mod policy;
pub mod telemetry;

pub use adapter::{DriveAdapter, SensorAdapter};
pub use control_loop::{ControlHandle, ControlLoop, ControlLoopConfig};
pub use policy::MotionPolicy;
pub use telemetry::{TracerProviderGuard, init_tracing};
