//! Bus ↔ hardware adapters.
//!
//! The control loop never speaks to a sensor or a drive base directly; it
//! publishes to and subscribes from the internal
//! [`EventBus`][swerve_middleware::EventBus].  The adapters here translate
//! between the bus and the [`swerve_hal`] trait seams:
//!
//! - [`SensorAdapter`] – polls a [`RangeSensor`] at a fixed period and
//!   publishes each sweep on [`Topic::Scans`].
//! - [`DriveAdapter`] – drains [`Topic::DriveCommands`] into a
//!   [`DriveActuator`], fire-and-forget.
//!
//! Both run as spawned tasks and terminate on the shared shutdown signal
//! handed out by [`ControlHandle::shutdown_signal`][crate::control_loop::ControlHandle::shutdown_signal].

use std::time::Duration;

use swerve_hal::{DriveActuator, RangeSensor};
use swerve_middleware::{EventBus, Topic};
use swerve_types::{Event, EventPayload};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

// ────────────────────────────────────────────────────────────────────────────
// Sensor side
// ────────────────────────────────────────────────────────────────────────────

/// Pumps sweeps from a [`RangeSensor`] onto the bus.
///
/// The delivery rate toward the loop is whatever `period` the adapter is
/// given; the loop itself makes no assumption about it.
pub struct SensorAdapter {
    sensor: Box<dyn RangeSensor>,
    bus: EventBus,
    period: Duration,
}

impl SensorAdapter {
    pub fn new(sensor: Box<dyn RangeSensor>, bus: EventBus, period: Duration) -> Self {
        Self { sensor, bus, period }
    }

    /// Spawn the pump task.  A failing sweep logs a warning and publishes a
    /// [`EventPayload::Fault`]; the pump keeps polling.
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        let Self {
            mut sensor,
            bus,
            period,
        } = self;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                tokio::select! {
                    _ = shutdown.changed() => break,
                    _ = interval.tick() => {
                        match sensor.scan() {
                            Ok(scan) => {
                                bus.publish_to(
                                    Topic::Scans,
                                    Event::now(
                                        "swerve-runtime::sensor_adapter",
                                        EventPayload::Scan(scan),
                                    ),
                                );
                            }
                            Err(e) => {
                                warn!(sensor = sensor.id(), error = %e, "sweep failed");
                                bus.publish_to(
                                    Topic::SystemAlerts,
                                    Event::now(
                                        "swerve-runtime::sensor_adapter",
                                        EventPayload::Fault {
                                            component: sensor.id().to_string(),
                                            message: e.to_string(),
                                        },
                                    ),
                                );
                            }
                        }
                    }
                }
            }
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Actuation side
// ────────────────────────────────────────────────────────────────────────────

/// Drains drive commands from the bus into a [`DriveActuator`].
///
/// Delivery is fire-and-forget: an actuator failure is logged and the
/// command is dropped; nothing is retried and no acknowledgment flows back
/// to the policy.
pub struct DriveAdapter {
    actuator: Box<dyn DriveActuator>,
    bus: EventBus,
}

impl DriveAdapter {
    pub fn new(actuator: Box<dyn DriveActuator>, bus: EventBus) -> Self {
        Self { actuator, bus }
    }

    /// Spawn the sink task.
    ///
    /// The subscription is taken before the task starts, so commands
    /// published after `spawn` returns are never missed.
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        let Self { mut actuator, bus } = self;
        let mut commands = bus.subscribe_to(Topic::DriveCommands);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown.changed() => break,
                    next = commands.recv_lossy() => match next {
                        Some(event) => {
                            if let EventPayload::Drive(command) = event.payload {
                                if let Err(e) = actuator.apply(&command) {
                                    warn!(actuator = actuator.id(), error = %e, "drive command not applied");
                                }
                            }
                        }
                        None => break,
                    },
                }
            }
        })
    }
}
