//! [`ControlLoop`] – the reactive avoid/cruise cycle.
//!
//! Two independent trigger sources drive the loop:
//!
//! 1. **Sample** – each [`EventPayload::Scan`] arriving on
//!    [`Topic::Scans`] is reduced by the
//!    [`ObstacleDetector`] and stored into the shared [`ObstacleFlag`].
//! 2. **Tick** – every `tick_period` the [`MotionPolicy`] reads the flag and
//!    publishes exactly one [`DriveCommand`] on [`Topic::DriveCommands`].
//!
//! Sampling and ticking are explicit tokio tasks; the flag is the only
//! shared mutable state between them, and no relative ordering of the two
//! triggers is assumed.
//!
//! An empty sweep is rejected with [`SwerveError::EmptyScan`]: the flag
//! keeps its previous value, a [`EventPayload::Fault`] is published on
//! [`Topic::SystemAlerts`], and the sampler keeps consuming.  Nothing else
//! is retried or recovered.
//!
//! # Example
//!
//! ```rust,no_run
//! use swerve_runtime::control_loop::{ControlLoop, ControlLoopConfig};
//!
//! # async fn run() {
//! let control = ControlLoop::new(ControlLoopConfig::default());
//! let handle = control.start();
//! // ... feed scans onto the bus; commands appear on Topic::DriveCommands.
//! handle.shutdown().await;
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use swerve_middleware::{EventBus, Topic};
use swerve_perception::{ObstacleDetector, ObstacleFlag, ScanSummary};
use swerve_types::{DriveCommand, Event, EventPayload, RangeScan, SwerveError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::policy::MotionPolicy;

/// Event source tag used by the loop's own publications.
const SOURCE: &str = "swerve-runtime::control_loop";

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration bundle for [`ControlLoop`].
///
/// Defaults: 0.5 m obstacle threshold, 0.5 m/s cruise, 0.5 rad/s avoidance
/// turn, 500 ms tick.  Overrides are a deploy-time choice; nothing here is
/// reconfigurable while the loop runs.
#[derive(Debug, Clone)]
pub struct ControlLoopConfig {
    /// Distance below which a reading counts as an obstacle (meters).
    pub obstacle_threshold_m: f32,
    /// Forward speed when the path is clear (m/s).
    pub cruise_linear_mps: f32,
    /// Rotation rate while avoiding (rad/s).
    pub avoid_angular_radps: f32,
    /// Cadence of the policy ticker.
    pub tick_period: Duration,
    /// Capacity of every bus topic channel.
    pub bus_capacity: usize,
}

impl Default for ControlLoopConfig {
    fn default() -> Self {
        Self {
            obstacle_threshold_m: swerve_perception::DEFAULT_OBSTACLE_THRESHOLD_M,
            cruise_linear_mps: crate::policy::DEFAULT_CRUISE_LINEAR_MPS,
            avoid_angular_radps: crate::policy::DEFAULT_AVOID_ANGULAR_RADPS,
            tick_period: Duration::from_millis(500),
            bus_capacity: 256,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ControlLoop
// ─────────────────────────────────────────────────────────────────────────────

/// The avoid/cruise orchestrator.
///
/// Owns the detector, the policy, the shared flag, and the event bus.
/// [`handle_scan`][Self::handle_scan] and [`tick`][Self::tick] are public so
/// tests can drive one step at a time; [`start`][Self::start] wires the same
/// two methods to their live trigger sources.
pub struct ControlLoop {
    detector: ObstacleDetector,
    policy: MotionPolicy,
    flag: ObstacleFlag,
    bus: EventBus,
    tick_period: Duration,
}

impl ControlLoop {
    /// Construct a loop from the supplied configuration, creating a fresh
    /// event bus sized to `config.bus_capacity`.
    pub fn new(config: ControlLoopConfig) -> Self {
        Self {
            detector: ObstacleDetector::new(config.obstacle_threshold_m),
            policy: MotionPolicy::new(config.cruise_linear_mps, config.avoid_angular_radps),
            flag: ObstacleFlag::new(),
            bus: EventBus::new(config.bus_capacity),
            tick_period: config.tick_period,
        }
    }

    /// Return a clone of the [`EventBus`] so adapters and tests can attach.
    pub fn bus(&self) -> EventBus {
        self.bus.clone()
    }

    /// Return a handle to the shared obstacle flag.
    pub fn obstacle_flag(&self) -> ObstacleFlag {
        self.flag.clone()
    }

    /// Sampler step: reduce one sweep and overwrite the obstacle flag.
    ///
    /// # Errors
    ///
    /// Returns [`SwerveError::EmptyScan`] for a sweep with no readings.  The
    /// flag is left unchanged and a [`EventPayload::Fault`] is published on
    /// [`Topic::SystemAlerts`]; the error is fatal to this sweep only.
    pub fn handle_scan(&self, scan: &RangeScan) -> Result<ScanSummary, SwerveError> {
        let summary = match self.detector.evaluate(&scan.ranges) {
            Ok(summary) => summary,
            Err(e) => {
                self.bus.publish_to(
                    Topic::SystemAlerts,
                    Event::now(
                        SOURCE,
                        EventPayload::Fault {
                            component: "perception_sampler".to_string(),
                            message: e.to_string(),
                        },
                    ),
                );
                return Err(e);
            }
        };
        self.flag.set(summary.obstacle);
        info!(
            min_distance_m = summary.min_distance_m,
            "minimum obstacle distance: {:.2} m", summary.min_distance_m
        );
        Ok(summary)
    }

    /// Policy step: read the flag at this instant, decide, publish.
    ///
    /// The published command is also returned so callers can assert on it.
    pub fn tick(&self) -> DriveCommand {
        let blocked = self.flag.get();
        let command = self.policy.decide(blocked);
        if blocked {
            info!("obstacle detected; rotating");
        } else {
            info!("moving forward");
        }
        self.bus
            .publish_to(Topic::DriveCommands, Event::now(SOURCE, EventPayload::Drive(command)));
        command
    }

    /// Spawn the sampler and ticker tasks and hand back the stop handle.
    pub fn start(self) -> ControlHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let shared = Arc::new(self);

        let sampler = {
            let loop_ref = Arc::clone(&shared);
            let mut shutdown = shutdown_rx.clone();
            let mut scans = loop_ref.bus.subscribe_to(Topic::Scans);
            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = shutdown.changed() => break,
                        next = scans.recv_lossy() => match next {
                            Some(event) => {
                                if let EventPayload::Scan(scan) = event.payload {
                                    if let Err(e) = loop_ref.handle_scan(&scan) {
                                        warn!(error = %e, "dropping sweep");
                                    }
                                }
                            }
                            None => break,
                        },
                    }
                }
            })
        };

        let ticker = {
            let loop_ref = Arc::clone(&shared);
            let mut shutdown = shutdown_rx;
            tokio::spawn(async move {
                // First command fires one full period after start; missed
                // ticks are skipped, not burst-replayed.
                let mut interval = tokio::time::interval_at(
                    Instant::now() + loop_ref.tick_period,
                    loop_ref.tick_period,
                );
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                loop {
                    tokio::select! {
                        _ = shutdown.changed() => break,
                        _ = interval.tick() => {
                            loop_ref.tick();
                        }
                    }
                }
            })
        };

        ControlHandle {
            shutdown: shutdown_tx,
            tasks: vec![sampler, ticker],
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ControlHandle
// ─────────────────────────────────────────────────────────────────────────────

/// Stop handle for a started [`ControlLoop`].
///
/// Dispatch stops and every attached task is joined when
/// [`shutdown`][Self::shutdown] is awaited; resources (bus receivers, HAL
/// drivers boxed into adapters) are released on every exit path.
pub struct ControlHandle {
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl ControlHandle {
    /// Subscribe to the shutdown signal so auxiliary tasks (adapters) stop
    /// together with the loop.
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    /// Attach an auxiliary task to be joined on shutdown.
    pub fn attach(&mut self, task: JoinHandle<()>) {
        self.tasks.push(task);
    }

    /// Stop accepting new triggers and join every task.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        for task in self.tasks {
            let _ = task.await;
        }
        info!("control loop stopped");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    const RECV_TIMEOUT: Duration = Duration::from_secs(2);

    fn default_loop() -> ControlLoop {
        ControlLoop::new(ControlLoopConfig::default())
    }

    fn scan_event(ranges: Vec<f32>) -> Event {
        Event::now("test::sensor", EventPayload::Scan(RangeScan::new(ranges)))
    }

    #[test]
    fn handle_scan_sets_flag_on_close_reading() {
        let control = default_loop();
        let flag = control.obstacle_flag();

        let summary = control.handle_scan(&RangeScan::new(vec![1.2, 0.9, 0.3])).unwrap();
        assert!(summary.obstacle);
        assert!(flag.get());
    }

    #[test]
    fn handle_scan_clears_flag_on_distant_readings() {
        let control = default_loop();
        let flag = control.obstacle_flag();
        flag.set(true);

        let summary = control.handle_scan(&RangeScan::new(vec![2.0, 1.5])).unwrap();
        assert!(!summary.obstacle);
        assert!(!flag.get());
    }

    #[test]
    fn empty_sweep_leaves_flag_unchanged_and_raises_fault() {
        let control = default_loop();
        let flag = control.obstacle_flag();
        let mut alerts = control.bus().subscribe_to(Topic::SystemAlerts);

        control.handle_scan(&RangeScan::new(vec![0.1])).unwrap();
        assert!(flag.get());

        let result = control.handle_scan(&RangeScan::new(vec![]));
        assert!(matches!(result, Err(SwerveError::EmptyScan)));
        // The flag still reflects the last valid sweep.
        assert!(flag.get());

        let alert = alerts.try_recv().expect("fault event should be published");
        match alert.payload {
            EventPayload::Fault { component, message } => {
                assert_eq!(component, "perception_sampler");
                assert!(message.contains("no range readings"));
            }
            _ => panic!("expected Fault payload"),
        }
    }

    #[test]
    fn tick_publishes_the_decided_command() {
        let control = default_loop();
        let mut commands = control.bus().subscribe_to(Topic::DriveCommands);

        let command = control.tick();
        assert_eq!(command, DriveCommand::new(0.5, 0.0));

        let event = commands.try_recv().expect("command event should be published");
        match event.payload {
            EventPayload::Drive(published) => assert_eq!(published, command),
            _ => panic!("expected Drive payload"),
        }
    }

    #[test]
    fn tick_with_no_subscribers_still_returns_the_command() {
        let control = default_loop();
        assert_eq!(control.tick(), DriveCommand::new(0.5, 0.0));
    }

    /// The end-to-end ordering property: reading [0.4], tick, reading
    /// [1.0, 0.8], tick must emit exactly [(0.0, 0.5), (0.5, 0.0)].
    #[test]
    fn scan_tick_interleaving_emits_exact_command_sequence() {
        let control = default_loop();
        let mut commands = control.bus().subscribe_to(Topic::DriveCommands);

        control.handle_scan(&RangeScan::new(vec![0.4])).unwrap();
        control.tick();
        control.handle_scan(&RangeScan::new(vec![1.0, 0.8])).unwrap();
        control.tick();

        let mut observed = Vec::new();
        while let Ok(event) = commands.try_recv() {
            if let EventPayload::Drive(command) = event.payload {
                observed.push(command);
            }
        }
        assert_eq!(
            observed,
            vec![DriveCommand::new(0.0, 0.5), DriveCommand::new(0.5, 0.0)]
        );
    }

    #[tokio::test]
    async fn started_loop_samples_scans_from_the_bus() {
        let control = default_loop();
        let bus = control.bus();
        let flag = control.obstacle_flag();
        let handle = control.start();

        bus.publish_to(Topic::Scans, scan_event(vec![0.2]));

        // Wait for the sampler task to pick the sweep up.
        let deadline = Instant::now() + RECV_TIMEOUT;
        while !flag.get() {
            assert!(Instant::now() < deadline, "sampler never set the flag");
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn started_loop_emits_commands_at_the_tick_cadence() {
        let control = ControlLoop::new(ControlLoopConfig {
            tick_period: Duration::from_millis(10),
            ..ControlLoopConfig::default()
        });
        let bus = control.bus();
        let mut commands = bus.subscribe_to(Topic::DriveCommands);
        let handle = control.start();

        bus.publish_to(Topic::Scans, scan_event(vec![0.2]));

        // Scan delivery and tick cadence race; within a couple of ticks the
        // avoidance command must show up.
        let deadline = Instant::now() + RECV_TIMEOUT;
        loop {
            assert!(Instant::now() < deadline, "no avoidance command observed");
            let event = timeout(RECV_TIMEOUT, commands.recv_lossy())
                .await
                .expect("ticker stopped publishing")
                .expect("bus closed unexpectedly");
            if let EventPayload::Drive(command) = event.payload {
                if command == DriveCommand::new(0.0, 0.5) {
                    break;
                }
            }
        }

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_joins_all_tasks_and_stops_dispatch() {
        let control = ControlLoop::new(ControlLoopConfig {
            tick_period: Duration::from_millis(10),
            ..ControlLoopConfig::default()
        });
        let bus = control.bus();
        let mut commands = bus.subscribe_to(Topic::DriveCommands);
        let handle = control.start();

        timeout(RECV_TIMEOUT, handle.shutdown())
            .await
            .expect("shutdown should join all tasks promptly");

        // With both tasks joined nothing can publish any more: drain what
        // was buffered, then the channel must stay empty.
        while commands.try_recv().is_ok() {}
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(commands.try_recv().is_err());
    }

    #[tokio::test]
    async fn attached_tasks_are_joined_on_shutdown() {
        let control = default_loop();
        let mut handle = control.start();
        let mut signal = handle.shutdown_signal();

        handle.attach(tokio::spawn(async move {
            let _ = signal.changed().await;
        }));

        timeout(RECV_TIMEOUT, handle.shutdown())
            .await
            .expect("attached task should stop with the loop");
    }
}
