// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The threaded game loop.

use crate::config::LoopConfig;
use crate::error::LoopError;
use crate::settings::LoopSettings;
use crate::timestep::{DrawPolicy, FixedTimestep, FrameOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tempo_core::{Clock, Game, Platform, PlatformEvent, Stopwatch, SurfaceConfig, SystemClock};
use tempo_telemetry::RateMonitor;

/// Totals accumulated over one run of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopStats {
    /// Loop iterations executed.
    pub iterations: u64,
    /// Simulation updates performed.
    pub updates: u64,
    /// Frames rendered.
    pub draws: u64,
    /// Iterations that reported running slowly.
    pub slow_iterations: u64,
}

impl LoopStats {
    fn record(&mut self, outcome: &FrameOutcome) {
        self.iterations += 1;
        self.updates += u64::from(outcome.updates);
        self.draws += u64::from(outcome.rendered);
        self.slow_iterations += u64::from(outcome.running_slowly);
    }
}

/// The game and platform handed back once the worker exits.
#[derive(Debug)]
pub struct LoopOutcome<G, P> {
    /// The game, after its exit hook ran.
    pub game: G,
    /// The platform, after it was released.
    pub platform: P,
    /// Run totals.
    pub stats: LoopStats,
}

type WorkerResult<G, P> = Result<LoopOutcome<G, P>, LoopError>;

enum Lifecycle<G, P, C> {
    Ready(Worker<G, P, C>),
    Running(JoinHandle<WorkerResult<G, P>>),
    /// A caller took the join handle and is waiting on the worker outside the lock.
    Joining,
    Finished(Option<WorkerResult<G, P>>),
}

/// A fixed-timestep loop running a [`Game`] on a dedicated thread.
///
/// The loop is single-use: once stopped, it cannot be started again.
///
/// # Example
///
/// ```no_run
/// use tempo_core::{Game, HeadlessPlatform, Tick};
/// use tempo_runtime::{GameLoop, LoopConfig};
///
/// struct Spinner;
///
/// impl Game for Spinner {
///     fn initialize(&mut self) {}
///     fn update(&mut self, _tick: &Tick) {}
///     fn render(&mut self, _interpolant: f32) {}
/// }
///
/// let game_loop = GameLoop::new(LoopConfig::default(), Spinner, HeadlessPlatform::new());
/// game_loop.start().unwrap();
/// std::thread::sleep(std::time::Duration::from_millis(100));
/// game_loop.stop();
/// ```
pub struct GameLoop<G: Game, P: Platform, C: Clock = SystemClock> {
    name: String,
    update_interval: Duration,
    settings: Arc<LoopSettings>,
    running: Arc<AtomicBool>,
    lifecycle: Mutex<Lifecycle<G, P, C>>,
    joined: Condvar,
}

impl<G: Game, P: Platform> GameLoop<G, P, SystemClock> {
    /// Creates a loop measuring wall-clock time.
    pub fn new(config: LoopConfig, game: G, platform: P) -> Self {
        Self::with_clock(config, game, platform, SystemClock::new())
    }
}

impl<G: Game, P: Platform, C: Clock> GameLoop<G, P, C> {
    /// Creates a loop measuring time with `clock`.
    pub fn with_clock(config: LoopConfig, game: G, platform: P, clock: C) -> Self {
        let update_rate = config.effective_update_rate();
        let settings = Arc::new(LoopSettings::new(
            config.effective_max_draw_rate(),
            config.vsync,
        ));
        let running = Arc::new(AtomicBool::new(false));

        let worker = Worker {
            name: config.name.clone(),
            game,
            platform,
            clock,
            surface: config.surface.clone(),
            update_rate,
            report_interval: config.report_interval(),
            settings: Arc::clone(&settings),
            running: Arc::clone(&running),
        };

        Self {
            name: config.name,
            update_interval: Duration::from_secs(1) / update_rate,
            settings,
            running,
            lifecycle: Mutex::new(Lifecycle::Ready(worker)),
            joined: Condvar::new(),
        }
    }

    /// Launches the worker thread.
    ///
    /// Does nothing if the loop is already running or has already run.
    pub fn start(&self) -> Result<(), LoopError> {
        let mut lifecycle = self.lock_lifecycle();
        let worker = match std::mem::replace(&mut *lifecycle, Lifecycle::Finished(None)) {
            Lifecycle::Ready(worker) => worker,
            other => {
                *lifecycle = other;
                log::debug!("Loop '{}' already started, ignoring start()", self.name);
                return Ok(());
            }
        };

        self.running.store(true, Ordering::SeqCst);
        let spawned = thread::Builder::new()
            .name(self.name.clone())
            .spawn(move || worker.run());

        match spawned {
            Ok(handle) => {
                log::info!("Loop '{}' started.", self.name);
                *lifecycle = Lifecycle::Running(handle);
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                Err(LoopError::Spawn(e))
            }
        }
    }

    /// Stops the loop and blocks until the worker thread has exited.
    ///
    /// The current iteration always completes. Calling `stop` again, or on a
    /// loop that never started, returns immediately. Safe to call while another
    /// thread is blocked in [`join`](Self::join).
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.join_worker(true);
    }

    /// Blocks until the worker exits on its own, i.e. the platform requested a
    /// close, or until another thread calls [`stop`](Self::stop).
    pub fn join(&self) {
        self.join_worker(false);
    }

    /// Stops the loop if needed and hands back the game and platform.
    pub fn into_outcome(mut self) -> Result<LoopOutcome<G, P>, LoopError> {
        self.stop();
        let lifecycle = self
            .lifecycle
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        match std::mem::replace(lifecycle, Lifecycle::Finished(None)) {
            Lifecycle::Finished(Some(result)) => result,
            Lifecycle::Finished(None) => Err(LoopError::WorkerPanicked(self.name.clone())),
            Lifecycle::Ready(_) | Lifecycle::Running(_) | Lifecycle::Joining => {
                Err(LoopError::NotStarted)
            }
        }
    }

    /// Caps rendering at `rate` frames per second while vsync is off.
    /// 0 removes the cap.
    pub fn set_max_draw_rate(&self, rate: u32) {
        log::debug!("Loop '{}': max draw rate set to {}", self.name, rate);
        self.settings.set_max_draw_rate(rate);
    }

    /// Turns vsync on or off. Applied to the platform at the next iteration.
    pub fn set_vsync(&self, enabled: bool) {
        log::debug!("Loop '{}': vsync set to {}", self.name, enabled);
        self.settings.set_vsync(enabled);
    }

    /// Whether the worker is executing loop iterations.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// The fixed simulation step.
    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// The settings shared with the worker.
    pub fn settings(&self) -> &LoopSettings {
        &self.settings
    }

    fn lock_lifecycle(&self) -> MutexGuard<'_, Lifecycle<G, P, C>> {
        self.lifecycle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Joins the worker thread without holding the lifecycle lock while
    /// waiting, so `stop` stays reachable from other threads. Concurrent
    /// joiners park on `joined` until the first one stores the result.
    fn join_worker(&self, stopping: bool) {
        let mut lifecycle = self.lock_lifecycle();
        let handle = loop {
            match std::mem::replace(&mut *lifecycle, Lifecycle::Joining) {
                Lifecycle::Running(handle) => break handle,
                Lifecycle::Joining => {
                    if stopping {
                        self.running.store(false, Ordering::SeqCst);
                    }
                    lifecycle = self
                        .joined
                        .wait(lifecycle)
                        .unwrap_or_else(PoisonError::into_inner);
                }
                other => {
                    *lifecycle = other;
                    return;
                }
            }
        };
        if stopping {
            // `start` may have raised the flag after the unlocked store above.
            self.running.store(false, Ordering::SeqCst);
        }
        drop(lifecycle);

        let finished = match handle.join() {
            Ok(result) => {
                if let Err(e) = &result {
                    log::error!("Loop '{}' ended with an error: {}", self.name, e);
                }
                Some(result)
            }
            Err(_) => {
                // The loop counts as stopped either way.
                log::error!("Loop '{}' thread panicked while joining.", self.name);
                self.running.store(false, Ordering::SeqCst);
                None
            }
        };

        *self.lock_lifecycle() = Lifecycle::Finished(finished);
        self.joined.notify_all();
    }
}

impl<G: Game, P: Platform, C: Clock> Drop for GameLoop<G, P, C> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Everything the worker thread owns.
struct Worker<G, P, C> {
    name: String,
    game: G,
    platform: P,
    clock: C,
    surface: SurfaceConfig,
    update_rate: u32,
    report_interval: Duration,
    settings: Arc<LoopSettings>,
    running: Arc<AtomicBool>,
}

impl<G: Game, P: Platform, C: Clock> Worker<G, P, C> {
    fn run(self) -> WorkerResult<G, P> {
        let Worker {
            name,
            mut game,
            mut platform,
            clock,
            surface,
            update_rate,
            report_interval,
            settings,
            running,
        } = self;

        if let Err(e) = platform.create_surface(&surface) {
            log::error!("Loop '{}' could not create its surface: {}", name, e);
            running.store(false, Ordering::SeqCst);
            return Err(e.into());
        }

        let mut applied_vsync = settings.vsync();
        platform.set_vsync(applied_vsync);

        game.initialize();
        log::info!(
            "Loop '{}' initialized at {} updates per second.",
            name,
            update_rate
        );

        let mut timestep = FixedTimestep::new(update_rate);
        let mut monitor = RateMonitor::new(report_interval);
        let mut stats = LoopStats::default();
        let mut stopwatch = Stopwatch::with_clock(clock);

        while running.load(Ordering::SeqCst) && !platform.should_close() {
            let vsync = settings.vsync();
            if vsync != applied_vsync {
                platform.set_vsync(vsync);
                applied_vsync = vsync;
            }
            let policy = DrawPolicy {
                vsync,
                max_draw_rate: settings.max_draw_rate(),
            };

            let frame_time = stopwatch.lap();
            let outcome = timestep.advance(frame_time, policy, &mut game);
            stats.record(&outcome);
            monitor.record(outcome.updates, outcome.rendered);

            platform.present();
            for event in platform.poll_events() {
                match event {
                    PlatformEvent::Focus(true) => game.on_activated(),
                    PlatformEvent::Focus(false) => game.on_deactivated(),
                    PlatformEvent::CloseRequested => {
                        log::info!("Loop '{}': close requested.", name);
                    }
                }
            }

            if let Some(report) = monitor.tick(frame_time) {
                log::info!("[{}] {}", name, report);
            }
        }

        running.store(false, Ordering::SeqCst);
        game.on_exiting();
        platform.release();

        log::info!(
            "Loop '{}' stopped after {:.2}s ({} updates, {} draws).",
            name,
            stopwatch.elapsed_secs_f64(),
            stats.updates,
            stats.draws
        );

        Ok(LoopOutcome {
            game,
            platform,
            stats,
        })
    }
}
