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

//! Headless sandbox: a timed bomb built from a process chain, driven by the
//! game loop until the chain has run out.
//!
//! Usage: `sandbox [config.json]`

use anyhow::Context;
use crossbeam_channel::Sender;
use std::thread;
use std::time::Duration;
use tempo_core::process::builtin::{once, Callback, Delay};
use tempo_core::{
    Game, HeadlessPlatform, Platform, PlatformError, PlatformEvent, ProcessHandle, ProcessNode,
    ProcessScheduler, Stopwatch, SurfaceConfig, Tick,
};
use tempo_runtime::{GameLoop, LoopConfig};
use tempo_telemetry::logging;

const FUSE: Duration = Duration::from_secs(3);

/// Refresh rate the headless display pretends to have.
const REFRESH_RATE: u32 = 60;

/// A headless platform whose `present` blocks until the next refresh, the way
/// a vsynced swap would. Keeps the sandbox from spinning a core.
struct PacedPlatform {
    inner: HeadlessPlatform,
    frame: Duration,
    since_present: Stopwatch,
}

impl PacedPlatform {
    fn new(inner: HeadlessPlatform, refresh_rate: u32) -> Self {
        Self {
            inner,
            frame: Duration::from_secs(1) / refresh_rate.max(1),
            since_present: Stopwatch::new(),
        }
    }
}

impl Platform for PacedPlatform {
    fn create_surface(&mut self, config: &SurfaceConfig) -> Result<(), PlatformError> {
        self.inner.create_surface(config)
    }

    fn should_close(&self) -> bool {
        self.inner.should_close()
    }

    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        self.inner.poll_events()
    }

    fn present(&mut self) {
        let elapsed = self.since_present.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
        self.since_present.restart();
        self.inner.present();
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.inner.set_vsync(enabled);
    }

    fn release(&mut self) {
        self.inner.release();
    }
}

struct BombGame {
    scheduler: ProcessScheduler,
    events: Sender<PlatformEvent>,
    close_sent: bool,
}

impl BombGame {
    fn new(events: Sender<PlatformEvent>) -> Self {
        Self {
            scheduler: ProcessScheduler::new(),
            events,
            close_sent: false,
        }
    }

    fn bomb() -> ProcessNode {
        let mut ticks = 0u32;
        let fuse = Callback::new(move |delta: f32, handle: &ProcessHandle| {
            ticks += 1;
            let burnt = ticks as f32 * delta;
            if ticks % 60 == 0 {
                log::info!("Fuse burning, {:.1}s left.", FUSE.as_secs_f32() - burnt);
            }
            if burnt >= FUSE.as_secs_f32() {
                handle.succeed();
            }
        });

        ProcessNode::new(Delay::new(Duration::from_millis(500)))
            .then(ProcessNode::new(once(|| log::info!("Fuse lit."))))
            .then(ProcessNode::new(fuse))
            .then(ProcessNode::new(once(|| log::warn!("BOOM!"))))
            .then(ProcessNode::new(once(|| log::info!("Debris cleared."))))
    }
}

impl Game for BombGame {
    fn initialize(&mut self) {
        let bomb = Self::bomb();
        log::info!("Arming a chain of {} processes.", bomb.chain_len());
        if let Err(e) = self.scheduler.add_process(bomb) {
            log::error!("Could not arm the bomb: {}", e);
        }
    }

    fn update(&mut self, tick: &Tick) {
        self.scheduler.update(tick.delta);
        if self.scheduler.is_empty() && !self.close_sent {
            log::info!("Chain finished after {} ticks.", tick.index + 1);
            self.close_sent = self.events.send(PlatformEvent::CloseRequested).is_ok();
        }
    }

    fn render(&mut self, _interpolant: f32) {}

    fn on_exiting(&mut self) {
        self.scheduler.abort_all();
    }

    fn on_running_slowly(&mut self) {
        log::warn!("Sandbox is running slowly.");
    }
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let config = match std::env::args().nth(1) {
        Some(path) => LoopConfig::load(&path)
            .with_context(|| format!("loading loop configuration from {path}"))?,
        None => LoopConfig {
            name: "sandbox".to_string(),
            ..LoopConfig::default()
        },
    };

    let headless = HeadlessPlatform::new();
    let game = BombGame::new(headless.event_sender());
    let platform = PacedPlatform::new(headless, REFRESH_RATE);
    let game_loop = GameLoop::new(config, game, platform);

    game_loop.start().context("starting the game loop")?;
    game_loop.join();

    let outcome = game_loop.into_outcome()?;
    log::info!(
        "Sandbox done: {} iterations, {} updates, {} draws, {} presents.",
        outcome.stats.iterations,
        outcome.stats.updates,
        outcome.stats.draws,
        outcome.platform.inner.presents()
    );
    Ok(())
}
