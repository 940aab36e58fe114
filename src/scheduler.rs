//! Real-time fixed-timestep driver
//!
//! Converts wall-clock time into whole simulation ticks at a constant rate,
//! independent of how often the presenter reads the state. The presenter and
//! the input source talk to the simulation thread only through `SharedIo`.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::consts::TICKS_PER_SECOND;
use crate::settings::RunnerSettings;
use crate::sim::{Input, RenderState, Simulation};

/// Pause between loop iterations so an idle loop doesn't spin a core
const IDLE_SLEEP: Duration = Duration::from_millis(1);

/// Accumulator of elapsed time, measured in ticks
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    ticks_per_second: f64,
    /// Fractional ticks carried into the next iteration
    accumulator: f64,
    /// 0 = never drop time
    max_catch_up: u32,
    /// Whole ticks discarded by the cap so far
    dropped_ticks: u64,
}

impl FixedTimestep {
    pub fn new(ticks_per_second: f64, max_catch_up: u32) -> Self {
        Self {
            ticks_per_second,
            accumulator: 0.0,
            max_catch_up,
            dropped_ticks: 0,
        }
    }

    /// Length of one tick
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.ticks_per_second)
    }

    /// Add elapsed time and return how many ticks are due now
    ///
    /// When a stall leaves more than `max_catch_up` ticks due, only the cap is
    /// run and the surplus whole ticks are discarded; the fractional part is
    /// always carried.
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.as_secs_f64() * self.ticks_per_second;

        let due = self.accumulator.floor().min(u32::MAX as f64) as u32;
        let run = if self.max_catch_up > 0 && due > self.max_catch_up {
            let dropped = due - self.max_catch_up;
            self.dropped_ticks += dropped as u64;
            self.accumulator -= dropped as f64;
            log::warn!(
                "Simulation fell behind by {} ticks, dropping {}",
                due,
                dropped
            );
            self.max_catch_up
        } else {
            due
        };

        self.accumulator -= run as f64;
        run
    }

    /// Fraction of a tick waiting in the accumulator
    pub fn pending(&self) -> f64 {
        self.accumulator
    }

    pub fn dropped_ticks(&self) -> u64 {
        self.dropped_ticks
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(TICKS_PER_SECOND, crate::consts::MAX_CATCH_UP_TICKS)
    }
}

/// Latest player input, written by the input thread and read once per tick
#[derive(Debug, Default)]
pub struct SharedInput(AtomicU8);

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, input: Input) {
        self.0.store(input.as_raw(), Ordering::Release);
    }

    /// Store an undecoded value; unknown values read back as `Neutral`
    pub fn set_raw(&self, raw: u8) {
        self.0.store(raw, Ordering::Release);
    }

    pub fn get(&self) -> Input {
        Input::from_raw(self.0.load(Ordering::Acquire))
    }
}

/// Single-slot render snapshot, replaced whole so readers never see a torn state
#[derive(Debug, Default)]
pub struct SnapshotCell(Mutex<RenderState>);

impl SnapshotCell {
    pub fn new(initial: RenderState) -> Self {
        Self(Mutex::new(initial))
    }

    pub fn publish(&self, snapshot: RenderState) {
        // A poisoned lock still holds a whole RenderState
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = snapshot;
    }

    pub fn read(&self) -> RenderState {
        *self.0.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Everything shared between the simulation thread and the outside world
#[derive(Debug, Default)]
pub struct SharedIo {
    pub input: SharedInput,
    pub snapshot: SnapshotCell,
}

/// One loop iteration: run the due ticks, then publish a snapshot once
pub fn run_iteration(
    sim: &mut Simulation,
    timestep: &mut FixedTimestep,
    io: &SharedIo,
    elapsed: Duration,
) -> u32 {
    let steps = timestep.accumulate(elapsed);
    for _ in 0..steps {
        sim.step(io.input.get());
    }
    io.snapshot.publish(sim.render_state());
    steps
}

/// Drive `sim` in real time until `stop` is raised
pub fn run(sim: &mut Simulation, timestep: &mut FixedTimestep, io: &SharedIo, stop: &AtomicBool) {
    let mut last = Instant::now();
    while !stop.load(Ordering::Acquire) {
        let now = Instant::now();
        run_iteration(sim, timestep, io, now - last);
        last = now;
        thread::sleep(IDLE_SLEEP);
    }
    log::info!(
        "Simulation stopped after {} ticks ({} dropped)",
        sim.state.time_ticks,
        timestep.dropped_ticks()
    );
}

/// Start the simulation on its own thread; joining returns the final simulation
pub fn spawn(
    settings: &RunnerSettings,
    io: Arc<SharedIo>,
    stop: Arc<AtomicBool>,
) -> std::io::Result<JoinHandle<Simulation>> {
    let seed = settings.resolve_seed();
    let max_catch_up = settings.max_catch_up_ticks;
    log::info!("Game initialized with seed: {}", seed);

    thread::Builder::new()
        .name("simulation".into())
        .spawn(move || {
            let mut sim = Simulation::new(seed);
            let mut timestep = FixedTimestep::new(TICKS_PER_SECOND, max_catch_up);
            io.snapshot.publish(sim.render_state());
            run(&mut sim, &mut timestep, &io, &stop);
            sim
        })
}
