//! Paddle Pong entry point
//!
//! Headless runner: the simulation ticks on its own thread while this thread
//! plays the presenter, reading snapshots and (with autoplay) feeding input.
//!
//! Usage: `paddle-pong [settings.json]`

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use paddle_pong::scheduler::{self, SharedIo};
use paddle_pong::{Input, RenderState, RunnerSettings};

/// Presenter poll rate (decoupled from the tick rate)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Keep the player paddle under the ball, with a small dead zone
fn autoplay_input(snapshot: &RenderState) -> Input {
    let gap = snapshot.ball_y - snapshot.player_pad_y;
    if gap < -2.0 {
        Input::Up
    } else if gap > 2.0 {
        Input::Down
    } else {
        Input::Neutral
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Paddle Pong (headless) starting...");

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = RunnerSettings::load(settings_path.as_deref());

    let io = Arc::new(SharedIo::default());
    let stop = Arc::new(AtomicBool::new(false));
    let handle = match scheduler::spawn(&settings, Arc::clone(&io), Arc::clone(&stop)) {
        Ok(handle) => handle,
        Err(e) => {
            log::error!("Failed to start simulation thread: {}", e);
            std::process::exit(1);
        }
    };

    let started = Instant::now();
    let report_interval = Duration::from_millis(settings.report_interval_ms);
    let mut last_report = started;

    loop {
        let snapshot = io.snapshot.read();

        if settings.autoplay {
            io.input.set(autoplay_input(&snapshot));
        }

        if last_report.elapsed() >= report_interval {
            log::info!(
                "{} - {} | ball ({:.1}, {:.1}) | pads {:.1} / {:.1}",
                snapshot.player_score,
                snapshot.ai_score,
                snapshot.ball_x,
                snapshot.ball_y,
                snapshot.player_pad_y,
                snapshot.ai_pad_y
            );
            last_report = Instant::now();
        }

        if let Some(limit) = settings.run_seconds {
            if started.elapsed().as_secs_f32() >= limit {
                break;
            }
        }

        thread::sleep(FRAME_INTERVAL);
    }

    stop.store(true, Ordering::Release);
    match handle.join() {
        Ok(sim) => match serde_json::to_string(&sim.state) {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("Could not serialize final state: {}", e),
        },
        Err(_) => log::error!("Simulation thread panicked"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is the deliverable on wasm
}
