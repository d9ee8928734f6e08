//! Periodic driver that ticks a shared game on a worker thread.
//!
//! Every tick runs entirely under the game lock, so stopping never leaves a tick half
//! applied, and player commands issued through the same lock serialize with it.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{error, info};

use crate::game::Game;

pub struct TickScheduler {
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<u64>>,
}

impl TickScheduler {
    /// Starts the run if it has not started yet, then ticks it every `interval` until the
    /// game ends or the scheduler is stopped.
    pub fn start(game: Arc<Mutex<Game>>, interval: Duration) -> Self {
        match game.lock() {
            Ok(mut game) => {
                game.start();
            }
            Err(_) => error!("game lock poisoned before the scheduler started"),
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let worker = thread::spawn(move || {
            let mut driven = 0_u64;
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
                let Ok(mut game) = game.lock() else {
                    error!("game lock poisoned; scheduler exiting");
                    break;
                };
                game.tick();
                driven += 1;
                if game.is_game_over() {
                    info!(
                        tick = game.current_tick(),
                        state = ?game.game_state(),
                        "scheduler finished"
                    );
                    break;
                }
            }
            driven
        });

        Self { stop_tx: Some(stop_tx), worker: Some(worker) }
    }

    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|worker| !worker.is_finished())
    }

    /// Stops the worker and waits for it. Returns how many ticks it drove, or `None` if the
    /// scheduler was already stopped.
    pub fn stop(&mut self) -> Option<u64> {
        if let Some(stop_tx) = self.stop_tx.take() {
            // The worker may already be gone after the game ended.
            let _ = stop_tx.send(());
        }
        let worker = self.worker.take()?;
        match worker.join() {
            Ok(driven) => Some(driven),
            Err(_) => {
                error!("scheduler worker panicked");
                None
            }
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
