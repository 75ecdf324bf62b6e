//! Game loop scheduler: two timers and a command queue under one lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::core::{DropOutcome, GameController, GameSnapshot};
use crate::types::{GameAction, DROP_INTERVAL_MS, FRAME_MS};

/// The controller behind the single lock every task goes through.
pub type SharedController = Arc<Mutex<GameController>>;

/// Periods of the two clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub drop_interval: Duration,
    pub frame_interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            drop_interval: Duration::from_millis(DROP_INTERVAL_MS as u64),
            frame_interval: Duration::from_millis(FRAME_MS as u64),
        }
    }
}

/// Cloneable handle for feeding actions into a running loop.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<GameAction>,
}

impl CommandSender {
    /// Queue an action. Returns `false` once the loop has stopped.
    pub fn send(&self, action: GameAction) -> bool {
        if self.tx.send(action).is_err() {
            warn!(action = action.as_str(), "game loop stopped, dropping action");
            return false;
        }
        true
    }
}

/// Running game loop instance.
pub struct GameLoop {
    controller: SharedController,
    commands: CommandSender,
    frames: watch::Receiver<GameSnapshot>,
    stop: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl GameLoop {
    /// Start the drop, frame and command tasks on `handle`.
    ///
    /// The controller is started if it was not already.
    pub fn spawn(handle: &Handle, mut controller: GameController, timing: Timing) -> Self {
        controller.start();
        let first = controller.snapshot();
        let controller: SharedController = Arc::new(Mutex::new(controller));

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<GameAction>();
        let (frame_tx, frame_rx) = watch::channel(first);
        let (stop_tx, stop_rx) = watch::channel(false);

        let tasks = vec![
            handle.spawn(run_drop_timer(
                Arc::clone(&controller),
                timing.drop_interval,
                stop_rx.clone(),
            )),
            handle.spawn(run_frames(
                Arc::clone(&controller),
                timing.frame_interval,
                frame_tx,
                stop_rx.clone(),
            )),
            handle.spawn(run_commands(Arc::clone(&controller), cmd_rx, stop_rx)),
        ];

        info!(
            drop_ms = timing.drop_interval.as_millis() as u64,
            frame_ms = timing.frame_interval.as_millis() as u64,
            "game loop started"
        );

        Self {
            controller,
            commands: CommandSender { tx: cmd_tx },
            frames: frame_rx,
            stop: stop_tx,
            tasks,
        }
    }

    pub fn sender(&self) -> CommandSender {
        self.commands.clone()
    }

    pub fn send(&self, action: GameAction) -> bool {
        self.commands.send(action)
    }

    /// Receiver for per-frame snapshots.
    pub fn frames(&self) -> watch::Receiver<GameSnapshot> {
        self.frames.clone()
    }

    /// Most recently published snapshot.
    pub fn latest(&self) -> GameSnapshot {
        *self.frames.borrow()
    }

    pub fn controller(&self) -> SharedController {
        Arc::clone(&self.controller)
    }

    /// Signal every task to stop without waiting for them.
    pub fn stop(&self) {
        let _ = self.stop.send(true);
    }

    /// Stop every task and wait for them to finish.
    pub async fn shutdown(mut self) {
        self.stop();
        for task in std::mem::take(&mut self.tasks) {
            let _ = task.await;
        }
        info!("game loop stopped");
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        let _ = self.stop.send(true);
    }
}

/// Lock the controller, recovering the guard if a previous holder panicked.
pub fn lock(controller: &SharedController) -> MutexGuard<'_, GameController> {
    controller.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn run_drop_timer(
    controller: SharedController,
    period: Duration,
    mut stop: watch::Receiver<bool>,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let outcome = lock(&controller).drop_step();
                match outcome {
                    DropOutcome::Moved | DropOutcome::Paused => {}
                    other => debug!(?other, "drop step"),
                }
            }
            _ = stop.changed() => break,
        }
    }
}

async fn run_frames(
    controller: SharedController,
    period: Duration,
    frames: watch::Sender<GameSnapshot>,
    mut stop: watch::Receiver<bool>,
) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut snap = GameSnapshot::default();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                {
                    let mut game = lock(&controller);
                    game.resolve_tick();
                    game.snapshot_into(&mut snap);
                }
                frames.send_replace(snap);
            }
            _ = stop.changed() => break,
        }
    }
}

async fn run_commands(
    controller: SharedController,
    mut commands: mpsc::UnboundedReceiver<GameAction>,
    mut stop: watch::Receiver<bool>,
) {
    loop {
        tokio::select! {
            action = commands.recv() => {
                let Some(action) = action else { break };
                let applied = lock(&controller).apply_action(action);
                debug!(action = action.as_str(), applied, "applied action");
            }
            _ = stop.changed() => break,
        }
    }
}
