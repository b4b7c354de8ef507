//! Async tick loop
//!
//! Runs a [`Session`] on the tokio runtime with two independent tasks:
//!
//! - **gravity**: sleeps `fall_delay` (re-read every step, so it tracks the level),
//!   then applies one gravity step
//! - **clock**: refreshes elapsed time every [`CLOCK_TICK_MS`]
//!
//! Both tasks, and every action, take the same session lock, compute, and publish a
//! [`Frame`] through a single `watch` channel. Nothing is published for a tick that
//! changed nothing, so a paused or finished game goes quiet.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use blockfall_types::{GameAction, CLOCK_TICK_MS};

use crate::session::{Frame, Session};

/// Handle to a running session loop
///
/// Dropping the handle stops both tasks.
pub struct SessionLoop {
    session: Arc<Mutex<Session>>,
    frames_tx: Arc<watch::Sender<Frame>>,
    frames_rx: watch::Receiver<Frame>,
    gravity: JoinHandle<()>,
    clock: JoinHandle<()>,
}

impl SessionLoop {
    /// Start `session` (clock from zero) and spawn its tasks
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(mut session: Session) -> Self {
        session.start(Instant::now());
        Self::spawn_started(session)
    }

    /// Spawn tasks for a session that is already started (e.g. restored)
    pub fn spawn_started(session: Session) -> Self {
        let (frames_tx, frames_rx) = watch::channel(session.frame());
        let frames_tx = Arc::new(frames_tx);
        let session = Arc::new(Mutex::new(session));

        let gravity = tokio::spawn(gravity_task(session.clone(), frames_tx.clone()));
        let clock = tokio::spawn(clock_task(session.clone(), frames_tx.clone()));

        Self {
            session,
            frames_tx,
            frames_rx,
            gravity,
            clock,
        }
    }

    /// Apply an action under the session lock; publishes a frame if it changed anything
    pub async fn apply(&self, action: GameAction) -> bool {
        let mut session = self.session.lock().await;
        let changed = session.apply(action, Instant::now());
        if changed {
            self.frames_tx.send_replace(session.frame());
        }
        changed
    }

    /// Start a new game on the same session
    pub async fn restart(&self) {
        let mut session = self.session.lock().await;
        session.start(Instant::now());
        self.frames_tx.send_replace(session.frame());
    }

    /// Acknowledge the pending effect burst by sequence id
    pub async fn acknowledge_effect(&self, sequence: u64) -> bool {
        let mut session = self.session.lock().await;
        let acknowledged = session.acknowledge_effect(sequence);
        if acknowledged {
            self.frames_tx.send_replace(session.frame());
        }
        acknowledged
    }

    /// New receiver for published frames
    pub fn subscribe(&self) -> watch::Receiver<Frame> {
        self.frames_tx.subscribe()
    }

    /// Latest published frame
    pub fn frame(&self) -> Frame {
        self.frames_rx.borrow().clone()
    }

    /// Shared session, for callers that need more than actions
    pub fn session(&self) -> Arc<Mutex<Session>> {
        self.session.clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.gravity.is_finished() && self.clock.is_finished()
    }

    /// Cancel both tasks; the session and last frame stay readable
    pub fn stop(&self) {
        self.gravity.abort();
        self.clock.abort();
    }
}

impl Drop for SessionLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn gravity_task(session: Arc<Mutex<Session>>, frames: Arc<watch::Sender<Frame>>) {
    loop {
        let delay = session.lock().await.fall_delay();
        time::sleep(delay).await;

        let mut session = session.lock().await;
        if session.gravity_tick() {
            frames.send_replace(session.frame());
        }
    }
}

async fn clock_task(session: Arc<Mutex<Session>>, frames: Arc<watch::Sender<Frame>>) {
    let mut interval = time::interval(Duration::from_millis(CLOCK_TICK_MS));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let now = interval.tick().await;

        let mut session = session.lock().await;
        if !session.is_running() {
            continue;
        }
        let before = session.elapsed_ms();
        if session.clock_tick(now) != before {
            frames.send_replace(session.frame());
        }
    }
}
