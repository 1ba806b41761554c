//! Game session: owns one game and publishes its changes

use std::{
    ops::ControlFlow,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use super::{GameEvent, GameSnapshot, GameState, WordPool};
use crate::{
    config::GameConfig,
    error::Result,
    tasks::{Scheduler, TickHandle},
};

/// Capacity of the event channel before slow subscribers start lagging
const EVENT_CAPACITY: usize = 100;

/// State reachable from the tick callback
#[derive(Debug)]
struct Shared {
    game: Mutex<GameState>,
    /// Channel for discrete state changes
    event_tx: broadcast::Sender<GameEvent>,
    /// Channel holding the latest full snapshot
    snapshot_tx: watch::Sender<GameSnapshot>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, GameState> {
        self.game.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a transition and notify subscribers while still holding the lock,
    /// so events from ticks and user actions never interleave.
    fn update<F>(&self, action: &str, updater: F) -> GameSnapshot
    where
        F: FnOnce(&mut GameState) -> Vec<GameEvent>,
    {
        let mut game = self.lock();
        let events = updater(&mut game);
        let snapshot = game.snapshot();
        if events.is_empty() {
            return snapshot;
        }

        debug!("{} produced {} events", action, events.len());
        for event in events {
            if self.event_tx.send(event).is_err() {
                debug!("No event subscribers for {}", action);
            }
        }
        self.snapshot_tx.send_replace(snapshot.clone());
        snapshot
    }

    fn tick(&self) -> ControlFlow<()> {
        let snapshot = self.update("tick", GameState::tick);
        let disposed = self.lock().is_disposed();
        if snapshot.finished || disposed {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

/// One game from start to score screen.
///
/// Ticks arrive from the injected scheduler; answers arrive from the
/// presentation layer. Both go through the same lock.
pub struct GameSession {
    shared: Arc<Shared>,
    scheduler: Arc<dyn Scheduler>,
    ticker: Mutex<Option<TickHandle>>,
}

impl GameSession {
    pub fn new(config: GameConfig, pool: WordPool, scheduler: Arc<dyn Scheduler>) -> Self {
        let game = GameState::new(config, pool);
        let (event_tx, _) = broadcast::channel(EVENT_CAPACITY);
        let (snapshot_tx, _) = watch::channel(game.snapshot());

        Self {
            shared: Arc::new(Shared {
                game: Mutex::new(game),
                event_tx,
                snapshot_tx,
            }),
            scheduler,
            ticker: Mutex::new(None),
        }
    }

    /// Build a session over a word list, optionally with a fixed shuffle seed
    pub fn with_words(
        config: GameConfig,
        words: Vec<String>,
        seed: Option<u64>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Result<Self> {
        let pool = match seed {
            Some(seed) => WordPool::with_seed(words, seed)?,
            None => WordPool::new(words)?,
        };
        Ok(Self::new(config, pool, scheduler))
    }

    /// Receive every state change from now on
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.shared.event_tx.subscribe()
    }

    /// Receive the latest snapshot whenever it changes
    pub fn watch(&self) -> watch::Receiver<GameSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.shared.lock().snapshot()
    }

    /// Start the game and the countdown. Later calls do nothing.
    pub fn start(&self) -> GameSnapshot {
        let mut ticker = self.lock_ticker();
        let mut started = false;
        let snapshot = self.shared.update("start", |game| {
            let events = game.start();
            started = !events.is_empty();
            events
        });

        if started {
            let interval = self.shared.lock().config().tick_interval();
            let shared = Arc::clone(&self.shared);
            *ticker = Some(
                self.scheduler
                    .schedule_periodic(interval, Box::new(move || shared.tick())),
            );
        }
        snapshot
    }

    pub fn on_correct(&self) -> GameSnapshot {
        self.shared.update("correct", GameState::on_correct)
    }

    pub fn on_skip(&self) -> GameSnapshot {
        self.shared.update("skip", GameState::on_skip)
    }

    /// The presentation layer has played the pending buzz
    pub fn on_buzz_consumed(&self) -> GameSnapshot {
        self.shared.update("buzz consumed", GameState::on_buzz_consumed)
    }

    /// Stop the countdown and freeze the game. Safe to call repeatedly.
    pub fn dispose(&self) {
        let mut ticker = self.lock_ticker();
        {
            let mut game = self.shared.lock();
            if game.is_disposed() {
                return;
            }
            game.dispose();
        }
        if let Some(mut handle) = ticker.take() {
            handle.cancel();
        }
        info!("Game session disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.lock().is_disposed()
    }

    fn lock_ticker(&self) -> MutexGuard<'_, Option<TickHandle>> {
        self.ticker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state::BuzzType, tasks::ManualScheduler};
    use std::time::Duration;

    fn session(scheduler: &ManualScheduler) -> GameSession {
        GameSession::with_words(
            GameConfig::default(),
            WordPool::default_words(),
            Some(5),
            Arc::new(scheduler.clone()),
        )
        .unwrap()
    }

    fn drain(rx: &mut broadcast::Receiver<GameEvent>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn start_schedules_one_tick_per_second() {
        let scheduler = ManualScheduler::new();
        let session = session(&scheduler);
        assert_eq!(scheduler.active_count(), 0);

        session.start();
        session.start();
        assert_eq!(scheduler.active_count(), 1);

        scheduler.advance(Duration::from_secs(3));
        assert_eq!(session.snapshot().seconds_left, 6);
    }

    #[test]
    fn finishing_ends_the_subscription() {
        let scheduler = ManualScheduler::new();
        let session = session(&scheduler);
        let mut events = session.subscribe();
        session.start();

        assert_eq!(scheduler.advance(Duration::from_secs(20)), 9);
        assert_eq!(scheduler.active_count(), 0);

        let snapshot = session.snapshot();
        assert!(snapshot.finished);
        assert_eq!(snapshot.seconds_left, 0);
        assert_eq!(snapshot.buzz, BuzzType::GameOver);
        assert_eq!(
            drain(&mut events).last(),
            Some(&GameEvent::Finished { score: 0 })
        );
    }

    #[test]
    fn dispose_cancels_ticks_and_freezes_state() {
        let scheduler = ManualScheduler::new();
        let session = session(&scheduler);
        session.start();
        scheduler.advance(Duration::from_secs(2));

        session.dispose();
        session.dispose();
        assert_eq!(scheduler.active_count(), 0);

        let before = session.snapshot();
        scheduler.advance(Duration::from_secs(5));
        session.on_correct();
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn dropping_session_cancels_ticks() {
        let scheduler = ManualScheduler::new();
        let session = session(&scheduler);
        session.start();
        drop(session);
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn watch_sees_latest_snapshot() {
        let scheduler = ManualScheduler::new();
        let session = session(&scheduler);
        let watcher = session.watch();
        session.start();
        session.on_correct();
        session.on_correct();
        session.on_skip();

        assert_eq!(watcher.borrow().score, 1);
        assert_eq!(*watcher.borrow(), session.snapshot());
    }

    #[test]
    fn events_arrive_in_order() {
        let scheduler = ManualScheduler::new();
        let session = session(&scheduler);
        let mut events = session.subscribe();
        session.start();
        drain(&mut events);

        session.on_correct();
        let received = drain(&mut events);
        assert_eq!(
            received[..2],
            [
                GameEvent::BuzzChanged { buzz: BuzzType::Correct },
                GameEvent::ScoreChanged { score: 1 },
            ]
        );
        assert!(matches!(received[2], GameEvent::WordChanged { .. }));
    }
}
