use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex as StdMutex,
    },
    time::{Duration, Instant},
};

use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::game::{
    CommandOutcome, CommitOutcome, GameRules, GameSnapshot, GameState, MoveError, Scorer,
    TileOrigin, WordValidator,
};

/// One player's game, shared between the HTTP and WebSocket handlers.
///
/// The state lock is never held across a dictionary lookup: commit takes it
/// once to start and once to apply, so skip can still get in while words are
/// being validated.
pub struct GameSession {
    pub game_id: Uuid,
    state: Mutex<GameState>,
    last_active: StdMutex<Instant>,
    sockets: AtomicUsize,
}

/// Marks a WebSocket as attached to a session for as long as it lives
pub struct SocketGuard {
    session: Arc<GameSession>,
}

impl Drop for SocketGuard {
    fn drop(&mut self) {
        self.session.sockets.fetch_sub(1, Ordering::SeqCst);
        self.session.touch();
    }
}

impl GameSession {
    pub fn new(rules: GameRules) -> Self {
        Self::with_state(GameState::new(rules, StdRng::from_os_rng()))
    }

    pub fn with_state(state: GameState) -> Self {
        Self {
            game_id: Uuid::new_v4(),
            state: Mutex::new(state),
            last_active: StdMutex::new(Instant::now()),
            sockets: AtomicUsize::new(0),
        }
    }

    /// Register a live socket. The session is not idle while one is attached.
    pub fn attach_socket(self: &Arc<Self>) -> SocketGuard {
        self.sockets.fetch_add(1, Ordering::SeqCst);
        self.touch();
        SocketGuard {
            session: self.clone(),
        }
    }

    pub fn has_live_socket(&self) -> bool {
        self.sockets.load(Ordering::SeqCst) > 0
    }

    fn touch(&self) {
        let mut last = self.last_active.lock().unwrap_or_else(|e| e.into_inner());
        *last = Instant::now();
    }

    /// How long since the last command
    pub fn idle_for(&self) -> Duration {
        let last = self.last_active.lock().unwrap_or_else(|e| e.into_inner());
        last.elapsed()
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(&*self.state.lock().await)
    }

    pub async fn place(&self, origin: TileOrigin, row: usize, col: usize) -> CommandOutcome {
        self.touch();
        let mut state = self.state.lock().await;
        let result = state.place(row, col, origin);
        self.log_rejection("place", &result);
        CommandOutcome::new(&state, &result)
    }

    pub async fn return_tile(&self, row: usize, col: usize) -> CommandOutcome {
        self.touch();
        let mut state = self.state.lock().await;
        let result = state.return_to_rack(row, col);
        self.log_rejection("return", &result);
        CommandOutcome::new(&state, &result)
    }

    pub async fn skip(&self) -> CommandOutcome {
        self.touch();
        let mut state = self.state.lock().await;
        let result = state.skip();
        match &result {
            Ok(()) => tracing::info!("Game {} skipped turn {}", self.game_id, state.turn()),
            Err(_) => self.log_rejection("skip", &result),
        }
        CommandOutcome::new(&state, &result)
    }

    /// Lift a tile into the hand without dropping it yet
    pub async fn pick_up(&self, origin: TileOrigin) -> CommandOutcome {
        self.touch();
        let mut state = self.state.lock().await;
        let result = state.pick_up(origin);
        self.log_rejection("pick up", &result);
        CommandOutcome::new(&state, &result)
    }

    pub async fn drop_on(&self, row: usize, col: usize) -> CommandOutcome {
        self.touch();
        let mut state = self.state.lock().await;
        let result = state.drop_on(row, col);
        self.log_rejection("drop", &result);
        CommandOutcome::new(&state, &result)
    }

    pub async fn drop_on_rack(&self) -> CommandOutcome {
        self.touch();
        let mut state = self.state.lock().await;
        let result = state.drop_on_rack();
        self.log_rejection("drop on rack", &result);
        CommandOutcome::new(&state, &result)
    }

    pub async fn cancel_pick_up(&self) -> CommandOutcome {
        self.touch();
        let mut state = self.state.lock().await;
        state.cancel_pick_up();
        CommandOutcome::accepted(&state)
    }

    /// Validate and score the pending move. The second value is present only
    /// if the move was applied.
    pub async fn commit(&self, validator: &WordValidator) -> (CommandOutcome, Option<CommitOutcome>) {
        self.touch();
        let ticket = {
            let mut state = self.state.lock().await;
            let started = state.begin_commit();
            match started {
                Ok(ticket) => ticket,
                Err(e) => {
                    let result: Result<(), MoveError> = Err(e);
                    self.log_rejection("commit", &result);
                    return (CommandOutcome::new(&state, &result), None);
                }
            }
        };

        let score = Scorer::score_move(&ticket.words, validator).await;

        let mut state = self.state.lock().await;
        let result = state.finish_commit(ticket.generation, score);
        self.log_rejection("commit", &result);
        let outcome = CommandOutcome::new(&state, &result);
        (outcome, result.ok())
    }

    /// Close the game: any in-flight commit is discarded and later commands
    /// are refused
    pub async fn end(&self) {
        self.state.lock().await.end_session();
        tracing::info!("Game {} ended", self.game_id);
    }

    fn log_rejection<T>(&self, command: &str, result: &Result<T, MoveError>) {
        if let Err(e) = result {
            tracing::debug!("Game {} rejected {}: {}", self.game_id, command, e);
        }
    }
}
