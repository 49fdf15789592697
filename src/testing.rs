//! Doubles and fixtures shared by the unit tests.
use crate::ChannelId;
use crate::Chips;
use crate::PlayerId;
use crate::Position;
use crate::cards::Card;
use crate::casino::Casino;
use crate::casino::Door;
use crate::casino::Event;
use crate::commands::Dispatcher;
use crate::ledger::Ledger;
use crate::rules::Action;
use crate::rules::Advance;
use crate::rules::Config;
use crate::rules::Dealer;
use crate::rules::HighCardDealer;
use crate::rules::Identity;
use crate::rules::Rules;
use crate::rules::RulesError;
use crate::rules::Seated;
use crate::session::House;
use crate::session::Patron;
use crate::session::Session;
use crate::session::Timing;
use crate::transport::DeliveryError;
use crate::transport::Notifier;
use crate::transport::Transport;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use tokio::sync::mpsc::UnboundedReceiver;

/// Transport that remembers everything sent, optionally failing the first
/// few sends with a transient error.
#[derive(Default)]
pub struct Recorder {
    sent: Mutex<Vec<(ChannelId, String)>>,
    failures: AtomicUsize,
    opened: AtomicUsize,
}

impl Recorder {
    pub fn failing(n: usize) -> Self {
        Self {
            failures: AtomicUsize::new(n),
            ..Self::default()
        }
    }
    pub fn texts(&self, channel: &ChannelId) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| c == channel)
            .map(|(_, t)| t.clone())
            .collect()
    }
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Transport for Recorder {
    async fn send(&self, channel: &ChannelId, text: &str) -> Result<(), DeliveryError> {
        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(DeliveryError::Transient("502 Bad Gateway".into()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((channel.clone(), text.to_string()));
        Ok(())
    }
    async fn open_private(&self, player: &PlayerId) -> Result<ChannelId, DeliveryError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(ChannelId::from(format!("@{}", player)))
    }
}

/// Bare identity for driving an engine directly.
pub struct Stub(PlayerId);

impl Identity for Stub {
    fn id(&self) -> &PlayerId {
        &self.0
    }
    fn name(&self) -> &str {
        self.0.as_str()
    }
}

pub fn stub(id: &str) -> Arc<dyn Identity> {
    Arc::new(Stub(PlayerId::from(id)))
}

/// Engine that replays canned steps, then reports `done`.
///
/// Every decision it is handed is refused. When built with a turn, the
/// named player stays the seat to act for as long as they are seated.
pub struct Scripted {
    config: Config,
    seats: Vec<Seated>,
    steps: VecDeque<Advance>,
    turn: Option<PlayerId>,
    stepped: Arc<AtomicUsize>,
}

impl Scripted {
    pub fn new(steps: Vec<Advance>) -> Self {
        Self {
            config: Config::new(1, 2),
            seats: Vec::new(),
            steps: steps.into(),
            turn: None,
            stepped: Arc::default(),
        }
    }
    pub fn with_turn(self, player: &str) -> Self {
        Self {
            turn: Some(PlayerId::from(player)),
            ..self
        }
    }
    /// Shared count of calls to `next`.
    pub fn stepped(&self) -> Arc<AtomicUsize> {
        self.stepped.clone()
    }
}

impl Rules for Scripted {
    fn config(&self) -> Config {
        self.config
    }
    fn set_config(&mut self, config: Config) -> Result<(), RulesError> {
        self.config = config;
        Ok(())
    }
    fn sit(
        &mut self,
        player: Arc<dyn Identity>,
        seat: Position,
        buy_in: Chips,
    ) -> Result<(), RulesError> {
        if self.seats.iter().any(|s| s.seat == seat) {
            return Err(RulesError::SeatOccupied(seat));
        }
        self.seats.push(Seated {
            seat,
            player,
            chips: buy_in,
            out: false,
            hole: Vec::new(),
        });
        Ok(())
    }
    fn stand(&mut self, player: &PlayerId) -> Option<Chips> {
        let index = self.seats.iter().position(|s| s.id() == player)?;
        Some(self.seats.remove(index).chips)
    }
    fn next(&mut self) -> Advance {
        self.stepped.fetch_add(1, Ordering::SeqCst);
        self.steps.pop_front().unwrap_or_else(Advance::done)
    }
    fn act(&mut self, _: Action, _: Chips) -> Result<(), RulesError> {
        Err(RulesError::NotWaiting)
    }
    fn players(&self) -> Vec<Seated> {
        self.seats.clone()
    }
    fn current(&self) -> Option<Seated> {
        let turn = self.turn.as_ref()?;
        self.seats.iter().find(|s| s.id() == turn).cloned()
    }
    fn valid_actions(&self) -> Vec<Action> {
        vec![Action::Fold]
    }
    fn outstanding(&self) -> Chips {
        0
    }
    fn min_raise(&self) -> Chips {
        0
    }
    fn max_raise(&self) -> Chips {
        0
    }
    fn pot(&self) -> Chips {
        0
    }
    fn board(&self) -> Vec<Card> {
        Vec::new()
    }
}

/// Patron named after its id, with a `@id` direct channel.
pub fn patron(id: &str) -> Patron {
    Patron {
        id: PlayerId::from(id),
        name: id.to_string(),
        private: ChannelId::from(format!("@{}", id)),
    }
}

/// A ledger in a scratch directory, a recording transport, and the queue a
/// session would report back on.
pub struct Fixture {
    pub recorder: Arc<Recorder>,
    pub ledger: Arc<Ledger>,
    pub notifier: Notifier,
    pub door: Door,
    pub events: tokio::sync::Mutex<UnboundedReceiver<Event>>,
    _dir: tempfile::TempDir,
}

impl Fixture {
    /// Must be called inside a runtime; the notifier spawns its courier.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("scratch directory");
        let recorder = Arc::new(Recorder::default());
        let notifier = Notifier::spawn(recorder.clone(), crate::SEND_RETRIES);
        let (door, events) = Door::channel();
        Self {
            ledger: Arc::new(Ledger::new(dir.path().join(crate::LEDGER_PATH))),
            recorder,
            notifier,
            door,
            events: tokio::sync::Mutex::new(events),
            _dir: dir,
        }
    }
    pub fn said(&self, channel: &ChannelId) -> Vec<String> {
        self.recorder.texts(channel)
    }
    pub fn house(&self) -> House {
        House {
            ledger: self.ledger.clone(),
            notifier: self.notifier.clone(),
            door: self.door.clone(),
            timing: Timing::default(),
        }
    }
    /// Idle table in channel `table`, not yet seated.
    pub fn session(&self, owner: Patron) -> Session {
        let rules = HighCardDealer::seeded(7).table(Config::new(1, 2));
        Session::new(1, ChannelId::from("table"), self.house(), rules, owner)
    }
    /// Idle table in channel `table` driven by `rules`.
    pub fn session_with(&self, owner: Patron, rules: Scripted) -> Session {
        Session::new(1, ChannelId::from("table"), self.house(), Box::new(rules), owner)
    }
    pub fn casino(&self) -> Casino {
        Casino::new(
            self.ledger.clone(),
            self.notifier.clone(),
            Arc::new(HighCardDealer::seeded(7)),
            Timing::default(),
        )
    }
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.door.clone(), self.ledger.clone(), self.notifier.clone())
    }
}
