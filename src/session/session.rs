use super::*;
use crate::ChannelId;
use crate::Chips;
use crate::PlayerId;
use crate::Position;
use crate::Rejection;
use crate::SessionId;
use crate::rules::Identity;
use crate::rules::Limit;
use crate::rules::Rules;
use crate::rules::RulesError;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// Everything guarded by the session lock.
pub(super) struct State {
    pub(super) owner: Patron,
    pub(super) rules: Box<dyn Rules>,
    pub(super) occupants: HashMap<PlayerId, Arc<Occupant>>,
    pub(super) running: bool,
    pub(super) stopping: bool,
    pub(super) shutting_down: bool,
    pub(super) banned: HashSet<PlayerId>,
    pub(super) cards_shown: bool,
    pub(super) board_shown: usize,
}

impl State {
    fn require_owner(&self, player: &PlayerId) -> Result<(), Rejection> {
        match self.owner.id == *player {
            true => Ok(()),
            false => Err(Rejection::NotOwner),
        }
    }
}

/// How a removal request was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    /// Still in the hand; leaves at the next settlement boundary.
    Deferred,
    /// Seat emptied and stack settled.
    Stood { remaining: usize, running: bool },
}

/// One table bound to one channel.
///
/// All table state lives behind a single lock. The round loop holds it for
/// every step and only lets go while it waits on a player or sits out the
/// pause between hands.
pub struct Session {
    id: SessionId,
    channel: ChannelId,
    pub(super) house: House,
    pub(super) state: Mutex<State>,
    pub(super) mailbox: UnboundedSender<Play>,
    pub(super) inbox: Mutex<UnboundedReceiver<Play>>,
}

impl Session {
    pub fn new(
        id: SessionId,
        channel: ChannelId,
        house: House,
        rules: Box<dyn Rules>,
        owner: Patron,
    ) -> Self {
        let (mailbox, inbox) = unbounded_channel();
        Self {
            id,
            channel,
            house,
            state: Mutex::new(State {
                owner,
                rules,
                occupants: HashMap::new(),
                running: false,
                stopping: false,
                shutting_down: false,
                banned: HashSet::new(),
                cards_shown: false,
                board_shown: 0,
            }),
            mailbox,
            inbox: Mutex::new(inbox),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }
    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }
    pub(super) fn notify(&self, text: impl Into<String>) {
        self.house.notifier.send(&self.channel, text);
    }

    /// Seat a patron whose buy-in is already escrowed.
    ///
    /// Scans every seat, skipping occupied ones; any other engine error ends
    /// the scan. The caller refunds on error.
    pub async fn seat(&self, patron: Patron, buy_in: Chips) -> Result<Position, Rejection> {
        let mut state = self.state.lock().await;
        let occupant = Arc::new(Occupant::new(patron));
        for seat in 0..state.rules.seats() {
            match state.rules.sit(occupant.clone(), seat, buy_in) {
                Ok(()) => {
                    log::info!(
                        "[session {}] {} sat at seat {} with {}",
                        self.channel,
                        occupant.name(),
                        seat,
                        buy_in
                    );
                    state.occupants.insert(occupant.id().clone(), occupant);
                    return Ok(seat);
                }
                Err(RulesError::SeatOccupied(_)) => continue,
                Err(e) => return Err(Rejection::Seat(e.to_string())),
            }
        }
        Err(Rejection::NoFreeSeat)
    }

    pub async fn is_banned(&self, player: &PlayerId) -> bool {
        self.state.lock().await.banned.contains(player)
    }
    pub async fn is_running(&self) -> bool {
        self.state.lock().await.running
    }
    pub async fn seated(&self) -> usize {
        self.state.lock().await.occupants.len()
    }
    #[cfg(test)]
    pub async fn players(&self) -> Vec<crate::rules::Seated> {
        self.state.lock().await.rules.players()
    }

    /// Leave the table. A running hand the player is still part of defers the
    /// departure unless `forced`.
    pub async fn remove_player(
        &self,
        player: &PlayerId,
        forced: bool,
    ) -> Result<Departure, Rejection> {
        let mut state = self.state.lock().await;
        self.depart(&mut state, player, forced).await
    }

    async fn depart(
        &self,
        state: &mut State,
        player: &PlayerId,
        forced: bool,
    ) -> Result<Departure, Rejection> {
        let occupant = state
            .occupants
            .get(player)
            .cloned()
            .ok_or(Rejection::NotSeated)?;
        let active = state
            .rules
            .players()
            .iter()
            .any(|s| s.id() == player && !s.out);
        if state.running && active && !forced {
            occupant.leave_after_round();
            self.notify(format!("{} will leave after this round", occupant.name()));
            return Ok(Departure::Deferred);
        }
        self.settle(state, player).await;
        if state.running && self.mailbox.send(Play::Vacated(player.clone())).is_err() {
            log::warn!("[session {}] mailbox closed", self.channel);
        }
        Ok(Departure::Stood {
            remaining: state.occupants.len(),
            running: state.running,
        })
    }

    /// Stand a player up, credit their stack and hand ownership on if needed.
    /// Returns the chips credited.
    pub(super) async fn settle(&self, state: &mut State, player: &PlayerId) -> Option<Chips> {
        let occupant = state.occupants.remove(player)?;
        let chips = match state.rules.stand(player) {
            Some(chips) => chips,
            None => {
                log::error!(
                    "[session {}] {} was registered but not seated",
                    self.channel,
                    player
                );
                0
            }
        };
        self.house
            .ledger
            .credit(occupant.id(), occupant.name(), chips)
            .await;
        log::info!(
            "[session {}] {} stood up with {}",
            self.channel,
            occupant.name(),
            chips
        );
        self.notify(format!("{} stood up with {}", occupant.name(), chips));
        if state.owner.id == *player {
            let heir = state
                .rules
                .players()
                .iter()
                .find_map(|s| state.occupants.get(s.id()).cloned());
            if let Some(heir) = heir {
                state.owner = heir.patron().clone();
                self.notify(format!("{} now owns the table", heir.name()));
            }
        }
        Some(chips)
    }

    /// Settle every seat. Safe to call more than once.
    pub(super) async fn settle_all(&self, state: &mut State) {
        let mut order = state
            .rules
            .players()
            .iter()
            .map(|s| s.id().clone())
            .collect::<Vec<_>>();
        let strays = state
            .occupants
            .keys()
            .filter(|id| !order.contains(id))
            .cloned()
            .collect::<Vec<_>>();
        order.extend(strays);
        for player in order {
            self.settle(state, &player).await;
        }
    }

    /// Settle everyone and leave the table empty.
    pub async fn dissolve(&self) {
        let mut state = self.state.lock().await;
        self.settle_all(&mut state).await;
    }

    /// Mark the table running. The caller spawns [`Session::run`].
    pub async fn start(&self) -> Result<(), Rejection> {
        let mut state = self.state.lock().await;
        if state.running {
            return Err(Rejection::AlreadyRunning);
        }
        if state.rules.players().iter().filter(|s| s.chips > 0).count() < 2 {
            return Err(Rejection::NotEnoughPlayers);
        }
        state.running = true;
        state.stopping = false;
        state.cards_shown = false;
        state.board_shown = 0;
        log::info!("[session {}] starting", self.channel);
        self.notify("Starting");
        Ok(())
    }

    /// Ask the table to stop once the current hand settles.
    /// Returns `false` when nothing is running and the table can go at once.
    pub async fn stop_after_round(&self, player: &PlayerId) -> Result<bool, Rejection> {
        let mut state = self.state.lock().await;
        state.require_owner(player)?;
        if state.running {
            state.stopping = true;
            self.notify("Stopping after this round");
        }
        Ok(state.running)
    }

    /// Flag a running table to wind down for shutdown.
    /// Returns `false` when nothing is running.
    pub async fn drain(&self) -> bool {
        let mut state = self.state.lock().await;
        if state.running {
            state.stopping = true;
            state.shutting_down = true;
        }
        state.running
    }

    pub async fn kick(
        &self,
        player: &PlayerId,
        target: &PlayerId,
    ) -> Result<Departure, Rejection> {
        let mut state = self.state.lock().await;
        state.require_owner(player)?;
        self.depart(&mut state, target, true).await
    }

    /// Ban `target` for the life of this table, removing them if seated.
    pub async fn ban(
        &self,
        player: &PlayerId,
        target: &PlayerId,
    ) -> Result<Option<Departure>, Rejection> {
        let mut state = self.state.lock().await;
        state.require_owner(player)?;
        state.banned.insert(target.clone());
        self.notify(format!("Banned {}", target));
        match state.occupants.contains_key(target) {
            true => self.depart(&mut state, target, true).await.map(Some),
            false => Ok(None),
        }
    }

    /// Apply `key value` pairs one at a time. Unknown keys are ignored,
    /// numbers that do not parse count as zero, and a pair the table refuses
    /// is reported without holding back the others.
    pub async fn change_settings(
        &self,
        player: &PlayerId,
        settings: &[(String, String)],
    ) -> Result<(), Rejection> {
        let mut state = self.state.lock().await;
        state.require_owner(player)?;
        if state.running {
            return Err(Rejection::Running);
        }
        for (key, value) in settings {
            let mut config = state.rules.config();
            let number = || value.parse::<Chips>().unwrap_or(0);
            match key.to_lowercase().as_str() {
                "small" | "sb" => config.stakes.small = number(),
                "big" | "bb" => config.stakes.big = number(),
                "ante" => config.stakes.ante = number(),
                "seats" => config.seats = value.parse::<usize>().unwrap_or(0),
                "limit" => match Limit::try_from(value.as_str()) {
                    Ok(limit) => config.limit = limit,
                    Err(v) => {
                        self.notify(Rejection::Setting(format!("unknown limit {}", v)).to_string());
                        continue;
                    }
                },
                other => {
                    log::debug!("[session {}] ignoring setting {}", self.channel, other);
                    continue;
                }
            }
            match state.rules.set_config(config) {
                Ok(()) => log::info!("[session {}] {} set to {}", self.channel, key, value),
                Err(e) => self.notify(
                    Rejection::Setting(format!("{} {}: {}", key, value, e)).to_string(),
                ),
            }
        }
        Ok(())
    }

    /// Table configuration and seated players as a notification.
    pub async fn info(&self) -> String {
        let state = self.state.lock().await;
        let config = state.rules.config();
        let mut text = format!(
            "Game: {}\nLimit: {}\nStakes: {}/{} ante {}\nSeats: {}\nOwner: {}\nRunning: {}\nPlayers:",
            config.game,
            config.limit,
            config.stakes.small,
            config.stakes.big,
            config.stakes.ante,
            config.seats,
            state.owner.name,
            if state.running { "yes" } else { "no" },
        );
        for seated in state.rules.players() {
            text.push_str(&format!(
                "\n  {}: {} ({})",
                seated.seat,
                seated.name(),
                seated.chips
            ));
        }
        text
    }

    /// Hand a move to the pending turn. Moves from anyone but the seat to
    /// act are refused.
    pub async fn offer(&self, player: &PlayerId, mv: Move) -> bool {
        let state = self.state.lock().await;
        if !state.running {
            return false;
        }
        match state.rules.current() {
            Some(seat) if seat.id() == player => self
                .mailbox
                .send(Play::Move {
                    player: player.clone(),
                    mv,
                })
                .is_ok(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Action;
    use crate::testing::*;
    use std::time::Duration;

    async fn table(fx: &Fixture, players: &[&str]) -> Arc<Session> {
        let session = Arc::new(fx.session(patron(players[0])));
        for id in players {
            let p = patron(id);
            fx.ledger.debit(&p.id, &p.name, 100).await.unwrap();
            session.seat(p, 100).await.unwrap();
        }
        session
    }

    #[tokio::test]
    async fn seat_scan_skips_occupied_seats() {
        let fx = Fixture::new();
        let session = table(&fx, &["a", "b"]).await;
        assert_eq!(session.seated().await, 2);
        assert_eq!(
            session.seat(patron("a"), 10).await,
            Err(Rejection::Seat("player is already seated".into()))
        );
        let session = Arc::new(fx.session(patron("c")));
        session
            .change_settings(&patron("c").id, &[("seats".into(), "1".into())])
            .await
            .unwrap();
        session.seat(patron("c"), 10).await.unwrap();
        assert_eq!(session.seat(patron("d"), 10).await, Err(Rejection::NoFreeSeat));
    }

    #[tokio::test]
    async fn settings_need_the_owner_and_parse_leniently() {
        let fx = Fixture::new();
        let session = table(&fx, &["a", "b"]).await;
        assert_eq!(
            session
                .change_settings(&patron("b").id, &[("ante".into(), "1".into())])
                .await,
            Err(Rejection::NotOwner)
        );
        session
            .change_settings(
                &patron("a").id,
                &[
                    ("ante".into(), "lots".into()),
                    ("big".into(), "4".into()),
                    ("colour".into(), "red".into()),
                    ("limit".into(), "pot-limit".into()),
                ],
            )
            .await
            .unwrap();
        let info = session.info().await;
        assert!(info.contains("Stakes: 1/4 ante 0"));
        assert!(info.contains("Limit: Pot Limit"));
    }

    #[tokio::test]
    async fn refused_setting_keeps_the_rest() {
        let fx = Fixture::new();
        let session = table(&fx, &["a", "b"]).await;
        session
            .change_settings(
                &patron("a").id,
                &[
                    ("big".into(), "4".into()),
                    ("seats".into(), "x".into()),
                    ("ante".into(), "1".into()),
                ],
            )
            .await
            .unwrap();
        let info = session.info().await;
        assert!(info.contains("Stakes: 1/4 ante 1"));
        assert!(info.contains(&format!("Seats: {}", crate::DEFAULT_SEATS)));
        fx.notifier.flush().await;
        assert!(
            fx.said(session.channel())
                .iter()
                .any(|t| t.starts_with("Couldn't change settings: seats x: "))
        );
    }

    #[tokio::test]
    async fn owner_leaving_hands_the_table_on() {
        let fx = Fixture::new();
        let session = table(&fx, &["a", "b"]).await;
        let gone = session.remove_player(&patron("a").id, false).await.unwrap();
        assert_eq!(
            gone,
            Departure::Stood {
                remaining: 1,
                running: false
            }
        );
        assert_eq!(fx.ledger.balance(&patron("a").id).await, Some(100));
        assert!(session.info().await.contains("Owner: b"));
        assert_eq!(
            session.remove_player(&patron("a").id, false).await,
            Err(Rejection::NotSeated)
        );
    }

    #[tokio::test]
    async fn ban_removes_and_remembers() {
        let fx = Fixture::new();
        let session = table(&fx, &["a", "b"]).await;
        assert_eq!(
            session.ban(&patron("b").id, &patron("a").id).await,
            Err(Rejection::NotOwner)
        );
        let gone = session.ban(&patron("a").id, &patron("b").id).await.unwrap();
        assert!(matches!(gone, Some(Departure::Stood { remaining: 1, .. })));
        assert!(session.is_banned(&patron("b").id).await);
        assert_eq!(fx.ledger.balance(&patron("b").id).await, Some(100));
    }

    #[tokio::test]
    async fn start_needs_two_players() {
        let fx = Fixture::new();
        let session = table(&fx, &["a"]).await;
        assert_eq!(session.start().await, Err(Rejection::NotEnoughPlayers));
        session.seat(patron("b"), 50).await.unwrap();
        session.start().await.unwrap();
        assert_eq!(session.start().await, Err(Rejection::AlreadyRunning));
    }

    #[tokio::test]
    async fn dissolve_settles_everyone_once() {
        let fx = Fixture::new();
        let session = table(&fx, &["a", "b"]).await;
        session.dissolve().await;
        session.dissolve().await;
        assert_eq!(session.seated().await, 0);
        assert_eq!(fx.ledger.total().await, 200);
    }

    #[tokio::test(start_paused = true)]
    async fn moves_from_the_wrong_seat_are_refused() {
        let fx = Fixture::new();
        let session = table(&fx, &["a", "b"]).await;
        session.start().await.unwrap();
        tokio::spawn(session.clone().run());
        tokio::time::sleep(Duration::from_secs(1)).await;
        let current = session
            .state
            .lock()
            .await
            .rules
            .current()
            .map(|s| s.id().clone())
            .unwrap();
        let other = ["a", "b"]
            .iter()
            .map(|id| patron(id).id)
            .find(|id| *id != current)
            .unwrap();
        let fold = Move {
            verb: Verb::Act(Action::Fold),
            amount: None,
        };
        assert!(!session.offer(&other, fold.clone()).await);
        assert!(session.offer(&current, fold).await);
        tokio::time::sleep(Duration::from_secs(1)).await;
        fx.notifier.flush().await;
        assert!(fx.said(session.channel()).iter().any(|t| t.starts_with("Results:")));
    }
}
