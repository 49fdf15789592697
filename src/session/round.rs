use super::*;
use crate::Chips;
use crate::Fault;
use crate::PlayerId;
use crate::Rejection;
use crate::casino::Event;
use crate::rules::Action;
use crate::rules::Identity;
use crate::rules::Outcome;
use crate::rules::Seated;
use std::future::Future;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::MutexGuard;
use tokio::time::Instant;

type Guard<'a> = MutexGuard<'a, State>;

impl Session {
    /// Drive the engine until no further hand can be dealt or a requested
    /// stop reaches a settlement boundary. Every seat is settled on the way
    /// out and the casino is told the table is gone.
    pub async fn run(self: Arc<Self>) {
        log::info!("[session {}] round loop started", self.channel());
        let mut state = self.state.lock().await;
        let mut boundary = true;
        loop {
            if boundary && state.stopping {
                self.notify(farewell(&state));
                break;
            }
            if let Some(seat) = state.rules.current() {
                state = match self.resolve(state, seat).await {
                    ControlFlow::Continue(guard) => guard,
                    ControlFlow::Break(guard) => {
                        state = guard;
                        break;
                    }
                };
            }
            let step = state.rules.next();
            if let Some(error) = &step.error {
                log::warn!("[session {}] engine error: {}", self.channel(), error);
                self.notify(format!("Error: {}", error));
            }
            if step.done {
                let mut text = step
                    .results
                    .as_deref()
                    .map(summary)
                    .map(|s| format!("{}\n", s))
                    .unwrap_or_default();
                text.push_str("Not enough players for another hand, stopping..");
                self.notify(text);
                break;
            }
            match step.results {
                Some(results) => {
                    boundary = true;
                    state.cards_shown = false;
                    state.board_shown = 0;
                    if state.stopping {
                        self.notify(format!("{}\n{}", summary(&results), farewell(&state)));
                        break;
                    }
                    self.notify(format!(
                        "{}\nStarting next hand in {} seconds",
                        summary(&results),
                        self.house.timing.cooldown.as_secs()
                    ));
                }
                None => {
                    boundary = false;
                    self.reveal(&mut state);
                }
            }
            self.release_leavers(&mut state, boundary).await;
            if boundary {
                let cooldown = self.house.timing.cooldown;
                state = self.unlocked(state, tokio::time::sleep(cooldown)).await.0;
            } else if !state.cards_shown {
                self.deal_private(&mut state);
            }
        }
        self.settle_all(&mut state).await;
        state.running = false;
        self.notify("Stopped table");
        drop(state);
        {
            let mut inbox = self.inbox.lock().await;
            while inbox.try_recv().is_ok() {}
        }
        log::info!("[session {}] round loop finished", self.channel());
        self.house.door.send(Event::DestroySession {
            channel: self.channel().clone(),
            session: self.id(),
        });
    }

    /// Release the session lock for the duration of `fut`.
    ///
    /// Nothing owned by the session may be read or written until the guard
    /// comes back; the casino is free to take the lock in between.
    async fn unlocked<'a, F, T>(&'a self, guard: Guard<'a>, fut: F) -> (Guard<'a>, T)
    where
        F: Future<Output = T>,
    {
        drop(guard);
        let out = fut.await;
        (self.state.lock().await, out)
    }

    /// Collect a decision for the seat to act, or fall back once the turn
    /// times out. The turn is abandoned if the seat changes hands meanwhile.
    /// Breaks when the seat can neither act nor be stood up.
    async fn resolve<'a>(
        &'a self,
        mut state: Guard<'a>,
        seat: Seated,
    ) -> ControlFlow<Guard<'a>, Guard<'a>> {
        let player = seat.id().clone();
        let Some(occupant) = state.occupants.get(&player).cloned() else {
            log::error!(
                "[session {}] {}",
                self.channel(),
                Fault::UnknownOccupant(player.clone())
            );
            let action = fallback(&state.rules.valid_actions());
            if let Err(e) = state.rules.act(action, 0) {
                log::error!("[session {}] could not skip seat: {}", self.channel(), e);
                let Some(chips) = state.rules.stand(&player) else {
                    return ControlFlow::Break(state);
                };
                self.house.ledger.credit(&player, seat.name(), chips).await;
                log::warn!("[session {}] stood {} up with {}", self.channel(), player, chips);
            }
            return ControlFlow::Continue(state);
        };
        self.prompt(&state, &seat);
        {
            let mut inbox = self.inbox.lock().await;
            while inbox.try_recv().is_ok() {}
        }
        let deadline = Instant::now() + self.house.timing.turn;
        loop {
            let (guard, play) = self.unlocked(state, self.wait(deadline)).await;
            state = guard;
            if !state.rules.current().is_some_and(|s| *s.id() == player) {
                log::debug!("[session {}] turn for {} abandoned", self.channel(), player);
                return ControlFlow::Continue(state);
            }
            let mv = match play {
                None => {
                    let action = fallback(&state.rules.valid_actions());
                    self.notify(format!("{} ran out of time: {}", occupant.name(), action));
                    if let Err(e) = state.rules.act(action, 0) {
                        log::error!("[session {}] timeout {}: {}", self.channel(), action, e);
                    }
                    return ControlFlow::Continue(state);
                }
                Some(Play::Move { player: who, mv }) if who == player => mv,
                Some(_) => continue,
            };
            match decide(&state, &mv) {
                Ok((action, chips)) => match state.rules.act(action, chips) {
                    Ok(()) => return ControlFlow::Continue(state),
                    Err(e) => self.notify(format!("Error: {}", e)),
                },
                Err(rejection) => self.notify(rejection.to_string()),
            }
        }
    }

    async fn wait(&self, deadline: Instant) -> Option<Play> {
        let mut inbox = self.inbox.lock().await;
        tokio::time::timeout_at(deadline, inbox.recv())
            .await
            .ok()
            .flatten()
    }

    fn prompt(&self, state: &State, seat: &Seated) {
        let rules = &state.rules;
        let valid = rules.valid_actions();
        let owed = rules.outstanding();
        let actions = valid
            .iter()
            .map(|a| match a {
                Action::Call => format!("call ({})", owed),
                a => a.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        let mut text = format!("<@{}>'s Turn\nChips: {}\n", seat.id(), seat.chips);
        if valid.iter().any(Action::is_sized) {
            text.push_str(&format!(
                "MinRaise: {}\nMaxRaise: {}\n",
                rules.min_raise().saturating_sub(owed),
                rules.max_raise().saturating_sub(owed)
            ));
        }
        text.push_str(&format!("Actions: {}\nPot: {}", actions, rules.pot()));
        self.notify(text);
    }

    /// Announce each new board increment once.
    fn reveal(&self, state: &mut State) {
        let board = state.rules.board();
        if board.len() > state.board_shown {
            let cards = board
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            self.notify(format!("Board: {}", cards));
            state.board_shown = board.len();
        }
    }

    /// Send each dealt-in seat its hole cards, once per hand.
    fn deal_private(&self, state: &mut State) {
        let dealt = state
            .rules
            .players()
            .into_iter()
            .filter(|s| !s.hole.is_empty())
            .collect::<Vec<_>>();
        if dealt.is_empty() {
            return;
        }
        for seated in dealt {
            let Some(occupant) = state.occupants.get(seated.id()) else {
                log::error!(
                    "[session {}] {}",
                    self.channel(),
                    Fault::UnknownOccupant(seated.id().clone())
                );
                continue;
            };
            let cards = seated
                .hole
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            self.house.notifier.send(
                occupant.private(),
                format!("Your hand at {}: {}", self.channel(), cards),
            );
        }
        state.cards_shown = true;
    }

    /// Stand up whoever asked to leave and is out of the hand, and anyone
    /// left without chips once a hand completes.
    async fn release_leavers(&self, state: &mut State, completed: bool) {
        let leavers = state
            .rules
            .players()
            .into_iter()
            .filter(|s| {
                let leaving = state
                    .occupants
                    .get(s.id())
                    .is_some_and(|o| o.is_leaving());
                (leaving && (s.out || completed)) || (completed && s.chips == 0)
            })
            .map(|s| s.id().clone())
            .collect::<Vec<PlayerId>>();
        for player in leavers {
            self.settle(state, &player).await;
        }
    }
}

/// Timeout decision: fold when allowed, check otherwise.
pub fn fallback(valid: &[Action]) -> Action {
    match valid.contains(&Action::Fold) {
        true => Action::Fold,
        false => Action::Check,
    }
}

/// Turn a typed move into an engine decision. Raise amounts are read as
/// "raise by", so the engine receives the amount plus what is owed.
fn decide(state: &State, mv: &Move) -> Result<(Action, Chips), Rejection> {
    let rules = &state.rules;
    let valid = rules.valid_actions();
    let owed = rules.outstanding();
    let (min, max) = (rules.min_raise(), rules.max_raise());
    let action = match mv.verb {
        Verb::Act(action) => action,
        Verb::AllIn => {
            return [Action::Raise, Action::Bet, Action::Call]
                .into_iter()
                .find(|a| valid.contains(a))
                .map(|a| (a, if a.is_sized() { max } else { 0 }))
                .ok_or(Rejection::IllegalAction);
        }
    };
    if !valid.contains(&action) {
        return Err(Rejection::IllegalAction);
    }
    if !action.is_sized() {
        return Ok((action, 0));
    }
    let amount = mv
        .amount
        .as_deref()
        .ok_or(Rejection::MissingAmount)?
        .parse::<Chips>()
        .map_err(|_| Rejection::MalformedAmount)?;
    let total = amount.saturating_add(owed);
    if total < min || total > max {
        return Err(Rejection::AmountOutOfRange {
            min: min.saturating_sub(owed),
            max: max.saturating_sub(owed),
        });
    }
    Ok((action, total))
}

fn summary(results: &[Outcome]) -> String {
    let lines = results
        .iter()
        .map(|o| o.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    format!("Results:\n{}", lines)
}

fn farewell(state: &State) -> &'static str {
    match state.shutting_down {
        true => "Bot is shutting down",
        false => "Stopping table as requested",
    }
}
