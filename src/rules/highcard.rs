use super::*;
use crate::Chips;
use crate::PlayerId;
use crate::Position;
use crate::cards::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Arc;

/// Where a hand stands between engine steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Street {
    Idle,
    Betting,
    Dealing,
    Showdown,
}

/// Per-seat hand state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Waiting,
    Betting,
    Shoving,
    Folded,
}

struct Chair {
    player: Arc<dyn Identity>,
    stack: Chips,
    /// committed in the betting round, blinds included
    stake: Chips,
    /// everything put in this hand, antes included
    spent: Chips,
    hole: Vec<Card>,
    state: State,
    acted: bool,
}

impl Chair {
    fn new(player: Arc<dyn Identity>, stack: Chips) -> Self {
        Self {
            player,
            stack,
            stake: 0,
            spent: 0,
            hole: Vec::new(),
            state: State::Waiting,
            acted: false,
        }
    }
    fn is_contending(&self) -> bool {
        matches!(self.state, State::Betting | State::Shoving)
    }
    /// Hole ranks, best first. Compared lexicographically at showdown.
    fn strength(&self) -> Vec<Rank> {
        let mut ranks = self.hole.iter().map(Card::rank).collect::<Vec<_>>();
        ranks.sort_by(|a, b| b.cmp(a));
        ranks
    }
}

/// Built-in engine: blinds and antes, a single betting round, a board
/// revealed 3-1-1, and a showdown won by the highest hole cards.
///
/// Pots are settled in contribution layers so a short all-in only contests
/// what it could match, and chips are never created or lost.
pub struct HighCard {
    config: Config,
    chairs: Vec<Option<Chair>>,
    street: Street,
    deck: Deck,
    board: Vec<Card>,
    button: Position,
    ticker: Option<Position>,
    pot: Chips,
    /// chips left in the pot by players who stood up mid-hand
    dead: Chips,
    /// highest stake in the betting round
    stake: Chips,
    /// size of the last full raise
    raise: Chips,
    rng: SmallRng,
}

impl HighCard {
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, SmallRng::from_os_rng())
    }
    pub fn seeded(config: Config, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
    fn with_rng(config: Config, mut rng: SmallRng) -> Self {
        Self {
            chairs: (0..config.seats).map(|_| None).collect(),
            street: Street::Idle,
            deck: Deck::shuffled(&mut rng),
            board: Vec::new(),
            button: 0,
            ticker: None,
            pot: 0,
            dead: 0,
            stake: 0,
            raise: 0,
            config,
            rng,
        }
    }
}

impl Rules for HighCard {
    fn config(&self) -> Config {
        self.config
    }
    fn set_config(&mut self, config: Config) -> Result<(), RulesError> {
        if config.seats == 0 {
            return Err(RulesError::InvalidConfig("a table needs at least one seat".into()));
        }
        if self.street != Street::Idle {
            return Err(RulesError::InvalidConfig("a hand is in progress".into()));
        }
        if let Some(seat) = (config.seats..self.chairs.len()).find(|i| self.chairs[*i].is_some()) {
            return Err(RulesError::InvalidConfig(format!("seat {} is occupied", seat)));
        }
        self.chairs.resize_with(config.seats, || None);
        self.config = config;
        Ok(())
    }

    fn sit(
        &mut self,
        player: Arc<dyn Identity>,
        seat: Position,
        buy_in: Chips,
    ) -> Result<(), RulesError> {
        if seat >= self.chairs.len() {
            return Err(RulesError::NoSuchSeat(seat));
        }
        if self.position(player.id()).is_some() {
            return Err(RulesError::AlreadySeated);
        }
        if self.chairs[seat].is_some() {
            return Err(RulesError::SeatOccupied(seat));
        }
        if buy_in == 0 {
            return Err(RulesError::InvalidBuyIn);
        }
        self.chairs[seat] = Some(Chair::new(player, buy_in));
        Ok(())
    }

    fn stand(&mut self, player: &PlayerId) -> Option<Chips> {
        let seat = self.position(player)?;
        let chair = self.chairs[seat].take()?;
        if self.street == Street::Idle {
            return Some(chair.stack);
        }
        self.dead += chair.spent;
        if chair.is_contending() && self.contenders().is_empty() {
            log::debug!("[highcard] last contender left, returning the pot");
            let pot = self.pot;
            self.reset();
            return Some(chair.stack + pot);
        }
        match self.street {
            Street::Betting if self.ticker == Some(seat) || self.contenders().len() <= 1 => {
                self.proceed(seat)
            }
            Street::Dealing if self.contenders().len() <= 1 => self.street = Street::Showdown,
            _ => {}
        }
        Some(chair.stack)
    }

    fn next(&mut self) -> Advance {
        match self.street {
            Street::Idle => self.commence(),
            Street::Betting => {
                if self.ticker.is_none() {
                    self.proceed(self.button);
                }
                Advance::default()
            }
            Street::Dealing => self.reveal(),
            Street::Showdown => self.settle(),
        }
    }

    fn act(&mut self, action: Action, chips: Chips) -> Result<(), RulesError> {
        let seat = self.ticker.ok_or(RulesError::NotWaiting)?;
        if !self.valid_actions().contains(&action) {
            return Err(RulesError::IllegalAction(action));
        }
        match action {
            Action::Fold => self.chair_mut(seat).state = State::Folded,
            Action::Check => {}
            Action::Call => self.commit(seat, self.outstanding()),
            Action::Bet | Action::Raise => {
                let (min, max) = (self.min_raise(), self.max_raise());
                let stack = self.chair(seat).stack;
                if chips > max || (chips < min && chips != stack) {
                    return Err(RulesError::InvalidAmount { min, max });
                }
                self.commit(seat, chips);
                let stake = self.chair(seat).stake;
                if stake > self.stake {
                    self.raise = self.raise.max(stake - self.stake);
                    self.stake = stake;
                    self.chairs
                        .iter_mut()
                        .enumerate()
                        .filter(|(i, _)| *i != seat)
                        .filter_map(|(_, c)| c.as_mut())
                        .for_each(|c| c.acted = false);
                }
            }
        }
        let chair = self.chair_mut(seat);
        chair.acted = true;
        if chair.stack == 0 && chair.state == State::Betting {
            chair.state = State::Shoving;
        }
        self.proceed(seat);
        Ok(())
    }

    fn players(&self) -> Vec<Seated> {
        self.chairs
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| Self::seated(i, c)))
            .collect()
    }
    fn current(&self) -> Option<Seated> {
        self.ticker
            .and_then(|i| self.chairs.get(i)?.as_ref().map(|c| Self::seated(i, c)))
    }
    fn valid_actions(&self) -> Vec<Action> {
        let Some(seat) = self.ticker else {
            return Vec::new();
        };
        let chair = self.chair(seat);
        let owed = self.stake.saturating_sub(chair.stake);
        let raisable = self
            .chairs
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != seat)
            .filter_map(|(_, c)| c.as_ref())
            .any(|c| c.state == State::Betting);
        let mut options = Vec::new();
        if owed > 0 {
            options.push(Action::Fold);
            options.push(Action::Call);
            if chair.stack > owed && raisable {
                options.push(Action::Raise);
            }
        } else {
            options.push(Action::Check);
            if chair.stack > 0 && raisable {
                options.push(if self.stake == 0 {
                    Action::Bet
                } else {
                    Action::Raise
                });
            }
        }
        options
    }
    fn outstanding(&self) -> Chips {
        self.ticker
            .map(|i| self.chair(i))
            .map(|c| self.stake.saturating_sub(c.stake).min(c.stack))
            .unwrap_or(0)
    }
    fn min_raise(&self) -> Chips {
        let Some(seat) = self.ticker else {
            return 0;
        };
        let chair = self.chair(seat);
        let owed = self.stake.saturating_sub(chair.stake);
        let step = match self.config.limit {
            Limit::FixedLimit => self.config.stakes.big.max(1),
            Limit::NoLimit | Limit::PotLimit => self.raise.max(self.config.stakes.big).max(1),
        };
        (owed + step).min(chair.stack)
    }
    fn max_raise(&self) -> Chips {
        let Some(seat) = self.ticker else {
            return 0;
        };
        let chair = self.chair(seat);
        let owed = self.stake.saturating_sub(chair.stake);
        let max = match self.config.limit {
            Limit::NoLimit => chair.stack,
            Limit::PotLimit => (owed + self.pot + owed).min(chair.stack),
            Limit::FixedLimit => self.min_raise(),
        };
        max.max(self.min_raise())
    }
    fn pot(&self) -> Chips {
        self.pot
    }
    fn board(&self) -> Vec<Card> {
        self.board.clone()
    }
}

impl HighCard {
    /// Start a hand: rotate the button, deal hole cards, post antes and blinds.
    fn commence(&mut self) -> Advance {
        let eligible = self
            .chairs
            .iter()
            .filter_map(|c| c.as_ref())
            .filter(|c| c.stack > 0)
            .count();
        if eligible < 2 {
            return Advance::done();
        }
        self.reset();
        self.button = self
            .after(self.button, |c| c.stack > 0)
            .unwrap_or(self.button);
        self.deck = Deck::shuffled(&mut self.rng);
        for seat in self.order(self.button) {
            let deck = &mut self.deck;
            if let Some(chair) = self.chairs[seat].as_mut().filter(|c| c.stack > 0) {
                chair.state = State::Betting;
                chair.hole = deck.deal(2);
            }
        }
        let stakes = self.config.stakes;
        for seat in self.order(self.button) {
            if self.chairs[seat].as_ref().is_some_and(Chair::is_contending) {
                self.ante(seat, stakes.ante);
            }
        }
        let small = match eligible {
            2 => self.button,
            _ => self
                .after(self.button, |c| c.state == State::Betting)
                .unwrap_or(self.button),
        };
        let big = self
            .after(small, |c| c.is_contending())
            .unwrap_or(small);
        self.blind(small, stakes.small);
        self.blind(big, stakes.big);
        self.stake = self
            .chairs
            .iter()
            .filter_map(|c| c.as_ref())
            .map(|c| c.stake)
            .max()
            .unwrap_or(0);
        self.raise = stakes.big.max(1);
        self.street = Street::Betting;
        log::debug!("[highcard] hand dealt, button at seat {}", self.button);
        self.proceed(big);
        Advance::default()
    }

    /// Deal the next board increment.
    fn reveal(&mut self) -> Advance {
        let n = if self.board.is_empty() { 3 } else { 1 };
        let cards = self.deck.deal(n);
        self.board.extend(cards);
        if self.board.len() >= 5 {
            self.street = Street::Showdown;
        }
        Advance::default()
    }

    /// Award the pot layer by layer and close the hand.
    fn settle(&mut self) -> Advance {
        let contenders = self.contenders();
        let showdown = contenders.len() > 1;
        let mut won = vec![0; self.chairs.len()];
        match contenders.as_slice() {
            [] => {
                log::error!("[highcard] settling without contenders, refunding stakes");
                for (i, chair) in self.chairs.iter().enumerate() {
                    if let Some(chair) = chair {
                        won[i] = chair.spent;
                    }
                }
                match self.after(self.button, |c| c.state != State::Waiting) {
                    Some(first) => won[first] += self.dead,
                    None => log::error!("[highcard] nobody dealt in to take {} dead", self.dead),
                }
            }
            [only] => won[*only] = self.pot,
            _ => {
                let mut levels = contenders
                    .iter()
                    .map(|i| self.chair(*i).spent)
                    .collect::<Vec<_>>();
                levels.sort();
                levels.dedup();
                let mut floor = 0;
                let mut dead = self.dead;
                for (n, level) in levels.iter().copied().enumerate() {
                    let top = n + 1 == levels.len();
                    let slice = self
                        .chairs
                        .iter()
                        .filter_map(|c| c.as_ref())
                        .map(|c| match top {
                            true => c.spent.saturating_sub(floor),
                            false => c.spent.min(level).saturating_sub(floor),
                        })
                        .sum::<Chips>()
                        + std::mem::take(&mut dead);
                    let eligible = self
                        .order(self.button)
                        .into_iter()
                        .filter(|i| contenders.contains(i))
                        .filter(|i| self.chair(*i).spent >= level)
                        .collect::<Vec<_>>();
                    let best = eligible
                        .iter()
                        .map(|i| self.chair(*i).strength())
                        .max()
                        .unwrap_or_default();
                    let winners = eligible
                        .into_iter()
                        .filter(|i| self.chair(*i).strength() == best)
                        .collect::<Vec<_>>();
                    let share = slice / winners.len() as Chips;
                    let spare = slice % winners.len() as Chips;
                    for (k, i) in winners.iter().enumerate() {
                        won[*i] += share + if (k as Chips) < spare { 1 } else { 0 };
                    }
                    floor = level;
                }
            }
        }
        let outcomes = self
            .chairs
            .iter_mut()
            .enumerate()
            .filter_map(|(i, c)| c.as_mut().map(|c| (i, c)))
            .filter(|(_, c)| c.state != State::Waiting)
            .map(|(i, chair)| {
                chair.stack += won[i];
                Outcome {
                    seat: i,
                    player: chair.player.clone(),
                    won: won[i],
                    shown: match showdown && chair.is_contending() {
                        true => chair.hole.clone(),
                        false => Vec::new(),
                    },
                }
            })
            .collect::<Vec<_>>();
        self.reset();
        Advance::results(outcomes)
    }

    /// Hand the decision to the next seat that still owes one, or close the
    /// betting round.
    fn proceed(&mut self, from: Position) {
        if self.contenders().len() <= 1 {
            self.ticker = None;
            self.street = Street::Showdown;
            return;
        }
        let stake = self.stake;
        match self.after(from, |c| {
            c.state == State::Betting && (!c.acted || c.stake < stake)
        }) {
            Some(seat) => self.ticker = Some(seat),
            None => {
                self.ticker = None;
                self.street = Street::Dealing;
            }
        }
    }

    fn reset(&mut self) {
        self.street = Street::Idle;
        self.ticker = None;
        self.board.clear();
        self.pot = 0;
        self.dead = 0;
        self.stake = 0;
        for chair in self.chairs.iter_mut().filter_map(|c| c.as_mut()) {
            chair.stake = 0;
            chair.spent = 0;
            chair.acted = false;
            chair.hole.clear();
            chair.state = State::Waiting;
        }
    }

    fn commit(&mut self, seat: Position, chips: Chips) {
        let chair = self.chair_mut(seat);
        let chips = chips.min(chair.stack);
        chair.stack -= chips;
        chair.stake += chips;
        chair.spent += chips;
        self.pot += chips;
    }
    fn blind(&mut self, seat: Position, chips: Chips) {
        self.commit(seat, chips);
        let chair = self.chair_mut(seat);
        if chair.stack == 0 {
            chair.state = State::Shoving;
        }
    }
    fn ante(&mut self, seat: Position, chips: Chips) {
        let chair = self.chair_mut(seat);
        let chips = chips.min(chair.stack);
        chair.stack -= chips;
        chair.spent += chips;
        if chair.stack == 0 {
            chair.state = State::Shoving;
        }
        self.pot += chips;
    }
}

impl HighCard {
    fn seated(seat: Position, chair: &Chair) -> Seated {
        Seated {
            seat,
            player: chair.player.clone(),
            chips: chair.stack,
            out: !chair.is_contending(),
            hole: chair.hole.clone(),
        }
    }
    fn position(&self, player: &PlayerId) -> Option<Position> {
        self.chairs
            .iter()
            .position(|c| c.as_ref().is_some_and(|c| c.player.id() == player))
    }
    fn contenders(&self) -> Vec<Position> {
        self.chairs
            .iter()
            .enumerate()
            .filter(|(_, c)| c.as_ref().is_some_and(Chair::is_contending))
            .map(|(i, _)| i)
            .collect()
    }
    /// Seats clockwise starting after `from`, ending with `from` itself.
    fn order(&self, from: Position) -> Vec<Position> {
        let n = self.chairs.len();
        (1..=n).map(|k| (from + k) % n).collect()
    }
    fn after<F>(&self, from: Position, f: F) -> Option<Position>
    where
        F: Fn(&Chair) -> bool,
    {
        self.order(from)
            .into_iter()
            .find(|i| self.chairs[*i].as_ref().is_some_and(&f))
    }
    fn chair(&self, seat: Position) -> &Chair {
        self.chairs[seat]
            .as_ref()
            .expect("ticker and contenders only point at occupied seats")
    }
    fn chair_mut(&mut self, seat: Position) -> &mut Chair {
        self.chairs[seat]
            .as_mut()
            .expect("ticker and contenders only point at occupied seats")
    }
}

/// Hands out [`HighCard`] tables, optionally from a fixed seed.
#[derive(Debug, Default, Clone)]
pub struct HighCardDealer {
    seed: Option<u64>,
}

impl HighCardDealer {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl Dealer for HighCardDealer {
    fn table(&self, config: Config) -> Box<dyn Rules> {
        match self.seed {
            Some(seed) => Box::new(HighCard::seeded(config, seed)),
            None => Box::new(HighCard::new(config)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::stub;

    fn table(seats: usize) -> HighCard {
        HighCard::seeded(
            Config {
                seats,
                ..Config::new(1, 2)
            },
            11,
        )
    }
    fn total(t: &HighCard) -> Chips {
        t.players().iter().map(|p| p.chips).sum::<Chips>() + t.pot()
    }
    fn heads_up() -> HighCard {
        let mut t = table(2);
        t.sit(stub("a"), 0, 100).unwrap();
        t.sit(stub("b"), 1, 100).unwrap();
        t
    }

    #[test]
    fn sit_distinguishes_occupied_seats() {
        let mut t = table(2);
        t.sit(stub("a"), 0, 100).unwrap();
        assert_eq!(t.sit(stub("b"), 0, 100), Err(RulesError::SeatOccupied(0)));
        assert_eq!(t.sit(stub("a"), 1, 100), Err(RulesError::AlreadySeated));
        assert_eq!(t.sit(stub("b"), 2, 100), Err(RulesError::NoSuchSeat(2)));
        assert_eq!(t.sit(stub("b"), 1, 0), Err(RulesError::InvalidBuyIn));
    }

    #[test]
    fn lone_player_cannot_start_a_hand() {
        let mut t = table(2);
        t.sit(stub("a"), 0, 100).unwrap();
        assert!(t.next().done);
    }

    #[test]
    fn heads_up_button_posts_small_and_acts_first() {
        let mut t = heads_up();
        let step = t.next();
        assert!(!step.done && step.results.is_none());
        assert_eq!(t.pot(), 3);
        let current = t.current().unwrap();
        assert_eq!(current.seat, 1);
        assert_eq!(t.outstanding(), 1);
        assert_eq!(
            t.valid_actions(),
            vec![Action::Fold, Action::Call, Action::Raise]
        );
        assert!(t.players().iter().all(|p| p.hole.len() == 2));
    }

    #[test]
    fn refund_without_contenders_keeps_dead_money() {
        let mut t = heads_up();
        t.next();
        t.dead += 5;
        t.pot += 5;
        for chair in t.chairs.iter_mut().flatten() {
            chair.state = State::Folded;
        }
        assert_eq!(total(&t), 205);
        let results = t.settle().results.unwrap();
        assert_eq!(results.iter().map(|o| o.won).sum::<Chips>(), 8);
        assert_eq!(total(&t), 205);
    }

    #[test]
    fn fold_hands_the_pot_over() {
        let mut t = heads_up();
        t.next();
        t.act(Action::Fold, 0).unwrap();
        assert!(t.current().is_none());
        let results = t.next().results.unwrap();
        let winner = results.iter().find(|o| o.won > 0).unwrap();
        assert_eq!(winner.seat, 0);
        assert_eq!(winner.won, 3);
        assert!(winner.shown.is_empty());
        assert_eq!(total(&t), 200);
    }

    #[test]
    fn checked_down_hand_reveals_board_in_increments() {
        let mut t = heads_up();
        t.next();
        t.act(Action::Call, 0).unwrap();
        assert_eq!(t.valid_actions(), vec![Action::Check, Action::Raise]);
        t.act(Action::Check, 0).unwrap();
        assert!(t.current().is_none());
        t.next();
        assert_eq!(t.board().len(), 3);
        t.next();
        assert_eq!(t.board().len(), 4);
        t.next();
        assert_eq!(t.board().len(), 5);
        let results = t.next().results.unwrap();
        assert_eq!(results.iter().map(|o| o.won).sum::<Chips>(), 4);
        assert!(results.iter().all(|o| o.shown.len() == 2));
        assert_eq!(total(&t), 200);
        assert!(t.board().is_empty());
    }

    #[test]
    fn raise_bounds_follow_the_limit() {
        let mut t = heads_up();
        t.next();
        assert_eq!(t.min_raise(), 3);
        assert_eq!(t.max_raise(), 99);
        assert_eq!(
            t.act(Action::Raise, 2),
            Err(RulesError::InvalidAmount { min: 3, max: 99 })
        );
        t.act(Action::Raise, 3).unwrap();
        assert_eq!(t.current().unwrap().seat, 0);
        assert_eq!(t.outstanding(), 2);

        let mut t = HighCard::seeded(
            Config {
                seats: 2,
                limit: Limit::PotLimit,
                ..Config::new(1, 2)
            },
            3,
        );
        t.sit(stub("a"), 0, 100).unwrap();
        t.sit(stub("b"), 1, 100).unwrap();
        t.next();
        assert_eq!(t.max_raise(), 5);

        let mut t = HighCard::seeded(
            Config {
                seats: 2,
                limit: Limit::FixedLimit,
                ..Config::new(1, 2)
            },
            3,
        );
        t.sit(stub("a"), 0, 100).unwrap();
        t.sit(stub("b"), 1, 100).unwrap();
        t.next();
        assert_eq!(t.min_raise(), t.max_raise());
    }

    #[test]
    fn standing_mid_hand_forfeits_committed_chips() {
        let mut t = heads_up();
        t.next();
        let b = t.current().unwrap();
        let a = t.players().into_iter().find(|p| p.seat != b.seat).unwrap();
        assert_eq!(t.stand(a.id()), Some(98));
        assert!(t.current().is_none());
        let results = t.next().results.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].won, 3);
        assert_eq!(t.players()[0].chips + 98, 200);
    }

    #[test]
    fn last_contender_standing_takes_the_pot() {
        let mut t = heads_up();
        t.next();
        t.act(Action::Fold, 0).unwrap();
        let stayer = PlayerId::from("a");
        assert_eq!(t.stand(&stayer), Some(98 + 3));
        assert_eq!(t.players()[0].chips + 101, 200);
        assert!(t.next().done);
    }

    #[test]
    fn shrinking_seats_keeps_occupied_ones() {
        let mut t = table(3);
        t.sit(stub("a"), 2, 100).unwrap();
        let config = Config {
            seats: 2,
            ..t.config()
        };
        assert!(t.set_config(config).is_err());
        assert!(
            t.set_config(Config {
                seats: 0,
                ..t.config()
            })
            .is_err()
        );
        assert!(
            t.set_config(Config {
                seats: 5,
                ..t.config()
            })
            .is_ok()
        );
        assert_eq!(t.seats(), 5);
    }

    #[test]
    fn uneven_all_ins_conserve_chips() {
        let mut t = HighCard::seeded(
            Config {
                seats: 3,
                stakes: Stakes {
                    small: 1,
                    big: 2,
                    ante: 1,
                },
                ..Config::default()
            },
            5,
        );
        t.sit(stub("a"), 0, 10).unwrap();
        t.sit(stub("b"), 1, 50).unwrap();
        t.sit(stub("c"), 2, 35).unwrap();
        let mut results = None;
        for _ in 0..64 {
            if t.current().is_some() {
                let valid = t.valid_actions();
                if valid.contains(&Action::Raise) {
                    t.act(Action::Raise, t.max_raise()).unwrap();
                } else if valid.contains(&Action::Call) {
                    t.act(Action::Call, 0).unwrap();
                } else {
                    t.act(Action::Check, 0).unwrap();
                }
            } else if let Some(r) = t.next().results {
                results = Some(r);
                break;
            }
        }
        let results = results.expect("hand completes");
        assert_eq!(results.iter().map(|o| o.won).sum::<Chips>(), 95);
        assert_eq!(total(&t), 95);
    }

    #[test]
    fn acting_without_a_pending_decision_fails() {
        let mut t = heads_up();
        assert_eq!(t.act(Action::Check, 0), Err(RulesError::NotWaiting));
    }
}
