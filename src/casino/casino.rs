use super::*;
use crate::ChannelId;
use crate::Chips;
use crate::MIN_BIG_STAKE;
use crate::MIN_SMALL_STAKE;
use crate::PlayerId;
use crate::Rejection;
use crate::SessionId;
use crate::ledger::Ledger;
use crate::rules::Config;
use crate::rules::Dealer;
use crate::session::*;
use crate::transport::Notifier;
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::oneshot;

/// Owns every live session, keyed by channel.
///
/// Only [`Casino::handle`] touches the session table, one event at a time.
/// Sessions report back through the same queue when their round loop ends.
pub struct Casino {
    house: House,
    dealer: Arc<dyn Dealer>,
    sessions: HashMap<ChannelId, Arc<Session>>,
    count: SessionId,
    inbox: UnboundedReceiver<Event>,
    draining: Option<oneshot::Sender<()>>,
}

impl Casino {
    pub fn new(
        ledger: Arc<Ledger>,
        notifier: Notifier,
        dealer: Arc<dyn Dealer>,
        timing: Timing,
    ) -> Self {
        let (door, inbox) = Door::channel();
        Self {
            house: House {
                ledger,
                notifier,
                door,
                timing,
            },
            dealer,
            sessions: HashMap::new(),
            count: 0,
            inbox,
            draining: None,
        }
    }

    pub fn door(&self) -> Door {
        self.house.door.clone()
    }

    /// Process events until a shutdown request sees the last table go.
    pub async fn run(mut self) {
        log::info!("[casino] open");
        while let Some(event) = self.inbox.recv().await {
            if self.handle(event).await.is_break() {
                break;
            }
        }
        log::info!("[casino] closed");
    }

    pub async fn handle(&mut self, event: Event) -> ControlFlow<()> {
        let (channel, result) = match event {
            Event::CreateSession {
                channel,
                patron,
                buy_in,
                small,
                big,
            } => {
                let result = self.create(&channel, patron, buy_in, small, big).await;
                (channel, result)
            }
            Event::AddPlayer {
                channel,
                patron,
                buy_in,
            } => {
                let result = self.join(&channel, patron, buy_in).await;
                (channel, result)
            }
            Event::RemovePlayer { channel, player } => {
                let result = self.leave(&channel, &player).await;
                (channel, result)
            }
            Event::Action {
                channel,
                player,
                mv,
            } => {
                self.act(&channel, &player, mv).await;
                return ControlFlow::Continue(());
            }
            Event::StartSession { channel, player } => {
                let result = self.start(&channel, &player).await;
                (channel, result)
            }
            Event::StopSessionAfterRound { channel, player } => {
                let result = self.stop(&channel, &player).await;
                (channel, result)
            }
            Event::DestroySession { channel, session } => {
                self.destroy(&channel, session).await;
                return self.settled();
            }
            Event::ChangeSettings {
                channel,
                player,
                settings,
            } => {
                let result = self.configure(&channel, &player, &settings).await;
                (channel, result)
            }
            Event::KickPlayer {
                channel,
                player,
                target,
            } => {
                let result = self.kick(&channel, &player, &target).await;
                (channel, result)
            }
            Event::BanPlayer {
                channel,
                player,
                target,
            } => {
                let result = self.ban(&channel, &player, &target).await;
                (channel, result)
            }
            Event::PrintInfo { channel } => {
                let result = self.info(&channel).await;
                (channel, result)
            }
            Event::ShutdownRequest { done } => return self.shutdown(done).await,
        };
        if let Err(rejection) = result {
            log::debug!("[casino] {} rejected: {}", channel, rejection);
            self.house.notifier.send(&channel, rejection.to_string());
        }
        ControlFlow::Continue(())
    }
}

impl Casino {
    fn session(&self, channel: &ChannelId) -> Result<Arc<Session>, Rejection> {
        self.sessions
            .get(channel)
            .cloned()
            .ok_or(Rejection::NoSession)
    }

    fn open(&self) -> Result<(), Rejection> {
        match self.draining {
            Some(_) => Err(Rejection::ShuttingDown),
            None => Ok(()),
        }
    }

    async fn create(
        &mut self,
        channel: &ChannelId,
        patron: Patron,
        buy_in: Chips,
        small: Chips,
        big: Chips,
    ) -> Result<(), Rejection> {
        self.open()?;
        if self.sessions.contains_key(channel) {
            return Err(Rejection::SessionExists);
        }
        let small = small.max(MIN_SMALL_STAKE);
        let big = if big < 1 { MIN_BIG_STAKE } else { big };
        let ledger = &self.house.ledger;
        ledger.debit(&patron.id, &patron.name, buy_in).await?;
        self.count += 1;
        let rules = self.dealer.table(Config::new(small, big));
        let session = Arc::new(Session::new(
            self.count,
            channel.clone(),
            self.house.clone(),
            rules,
            patron.clone(),
        ));
        if let Err(rejection) = session.seat(patron.clone(), buy_in).await {
            ledger.credit(&patron.id, &patron.name, buy_in).await;
            return Err(rejection);
        }
        self.sessions.insert(channel.clone(), session);
        log::info!(
            "[casino] {} opened table {} in {} ({}/{})",
            patron.name,
            self.count,
            channel,
            small,
            big
        );
        self.house.notifier.send(
            channel,
            "Created table, get atleast 2 people to join and then type !start",
        );
        Ok(())
    }

    async fn join(
        &mut self,
        channel: &ChannelId,
        patron: Patron,
        buy_in: Chips,
    ) -> Result<(), Rejection> {
        self.open()?;
        let session = self.session(channel)?;
        if session.is_banned(&patron.id).await {
            return Err(Rejection::Banned);
        }
        let ledger = &self.house.ledger;
        ledger.debit(&patron.id, &patron.name, buy_in).await?;
        match session.seat(patron.clone(), buy_in).await {
            Ok(seat) => {
                self.house
                    .notifier
                    .send(channel, format!("{} joined at seat {}", patron.name, seat));
                Ok(())
            }
            Err(rejection) => {
                ledger.credit(&patron.id, &patron.name, buy_in).await;
                Err(rejection)
            }
        }
    }

    async fn leave(&mut self, channel: &ChannelId, player: &PlayerId) -> Result<(), Rejection> {
        let session = self.session(channel)?;
        let departure = session.remove_player(player, false).await?;
        self.departed(channel, departure).await;
        Ok(())
    }

    async fn act(&mut self, channel: &ChannelId, player: &PlayerId, mv: Move) {
        let accepted = match self.sessions.get(channel) {
            Some(session) => session.offer(player, mv).await,
            None => false,
        };
        if !accepted {
            log::debug!("[casino] dropped move from {} in {}", player, channel);
        }
    }

    async fn start(&mut self, channel: &ChannelId, player: &PlayerId) -> Result<(), Rejection> {
        self.open()?;
        let session = self.session(channel)?;
        session.start().await?;
        log::info!("[casino] {} started table {}", player, session.id());
        tokio::spawn(session.run());
        Ok(())
    }

    async fn stop(&mut self, channel: &ChannelId, player: &PlayerId) -> Result<(), Rejection> {
        let session = self.session(channel)?;
        if !session.stop_after_round(player).await? {
            self.close(channel).await;
        }
        Ok(())
    }

    async fn configure(
        &mut self,
        channel: &ChannelId,
        player: &PlayerId,
        settings: &[(String, String)],
    ) -> Result<(), Rejection> {
        let session = self.session(channel)?;
        session.change_settings(player, settings).await?;
        let info = session.info().await;
        self.house
            .notifier
            .send(channel, format!("Updated settings\n{}", info));
        Ok(())
    }

    async fn kick(
        &mut self,
        channel: &ChannelId,
        player: &PlayerId,
        target: &PlayerId,
    ) -> Result<(), Rejection> {
        let session = self.session(channel)?;
        let departure = session.kick(player, target).await?;
        self.departed(channel, departure).await;
        Ok(())
    }

    async fn ban(
        &mut self,
        channel: &ChannelId,
        player: &PlayerId,
        target: &PlayerId,
    ) -> Result<(), Rejection> {
        let session = self.session(channel)?;
        if let Some(departure) = session.ban(player, target).await? {
            self.departed(channel, departure).await;
        }
        Ok(())
    }

    async fn info(&mut self, channel: &ChannelId) -> Result<(), Rejection> {
        let session = self.session(channel)?;
        let info = session.info().await;
        self.house.notifier.send(channel, info);
        Ok(())
    }

    /// An idle table left empty goes away. A running one finds out on its
    /// next step and reports back.
    async fn departed(&mut self, channel: &ChannelId, departure: Departure) {
        if let Departure::Stood {
            remaining: 0,
            running: false,
        } = departure
        {
            self.close(channel).await;
        }
    }

    /// Drop the table, settling anyone still seated.
    async fn close(&mut self, channel: &ChannelId) {
        if let Some(session) = self.sessions.remove(channel) {
            session.dissolve().await;
            log::info!("[casino] closed table {} in {}", session.id(), channel);
            self.house.notifier.send(channel, "Destroyed table baibai");
        }
    }

    /// Ignores reports from a table that was already replaced.
    async fn destroy(&mut self, channel: &ChannelId, id: SessionId) {
        match self.sessions.get(channel).map(|s| s.id()) {
            Some(current) if current == id => self.close(channel).await,
            _ => log::debug!("[casino] stale destroy for table {} in {}", id, channel),
        }
    }

    /// Settle idle tables now and let running ones finish their hand.
    async fn shutdown(&mut self, done: oneshot::Sender<()>) -> ControlFlow<()> {
        log::info!("[casino] draining {} tables", self.sessions.len());
        self.draining = Some(done);
        let channels = self.sessions.keys().cloned().collect::<Vec<_>>();
        for channel in channels {
            let Ok(session) = self.session(&channel) else {
                continue;
            };
            if !session.drain().await {
                self.close(&channel).await;
            }
        }
        self.settled()
    }

    /// Confirm a pending shutdown once the last table is gone.
    fn settled(&mut self) -> ControlFlow<()> {
        if !self.sessions.is_empty() {
            return ControlFlow::Continue(());
        }
        match self.draining.take() {
            Some(done) => {
                log::info!("[casino] all tables settled");
                let _ = done.send(());
                ControlFlow::Break(())
            }
            None => ControlFlow::Continue(()),
        }
    }
}
