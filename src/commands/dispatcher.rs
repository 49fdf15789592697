use super::*;
use crate::FREE_MONEY;
use crate::PREFIX;
use crate::casino::Door;
use crate::casino::Event;
use crate::ledger::Ledger;
use crate::session::Move;
use crate::session::Patron;
use crate::transport::Notifier;
use std::sync::Arc;

/// Turns chat lines into casino events.
///
/// Wallet queries are answered here directly; everything touching a table
/// goes through the casino's queue.
#[derive(Clone)]
pub struct Dispatcher {
    door: Door,
    ledger: Arc<Ledger>,
    notifier: Notifier,
}

impl Dispatcher {
    pub fn new(door: Door, ledger: Arc<Ledger>, notifier: Notifier) -> Self {
        Self {
            door,
            ledger,
            notifier,
        }
    }

    pub async fn dispatch(&self, message: Message) {
        let content = message.content.trim();
        match content.strip_prefix(PREFIX) {
            Some(line) => match Command::parse_line(line) {
                Ok(command) => self.command(&message, command).await,
                Err(e) => self.reply(&message, e.to_string()),
            },
            None => {
                if let Some(mv) = Move::parse(content) {
                    self.door.send(Event::Action {
                        channel: message.channel.clone(),
                        player: message.author.clone(),
                        mv,
                    });
                }
            }
        }
    }

    async fn command(&self, message: &Message, command: Command) {
        log::debug!("[dispatch] {} in {}: {:?}", message.name, message.channel, command);
        let channel = message.channel.clone();
        let player = message.author.clone();
        let event = match command {
            Command::Stats { user } => return self.stats(message, user).await,
            Command::Freemoney => return self.freemoney(message).await,
            Command::Create { buy_in, small, big } => {
                let Some(patron) = self.patron(message).await else {
                    return;
                };
                Event::CreateSession {
                    channel,
                    patron,
                    buy_in,
                    small,
                    big,
                }
            }
            Command::Join { buy_in } => {
                let Some(patron) = self.patron(message).await else {
                    return;
                };
                Event::AddPlayer {
                    channel,
                    patron,
                    buy_in,
                }
            }
            Command::Start => Event::StartSession { channel, player },
            Command::Leave => Event::RemovePlayer { channel, player },
            Command::Stop => Event::StopSessionAfterRound { channel, player },
            Command::Kick { user } => Event::KickPlayer {
                channel,
                player,
                target: mention(&user),
            },
            Command::Ban { user } => Event::BanPlayer {
                channel,
                player,
                target: mention(&user),
            },
            Command::Settings { pairs: words } => Event::ChangeSettings {
                channel,
                player,
                settings: pairs(&words),
            },
            Command::Info => Event::PrintInfo { channel },
        };
        self.door.send(event);
    }

    /// The author with their direct channel resolved.
    async fn patron(&self, message: &Message) -> Option<Patron> {
        match self.notifier.private(&message.author).await {
            Ok(private) => Some(Patron {
                id: message.author.clone(),
                name: message.name.clone(),
                private,
            }),
            Err(e) => {
                log::warn!("[dispatch] no direct channel to {}: {}", message.author, e);
                self.reply(message, "Couldn't open a direct message to you");
                None
            }
        }
    }

    async fn stats(&self, message: &Message, user: Option<String>) {
        let text = match user.as_deref().map(mention) {
            Some(id) if id != message.author => match self.ledger.balance(&id).await {
                Some(balance) => format!("<@{}> has {} money", id, balance),
                None => format!("<@{}> hasn't played yet", id),
            },
            _ => {
                let account = self.ledger.account(&message.author, &message.name).await;
                let balance = account.lock().await.balance;
                format!("You have {} money", balance)
            }
        };
        self.reply(message, text);
    }

    async fn freemoney(&self, message: &Message) {
        let account = self.ledger.account(&message.author, &message.name).await;
        let mut account = account.lock().await;
        let text = match account.balance < FREE_MONEY {
            true => {
                account.credit(FREE_MONEY);
                log::info!("[dispatch] {} took free money", message.name);
                format!("Here's {}, you now have {}", FREE_MONEY, account.balance)
            }
            false => format!("You need less than {} for free money", FREE_MONEY),
        };
        self.reply(message, text);
    }

    fn reply(&self, message: &Message, text: impl Into<String>) {
        self.notifier.send(&message.channel, text);
    }
}
