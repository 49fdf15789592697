use super::*;
use crate::ChannelId;
use crate::PlayerId;
use crate::commands::Dispatcher;
use crate::commands::Message;
use colored::Colorize;
use tokio::io::AsyncBufReadExt;

/// Terminal stand-in for the chat platform.
///
/// Outbound text is printed per channel. Inbound lines read
/// `<channel> <user> <text...>`; direct channels are `@<user>`.
pub struct Console;

#[async_trait::async_trait]
impl Transport for Console {
    async fn send(&self, channel: &ChannelId, text: &str) -> Result<(), DeliveryError> {
        let label = format!("[{}]", channel);
        let label = match channel.as_str().starts_with('@') {
            true => label.magenta().bold(),
            false => label.cyan().bold(),
        };
        for line in text.lines() {
            println!("{} {}", label, line);
        }
        Ok(())
    }
    async fn open_private(&self, player: &PlayerId) -> Result<ChannelId, DeliveryError> {
        Ok(ChannelId::from(format!("@{}", player)))
    }
}

impl Console {
    /// Feed stdin to the dispatcher until it closes.
    pub async fn listen(dispatcher: Dispatcher) -> anyhow::Result<()> {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match Self::parse(&line) {
                Some(message) => dispatcher.dispatch(message).await,
                None if line.trim().is_empty() => continue,
                None => log::warn!("[console] expected `<channel> <user> <text>`"),
            }
        }
        Ok(())
    }

    fn parse(line: &str) -> Option<Message> {
        let mut parts = line.trim().splitn(3, char::is_whitespace);
        let channel = parts.next().filter(|s| !s.is_empty())?;
        let user = parts.next()?;
        let content = parts.next()?;
        Some(Message {
            channel: ChannelId::from(channel),
            author: PlayerId::from(user),
            name: user.to_string(),
            content: content.trim().to_string(),
        })
    }
}
