use crate::Chips;
use crate::MIN_BIG_STAKE;
use crate::MIN_SMALL_STAKE;
use crate::PREFIX;
use clap::Parser;

/// Commands typed after the `!` prefix. `help` comes from clap.
#[derive(Debug, Parser, PartialEq, Eq)]
#[command(name = "!", about = "Poker tables in chat", long_about = None)]
pub enum Command {
    #[command(about = "Show your balance, or someone else's", alias = "st")]
    Stats { user: Option<String> },
    #[command(
        about = "Top up a nearly empty wallet",
        aliases = ["free", "fm", "gief", "giefmoney", "mmm"]
    )]
    Freemoney,
    #[command(about = "Open a table in this channel", alias = "c")]
    Create {
        #[arg(required = true)]
        buy_in: Chips,
        #[arg(default_value_t = MIN_SMALL_STAKE)]
        small: Chips,
        #[arg(default_value_t = MIN_BIG_STAKE)]
        big: Chips,
    },
    #[command(about = "Sit down at this channel's table", alias = "j")]
    Join {
        #[arg(required = true)]
        buy_in: Chips,
    },
    #[command(about = "Deal the first hand", alias = "s")]
    Start,
    #[command(about = "Stand up, after this hand if you're in it")]
    Leave,
    #[command(about = "Close the table after this hand")]
    Stop,
    #[command(about = "Remove a player from the table")]
    Kick {
        #[arg(required = true)]
        user: String,
    },
    #[command(about = "Remove a player and keep them out")]
    Ban {
        #[arg(required = true)]
        user: String,
    },
    #[command(about = "Change small, big, ante, limit or seats")]
    Settings {
        #[arg(required = true, num_args = 1..)]
        pairs: Vec<String>,
    },
    #[command(about = "Show the table configuration and players")]
    Info,
}

impl Command {
    /// Parse the text following the prefix.
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(std::iter::once(PREFIX).chain(line.split_whitespace()))
    }
}

/// Strip platform mention markup such as `<@!123>`.
pub fn mention(user: &str) -> crate::PlayerId {
    crate::PlayerId::from(
        user.trim_start_matches("<@")
            .trim_start_matches('!')
            .trim_end_matches('>'),
    )
}

/// Pair up `key value key value ...`; a dangling key gets an empty value.
pub fn pairs(words: &[String]) -> Vec<(String, String)> {
    words
        .chunks(2)
        .map(|kv| (kv[0].clone(), kv.get(1).cloned().unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_and_defaults() {
        assert_eq!(
            Command::parse_line("c 100").ok(),
            Some(Command::Create {
                buy_in: 100,
                small: 1,
                big: 2
            })
        );
        assert_eq!(
            Command::parse_line("j 40").ok(),
            Some(Command::Join { buy_in: 40 })
        );
        assert_eq!(Command::parse_line("s").ok(), Some(Command::Start));
    }

    #[test]
    fn wallet_shorthands() {
        assert_eq!(
            Command::parse_line("st <@7>").ok(),
            Some(Command::Stats {
                user: Some("<@7>".into())
            })
        );
        for word in ["free", "fm", "gief", "giefmoney", "mmm"] {
            assert_eq!(Command::parse_line(word).ok(), Some(Command::Freemoney));
        }
    }

    #[test]
    fn help_and_garbage_are_errors() {
        let help = Command::parse_line("help").unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(help.to_string().contains("freemoney"));
        assert!(Command::parse_line("join lots").is_err());
        assert!(Command::parse_line("dance").is_err());
    }

    #[test]
    fn settings_pair_up() {
        let Ok(Command::Settings { pairs: words }) = Command::parse_line("settings big 4 limit") else {
            panic!("settings should parse");
        };
        assert_eq!(
            pairs(&words),
            vec![
                ("big".to_string(), "4".to_string()),
                ("limit".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn mentions_unwrap() {
        assert_eq!(mention("<@!42>").as_str(), "42");
        assert_eq!(mention("<@42>").as_str(), "42");
        assert_eq!(mention("42").as_str(), "42");
    }
}
