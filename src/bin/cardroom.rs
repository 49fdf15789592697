//! Cardroom Binary
//!
//! Runs poker tables over the console transport until stdin closes or an
//! interrupt arrives, then drains every table and saves the ledger.

use cardroom::casino::*;
use cardroom::commands::Dispatcher;
use cardroom::ledger::*;
use cardroom::rules::HighCardDealer;
use cardroom::session::Timing;
use cardroom::transport::*;
use cardroom::*;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Poker tables in chat", long_about = None)]
struct Args {
    /// Credential for the chat platform.
    #[arg(short, long, env = "CARDROOM_TOKEN")]
    token: String,
    /// Log at debug level on the terminal.
    #[arg(short, long)]
    debug: bool,
    #[arg(long, default_value = LEDGER_PATH)]
    ledger: PathBuf,
    /// Seconds a player has to act.
    #[arg(long, default_value_t = TURN_TIMEOUT)]
    turn_timeout: u64,
    /// Seconds between hands.
    #[arg(long, default_value_t = HAND_COOLDOWN)]
    cooldown: u64,
    /// Seconds between ledger snapshots.
    #[arg(long, default_value_t = SAVE_INTERVAL)]
    save_interval: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    log(args.debug);
    log::info!("[cardroom] starting, token of {} chars", args.token.len());
    let ledger = Arc::new(Ledger::new(&args.ledger));
    ledger.load().await;
    let keeper = Keeper::spawn(ledger.clone(), Duration::from_secs(args.save_interval));
    let notifier = Notifier::spawn(Arc::new(Console), SEND_RETRIES);
    let timing = Timing {
        turn: Duration::from_secs(args.turn_timeout),
        cooldown: Duration::from_secs(args.cooldown),
    };
    let casino = Casino::new(
        ledger.clone(),
        notifier.clone(),
        Arc::new(HighCardDealer::default()),
        timing,
    );
    let door = casino.door();
    tokio::spawn(casino.run());
    let dispatcher = Dispatcher::new(door.clone(), ledger.clone(), notifier.clone());
    tokio::select! {
        result = Console::listen(dispatcher) => match result {
            Ok(()) => log::info!("[cardroom] input closed"),
            Err(e) => log::error!("[cardroom] input failed: {}", e),
        },
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => log::warn!("[cardroom] interrupt received"),
            Err(e) => log::error!("[cardroom] signal handler failed: {}", e),
        },
    }
    shutdown(&door, &notifier, keeper, Duration::from_millis(SHUTDOWN_GRACE)).await;
    std::process::exit(0);
}
