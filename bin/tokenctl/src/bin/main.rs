//! Console for a deployed burnable ERC-20 token.
//!
//! Subcommands cover the read surface (`info`, `balance`, `allowance`) and
//! the four write operations (`transfer`, `approve`, `transfer-from`,
//! `burn`), plus a watch mode that follows the connected account's
//! balance and reacts to wallet events.

use action::{validate::parse_address, Driver, Outcome, Request, Status};
use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use client::{
    events::{ChainWatcher, EventBus, WalletEvent},
    WalletAdapter,
};
use config::NetworkProfile;
use std::time::Duration;
use token::{
    reader::TokenReader, units::format_amount, writer::TokenWriter, TokenSource,
};
use tokenctl::{
    config::Config, connect, drain_events, lookup_owner, refresh_snapshot, Reaction, Session,
};
use tokio::time;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "tokenctl")]
#[command(about = "Console for a deployed burnable ERC-20 token")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Private key for signing transactions (hex string, with or without 0x prefix)
    #[arg(short = 'k', long, env = "PRIVATE_KEY")]
    private_key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show token metadata, total supply and the connected balance
    Info,

    /// Show the token balance of an account
    Balance {
        /// Account to query; defaults to the wallet account
        #[arg(long)]
        holder: Option<String>,
    },

    /// Show the allowance granted by an owner to a spender
    Allowance {
        /// Granting account; defaults to the wallet account
        #[arg(long)]
        owner: Option<String>,

        /// Spender account
        #[arg(long)]
        spender: String,
    },

    /// Transfer tokens to a recipient
    Transfer { to: String, amount: String },

    /// Approve a spender for an amount
    Approve { spender: String, amount: String },

    /// Transfer tokens between accounts using an existing allowance
    TransferFrom {
        from: String,
        to: String,
        amount: String,
    },

    /// Burn tokens from the connected account
    Burn { amount: String },

    /// Follow the connected account's balance and react to wallet events
    Watch,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let profile = config.profile();

    info!(
        "Target network: {} (chain {})",
        profile.chain_name, profile.chain_id
    );
    info!("Token contract: {}", profile.token);

    let wallet = WalletAdapter::from_optional_key(cli.private_key.as_deref())?;

    match cli.command {
        Command::Info => cmd_info(&profile, &wallet).await,
        Command::Balance { holder } => cmd_balance(&profile, &wallet, holder).await,
        Command::Allowance { owner, spender } => {
            cmd_allowance(&profile, &wallet, owner, spender).await
        }
        Command::Transfer { to, amount } => {
            run_operation(&profile, &wallet, Request::Transfer { to, amount }).await
        }
        Command::Approve { spender, amount } => {
            run_operation(&profile, &wallet, Request::Approve { spender, amount }).await
        }
        Command::TransferFrom { from, to, amount } => {
            run_operation(&profile, &wallet, Request::TransferFrom { from, to, amount }).await
        }
        Command::Burn { amount } => {
            run_operation(&profile, &wallet, Request::Burn { amount }).await
        }
        Command::Watch => cmd_watch(&profile, &wallet, config.poll_interval()).await,
    }
}

/// Token metadata, supply and (when connected) the caller's balance.
async fn cmd_info(profile: &NetworkProfile, wallet: &WalletAdapter) -> eyre::Result<()> {
    let provider = client::create_provider(&profile.rpc_url).await?;
    client::ensure_network(&provider, profile.chain_id).await?;

    let reader = TokenReader::new(provider, profile.token);
    let mut session = Session::new();
    session.account = wallet.current_account();

    let snapshot = refresh_snapshot(&reader, &mut session).await?;

    println!("Token:        {} ({})", snapshot.name, snapshot.symbol);
    println!("Decimals:     {}", snapshot.decimals);
    println!(
        "Total supply: {} {}",
        snapshot.total_supply_display()?,
        snapshot.symbol
    );

    match session.account {
        Some(account) => println!(
            "Balance:      {} {} ({})",
            snapshot.balance_display()?,
            snapshot.symbol,
            account
        ),
        None => println!("Balance:      (no wallet key configured)"),
    }

    if let Some(owner) = lookup_owner(&reader).await {
        println!("Owner:        {owner}");
    }

    Ok(())
}

async fn cmd_balance(
    profile: &NetworkProfile,
    wallet: &WalletAdapter,
    holder: Option<String>,
) -> eyre::Result<()> {
    // Validate before any network call.
    let holder = match holder {
        Some(raw) => parse_address("holder", &raw)?,
        None => wallet.connect()?,
    };

    let provider = client::create_provider(&profile.rpc_url).await?;
    client::ensure_network(&provider, profile.chain_id).await?;

    let reader = TokenReader::new(provider, profile.token);
    let (decimals, balance) = tokio::join!(reader.decimals(), reader.balance_of(holder));
    let (decimals, balance) = (decimals?, balance?);

    println!("{}", format_amount(balance, decimals)?);

    Ok(())
}

async fn cmd_allowance(
    profile: &NetworkProfile,
    wallet: &WalletAdapter,
    owner: Option<String>,
    spender: String,
) -> eyre::Result<()> {
    // Gated only by address validity; no wallet needed when --owner is
    // given explicitly.
    let spender = parse_address("spender", &spender)?;
    let owner = match owner {
        Some(raw) => parse_address("owner", &raw)?,
        None => wallet.connect()?,
    };

    let provider = client::create_provider(&profile.rpc_url).await?;
    client::ensure_network(&provider, profile.chain_id).await?;

    let reader = TokenReader::new(provider, profile.token);
    let (decimals, allowance) = tokio::join!(reader.decimals(), reader.allowance(owner, spender));
    let (decimals, allowance) = (decimals?, allowance?);

    println!("{}", format_amount(allowance, decimals)?);

    Ok(())
}

/// Drive one write operation end to end: connect, snapshot, state
/// machine, refresh.
async fn run_operation(
    profile: &NetworkProfile,
    wallet: &WalletAdapter,
    request: Request,
) -> eyre::Result<()> {
    let signer = wallet
        .signer()
        .cloned()
        .ok_or(client::WalletError::Unavailable)?;

    let provider = client::create_provider(&profile.rpc_url).await?;
    let mut session = Session::new();
    let account = connect(&provider, wallet, profile.chain_id, &mut session).await?;
    info!("Connected account: {account}");

    let reader = TokenReader::new(provider, profile.token);
    let snapshot = refresh_snapshot(&reader, &mut session).await?;

    let wallet_provider = client::create_wallet_provider(&profile.rpc_url, signer)?;
    let writer = TokenWriter::new(wallet_provider, profile.token);
    let driver = Driver::new(writer, snapshot.decimals);

    let outcome = driver
        .run(&request, snapshot.balance, |status| report(profile, status))
        .await;

    let notice = outcome.notice();
    if outcome.is_success() {
        let refreshed = refresh_snapshot(&reader, &mut session).await?;
        info!(
            "Balance of {account}: {} {}",
            refreshed.balance_display()?,
            refreshed.symbol
        );
        println!("{}", notice.message);
        Ok(())
    } else {
        Err(eyre::eyre!(notice.message))
    }
}

fn report(profile: &NetworkProfile, status: &Status) {
    match status {
        Status::Idle => {}
        Status::Validating => info!("Validating inputs"),
        Status::Submitting => info!("Submitting transaction"),
        Status::Confirming { hash } => {
            info!("Submitted {hash}; awaiting confirmation: {}", profile.tx_url(hash));
        }
        Status::Settled(Outcome::Success { hash }) => info!(tx_hash = %hash, "Operation settled"),
        Status::Settled(Outcome::Failure { message }) => warn!("Operation failed: {message}"),
    }
}

/// Poll loop: follow the account balance and react to wallet events.
async fn cmd_watch(
    profile: &NetworkProfile,
    wallet: &WalletAdapter,
    poll: Duration,
) -> eyre::Result<()> {
    let provider = client::create_provider(&profile.rpc_url).await?;
    client::ensure_network(&provider, profile.chain_id).await?;

    let reader = TokenReader::new(provider.clone(), profile.token);
    let bus = EventBus::new();
    let mut events = bus.subscribe();
    let mut watcher = ChainWatcher::new(provider, profile.chain_id);

    let mut session = Session::new();
    session.chain_id = Some(profile.chain_id);
    bus.emit(WalletEvent::AccountsChanged(wallet.accounts()));

    info!("Watching token {} every {:?}", profile.token, poll);

    let mut interval = time::interval(poll);
    loop {
        interval.tick().await;

        if let Err(e) = watcher.poll(&bus).await {
            warn!("Chain poll failed: {e}");
            continue;
        }

        for reaction in drain_events(&mut events, &mut session) {
            match reaction {
                Reaction::Refresh(account) => info!("Following account {account}"),
                Reaction::Disconnected => info!("Wallet reports no accounts; read-only"),
                Reaction::Restart => {
                    // Everything in memory assumes the old chain.
                    eyre::bail!(
                        "connected chain changed away from {}; restart the console",
                        profile.chain_id
                    );
                }
            }
        }

        match refresh_snapshot(&reader, &mut session).await {
            Ok(snapshot) => {
                let holder = session.account.unwrap_or(Address::ZERO);
                info!(
                    "Balance of {holder}: {} {}",
                    snapshot.balance_display()?,
                    snapshot.symbol
                );
            }
            Err(e) => warn!("Snapshot refresh failed: {e}"),
        }
    }
}
