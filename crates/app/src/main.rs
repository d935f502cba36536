//! Reelcart operator CLI
//!
//! A thin front end over the domain services: seeding a data directory,
//! video moderation, platform configuration and dashboard stats.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use reelcart::{fixtures, videos::VideoId};
use reelcart_app::{
    ai::GeminiClient,
    context::AppContext,
    domain::{
        credits::CreditsService,
        platform::{PlatformConfigUpdate, PlatformService},
        videos::{PublishPolicy, VideosService},
    },
    storage::{JsonFileStorage, Slot},
    store::Store,
};

#[derive(Debug, Parser)]
#[command(name = "reelcart-app", about = "Reelcart operator CLI", long_about = None)]
struct Cli {
    /// Data directory holding the persisted slots
    #[arg(long, env = "REELCART_DATA_DIR", default_value = ".reelcart", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load demo fixtures into the data directory
    Seed,
    /// Print platform dashboard aggregates
    Stats,
    /// Video moderation
    Video(VideoCommand),
    /// Platform configuration
    Config(ConfigCommand),
}

#[derive(Debug, Args)]
struct VideoCommand {
    #[command(subcommand)]
    command: VideoSubcommand,
}

#[derive(Debug, Subcommand)]
enum VideoSubcommand {
    /// List videos awaiting moderation
    ListPending,
    /// Approve a pending video into the feed
    Approve(VideoIdArgs),
    /// Reject a pending video
    Reject(RejectArgs),
    /// Pull an active video from the feed
    Block(VideoIdArgs),
}

#[derive(Debug, Args)]
struct VideoIdArgs {
    /// Video UUID
    #[arg(long)]
    video_id: Uuid,
}

#[derive(Debug, Args)]
struct RejectArgs {
    /// Video UUID
    #[arg(long)]
    video_id: Uuid,

    /// Reason recorded on the video
    #[arg(long)]
    reason: Option<String>,
}

#[derive(Debug, Args)]
struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Print the current configuration
    Show,
    /// Update configuration fields; omitted fields keep their value
    Set(ConfigSetArgs),
}

#[derive(Debug, Args)]
struct ConfigSetArgs {
    /// Platform fee in percent
    #[arg(long)]
    fee: Option<u8>,

    /// Ad submission price in minor units
    #[arg(long)]
    ad_price: Option<u64>,

    /// Admin payout key
    #[arg(long)]
    pix_key: Option<String>,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Seed => seed(&cli.data_dir),
        Commands::Stats => stats(&cli.data_dir).await,
        Commands::Video(VideoCommand { command }) => video(&cli.data_dir, command).await,
        Commands::Config(ConfigCommand { command }) => config(&cli.data_dir, command).await,
    }
}

fn open_context(data_dir: &Path) -> Result<AppContext, String> {
    AppContext::from_data_dir(
        data_dir,
        PublishPolicy::default(),
        Arc::new(GeminiClient::from_env()),
    )
    .map_err(|error| format!("failed to open data directory: {error}"))
}

fn seed(data_dir: &Path) -> Result<(), String> {
    let storage = JsonFileStorage::open(data_dir)
        .map_err(|error| format!("failed to open data directory: {error}"))?;
    let store = Store::open(Arc::new(storage));

    let now = jiff::Timestamp::now();

    store.mutate(
        &[
            Slot::Users,
            Slot::Videos,
            Slot::PlatformFee,
            Slot::AdPrice,
            Slot::AdminPixKey,
            Slot::TotalRevenue,
        ],
        |state| {
            let creator = fixtures::demo_creator(now);
            let video = fixtures::demo_video(&creator, now);

            state.users.push(creator);
            state.videos.insert(0, video);
            state.config = fixtures::demo_config();
        },
    );

    println!("seeded demo data into {}", data_dir.display());

    Ok(())
}

async fn stats(data_dir: &Path) -> Result<(), String> {
    let ctx = open_context(data_dir)?;

    let stats = ctx.platform.stats().await;
    let credits = ctx.credits.summary().await;

    println!("users:               {}", stats.total_users);
    println!("creators:            {}", stats.total_creators);
    println!("free ads used:       {}", stats.free_ads_used_total);
    println!("pending videos:      {}", stats.pending_videos);
    println!("pending withdrawals: {}", stats.pending_withdrawals);
    println!("orders:              {}", stats.total_orders);
    println!("total revenue:       {}", format_minor(stats.total_revenue));
    println!("credits sold:        {}", credits.total_credits);
    println!("credit revenue:      {}", format_minor(credits.total_amount));

    Ok(())
}

async fn video(data_dir: &Path, command: VideoSubcommand) -> Result<(), String> {
    let ctx = open_context(data_dir)?;

    match command {
        VideoSubcommand::ListPending => {
            for video in ctx.videos.pending().await {
                println!("{}  {}", video.id, video.description);
            }
        }
        VideoSubcommand::Approve(args) => {
            let video = ctx
                .videos
                .approve(VideoId::from_uuid(args.video_id))
                .await
                .map_err(|error| format!("failed to approve video: {error}"))?;
            println!("approved {}", video.id);
        }
        VideoSubcommand::Reject(args) => {
            let video = ctx
                .videos
                .reject(VideoId::from_uuid(args.video_id), args.reason)
                .await
                .map_err(|error| format!("failed to reject video: {error}"))?;
            println!("rejected {}", video.id);
        }
        VideoSubcommand::Block(args) => {
            let video = ctx
                .videos
                .block(VideoId::from_uuid(args.video_id))
                .await
                .map_err(|error| format!("failed to block video: {error}"))?;
            println!("blocked {}", video.id);
        }
    }

    Ok(())
}

async fn config(data_dir: &Path, command: ConfigSubcommand) -> Result<(), String> {
    let ctx = open_context(data_dir)?;

    match command {
        ConfigSubcommand::Show => {
            let config = ctx.platform.config().await;
            println!("platform fee:  {}%", config.platform_fee_percent);
            println!("ad price:      {}", format_minor(config.ad_price));
            println!("admin pix key: {}", config.admin_pix_key);
            println!("total revenue: {}", format_minor(config.total_revenue));
        }
        ConfigSubcommand::Set(args) => {
            let current = ctx.platform.config().await;

            let updated = ctx
                .platform
                .save_config(PlatformConfigUpdate {
                    platform_fee_percent: args.fee.unwrap_or(current.platform_fee_percent),
                    ad_price: args.ad_price.unwrap_or(current.ad_price),
                    admin_pix_key: args.pix_key.unwrap_or(current.admin_pix_key),
                })
                .await
                .map_err(|error| format!("failed to save config: {error}"))?;

            println!(
                "saved: fee {}%, ad price {}, pix key {}",
                updated.platform_fee_percent,
                format_minor(updated.ad_price),
                updated.admin_pix_key
            );
        }
    }

    Ok(())
}

fn format_minor(minor: u64) -> String {
    format!("{}.{:02}", minor / 100, minor % 100)
}
