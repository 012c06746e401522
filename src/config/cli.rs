use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "wedding-content")]
#[command(about = "Wedding website content and guest submissions")]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve image keys to URLs
    Images {
        #[arg(long)]
        key: Option<String>,
        /// Override the configured environment (local, production)
        #[arg(long)]
        env: Option<String>,
    },
    /// Print timeline entries as JSON
    Timeline {
        #[arg(long)]
        id: Option<u32>,
    },
    /// List every timeline photo with its milestone
    Photos,
    /// Show how far along the story is
    Progress,
    /// Verify content invariants and configuration
    Check,
    #[command(subcommand)]
    Rsvp(RsvpCommand),
    #[command(subcommand)]
    Guestbook(GuestbookCommand),
    #[command(subcommand)]
    Waitlist(WaitlistCommand),
    #[command(subcommand)]
    SiteConfig(SiteConfigCommand),
    /// Report data file status
    Health,
}

#[derive(Debug, Subcommand)]
pub enum RsvpCommand {
    Submit {
        #[arg(long)]
        name: String,
        /// attending, declining, ...
        #[arg(long)]
        attendance: Option<String>,
        #[arg(long)]
        song: Option<String>,
    },
    List,
    Stats,
}

#[derive(Debug, Subcommand)]
pub enum GuestbookCommand {
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        relationship: String,
        #[arg(long)]
        message: String,
    },
    List,
}

#[derive(Debug, Subcommand)]
pub enum WaitlistCommand {
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        song: Option<String>,
    },
    List,
}

#[derive(Debug, Subcommand)]
pub enum SiteConfigCommand {
    Show,
    Set {
        #[arg(long)]
        show_hotel_info: Option<bool>,
        #[arg(long)]
        hotel_name: Option<String>,
        #[arg(long)]
        hotel_address: Option<String>,
        #[arg(long)]
        booking_link: Option<String>,
    },
}
