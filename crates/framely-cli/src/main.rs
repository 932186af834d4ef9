//! Framely console: campaign dashboard, composer and frame manager.
//!
//! Set FRAMELY_API_URL (or API_URL) and FRAMELY_USER_SITE_URL. Run
//! `framely login` first; the bearer token is kept in FRAMELY_TOKEN_FILE.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use framely_api_client::ApiClient;
use framely_cli::compose::compose;
use framely_cli::init_tracing;
use framely_cli::output::{
    campaign_details, campaign_rows, campaign_table, error_report, print_json,
};
use framely_cli::progress::ProgressPrinter;
use framely_cli::selection::{load_single_image, prepare_draft};
use framely_cli::session_store::TokenStore;
use framely_core::models::LoginRequest;
use framely_core::{CampaignId, ConsoleConfig, FrameId, ResourceClient, ValidationError};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use validator::Validate;

#[derive(Parser)]
#[command(name = "framely", about = "Framely campaign console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        username: String,
        /// Password (prefer the environment variable)
        #[arg(long, env = "FRAMELY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Remove the stored session token
    Logout,
    /// List campaigns
    Campaigns {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Create a campaign from frame (and optional poster) images
    Create {
        /// Campaign name
        #[arg(long)]
        name: String,
        /// Frame image; the first one becomes the default frame
        #[arg(long = "frame", required = true, num_args = 1..)]
        frames: Vec<PathBuf>,
        /// Poster background image; the first one becomes the default poster
        #[arg(long = "poster", num_args = 1..)]
        posters: Vec<PathBuf>,
    },
    /// Show a campaign and its frames
    Show {
        id: CampaignId,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Rename a campaign
    Rename { id: CampaignId, name: String },
    /// Delete a campaign with all its frames
    Delete { id: CampaignId },
    /// Frame operations
    Frame {
        #[command(subcommand)]
        sub: FrameCommands,
    },
    /// Print the public link of a campaign
    Share { id: CampaignId },
}

#[derive(Subcommand)]
enum FrameCommands {
    /// Add a single non-default frame to a campaign
    Add {
        id: CampaignId,
        /// Frame name
        #[arg(long)]
        name: String,
        /// Frame image
        file: PathBuf,
    },
    /// Delete a frame from a campaign
    Delete { id: CampaignId, frame_id: FrameId },
}

/// Everything a command needs: settings, token store and an API client.
struct Console {
    config: ConsoleConfig,
    store: Arc<TokenStore>,
}

impl Console {
    fn load() -> anyhow::Result<Self> {
        let config = ConsoleConfig::from_env()?;
        let store = Arc::new(TokenStore::new(config.token_file.clone()));
        Ok(Self { config, store })
    }

    fn anonymous_client(&self) -> anyhow::Result<ApiClient> {
        ApiClient::from_config(&self.config, None).context("Failed to create API client")
    }

    fn client(&self) -> anyhow::Result<ApiClient> {
        let session = self
            .store
            .session()?
            .context("Not logged in. Run `framely login` first")?;
        ApiClient::from_config(&self.config, Some(session)).context("Failed to create API client")
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "Command failed");
            eprintln!("Error: {}", error_report(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let console = Console::load()?;

    match cli.command {
        Commands::Login { username, password } => {
            let request = LoginRequest { username, password };
            request.validate().map_err(ValidationError::from)?;

            let token = console.anonymous_client()?.login(&request).await?;
            console.store.save(&token)?;
            tracing::info!(username = %request.username, "Logged in");
            println!("Logged in as {}", request.username);
        }
        Commands::Logout => {
            if console.store.clear()? {
                println!("Logged out");
            } else {
                println!("Not logged in");
            }
        }
        Commands::Campaigns { format } => {
            let campaigns = console.client()?.list_campaigns().await?;
            match format {
                OutputFormat::Json => {
                    print_json(&campaign_rows(&campaigns, &console.config.user_site_url))?
                }
                OutputFormat::Table => {
                    println!("{}", campaign_table(&campaigns, &console.config.user_site_url))
                }
            }
        }
        Commands::Create {
            name,
            frames,
            posters,
        } => {
            let (draft, reports) = prepare_draft(&name, &frames, &posters)?;
            for warning in reports.iter().filter_map(|r| r.warning()) {
                eprintln!("Warning: {}", warning);
            }

            let client = Arc::new(console.client()?);
            let report = compose(
                client,
                &draft,
                &console.config.user_site_url,
                Some(Arc::new(ProgressPrinter)),
            )
            .await;
            for line in report.summary() {
                println!("{}", line);
            }
            report.into_result()?;
        }
        Commands::Show { id, format } => {
            let client = console.client()?;
            let campaign = client.get_campaign(id).await?;
            let frames = client.list_frames(id).await?;
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "campaign": campaign,
                    "share_url": campaign.share_url(&console.config.user_site_url),
                    "frames": frames,
                }))?,
                OutputFormat::Table => println!(
                    "{}",
                    campaign_details(&campaign, &frames, &console.config.user_site_url)
                ),
            }
        }
        Commands::Rename { id, name } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(ValidationError::EmptyName.into());
            }
            let campaign = console.client()?.rename_campaign(id, name).await?;
            println!("Campaign {} renamed to {}", campaign.id, campaign.name);
        }
        Commands::Delete { id } => {
            console.client()?.delete_campaign(id).await?;
            println!("Campaign {} deleted", id);
        }
        Commands::Frame { sub } => match sub {
            FrameCommands::Add { id, name, file } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(ValidationError::Required("Frame name").into());
                }
                let frame = load_single_image(&file)?;
                console.client()?.add_frame(id, name, &frame, false).await?;
                println!("Added frame {} to campaign {}", name, id);
            }
            FrameCommands::Delete { id, frame_id } => {
                console.client()?.delete_frame(id, frame_id).await?;
                println!("Frame {} deleted from campaign {}", frame_id, id);
            }
        },
        Commands::Share { id } => {
            let campaign = console.client()?.get_campaign(id).await?;
            println!("{}", campaign.share_url(&console.config.user_site_url));
        }
    }

    Ok(())
}
