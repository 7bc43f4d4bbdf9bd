/// userdir - browse the user directory from the terminal
use clap::{Parser, Subcommand};
use directory_client::{ApiClient, UserService};
use directory_core::{Gender, Role, UserFilters};
use directory_query::UserQueries;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userdir::{session::HELP, AppConfig, Route, Session, SessionOptions};

#[derive(Parser)]
#[command(name = "userdir")]
#[command(about = "Browse and search the user directory", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API base URL (overrides the configuration)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one page of users
    List {
        /// Email substring to search for
        #[arg(long)]
        email: Option<String>,
        /// male or female
        #[arg(long)]
        gender: Option<Gender>,
        /// admin, moderator or user
        #[arg(long)]
        role: Option<Role>,
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Print one user's profile
    Show {
        /// User id
        id: String,
    },
    /// Print whatever a location points at, e.g. /users?role=admin
    Open {
        /// Location path
        path: String,
    },
    /// Start an interactive session
    Browse {
        /// Starting location
        #[arg(default_value = "/users")]
        location: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "userdir=info,directory_client=info,directory_query=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    config.validate()?;

    let client = ApiClient::new(config.client_config())?;
    tracing::info!(base_url = %client.base_url(), "Using directory API");
    let queries = UserQueries::new(Arc::new(UserService::new(client)), config.cache_options());

    match cli.command {
        Commands::List {
            email,
            gender,
            role,
            page,
        } => {
            let route = Route::Users {
                filters: UserFilters {
                    email: email.unwrap_or_default(),
                    gender,
                    role,
                },
                page: page.max(1),
            };
            print_once(queries, &config, &route.to_string()).await?;
        }
        Commands::Show { id } => {
            print_once(queries, &config, &format!("/users/{}", id.trim())).await?;
        }
        Commands::Open { path } => {
            print_once(queries, &config, &path).await?;
        }
        Commands::Browse { location } => {
            browse(queries, &config, &location).await?;
        }
    }

    Ok(())
}

async fn print_once(queries: UserQueries, config: &AppConfig, location: &str) -> anyhow::Result<()> {
    let options = SessionOptions {
        debounce: config.debounce(),
        sync_address: config.filters.sync_address,
        show_loading: false,
    };
    let mut session = Session::new(queries, location, options, io::stdout().lock());
    session.render().await?;
    Ok(())
}

async fn browse(queries: UserQueries, config: &AppConfig, location: &str) -> anyhow::Result<()> {
    let options = SessionOptions {
        debounce: config.debounce(),
        sync_address: config.filters.sync_address,
        show_loading: true,
    };
    eprintln!("{}\n", HELP);

    let mut session = Session::new(queries, location, options, io::stdout());
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    session.run(input).await?;
    Ok(())
}
