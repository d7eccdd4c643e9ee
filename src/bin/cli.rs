use clap::{Args, Parser, Subcommand, ValueEnum};
use wedding_backoffice::{
    cli::{
        auth,
        content::{content_destinations, content_venues},
        db::{db_generate, db_list, db_migrate, db_revert},
    },
    core::db::init_pool,
    model::profile::ProfileRole,
    settings::get_config,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database related command
    Db(DbArgs),
    /// Authentication related command
    Auth(AuthArgs),
    /// Generate descriptive content for records that have none
    Content(ContentArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    User,
    Vendor,
    Admin,
}

impl From<RoleArg> for ProfileRole {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::User => ProfileRole::User,
            RoleArg::Vendor => ProfileRole::Vendor,
            RoleArg::Admin => ProfileRole::Admin,
        }
    }
}

#[derive(Debug, Args)]
struct AuthArgs {
    #[command(subcommand)]
    command: AuthCommands,
}

#[derive(Debug, Subcommand)]
enum AuthCommands {
    /// Create new user
    CreateUser {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long, value_enum, default_value = "admin")]
        role: RoleArg,
    },
}

#[derive(Debug, Args)]
struct DbArgs {
    #[command(subcommand)]
    command: DbCommands,
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Generate new migration file
    Generate { migration_name: String },
    /// List all migration
    List,
    /// Run all pending migration
    Migrate,
    /// Revert latest migration
    Revert,
}

#[derive(Debug, Args)]
struct ContentArgs {
    #[command(subcommand)]
    command: ContentCommands,
}

#[derive(Debug, Subcommand)]
enum ContentCommands {
    /// Fill venues without content
    Venues {
        /// Only report what would be updated
        #[arg(long)]
        dry_run: bool,
    },
    /// Fill destinations without content
    Destinations {
        /// Only report what would be updated
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let cli = Cli::parse();
    match &cli.command {
        Commands::Db(db_args) => match &db_args.command {
            DbCommands::Generate { migration_name } => {
                println!("generate migration: {migration_name:?}");
                db_generate(migration_name).await?;
            }
            DbCommands::List => {
                println!("list migration");
                let config = get_config()?;
                db_list(&config).await?;
            }
            DbCommands::Migrate => {
                println!("run all pending migration");
                let config = get_config()?;
                println!("run migration on {}", config.database_url);
                db_migrate(&config).await?;
            }
            DbCommands::Revert => {
                println!("revert latest migration");
                let config = get_config()?;
                println!("{}", config.database_url);
                db_revert(&config).await?;
            }
        },
        Commands::Auth(auth_args) => match &auth_args.command {
            AuthCommands::CreateUser {
                email,
                password,
                role,
            } => {
                println!("create user: {email:?}");
                let config = get_config()?;
                let pool = init_pool(&config).await?;
                let profile = auth::create_user(&pool, email, password, (*role).into()).await?;
                println!("created {} with role {}", profile.email, profile.role);
            }
        },
        Commands::Content(content_args) => {
            let config = get_config()?;
            let pool = init_pool(&config).await?;
            match &content_args.command {
                ContentCommands::Venues { dry_run } => content_venues(&pool, *dry_run).await?,
                ContentCommands::Destinations { dry_run } => {
                    content_destinations(&pool, *dry_run).await?
                }
            }
        }
    }
    Ok(())
}
