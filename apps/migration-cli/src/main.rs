use clap::{Parser, ValueEnum};
use catchfish::config::db::DbProfile;
use catchfish::infra::db::connect_db;
use migration::MigrationCommand;

#[derive(Clone, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "catchfish database migration tool")]
struct Args {
    /// up | down | fresh | reset | refresh | status
    command: MigrationCommand,

    /// Postgres database selected by PROD_DB / TEST_DB
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    /// Migrate a SQLite file instead of Postgres
    #[arg(long)]
    sqlite_file: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,sqlx=warn")
        .init();

    let args = Args::parse();

    // In-memory SQLite is not offered: the schema would vanish with the process.
    let profile = match (args.sqlite_file, args.env) {
        (Some(file), _) => DbProfile::SqliteFile { file },
        (None, Env::Prod) => DbProfile::Prod,
        (None, Env::Test) => DbProfile::Test,
    };

    let db = match connect_db(&profile).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to connect: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = migration::migrate(&db, args.command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
