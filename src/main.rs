use clap::Parser;
use tracing_subscriber::EnvFilter;

use db_table::cli::Args;
use db_table::config::ConfigFile;
use db_table::db::DatabaseConfig;
use db_table::DbTable;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let config_file = ConfigFile::load_if_present()?;
    let db_config = match (&args.db, &config_file) {
        (Some(url), _) => DatabaseConfig::from_url(url),
        (None, Some(file)) => file.database.to_database_config(),
        (None, None) => DatabaseConfig::resolve()?,
    };
    let table_name = args.table_name(config_file.as_ref().and_then(|f| f.table.as_deref()));

    let mut table = DbTable::open_with_config(&table_name, &db_config)?;
    let output = args.command.run(&mut table, args.format)?;
    table.close()?;

    println!("{}", output);
    Ok(())
}
