mod cli;
mod commands;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Arguments, Commands};
use commands::Runner;
use endesha_editor_config::Config;

fn main() -> Result<()> {
    let args = Arguments::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let config = load_config(&args)?;
    let runner = Runner::new(config);

    match args.command {
        Commands::Render { record } => println!("{}", runner.render(&record)?),
        Commands::Preview { record } => print!("{}", runner.preview(&record)?),
        Commands::Check { records } => runner.check(&records)?,
        Commands::Sync { record, dry_run } => match runner.sync(&record, dry_run)? {
            Some(markdown) if dry_run => println!("{markdown}"),
            Some(_) => println!("{}: answer_md regenerated", record.display()),
            None => println!("{}: already up to date", record.display()),
        },
    }
    Ok(())
}

fn load_config(args: &Arguments) -> Result<Config> {
    match &args.config_path {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => Ok(config),
            None => bail!("Config file not found: {}", path.display()),
        },
        None => {
            let config_path = Config::config_path();
            log::debug!("Config path: {}", config_path.display());
            Ok(Config::load()
                .with_context(|| format!("Failed to load {}", config_path.display()))?
                .unwrap_or_default())
        }
    }
}
