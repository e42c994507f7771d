use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{CustomType, Text};
use weatherjoke_core::{Config, Orchestrator, provider::providers_from_config};

use crate::{prompt, render::Console};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weatherjoke",
    version,
    about = "Current weather for your city, plus a translated Chuck Norris joke"
)]
pub struct Cli {
    /// Log diagnostics to stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Without a subcommand, asks for a city interactively.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show weather and a joke for a city without prompting.
    Show {
        /// City or place name.
        city: String,
    },

    /// Interactively set translation languages, timeout and contact email.
    Configure,

    /// Print where the config file lives.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            None => {
                let config = load_config()?;
                let mut console = Console::stdout();
                console.banner();
                console.finish().context("Failed to write to stdout")?;

                let city = prompt::ask_city()?;
                run_session(&config, &city, console).await
            }
            Some(Command::Show { city }) => {
                let config = load_config()?;
                run_session(&config, &city, Console::stdout()).await
            }
            Some(Command::Configure) => configure(),
            Some(Command::ConfigPath) => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

/// Config file, then environment overrides.
fn load_config() -> Result<Config> {
    let mut config = Config::load()?;
    config.apply_env().context("Invalid environment override")?;
    Ok(config)
}

/// One session. Every outcome is a normal exit; only output failures are errors.
async fn run_session(
    config: &Config,
    city: &str,
    mut console: Console<std::io::Stdout>,
) -> Result<()> {
    let providers = providers_from_config(config)?;
    let orchestrator = Orchestrator::new(providers, config.language_pair());

    let outcome = orchestrator.run(city, &mut console).await;
    tracing::info!(?outcome, "session finished");

    console.closing(outcome);
    console.finish().context("Failed to write to stdout")
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let source = Text::new("Language the jokes are written in:")
        .with_default(&config.translation.source)
        .with_validator(prompt::validate_language)
        .prompt()?;

    let target = Text::new("Translate jokes to:")
        .with_default(&config.translation.target)
        .with_validator(prompt::validate_language)
        .prompt()?;

    let timeout_secs = CustomType::<u64>::new("Request timeout in seconds:")
        .with_default(config.timeout_secs)
        .with_error_message("Please type a whole number of seconds")
        .with_validator(prompt::validate_timeout)
        .prompt()?;

    let email = Text::new("Contact email for MyMemory (optional, raises the daily quota):")
        .with_default(config.translation.contact_email.as_deref().unwrap_or_default())
        .prompt()?;

    config.translation.source = source.trim().to_string();
    config.translation.target = target.trim().to_string();
    config.timeout_secs = timeout_secs;
    config.translation.contact_email = Some(email.trim().to_string()).filter(|e| !e.is_empty());

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
