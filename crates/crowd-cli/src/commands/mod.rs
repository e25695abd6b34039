use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;

use crowd_config::{ConfigLoader, CrowdConfig};
use crowd_content::{PersonaRegistry, TopicPool};
use crowd_core::CrowdError;

mod run;

/// 👥 Crowd: synthetic participants for a Q&A service
#[derive(Parser)]
#[command(name = "crowd", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to crowd.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register participants and run the crowd until interrupted
    Run {
        /// Stop after this many iterations (default: run until Ctrl-C)
        #[arg(short = 'n', long)]
        iterations: Option<u64>,

        /// Number of participants to register (overrides crowd.agent_count)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        agents: Option<u64>,

        /// Seed for a reproducible run (overrides crowd.seed)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show current configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the built-in personas
    Personas {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the seed topic pool
    Topics {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show version and build info
    Version,
}

impl Cli {
    pub async fn run(self) -> crowd_core::Result<()> {
        // Load config first so we can use it for log format
        let config = ConfigLoader::load(self.config.as_deref())?;

        // Resolve log level: --verbose > --quiet > --log-level > config
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            self.log_level
                .as_deref()
                .unwrap_or(config.logging.level.as_str())
        };
        init_tracing(log_level, &config.logging.format);

        match self.command {
            Commands::Run {
                iterations,
                agents,
                seed,
            } => {
                let mut config = config;
                if let Some(n) = agents {
                    config.crowd.agent_count = n as usize;
                }
                if let Some(s) = seed {
                    config.crowd.seed = s;
                }
                let config = ConfigLoader::check(config)?;
                run::cmd_run(config, iterations).await
            }
            Commands::Config { json } => Self::cmd_config(&config, json),
            Commands::Personas { json } => Self::cmd_personas(json),
            Commands::Topics { json } => Self::cmd_topics(json),
            Commands::Version => Self::cmd_version(),
        }
    }

    fn cmd_config(config: &CrowdConfig, json: bool) -> crowd_core::Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(config).map_err(|e| CrowdError::Config(e.to_string()))?
            );
        }
        Ok(())
    }

    fn cmd_personas(json: bool) -> crowd_core::Result<()> {
        let registry = PersonaRegistry::builtin();
        if json {
            println!("{}", serde_json::to_string_pretty(registry.entries())?);
            return Ok(());
        }
        for entry in registry.entries() {
            let profile = &entry.profile;
            println!(
                "{}  {}  {}",
                style(format!("{:<6}", entry.name)).bold(),
                style(format!("{:<18}", profile.persona)).cyan(),
                style(&profile.specialty).dim()
            );
            println!("        {}", profile.style.voice);
        }
        Ok(())
    }

    fn cmd_topics(json: bool) -> crowd_core::Result<()> {
        let pool = TopicPool::builtin();
        if json {
            println!("{}", serde_json::to_string_pretty(pool.items())?);
            return Ok(());
        }
        for item in pool.items() {
            println!(
                "{}  {}",
                style(format!("[{:<8}]", item.category)).yellow(),
                style(&item.title).bold()
            );
            println!("            {}", style(item.tags.join(", ")).dim());
        }
        Ok(())
    }

    fn cmd_version() -> crowd_core::Result<()> {
        println!("👥 Crowd v{}", env!("CARGO_PKG_VERSION"));
        println!("   Rust edition: 2024");
        println!("   Target: {}", std::env::consts::ARCH);
        println!("   OS: {}", std::env::consts::OS);
        #[cfg(debug_assertions)]
        println!("   Profile: debug");
        #[cfg(not(debug_assertions))]
        println!("   Profile: release");
        Ok(())
    }
}

/// `RUST_LOG` wins over the resolved level when set.
fn init_tracing(level: &str, format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    match format {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_target(true)
            .init(),
        "compact" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .with_target(false)
            .init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init(),
    }
}
