use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "babble")]
#[command(about = "Babble CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version
    Version,

    /// Create the configuration directory and default files (config, starter corpus).
    Init {
        /// Config file path (default: BABBLE_CONFIG_PATH or ~/.babble/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,
    },

    /// Run the interaction endpoint. Requires discord.publicKey (or DISCORD_PUBLIC_KEY)
    /// and an initialized corpus.
    Serve {
        /// Config file path (default: BABBLE_CONFIG_PATH or ~/.babble/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,

        /// HTTP port (default from config or 8787)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Generate one reply locally from the corpus (no server, no Discord).
    Say {
        /// Config file path (default: BABBLE_CONFIG_PATH or ~/.babble/config.json)
        #[arg(long, short, value_name = "PATH")]
        config: Option<std::path::PathBuf>,

        /// Optional single-word seed to start the chain from.
        word: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Version) => {
            println!("babble {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Init { config }) => {
            if let Err(e) = run_init(config) {
                log::error!("init failed: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Serve { config, port }) => {
            if let Err(e) = run_serve(config, port).await {
                log::error!("serve failed: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Say { config, word }) => {
            if let Err(e) = run_say(config, word) {
                log::error!("say failed: {}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("Run with --help for usage");
        }
    }
}

fn run_init(config_path: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let path = config_path.unwrap_or_else(lib::config::default_config_path);
    let dir = lib::init::init_config_dir(&path)?;
    println!("initialized configuration at {}", dir.display());
    Ok(())
}

async fn run_serve(
    config_path: Option<std::path::PathBuf>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let (mut config, path) = lib::config::load_config(config_path)?;
    if let Some(p) = port {
        config.endpoint.port = p;
    }
    log::info!(
        "starting endpoint on {}:{}",
        config.endpoint.bind,
        config.endpoint.port
    );
    lib::endpoint::run_endpoint(config, path).await
}

fn run_say(config_path: Option<std::path::PathBuf>, word: Option<String>) -> anyhow::Result<()> {
    let (config, path) = lib::config::load_config(config_path)?;
    let corpus_path = lib::config::resolve_corpus_path(&config, &path);
    let corpus = std::sync::Arc::new(lib::corpus::Corpus::load(&corpus_path)?);

    if let Some(ref w) = word {
        if w.split_whitespace().count() > 1 {
            anyhow::bail!("seed must be a single word");
        }
        if !corpus.contains(w) {
            anyhow::bail!("'{}' is not in the corpus", w);
        }
    }

    let generator = lib::generate::ChainGenerator::new(corpus);
    let reply = lib::generate::generate_reply(
        &generator,
        word.as_deref(),
        config.generation.attempt_bound(),
    );
    println!("{}", reply);
    Ok(())
}
