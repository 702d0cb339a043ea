//! CLI entry point for treescribe

use std::fs::File;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use treescribe::{
    Config, ConfigStore, HttpChatClient, Summarizer, TreeError, TreeOutput, TreeRenderer,
    TreeRequest,
};

#[derive(Parser, Debug)]
#[command(name = "treescribe")]
#[command(about = "Analyze directory structures and summarize files with an LLM")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a directory structure and optionally summarize files
    Run {
        /// Path to the directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Maximum depth to explore
        #[arg(short = 'd', long = "max-depth")]
        max_depth: Option<usize>,

        /// Paths to exclude (falls back to the configured list)
        #[arg(short = 'e', long = "exclude")]
        exclude: Vec<String>,

        /// Summarize file contents using the configured LLM endpoint
        #[arg(short = 's', long = "summarize")]
        summarize: bool,

        /// Also write the analysis to this file
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Override the default language model
        #[arg(long)]
        model: Option<String>,

        /// Override the default summarization prompt
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Manage treescribe configuration
    Config {
        /// Set a configuration key (e.g. --set model llama3)
        #[arg(long = "set", num_args = 2, value_names = ["KEY", "VALUE"])]
        set: Option<Vec<String>>,

        /// Show the current configuration
        #[arg(long)]
        show: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run {
            path,
            max_depth,
            exclude,
            summarize,
            output,
            model,
            prompt,
        } => run_command(path, max_depth, exclude, summarize, output, model, prompt),
        Command::Config { set, show } => config_command(set, show),
    };

    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn run_command(
    path: PathBuf,
    max_depth: Option<usize>,
    exclude: Vec<String>,
    summarize: bool,
    output: Option<PathBuf>,
    model: Option<String>,
    prompt: Option<String>,
) -> Result<()> {
    let store = ConfigStore::default_location()?;
    let config = store.load().context("failed to load configuration")?;

    let exclude = if exclude.is_empty() {
        config.exclude.clone()
    } else {
        exclude
    };
    log::debug!("exclude list: {:?}", exclude);

    let request = TreeRequest {
        root: path,
        max_depth,
        exclude,
        model,
        prompt,
    };

    let summarizer = if summarize {
        Some(Summarizer::new(config, Box::new(HttpChatClient::new())))
    } else {
        None
    };

    let mut renderer = TreeRenderer::new(&request);
    if let Some(summarizer) = &summarizer {
        renderer = renderer.with_summarizer(summarizer);
    }

    let mut out = TreeOutput::stdout();
    if let Some(sink_path) = &output {
        let file = File::create(sink_path)
            .with_context(|| format!("failed to create output file {}", sink_path.display()))?;
        out = out.with_sink(Box::new(file), sink_path.display().to_string());
    }

    renderer.render(&mut out).map_err(|err| match err {
        TreeError::NotADirectory(_) => anyhow::anyhow!("{}", err),
        TreeError::Io(io_err) => anyhow::Error::from(io_err).context("failed to write output"),
    })
}

fn config_command(set: Option<Vec<String>>, show: bool) -> Result<()> {
    let store = ConfigStore::default_location()?;
    let mut config: Config = store.load().context("failed to load configuration")?;

    if let Some(pair) = set {
        // clap guarantees exactly two values for --set
        let (key, value) = (&pair[0], &pair[1]);
        config.set(key, value)?;
        store.save(&config)?;
        println!("Updated {} in configuration.", key);
    } else if show {
        for (key, value) in config.entries() {
            println!("{}: {}", key, value);
        }
    } else {
        println!("Use --set KEY VALUE to update configuration or --show to display current settings.");
    }

    Ok(())
}
