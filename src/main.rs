use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chordchart::{
    ingest_with_config, transpose_chart, Chart, ChartError, Key, NormalizerConfig, NotationMode,
    TimeSignature,
};

#[derive(Parser)]
#[command(name = "chordchart")]
#[command(about = "Render, transpose and normalize chord charts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render chord symbols in standard, roman or nashville notation
    Render {
        #[arg(short, long)]
        key: Key,
        #[arg(short, long, default_value = "standard")]
        notation: NotationMode,
        chords: Vec<String>,
    },
    /// Transpose chord symbols from one key to another
    Transpose {
        #[arg(long)]
        from: Key,
        #[arg(long)]
        to: Key,
        chords: Vec<String>,
    },
    /// Normalize a generated JSON section payload, or print why it was rejected
    Normalize {
        input: PathBuf,
        #[arg(short, long, default_value = "4/4")]
        time_signature: TimeSignature,
        /// YAML file with normalizer thresholds
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print a chart JSON file as a plain-text lead sheet
    Show {
        input: PathBuf,
        #[arg(short, long, default_value = "standard")]
        notation: NotationMode,
    },
    /// Move a chart JSON file to a new key
    ChangeKey {
        input: PathBuf,
        #[arg(long)]
        to: Key,
        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), ChartError> {
    match command {
        Commands::Render { key, notation, chords } => {
            let rendered: Vec<String> = chords.iter().map(|c| notation.render(c, &key)).collect();
            println!("{}", rendered.join(" "));
        }
        Commands::Transpose { from, to, chords } => {
            let moved: Vec<String> = chords
                .iter()
                .map(|c| chordchart::transpose_chord(c, &from, &to))
                .collect();
            println!("{}", moved.join(" "));
        }
        Commands::Normalize {
            input,
            time_signature,
            config,
        } => {
            let config = match config {
                Some(path) => NormalizerConfig::load(path)?,
                None => NormalizerConfig::default(),
            };
            let source = read(&input)?;
            let sections = ingest_with_config(&source, time_signature, &config)?;
            println!("{}", serde_json::to_string_pretty(&sections)?);
        }
        Commands::Show { input, notation } => {
            let chart: Chart = serde_json::from_str(&read(&input)?)?;
            print!("{}", chart.to_text(notation));
        }
        Commands::ChangeKey { input, to, output } => {
            let chart: Chart = serde_json::from_str(&read(&input)?)?;
            let moved = serde_json::to_string_pretty(&transpose_chart(&chart, &to))?;
            match output {
                Some(path) => {
                    fs::write(&path, &moved).map_err(|source| ChartError::Io {
                        path: path.display().to_string(),
                        source,
                    })?;
                    eprintln!("Wrote chart in {} to {}", to, path.display());
                }
                None => println!("{}", moved),
            }
        }
    }
    Ok(())
}

fn read(path: &Path) -> Result<String, ChartError> {
    fs::read_to_string(path).map_err(|source| ChartError::Io {
        path: path.display().to_string(),
        source,
    })
}
