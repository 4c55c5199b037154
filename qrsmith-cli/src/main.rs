use anyhow::Result;
use clap::{Parser, Subcommand};
use qrsmith_cli::commands;
use qrsmith_core::constants::DEFAULT_FILENAME;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "qrsmith")]
#[command(about = "qrsmith - Generate QR code images and decode them back to text", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a QR code PNG from text or a URL
    Generate {
        /// Text or URL to encode
        #[arg(short, long)]
        text: String,

        /// Output PNG file ("-" for stdout)
        #[arg(short, long, default_value = DEFAULT_FILENAME)]
        output: String,

        /// Print the symbol to the terminal
        #[arg(long)]
        preview: bool,
    },

    /// Decode the QR code in a PNG or JPEG image
    Decode {
        /// Input image ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive session with generate and decode modes
    App {
        /// Directory generated images are saved into
        #[arg(long, default_value = ".")]
        out_dir: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so `generate --output -` can stream PNG bytes
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Generate {
            text,
            output,
            preview,
        } => commands::generate::execute(&text, &output, preview),

        Commands::Decode { input, json } => commands::decode::execute(&input, json),

        Commands::App { out_dir } => commands::app::execute(&out_dir),
    }
}
