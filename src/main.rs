use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use signature::DirectorySink;

use signup::commands::{self, CliError, FileSink};
use signup::config::{ConfigError, SignupConfig};
use signup::replay::StrokeFile;

#[derive(Parser, Debug)]
#[command(name = "signup", about = "Signature capture and registration payload tool")]
struct Cli {
    /// Canvas width in pixels (overrides SIGNUP_CANVAS_WIDTH).
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels (overrides SIGNUP_CANVAS_HEIGHT).
    #[arg(long)]
    height: Option<u32>,

    /// Stroke width in pixels (overrides SIGNUP_LINE_WIDTH).
    #[arg(long)]
    line_width: Option<f32>,

    /// Directory for downloads (overrides SIGNUP_OUTPUT_DIR).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a stroke file through the widget and write the PNG.
    Render {
        strokes: PathBuf,
        /// Write here instead of `drawing.png` in the output directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Exit non-zero unless the PNG carries ink.
    Check { image: PathBuf },
    /// Validate a registration form and print its JSON payload.
    Payload {
        form: PathBuf,
        /// PNG to embed as the signature.
        #[arg(long)]
        signature: Option<PathBuf>,
    },
}

impl Cli {
    fn config(&self) -> Result<SignupConfig, ConfigError> {
        let mut config = SignupConfig::from_env()?;
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(line_width) = self.line_width {
            config.line_width = line_width;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        Ok(config)
    }
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = cli.config()?;

    match cli.command {
        Command::Render { strokes, out } => {
            let file = StrokeFile::parse(&fs::read_to_string(&strokes)?)?;
            match out {
                Some(path) => commands::render(&config, file, FileSink(path))?,
                None => commands::render(&config, file, DirectorySink::new(&config.output_dir))?,
            };
            Ok(())
        }
        Command::Check { image } => {
            commands::check(&config, &image)?;
            println!("signed");
            Ok(())
        }
        Command::Payload { form, signature } => {
            let payload = commands::payload(&config, &form, signature.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(())
        }
    }
}
