//! # Stego Binary Entry Point
//!
//! Thin wrapper that loads configuration and dispatches to the encrypt,
//! decrypt and capacity workflows, or to the interactive menu.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin stego -- encode --image cover.png --text "meet at noon" --key k
//! cargo run --bin stego -- decode --key k
//! cargo run --bin stego -- --config config/stego.toml capacity --image cover.png
//! cargo run --bin stego                      # interactive menu
//! ```

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

use lsb_stego::app::{run_menu, StegoSession};
use lsb_stego::codec::Framing;
use lsb_stego::common::config::StegoConfig;
use lsb_stego::common::logging::init_logger;

/// Command-line arguments for the stego binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a configuration file (TOML format)
    ///
    /// Example: config/stego.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the framing mode from the configuration
    #[arg(long, value_enum, global = true)]
    framing: Option<Framing>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide text in an image
    Encode {
        /// Cover image to read
        #[arg(short, long)]
        image: PathBuf,

        /// Text to hide
        #[arg(short, long)]
        text: String,

        /// Key prepended to the text and checked on decode
        #[arg(short, long)]
        key: String,

        /// Where to write the encoded image (defaults to the configured path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Recover hidden text from an image
    Decode {
        /// Key the text was hidden with
        #[arg(short, long)]
        key: String,

        /// Encoded image to read (defaults to the configured path)
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Where to save the rendered text (defaults to the configured path)
        #[arg(short, long)]
        render: Option<PathBuf>,

        /// Skip rendering the recovered text to an image
        #[arg(long, conflicts_with = "render")]
        no_render: bool,
    },

    /// Show how much text an image can hold
    Capacity {
        #[arg(short, long)]
        image: PathBuf,
    },

    /// Encrypt / Decrypt / Quit prompt loop (the default)
    Interactive,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logger(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let mut config = StegoConfig::load_or_default(args.config.as_deref())?;
    if let Some(framing) = args.framing {
        config.codec.framing = framing;
    }

    let session = StegoSession::from_config(config);

    match args.command.unwrap_or(Command::Interactive) {
        Command::Encode {
            image,
            text,
            key,
            output,
        } => {
            let written = session.encrypt(&image, &text, &key, output.as_deref())?;
            println!("Text hidden and image encrypted successfully: {}", written.display());
        }
        Command::Decode {
            key,
            image,
            render,
            no_render,
        } => {
            let render_to = if no_render {
                None
            } else {
                Some(render.unwrap_or_else(|| session.config().output.rendered_text_path.clone()))
            };

            match session.decrypt(image.as_deref(), &key, render_to.as_deref())? {
                Some(recovered) => {
                    if let Some(path) = &recovered.rendered_to {
                        println!("Retrieved text saved to {}", path.display());
                    }
                    println!("Retrieved text: {}", recovered.text);
                }
                None => {
                    println!("Incorrect key. Text not decrypted.");
                    std::process::exit(2);
                }
            }
        }
        Command::Capacity { image } => {
            let report = session.capacity(&image)?;
            println!(
                "{}x{} image: {} bits, up to {} characters of key + text",
                report.width, report.height, report.bits, report.max_chars
            );
        }
        Command::Interactive => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut output = std::io::stdout();
            run_menu(&session, &mut input, &mut output)?;
        }
    }

    Ok(())
}
