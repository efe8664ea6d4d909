use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;

use vstpreset_format::{read_meta_info, ParamValue, VstPreset};

#[derive(Debug, Parser)]
#[command(name = "vstpreset", about = "Inspect and rewrite Steinberg .vstpreset files")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a human-readable summary of a preset
    Dump {
        /// Path to the .vstpreset file
        file: PathBuf,
    },

    /// Print the preset's parameters as JSON
    Json {
        /// Path to the .vstpreset file
        file: PathBuf,
    },

    /// Print the Info metadata, skipping the payload entirely
    Meta {
        /// Path to the .vstpreset file
        file: PathBuf,
    },

    /// Read a preset and write it back out in canonical form
    Rewrite {
        /// Path to the source .vstpreset file
        input: PathBuf,
        /// Path the rewritten preset is written to
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Dump { file } => {
            let preset = VstPreset::from_file(&file)
                .with_context(|| format!("cannot read preset `{}`", file.display()))?;
            print!("{preset}");
        }
        Command::Json { file } => {
            let preset = VstPreset::from_file(&file)
                .with_context(|| format!("cannot read preset `{}`", file.display()))?;

            let mut parameters = serde_json::Map::new();
            for (key, param) in preset.parameters().iter_keyed() {
                let value = match &param.value {
                    ParamValue::Number(n) => json!({ "index": param.index, "number": n }),
                    ParamValue::Text(s) => json!({ "index": param.index, "text": s }),
                    ParamValue::Bytes(b) => json!({ "index": param.index, "bytes": b.len() }),
                };
                parameters.insert(key.to_string(), value);
            }

            let doc = json!({
                "class_id": preset.class_id().to_string(),
                "version": preset.version(),
                "payload": format!("{:?}", preset.payload_kind()),
                "meta": preset.meta().map(|m| json!({
                    "category": m.category,
                    "name": m.name,
                    "vendor": m.vendor,
                })),
                "parameters": parameters,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Command::Meta { file } => {
            let (_, xml) = read_meta_info(&file)
                .with_context(|| format!("cannot read metadata from `{}`", file.display()))?;
            print!("{xml}");
        }
        Command::Rewrite { input, output } => {
            let mut preset = VstPreset::from_file(&input)
                .with_context(|| format!("cannot read preset `{}`", input.display()))?;
            preset
                .write_file(&output)
                .with_context(|| format!("cannot write preset `{}`", output.display()))?;
            tracing::info!(
                input = %input.display(),
                output = %output.display(),
                "rewrote preset"
            );
        }
    }

    Ok(())
}
