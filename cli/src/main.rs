use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use glot::plans_to_json;
use glot_compiler::error::GlotError;
use glot_compiler::{analyze, compile_files, generate_files, SchemaFile};

#[derive(Parser)]
#[command(name = "glot-cli")]
#[command(about = "Check, plan, or generate Rust from glot schemas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and verify `.glot` schemas and plan every message type
    Check {
        /// Input `.glot` files, compiled together as one schema set
        #[arg(short, long, num_args = 1.., required = true)]
        input: Vec<PathBuf>,
    },

    /// Print the per-message plans as JSON (to stdout)
    Plan {
        /// Input `.glot` files, compiled together as one schema set
        #[arg(short, long, num_args = 1.., required = true)]
        input: Vec<PathBuf>,
    },

    /// Generate a `_trans.rs` source file per input schema
    Gen {
        /// Input `.glot` files, compiled together as one schema set
        #[arg(short, long, num_args = 1.., required = true)]
        input: Vec<PathBuf>,

        /// Output directory (defaults to each input's own directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() -> Result<(), GlotError> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Check { input } => {
            let files = load_schemas(input)?;
            let plans = analyze(&files)?;
            println!(
                "OK: {} message types across {} schema files",
                plans.len(),
                files.len()
            );
            Ok(())
        }

        Commands::Plan { input } => {
            let files = load_schemas(input)?;
            let plans = analyze(&files)?;
            println!("{}", plans_to_json(&plans));
            Ok(())
        }

        Commands::Gen { input, out_dir } => {
            let files = load_schemas(input)?;
            for generated in generate_files(&files)? {
                let out_path = match out_dir {
                    Some(dir) => {
                        let file_name = Path::new(&generated.name)
                            .file_name()
                            .map(PathBuf::from)
                            .unwrap_or_else(|| PathBuf::from(&generated.name));
                        dir.join(file_name)
                    }
                    None => PathBuf::from(&generated.name),
                };
                fs::write(&out_path, &generated.content).map_err(GlotError::Io)?;
                println!("Generated {}", out_path.display());
            }
            Ok(())
        }
    }
}

fn load_schemas(inputs: &[PathBuf]) -> Result<Vec<SchemaFile>, GlotError> {
    let mut sources = Vec::with_capacity(inputs.len());
    for path in inputs {
        let text = fs::read_to_string(path).map_err(GlotError::Io)?;
        sources.push((path.display().to_string(), text));
    }
    compile_files(&sources)
}
