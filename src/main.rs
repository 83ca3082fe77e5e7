use std::path::PathBuf;

use clap::{Parser, Subcommand};

use atelier::AppError;

#[derive(Parser)]
#[command(name = "atelier")]
#[command(version)]
#[command(
    about = "Sandboxed file-edit toolkit for LLM coding agents",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set the active project root
    #[clap(visible_alias = "u")]
    Use {
        /// Project directory all file operations are confined to
        path: PathBuf,
    },
    /// Create or overwrite a file in the active project
    #[clap(visible_alias = "w")]
    Write {
        /// Subdirectory within the project (use "" for the project root)
        file_path: String,
        /// Name of the file to create or overwrite
        file_name: String,
        /// Contents to write
        contents: String,
    },
    /// Read a file from the active project
    #[clap(visible_alias = "r")]
    Read {
        /// Subdirectory within the project
        file_path: String,
        /// Name of the file to read
        file_name: String,
    },
    /// Delete a file from the active project
    #[clap(visible_alias = "rm")]
    Delete {
        /// Subdirectory within the project
        file_path: String,
        /// Name of the file to delete
        file_name: String,
    },
    /// List the active project tree as JSON
    Ls,
    /// Apply a snippet edit to a file via the generation backend
    #[clap(visible_alias = "e")]
    Edit {
        /// Subdirectory within the project
        file_path: String,
        /// Name of the file to edit
        file_name: String,
        /// Code snippet to integrate
        code_snippet: String,
        /// Plain-English directions for placing the snippet
        #[arg(short, long)]
        instructions: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Use { path } => atelier::use_project(&path).map(|root| {
            println!("Active project set to {}", root.display());
        }),
        Commands::Write { file_path, file_name, contents } => {
            atelier::write_file(&file_path, &file_name, &contents).map(|msg| println!("{msg}"))
        }
        Commands::Read { file_path, file_name } => {
            atelier::read_file(&file_path, &file_name).map(|msg| println!("{msg}"))
        }
        Commands::Delete { file_path, file_name } => {
            atelier::delete_file(&file_path, &file_name).map(|msg| println!("{msg}"))
        }
        Commands::Ls => atelier::list_project_directory().map(|tree| println!("{tree}")),
        Commands::Edit { file_path, file_name, code_snippet, instructions } => {
            atelier::edit_file(&file_path, &file_name, &code_snippet, instructions.as_deref())
                .map(|msg| println!("{msg}"))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
