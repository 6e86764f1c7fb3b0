use clap::{Parser, Subcommand};

use langmerge_cli::{job, jobs};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run merge jobs from a job list file.
    Run {
        /// The job list file mapping job names to config files
        #[arg(short, long)]
        list: String,

        /// Job name to run, a config file path, or "all" (the default)
        job: Option<String>,
    },

    /// Run a single merge config file.
    Merge {
        /// The merge config file to run
        #[arg(short, long)]
        config: String,
    },
}

fn main() {
    let args = Args::parse();

    match args.commands {
        Commands::Run { list, job } => match jobs::run_jobs(&list, job.as_deref()) {
            Ok(0) => {}
            Ok(_) => std::process::exit(1),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Merge { config } => {
            if let Err(e) = job::run_job(&config) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
