use anyhow::Result;
use clap::{Parser, Subcommand};
use keg::areas::repository::Repository;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "keg",
    version = "0.1.0",
    about = "A minimal content-addressable version control storage engine",
    long_about = "keg stores immutable blobs, trees and commits under \
    content-derived fingerprints, keeps a staging index of pending changes, \
    and maintains branch/HEAD pointers into the commit graph."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Initialize a new repository")]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "add", about = "Stage files for the next commit")]
    Add {
        #[arg(required = true, help = "Files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(name = "unstage", about = "Remove a path from the staging index")]
    Unstage {
        #[arg(index = 1, help = "The staged path to remove")]
        path: String,
    },
    #[command(name = "commit", about = "Create a new commit from the staged entries")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "status", about = "Show the current branch and staged paths")]
    Status,
    #[command(name = "log", about = "Show the commit history of the current branch")]
    Log {
        #[arg(short = 'n', long, default_value_t = 100, help = "Maximum number of commits")]
        limit: usize,
    },
    #[command(name = "branch", about = "Create, list or delete branches")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: Option<String>,
        #[arg(short, long, help = "Delete the named branch")]
        delete: bool,
    },
    #[command(name = "checkout", about = "Switch HEAD to another branch")]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to")]
        name: String,
    },
    #[command(name = "inspect", about = "Print a stored object by fingerprint")]
    Inspect {
        #[arg(index = 1, help = "The object fingerprint")]
        fingerprint: String,
    },
}

fn open_repository(path: Option<&str>) -> Result<Repository> {
    let repository = match path {
        Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
        None => {
            let pwd = std::env::current_dir()?;
            Repository::new(&pwd.to_string_lossy(), Box::new(std::io::stdout()))?
        }
    };

    Ok(repository)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => open_repository(path.as_deref())?.init()?,
        Commands::Add { paths } => open_repository(None)?.add(paths)?,
        Commands::Unstage { path } => open_repository(None)?.unstage(path)?,
        Commands::Commit { message } => {
            open_repository(None)?.commit(message)?;
        }
        Commands::Status => open_repository(None)?.print_status()?,
        Commands::Log { limit } => open_repository(None)?.log(*limit)?,
        Commands::Branch { name, delete } => {
            let repository = open_repository(None)?;
            match (name, delete) {
                (Some(name), true) => repository.delete_branch(name)?,
                (Some(name), false) => repository.create_branch(name)?,
                (None, _) => repository.print_branches()?,
            }
        }
        Commands::Checkout { name } => open_repository(None)?.checkout(name)?,
        Commands::Inspect { fingerprint } => open_repository(None)?.print_object(fingerprint)?,
    }

    Ok(())
}
