#![allow(dead_code)]

use crate::areas::repository::Repository;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod areas;
mod artifacts;
mod commands;
mod sync;

/// Author used when the environment does not name one
const DEFAULT_AUTHOR: &str = "author";

#[derive(Parser)]
#[command(
    name = "mit",
    version = "0.1.0",
    about = "A minimal distributed version control system",
    long_about = "mit maintains a content-addressed object store over the working \
    directory and synchronizes whole branch histories with peer daemons. \
    It is a learning project, not a replacement for a real version control tool.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory: \
        an empty object store with a single master branch."
    )]
    Init,
    #[command(
        name = "commit",
        about = "Snapshot the working tree as a new commit",
        long_about = "This command hashes the entire working tree and records it as a commit \
        advancing the current branch (or the detached HEAD). There is no staging area."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "log",
        about = "Show per-branch history, newest first"
    )]
    Log,
    #[command(
        name = "checkout",
        about = "Switch HEAD to a branch or commit",
        long_about = "This command materializes the target snapshot into the working directory \
        and moves HEAD. Passing a commit id that is no branch's tip detaches HEAD."
    )]
    Checkout {
        #[arg(
            short = 'b',
            value_name = "NAME",
            help = "Create the branch and switch to it"
        )]
        new_branch: Option<String>,
        #[arg(
            index = 1,
            required_unless_present = "new_branch",
            help = "Branch name or commit id (start point with -b)"
        )]
        target: Option<String>,
    },
    #[command(
        name = "branch",
        about = "List or delete branches"
    )]
    Branch {
        #[arg(short = 'D', value_name = "NAME", help = "Delete the branch")]
        delete: Option<String>,
    },
    #[command(
        name = "gc",
        about = "Remove objects unreachable from any reference"
    )]
    Gc,
    #[command(
        name = "daemon",
        about = "Serve the sync protocol over HTTP on localhost"
    )]
    Daemon {
        #[arg(index = 1, help = "Port to listen on")]
        port: u16,
    },
    #[command(
        name = "pull",
        about = "Fetch a branch from a remote into its tracking branch"
    )]
    Pull {
        #[arg(index = 1, help = "Remote name")]
        remote: String,
        #[arg(index = 2, help = "Branch to pull")]
        branch: String,
    },
    #[command(
        name = "push",
        about = "Ship a branch's history to a remote"
    )]
    Push {
        #[arg(index = 1, help = "Remote name")]
        remote: String,
        #[arg(index = 2, help = "Branch to push")]
        branch: String,
    },
    #[command(
        name = "clone",
        about = "Initialize a repository from a peer",
        long_about = "This command initializes an empty repository in the current directory, \
        registers the url as the origin remote, pulls the requested branch, and checks out master."
    )]
    Clone {
        #[arg(index = 1, help = "Base URL of the peer daemon")]
        url: String,
        #[arg(index = 2, help = "Branch to clone")]
        branch: String,
    },
    #[command(
        name = "remote",
        about = "Manage the remotes list"
    )]
    Remote {
        #[command(subcommand)]
        command: Option<RemoteCommands>,
        #[arg(short = 'v', help = "List remotes with their URLs")]
        verbose: bool,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the content of an object in the repository. \
        It requires the full id of the object to be specified."
    )]
    CatFile {
        #[arg(index = 1, help = "The object id to print")]
        id: String,
    },
}

#[derive(Subcommand)]
enum RemoteCommands {
    #[command(name = "add", about = "Add a remote")]
    Add {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2)]
        url: String,
    },
    #[command(name = "rm", about = "Remove a remote")]
    Rm {
        #[arg(index = 1)]
        name: String,
    },
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Ok(Repository::open(pwd, Box::new(std::io::stdout()))?)
}

fn author_from_env() -> String {
    std::env::var("MIT_AUTHOR").unwrap_or_else(|_| DEFAULT_AUTHOR.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mit=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init => {
            let pwd = std::env::current_dir()?;
            Repository::init(pwd, Box::new(std::io::stdout()))?;
        }
        Commands::Commit { message } => {
            let mut repository = open_repository()?;
            repository.commit(message, &author_from_env(), chrono::Utc::now())?;
        }
        Commands::Log => {
            let repository = open_repository()?;
            repository.log()?;
        }
        Commands::Checkout { new_branch, target } => {
            let mut repository = open_repository()?;
            match (new_branch, target) {
                (Some(name), start) => repository.checkout_new_branch(name, start.as_deref())?,
                (None, Some(target)) => repository.checkout(target)?,
                (None, None) => anyhow::bail!("checkout requires a branch name or commit id"),
            }
        }
        Commands::Branch { delete } => {
            let mut repository = open_repository()?;
            match delete {
                Some(name) => repository.delete_branch(name)?,
                None => repository.list_branches()?,
            }
        }
        Commands::Gc => {
            let mut repository = open_repository()?;
            repository.gc()?;
        }
        Commands::Daemon { port } => {
            let repository = open_repository()?;
            repository.daemon(*port).await?;
        }
        Commands::Pull { remote, branch } => {
            let mut repository = open_repository()?;
            repository.pull(remote, branch).await?;
        }
        Commands::Push { remote, branch } => {
            let mut repository = open_repository()?;
            repository.push(remote, branch).await?;
        }
        Commands::Clone { url, branch } => {
            let pwd = std::env::current_dir()?;
            Repository::clone_from(pwd, Box::new(std::io::stdout()), url, branch).await?;
        }
        Commands::Remote { command, .. } => {
            let mut repository = open_repository()?;
            match command {
                Some(RemoteCommands::Add { name, url }) => repository.add_remote(name, url)?,
                Some(RemoteCommands::Rm { name }) => repository.remove_remote(name)?,
                None => repository.list_remotes()?,
            }
        }
        Commands::CatFile { id } => {
            let repository = open_repository()?;
            repository.cat_file(id)?;
        }
    }

    Ok(())
}
