use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use lbit::areas::access::{Actor, Role};
use lbit::areas::config::Visibility;
use lbit::areas::storage::Storage;
use lbit::artifacts::branch::branch_name::{BranchName, RepoName, TagName, UserName};
use lbit::artifacts::objects::object_id::ObjectId;
use lbit::commands::dispatch::Dispatcher;
use lbit::commands::request::{DEFAULT_LOG_LIMIT, Request};
use lbit::commands::response::Response;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lbit",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A local, file-backed version-control engine",
    long_about = "lbit keeps many repositories under one storage directory. \
    Each repository has a content-addressed object store, branches, tags and a staging index, \
    and can be pushed to and pulled from a mirror kept in the same storage.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "LBIT_STORAGE",
        default_value = "./storage",
        help = "Directory holding all repositories"
    )]
    storage: PathBuf,
    #[arg(long, global = true, env = "LBIT_USER", help = "User to act as")]
    user: Option<UserName>,
    #[arg(long, global = true, help = "Act with administrator rights")]
    admin: bool,
    #[arg(
        long,
        global = true,
        help = "Repository to operate on, as <owner>/<name> or <name> for your own"
    )]
    repo: Option<RepoSpec>,
    #[arg(short, long, global = true, help = "Log debug output to stderr")]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create a repository owned by the current user")]
    Create {
        #[arg(index = 1)]
        name: RepoName,
    },
    #[command(about = "Delete the repository and everything in it")]
    Delete,
    #[command(about = "List repositories you can read")]
    Repos {
        #[arg(index = 1, help = "Only list this owner's repositories")]
        owner: Option<UserName>,
        #[arg(long, conflicts_with = "owner", help = "List every owner's repositories")]
        all: bool,
    },
    #[command(about = "Show or change the repository visibility")]
    Visibility {
        #[arg(index = 1, help = "public or private")]
        visibility: Option<Visibility>,
    },
    #[command(about = "Copy a repository into your own storage")]
    Fork {
        #[arg(index = 1, help = "<owner>/<name>")]
        source: RepoSpec,
    },
    #[command(about = "Give the repository to another user")]
    Transfer {
        #[arg(index = 1)]
        new_owner: UserName,
    },
    #[command(about = "Copy a repository into a local directory")]
    Clone {
        #[arg(index = 1, help = "<owner>/<name>")]
        source: RepoSpec,
        #[arg(index = 2, help = "Target directory (defaults to ./<name>)")]
        destination: Option<PathBuf>,
    },
    #[command(about = "Add an ignore pattern, or list them when none is given")]
    Ignore {
        #[arg(index = 1)]
        pattern: Option<String>,
    },
    #[command(about = "Stage workspace files")]
    Add {
        #[arg(index = 1, required = true)]
        paths: Vec<String>,
    },
    #[command(name = "rm", about = "Unstage files and delete them from the workspace")]
    Remove {
        #[arg(index = 1, required = true)]
        paths: Vec<String>,
    },
    #[command(about = "Unstage files")]
    Reset {
        #[arg(index = 1, required = true)]
        paths: Vec<String>,
    },
    #[command(about = "Show the current branch and staged files")]
    Status,
    #[command(about = "Commit the staged files")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(about = "Show the history of a branch")]
    Log {
        #[arg(index = 1, help = "Branch to show (defaults to the current branch)")]
        branch: Option<BranchName>,
        #[arg(short = 'n', long, default_value_t = DEFAULT_LOG_LIMIT)]
        limit: usize,
    },
    #[command(about = "Show the most recent commits on any branch")]
    Journal {
        #[arg(short = 'n', long, default_value_t = DEFAULT_LOG_LIMIT)]
        limit: usize,
    },
    #[command(about = "Show a commit")]
    Show {
        #[arg(index = 1)]
        oid: String,
    },
    #[command(about = "Commit the snapshot that preceded a commit")]
    Revert {
        #[arg(index = 1)]
        oid: ObjectId,
    },
    #[command(subcommand, about = "Create, list, rename or delete branches")]
    Branch(BranchCommands),
    #[command(about = "Switch to a branch")]
    Checkout {
        #[arg(index = 1)]
        branch: BranchName,
        #[arg(short = 'c', long, help = "Switch even if the branch does not exist yet")]
        create: bool,
    },
    #[command(about = "Merge a branch into the current one, taking its files")]
    Merge {
        #[arg(index = 1)]
        branch: BranchName,
    },
    #[command(about = "Point the current branch at another branch's head")]
    Rebase {
        #[arg(index = 1)]
        branch: BranchName,
    },
    #[command(subcommand, about = "Create or list tags")]
    Tag(TagCommands),
    #[command(about = "Replace the mirror with this repository")]
    Push,
    #[command(about = "Replace this repository with the mirror")]
    Pull,
}

#[derive(Subcommand)]
enum BranchCommands {
    Create {
        #[arg(index = 1)]
        name: BranchName,
    },
    List,
    Rename {
        #[arg(index = 1)]
        old: BranchName,
        #[arg(index = 2)]
        new: BranchName,
    },
    Delete {
        #[arg(index = 1)]
        name: BranchName,
    },
}

#[derive(Subcommand)]
enum TagCommands {
    Create {
        #[arg(index = 1)]
        name: TagName,
    },
    List,
}

/// `<owner>/<name>`, or `<name>` for the acting user's repository
#[derive(Debug, Clone)]
struct RepoSpec {
    owner: Option<UserName>,
    name: RepoName,
}

impl FromStr for RepoSpec {
    type Err = lbit::RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) => Ok(RepoSpec {
                owner: Some(owner.parse()?),
                name: name.parse()?,
            }),
            None => Ok(RepoSpec {
                owner: None,
                name: s.parse()?,
            }),
        }
    }
}

impl RepoSpec {
    fn resolve(&self, actor: &Actor) -> (UserName, RepoName) {
        let owner = self.owner.clone().unwrap_or_else(|| actor.name.clone());
        (owner, self.name.clone())
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let user = cli
        .user
        .clone()
        .context("no user given: pass --user or set LBIT_USER")?;
    let role = if cli.admin { Role::Admin } else { Role::User };
    let actor = Actor::new(user, role);
    let dispatcher = Dispatcher::with_owner_policy(Storage::new(&cli.storage));

    let target = || {
        cli.repo
            .as_ref()
            .map(|spec| spec.resolve(&actor))
            .ok_or_else(|| anyhow!("no repository given: pass --repo <owner>/<name>"))
    };
    let execute = |request: Request| -> Result<Response> {
        let (owner, name) = target()?;
        Ok(dispatcher.execute(&actor, &owner, &name, request)?)
    };

    let responses = match cli.command {
        Commands::Create { name } => vec![dispatcher.create_repo(&actor, &name)?],
        Commands::Delete => {
            let (owner, name) = target()?;
            vec![dispatcher.delete_repo(&actor, &owner, &name)?]
        }
        Commands::Repos { owner, all } => {
            let owner = match (owner, all) {
                (_, true) => None,
                (Some(owner), false) => Some(owner),
                (None, false) => Some(actor.name.clone()),
            };
            vec![dispatcher.list_repos(&actor, owner.as_ref())?]
        }
        Commands::Visibility { visibility } => {
            let (owner, name) = target()?;
            vec![dispatcher.visibility(&actor, &owner, &name, visibility)?]
        }
        Commands::Fork { source } => {
            let (owner, name) = source.resolve(&actor);
            vec![dispatcher.fork(&actor, &owner, &name)?]
        }
        Commands::Transfer { new_owner } => {
            let (owner, name) = target()?;
            vec![dispatcher.transfer(&actor, &owner, &name, &new_owner)?]
        }
        Commands::Clone {
            source,
            destination,
        } => {
            let (owner, name) = source.resolve(&actor);
            let destination = destination.unwrap_or_else(|| PathBuf::from(name.as_ref()));
            vec![dispatcher.clone_repo(&actor, &owner, &name, &destination)?]
        }
        Commands::Ignore { pattern } => {
            let request = match pattern {
                Some(pattern) => Request::Ignore { pattern },
                None => Request::IgnorePatterns,
            };
            vec![execute(request)?]
        }
        Commands::Add { paths } => paths
            .into_iter()
            .map(|path| execute(Request::Add { path }))
            .collect::<Result<_>>()?,
        Commands::Remove { paths } => paths
            .into_iter()
            .map(|path| execute(Request::Remove { path }))
            .collect::<Result<_>>()?,
        Commands::Reset { paths } => paths
            .into_iter()
            .map(|path| execute(Request::Reset { path }))
            .collect::<Result<_>>()?,
        Commands::Status => vec![execute(Request::Status)?],
        Commands::Commit { message } => vec![execute(Request::Commit { message })?],
        Commands::Log { branch, limit } => vec![execute(Request::Log { branch, limit })?],
        Commands::Journal { limit } => vec![execute(Request::Journal { limit })?],
        Commands::Show { oid } => vec![execute(Request::Show { oid })?],
        Commands::Revert { oid } => vec![execute(Request::Revert { oid })?],
        Commands::Branch(command) => {
            let request = match command {
                BranchCommands::Create { name } => Request::CreateBranch { name },
                BranchCommands::List => Request::ListBranches,
                BranchCommands::Rename { old, new } => Request::RenameBranch { old, new },
                BranchCommands::Delete { name } => Request::DeleteBranch { name },
            };
            vec![execute(request)?]
        }
        Commands::Checkout { branch, create } => {
            let request = if create {
                Request::SwitchOrCreate { name: branch }
            } else {
                Request::Switch { name: branch }
            };
            vec![execute(request)?]
        }
        Commands::Merge { branch } => vec![execute(Request::Merge { source: branch })?],
        Commands::Rebase { branch } => vec![execute(Request::Rebase { target: branch })?],
        Commands::Tag(command) => {
            let request = match command {
                TagCommands::Create { name } => Request::CreateTag { name },
                TagCommands::List => Request::ListTags,
            };
            vec![execute(request)?]
        }
        Commands::Push => vec![execute(Request::Push)?],
        Commands::Pull => vec![execute(Request::Pull)?],
    };

    for response in responses {
        println!("{response}");
    }

    Ok(())
}
