use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use mygit::areas::repository::Repository;
use mygit::artifacts::checkout::ResetMode;
use mygit::artifacts::core::error::RepositoryError;
use mygit::artifacts::index::to_slash_path;
use mygit::artifacts::merge::MergeOutcome;
use mygit::artifacts::objects::object_type::ObjectType;
use mygit::artifacts::objects::tree::Tree;
use mygit::artifacts::status::file_change::FileChangeType;
use mygit::commands::porcelain::checkout::CheckoutTarget;
use mygit::telemetry;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "mygit",
    version = "0.1.0",
    about = "A small content-addressed version control system",
    long_about = "mygit stores snapshots in a content-addressed object database \
    under .mygit and offers the usual plumbing and porcelain commands: \
    staging, committing, history, reset, checkout and three-way merge.",
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
        short = 'C',
        global = true,
        value_name = "PATH",
        help = "Run as if started in <PATH> instead of the current directory"
    )]
    directory: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Compute the blob id of a file and optionally store it"
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "cat-file",
        about = "Print the type or the content of an object",
        group(ArgGroup::new("view").required(true).args(["show_type", "pretty"]))
    )]
    CatFile {
        #[arg(short = 't', long = "type", help = "Print the object type")]
        show_type: bool,
        #[arg(short = 'p', long, help = "Print the object content")]
        pretty: bool,
        #[arg(index = 1, help = "The object id")]
        oid: String,
    },
    #[command(name = "ls-tree", about = "List the rows of a tree or of a commit's tree")]
    LsTree {
        #[arg(index = 1, help = "A tree id or anything resolving to a commit")]
        target: String,
    },
    #[command(name = "write-tree", about = "Write the index as a tree object")]
    WriteTree,
    #[command(
        name = "commit-tree",
        about = "Create a commit object from a tree without moving any reference"
    )]
    CommitTree {
        #[arg(index = 1, help = "The tree id")]
        tree: String,
        #[arg(short, long, help = "The commit message")]
        message: String,
        #[arg(short = 'p', long = "parent", help = "A parent commit (repeatable)")]
        parents: Vec<String>,
    },
    #[command(name = "add", about = "Add file contents to the index")]
    Add {
        #[arg(index = 1, required = true, help = "Files or directories to stage")]
        paths: Vec<PathBuf>,
    },
    #[command(name = "rm", about = "Remove a file from the index and the working tree")]
    Rm {
        #[arg(long, help = "Only remove the path from the index")]
        cached: bool,
        #[arg(index = 1)]
        path: PathBuf,
    },
    #[command(name = "ls-files", about = "List the paths tracked by the index")]
    LsFiles,
    #[command(name = "show-ref", about = "List branches and tags with their commit ids")]
    ShowRef,
    #[command(name = "rev-parse", about = "Resolve a name to an object id")]
    RevParse {
        #[arg(index = 1, help = "Branch, tag, HEAD, refs/... path or full object id")]
        reference: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit in the repository with the specified commit message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show the first-parent commit history")]
    Log {
        #[arg(index = 1, help = "Where to start (defaults to HEAD)")]
        start: Option<String>,
        #[arg(long, help = "One line per commit")]
        oneline: bool,
    },
    #[command(name = "status", about = "Compare the index with the working tree")]
    Status,
    #[command(
        name = "reset",
        about = "Move HEAD and optionally the index and working tree",
        group(ArgGroup::new("mode").args(["soft", "mixed", "hard"]))
    )]
    Reset {
        #[arg(long, help = "Only move HEAD")]
        soft: bool,
        #[arg(long, help = "Move HEAD and reset the index (default)")]
        mixed: bool,
        #[arg(long, help = "Move HEAD, reset the index and overwrite working files")]
        hard: bool,
        #[arg(index = 1, default_value = "HEAD")]
        target: String,
    },
    #[command(name = "checkout", about = "Switch branches or detach HEAD at a commit")]
    Checkout {
        #[arg(short = 'b', value_name = "NEW_BRANCH", conflicts_with = "target", help = "Create a branch at HEAD and switch to it")]
        create_branch: Option<String>,
        #[arg(index = 1, required_unless_present = "create_branch")]
        target: Option<String>,
    },
    #[command(name = "merge", about = "Merge another commit into HEAD")]
    Merge {
        #[arg(index = 1)]
        target: String,
    },
    #[command(name = "merge-base", about = "Print the common ancestor a merge would use")]
    MergeBase {
        #[arg(index = 1)]
        left: String,
        #[arg(index = 2)]
        right: String,
    },
    #[command(name = "branch", about = "List branches, or create one")]
    Branch {
        #[arg(index = 1)]
        name: Option<String>,
        #[arg(index = 2, requires = "name", help = "Start point (defaults to HEAD)")]
        source: Option<String>,
    },
    #[command(name = "tag", about = "Create a lightweight tag at HEAD")]
    Tag {
        #[arg(index = 1)]
        name: String,
    },
}

fn main() -> ExitCode {
    telemetry::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            exit_code_for(&error)
        }
    }
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    let code = error
        .downcast_ref::<RepositoryError>()
        .map(RepositoryError::exit_code)
        .unwrap_or(1);

    to_exit_code(code)
}

fn to_exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn run(cli: Cli) -> Result<ExitCode> {
    let root = match cli.directory {
        Some(directory) => directory,
        None => std::env::current_dir()?,
    };
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Init { path } => {
            let path = path.map(|path| root.join(path)).unwrap_or(root);
            let repository = Repository::create(&path)?;
            repository.init()?;

            writeln!(
                stdout,
                "Initialized empty mygit repository in {}",
                repository.repository_path().display()
            )?;
        }
        Commands::HashObject { write, file } => {
            let repository = Repository::open(&root)?;
            let oid = repository.hash_object(&file, write)?;

            writeln!(stdout, "{oid}")?;
        }
        Commands::CatFile {
            show_type,
            pretty: _,
            oid,
        } => {
            let repository = Repository::open(&root)?;
            let (object_type, payload) = repository.cat_file(&oid)?;

            if show_type {
                writeln!(stdout, "{object_type}")?;
            } else {
                stdout.write_all(&payload)?;
                if object_type != ObjectType::Blob && !payload.is_empty() && !payload.ends_with(b"\n")
                {
                    writeln!(stdout)?;
                }
            }
        }
        Commands::LsTree { target } => {
            let repository = Repository::open(&root)?;
            print_tree(&mut stdout, &repository.ls_tree(&target)?)?;
        }
        Commands::WriteTree => {
            let repository = Repository::open(&root)?;

            writeln!(stdout, "{}", repository.write_tree()?)?;
        }
        Commands::CommitTree {
            tree,
            message,
            parents,
        } => {
            let repository = Repository::open(&root)?;

            writeln!(stdout, "{}", repository.commit_tree(&tree, &message, &parents)?)?;
        }
        Commands::Add { paths } => {
            let repository = Repository::open(&root)?;
            repository.add(&paths)?;
        }
        Commands::Rm { cached, path } => {
            let repository = Repository::open(&root)?;
            repository.rm(&path, cached)?;

            writeln!(stdout, "rm '{}'", to_slash_path(&path))?;
        }
        Commands::LsFiles => {
            let repository = Repository::open(&root)?;

            for path in repository.ls_files()? {
                writeln!(stdout, "{}", to_slash_path(&path))?;
            }
        }
        Commands::ShowRef => {
            let repository = Repository::open(&root)?;

            for (oid, sym_ref_name) in repository.show_ref()? {
                writeln!(stdout, "{oid} {sym_ref_name}")?;
            }
        }
        Commands::RevParse { reference } => {
            let repository = Repository::open(&root)?;

            writeln!(stdout, "{}", repository.rev_parse(&reference)?)?;
        }
        Commands::Commit { message } => {
            let repository = Repository::open(&root)?;
            let summary = repository.commit(&message)?;
            let is_root = if summary.is_root { "(root-commit) " } else { "" };

            writeln!(
                stdout,
                "[{}{}] {}",
                is_root,
                summary.oid.to_short_oid(),
                summary.short_message
            )?;
        }
        Commands::Log { start, oneline } => {
            let repository = Repository::open(&root)?;

            for entry in repository.log(start.as_deref())? {
                let (oid, commit) = entry?;

                if oneline {
                    writeln!(stdout, "{} {}", oid.to_short_oid(), commit.short_message())?;
                    continue;
                }

                writeln!(stdout, "commit {oid}")?;
                if commit.is_merge() {
                    let parents = commit
                        .parents()
                        .iter()
                        .map(|parent| parent.to_short_oid())
                        .collect::<Vec<_>>();
                    writeln!(stdout, "Merge: {}", parents.join(" "))?;
                }
                writeln!(stdout, "Author: {}", commit.author().display_name())?;
                writeln!(stdout, "Date:   {}", commit.author().readable_timestamp())?;
                writeln!(stdout)?;
                for message_line in commit.message().lines() {
                    writeln!(stdout, "    {message_line}")?;
                }
                writeln!(stdout)?;
            }
        }
        Commands::Status => {
            let repository = Repository::open(&root)?;
            let status = repository.status()?;

            for change in [
                FileChangeType::Staged,
                FileChangeType::Modified,
                FileChangeType::Deleted,
                FileChangeType::Untracked,
            ] {
                let paths = status.paths(change);
                if paths.is_empty() {
                    continue;
                }

                writeln!(stdout, "{}", change.heading())?;
                for path in paths {
                    writeln!(stdout, "  {}", to_slash_path(path))?;
                }
            }

            if status.is_clean() {
                writeln!(stdout, "nothing to commit, working tree clean")?;
            }
        }
        Commands::Reset {
            soft,
            mixed: _,
            hard,
            target,
        } => {
            let repository = Repository::open(&root)?;
            let mode = if soft {
                ResetMode::Soft
            } else if hard {
                ResetMode::Hard
            } else {
                ResetMode::Mixed
            };

            let oid = repository.reset(&target, mode)?;

            writeln!(stdout, "HEAD is now at {}", oid.to_short_oid())?;
        }
        Commands::Checkout {
            create_branch,
            target,
        } => {
            let repository = Repository::open(&root)?;

            match repository.checkout(target.as_deref(), create_branch.as_deref())? {
                CheckoutTarget::Branch(branch_name) if create_branch.is_some() => {
                    writeln!(stdout, "Switched to a new branch '{branch_name}'")?;
                }
                CheckoutTarget::Branch(branch_name) => {
                    writeln!(stdout, "Switched to branch '{branch_name}'")?;
                }
                CheckoutTarget::Detached(oid) => {
                    writeln!(stdout, "HEAD is now at {} (detached)", oid.to_short_oid())?;
                }
            }
        }
        Commands::Merge { target } => {
            let repository = Repository::open(&root)?;

            match repository.merge(&target)? {
                MergeOutcome::UpToDate => writeln!(stdout, "Already up to date.")?,
                MergeOutcome::Merged(oid) => {
                    writeln!(stdout, "Merge commit created: {oid}")?;
                }
                MergeOutcome::Conflicted(paths) => {
                    for path in &paths {
                        writeln!(
                            stdout,
                            "CONFLICT (content): Merge conflict in {}",
                            to_slash_path(path)
                        )?;
                    }
                    writeln!(
                        stdout,
                        "Automatic merge failed; fix conflicts and then commit the result."
                    )?;

                    return Ok(to_exit_code(RepositoryError::MergeConflicts(paths).exit_code()));
                }
            }
        }
        Commands::MergeBase { left, right } => {
            let repository = Repository::open(&root)?;
            let base = repository
                .merge_base(&left, &right)?
                .ok_or(RepositoryError::UnrelatedHistories)?;

            writeln!(stdout, "{base}")?;
        }
        Commands::Branch { name, source } => {
            let repository = Repository::open(&root)?;

            match name {
                Some(name) => {
                    repository.branch(&name, source.as_deref())?;
                }
                None => {
                    for listing in repository.branches()? {
                        let marker = if listing.is_current { "*" } else { " " };
                        writeln!(stdout, "{marker} {}", listing.name)?;
                    }
                }
            }
        }
        Commands::Tag { name } => {
            let repository = Repository::open(&root)?;
            repository.tag(&name)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_tree(stdout: &mut impl Write, tree: &Tree) -> Result<()> {
    for (path, entry) in tree.entries() {
        writeln!(stdout, "{} {} {}", entry.mode, entry.oid, to_slash_path(path))?;
    }

    Ok(())
}
