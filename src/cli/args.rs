//! Command line argument parsing and validation.
//!
//! Commands keep their colon-style names (`remote:url`) and the short Git-like
//! names (`sha`, `push`, `log`, ...) as aliases of each other.

use crate::error::CliError;
use clap::{Parser, Subcommand};

/// Git remotes and release commits for platform apps
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_platform_remote",
    version,
    about = "Git remotes and release commits for platform apps",
    long_about = "Manage the Git remote of a platform app and run git against deployed releases.

Release names (v42) are translated to the commit they deployed; the commit is
fetched from the app repository when it is not available locally.

Usage:
  kodegen_platform_remote sha v42
  kodegen_platform_remote log v101..v103
  kodegen_platform_remote checkout -b not_broken v123
  kodegen_platform_remote push --app shop-staging

--app and --remote may also follow git arguments (log v1 --app shop). After a
bare -- everything is handed to git."
)]
pub struct Args {
    /// App to operate on
    #[arg(short, long, global = true, env = "PLATFORM_APP", value_name = "APP")]
    pub app: Option<String>,

    /// Use the app bound to this Git remote
    #[arg(short, long, global = true, value_name = "REMOTE")]
    pub remote: Option<String>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the Git remote name or Git URL for the app
    #[command(name = "remote")]
    Remote,

    /// Show the Git URL for the app
    #[command(name = "remote:url")]
    Url,

    /// Show the name of the Git remote for the app
    #[command(name = "remote:name")]
    Name,

    /// Add a Git remote for the app (NAME defaults to the app name)
    #[command(name = "remote:add")]
    Add {
        /// Remote name
        name: Option<String>,
    },

    /// Show the commit SHA for the given or latest release
    ///
    /// Prints the full SHA when the commit is available locally, otherwise the
    /// short SHA from the API and exits with status 1.
    #[command(name = "sha", visible_alias = "remote:sha")]
    Sha {
        /// Release name, e.g. v42
        release: Option<String>,
    },

    /// git push the given REFSPEC to the app remote
    ///
    /// REFSPEC defaults to HEAD:master. When given without a colon, :master is appended.
    #[command(name = "push", visible_alias = "remote:push")]
    Push {
        /// Force push
        #[arg(short, long)]
        force: bool,

        /// Don't actually send the updates
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// REFSPEC followed by extra git push arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "REFSPEC")]
        args: Vec<String>,
    },

    /// git fetch from the app Git remote
    ///
    /// Without a remote for the app, fetches the repository URL into FETCH_HEAD.
    #[command(name = "fetch", visible_alias = "remote:fetch")]
    Fetch {
        /// Extra git fetch arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Invoke git log on release commits
    ///
    /// Release names and ranges (v102..v103) are translated to commits. Without
    /// any release in the arguments, the latest release is logged.
    #[command(name = "log", visible_alias = "remote:log")]
    Log {
        /// git log arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Invoke git checkout on a release commit (defaults to the latest release)
    #[command(name = "checkout", visible_alias = "remote:checkout")]
    Checkout {
        /// git checkout arguments, with at most one release name
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

impl Command {
    /// Name used in messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Remote => "remote",
            Command::Url => "remote:url",
            Command::Name => "remote:name",
            Command::Add { .. } => "remote:add",
            Command::Sha { .. } => "sha",
            Command::Push { .. } => "push",
            Command::Fetch { .. } => "fetch",
            Command::Log { .. } => "log",
            Command::Checkout { .. } => "checkout",
        }
    }

    /// Arguments handed through to git, for commands that take them
    pub fn passthrough(&self) -> Option<&[String]> {
        match self {
            Command::Push { args, .. }
            | Command::Fetch { args }
            | Command::Log { args }
            | Command::Checkout { args } => Some(args),
            _ => None,
        }
    }

    fn passthrough_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            Command::Push { args, .. }
            | Command::Fetch { args }
            | Command::Log { args }
            | Command::Checkout { args } => Some(args),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum GlobalOption {
    App,
    Remote,
}

/// Recognize `--app`, `--app=X`, `--remote` and `--remote=X`
///
/// Short forms stay with git: `-a` and `-r` mean something to several git commands.
fn global_option(arg: &str) -> Option<(GlobalOption, Option<String>)> {
    let (flag, value) = match arg.split_once('=') {
        Some((flag, value)) => (flag, Some(value.to_string())),
        None => (arg, None),
    };
    let option = match flag {
        "--app" => GlobalOption::App,
        "--remote" => GlobalOption::Remote,
        _ => return None,
    };
    Some((option, value))
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        let mut args = Self::parse();
        args.hoist_global_options();
        args
    }

    /// Take `--app` and `--remote` back out of the git passthrough arguments
    ///
    /// Passthrough commands collect everything after their first argument, so
    /// `log v1 --app shop` would otherwise hand `--app shop` to git. Scanning
    /// stops at `--`. A flag without a value is left in place for [`Args::validate`].
    pub fn hoist_global_options(&mut self) {
        let Args {
            app,
            remote,
            command,
        } = self;
        let Some(rest) = command.passthrough_mut() else {
            return;
        };

        let mut kept = Vec::with_capacity(rest.len());
        let mut iter = std::mem::take(rest).into_iter();

        while let Some(arg) = iter.next() {
            if arg == "--" {
                kept.push(arg);
                kept.extend(iter.by_ref());
                break;
            }

            match global_option(&arg) {
                None => kept.push(arg),
                Some((option, inline)) => match inline.or_else(|| iter.next()) {
                    Some(value) => match option {
                        GlobalOption::App => *app = Some(value),
                        GlobalOption::Remote => *remote = Some(value),
                    },
                    None => kept.push(arg),
                },
            }
        }

        *rest = kept;
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), CliError> {
        let invalid = |reason: String| CliError::InvalidArguments { reason };

        if self.app.as_deref().is_some_and(|a| a.trim().is_empty()) {
            return Err(invalid("--app must not be empty".to_string()));
        }

        if let Command::Add { name: Some(name) } = &self.command
            && (name.is_empty() || name.starts_with('-'))
        {
            return Err(invalid(format!("Invalid remote name: '{name}'")));
        }

        if let Some(rest) = self.command.passthrough()
            && let Some(flag) = rest
                .iter()
                .take_while(|arg| arg.as_str() != "--")
                .find(|arg| global_option(arg).is_some())
        {
            return Err(invalid(format!("{flag} requires a value")));
        }

        Ok(())
    }
}
