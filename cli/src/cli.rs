// SPDX-FileCopyrightText: 2025-2026 Edudesk Developers
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use edudesk_api::{ApiClient, Endpoint, Session, Synchronizer};
use edudesk_core::{APP_NAME, Draft, ValidationRules};
use futures::{FutureExt, future::BoxFuture};
use tracing_subscriber::EnvFilter;

use crate::cmd_class::CmdClassList;
use crate::cmd_event::{CmdEventCalendar, CmdEventDelete, CmdEventEdit, CmdEventList, CmdEventNew};
use crate::cmd_resource::{CmdResourceDelete, CmdResourceEdit, CmdResourceList, CmdResourceNew};
use crate::cmd_session::{CmdLogin, CmdLogout};
use crate::cmd_teacher::{CmdTeacherDelete, CmdTeacherEdit, CmdTeacherList, CmdTeacherNew};
use crate::config::{Config, parse_config};

const LOG_ENV: &str = "EDUDESK_LOG";

/// Run the Edudesk command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    }
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("School administration console for events, library resources and teachers.")
            .author("Edudesk Developers")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $EDUDESK_CONFIG, then \
$XDG_CONFIG_HOME/edudesk/config.toml on Linux and MacOS, %APPDATA%/edudesk/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdLogin::command())
            .subcommand(CmdLogout::command())
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Manage school events")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventList::command())
                    .subcommand(CmdEventCalendar::command())
                    .subcommand(CmdEventNew::command())
                    .subcommand(CmdEventEdit::command())
                    .subcommand(CmdEventDelete::command()),
            )
            .subcommand(
                Command::new("resource")
                    .alias("r")
                    .about("Manage the resource library")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdResourceList::command())
                    .subcommand(CmdResourceNew::command())
                    .subcommand(CmdResourceEdit::command())
                    .subcommand(CmdResourceDelete::command()),
            )
            .subcommand(
                Command::new("teacher")
                    .alias("t")
                    .about("Manage teacher accounts")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdTeacherList::command())
                    .subcommand(CmdTeacherNew::command())
                    .subcommand(CmdTeacherEdit::command())
                    .subcommand(CmdTeacherDelete::command()),
            )
            .subcommand(
                Command::new("class")
                    .alias("c")
                    .about("Browse class sections")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdClassList::command()),
            )
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(&matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(&matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some((CmdLogin::NAME, matches)) => Login(CmdLogin::from(matches)),
            Some((CmdLogout::NAME, matches)) => Logout(CmdLogout::from(matches)),
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventList::NAME, matches)) => EventList(CmdEventList::from(matches)),
                Some((CmdEventCalendar::NAME, matches)) => {
                    EventCalendar(CmdEventCalendar::from(matches))
                }
                Some((CmdEventNew::NAME, matches)) => EventNew(CmdEventNew::from(matches)),
                Some((CmdEventEdit::NAME, matches)) => EventEdit(CmdEventEdit::from(matches)),
                Some((CmdEventDelete::NAME, matches)) => EventDelete(CmdEventDelete::from(matches)),
                _ => unreachable!(),
            },
            Some(("resource", matches)) => match matches.subcommand() {
                Some((CmdResourceList::NAME, matches)) => {
                    ResourceList(CmdResourceList::from(matches))
                }
                Some((CmdResourceNew::NAME, matches)) => ResourceNew(CmdResourceNew::from(matches)),
                Some((CmdResourceEdit::NAME, matches)) => {
                    ResourceEdit(CmdResourceEdit::from(matches))
                }
                Some((CmdResourceDelete::NAME, matches)) => {
                    ResourceDelete(CmdResourceDelete::from(matches))
                }
                _ => unreachable!(),
            },
            Some(("teacher", matches)) => match matches.subcommand() {
                Some((CmdTeacherList::NAME, matches)) => TeacherList(CmdTeacherList::from(matches)),
                Some((CmdTeacherNew::NAME, matches)) => TeacherNew(CmdTeacherNew::from(matches)),
                Some((CmdTeacherEdit::NAME, matches)) => TeacherEdit(CmdTeacherEdit::from(matches)),
                Some((CmdTeacherDelete::NAME, matches)) => {
                    TeacherDelete(CmdTeacherDelete::from(matches))
                }
                _ => unreachable!(),
            },
            Some(("class", matches)) => match matches.subcommand() {
                Some((CmdClassList::NAME, matches)) => ClassList(CmdClassList::from(matches)),
                _ => unreachable!(),
            },
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Store an access token
    Login(CmdLogin),

    /// Forget the access token
    Logout(CmdLogout),

    /// List events
    EventList(CmdEventList),

    /// Show the month calendar
    EventCalendar(CmdEventCalendar),

    /// Add a new event
    EventNew(CmdEventNew),

    /// Edit an event
    EventEdit(CmdEventEdit),

    /// Delete an event
    EventDelete(CmdEventDelete),

    /// List library resources
    ResourceList(CmdResourceList),

    /// Add a library resource
    ResourceNew(CmdResourceNew),

    /// Edit a library resource
    ResourceEdit(CmdResourceEdit),

    /// Delete a library resource
    ResourceDelete(CmdResourceDelete),

    /// List teachers
    TeacherList(CmdTeacherList),

    /// Add a teacher
    TeacherNew(CmdTeacherNew),

    /// Edit a teacher
    TeacherEdit(CmdTeacherEdit),

    /// Delete a teacher
    TeacherDelete(CmdTeacherDelete),

    /// List class sections
    ClassList(CmdClassList),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            Login(a)          => Self::run_with(config, |x| a.run(x).boxed()).await,
            Logout(a)         => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventList(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventCalendar(a)  => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventNew(a)       => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventEdit(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventDelete(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            ResourceList(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            ResourceNew(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            ResourceEdit(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            ResourceDelete(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            TeacherList(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            TeacherNew(a)     => Self::run_with(config, |x| a.run(x).boxed()).await,
            TeacherEdit(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            TeacherDelete(a)  => Self::run_with(config, |x| a.run(x).boxed()).await,
            ClassList(a)      => Self::run_with(config, |x| a.run(x).boxed()).await,
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a Context) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        let ctx = Context::new(config).await?;
        f(&ctx).await
    }
}

/// Everything a command needs to talk to the backend.
#[derive(Debug, Clone)]
pub struct Context {
    client: ApiClient,
    rules: ValidationRules,
}

impl Context {
    /// Loads the stored session and builds the API client.
    pub async fn new(config: Config) -> Result<Self, Box<dyn Error>> {
        let state_dir = config.state_dir()?;
        let session = Session::load(&state_dir).await?;
        let client = ApiClient::new(config.api, session)?;
        Ok(Self {
            client,
            rules: config.validation,
        })
    }

    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    pub const fn session(&self) -> &Session {
        self.client.session()
    }

    /// A fresh synchronizer for the collection edited through `D`.
    pub fn synchronizer<D: Draft>(&self) -> Synchronizer<D>
    where
        D::Record: Endpoint,
    {
        Synchronizer::new(self.client.clone(), self.rules)
    }
}
