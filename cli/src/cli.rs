// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use eventdesk_core::{APP_NAME, Desk};
use futures::{FutureExt, future::BoxFuture};
use tracing_subscriber::EnvFilter;

use crate::cmd_event::{CmdEventDelete, CmdEventEdit, CmdEventList, CmdEventNew, CmdEventShow};
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::cmd_schedule::CmdSchedule;
use crate::config::parse_config;
use crate::util::OutputFormat;

/// Run the eventdesk command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
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
            .about("Manage events and their day-by-day schedules from the terminal.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(false) // allow default to event list
            .arg_required_else_help(false)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/eventdesk/config.toml on Linux and MacOS, \
%LOCALAPPDATA%/eventdesk/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(
                Command::new("event")
                    .alias("e")
                    .about("Manage your events")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdEventList::command())
                    .subcommand(CmdEventShow::command())
                    .subcommand(CmdEventNew::command())
                    .subcommand(CmdEventEdit::command())
                    .subcommand(CmdEventDelete::command()),
            )
            .subcommand(CmdSchedule::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some(("event", matches)) => match matches.subcommand() {
                Some((CmdEventList::NAME, matches)) => EventList(CmdEventList::from(matches)),
                Some((CmdEventShow::NAME, matches)) => EventShow(CmdEventShow::from(matches)),
                Some((CmdEventNew::NAME, matches)) => EventNew(CmdEventNew::from(matches)),
                Some((CmdEventEdit::NAME, matches)) => EventEdit(CmdEventEdit::from(matches)),
                Some((CmdEventDelete::NAME, matches)) => {
                    EventDelete(CmdEventDelete::from(matches))
                }
                _ => unreachable!(),
            },
            Some((CmdSchedule::NAME, matches)) => Schedule(CmdSchedule::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            None => EventList(CmdEventList {
                output_format: OutputFormat::Table,
            }),
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
    /// List events
    EventList(CmdEventList),

    /// Show one event with its schedule
    EventShow(CmdEventShow),

    /// Create an event in the TUI form
    EventNew(CmdEventNew),

    /// Edit an event in the TUI form
    EventEdit(CmdEventEdit),

    /// Delete an event
    EventDelete(CmdEventDelete),

    /// Edit the schedule of an event
    Schedule(CmdSchedule),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration
    #[rustfmt::skip]
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        use Commands::*;
        match self {
            EventList(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventShow(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventNew(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventEdit(a)   => Self::run_with(config, |x| a.run(x).boxed()).await,
            EventDelete(a) => Self::run_with(config, |x| a.run(x).boxed()).await,
            Schedule(a)    => Self::run_with(config, |x| a.run(x).boxed()).await,
            GenerateCompletion(a) => a.run(),
        }
    }

    async fn run_with<F>(config: Option<PathBuf>, f: F) -> Result<(), Box<dyn Error>>
    where
        F: for<'a> FnOnce(&'a Desk) -> BoxFuture<'a, Result<(), Box<dyn Error>>>,
    {
        tracing::debug!("parsing configuration...");
        let config = parse_config(config).await?;
        let desk = Desk::new(config).await?;
        f(&desk).await
    }
}
