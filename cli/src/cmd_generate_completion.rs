// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, io};

use clap::{ArgMatches, Command, ValueEnum, arg, value_parser};
use clap_complete::{Generator, generate};
use eventdesk_core::APP_NAME;

use crate::Cli;

/// Prints the completion script of `eventdesk` to stdout, e.g.
/// `eventdesk generate-completion fish > ~/.config/fish/completions/eventdesk.fish`.
#[derive(Debug, Clone, Copy)]
pub struct CmdGenerateCompletion {
    pub shell: Shell,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "generate-completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print the eventdesk completion script for a shell")
            .hide(true)
            .arg(
                arg!(shell: <SHELL> "Shell to write the script for")
                    .value_parser(value_parser!(Shell)),
            )
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let shell = matches.get_one::<Shell>("shell").copied();
        Self {
            shell: shell.unwrap_or(Shell::Bash), // required by clap
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(shell = ?self.shell, "writing completion script...");
        self.shell.write_script(&mut io::stdout());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Nushell,
    #[clap(name = "powershell")]
    #[allow(clippy::enum_variant_names)]
    PowerShell,
    Zsh,
}

impl Shell {
    /// Writes the script for the whole command tree, `event` and `schedule` included.
    pub fn write_script(self, buf: &mut impl io::Write) {
        use clap_complete::Shell as Builtin;

        match self {
            Shell::Bash => write_with(Builtin::Bash, buf),
            Shell::Elvish => write_with(Builtin::Elvish, buf),
            Shell::Fish => write_with(Builtin::Fish, buf),
            Shell::PowerShell => write_with(Builtin::PowerShell, buf),
            Shell::Zsh => write_with(Builtin::Zsh, buf),
            Shell::Nushell => write_with(clap_complete_nushell::Nushell {}, buf),
        }
    }
}

fn write_with(generator: impl Generator, buf: &mut impl io::Write) {
    let mut cmd = Cli::command();
    generate(generator, &mut cmd, APP_NAME, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut out = vec![];
        shell.write_script(&mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_script_covers_event_and_schedule() {
        let bash = script(Shell::Bash);
        assert!(bash.contains(APP_NAME));
        assert!(bash.contains("schedule"));
        assert!(bash.contains("event"));

        let nu = script(Shell::Nushell);
        assert!(nu.contains("schedule"));
    }

    #[test]
    fn test_parse_shell_names() {
        for (name, expected) in [
            ("bash", Shell::Bash),
            ("elvish", Shell::Elvish),
            ("fish", Shell::Fish),
            ("nushell", Shell::Nushell),
            ("powershell", Shell::PowerShell),
            ("zsh", Shell::Zsh),
        ] {
            let matches = Cli::command()
                .try_get_matches_from([APP_NAME, CmdGenerateCompletion::NAME, name])
                .unwrap_or_else(|e| panic!("cannot parse shell '{name}': {e}"));
            let sub = matches.subcommand_matches(CmdGenerateCompletion::NAME).unwrap();
            assert_eq!(CmdGenerateCompletion::from(sub).shell, expected);
        }
    }
}
