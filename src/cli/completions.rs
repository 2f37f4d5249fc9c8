use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use super::Cli;

#[derive(Args, Debug)]
pub struct CompletionsCommand {
    /// Shell to print the completion script for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn execute(cmd: CompletionsCommand) -> Result<()> {
    write_completions(cmd.shell, &mut io::stdout().lock())
}

/// Write the completion script for `cw` and its subcommands
fn write_completions(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut app = Cli::command();
    let bin = app.get_name().to_string();
    generate(shell, &mut app, bin, out);
    out.flush()?;
    Ok(())
}
