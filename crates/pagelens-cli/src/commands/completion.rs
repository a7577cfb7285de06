use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use std::io;

pub const AFTER_HELP: &str = "SUPPORTED SHELLS:
    bash, zsh, fish, powershell, elvish

INSTALLATION:
    bash:  pagelens completion --shell bash >> ~/.bashrc
    zsh:   pagelens completion --shell zsh > \"${fpath[1]}/_pagelens\"
           (or append to ~/.zshrc)
    fish:  pagelens completion --shell fish > ~/.config/fish/completions/pagelens.fish";

/// Write the completion script for `shell` to stdout
pub fn execute(shell: Shell, cmd: &mut Command) -> Result<()> {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, &mut io::stdout());
    Ok(())
}
