use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use repogen_manifest::RepogenToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ListCommand {
    /// Path to repogen.toml (defaults to ./repogen.toml)
    #[arg(short, long, default_value = "repogen.toml")]
    pub config: PathBuf,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let toml = RepogenToml::open(&self.config).unwrap_or_exit();
        ops::list(&toml)?.render(&mut TerminalOutput::new());
        Ok(())
    }
}
