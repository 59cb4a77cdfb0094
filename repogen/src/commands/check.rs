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
pub struct CheckCommand {
    /// Path to repogen.toml (defaults to ./repogen.toml)
    #[arg(short, long, default_value = "repogen.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let toml = RepogenToml::open(&self.config).unwrap_or_exit();
        let report = ops::check(&toml, &self.config)?;
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
