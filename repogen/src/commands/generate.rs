use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use repogen_manifest::RepogenToml;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to repogen.toml (defaults to ./repogen.toml)
    #[arg(short, long, default_value = "repogen.toml")]
    pub config: PathBuf,

    /// Output directory (overrides the manifest's project.output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON snapshot of the pipeline after each phase to this directory
    #[arg(long, value_name = "DIR")]
    pub visualize: Option<PathBuf>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let toml = RepogenToml::open(&self.config).unwrap_or_exit();
        let output_dir = self.output.clone().unwrap_or_else(|| toml.output_dir());

        let report = ops::generate(
            &toml,
            GenerateOptions {
                output_dir: &output_dir,
                dry_run: self.dry_run,
                visualize: self.visualize.as_deref(),
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
