use clap::Args;
use eyre::{Context, Result};
use kdb_introspect::AssembleOptions;

use super::DEFAULT_PACKAGE;
use crate::reports::{InspectReport, Report, TerminalOutput};
use crate::source::SourceArgs;

#[derive(Args)]
pub struct InspectCommand {
    #[command(flatten)]
    source: SourceArgs,

    /// Print the assembled metadata as JSON
    #[arg(long)]
    json: bool,
}

impl InspectCommand {
    pub fn run(&self) -> Result<()> {
        let options =
            AssembleOptions::new(DEFAULT_PACKAGE).source_args(self.source.command_line());
        let metadata = self.source.introspect(&options)?;

        if self.json {
            let json = serde_json::to_string_pretty(&metadata)
                .wrap_err("failed to serialize metadata")?;
            println!("{}", json);
        } else {
            let report = InspectReport::new(self.source.dialect, &metadata);
            report.render(&mut TerminalOutput::new());
        }

        Ok(())
    }
}
