//! `marktex layout` command implementation.

use clap::Args;
use marktex_layout::{LayoutParams, compute_layout};

use super::DocumentArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the layout command.
#[derive(Args)]
pub(crate) struct LayoutArgs {
    /// Print the print stylesheet instead of the layout parameters.
    #[arg(long)]
    print_css: bool,

    #[command(flatten)]
    document: DocumentArgs,
}

impl LayoutArgs {
    /// Execute the layout command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.document.load_config()?;
        let layout = compute_layout(&config.document);
        Output::new().data(&describe(&layout, self.print_css)?)?;
        Ok(())
    }
}

fn describe(layout: &LayoutParams, print_css: bool) -> Result<String, CliError> {
    if print_css {
        Ok(layout.print_stylesheet())
    } else {
        Ok(serde_json::to_string_pretty(layout)?)
    }
}
