//! `marktex render` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use marktex_renderer::{RenderPass, RenderTarget};

use super::DocumentArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the Markdown file.
    input: PathBuf,

    /// Output HTML file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render for print instead of screen.
    #[arg(long)]
    print: bool,

    #[command(flatten)]
    document: DocumentArgs,
}

impl RenderArgs {
    /// Execute the render command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.document.load_config()?;

        let text = std::fs::read_to_string(&self.input)?;
        let pass = marktex_renderer::Pipeline::new().run(&text, &config.document);
        report_warnings(&output, &pass);

        let render_target = target(self.print);
        match &self.output {
            Some(path) => {
                write_pass(&pass, render_target, path)?;
                output.success(&format!(
                    "Rendered {} -> {}",
                    self.input.display(),
                    path.display()
                ));
            }
            None => output.data(&pass.to_html(render_target))?,
        }
        Ok(())
    }
}

pub(crate) fn target(print: bool) -> RenderTarget {
    if print {
        RenderTarget::Print
    } else {
        RenderTarget::Screen
    }
}

pub(crate) fn report_warnings(output: &Output, pass: &RenderPass) {
    for warning in &pass.warnings {
        output.warning(&format!("warning: {warning}"));
    }
}

/// Write `pass` as HTML to `path`.
pub(crate) fn write_pass(
    pass: &RenderPass,
    target: RenderTarget,
    path: &Path,
) -> Result<(), CliError> {
    std::fs::write(path, pass.to_html(target))?;
    Ok(())
}
