//! `marktex improve` command implementation.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use marktex_assist::{GeminiClient, RequestSlot, improve_document};
use marktex_config::{API_KEY_ENV, AssistConfig, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the improve command.
#[derive(Args)]
pub(crate) struct ImproveArgs {
    /// Path to the Markdown file.
    input: PathBuf,

    /// What to do with the document, e.g. "fix grammar" or "continue writing".
    #[arg(short, long)]
    instruction: String,

    /// Overwrite the input file instead of printing the result.
    #[arg(long)]
    in_place: bool,

    /// Path to configuration file (default: auto-discover marktex.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ImproveArgs {
    /// Execute the improve command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let client = create_client(&config.assist, &output)?;

        let slot = RequestSlot::new();
        let mut buffer = std::fs::read_to_string(&self.input)?;
        output.info(&format!("Improving {}...", self.input.display()));
        improve_document(&client, &slot, &mut buffer, &self.instruction)?;

        if self.in_place {
            std::fs::write(&self.input, &buffer)?;
            output.success(&format!("Updated {}", self.input.display()));
        } else {
            output.data(&buffer)?;
        }
        Ok(())
    }
}

fn create_client(assist: &AssistConfig, output: &Output) -> Result<GeminiClient, CliError> {
    let client = GeminiClient::new(&assist.base_url, &assist.model, assist.api_key.as_deref())
        .inspect_err(|_| {
            output.info(&format!(
                "Set {API_KEY_ENV} or add the following to your marktex.toml:"
            ));
            output.info("\n[assist]");
            output.info(r#"api_key = "${GEMINI_API_KEY}""#);
        })?;
    Ok(client
        .with_timeout(Duration::from_secs(assist.timeout_secs))
        .with_context_limit(assist.context_limit))
}
