//! CLI command implementations.

pub(crate) mod improve;
pub(crate) mod layout;
pub(crate) mod render;
pub(crate) mod watch;

use std::path::PathBuf;

use clap::Args;
use marktex_config::{CliSettings, Config};
use marktex_layout::{PageSize, ViewMode};

use crate::error::CliError;

pub(crate) use improve::ImproveArgs;
pub(crate) use layout::LayoutArgs;
pub(crate) use render::RenderArgs;
pub(crate) use watch::WatchArgs;

/// Document settings shared by the rendering commands.
#[derive(Args)]
pub(crate) struct DocumentArgs {
    /// Path to configuration file (default: auto-discover marktex.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Paper size: A4 or Letter (overrides config).
    #[arg(long)]
    page_size: Option<PageSize>,

    /// On-screen view: continuous or paged (overrides config).
    #[arg(long)]
    view_mode: Option<ViewMode>,

    /// Page margins in rem (overrides config).
    #[arg(long)]
    margins: Option<f32>,

    /// Base font size in pixels (overrides config).
    #[arg(long)]
    font_size: Option<u32>,

    /// Line-height multiplier (overrides config).
    #[arg(long)]
    line_height: Option<f32>,
}

impl DocumentArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            page_size: self.page_size,
            view_mode: self.view_mode,
            margins: self.margins,
            font_size: self.font_size,
            line_height: self.line_height,
        }
    }

    /// Load configuration with these arguments applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        Ok(Config::load(
            self.config.as_deref(),
            Some(&self.cli_settings()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        document: DocumentArgs,
    }

    #[test]
    fn test_overrides_from_flags() {
        let harness = Harness::try_parse_from([
            "test",
            "--page-size",
            "letter",
            "--view-mode",
            "paged",
            "--margins",
            "1.5",
        ])
        .unwrap();
        let settings = harness.document.cli_settings();
        assert_eq!(settings.page_size, Some(PageSize::Letter));
        assert_eq!(settings.view_mode, Some(ViewMode::Paged));
        assert_eq!(settings.margins, Some(1.5));
        assert_eq!(settings.font_size, None);
    }

    #[test]
    fn test_unknown_page_size_rejected() {
        assert!(Harness::try_parse_from(["test", "--page-size", "A3"]).is_err());
    }
}
