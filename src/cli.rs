use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};

/// Help colors
fn help_styles() -> Styles {
    let bold_green = Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::Green)));
    Styles::styled()
        .header(bold_green)
        .usage(bold_green)
        .literal(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
        )
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
        .error(
            Style::new()
                .bold()
                .fg_color(Some(Color::Ansi(AnsiColor::Red))),
        )
}

#[derive(Parser)]
#[command(name = "baserepo")]
#[command(about = "Resolve the base GitLab repository of a working copy", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(disable_help_subcommand = true)]
#[command(styles = help_styles())]
pub struct Cli {
    /// Change working directory
    #[arg(short = 'C', global = true, value_name = "path")]
    pub directory: Option<PathBuf>,

    /// User config file path
    #[arg(long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Show commands and debug info
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the base repository
    ///
    /// Uses a saved resolution when one exists. Otherwise looks up the fork
    /// network and asks when there is more than one candidate; the answer is
    /// saved in git config.
    Base {
        /// Use this repository instead ([HOST/]OWNER/REPO)
        #[arg(short = 'R', long, value_name = "repo")]
        repo: Option<String>,

        /// Never ask or look anything up; fall back to the first remote
        #[arg(long)]
        no_prompt: bool,
    },

    /// List the GitLab projects behind the remotes
    Heads,

    /// List remotes in priority order with their saved resolutions
    Remotes,

    /// Forget saved resolutions
    Reset,
}
