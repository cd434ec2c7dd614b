//! Command line for the headless menu shell.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "wayline",
    version,
    about = "Build, inspect and drive the browser application menu without a window toolkit"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Platform variant to build for (defaults to the running OS).
    #[arg(long, value_enum, global = true)]
    pub platform: Option<PlatformArg>,

    /// URL of the active tab in the focused window.
    #[arg(long, value_name = "URL", global = true)]
    pub url: Option<String>,

    /// Treat the focused window as an app window.
    #[arg(long = "app-window", global = true)]
    pub app_window: bool,

    /// Mark the focused window as always on top.
    #[arg(long = "always-on-top", global = true)]
    pub always_on_top: bool,

    /// Start with every window closed.
    #[arg(long = "no-windows", global = true, conflicts_with = "url")]
    pub no_windows: bool,

    /// Menu settings file (default: <config dir>/wayline/menu.json).
    #[arg(long, value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the native menu tree.
    Show,

    /// Print the popup toolbar projection as JSON.
    Toolbar {
        /// Indent the output.
        #[arg(long)]
        pretty: bool,
    },

    /// Print the JSON schema of the toolbar projection.
    Schema,

    /// Write the effective settings back to the settings file, filling in defaults.
    WriteSettings,

    /// Invoke a menu item by top-level menu and id.
    Trigger {
        #[arg(value_name = "MENU")]
        menu: String,
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Feed a sequence of locations to the focused window and report rebuilds.
    Navigate {
        #[arg(value_name = "URL", required = true)]
        urls: Vec<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PlatformArg {
    Mac,
    Other,
}
