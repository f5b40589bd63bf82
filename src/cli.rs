// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::NavigationConfig;
use crate::error::Result;
use crate::gallery::{self, Exhibit};

#[derive(Parser, Debug, Clone)]
#[command(name = "gallery-nav")]
#[command(about = "Walk-through gallery camera navigation", long_about = None)]
pub struct Cli {
    /// JSON file with navigation tuning overrides
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON array of exhibits (`[{"id": "...", "title": "..."}]`)
    #[arg(long, conflicts_with = "count")]
    pub exhibits: Option<PathBuf>,

    /// Number of placeholder exhibits when no exhibit file is given
    #[arg(long, default_value_t = 5)]
    pub count: usize,

    /// Replay a JSON input script headlessly and print the trajectory
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Disable the on-screen overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

impl Cli {
    pub fn load_config(&self) -> Result<NavigationConfig> {
        match &self.config {
            Some(path) => NavigationConfig::from_json_file(path),
            None => Ok(NavigationConfig::default()),
        }
    }

    pub fn load_exhibits(&self) -> Result<Vec<Exhibit>> {
        match &self.exhibits {
            Some(path) => gallery::load_exhibits(path),
            None => Ok(gallery::placeholder_exhibits(self.count)),
        }
    }
}
