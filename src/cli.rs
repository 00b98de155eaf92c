use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

use crate::alerts::AlertConfig;

#[derive(Parser, Debug)]
#[command(
    name = "stopwatch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Terminal stopwatch with pause/resume, laps and CSV lap export"
)]
pub struct Args {
    #[arg(
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Display refresh interval while running, in milliseconds."
    )]
    pub tick_ms: u64,

    #[arg(
        long,
        value_name = "DIR",
        default_value = ".",
        help = "Directory that receives stopwatch_laps.csv."
    )]
    pub export_dir: PathBuf,

    #[arg(
        long,
        default_value = "Stopwatch",
        help = "Window title shown while stopped and restored on reset."
    )]
    pub title: String,

    #[arg(long, default_value_t = 10, help = "Number of laps listed on screen.")]
    pub laps_shown: usize,

    #[arg(long, action, help = "Do not ring the terminal bell on notices.")]
    pub no_bell: bool,

    #[arg(long, action, help = "Leave the terminal window title alone.")]
    pub no_title: bool,

    #[arg(short, long, action = ArgAction::Count, help = "More logging (-v info, -vv debug).")]
    pub verbose: u8,
}

/// Runtime settings of the app, resolved from the command line.
#[derive(Clone, Debug)]
pub struct Settings {
    pub tick_ms: u64,
    pub export_dir: PathBuf,
    pub original_title: String,
    pub laps_shown: usize,
    pub set_title: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: 10,
            export_dir: PathBuf::from("."),
            original_title: String::from("Stopwatch"),
            laps_shown: 10,
            set_title: true,
        }
    }
}

impl Args {
    pub fn settings(&self) -> Settings {
        Settings {
            tick_ms: self.tick_ms,
            export_dir: self.export_dir.clone(),
            original_title: self.title.clone(),
            laps_shown: self.laps_shown,
            set_title: !self.no_title,
        }
    }

    pub fn alert_config(&self) -> AlertConfig {
        AlertConfig {
            bell: !self.no_bell,
            ..AlertConfig::default()
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
