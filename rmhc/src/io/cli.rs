use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Room width in layout units
    #[arg(short = 'W', long, default_value_t = 160.0)]
    pub width: f64,
    /// Room height in layout units
    #[arg(short = 'H', long, default_value_t = 120.0)]
    pub height: f64,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    #[arg(short, long, value_name = "FOLDER", default_value = "solutions")]
    pub solution_folder: PathBuf,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
}
