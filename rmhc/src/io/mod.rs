use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use log::{Level, LevelFilter, info, log};
use serde::Serialize;

use furnish_rs::io::JsonPolygon;

use crate::EPOCH;
use crate::config::RmhcConfig;
use crate::optimizer::SearchState;

pub mod cli;

/// Summary of a finished run, written next to the layout export.
#[derive(Debug, Serialize)]
pub struct RmhcOutput {
    pub config: RmhcConfig,
    pub iterations: usize,
    pub terminal_state: String,
    pub penalty: f64,
    pub layout: Vec<JsonPolygon>,
}

impl RmhcOutput {
    pub fn new(
        config: RmhcConfig,
        iterations: usize,
        state: SearchState,
        penalty: f64,
        layout: Vec<JsonPolygon>,
    ) -> Self {
        Self {
            config,
            iterations,
            terminal_state: format!("{state:?}"),
            penalty,
            layout,
        }
    }
}

pub fn write_json(output: &impl Serialize, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("could not create {path:?}"))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, output)
        .with_context(|| format!("could not write {path:?}"))?;
    info!("solution written to {path:?}");
    Ok(())
}

pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            let handle = std::thread::current();
            let thread_name = handle.name().unwrap_or("-");

            let duration = EPOCH.elapsed();
            let sec = duration.as_secs() % 60;
            let min = (duration.as_secs() / 60) % 60;
            let hours = (duration.as_secs() / 60) / 60;

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}] <{}>",
                record.level(),
                hours,
                min,
                sec,
                thread_name,
            );

            out.finish(format_args!("{prefix:<27}{message}"))
        })
        .level(level_filter)
        .chain(std::io::stdout())
        .apply()?;
    log!(Level::Info, "epoch: {}", jiff::Zoned::now());
    Ok(())
}
