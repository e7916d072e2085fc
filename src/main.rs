#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::{Context, Result};
use colored::*;
use tracing_subscriber::EnvFilter;

use crate::{app::App, store::GradeFile};

mod app;
mod cli;
mod error;
mod form;
mod gpa;
mod grades;
mod pie_chart;
mod store;
mod utils;

fn run() -> Result<()> {
    let args = cli::get_args();

    let store = GradeFile::open(&args.grades)
        .with_context(|| format!("failed to load grade file {}", args.grades.display()))?;

    App::new(store).run();

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}
