use anyhow::Context;
use boot_core::audit::{BootLog, BootStatus};
use boot_core::command::{self, CommandSpec};
use boot_core::config::{SupervisorConfig, default_config_path};
use boot_core::handoff;
use boot_core::supervisor::{self, PreconditionOutcome};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod app;
mod args;
mod check_cmd;
mod config_cmd;
mod run_cmd;

use args::*;

use check_cmd::handle_check;
use config_cmd::handle_config;
use run_cmd::handle_run;

pub fn run() -> anyhow::Result<()> {
    app::run()
}
