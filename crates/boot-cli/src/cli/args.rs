use super::*;
use boot_core::config::{
    DEFAULT_BASE_WAIT_SECONDS, DEFAULT_MAX_ATTEMPTS, DEFAULT_WAIT_INCREMENT_SECONDS,
};

#[derive(Parser)]
#[command(author, version, about)]
pub(super) struct Cli {
    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(clap::Subcommand)]
pub(super) enum Commands {
    #[command(about = "Retry the configured precondition, then hand off to the server command")]
    Run(RunArgs),
    #[command(about = "Run the configured precondition once and report the result")]
    Check(CheckArgs),
    #[command(about = "Manage config")]
    Config(ConfigArgs),
}

#[derive(Parser)]
pub(super) struct RunArgs {
    #[arg(long, help = "Maximum precondition attempts before degraded startup")]
    pub(super) max_attempts: Option<u32>,
    #[arg(long, help = "Wait before the second attempt, in seconds")]
    pub(super) base_wait_seconds: Option<u64>,
    #[arg(long, help = "Added to the wait after each failed attempt, in seconds")]
    pub(super) wait_increment_seconds: Option<u64>,
    #[arg(long)]
    pub(super) config: Option<PathBuf>,
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "SERVER_COMMAND",
        help = "Server command to hand off to, with its arguments"
    )]
    pub(super) server: Vec<String>,
}

#[derive(Parser)]
pub(super) struct CheckArgs {
    #[arg(long)]
    pub(super) config: Option<PathBuf>,
}

#[derive(Parser)]
pub(super) struct ConfigArgs {
    #[command(subcommand)]
    pub(super) command: ConfigCommands,
}

#[derive(clap::Subcommand)]
pub(super) enum ConfigCommands {
    #[command(about = "Initialize config with a precondition command")]
    Init(InitArgs),
    #[command(about = "Print the effective config")]
    Show(ShowArgs),
}

#[derive(Parser)]
pub(super) struct InitArgs {
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub(super) max_attempts: u32,
    #[arg(long, default_value_t = DEFAULT_BASE_WAIT_SECONDS)]
    pub(super) base_wait_seconds: u64,
    #[arg(long, default_value_t = DEFAULT_WAIT_INCREMENT_SECONDS)]
    pub(super) wait_increment_seconds: u64,
    #[arg(long)]
    pub(super) config: Option<PathBuf>,
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "PRECONDITION_COMMAND"
    )]
    pub(super) precondition: Vec<String>,
}

#[derive(Parser)]
pub(super) struct ShowArgs {
    #[arg(long)]
    pub(super) config: Option<PathBuf>,
}
