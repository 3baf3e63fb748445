use super::*;

pub fn run() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let audit = BootLog::open_default()?;
    let cli = Cli::parse();
    info!(command = command_label(&cli.command), "Running command");

    let result = match cli.command {
        Commands::Run(args) => handle_run(args, &audit),
        Commands::Check(args) => handle_check(args, &audit),
        Commands::Config(args) => handle_config(args, &audit),
    };

    if let Err(err) = &result {
        let _ = audit.record(
            "app.error",
            BootStatus::Failed,
            None,
            None,
            Some(&err.to_string()),
        );
    }

    result
}

fn command_label(command: &Commands) -> &'static str {
    match command {
        Commands::Run(_) => "run",
        Commands::Check(_) => "check",
        Commands::Config(_) => "config",
    }
}
