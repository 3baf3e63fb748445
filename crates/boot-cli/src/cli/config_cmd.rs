use super::*;

pub(super) fn handle_config(args: ConfigArgs, audit: &BootLog) -> anyhow::Result<()> {
    match args.command {
        ConfigCommands::Init(args) => handle_init(args, audit),
        ConfigCommands::Show(args) => handle_show(args),
    }
}

fn handle_init(args: InitArgs, audit: &BootLog) -> anyhow::Result<()> {
    let result: anyhow::Result<()> = (|| {
        let config_path = match args.config {
            Some(path) => path,
            None => default_config_path()?,
        };
        let precondition =
            CommandSpec::parse(&args.precondition).context("parse precondition command")?;
        let config = SupervisorConfig {
            max_attempts: args.max_attempts,
            base_wait_seconds: args.base_wait_seconds,
            wait_increment_seconds: args.wait_increment_seconds,
            precondition: Some(precondition),
        };
        config.validate()?;
        config.save(&config_path)?;
        println!("Config saved to {}", config_path.display());
        Ok(())
    })();

    if let Err(err) = &result {
        let _ = audit.record(
            "config.init",
            BootStatus::Failed,
            None,
            None,
            Some(&err.to_string()),
        );
    } else {
        let event_id = audit.record("config.init", BootStatus::Ok, None, None, None)?;
        println!("Event ID: {event_id}");
    }
    result
}

fn handle_show(args: ShowArgs) -> anyhow::Result<()> {
    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let mut config = SupervisorConfig::load(&config_path)?;
    config.apply_env_overrides()?;
    let rendered = serde_json::to_string_pretty(&config).context("serialize config")?;
    println!("{rendered}");
    Ok(())
}
