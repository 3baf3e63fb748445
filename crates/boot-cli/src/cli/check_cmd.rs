use super::*;

pub(super) fn handle_check(args: CheckArgs, audit: &BootLog) -> anyhow::Result<()> {
    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let mut config = SupervisorConfig::load(&config_path)?;
    config.apply_env_overrides()?;
    let Some(precondition) = config.precondition.clone() else {
        anyhow::bail!(
            "no precondition command configured; run `boot-cli config init -- <command>` first"
        );
    };

    match command::run_to_completion(&precondition) {
        Ok(()) => {
            println!("Precondition succeeded: {precondition}");
            let event_id = audit.record(
                "check.run",
                BootStatus::Ok,
                Some(&precondition.to_string()),
                Some(1),
                None,
            )?;
            println!("Event ID: {event_id}");
            Ok(())
        }
        Err(err) => {
            let _ = audit.record(
                "check.run",
                BootStatus::Failed,
                Some(&precondition.to_string()),
                Some(1),
                Some(&err.to_string()),
            );
            Err(err.context("precondition check failed"))
        }
    }
}
