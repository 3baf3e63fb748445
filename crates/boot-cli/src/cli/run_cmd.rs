use super::*;

pub(super) fn handle_run(args: RunArgs, audit: &BootLog) -> anyhow::Result<()> {
    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let mut config = SupervisorConfig::load(&config_path)?;
    config.apply_env_overrides()?;
    if let Some(value) = args.max_attempts {
        config.max_attempts = value;
    }
    if let Some(value) = args.base_wait_seconds {
        config.base_wait_seconds = value;
    }
    if let Some(value) = args.wait_increment_seconds {
        config.wait_increment_seconds = value;
    }
    config.validate()?;

    let server = CommandSpec::parse(&args.server).context("parse server command")?;
    let Some(precondition) = config.precondition.clone() else {
        anyhow::bail!(
            "no precondition command configured; run `boot-cli config init -- <command>` first"
        );
    };

    let _ = audit.record(
        "run.start",
        BootStatus::Ok,
        Some(&server.to_string()),
        None,
        None,
    );
    println!(
        "Supervising startup: {precondition} (max {} attempts)",
        config.max_attempts
    );

    let schedule = config.schedule();
    let outcome = supervisor::run_precondition(
        &schedule,
        || command::run_to_completion(&precondition),
        std::thread::sleep,
    );

    match outcome {
        PreconditionOutcome::Succeeded { attempts } => {
            println!("Precondition succeeded after {attempts} attempt(s)");
            let _ = audit.record(
                "precondition.result",
                BootStatus::Ok,
                Some(&precondition.to_string()),
                Some(attempts),
                None,
            );
        }
        PreconditionOutcome::Exhausted { attempts } => {
            println!(
                "Precondition failed after {attempts} attempt(s); continuing in degraded mode"
            );
            let _ = audit.record(
                "precondition.result",
                BootStatus::Degraded,
                Some(&precondition.to_string()),
                Some(attempts),
                None,
            );
        }
    }

    println!("Handing off to {server}");
    let _ = audit.record(
        "handoff.exec",
        BootStatus::Ok,
        Some(&server.to_string()),
        None,
        None,
    );
    handoff::exec_handoff(&server)
}
