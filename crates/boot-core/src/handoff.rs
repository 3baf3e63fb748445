use crate::command::CommandSpec;
use anyhow::Context;
use std::process::Command;

/// Replaces the current process image with the server command. Stdio and
/// environment are inherited; on success this never returns.
#[cfg(unix)]
pub fn exec_handoff(spec: &CommandSpec) -> anyhow::Result<()> {
    use std::os::unix::process::CommandExt;

    let err = Command::new(&spec.program).args(&spec.args).exec();
    Err(err).with_context(|| format!("exec {}", spec.program))
}

/// Without exec, the closest equivalent: spawn the server, wait for it, and
/// exit with its exit code so the supervisor's lifecycle mirrors the child's.
#[cfg(not(unix))]
pub fn exec_handoff(spec: &CommandSpec) -> anyhow::Result<()> {
    let status = Command::new(&spec.program)
        .args(&spec.args)
        .status()
        .with_context(|| format!("launch {}", spec.program))?;
    std::process::exit(status.code().unwrap_or(1));
}
