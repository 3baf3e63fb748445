use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::process::Command;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn parse(words: &[String]) -> anyhow::Result<Self> {
        let Some((program, args)) = words.split_first() else {
            anyhow::bail!("command must have at least a program name");
        };
        if program.is_empty() {
            anyhow::bail!("command program name must not be empty");
        }
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs the command with inherited stdio and environment, waiting for it to
/// finish. A non-zero exit or a spawn failure both surface as errors.
pub fn run_to_completion(spec: &CommandSpec) -> anyhow::Result<()> {
    let status = Command::new(&spec.program)
        .args(&spec.args)
        .status()
        .with_context(|| format!("spawn {}", spec.program))?;
    if !status.success() {
        anyhow::bail!("{spec} exited with status {status}");
    }
    Ok(())
}
