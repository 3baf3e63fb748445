use crate::backoff::linear_delay;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RetrySchedule {
    pub max_attempts: u32,
    pub base_wait_seconds: u64,
    pub wait_increment_seconds: u64,
}

impl Default for RetrySchedule {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_wait_seconds: 10,
            wait_increment_seconds: 5,
        }
    }
}

impl RetrySchedule {
    pub fn delay_before_next(&self, attempt: u32) -> Duration {
        linear_delay(self.base_wait_seconds, self.wait_increment_seconds, attempt)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PreconditionOutcome {
    Succeeded { attempts: u32 },
    Exhausted { attempts: u32 },
}

impl PreconditionOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            PreconditionOutcome::Succeeded { attempts } => *attempts,
            PreconditionOutcome::Exhausted { attempts } => *attempts,
        }
    }
}

/// Runs `job` up to `schedule.max_attempts` times, sleeping the scheduled
/// delay between failed attempts. Exhaustion is tolerated: the caller is
/// expected to proceed with handoff either way.
pub fn run_precondition<F, S>(
    schedule: &RetrySchedule,
    mut job: F,
    mut sleep: S,
) -> PreconditionOutcome
where
    F: FnMut() -> anyhow::Result<()>,
    S: FnMut(Duration),
{
    let max_attempts = schedule.max_attempts.max(1);
    let mut attempt: u32 = 1;
    loop {
        match job() {
            Ok(()) => {
                info!(attempt, "precondition succeeded");
                return PreconditionOutcome::Succeeded { attempts: attempt };
            }
            Err(err) if attempt >= max_attempts => {
                warn!(
                    error = %err,
                    attempts = attempt,
                    "precondition attempts exhausted; continuing in degraded mode"
                );
                return PreconditionOutcome::Exhausted { attempts: attempt };
            }
            Err(err) => {
                let delay = schedule.delay_before_next(attempt);
                warn!(
                    error = %err,
                    attempt,
                    wait_seconds = delay.as_secs(),
                    "precondition attempt failed; retrying"
                );
                sleep(delay);
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn schedule(max_attempts: u32) -> RetrySchedule {
        RetrySchedule {
            max_attempts,
            base_wait_seconds: 10,
            wait_increment_seconds: 5,
        }
    }

    #[test]
    fn immediate_success_runs_once_without_sleeping() {
        let calls = AtomicUsize::new(0);
        let mut sleeps: Vec<Duration> = Vec::new();
        let outcome = run_precondition(
            &schedule(5),
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
            |delay| sleeps.push(delay),
        );
        assert_eq!(outcome, PreconditionOutcome::Succeeded { attempts: 1 });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(sleeps.is_empty());
    }

    #[test]
    fn success_on_second_attempt_sleeps_base_wait_once() {
        let calls = AtomicUsize::new(0);
        let mut sleeps: Vec<Duration> = Vec::new();
        let outcome = run_precondition(
            &schedule(3),
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n == 0 {
                    anyhow::bail!("database not reachable");
                }
                Ok(())
            },
            |delay| sleeps.push(delay),
        );
        assert_eq!(outcome, PreconditionOutcome::Succeeded { attempts: 2 });
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(sleeps, vec![Duration::from_secs(10)]);
    }

    #[test]
    fn exhaustion_runs_max_attempts_with_linear_waits() {
        let calls = AtomicUsize::new(0);
        let mut sleeps: Vec<Duration> = Vec::new();
        let outcome = run_precondition(
            &schedule(5),
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                anyhow::bail!("still failing")
            },
            |delay| sleeps.push(delay),
        );
        assert_eq!(outcome, PreconditionOutcome::Exhausted { attempts: 5 });
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        let waits: Vec<u64> = sleeps.iter().map(|delay| delay.as_secs()).collect();
        assert_eq!(waits, vec![10, 15, 20, 25]);
    }

    #[test]
    fn single_attempt_never_sleeps() {
        let mut sleeps: Vec<Duration> = Vec::new();
        let outcome = run_precondition(
            &schedule(1),
            || anyhow::bail!("failing"),
            |delay| sleeps.push(delay),
        );
        assert_eq!(outcome, PreconditionOutcome::Exhausted { attempts: 1 });
        assert!(sleeps.is_empty());
    }

    #[test]
    fn zero_max_attempts_still_runs_once() {
        let calls = AtomicUsize::new(0);
        let outcome = run_precondition(
            &schedule(0),
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                anyhow::bail!("failing")
            },
            |_| {},
        );
        assert_eq!(outcome, PreconditionOutcome::Exhausted { attempts: 1 });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn outcome_reports_attempts() {
        assert_eq!(PreconditionOutcome::Succeeded { attempts: 2 }.attempts(), 2);
        assert_eq!(PreconditionOutcome::Exhausted { attempts: 5 }.attempts(), 5);
    }
}
