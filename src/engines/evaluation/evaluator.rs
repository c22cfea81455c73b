use crate::error::{Result, StormctlError};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

/// Scores one candidate policy; lower is better.
///
/// Implementations run the hydraulic simulation over the horizon and fold
/// flooding and target-deviation penalties into a single cost. Calls are
/// fanned out across a thread pool, so implementations must be callable
/// from several threads at once and must not depend on shared mutable
/// state. For reproducible runs the cost must be a pure function of the
/// policy and the fixed context.
pub trait Evaluator: Sync {
    fn evaluate(&self, policy: &[u8]) -> Result<f64>;
}

/// Everything the simulation needs besides the policy itself. Fixed once
/// per control horizon and shipped with every evaluation request.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationContext {
    pub hydraulics_path: PathBuf,
    pub process_path: PathBuf,
    pub sim_dt: f64,
    pub control_time_step: f64,
    pub n_control_steps: usize,
    pub control_structures: Vec<String>,
    pub target_depths: HashMap<String, f64>,
    pub node_flood_weights: HashMap<String, f64>,
    pub flood_weight: f64,
    pub dev_weight: f64,
}

#[derive(Serialize)]
struct EvaluationRequest<'a> {
    policy: &'a [u8],
    context: &'a EvaluationContext,
}

/// Treats the simulator as an external black box: one subprocess per
/// evaluation, the request as JSON on the child's stdin, the cost as a
/// single float on its stdout.
pub struct CommandEvaluator {
    command: String,
    args: Vec<String>,
    context: EvaluationContext,
    timeout: Option<Duration>,
}

impl CommandEvaluator {
    pub fn new(
        command: impl Into<String>,
        args: Vec<String>,
        context: EvaluationContext,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            command: command.into(),
            args,
            context,
            timeout,
        }
    }
}

impl Evaluator for CommandEvaluator {
    fn evaluate(&self, policy: &[u8]) -> Result<f64> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                StormctlError::Evaluation(format!("failed to spawn '{}': {}", self.command, e))
            })?;

        let request = EvaluationRequest {
            policy,
            context: &self.context,
        };
        let payload = serde_json::to_vec(&request)?;
        {
            let mut stdin = child.stdin.take().ok_or_else(|| {
                StormctlError::Evaluation("simulator stdin unavailable".to_string())
            })?;
            stdin.write_all(&payload).map_err(|e| {
                StormctlError::Evaluation(format!("failed to send request to simulator: {}", e))
            })?;
            // dropping the handle closes the pipe and lets the child see EOF
        }

        let output = match self.timeout {
            Some(limit) => wait_with_timeout(child, limit, &self.command)?,
            None => child.wait_with_output()?,
        };

        if !output.status.success() {
            return Err(StormctlError::Evaluation(format!(
                "simulator '{}' exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout.trim().parse::<f64>().map_err(|e| {
            StormctlError::Evaluation(format!(
                "simulator produced a non-numeric cost '{}': {}",
                stdout.trim(),
                e
            ))
        })
    }
}

fn wait_with_timeout(mut child: Child, limit: Duration, command: &str) -> Result<Output> {
    let deadline = Instant::now() + limit;
    loop {
        match child.try_wait()? {
            Some(_) => return Ok(child.wait_with_output()?),
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(StormctlError::Evaluation(format!(
                    "simulator '{}' timed out after {:.1}s",
                    command,
                    limit.as_secs_f64()
                )));
            }
            None => std::thread::sleep(Duration::from_millis(25)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> EvaluationContext {
        EvaluationContext {
            hydraulics_path: PathBuf::from("model.hsf"),
            process_path: PathBuf::from("model.inp"),
            sim_dt: 30.0,
            control_time_step: 900.0,
            n_control_steps: 3,
            control_structures: vec!["PUMP P1".to_string()],
            target_depths: HashMap::new(),
            node_flood_weights: HashMap::new(),
            flood_weight: 1.0,
            dev_weight: 1.0,
        }
    }

    fn sh(script: &str, timeout: Option<Duration>) -> CommandEvaluator {
        CommandEvaluator::new(
            "sh",
            vec!["-c".to_string(), script.to_string()],
            context(),
            timeout,
        )
    }

    #[cfg(unix)]
    #[test]
    fn parses_simulator_cost() {
        let evaluator = sh("cat >/dev/null; echo 4.25", None);
        let cost = evaluator.evaluate(&[1, 2, 3]).unwrap();
        assert_eq!(cost, 4.25);
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_an_evaluation_error() {
        let evaluator = sh("cat >/dev/null; echo boom >&2; exit 3", None);
        let err = evaluator.evaluate(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, StormctlError::Evaluation(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[cfg(unix)]
    #[test]
    fn garbage_output_is_an_evaluation_error() {
        let evaluator = sh("cat >/dev/null; echo not-a-number", None);
        let err = evaluator.evaluate(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, StormctlError::Evaluation(_)));
    }

    #[cfg(unix)]
    #[test]
    fn missing_command_is_an_evaluation_error() {
        let evaluator = CommandEvaluator::new(
            "definitely-not-a-real-simulator",
            Vec::new(),
            context(),
            None,
        );
        let err = evaluator.evaluate(&[0]).unwrap_err();
        assert!(matches!(err, StormctlError::Evaluation(_)));
    }

    #[cfg(unix)]
    #[test]
    fn timeout_kills_a_hung_simulator() {
        let evaluator = sh("cat >/dev/null; sleep 30", Some(Duration::from_millis(300)));
        let err = evaluator.evaluate(&[0]).unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}
