use crate::error::{Result, StormctlError};
use crate::types::ControlStructure;

/// Total number of control decisions in one policy: every structure
/// contributes `genes_per_step` settings for each step of the horizon.
pub fn policy_length(controls: &[ControlStructure], horizon: usize) -> usize {
    controls
        .iter()
        .map(|c| c.kind.genes_per_step() * horizon)
        .sum()
}

/// Split a flat policy into one equal-size block per control structure.
///
/// The blocks concatenate back to the input in order. Uneven lengths are
/// rejected instead of truncated, so no trailing settings can be dropped
/// on the floor.
pub fn split_policy(policy: &[u8], n_controls: usize) -> Result<Vec<&[u8]>> {
    if n_controls == 0 {
        return Err(StormctlError::Encoding(
            "cannot split a policy across zero control structures".to_string(),
        ));
    }
    if policy.is_empty() {
        return Err(StormctlError::Encoding(
            "cannot split an empty policy".to_string(),
        ));
    }
    if policy.len() % n_controls != 0 {
        return Err(StormctlError::Encoding(format!(
            "policy length {} is not divisible by {} control structures",
            policy.len(),
            n_controls
        )));
    }
    Ok(policy.chunks_exact(policy.len() / n_controls).collect())
}
