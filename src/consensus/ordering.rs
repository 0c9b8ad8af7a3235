//! Registration-order constraints shared by the consensus and mempool pipelines

use std::fmt::Display;

use crate::error::RuleOrderingViolation;

/// Check that every `(before, after)` pair appears in `sequence` in that order
pub fn check_precedence<R>(sequence: &[R], pairs: &[(R, R)]) -> Result<(), RuleOrderingViolation>
where
    R: Copy + PartialEq + Display,
{
    let position = |rule: R| {
        sequence
            .iter()
            .position(|r| *r == rule)
            .ok_or_else(|| RuleOrderingViolation::MissingRule(rule.to_string()))
    };

    for &(before, after) in pairs {
        if position(before)? >= position(after)? {
            return Err(RuleOrderingViolation::OutOfOrder {
                before: before.to_string(),
                after: after.to_string(),
            });
        }
    }
    Ok(())
}

/// Reject a rule registered more than once
pub fn check_unique<R>(sequence: &[R]) -> Result<(), RuleOrderingViolation>
where
    R: PartialEq + Display,
{
    for (i, rule) in sequence.iter().enumerate() {
        if sequence[..i].contains(rule) {
            return Err(RuleOrderingViolation::Duplicate(rule.to_string()));
        }
    }
    Ok(())
}
