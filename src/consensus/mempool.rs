//! Mempool admission pipeline

use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::ordering::{check_precedence, check_unique};
use crate::error::RuleOrderingViolation;

/// Identifier of a mempool admission rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MempoolRule {
    CheckConflicts,
    CoinView,
    CreateMempoolEntry,
    CheckSigOps,
    TransactionFee,
    CheckRateLimit,
    CheckAncestors,
    CheckReplacement,
    CheckAllInputs,
    CheckTxOutDust,
}

impl MempoolRule {
    pub fn name(self) -> &'static str {
        match self {
            MempoolRule::CheckConflicts => "CheckConflictsMempoolRule",
            MempoolRule::CoinView => "StraxCoinViewMempoolRule",
            MempoolRule::CreateMempoolEntry => "CreateMempoolEntryMempoolRule",
            MempoolRule::CheckSigOps => "CheckSigOpsMempoolRule",
            MempoolRule::TransactionFee => "StraxTransactionFeeMempoolRule",
            MempoolRule::CheckRateLimit => "CheckRateLimitMempoolRule",
            MempoolRule::CheckAncestors => "CheckAncestorsMempoolRule",
            MempoolRule::CheckReplacement => "CheckReplacementMempoolRule",
            MempoolRule::CheckAllInputs => "CheckAllInputsMempoolRule",
            MempoolRule::CheckTxOutDust => "CheckTxOutDustRule",
        }
    }
}

impl fmt::Display for MempoolRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The entry must exist before anything that inspects it runs.
pub const MEMPOOL_RULE_DEPENDENCIES: &[(MempoolRule, MempoolRule)] = &[
    (MempoolRule::CheckConflicts, MempoolRule::CoinView),
    (MempoolRule::CoinView, MempoolRule::CreateMempoolEntry),
    (MempoolRule::CreateMempoolEntry, MempoolRule::CheckSigOps),
    (MempoolRule::CreateMempoolEntry, MempoolRule::TransactionFee),
    (MempoolRule::CreateMempoolEntry, MempoolRule::CheckAncestors),
    (MempoolRule::CreateMempoolEntry, MempoolRule::CheckReplacement),
    (MempoolRule::CoinView, MempoolRule::CheckAllInputs),
];

/// Frozen mempool rule list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MempoolRuleSet {
    rules: Vec<MempoolRule>,
}

impl MempoolRuleSet {
    pub fn rules(&self) -> &[MempoolRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn position(&self, rule: MempoolRule) -> Option<usize> {
        self.rules.iter().position(|r| *r == rule)
    }

    pub fn check_ordering(&self) -> Result<(), RuleOrderingViolation> {
        check_unique(&self.rules)?;
        check_precedence(&self.rules, MEMPOOL_RULE_DEPENDENCIES)
    }
}

/// Append-only builder for a [`MempoolRuleSet`]
#[derive(Debug, Default)]
pub struct MempoolRuleAssembler {
    rules: Vec<MempoolRule>,
}

impl MempoolRuleAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, rule: MempoolRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn build(self) -> MempoolRuleSet {
        debug!(rules = self.rules.len(), "mempool rules assembled");
        MempoolRuleSet { rules: self.rules }
    }

    pub fn assemble() -> MempoolRuleSet {
        let mut assembler = Self::new();
        assembler
            .register(MempoolRule::CheckConflicts)
            .register(MempoolRule::CoinView)
            .register(MempoolRule::CreateMempoolEntry)
            .register(MempoolRule::CheckSigOps)
            .register(MempoolRule::TransactionFee)
            .register(MempoolRule::CheckRateLimit)
            .register(MempoolRule::CheckAncestors)
            .register(MempoolRule::CheckReplacement)
            .register(MempoolRule::CheckAllInputs)
            .register(MempoolRule::CheckTxOutDust);
        assembler.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mempool_order() {
        let rules = MempoolRuleAssembler::assemble();
        assert_eq!(
            rules.rules(),
            &[
                MempoolRule::CheckConflicts,
                MempoolRule::CoinView,
                MempoolRule::CreateMempoolEntry,
                MempoolRule::CheckSigOps,
                MempoolRule::TransactionFee,
                MempoolRule::CheckRateLimit,
                MempoolRule::CheckAncestors,
                MempoolRule::CheckReplacement,
                MempoolRule::CheckAllInputs,
                MempoolRule::CheckTxOutDust,
            ]
        );
        assert_eq!(rules.check_ordering(), Ok(()));
    }

    #[test]
    fn test_fee_before_entry_is_rejected() {
        let mut assembler = MempoolRuleAssembler::new();
        assembler
            .register(MempoolRule::CheckConflicts)
            .register(MempoolRule::CoinView)
            .register(MempoolRule::TransactionFee)
            .register(MempoolRule::CreateMempoolEntry)
            .register(MempoolRule::CheckSigOps)
            .register(MempoolRule::CheckAncestors)
            .register(MempoolRule::CheckReplacement)
            .register(MempoolRule::CheckAllInputs);
        assert_eq!(
            assembler.build().check_ordering(),
            Err(RuleOrderingViolation::OutOfOrder {
                before: "CreateMempoolEntryMempoolRule".into(),
                after: "StraxTransactionFeeMempoolRule".into(),
            })
        );
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut assembler = MempoolRuleAssembler::new();
        assembler.register(MempoolRule::CheckConflicts).register(MempoolRule::CheckConflicts);
        assert!(matches!(
            assembler.build().check_ordering(),
            Err(RuleOrderingViolation::Duplicate(_))
        ));
    }
}
