//! Consensus rule pipeline
//!
//! The node's rule engine runs these identifiers in registration order and
//! stops at the first rejection. Only identifiers and order live here.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::ordering::{check_precedence, check_unique};
use crate::error::RuleOrderingViolation;

/// Validation stage a consensus rule belongs to, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RuleStage {
    /// Header-only checks, run before the block body is available
    Header,
    /// Integrity and contextual checks over the block body
    PartialValidation,
    /// Checks that read and write the coin view
    FullValidation,
}

impl RuleStage {
    pub const ALL: [RuleStage; 3] =
        [RuleStage::Header, RuleStage::PartialValidation, RuleStage::FullValidation];
}

/// Identifier of a consensus rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConsensusRule {
    // header
    HeaderTimeChecks,
    HeaderTimeChecksPos,
    PosFutureDrift,
    CheckDifficultyPos,
    HeaderVersion,
    ProvenHeaderSize,
    ProvenHeaderCoinstake,

    // integrity
    BlockMerkleRoot,
    PosBlockSignatureRepresentation,
    PosBlockSignature,

    // partial validation
    SetActivationDeploymentsPartialValidation,
    PosTimeMask,
    TransactionLocktimeActivation,
    CoinbaseHeightActivation,
    WitnessCommitments,
    BlockSize,
    EnsureCoinbase,
    CheckPowTransaction,
    CheckPosTransaction,
    CheckSigOps,
    Coinstake,

    // full validation
    SetActivationDeploymentsFullValidation,
    CheckDifficultyHybrid,
    LoadCoinview,
    TransactionDuplicationActivation,
    CoinviewUpdate,
    ColdStaking,
    SaveCoinview,
}

impl ConsensusRule {
    /// Stage this rule must be registered in
    pub fn stage(self) -> RuleStage {
        use ConsensusRule::*;
        match self {
            HeaderTimeChecks | HeaderTimeChecksPos | PosFutureDrift | CheckDifficultyPos
            | HeaderVersion | ProvenHeaderSize | ProvenHeaderCoinstake => RuleStage::Header,

            BlockMerkleRoot
            | PosBlockSignatureRepresentation
            | PosBlockSignature
            | SetActivationDeploymentsPartialValidation
            | PosTimeMask
            | TransactionLocktimeActivation
            | CoinbaseHeightActivation
            | WitnessCommitments
            | BlockSize
            | EnsureCoinbase
            | CheckPowTransaction
            | CheckPosTransaction
            | CheckSigOps
            | Coinstake => RuleStage::PartialValidation,

            SetActivationDeploymentsFullValidation
            | CheckDifficultyHybrid
            | LoadCoinview
            | TransactionDuplicationActivation
            | CoinviewUpdate
            | ColdStaking
            | SaveCoinview => RuleStage::FullValidation,
        }
    }

    /// Name the rule engine resolves to an implementation
    pub fn name(self) -> &'static str {
        use ConsensusRule::*;
        match self {
            HeaderTimeChecks => "HeaderTimeChecksRule",
            HeaderTimeChecksPos => "HeaderTimeChecksPosRule",
            PosFutureDrift => "PosFutureDriftRule",
            CheckDifficultyPos => "CheckDifficultyPosRule",
            HeaderVersion => "StratisHeaderVersionRule",
            ProvenHeaderSize => "ProvenHeaderSizeRule",
            ProvenHeaderCoinstake => "ProvenHeaderCoinstakeRule",
            BlockMerkleRoot => "BlockMerkleRootRule",
            PosBlockSignatureRepresentation => "PosBlockSignatureRepresentationRule",
            PosBlockSignature => "PosBlockSignatureRule",
            SetActivationDeploymentsPartialValidation => {
                "SetActivationDeploymentsPartialValidationRule"
            }
            PosTimeMask => "PosTimeMaskRule",
            TransactionLocktimeActivation => "TransactionLocktimeActivationRule",
            CoinbaseHeightActivation => "CoinbaseHeightActivationRule",
            WitnessCommitments => "WitnessCommitmentsRule",
            BlockSize => "BlockSizeRule",
            EnsureCoinbase => "EnsureCoinbaseRule",
            CheckPowTransaction => "CheckPowTransactionRule",
            CheckPosTransaction => "CheckPosTransactionRule",
            CheckSigOps => "CheckSigOpsRule",
            Coinstake => "StraxCoinstakeRule",
            SetActivationDeploymentsFullValidation => "SetActivationDeploymentsFullValidationRule",
            CheckDifficultyHybrid => "CheckDifficultyHybridRule",
            LoadCoinview => "LoadCoinviewRule",
            TransactionDuplicationActivation => "TransactionDuplicationActivationRule",
            CoinviewUpdate => "StraxCoinviewRule",
            ColdStaking => "StraxColdStakingRule",
            SaveCoinview => "SaveCoinviewRule",
        }
    }
}

impl fmt::Display for ConsensusRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pairs that must keep their relative order because the later rule reads
/// state the earlier one produces.
pub const CONSENSUS_RULE_DEPENDENCIES: &[(ConsensusRule, ConsensusRule)] = &[
    (ConsensusRule::ProvenHeaderSize, ConsensusRule::ProvenHeaderCoinstake),
    (ConsensusRule::SetActivationDeploymentsPartialValidation, ConsensusRule::TransactionLocktimeActivation),
    (ConsensusRule::SetActivationDeploymentsPartialValidation, ConsensusRule::CoinbaseHeightActivation),
    (ConsensusRule::SetActivationDeploymentsPartialValidation, ConsensusRule::WitnessCommitments),
    (ConsensusRule::SetActivationDeploymentsFullValidation, ConsensusRule::TransactionDuplicationActivation),
    (ConsensusRule::LoadCoinview, ConsensusRule::TransactionDuplicationActivation),
    (ConsensusRule::TransactionDuplicationActivation, ConsensusRule::CoinviewUpdate),
    // cold-stake flag is set while CoinviewUpdate evaluates input scripts
    (ConsensusRule::CoinviewUpdate, ConsensusRule::ColdStaking),
    (ConsensusRule::ColdStaking, ConsensusRule::SaveCoinview),
];

/// Rules of one stage, in registration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedRules {
    pub stage: RuleStage,
    pub rules: Vec<ConsensusRule>,
}

/// Frozen, staged consensus rule list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsensusRuleSet {
    stages: Vec<StagedRules>,
}

impl ConsensusRuleSet {
    pub fn stages(&self) -> &[StagedRules] {
        &self.stages
    }

    /// Rules registered for `stage`, empty if the stage was never opened
    pub fn stage(&self, stage: RuleStage) -> &[ConsensusRule] {
        self.stages
            .iter()
            .find(|s| s.stage == stage)
            .map(|s| s.rules.as_slice())
            .unwrap_or(&[])
    }

    /// All rules in execution order
    pub fn iter(&self) -> impl Iterator<Item = ConsensusRule> + '_ {
        self.stages.iter().flat_map(|s| s.rules.iter().copied())
    }

    pub fn to_vec(&self) -> Vec<ConsensusRule> {
        self.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.stages.iter().map(|s| s.rules.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of `rule` in execution order
    pub fn position(&self, rule: ConsensusRule) -> Option<usize> {
        self.iter().position(|r| r == rule)
    }

    /// Verify stage order, stage membership, uniqueness and declared dependencies
    pub fn check_ordering(&self) -> Result<(), RuleOrderingViolation> {
        for pair in self.stages.windows(2) {
            if pair[0].stage >= pair[1].stage {
                return Err(RuleOrderingViolation::StageOutOfOrder {
                    stage: format!("{:?}", pair[1].stage),
                    after: format!("{:?}", pair[0].stage),
                });
            }
        }

        for staged in &self.stages {
            if let Some(rule) = staged.rules.iter().find(|r| r.stage() != staged.stage) {
                return Err(RuleOrderingViolation::WrongStage {
                    rule: rule.to_string(),
                    expected: format!("{:?}", rule.stage()),
                    found: format!("{:?}", staged.stage),
                });
            }
        }

        let sequence = self.to_vec();
        check_unique(&sequence)?;
        check_precedence(&sequence, CONSENSUS_RULE_DEPENDENCIES)
    }
}

/// Append-only builder for a [`ConsensusRuleSet`]
#[derive(Debug, Default)]
pub struct ConsensusRuleAssembler {
    stages: Vec<StagedRules>,
}

impl ConsensusRuleAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new stage; following registrations land in it
    pub fn stage(&mut self, stage: RuleStage) -> &mut Self {
        self.stages.push(StagedRules { stage, rules: Vec::new() });
        self
    }

    /// Append a rule to the most recently opened stage, opening the rule's
    /// own stage first if none is open.
    pub fn register(&mut self, rule: ConsensusRule) -> &mut Self {
        if self.stages.is_empty() {
            self.stage(rule.stage());
        }
        if let Some(current) = self.stages.last_mut() {
            current.rules.push(rule);
        }
        self
    }

    pub fn build(self) -> ConsensusRuleSet {
        for staged in &self.stages {
            debug!(stage = ?staged.stage, rules = staged.rules.len(), "consensus stage assembled");
        }
        ConsensusRuleSet { stages: self.stages }
    }

    /// Rule pipeline for proof-of-stake Amaza networks
    pub fn assemble() -> ConsensusRuleSet {
        use ConsensusRule::*;

        let mut assembler = Self::new();

        assembler
            .stage(RuleStage::Header)
            .register(HeaderTimeChecks)
            .register(HeaderTimeChecksPos)
            .register(PosFutureDrift)
            .register(CheckDifficultyPos)
            .register(HeaderVersion)
            .register(ProvenHeaderSize)
            .register(ProvenHeaderCoinstake);

        assembler
            .stage(RuleStage::PartialValidation)
            .register(BlockMerkleRoot)
            .register(PosBlockSignatureRepresentation)
            .register(PosBlockSignature)
            .register(SetActivationDeploymentsPartialValidation)
            .register(PosTimeMask)
            // contextual checks gated by activation height
            .register(TransactionLocktimeActivation)
            .register(CoinbaseHeightActivation)
            .register(WitnessCommitments)
            .register(BlockSize)
            // per-block structure
            .register(EnsureCoinbase)
            .register(CheckPowTransaction)
            .register(CheckPosTransaction)
            .register(CheckSigOps)
            .register(Coinstake);

        assembler
            .stage(RuleStage::FullValidation)
            .register(SetActivationDeploymentsFullValidation)
            .register(CheckDifficultyHybrid)
            .register(LoadCoinview)
            .register(TransactionDuplicationActivation)
            // BIP68, sigop limits and block reward accounting
            .register(CoinviewUpdate)
            .register(ColdStaking)
            .register(SaveCoinview);

        assembler.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ConsensusRule::*;

    #[test]
    fn test_stage_order() {
        let rules = ConsensusRuleAssembler::assemble();
        let stages: Vec<RuleStage> = rules.stages().iter().map(|s| s.stage).collect();
        assert_eq!(stages, RuleStage::ALL.to_vec());
        assert_eq!(rules.len(), 28);
    }

    #[test]
    fn test_assembled_set_passes_ordering_check() {
        assert_eq!(ConsensusRuleAssembler::assemble().check_ordering(), Ok(()));
    }

    #[test]
    fn test_header_stage() {
        let rules = ConsensusRuleAssembler::assemble();
        assert_eq!(
            rules.stage(RuleStage::Header),
            &[
                HeaderTimeChecks,
                HeaderTimeChecksPos,
                PosFutureDrift,
                CheckDifficultyPos,
                HeaderVersion,
                ProvenHeaderSize,
                ProvenHeaderCoinstake,
            ]
        );
    }

    #[test]
    fn test_full_validation_stage() {
        let rules = ConsensusRuleAssembler::assemble();
        assert_eq!(
            rules.stage(RuleStage::FullValidation),
            &[
                SetActivationDeploymentsFullValidation,
                CheckDifficultyHybrid,
                LoadCoinview,
                TransactionDuplicationActivation,
                CoinviewUpdate,
                ColdStaking,
                SaveCoinview,
            ]
        );
    }

    #[test]
    fn test_coinview_chain_positions() {
        let rules = ConsensusRuleAssembler::assemble();
        let pos = |rule| rules.position(rule).unwrap();
        assert!(pos(LoadCoinview) < pos(TransactionDuplicationActivation));
        assert!(pos(TransactionDuplicationActivation) < pos(CoinviewUpdate));
        assert!(pos(CoinviewUpdate) < pos(ColdStaking));
        assert!(pos(ColdStaking) < pos(SaveCoinview));
    }

    #[test]
    fn test_every_rule_sits_in_its_stage() {
        let rules = ConsensusRuleAssembler::assemble();
        for staged in rules.stages() {
            assert!(staged.rules.iter().all(|r| r.stage() == staged.stage));
        }
    }

    #[test]
    fn test_cold_staking_before_coinview_update_is_rejected() {
        let mut sequence = ConsensusRuleAssembler::assemble().to_vec();
        let update = sequence.iter().position(|r| *r == CoinviewUpdate).unwrap();
        let cold = sequence.iter().position(|r| *r == ColdStaking).unwrap();
        sequence.swap(update, cold);
        assert_eq!(
            check_precedence(&sequence, CONSENSUS_RULE_DEPENDENCIES),
            Err(RuleOrderingViolation::OutOfOrder {
                before: "StraxCoinviewRule".into(),
                after: "StraxColdStakingRule".into(),
            })
        );
    }

    #[test]
    fn test_swapped_load_and_save_is_rejected() {
        let mut sequence = ConsensusRuleAssembler::assemble().to_vec();
        let load = sequence.iter().position(|r| *r == LoadCoinview).unwrap();
        let save = sequence.iter().position(|r| *r == SaveCoinview).unwrap();
        sequence.swap(load, save);
        assert_eq!(
            check_precedence(&sequence, CONSENSUS_RULE_DEPENDENCIES),
            Err(RuleOrderingViolation::OutOfOrder {
                before: "LoadCoinviewRule".into(),
                after: "TransactionDuplicationActivationRule".into(),
            })
        );
    }

    #[test]
    fn test_stage_reversal_is_rejected() {
        let mut assembler = ConsensusRuleAssembler::new();
        assembler.stage(RuleStage::FullValidation).register(LoadCoinview);
        assembler.stage(RuleStage::Header).register(HeaderTimeChecks);
        assert!(matches!(
            assembler.build().check_ordering(),
            Err(RuleOrderingViolation::StageOutOfOrder { .. })
        ));
    }

    #[test]
    fn test_rule_in_wrong_stage_is_rejected() {
        let mut assembler = ConsensusRuleAssembler::new();
        assembler.stage(RuleStage::Header).register(BlockMerkleRoot);
        assert!(matches!(
            assembler.build().check_ordering(),
            Err(RuleOrderingViolation::WrongStage { .. })
        ));
    }

    #[test]
    fn test_register_without_stage_opens_rule_stage() {
        let mut assembler = ConsensusRuleAssembler::new();
        assembler.register(LoadCoinview);
        let rules = assembler.build();
        assert_eq!(rules.stage(RuleStage::FullValidation), &[LoadCoinview]);
        assert!(rules.stage(RuleStage::Header).is_empty());
    }
}
