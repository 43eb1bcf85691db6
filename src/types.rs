multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// Identifier of a deposited asset, assigned by the custodian that holds it.
pub type AssetId = u64;

/// Stable identifier of an action type: keccak256(target ++ endpoint).
pub type ActionMarker<M> = ManagedByteArray<M, 32>;

// ============================================================
// Checkpoints
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub enum CheckpointSubject<M: ManagedTypeApi> {
    TotalSupply,
    Account(ManagedAddress<M>),
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Checkpoint<M: ManagedTypeApi> {
    /// Block nonce the value was recorded at.
    pub point: u64,
    pub value: BigUint<M>,
}

// ============================================================
// Expulsion: governance-driven invalidation of an asset
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct ExpulsionRecord<M: ManagedTypeApi> {
    pub expelled: bool,
    /// Reputation of the asset still circulating; burnExpelled drains it.
    pub remaining_to_burn: BigUint<M>,
}

// ============================================================
// Voting configuration
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct VotingConfig<M: ManagedTypeApi> {
    /// Minimum share of the snapshot supply voting aye (100% = 100 * 10^18).
    pub support: BigUint<M>,
    /// Minimum share of ayes among cast votes.
    pub min_accept_quorum: BigUint<M>,
    /// Voting window in seconds.
    pub timeout: u64,
}

// ============================================================
// Proposal Action: what an approved proposal executes
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub enum ProposalAction<M: ManagedTypeApi> {
    SetDefaultVotingConfig(VotingConfig<M>),
    SetVotingConfig {
        marker: ActionMarker<M>,
        config: VotingConfig<M>,
    },
    Expel(AssetId),
    ApproveMint(AssetId),
    AddFundRule {
        ipfs_hash: ManagedBuffer<M>,
        description: ManagedBuffer<M>,
    },
    DisableFundRule(u64),
    SetFeeContract {
        address: ManagedAddress<M>,
        enabled: bool,
    },
    SetCustodian {
        address: ManagedAddress<M>,
        enabled: bool,
    },
    /// Arbitrary endpoint on another contract. An empty endpoint is a plain
    /// EGLD transfer.
    Call {
        target: ManagedAddress<M>,
        endpoint: ManagedBuffer<M>,
        arguments: ManagedVec<M, ManagedBuffer<M>>,
    },
}

impl<M: ManagedTypeApi> ProposalAction<M> {
    /// Endpoint name under which an action of the fund itself is marked.
    /// `None` for external calls, whose marker comes from their target.
    pub fn internal_endpoint(&self) -> Option<&'static str> {
        match self {
            ProposalAction::SetDefaultVotingConfig(_) => Some("setDefaultVotingConfig"),
            ProposalAction::SetVotingConfig { .. } => Some("setVotingConfig"),
            ProposalAction::Expel(_) => Some("expel"),
            ProposalAction::ApproveMint(_) => Some("approveMint"),
            ProposalAction::AddFundRule { .. } => Some("addFundRule"),
            ProposalAction::DisableFundRule(_) => Some("disableFundRule"),
            ProposalAction::SetFeeContract { .. } => Some("setFeeContract"),
            ProposalAction::SetCustodian { .. } => Some("setCustodian"),
            ProposalAction::Call { .. } => None,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, ProposalAction::Call { .. })
    }
}

// ============================================================
// Proposal lifecycle
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum ProposalStatus {
    Null,
    /// Voting is open.
    Active,
    /// Thresholds met; an external call is in flight.
    Approved,
    /// Action applied. Terminal.
    Executed,
    /// Approval foreclosed or timed out without thresholds. Terminal.
    Rejected,
    /// Approved, but the action itself failed. Terminal.
    ExecutionFailed,
}

// ============================================================
// Proposal record
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone)]
pub struct Proposal<M: ManagedTypeApi> {
    pub id: u64,
    pub proposer: ManagedAddress<M>,
    pub action: ProposalAction<M>,
    /// EGLD sent along with an external call.
    pub value: BigUint<M>,
    pub description: ManagedBuffer<M>,
    pub marker: ActionMarker<M>,
    pub status: ProposalStatus,
    /// Block nonce whose balances weigh the votes.
    pub creation_point: u64,
    pub created_at: u64,
    pub timeout_at: u64,
    pub total_supply_snapshot: BigUint<M>,
    pub voting_config: VotingConfig<M>,
    pub total_ayes: BigUint<M>,
    pub total_nays: BigUint<M>,
}

// ============================================================
// Votes
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Copy, PartialEq, Debug)]
pub enum VoteChoice {
    Pending,
    Aye,
    Nay,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct VoteRecord<M: ManagedTypeApi> {
    pub voter: ManagedAddress<M>,
    pub choice: VoteChoice,
    pub weight: BigUint<M>,
}

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct VotingProgress<M: ManagedTypeApi> {
    pub ayes_share: BigUint<M>,
    pub nays_share: BigUint<M>,
    pub current_support: BigUint<M>,
    pub required_support: BigUint<M>,
    pub min_accept_quorum: BigUint<M>,
    pub timeout_at: u64,
}

// ============================================================
// Fund rules
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct FundRule<M: ManagedTypeApi> {
    pub id: u64,
    pub active: bool,
    pub ipfs_hash: ManagedBuffer<M>,
    pub description: ManagedBuffer<M>,
    pub created_at: u64,
}
