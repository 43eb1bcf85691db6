// ── Authorization ──

pub const ERR_NOT_CUSTODIAN: &str = "Only custodians can call this";
pub const ERR_NOT_FEE_CONTRACT: &str = "Only fee contracts can lock assets";
pub const ERR_NOT_MEMBER: &str = "Only members can propose";
pub const ERR_NOT_ASSET_OWNER: &str = "Not the asset owner";

// ── Precondition: ledger ──

pub const ERR_ZERO_AMOUNT: &str = "Amount must be positive";
pub const ERR_ASSET_EXPELLED: &str = "Asset is expelled";
pub const ERR_ALREADY_MINTED: &str = "Reputation already minted for asset";
pub const ERR_MINT_NOT_APPROVED: &str = "Mint not approved for asset";
pub const ERR_SELF_DELEGATION: &str = "Cannot delegate to yourself";
pub const ERR_INSUFFICIENT_DELEGATED: &str = "Not enough delegated balance";
pub const ERR_CANNOT_REVOKE_OWN: &str = "Cannot revoke from yourself";
pub const ERR_INSUFFICIENT_TO_REVOKE: &str = "Not enough reputation to revoke";
pub const ERR_ASSET_NOT_MINTED: &str = "No reputation minted for asset";
pub const ERR_ASSET_LOCKED: &str = "Asset is locked";
pub const ERR_REPUTATION_DELEGATED: &str = "Asset reputation is delegated to others";
pub const ERR_BURN_NOT_APPROVED: &str = "Burn not approved";
pub const ERR_EXPELLED_NOT_BURNED: &str = "Expelled reputation not fully burned";
pub const ERR_ASSET_NOT_EXPELLED: &str = "Asset is not expelled";
pub const ERR_EXCEEDS_REMAINING: &str = "Amount exceeds remaining expelled reputation";
pub const ERR_EXCEEDS_OWNER_SHARE: &str = "Amount exceeds owner's minted share";
pub const ERR_EXCEEDS_HOLDER_SHARE: &str = "Amount exceeds holder's delegated share";
pub const ERR_CHECKPOINT_IN_PAST: &str = "Checkpoint point is in the past";

// ── Precondition: governance ──

pub const ERR_PROPOSAL_NOT_FOUND: &str = "Proposal does not exist";
pub const ERR_PROPOSAL_NOT_ACTIVE: &str = "Proposal is not active";
pub const ERR_ALREADY_VOTED: &str = "Already voted";
pub const ERR_VOTING_CLOSED: &str = "Voting period has expired";
pub const ERR_NO_VOTING_POWER: &str = "No voting power at proposal creation";
pub const ERR_EMPTY_SNAPSHOT: &str = "No reputation at snapshot point";
pub const ERR_VALUE_NOT_ALLOWED: &str = "Value can only be sent with calls";
pub const ERR_INVALID_SUPPORT: &str = "Support must not exceed 100%";
pub const ERR_INVALID_QUORUM: &str = "Quorum must not exceed 100%";
pub const ERR_INVALID_TIMEOUT: &str = "Timeout must be between 1 second and 1 year";

// ── Threshold not met ──

pub const ERR_NOT_DECIDED: &str = "Outcome not decided before timeout";
pub const ERR_SUPPORT_NOT_REACHED: &str = "Support not reached";
pub const ERR_QUORUM_NOT_REACHED: &str = "Quorum not reached";
pub const ERR_REJECTION_NOT_REACHED: &str = "Approval is still possible";
pub const ERR_PROPOSAL_APPROVABLE: &str = "Proposal meets approval thresholds";

// ── Execution failure ──

pub const ERR_ALREADY_EXPELLED: &str = "Asset already expelled";
pub const ERR_RULE_NOT_FOUND: &str = "Fund rule does not exist";
pub const ERR_RULE_INACTIVE: &str = "Fund rule already disabled";
pub const ERR_INSUFFICIENT_FUNDS: &str = "Insufficient fund balance";
