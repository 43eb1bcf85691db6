multiversx_sc::imports!();

use crate::types::{ActionMarker, AssetId, VotingConfig};

#[multiversx_sc::module]
pub trait EventsModule {
    // ── Reputation ledger ──

    #[event("mint")]
    fn mint_event(
        &self,
        #[indexed] asset_id: AssetId,
        #[indexed] owner: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("delegate")]
    fn delegate_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        #[indexed] owner: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("revoke")]
    fn revoke_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] holder: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("burnApproved")]
    fn burn_approved_event(&self, #[indexed] asset_id: AssetId, #[indexed] owner: &ManagedAddress);

    #[event("burn")]
    fn burn_event(
        &self,
        #[indexed] asset_id: AssetId,
        #[indexed] owner: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("expel")]
    fn expel_event(&self, #[indexed] asset_id: AssetId, remaining_to_burn: &BigUint);

    #[event("burnExpelled")]
    fn burn_expelled_event(
        &self,
        #[indexed] asset_id: AssetId,
        #[indexed] holder: &ManagedAddress,
        #[indexed] owner: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("readmit")]
    fn readmit_event(&self, #[indexed] asset_id: AssetId);

    // ── Fund configuration ──

    #[event("defaultVotingConfigChanged")]
    fn default_voting_config_event(&self, config: &VotingConfig<Self::Api>);

    #[event("votingConfigChanged")]
    fn voting_config_event(
        &self,
        #[indexed] marker: &ActionMarker<Self::Api>,
        config: &VotingConfig<Self::Api>,
    );

    #[event("mintApproved")]
    fn mint_approved_event(&self, #[indexed] asset_id: AssetId);

    #[event("fundRuleAdded")]
    fn fund_rule_added_event(&self, #[indexed] rule_id: u64, ipfs_hash: &ManagedBuffer);

    #[event("fundRuleDisabled")]
    fn fund_rule_disabled_event(&self, #[indexed] rule_id: u64);

    #[event("feeContractChanged")]
    fn fee_contract_event(&self, #[indexed] address: &ManagedAddress, #[indexed] enabled: bool);

    #[event("custodianChanged")]
    fn custodian_event(&self, #[indexed] address: &ManagedAddress, #[indexed] enabled: bool);

    #[event("assetLock")]
    fn asset_lock_event(
        &self,
        #[indexed] asset_id: AssetId,
        #[indexed] fee_contract: &ManagedAddress,
        #[indexed] locked: bool,
    );

    #[event("fundsReceived")]
    fn funds_received_event(&self, #[indexed] sender: &ManagedAddress, amount: &BigUint);

    // ── Proposals ──

    #[event("proposalCreated")]
    fn proposal_created_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] proposer: &ManagedAddress,
        #[indexed] marker: &ActionMarker<Self::Api>,
        timeout_at: u64,
    );

    #[event("vote")]
    fn vote_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] voter: &ManagedAddress,
        #[indexed] aye: bool,
        weight: &BigUint,
    );

    #[event("proposalApproved")]
    fn proposal_approved_event(&self, #[indexed] proposal_id: u64);

    #[event("proposalRejected")]
    fn proposal_rejected_event(&self, #[indexed] proposal_id: u64);

    #[event("proposalExecuted")]
    fn proposal_executed_event(&self, #[indexed] proposal_id: u64);

    #[event("proposalExecutionFailed")]
    fn proposal_execution_failed_event(&self, #[indexed] proposal_id: u64, reason: &ManagedBuffer);
}
