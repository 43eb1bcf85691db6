multiversx_sc::imports!();

use crate::errors::*;
use crate::types::{
    ActionMarker, Proposal, ProposalAction, ProposalStatus, VoteChoice, VoteRecord,
    VotingProgress,
};

/// Proposal registry and voting engine.
///
/// Votes are weighted by the voter's reputation at the proposal's creation
/// point, so ledger activity after a proposal is created never moves its
/// tally basis.
#[multiversx_sc::module]
pub trait GovernanceModule:
    crate::checkpoint::CheckpointModule
    + crate::fund_config::FundConfigModule
    + crate::reputation::ReputationModule
    + crate::events::EventsModule
{
    // ========================================================
    // ENDPOINT: propose
    // Any member can propose. Value is only sent with calls.
    // ========================================================

    #[endpoint(propose)]
    fn propose(
        &self,
        action: ProposalAction<Self::Api>,
        value: BigUint,
        description: ManagedBuffer,
    ) -> u64 {
        let caller = self.blockchain().get_caller();
        require!(self.is_member(&caller), ERR_NOT_MEMBER);
        require!(value == 0u64 || action.is_external(), ERR_VALUE_NOT_ALLOWED);
        match &action {
            ProposalAction::SetDefaultVotingConfig(config)
            | ProposalAction::SetVotingConfig { config, .. } => {
                if let Err(err) = self.validate_voting_config(config) {
                    sc_panic!(err);
                }
            },
            _ => {},
        }

        let marker = self.proposal_marker(&action);
        let voting_config = self.resolve_voting_config(&marker);

        // Weight is read as of the end of the previous block.
        let creation_point = self.current_point().saturating_sub(1);
        let total_supply_snapshot = self.total_supply_at(creation_point);
        require!(total_supply_snapshot > 0u64, ERR_EMPTY_SNAPSHOT);

        let proposal_id = self.proposal_count().get() + 1u64;
        let now = self.blockchain().get_block_timestamp();
        let timeout_at = now + voting_config.timeout;

        let proposal = Proposal {
            id: proposal_id,
            proposer: caller.clone(),
            action,
            value,
            description,
            marker: marker.clone(),
            status: ProposalStatus::Active,
            creation_point,
            created_at: now,
            timeout_at,
            total_supply_snapshot,
            voting_config,
            total_ayes: BigUint::zero(),
            total_nays: BigUint::zero(),
        };

        self.proposals(proposal_id).set(&proposal);
        self.proposal_count().set(proposal_id);
        self.active_proposals().insert(proposal_id);
        self.active_proposals_by_marker(&marker).insert(proposal_id);
        self.active_proposals_by_sender(&caller).insert(proposal_id);

        self.proposal_created_event(proposal_id, &caller, &marker, timeout_at);

        proposal_id
    }

    // ========================================================
    // ENDPOINT: vote
    // One vote per account, weighted at the creation point.
    // ========================================================

    #[endpoint(vote)]
    fn vote(&self, proposal_id: u64, aye: bool) {
        let caller = self.blockchain().get_caller();
        let mut proposal = self.require_proposal(proposal_id);
        require!(
            proposal.status == ProposalStatus::Active,
            ERR_PROPOSAL_NOT_ACTIVE
        );
        require!(
            self.blockchain().get_block_timestamp() < proposal.timeout_at,
            ERR_VOTING_CLOSED
        );
        require!(
            self.participant_choice(proposal_id, &caller).get() == VoteChoice::Pending,
            ERR_ALREADY_VOTED
        );

        let weight = self.balance_of_at(&caller, proposal.creation_point);
        require!(weight > 0u64, ERR_NO_VOTING_POWER);

        let choice = if aye {
            proposal.total_ayes += &weight;
            VoteChoice::Aye
        } else {
            proposal.total_nays += &weight;
            VoteChoice::Nay
        };

        self.participant_choice(proposal_id, &caller).set(choice);
        self.vote_records(proposal_id).push(&VoteRecord {
            voter: caller.clone(),
            choice,
            weight: weight.clone(),
        });
        self.proposals(proposal_id).set(&proposal);

        self.vote_event(proposal_id, &caller, aye, &weight);
    }

    // ========================================================
    // ENDPOINT: triggerApprove
    // Before the timeout only an already-decided outcome passes;
    // afterwards support and quorum are checked as they stand.
    // ========================================================

    #[endpoint(triggerApprove)]
    fn trigger_approve(&self, proposal_id: u64) {
        let mut proposal = self.require_proposal(proposal_id);
        require!(
            proposal.status == ProposalStatus::Active,
            ERR_PROPOSAL_NOT_ACTIVE
        );

        let progress = self.voting_progress(&proposal);
        if self.blockchain().get_block_timestamp() < proposal.timeout_at {
            require!(self.is_approval_decided(&progress), ERR_NOT_DECIDED);
        } else {
            require!(
                progress.ayes_share >= progress.required_support,
                ERR_SUPPORT_NOT_REACHED
            );
            require!(
                progress.current_support >= progress.min_accept_quorum,
                ERR_QUORUM_NOT_REACHED
            );
        }

        self.set_proposal_status(&mut proposal, ProposalStatus::Approved);
        self.proposal_approved_event(proposal_id);

        let outcome = self.apply_action(&proposal);
        self.record_execution_outcome(&mut proposal, outcome);
    }

    // ========================================================
    // ENDPOINT: triggerReject
    // Before the timeout nays must have foreclosed approval;
    // afterwards any proposal short of the thresholds can go.
    // ========================================================

    #[endpoint(triggerReject)]
    fn trigger_reject(&self, proposal_id: u64) {
        let mut proposal = self.require_proposal(proposal_id);
        require!(
            proposal.status == ProposalStatus::Active,
            ERR_PROPOSAL_NOT_ACTIVE
        );

        let progress = self.voting_progress(&proposal);
        if self.blockchain().get_block_timestamp() < proposal.timeout_at {
            require!(
                self.is_approval_foreclosed(&progress),
                ERR_REJECTION_NOT_REACHED
            );
        } else {
            require!(
                !self.meets_approval_thresholds(&progress),
                ERR_PROPOSAL_APPROVABLE
            );
        }

        self.set_proposal_status(&mut proposal, ProposalStatus::Rejected);
        self.proposal_rejected_event(proposal_id);
    }

    // ========================================================
    // INTERNAL: execution
    // ========================================================

    /// Applies an approved proposal's action. Internal actions and plain
    /// transfers finish here; an endpoint call exits into an async call
    /// whose callback records the outcome.
    fn apply_action(&self, proposal: &Proposal<Self::Api>) -> Result<(), &'static str> {
        match &proposal.action {
            ProposalAction::SetDefaultVotingConfig(config) => {
                self.apply_default_voting_config(config)
            },
            ProposalAction::SetVotingConfig { marker, config } => {
                self.apply_voting_config(marker, config)
            },
            ProposalAction::Expel(asset_id) => self.apply_expel(*asset_id),
            ProposalAction::ApproveMint(asset_id) => self.apply_asset_admission(*asset_id),
            ProposalAction::AddFundRule {
                ipfs_hash,
                description,
            } => self.apply_add_fund_rule(ipfs_hash, description),
            ProposalAction::DisableFundRule(rule_id) => self.apply_disable_fund_rule(*rule_id),
            ProposalAction::SetFeeContract { address, enabled } => {
                self.apply_fee_contract(address, *enabled)
            },
            ProposalAction::SetCustodian { address, enabled } => {
                self.apply_custodian(address, *enabled)
            },
            ProposalAction::Call {
                target,
                endpoint,
                arguments,
            } => {
                let fund_balance = self
                    .blockchain()
                    .get_sc_balance(&EgldOrEsdtTokenIdentifier::egld(), 0);
                if fund_balance < proposal.value {
                    return Err(ERR_INSUFFICIENT_FUNDS);
                }

                if endpoint.is_empty() {
                    if proposal.value > 0u64 {
                        self.send().direct_egld(target, &proposal.value);
                    }
                    return Ok(());
                }

                self.tx()
                    .to(target)
                    .egld(&proposal.value)
                    .raw_call(endpoint.clone())
                    .arguments_raw(ManagedArgBuffer::from(arguments.clone()))
                    .callback(self.callbacks().execution_callback(proposal.id))
                    .async_call_and_exit()
            },
        }
    }

    fn record_execution_outcome(
        &self,
        proposal: &mut Proposal<Self::Api>,
        outcome: Result<(), &'static str>,
    ) {
        match outcome {
            Ok(()) => {
                self.set_proposal_status(proposal, ProposalStatus::Executed);
                self.proposal_executed_event(proposal.id);
            },
            Err(reason) => {
                self.set_proposal_status(proposal, ProposalStatus::ExecutionFailed);
                self.proposal_execution_failed_event(proposal.id, &ManagedBuffer::from(reason));
            },
        }
    }

    #[callback]
    fn execution_callback(
        &self,
        proposal_id: u64,
        #[call_result] result: ManagedAsyncCallResult<IgnoreValue>,
    ) {
        let mut proposal = self.proposals(proposal_id).get();
        if proposal.status != ProposalStatus::Approved {
            return;
        }

        match result {
            ManagedAsyncCallResult::Ok(_) => {
                self.record_execution_outcome(&mut proposal, Ok(()));
            },
            ManagedAsyncCallResult::Err(err) => {
                self.set_proposal_status(&mut proposal, ProposalStatus::ExecutionFailed);
                self.proposal_execution_failed_event(proposal_id, &err.err_msg);
            },
        }
    }

    // ========================================================
    // INTERNAL: status and index maintenance
    // ========================================================

    fn set_proposal_status(&self, proposal: &mut Proposal<Self::Api>, status: ProposalStatus) {
        if proposal.status == ProposalStatus::Active {
            self.active_proposals().swap_remove(&proposal.id);
            self.active_proposals_by_marker(&proposal.marker)
                .swap_remove(&proposal.id);
            self.active_proposals_by_sender(&proposal.proposer)
                .swap_remove(&proposal.id);
        }

        match status {
            ProposalStatus::Approved => {
                self.approved_proposals().insert(proposal.id);
                self.approved_proposals_by_marker(&proposal.marker)
                    .insert(proposal.id);
            },
            ProposalStatus::Rejected => {
                self.rejected_proposals().insert(proposal.id);
                self.rejected_proposals_by_marker(&proposal.marker)
                    .insert(proposal.id);
            },
            _ => {},
        }

        proposal.status = status;
        self.proposals(proposal.id).set(&*proposal);
    }

    fn require_proposal(&self, proposal_id: u64) -> Proposal<Self::Api> {
        require!(
            !self.proposals(proposal_id).is_empty(),
            ERR_PROPOSAL_NOT_FOUND
        );
        self.proposals(proposal_id).get()
    }

    /// Internal actions are marked as calls on the fund itself.
    fn proposal_marker(&self, action: &ProposalAction<Self::Api>) -> ActionMarker<Self::Api> {
        if let ProposalAction::Call {
            target, endpoint, ..
        } = action
        {
            return self.action_marker(target, endpoint);
        }

        let own_address = self.blockchain().get_sc_address();
        let endpoint = ManagedBuffer::from(action.internal_endpoint().unwrap_or_default());
        self.action_marker(&own_address, &endpoint)
    }

    // ========================================================
    // INTERNAL: threshold math
    // Shares are fixed point, 100% = 100 * PERCENT_PRECISION.
    // ========================================================

    fn voting_progress(&self, proposal: &Proposal<Self::Api>) -> VotingProgress<Self::Api> {
        let hundred = self.hundred_percent();
        let snapshot = &proposal.total_supply_snapshot;

        let (ayes_share, nays_share) = if *snapshot == 0u64 {
            (BigUint::zero(), BigUint::zero())
        } else {
            (
                &proposal.total_ayes * &hundred / snapshot,
                &proposal.total_nays * &hundred / snapshot,
            )
        };

        let cast = &proposal.total_ayes + &proposal.total_nays;
        let current_support = if cast == 0u64 {
            BigUint::zero()
        } else {
            &proposal.total_ayes * &hundred / &cast
        };

        VotingProgress {
            ayes_share,
            nays_share,
            current_support,
            required_support: proposal.voting_config.support.clone(),
            min_accept_quorum: proposal.voting_config.min_accept_quorum.clone(),
            timeout_at: proposal.timeout_at,
        }
    }

    fn meets_approval_thresholds(&self, progress: &VotingProgress<Self::Api>) -> bool {
        progress.ayes_share >= progress.required_support
            && progress.current_support >= progress.min_accept_quorum
    }

    /// Even if every remaining vote were a nay, support would stay at
    /// `ayes_share` and both thresholds would still hold.
    fn is_approval_decided(&self, progress: &VotingProgress<Self::Api>) -> bool {
        progress.ayes_share >= progress.required_support
            && progress.ayes_share >= progress.min_accept_quorum
    }

    /// Even if every remaining vote were an aye, one threshold stays out of
    /// reach.
    fn is_approval_foreclosed(&self, progress: &VotingProgress<Self::Api>) -> bool {
        let hundred = self.hundred_percent();
        let max_ayes_share = if progress.nays_share >= hundred {
            BigUint::zero()
        } else {
            hundred - &progress.nays_share
        };
        max_ayes_share < progress.required_support || max_ayes_share < progress.min_accept_quorum
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getProposal)]
    fn get_proposal(&self, proposal_id: u64) -> Proposal<Self::Api> {
        self.require_proposal(proposal_id)
    }

    #[view(getProposalCount)]
    fn get_proposal_count(&self) -> u64 {
        self.proposal_count().get()
    }

    #[view(getProposalVoting)]
    fn get_proposal_voting(
        &self,
        proposal_id: u64,
    ) -> MultiValue5<
        ProposalStatus,
        ManagedVec<ManagedAddress>,
        ManagedVec<ManagedAddress>,
        BigUint,
        BigUint,
    > {
        let proposal = self.require_proposal(proposal_id);
        let mut ayes = ManagedVec::new();
        let mut nays = ManagedVec::new();
        for record in self.vote_records(proposal_id).iter() {
            match record.choice {
                VoteChoice::Aye => ayes.push(record.voter),
                VoteChoice::Nay => nays.push(record.voter),
                VoteChoice::Pending => {},
            }
        }
        (
            proposal.status,
            ayes,
            nays,
            proposal.total_ayes,
            proposal.total_nays,
        )
            .into()
    }

    #[view(getProposalVotingProgress)]
    fn get_proposal_voting_progress(&self, proposal_id: u64) -> VotingProgress<Self::Api> {
        let proposal = self.require_proposal(proposal_id);
        self.voting_progress(&proposal)
    }

    #[view(getAyeShare)]
    fn get_aye_share(&self, proposal_id: u64) -> BigUint {
        self.get_proposal_voting_progress(proposal_id).ayes_share
    }

    #[view(getNayShare)]
    fn get_nay_share(&self, proposal_id: u64) -> BigUint {
        self.get_proposal_voting_progress(proposal_id).nays_share
    }

    #[view(getCurrentSupport)]
    fn get_current_support(&self, proposal_id: u64) -> BigUint {
        self.get_proposal_voting_progress(proposal_id).current_support
    }

    #[view(getParticipantProposalChoice)]
    fn get_participant_proposal_choice(
        &self,
        proposal_id: u64,
        participant: &ManagedAddress,
    ) -> VoteChoice {
        self.participant_choice(proposal_id, participant).get()
    }

    #[view(getVoteRecords)]
    fn get_vote_records(&self, proposal_id: u64) -> MultiValueEncoded<VoteRecord<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        for record in self.vote_records(proposal_id).iter() {
            result.push(record);
        }
        result
    }

    #[view(getActiveProposals)]
    fn get_active_proposals(&self) -> MultiValueEncoded<u64> {
        self.collect_ids(self.active_proposals())
    }

    #[view(getActiveProposalsCount)]
    fn get_active_proposals_count(&self) -> usize {
        self.active_proposals().len()
    }

    #[view(getActiveProposalsByMarker)]
    fn get_active_proposals_by_marker(
        &self,
        marker: ActionMarker<Self::Api>,
    ) -> MultiValueEncoded<u64> {
        self.collect_ids(self.active_proposals_by_marker(&marker))
    }

    #[view(getActiveProposalsByMarkerCount)]
    fn get_active_proposals_by_marker_count(&self, marker: ActionMarker<Self::Api>) -> usize {
        self.active_proposals_by_marker(&marker).len()
    }

    #[view(getActiveProposalsBySender)]
    fn get_active_proposals_by_sender(&self, sender: ManagedAddress) -> MultiValueEncoded<u64> {
        self.collect_ids(self.active_proposals_by_sender(&sender))
    }

    #[view(getActiveProposalsBySenderCount)]
    fn get_active_proposals_by_sender_count(&self, sender: ManagedAddress) -> usize {
        self.active_proposals_by_sender(&sender).len()
    }

    /// Every proposal that passed its vote, including those whose execution
    /// failed afterwards; `getProposal` tells the two apart by status.
    #[view(getApprovedProposals)]
    fn get_approved_proposals(&self) -> MultiValueEncoded<u64> {
        self.collect_ids(self.approved_proposals())
    }

    /// Same membership rule as `getApprovedProposals`.
    #[view(getApprovedProposalsByMarker)]
    fn get_approved_proposals_by_marker(
        &self,
        marker: ActionMarker<Self::Api>,
    ) -> MultiValueEncoded<u64> {
        self.collect_ids(self.approved_proposals_by_marker(&marker))
    }

    #[view(getRejectedProposals)]
    fn get_rejected_proposals(&self) -> MultiValueEncoded<u64> {
        self.collect_ids(self.rejected_proposals())
    }

    #[view(getRejectedProposalsByMarker)]
    fn get_rejected_proposals_by_marker(
        &self,
        marker: ActionMarker<Self::Api>,
    ) -> MultiValueEncoded<u64> {
        self.collect_ids(self.rejected_proposals_by_marker(&marker))
    }

    fn collect_ids(&self, ids: UnorderedSetMapper<u64>) -> MultiValueEncoded<u64> {
        let mut result = MultiValueEncoded::new();
        for id in ids.iter() {
            result.push(id);
        }
        result
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("proposalCount")]
    fn proposal_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("proposals")]
    fn proposals(&self, id: u64) -> SingleValueMapper<Proposal<Self::Api>>;

    #[storage_mapper("participantChoice")]
    fn participant_choice(
        &self,
        proposal_id: u64,
        participant: &ManagedAddress,
    ) -> SingleValueMapper<VoteChoice>;

    #[storage_mapper("voteRecords")]
    fn vote_records(&self, proposal_id: u64) -> VecMapper<VoteRecord<Self::Api>>;

    // ── Derived indices, kept in step with every status change ──

    #[storage_mapper("activeProposals")]
    fn active_proposals(&self) -> UnorderedSetMapper<u64>;

    #[storage_mapper("activeProposalsByMarker")]
    fn active_proposals_by_marker(
        &self,
        marker: &ActionMarker<Self::Api>,
    ) -> UnorderedSetMapper<u64>;

    #[storage_mapper("activeProposalsBySender")]
    fn active_proposals_by_sender(&self, sender: &ManagedAddress) -> UnorderedSetMapper<u64>;

    #[storage_mapper("approvedProposals")]
    fn approved_proposals(&self) -> UnorderedSetMapper<u64>;

    #[storage_mapper("approvedProposalsByMarker")]
    fn approved_proposals_by_marker(
        &self,
        marker: &ActionMarker<Self::Api>,
    ) -> UnorderedSetMapper<u64>;

    #[storage_mapper("rejectedProposals")]
    fn rejected_proposals(&self) -> UnorderedSetMapper<u64>;

    #[storage_mapper("rejectedProposalsByMarker")]
    fn rejected_proposals_by_marker(
        &self,
        marker: &ActionMarker<Self::Api>,
    ) -> UnorderedSetMapper<u64>;
}
