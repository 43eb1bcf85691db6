#![no_std]

multiversx_sc::imports!();

pub mod checkpoint;
pub mod errors;
pub mod events;
pub mod fund_config;
pub mod governance;
pub mod reputation;
pub mod types;

use errors::ERR_ZERO_AMOUNT;
use types::{AssetId, VotingConfig};

// ============================================================
// Constants
// ============================================================

/// Fixed-point scale for percentages: 100% = 100 * PERCENT_PRECISION.
pub const PERCENT_PRECISION: u64 = 1_000_000_000_000_000_000;

/// Longest voting window a config may set: 365 days in seconds.
pub const MAX_VOTING_TIMEOUT: u64 = 31_536_000;

// ============================================================
// Contract
// ============================================================

/// A fund governed by reputation. Custodians mint reputation for deposited
/// assets, members delegate it, and proposals weighted by historical
/// reputation change the fund's configuration or call other contracts.
#[multiversx_sc::contract]
pub trait ReputationFund:
    checkpoint::CheckpointModule
    + events::EventsModule
    + fund_config::FundConfigModule
    + reputation::ReputationModule
    + governance::GovernanceModule
{
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(
        &self,
        support: BigUint,
        min_accept_quorum: BigUint,
        timeout: u64,
        is_private: bool,
        custodians: ManagedVec<ManagedAddress>,
        initial_mint_approvals: MultiValueEncoded<AssetId>,
    ) {
        let config = VotingConfig {
            support,
            min_accept_quorum,
            timeout,
        };
        if let Err(err) = self.validate_voting_config(&config) {
            sc_panic!(err);
        }
        self.default_voting_config().set(&config);
        self.is_private().set(is_private);

        for custodian in custodians.iter() {
            self.custodians().insert((*custodian).clone());
        }
        for asset_id in initial_mint_approvals {
            self.mint_approved(asset_id).set(true);
        }
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: receiveFunds
    // Treasury top-up spent by approved call proposals.
    // ========================================================

    #[payable("EGLD")]
    #[endpoint(receiveFunds)]
    fn receive_funds(&self) {
        let caller = self.blockchain().get_caller();
        let amount = self.call_value().egld_value().clone_value();
        require!(amount > 0u64, ERR_ZERO_AMOUNT);

        self.funds_received_event(&caller, &amount);
    }
}
