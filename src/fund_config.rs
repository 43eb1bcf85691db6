multiversx_sc::imports!();

use crate::errors::*;
use crate::types::{ActionMarker, AssetId, FundRule, VotingConfig};
use crate::{MAX_VOTING_TIMEOUT, PERCENT_PRECISION};

/// Fund-level configuration. Everything here except fee-contract asset locks
/// changes only through executed proposals; the `apply_*` functions are the
/// executors the governance engine dispatches to.
#[multiversx_sc::module]
pub trait FundConfigModule: crate::events::EventsModule {
    fn hundred_percent(&self) -> BigUint {
        BigUint::from(PERCENT_PRECISION) * 100u64
    }

    fn validate_voting_config(&self, config: &VotingConfig<Self::Api>) -> Result<(), &'static str> {
        let hundred = self.hundred_percent();
        if config.support > hundred {
            return Err(ERR_INVALID_SUPPORT);
        }
        if config.min_accept_quorum > hundred {
            return Err(ERR_INVALID_QUORUM);
        }
        if config.timeout == 0 || config.timeout > MAX_VOTING_TIMEOUT {
            return Err(ERR_INVALID_TIMEOUT);
        }
        Ok(())
    }

    /// keccak256(target ++ endpoint); call arguments never affect it.
    fn action_marker(
        &self,
        target: &ManagedAddress,
        endpoint: &ManagedBuffer,
    ) -> ActionMarker<Self::Api> {
        let mut preimage = ManagedBuffer::new();
        preimage.append(target.as_managed_buffer());
        preimage.append(endpoint);
        self.crypto().keccak256(&preimage)
    }

    fn resolve_voting_config(&self, marker: &ActionMarker<Self::Api>) -> VotingConfig<Self::Api> {
        let override_config = self.marker_voting_config(marker);
        if override_config.is_empty() {
            self.default_voting_config().get()
        } else {
            override_config.get()
        }
    }

    fn is_custodian(&self, address: &ManagedAddress) -> bool {
        self.custodians().contains(address)
    }

    // ========================================================
    // EXECUTORS: reached only from approved proposals
    // ========================================================

    fn apply_default_voting_config(
        &self,
        config: &VotingConfig<Self::Api>,
    ) -> Result<(), &'static str> {
        self.validate_voting_config(config)?;
        self.default_voting_config().set(config);
        self.default_voting_config_event(config);
        Ok(())
    }

    fn apply_voting_config(
        &self,
        marker: &ActionMarker<Self::Api>,
        config: &VotingConfig<Self::Api>,
    ) -> Result<(), &'static str> {
        self.validate_voting_config(config)?;
        self.marker_voting_config(marker).set(config);
        self.voting_config_event(marker, config);
        Ok(())
    }

    fn apply_mint_approval(&self, asset_id: AssetId) -> Result<(), &'static str> {
        self.mint_approved(asset_id).set(true);
        self.mint_approved_event(asset_id);
        Ok(())
    }

    fn apply_add_fund_rule(
        &self,
        ipfs_hash: &ManagedBuffer,
        description: &ManagedBuffer,
    ) -> Result<(), &'static str> {
        let id = self.fund_rules().len() as u64 + 1;
        let rule = FundRule {
            id,
            active: true,
            ipfs_hash: ipfs_hash.clone(),
            description: description.clone(),
            created_at: self.blockchain().get_block_timestamp(),
        };
        self.fund_rules().push(&rule);
        self.active_fund_rules().insert(id);
        self.fund_rule_added_event(id, ipfs_hash);
        Ok(())
    }

    fn apply_disable_fund_rule(&self, rule_id: u64) -> Result<(), &'static str> {
        if rule_id == 0 || rule_id as usize > self.fund_rules().len() {
            return Err(ERR_RULE_NOT_FOUND);
        }
        let mut rule = self.fund_rules().get(rule_id as usize);
        if !rule.active {
            return Err(ERR_RULE_INACTIVE);
        }
        rule.active = false;
        self.fund_rules().set(rule_id as usize, &rule);
        self.active_fund_rules().swap_remove(&rule_id);
        self.fund_rule_disabled_event(rule_id);
        Ok(())
    }

    fn apply_fee_contract(&self, address: &ManagedAddress, enabled: bool) -> Result<(), &'static str> {
        if enabled {
            self.fee_contracts().insert(address.clone());
        } else {
            self.fee_contracts().swap_remove(address);
        }
        self.fee_contract_event(address, enabled);
        Ok(())
    }

    fn apply_custodian(&self, address: &ManagedAddress, enabled: bool) -> Result<(), &'static str> {
        if enabled {
            self.custodians().insert(address.clone());
        } else {
            self.custodians().swap_remove(address);
        }
        self.custodian_event(address, enabled);
        Ok(())
    }

    // ========================================================
    // ENDPOINTS: fee-contract asset locks
    // A locked asset cannot be approved for burn until every
    // fee contract holding a lock releases it.
    // ========================================================

    #[endpoint(lockAsset)]
    fn lock_asset(&self, asset_id: AssetId) {
        let caller = self.blockchain().get_caller();
        require!(self.fee_contracts().contains(&caller), ERR_NOT_FEE_CONTRACT);

        self.asset_locks(asset_id).insert(caller.clone());
        self.asset_lock_event(asset_id, &caller, true);
    }

    /// Also open to fee contracts removed after locking, so no lock outlives
    /// its holder's ability to release it.
    #[endpoint(unlockAsset)]
    fn unlock_asset(&self, asset_id: AssetId) {
        let caller = self.blockchain().get_caller();
        require!(
            self.asset_locks(asset_id).swap_remove(&caller),
            ERR_NOT_FEE_CONTRACT
        );
        self.asset_lock_event(asset_id, &caller, false);
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getActionMarker)]
    fn get_action_marker(
        &self,
        target: ManagedAddress,
        endpoint: ManagedBuffer,
    ) -> ActionMarker<Self::Api> {
        self.action_marker(&target, &endpoint)
    }

    #[view(getDefaultVotingConfig)]
    fn get_default_voting_config(&self) -> VotingConfig<Self::Api> {
        self.default_voting_config().get()
    }

    #[view(getVotingConfig)]
    fn get_voting_config(&self, marker: ActionMarker<Self::Api>) -> VotingConfig<Self::Api> {
        self.resolve_voting_config(&marker)
    }

    #[view(isPrivate)]
    fn get_is_private(&self) -> bool {
        self.is_private().get()
    }

    #[view(isMintApproved)]
    fn is_mint_approved(&self, asset_id: AssetId) -> bool {
        self.mint_approved(asset_id).get()
    }

    #[view(isCustodian)]
    fn get_is_custodian(&self, address: ManagedAddress) -> bool {
        self.is_custodian(&address)
    }

    #[view(isFeeContract)]
    fn is_fee_contract(&self, address: ManagedAddress) -> bool {
        self.fee_contracts().contains(&address)
    }

    #[view(isAssetLocked)]
    fn is_asset_locked(&self, asset_id: AssetId) -> bool {
        !self.asset_locks(asset_id).is_empty()
    }

    #[view(getFundRule)]
    fn get_fund_rule(&self, rule_id: u64) -> FundRule<Self::Api> {
        require!(
            rule_id > 0 && rule_id as usize <= self.fund_rules().len(),
            ERR_RULE_NOT_FOUND
        );
        self.fund_rules().get(rule_id as usize)
    }

    #[view(getActiveFundRules)]
    fn get_active_fund_rules(&self) -> MultiValueEncoded<FundRule<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        for rule_id in self.active_fund_rules().iter() {
            result.push(self.fund_rules().get(rule_id as usize));
        }
        result
    }

    #[view(getActiveFundRulesCount)]
    fn get_active_fund_rules_count(&self) -> usize {
        self.active_fund_rules().len()
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("defaultVotingConfig")]
    fn default_voting_config(&self) -> SingleValueMapper<VotingConfig<Self::Api>>;

    #[storage_mapper("markerVotingConfig")]
    fn marker_voting_config(
        &self,
        marker: &ActionMarker<Self::Api>,
    ) -> SingleValueMapper<VotingConfig<Self::Api>>;

    #[storage_mapper("isPrivate")]
    fn is_private(&self) -> SingleValueMapper<bool>;

    #[storage_mapper("mintApproved")]
    fn mint_approved(&self, asset_id: AssetId) -> SingleValueMapper<bool>;

    #[storage_mapper("custodians")]
    fn custodians(&self) -> UnorderedSetMapper<ManagedAddress>;

    #[storage_mapper("feeContracts")]
    fn fee_contracts(&self) -> UnorderedSetMapper<ManagedAddress>;

    #[storage_mapper("assetLocks")]
    fn asset_locks(&self, asset_id: AssetId) -> UnorderedSetMapper<ManagedAddress>;

    #[storage_mapper("fundRules")]
    fn fund_rules(&self) -> VecMapper<FundRule<Self::Api>>;

    #[storage_mapper("activeFundRules")]
    fn active_fund_rules(&self) -> UnorderedSetMapper<u64>;
}
