multiversx_sc::imports!();

use crate::errors::*;
use crate::types::{AssetId, CheckpointSubject, ExpulsionRecord};

/// Reputation ledger.
///
/// Reputation is tracked per delegation edge `(holder, owner)`: how much of
/// the reputation minted to `owner` is currently held by `holder`. An
/// account's balance is the sum of the edges it holds, and every balance
/// change is checkpointed so votes can read historical weight.
#[multiversx_sc::module]
pub trait ReputationModule:
    crate::checkpoint::CheckpointModule
    + crate::fund_config::FundConfigModule
    + crate::events::EventsModule
{
    // ========================================================
    // ENDPOINT: mint
    // Called by a custodian once it holds the deposited asset.
    // ========================================================

    #[endpoint(mint)]
    fn mint(&self, asset_id: AssetId, owner: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        require!(self.is_custodian(&caller), ERR_NOT_CUSTODIAN);
        require!(amount > 0u64, ERR_ZERO_AMOUNT);
        require!(!self.is_expelled(asset_id), ERR_ASSET_EXPELLED);
        require!(self.asset_owner(asset_id).is_empty(), ERR_ALREADY_MINTED);
        if self.is_private().get() {
            require!(self.mint_approved(asset_id).get(), ERR_MINT_NOT_APPROVED);
        }

        self.asset_owner(asset_id).set(&owner);
        self.asset_reputation_minted(asset_id).set(&amount);
        self.owner_reputation_minted(&owner, asset_id).set(&amount);
        self.owner_assets(&owner).insert(asset_id);
        self.token_owners().insert(owner.clone());
        self.owned_balance(&owner).update(|owned| *owned += &amount);

        self.add_to_edge(&owner, &owner, &amount);
        self.total_supply().update(|total| *total += &amount);
        self.checkpoint_total_supply();

        self.mint_event(asset_id, &owner, &amount);
    }

    // ========================================================
    // ENDPOINT: delegate
    // The caller passes on `amount` of `owner`'s reputation it holds.
    // ========================================================

    #[endpoint(delegate)]
    fn delegate(&self, to: ManagedAddress, owner: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        require!(amount > 0u64, ERR_ZERO_AMOUNT);
        require!(to != caller, ERR_SELF_DELEGATION);
        require!(
            self.delegated_balance(&caller, &owner).get() >= amount,
            ERR_INSUFFICIENT_DELEGATED
        );

        self.remove_from_edge(&caller, &owner, &amount);
        self.add_to_edge(&to, &owner, &amount);

        self.delegate_event(&caller, &to, &owner, &amount);
    }

    // ========================================================
    // ENDPOINT: revoke
    // Only the owner pulls its reputation back from a holder.
    // ========================================================

    #[endpoint(revoke)]
    fn revoke(&self, holder: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        require!(amount > 0u64, ERR_ZERO_AMOUNT);
        require!(holder != caller, ERR_CANNOT_REVOKE_OWN);
        require!(
            self.delegated_balance(&holder, &caller).get() >= amount,
            ERR_INSUFFICIENT_TO_REVOKE
        );

        self.remove_from_edge(&holder, &caller, &amount);
        self.add_to_edge(&caller, &caller, &amount);

        self.revoke_event(&caller, &holder, &amount);
    }

    // ========================================================
    // ENDPOINTS: approveBurn / burn
    // Two-phase release of a deposit: the owner confirms none of
    // the asset's reputation is out with delegates, then the
    // custodian burns it before handing the asset back.
    // ========================================================

    #[endpoint(approveBurn)]
    fn approve_burn(&self, asset_id: AssetId) {
        let caller = self.blockchain().get_caller();
        require!(!self.asset_owner(asset_id).is_empty(), ERR_ASSET_NOT_MINTED);
        require!(self.asset_owner(asset_id).get() == caller, ERR_NOT_ASSET_OWNER);
        require!(!self.is_expelled(asset_id), ERR_ASSET_EXPELLED);
        require!(self.asset_locks(asset_id).is_empty(), ERR_ASSET_LOCKED);
        require!(
            self.holds_own_asset_reputation(&caller, asset_id),
            ERR_REPUTATION_DELEGATED
        );

        self.burn_approved(asset_id).set(true);
        self.burn_approved_event(asset_id, &caller);
    }

    #[endpoint(burn)]
    fn burn(&self, asset_id: AssetId) {
        let caller = self.blockchain().get_caller();
        require!(self.is_custodian(&caller), ERR_NOT_CUSTODIAN);
        require!(!self.asset_owner(asset_id).is_empty(), ERR_ASSET_NOT_MINTED);

        let owner = self.asset_owner(asset_id).get();
        if self.is_expelled(asset_id) {
            let expulsion = self.expulsion_record(asset_id).get();
            // Reputation already drained by burnExpelled; only the record goes.
            require!(expulsion.remaining_to_burn == 0u64, ERR_EXPELLED_NOT_BURNED);
            self.clear_asset_record(&owner, asset_id);
            self.burn_event(asset_id, &owner, &BigUint::zero());
            return;
        }

        require!(self.burn_approved(asset_id).get(), ERR_BURN_NOT_APPROVED);
        // Delegations may have happened since approveBurn.
        require!(
            self.holds_own_asset_reputation(&owner, asset_id),
            ERR_REPUTATION_DELEGATED
        );

        let amount = self.owner_reputation_minted(&owner, asset_id).get();
        self.remove_from_edge(&owner, &owner, &amount);
        self.owned_balance(&owner).update(|owned| *owned -= &amount);
        self.total_supply().update(|total| *total -= &amount);
        self.checkpoint_total_supply();
        self.clear_asset_record(&owner, asset_id);

        self.burn_event(asset_id, &owner, &amount);
    }

    // ========================================================
    // ENDPOINT: burnExpelled
    // Permissionless, amount-bounded burn of an expelled asset's
    // reputation from one (holder, owner) edge. Callers partition
    // the fan-out across as many calls as they need.
    // ========================================================

    #[endpoint(burnExpelled)]
    fn burn_expelled(
        &self,
        asset_id: AssetId,
        holder: ManagedAddress,
        owner: ManagedAddress,
        amount: BigUint,
    ) {
        require!(self.is_expelled(asset_id), ERR_ASSET_NOT_EXPELLED);
        let mut expulsion = self.expulsion_record(asset_id).get();
        require!(amount > 0u64, ERR_ZERO_AMOUNT);
        require!(amount <= expulsion.remaining_to_burn, ERR_EXCEEDS_REMAINING);
        require!(
            !self.asset_owner(asset_id).is_empty() && self.asset_owner(asset_id).get() == owner,
            ERR_NOT_ASSET_OWNER
        );
        require!(
            amount <= self.owner_reputation_minted(&owner, asset_id).get(),
            ERR_EXCEEDS_OWNER_SHARE
        );
        require!(
            amount <= self.delegated_balance(&holder, &owner).get(),
            ERR_EXCEEDS_HOLDER_SHARE
        );

        expulsion.remaining_to_burn -= &amount;
        self.expulsion_record(asset_id).set(&expulsion);

        self.remove_from_edge(&holder, &owner, &amount);
        self.owned_balance(&owner).update(|owned| *owned -= &amount);
        self.asset_reputation_minted(asset_id)
            .update(|minted| *minted -= &amount);
        let owner_left = self
            .owner_reputation_minted(&owner, asset_id)
            .update(|minted| {
                *minted -= &amount;
                minted.clone()
            });
        if owner_left == 0u64 {
            self.owner_assets(&owner).swap_remove(&asset_id);
            if self.owner_assets(&owner).is_empty() {
                self.token_owners().swap_remove(&owner);
            }
        }

        self.total_supply().update(|total| *total -= &amount);
        self.checkpoint_total_supply();

        self.burn_expelled_event(asset_id, &holder, &owner, &amount);
    }

    // ========================================================
    // INTERNAL: expulsion, reached only from governance
    // ========================================================

    fn apply_expel(&self, asset_id: AssetId) -> Result<(), &'static str> {
        if self.is_expelled(asset_id) {
            return Err(ERR_ALREADY_EXPELLED);
        }

        let remaining_to_burn = self.asset_reputation_minted(asset_id).get();
        self.expulsion_record(asset_id).set(&ExpulsionRecord {
            expelled: true,
            remaining_to_burn: remaining_to_burn.clone(),
        });
        self.burn_approved(asset_id).clear();

        self.expel_event(asset_id, &remaining_to_burn);
        Ok(())
    }

    /// Mint approval from governance. In a private fund it also re-admits an
    /// expelled asset, once its reputation is burned and the custodian has
    /// cleared its record. Public funds never re-admit.
    fn apply_asset_admission(&self, asset_id: AssetId) -> Result<(), &'static str> {
        if self.is_expelled(asset_id) && self.is_private().get() {
            let expulsion = self.expulsion_record(asset_id).get();
            if expulsion.remaining_to_burn > 0u64 || !self.asset_owner(asset_id).is_empty() {
                return Err(ERR_EXPELLED_NOT_BURNED);
            }
            self.expulsion_record(asset_id).clear();
            self.readmit_event(asset_id);
        }

        self.apply_mint_approval(asset_id)
    }

    // ========================================================
    // INTERNAL: edge bookkeeping
    // Every edge change moves the holder's balance with it and
    // checkpoints it at the current block.
    // ========================================================

    fn add_to_edge(&self, holder: &ManagedAddress, owner: &ManagedAddress, amount: &BigUint) {
        self.delegated_balance(holder, owner)
            .update(|edge| *edge += amount);
        self.reputation_holders(owner).insert(holder.clone());

        let balance = self.balance(holder).update(|balance| {
            *balance += amount;
            balance.clone()
        });
        self.write_checkpoint(
            &CheckpointSubject::Account(holder.clone()),
            self.current_point(),
            &balance,
        );
    }

    fn remove_from_edge(&self, holder: &ManagedAddress, owner: &ManagedAddress, amount: &BigUint) {
        let edge_left = self.delegated_balance(holder, owner).update(|edge| {
            *edge -= amount;
            edge.clone()
        });
        if edge_left == 0u64 {
            self.reputation_holders(owner).swap_remove(holder);
        }

        let balance = self.balance(holder).update(|balance| {
            *balance -= amount;
            balance.clone()
        });
        self.write_checkpoint(
            &CheckpointSubject::Account(holder.clone()),
            self.current_point(),
            &balance,
        );
    }

    /// Expulsion records are only ever written with `expelled` set.
    fn is_expelled(&self, asset_id: AssetId) -> bool {
        !self.expulsion_record(asset_id).is_empty()
    }

    fn checkpoint_total_supply(&self) {
        let total = self.total_supply().get();
        self.write_checkpoint(&CheckpointSubject::TotalSupply, self.current_point(), &total);
    }

    /// True when the owner still holds all reputation minted for the asset.
    fn holds_own_asset_reputation(&self, owner: &ManagedAddress, asset_id: AssetId) -> bool {
        let minted = self.owner_reputation_minted(owner, asset_id).get();
        self.delegated_balance(owner, owner).get() >= minted
    }

    fn clear_asset_record(&self, owner: &ManagedAddress, asset_id: AssetId) {
        self.asset_owner(asset_id).clear();
        self.asset_reputation_minted(asset_id).clear();
        self.owner_reputation_minted(owner, asset_id).clear();
        self.burn_approved(asset_id).clear();
        self.owner_assets(owner).swap_remove(&asset_id);
        if self.owner_assets(owner).is_empty() {
            self.token_owners().swap_remove(owner);
        }
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(balanceOf)]
    fn balance_of(&self, account: &ManagedAddress) -> BigUint {
        self.balance(account).get()
    }

    #[view(balanceOfAt)]
    fn balance_of_at(&self, account: &ManagedAddress, point: u64) -> BigUint {
        self.value_at(&CheckpointSubject::Account(account.clone()), point)
    }

    #[view(totalSupply)]
    fn get_total_supply(&self) -> BigUint {
        self.total_supply().get()
    }

    #[view(totalSupplyAt)]
    fn total_supply_at(&self, point: u64) -> BigUint {
        self.value_at(&CheckpointSubject::TotalSupply, point)
    }

    #[view(delegatedBalanceOf)]
    fn delegated_balance_of(&self, holder: &ManagedAddress, owner: &ManagedAddress) -> BigUint {
        self.delegated_balance(holder, owner).get()
    }

    #[view(ownedBalanceOf)]
    fn owned_balance_of(&self, owner: &ManagedAddress) -> BigUint {
        self.owned_balance(owner).get()
    }

    /// Reputation minted to `owner` currently held by others.
    #[view(delegatedOutBalanceOf)]
    fn delegated_out_balance_of(&self, owner: &ManagedAddress) -> BigUint {
        self.owned_balance(owner).get() - self.delegated_balance(owner, owner).get()
    }

    /// Reputation held by `account` that was minted to others.
    #[view(delegatedInBalanceOf)]
    fn delegated_in_balance_of(&self, account: &ManagedAddress) -> BigUint {
        self.balance(account).get() - self.delegated_balance(account, account).get()
    }

    #[view(isMember)]
    fn is_member(&self, account: &ManagedAddress) -> bool {
        self.balance(account).get() > 0u64
    }

    #[view(tokenOwnersCount)]
    fn token_owners_count(&self) -> usize {
        self.token_owners().len()
    }

    #[view(tokenReputationMinted)]
    fn token_reputation_minted(&self, asset_id: AssetId) -> BigUint {
        self.asset_reputation_minted(asset_id).get()
    }

    #[view(ownerReputationMinted)]
    fn get_owner_reputation_minted(&self, owner: &ManagedAddress, asset_id: AssetId) -> BigUint {
        self.owner_reputation_minted(owner, asset_id).get()
    }

    #[view(ownerHasAsset)]
    fn owner_has_asset(&self, owner: &ManagedAddress, asset_id: AssetId) -> bool {
        self.owner_assets(owner).contains(&asset_id)
    }

    #[view(getOwnerAssets)]
    fn get_owner_assets(&self, owner: &ManagedAddress) -> MultiValueEncoded<AssetId> {
        let mut result = MultiValueEncoded::new();
        for asset_id in self.owner_assets(owner).iter() {
            result.push(asset_id);
        }
        result
    }

    #[view(getAssetOwner)]
    fn get_asset_owner(&self, asset_id: AssetId) -> OptionalValue<ManagedAddress> {
        if self.asset_owner(asset_id).is_empty() {
            OptionalValue::None
        } else {
            OptionalValue::Some(self.asset_owner(asset_id).get())
        }
    }

    #[view(getExpelledAsset)]
    fn get_expelled_asset(&self, asset_id: AssetId) -> ExpulsionRecord<Self::Api> {
        if !self.is_expelled(asset_id) {
            return ExpulsionRecord {
                expelled: false,
                remaining_to_burn: BigUint::zero(),
            };
        }
        self.expulsion_record(asset_id).get()
    }

    #[view(isBurnApproved)]
    fn is_burn_approved(&self, asset_id: AssetId) -> bool {
        self.burn_approved(asset_id).get()
    }

    /// Every holder of `owner`'s reputation with the amount it holds; the
    /// edges a burnExpelled sweep has to cover.
    #[view(getReputationHolders)]
    fn get_reputation_holders(
        &self,
        owner: &ManagedAddress,
    ) -> MultiValueEncoded<MultiValue2<ManagedAddress, BigUint>> {
        let mut result = MultiValueEncoded::new();
        for holder in self.reputation_holders(owner).iter() {
            let amount = self.delegated_balance(&holder, owner).get();
            result.push((holder, amount).into());
        }
        result
    }

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("totalSupply")]
    fn total_supply(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("balance")]
    fn balance(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("ownedBalance")]
    fn owned_balance(&self, owner: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("delegatedBalance")]
    fn delegated_balance(
        &self,
        holder: &ManagedAddress,
        owner: &ManagedAddress,
    ) -> SingleValueMapper<BigUint>;

    #[storage_mapper("reputationHolders")]
    fn reputation_holders(&self, owner: &ManagedAddress) -> UnorderedSetMapper<ManagedAddress>;

    #[storage_mapper("tokenOwners")]
    fn token_owners(&self) -> UnorderedSetMapper<ManagedAddress>;

    #[storage_mapper("ownerAssets")]
    fn owner_assets(&self, owner: &ManagedAddress) -> UnorderedSetMapper<AssetId>;

    #[storage_mapper("assetOwner")]
    fn asset_owner(&self, asset_id: AssetId) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("assetReputationMinted")]
    fn asset_reputation_minted(&self, asset_id: AssetId) -> SingleValueMapper<BigUint>;

    #[storage_mapper("ownerReputationMinted")]
    fn owner_reputation_minted(
        &self,
        owner: &ManagedAddress,
        asset_id: AssetId,
    ) -> SingleValueMapper<BigUint>;

    #[storage_mapper("expulsionRecord")]
    fn expulsion_record(&self, asset_id: AssetId) -> SingleValueMapper<ExpulsionRecord<Self::Api>>;

    #[storage_mapper("burnApproved")]
    fn burn_approved(&self, asset_id: AssetId) -> SingleValueMapper<bool>;
}
