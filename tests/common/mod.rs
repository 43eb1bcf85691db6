#![allow(dead_code)]

use multiversx_sc_scenario::{api::DebugApi, imports::*};

use reputation_fund::{
    governance::GovernanceModule, reputation::ReputationModule, types::ProposalAction,
    ReputationFund, PERCENT_PRECISION,
};

pub const CODE_PATH: MxscPath = MxscPath::new("output/reputation-fund.mxsc.json");
pub const FUND: TestSCAddress = TestSCAddress::new("reputation-fund");

pub const OWNER: TestAddress = TestAddress::new("owner");
pub const CUSTODIAN: TestAddress = TestAddress::new("custodian");
pub const ALICE: TestAddress = TestAddress::new("alice");
pub const BOB: TestAddress = TestAddress::new("bob");
pub const CHARLIE: TestAddress = TestAddress::new("charlie");
pub const DAN: TestAddress = TestAddress::new("dan");
pub const EVE: TestAddress = TestAddress::new("eve");
pub const FRANK: TestAddress = TestAddress::new("frank");
pub const GRACE: TestAddress = TestAddress::new("grace");

pub const ACCOUNT_BALANCE: u64 = 10_000;
pub const START_TIMESTAMP: u64 = 1_000;
pub const TIMEOUT: u64 = 3_600;
pub const SUPPORT_PERCENT: u64 = 60;
pub const QUORUM_PERCENT: u64 = 40;

/// Five members whose reputation adds up to 2300, one asset each.
pub const MEMBERS: [(TestAddress, u64, u64); 5] = [
    (ALICE, 1, 300),
    (BOB, 2, 400),
    (CHARLIE, 3, 500),
    (DAN, 4, 300),
    (EVE, 5, 800),
];

pub fn percent<M: ManagedTypeApi>(value: u64) -> BigUint<M> {
    BigUint::from(PERCENT_PRECISION) * value
}

pub fn managed_address(address: TestAddress) -> ManagedAddress<DebugApi> {
    ManagedAddress::from(address.to_address())
}

pub fn fund_address() -> ManagedAddress<DebugApi> {
    ManagedAddress::from(FUND.to_address())
}

/// Deploys the fund at block 1 with the default 60% support / 40% quorum.
pub fn setup(is_private: bool, initial_mint_approvals: &[u64]) -> ScenarioWorld {
    let mut world = ScenarioWorld::new();
    world.register_contract(CODE_PATH, reputation_fund::ContractBuilder);

    world.account(OWNER).nonce(1).balance(ACCOUNT_BALANCE);
    world.account(CUSTODIAN).nonce(1);
    for account in [ALICE, BOB, CHARLIE, DAN, EVE, FRANK, GRACE] {
        world.account(account).nonce(1).balance(ACCOUNT_BALANCE);
    }
    world
        .current_block()
        .block_nonce(1)
        .block_timestamp(START_TIMESTAMP);

    let approvals = initial_mint_approvals.to_vec();
    world
        .tx()
        .from(OWNER)
        .raw_deploy()
        .code(CODE_PATH)
        .new_address(FUND)
        .whitebox(reputation_fund::contract_obj, |sc| {
            let mut custodians = ManagedVec::new();
            custodians.push(managed_address(CUSTODIAN));
            let mut mint_approvals = MultiValueEncoded::new();
            for asset_id in approvals {
                mint_approvals.push(asset_id);
            }
            sc.init(
                percent(SUPPORT_PERCENT),
                percent(QUORUM_PERCENT),
                TIMEOUT,
                is_private,
                custodians,
                mint_approvals,
            );
        });

    world
}

/// Public fund with every entry of `MEMBERS` minted at block 1, then moved
/// to block 2 so proposals snapshot the full supply.
pub fn setup_with_members() -> ScenarioWorld {
    let mut world = setup(false, &[]);
    for (member, asset_id, amount) in MEMBERS {
        mint(&mut world, asset_id, member, amount);
    }
    set_block(&mut world, 2, START_TIMESTAMP + 10);
    world
}

pub fn set_block(world: &mut ScenarioWorld, nonce: u64, timestamp: u64) {
    world
        .current_block()
        .block_nonce(nonce)
        .block_timestamp(timestamp);
}

pub fn mint(world: &mut ScenarioWorld, asset_id: u64, owner: TestAddress, amount: u64) {
    world
        .tx()
        .from(CUSTODIAN)
        .to(FUND)
        .whitebox(reputation_fund::contract_obj, |sc| {
            sc.mint(asset_id, managed_address(owner), BigUint::from(amount));
        });
}

pub fn delegate(
    world: &mut ScenarioWorld,
    from: TestAddress,
    to: TestAddress,
    owner: TestAddress,
    amount: u64,
) {
    world
        .tx()
        .from(from)
        .to(FUND)
        .whitebox(reputation_fund::contract_obj, |sc| {
            sc.delegate(
                managed_address(to),
                managed_address(owner),
                BigUint::from(amount),
            );
        });
}

pub fn propose<F>(world: &mut ScenarioWorld, proposer: TestAddress, build_action: F) -> u64
where
    F: FnOnce() -> ProposalAction<DebugApi>,
{
    let mut proposal_id = 0u64;
    world
        .tx()
        .from(proposer)
        .to(FUND)
        .whitebox(reputation_fund::contract_obj, |sc| {
            proposal_id = sc.propose(
                build_action(),
                BigUint::zero(),
                ManagedBuffer::from("proposal"),
            );
        });
    proposal_id
}

pub fn vote(world: &mut ScenarioWorld, voter: TestAddress, proposal_id: u64, aye: bool) {
    world
        .tx()
        .from(voter)
        .to(FUND)
        .whitebox(reputation_fund::contract_obj, |sc| {
            sc.vote(proposal_id, aye);
        });
}

pub fn trigger_approve(world: &mut ScenarioWorld, proposal_id: u64) {
    world
        .tx()
        .from(OWNER)
        .to(FUND)
        .whitebox(reputation_fund::contract_obj, |sc| {
            sc.trigger_approve(proposal_id);
        });
}

/// Proposes, collects an aye from every member and approves.
pub fn pass_proposal<F>(world: &mut ScenarioWorld, build_action: F) -> u64
where
    F: FnOnce() -> ProposalAction<DebugApi>,
{
    let proposal_id = propose(world, ALICE, build_action);
    for (member, _, _) in MEMBERS {
        vote(world, member, proposal_id, true);
    }
    trigger_approve(world, proposal_id);
    proposal_id
}
