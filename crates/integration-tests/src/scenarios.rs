//! Literal end-to-end scenarios, mirroring how a block would apply each
//! transaction kind and what an indexer would observe afterwards.

use crate::{signed_tx, TestAccount};
use nc_state::{InMemoryState, StateView};
use nc_transaction::{
    run_tx, CreateCoinData, DeclareCandidacyData, EditCandidateData, SetCandidateOnData,
    SetCandidateOffData, TxType,
};
use primitive_types::U256;
use shared_types::{code, to_smallest, CandidateStatus, CoinSymbol, BASE_COIN};

fn funded_account(state: &mut InMemoryState) -> TestAccount {
    let account = TestAccount::generate();
    state.add_balance(&account.address, &BASE_COIN, to_smallest(1_000_000));
    account
}

fn dec(s: &str) -> U256 {
    U256::from_dec_str(s).unwrap()
}

#[test]
fn test_create_coin() {
    let mut state = InMemoryState::new();
    let account = funded_account(&mut state);
    let mut pool = U256::zero();

    let data = CreateCoinData {
        name: "My Test Coin".into(),
        symbol: CoinSymbol::from_ticker("ABCDEF"),
        initial_amount: to_smallest(100),
        initial_reserve: to_smallest(1000),
        crr: 50,
    };
    let raw = signed_tx(&account, 1, BASE_COIN, TxType::CreateCoin, data.encode());
    let response = run_tx(&mut state, false, &raw, &mut pool, 0, None);
    assert_eq!(response.code, code::OK, "{}", response.log);

    // 1000 reserve + 1000 commission (6-char symbol) leave 998_000.
    assert_eq!(
        state.get_balance(&account.address, &BASE_COIN),
        dec("998000000000000000000000")
    );

    let coin = state.get_coin(&data.symbol).expect("coin in state");
    assert_eq!(coin.name, "My Test Coin");
    assert_eq!(coin.volume, to_smallest(100));
    assert_eq!(coin.reserve, to_smallest(1000));
    assert_eq!(coin.crr, 50);

    // Whole initial supply lands with the issuer.
    assert_eq!(
        state.get_balance(&account.address, &data.symbol),
        to_smallest(100)
    );

    // Nonce advanced once; pool took the base-coin commission.
    assert_eq!(state.get_nonce(&account.address), 1);
    assert_eq!(pool, to_smallest(1000));

    assert_eq!(response.tags.len(), 3);
    assert_eq!(response.tags[0].key, b"tx.type");
    assert_eq!(response.tags[0].value, b"05");
    assert_eq!(response.tags[2].key, b"tx.coin");
    assert_eq!(response.tags[2].value, b"ABCDEF");
    assert_eq!(response.gas_used, 1_000_000);
    assert_eq!(response.gas_wanted, 1_000_000);
}

#[test]
fn test_declare_candidacy() {
    let mut state = InMemoryState::new();
    let account = funded_account(&mut state);
    let mut pool = U256::zero();

    let pubkey = [0x33; 32];
    let data = DeclareCandidacyData {
        address: account.address,
        pubkey,
        commission: 10,
        coin: BASE_COIN,
        stake: to_smallest(100),
    };
    let raw = signed_tx(&account, 1, BASE_COIN, TxType::DeclareCandidacy, data.encode());
    let response = run_tx(&mut state, false, &raw, &mut pool, 0, None);
    assert_eq!(response.code, code::OK, "{}", response.log);

    // 100 stake + 10 commission leave 999_890.
    assert_eq!(
        state.get_balance(&account.address, &BASE_COIN),
        dec("999890000000000000000000")
    );

    let candidate = state.get_candidate(&pubkey).expect("candidate in state");
    assert_eq!(candidate.owner_address, account.address);
    assert_eq!(candidate.reward_address, account.address);
    assert_eq!(candidate.commission, 10);
    assert_eq!(candidate.stake, to_smallest(100));
    assert_eq!(candidate.total_base_stake, U256::zero());
    assert_eq!(candidate.status, CandidateStatus::Offline);

    assert_eq!(state.get_nonce(&account.address), 1);
    assert_eq!(pool, to_smallest(10));
}

#[test]
fn test_edit_candidate() {
    let mut state = InMemoryState::new();
    let account = funded_account(&mut state);
    let mut pool = U256::zero();

    let pubkey = [0x44; 32];
    state.create_candidate(
        account.address,
        account.address,
        pubkey,
        10,
        U256::zero(),
        BASE_COIN,
        to_smallest(1),
    );
    state.create_validator(
        account.address,
        pubkey,
        10,
        U256::zero(),
        BASE_COIN,
        to_smallest(1),
    );

    let mut new_reward = [0u8; 20];
    new_reward[0] = 1;
    let mut new_owner = [0u8; 20];
    new_owner[0] = 2;

    let data = EditCandidateData {
        pubkey,
        reward_address: new_reward,
        owner_address: new_owner,
    };
    let raw = signed_tx(&account, 1, BASE_COIN, TxType::EditCandidate, data.encode());
    let response = run_tx(&mut state, false, &raw, &mut pool, 0, None);
    assert_eq!(response.code, code::OK, "{}", response.log);

    assert_eq!(
        state.get_balance(&account.address, &BASE_COIN),
        dec("999990000000000000000000")
    );

    let candidate = state.get_candidate(&pubkey).unwrap();
    assert_eq!(candidate.owner_address, new_owner);
    assert_eq!(candidate.reward_address, new_reward);
    // Everything else untouched.
    assert_eq!(candidate.commission, 10);
    assert_eq!(candidate.total_base_stake, to_smallest(1));
    assert_eq!(candidate.status, CandidateStatus::Offline);
    assert_eq!(state.validators().len(), 1);
}

#[test]
fn test_switch_candidate_status() {
    let mut state = InMemoryState::new();
    let account = funded_account(&mut state);
    let mut pool = U256::zero();

    let pubkey = [0x55; 32];
    state.create_candidate(
        account.address,
        account.address,
        pubkey,
        10,
        U256::zero(),
        BASE_COIN,
        to_smallest(1),
    );

    let raw = signed_tx(
        &account,
        1,
        BASE_COIN,
        TxType::SetCandidateOnline,
        SetCandidateOnData { pubkey }.encode(),
    );
    let response = run_tx(&mut state, false, &raw, &mut pool, 0, None);
    assert_eq!(response.code, code::OK, "{}", response.log);

    assert_eq!(
        state.get_balance(&account.address, &BASE_COIN),
        dec("999999900000000000000000")
    );
    assert_eq!(
        state.get_candidate(&pubkey).unwrap().status,
        CandidateStatus::Online
    );

    let raw = signed_tx(
        &account,
        2,
        BASE_COIN,
        TxType::SetCandidateOffline,
        SetCandidateOffData { pubkey }.encode(),
    );
    let response = run_tx(&mut state, false, &raw, &mut pool, 0, None);
    assert_eq!(response.code, code::OK, "{}", response.log);
    assert_eq!(
        state.get_candidate(&pubkey).unwrap().status,
        CandidateStatus::Offline
    );
    assert_eq!(state.get_nonce(&account.address), 2);
}

#[test]
fn test_create_coin_rejects_duplicate_symbol() {
    let mut state = InMemoryState::new();
    let account = funded_account(&mut state);
    let mut pool = U256::zero();

    let data = CreateCoinData {
        name: "My Test Coin".into(),
        symbol: CoinSymbol::from_ticker("ABCDEF"),
        initial_amount: to_smallest(100),
        initial_reserve: to_smallest(1000),
        crr: 50,
    };
    let raw = signed_tx(&account, 1, BASE_COIN, TxType::CreateCoin, data.encode());
    assert_eq!(
        run_tx(&mut state, false, &raw, &mut pool, 0, None).code,
        code::OK
    );

    let balance_before = state.get_balance(&account.address, &BASE_COIN);
    let coin_before = state.get_coin(&data.symbol).unwrap();
    let pool_before = pool;

    let raw = signed_tx(&account, 2, BASE_COIN, TxType::CreateCoin, data.encode());
    let response = run_tx(&mut state, false, &raw, &mut pool, 0, None);
    assert_eq!(response.code, code::COIN_ALREADY_EXISTS);
    assert!(response.tags.is_empty());

    // State is bit-identical to before the failed attempt.
    assert_eq!(state.get_balance(&account.address, &BASE_COIN), balance_before);
    assert_eq!(state.get_coin(&data.symbol).unwrap(), coin_before);
    assert_eq!(state.get_nonce(&account.address), 1);
    assert_eq!(pool, pool_before);
}

#[test]
fn test_create_coin_rejects_wrong_crr() {
    let mut state = InMemoryState::new();
    let account = funded_account(&mut state);
    let mut pool = U256::zero();

    let data = CreateCoinData {
        name: "My Test Coin".into(),
        symbol: CoinSymbol::from_ticker("ABCDEF"),
        initial_amount: to_smallest(100),
        initial_reserve: to_smallest(1000),
        crr: 5,
    };
    let raw = signed_tx(&account, 1, BASE_COIN, TxType::CreateCoin, data.encode());
    let response = run_tx(&mut state, false, &raw, &mut pool, 0, None);

    assert_eq!(response.code, code::WRONG_CRR);
    assert!(!state.coin_exists(&data.symbol));
    assert_eq!(
        state.get_balance(&account.address, &BASE_COIN),
        to_smallest(1_000_000)
    );
    assert_eq!(state.get_nonce(&account.address), 0);
    assert_eq!(pool, U256::zero());
}

#[test]
fn test_create_coin_rejects_underfunded_sender() {
    let mut state = InMemoryState::new();
    let account = TestAccount::generate();
    // Covers the reserve but not reserve + commission.
    state.add_balance(&account.address, &BASE_COIN, to_smallest(1500));
    let mut pool = U256::zero();

    let data = CreateCoinData {
        name: "My Test Coin".into(),
        symbol: CoinSymbol::from_ticker("ABCDEF"),
        initial_amount: to_smallest(100),
        initial_reserve: to_smallest(1000),
        crr: 50,
    };
    let raw = signed_tx(&account, 1, BASE_COIN, TxType::CreateCoin, data.encode());
    let response = run_tx(&mut state, false, &raw, &mut pool, 0, None);

    assert_eq!(response.code, code::INSUFFICIENT_FUNDS);
    assert!(!state.coin_exists(&data.symbol));
    assert_eq!(
        state.get_balance(&account.address, &BASE_COIN),
        to_smallest(1500)
    );
    assert_eq!(state.get_nonce(&account.address), 0);
}

#[test]
fn test_commission_in_custom_gas_coin() {
    let mut state = InMemoryState::new();
    let account = funded_account(&mut state);
    let mut pool = U256::zero();

    let gas_coin = CoinSymbol::from_ticker("FEECOIN");
    state.create_coin(gas_coin, "Fee Coin", to_smallest(100), 50, to_smallest(1000));
    state.add_balance(&account.address, &gas_coin, to_smallest(100));

    let pubkey = [0x66; 32];
    state.create_candidate(
        account.address,
        account.address,
        pubkey,
        10,
        U256::zero(),
        BASE_COIN,
        U256::zero(),
    );

    // 100 gas at price 1 => 0.1 NOAH carved out of the coin's reserve.
    let commission_base = U256::from(100u64) * U256::from(shared_types::COMMISSION_MULTIPLIER);
    let expected_burn =
        nc_formula::sale_amount(to_smallest(100), to_smallest(1000), 50, commission_base);

    let raw = signed_tx(
        &account,
        1,
        gas_coin,
        TxType::SetCandidateOnline,
        SetCandidateOnData { pubkey }.encode(),
    );
    let response = run_tx(&mut state, false, &raw, &mut pool, 0, None);
    assert_eq!(response.code, code::OK, "{}", response.log);

    // Pool is fed in base coin; the curve shrinks by reserve and volume.
    assert_eq!(pool, commission_base);
    let coin = state.get_coin(&gas_coin).unwrap();
    assert_eq!(coin.reserve, to_smallest(1000) - commission_base);
    assert_eq!(coin.volume, to_smallest(100) - expected_burn);

    // Sender paid in the gas coin; base balance untouched.
    assert_eq!(
        state.get_balance(&account.address, &gas_coin),
        to_smallest(100) - expected_burn
    );
    assert_eq!(
        state.get_balance(&account.address, &BASE_COIN),
        to_smallest(1_000_000)
    );
    assert_eq!(
        state.get_candidate(&pubkey).unwrap().status,
        CandidateStatus::Online
    );
}

#[test]
fn test_commission_rejected_when_reserve_too_small() {
    let mut state = InMemoryState::new();
    let account = funded_account(&mut state);
    let mut pool = U256::zero();

    // A coin whose entire reserve cannot cover a DeclareCandidacy fee
    // of 10 NOAH: reserve is forced down after creation.
    let gas_coin = CoinSymbol::from_ticker("THIN");
    state.create_coin(gas_coin, "Thin Reserve", to_smallest(100), 50, to_smallest(1000));
    state.sub_coin_reserve(&gas_coin, to_smallest(995));
    state.add_balance(&account.address, &gas_coin, to_smallest(100));

    let data = DeclareCandidacyData {
        address: account.address,
        pubkey: [0x77; 32],
        commission: 10,
        coin: BASE_COIN,
        stake: to_smallest(100),
    };
    let raw = signed_tx(&account, 1, gas_coin, TxType::DeclareCandidacy, data.encode());
    let response = run_tx(&mut state, false, &raw, &mut pool, 0, None);

    assert_eq!(response.code, code::COIN_RESERVE_NOT_SUFFICIENT);
    assert!(state.get_candidate(&data.pubkey).is_none());
    assert_eq!(pool, U256::zero());
}

#[test]
fn test_block_reward_seeds_the_pool() {
    use nc_rewards::RewardSchedule;

    let mut state = InMemoryState::new();
    let account = funded_account(&mut state);

    let pubkey = [0x99; 32];
    state.create_candidate(
        account.address,
        account.address,
        pubkey,
        10,
        U256::zero(),
        BASE_COIN,
        U256::zero(),
    );

    // The block proposer seeds the pool with the height's emission, then
    // commissions accumulate on top.
    let schedule = RewardSchedule::new(0);
    let height = 1u64;
    let mut pool = schedule.reward_for_block(height);

    let raw = signed_tx(
        &account,
        1,
        BASE_COIN,
        TxType::SetCandidateOnline,
        SetCandidateOnData { pubkey }.encode(),
    );
    let response = run_tx(&mut state, false, &raw, &mut pool, height, None);
    assert_eq!(response.code, code::OK, "{}", response.log);

    let commission = U256::from(100u64) * U256::from(shared_types::COMMISSION_MULTIPLIER);
    assert_eq!(pool, to_smallest(333) + commission);
}

#[test]
fn test_base_supply_is_conserved_across_a_block() {
    let mut state = InMemoryState::new();
    let account = funded_account(&mut state);
    let mut pool = U256::zero();

    let data = CreateCoinData {
        name: "My Test Coin".into(),
        symbol: CoinSymbol::from_ticker("ABCDEF"),
        initial_amount: to_smallest(100),
        initial_reserve: to_smallest(1000),
        crr: 50,
    };
    let raw = signed_tx(&account, 1, BASE_COIN, TxType::CreateCoin, data.encode());
    assert_eq!(
        run_tx(&mut state, false, &raw, &mut pool, 0, None).code,
        code::OK
    );

    let raw = signed_tx(
        &account,
        2,
        BASE_COIN,
        TxType::DeclareCandidacy,
        DeclareCandidacyData {
            address: account.address,
            pubkey: [0x88; 32],
            commission: 10,
            coin: BASE_COIN,
            stake: to_smallest(100),
        }
        .encode(),
    );
    assert_eq!(
        run_tx(&mut state, false, &raw, &mut pool, 0, None).code,
        code::OK
    );

    // Base coin only moved between the balance, the new coin's reserve,
    // the staked amount, and the reward pool.
    let balance = state.get_balance(&account.address, &BASE_COIN);
    let reserve = state.get_coin(&data.symbol).unwrap().reserve;
    let stake = state.get_candidate(&[0x88; 32]).unwrap().stake;
    assert_eq!(balance + reserve + stake + pool, to_smallest(1_000_000));
}
