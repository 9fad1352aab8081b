use rebase_orchestrator::{CallOrigin, Error as OrchestratorError};
use soroban_sdk::{testutils::Address as _, vec, Address, IntoVal, Symbol, Val, Vec};

use super::{harness, Harness, BASE_INDEX};
use crate::deploy::{INITIAL_SUPPLY, ORACLE_REPORT_DELAY_SEC};

fn set_delay_args(h: &Harness, delay: u64) -> Vec<Val> {
    vec![
        &h.env,
        h.protocol.owner.into_val(&h.env),
        delay.into_val(&h.env),
    ]
}

fn add_set_delay(h: &Harness, oracle: &Address, delay: u64) -> u32 {
    let p = &h.protocol;
    p.orchestrator.add_transaction(
        &p.owner,
        oracle,
        &Symbol::new(&h.env, "set_report_delay_sec"),
        &set_delay_args(h, delay),
    )
}

/// Fails inside the ledger because `stranger` is not its owner.
fn add_rejected_call(h: &Harness) -> u32 {
    let p = &h.protocol;
    let stranger = Address::generate(&h.env);
    p.orchestrator.add_transaction(
        &p.owner,
        &p.ledger.address,
        &Symbol::new(&h.env, "set_monetary_policy"),
        &vec![
            &h.env,
            stranger.into_val(&h.env),
            stranger.into_val(&h.env),
        ],
    )
}

#[test]
fn test_failing_batch_entry_rolls_back_whole_rebase() {
    let h = harness();
    h.env.mock_all_auths_allowing_non_root_auth();
    let p = &h.protocol;

    add_set_delay(&h, &p.market_oracle.address, 1_234);
    add_rejected_call(&h);
    add_set_delay(&h, &p.index_oracle.address, 1_234);

    h.push_reports(13_000_000, BASE_INDEX);
    h.set_time(h.next_window_open() + 5);

    assert_eq!(
        p.orchestrator
            .try_rebase(&h.scheduler, &CallOrigin::External),
        Err(Ok(OrchestratorError::DownstreamFailure))
    );
    assert_eq!(p.policy.epoch(), 0);
    assert_eq!(p.policy.last_rebase_timestamp_sec(), 0);
    assert_eq!(p.ledger.total_supply(), INITIAL_SUPPLY);
    assert_eq!(p.market_oracle.report_delay_sec(), ORACLE_REPORT_DELAY_SEC);
    assert_eq!(p.orchestrator.transactions_size(), 3);
    assert_eq!(
        p.orchestrator.transaction_at(&1).destination,
        p.ledger.address
    );
}

#[test]
fn test_batch_runs_after_disabling_failing_entry() {
    let h = harness();
    h.env.mock_all_auths_allowing_non_root_auth();
    let p = &h.protocol;

    add_set_delay(&h, &p.market_oracle.address, 1_234);
    let rejected = add_rejected_call(&h);
    add_set_delay(&h, &p.index_oracle.address, 4_321);
    p.orchestrator
        .set_transaction_enabled(&p.owner, &rejected, &false);

    h.push_reports(13_000_000, BASE_INDEX);
    h.set_time(h.next_window_open() + 5);

    assert_eq!(p.orchestrator.rebase(&h.scheduler, &CallOrigin::External), 2);
    assert_eq!(p.policy.epoch(), 1);
    assert_eq!(p.ledger.total_supply(), INITIAL_SUPPLY + INITIAL_SUPPLY * 3 / 100);
    assert_eq!(p.market_oracle.report_delay_sec(), 1_234);
    assert_eq!(p.index_oracle.report_delay_sec(), 4_321);
}

#[test]
fn test_batch_entry_cannot_reenter_rebase() {
    let h = harness();
    h.env.mock_all_auths_allowing_non_root_auth();
    let p = &h.protocol;

    add_set_delay(&h, &p.market_oracle.address, 1_234);
    p.orchestrator.add_transaction(
        &p.owner,
        &p.orchestrator.address,
        &Symbol::new(&h.env, "rebase"),
        &vec![
            &h.env,
            h.scheduler.into_val(&h.env),
            CallOrigin::External.into_val(&h.env),
        ],
    );

    h.push_reports(13_000_000, BASE_INDEX);
    h.set_time(h.next_window_open() + 5);

    assert_eq!(
        p.orchestrator
            .try_rebase(&h.scheduler, &CallOrigin::External),
        Err(Ok(OrchestratorError::DownstreamFailure))
    );
    assert_eq!(p.policy.epoch(), 0);
    assert_eq!(p.ledger.total_supply(), INITIAL_SUPPLY);
    assert_eq!(p.market_oracle.report_delay_sec(), ORACLE_REPORT_DELAY_SEC);
}

#[test]
fn test_policy_failure_skips_batch() {
    let h = harness();
    h.env.mock_all_auths_allowing_non_root_auth();
    let p = &h.protocol;
    add_set_delay(&h, &p.market_oracle.address, 1_234);

    // no reports pushed, so the market oracle has nothing to offer
    h.set_time(h.next_window_open() + 5);
    assert_eq!(
        p.orchestrator
            .try_rebase(&h.scheduler, &CallOrigin::External),
        Err(Ok(OrchestratorError::PolicyRebaseFailed))
    );
    assert_eq!(p.market_oracle.report_delay_sec(), ORACLE_REPORT_DELAY_SEC);
}

#[test]
fn test_remove_first_of_two_leaves_second() {
    let h = harness();
    let p = &h.protocol;
    add_set_delay(&h, &p.market_oracle.address, 1_111);
    add_set_delay(&h, &p.index_oracle.address, 2_222);

    p.orchestrator.remove_transaction(&p.owner, &0);
    assert_eq!(p.orchestrator.transactions_size(), 1);

    let remaining = p.orchestrator.transaction_at(&0);
    assert_eq!(remaining.destination, p.index_oracle.address);
    assert_eq!(remaining.args, set_delay_args(&h, 2_222));
}
