use rebase_orchestrator::{CallOrigin, Error as OrchestratorError};
use soroban_sdk::{symbol_short, testutils::Events, IntoVal, TryFromVal, Val, Vec};
use supply_policy::{Error as PolicyError, RebaseRecord};

use super::{harness, BASE_INDEX};
use crate::deploy::{INITIAL_SUPPLY, REBASE_INTERVAL_SEC, REBASE_WINDOW_LENGTH_SEC};

#[test]
fn test_deploy_links_components() {
    let h = harness();
    let p = &h.protocol;
    assert_eq!(p.ledger.monetary_policy(), Some(p.policy.address.clone()));
    assert_eq!(p.policy.orchestrator(), Some(p.orchestrator.address.clone()));
    assert_eq!(p.policy.market_oracle(), Some(p.market_oracle.address.clone()));
    assert_eq!(p.policy.index_oracle(), Some(p.index_oracle.address.clone()));
    assert_eq!(p.orchestrator.policy(), p.policy.address);
    assert_eq!(p.policy.config().base_index_value, BASE_INDEX);
    assert_eq!(p.policy.config().rebase_lag, 10);
    assert_eq!(p.policy.timing().rebase_window_offset_sec, 0);
    assert_eq!(p.market_oracle.providers_size(), 1);
    assert_eq!(p.index_oracle.provider_at(&0), p.provider);
    assert_eq!(p.ledger.total_supply(), INITIAL_SUPPLY);
}

#[test]
fn test_ledger_and_policy_share_supply_ceiling() {
    assert_eq!(elastic_ledger::MAX_SUPPLY, supply_policy::MAX_SUPPLY);
}

#[test]
fn test_full_rebase_cycle_expands_supply() {
    let h = harness();
    let p = &h.protocol;
    h.push_reports(13_000_000, BASE_INDEX);

    let open = h.next_window_open();
    h.set_time(open + 5);
    assert!(p.policy.in_rebase_window());
    assert_eq!(p.orchestrator.rebase(&h.scheduler, &CallOrigin::External), 0);

    // 30% above target, damped by a lag of 10
    let expected_delta = INITIAL_SUPPLY * 3 / 100;
    assert_eq!(p.ledger.total_supply(), INITIAL_SUPPLY + expected_delta);
    assert_eq!(p.policy.epoch(), 1);
    assert_eq!(p.policy.last_rebase_timestamp_sec(), open);

    let rebase_topics: Vec<Val> = ("POLICY", symbol_short!("REBASE")).into_val(&h.env);
    let (_, _, data) = h
        .env
        .events()
        .all()
        .iter()
        .find(|(contract, topics, _)| {
            *contract == p.policy.address && *topics == rebase_topics
        })
        .unwrap();
    let record = RebaseRecord::try_from_val(&h.env, &data).unwrap();
    assert_eq!(record.epoch, 1);
    assert_eq!(record.exchange_rate, 13_000_000);
    assert_eq!(record.index_value, BASE_INDEX);
    assert_eq!(record.requested_supply_adjustment, expected_delta);
    assert_eq!(record.timestamp_sec, open + 5);
}

#[test]
fn test_full_rebase_cycle_contracts_supply() {
    let h = harness();
    let p = &h.protocol;
    h.push_reports(7_000_000, BASE_INDEX);
    h.set_time(h.next_window_open() + 5);

    p.orchestrator.rebase(&h.scheduler, &CallOrigin::External);
    assert_eq!(
        p.ledger.total_supply(),
        INITIAL_SUPPLY - INITIAL_SUPPLY * 3 / 100
    );
}

#[test]
fn test_rate_inside_deviation_band_keeps_supply() {
    let h = harness();
    let p = &h.protocol;
    h.push_reports(10_400_000, BASE_INDEX);
    h.set_time(h.next_window_open() + 5);

    p.orchestrator.rebase(&h.scheduler, &CallOrigin::External);
    assert_eq!(p.ledger.total_supply(), INITIAL_SUPPLY);
    assert_eq!(p.policy.epoch(), 1);
}

#[test]
fn test_rebase_window_boundaries() {
    let h = harness();
    let p = &h.protocol;
    h.push_reports(13_000_000, BASE_INDEX);
    let open = h.next_window_open();

    h.set_time(open - 5);
    assert!(!p.policy.in_rebase_window());
    assert_eq!(
        p.orchestrator
            .try_rebase(&h.scheduler, &CallOrigin::External),
        Err(Ok(OrchestratorError::PolicyRebaseFailed))
    );

    h.set_time(open + REBASE_WINDOW_LENGTH_SEC + 5);
    assert!(!p.policy.in_rebase_window());
    assert_eq!(
        p.orchestrator
            .try_rebase(&h.scheduler, &CallOrigin::External),
        Err(Ok(OrchestratorError::PolicyRebaseFailed))
    );

    h.set_time(open + REBASE_WINDOW_LENGTH_SEC - 5);
    p.orchestrator.rebase(&h.scheduler, &CallOrigin::External);
    assert_eq!(p.policy.last_rebase_timestamp_sec(), open);
}

#[test]
fn test_second_rebase_in_same_window_fails() {
    let h = harness();
    let p = &h.protocol;
    h.push_reports(13_000_000, BASE_INDEX);
    let open = h.next_window_open();

    h.set_time(open + 5);
    p.orchestrator.rebase(&h.scheduler, &CallOrigin::External);
    let supply = p.ledger.total_supply();

    h.set_time(open + 10);
    assert_eq!(
        p.orchestrator
            .try_rebase(&h.scheduler, &CallOrigin::External),
        Err(Ok(OrchestratorError::PolicyRebaseFailed))
    );
    assert_eq!(p.policy.epoch(), 1);
    assert_eq!(p.ledger.total_supply(), supply);

    // reports are still inside their expiration a day later
    h.set_time(open + REBASE_INTERVAL_SEC + 5);
    p.orchestrator.rebase(&h.scheduler, &CallOrigin::External);
    assert_eq!(p.policy.epoch(), 2);
    assert_eq!(p.policy.last_rebase_timestamp_sec(), open + REBASE_INTERVAL_SEC);
}

#[test]
fn test_fresh_reports_are_not_yet_trusted() {
    let h = harness();
    let p = &h.protocol;
    let open = h.next_window_open();

    // pushed 10 seconds before the window; report delay is an hour
    h.set_time(open - 10);
    h.push_reports(13_000_000, BASE_INDEX);
    h.set_time(open + 5);

    assert_eq!(p.market_oracle.get_data(), (0, false));
    assert_eq!(
        p.orchestrator
            .try_rebase(&h.scheduler, &CallOrigin::External),
        Err(Ok(OrchestratorError::PolicyRebaseFailed))
    );
    assert_eq!(p.policy.epoch(), 0);
}

#[test]
fn test_policy_rejects_direct_callers() {
    let h = harness();
    let p = &h.protocol;
    h.push_reports(13_000_000, BASE_INDEX);
    h.set_time(h.next_window_open() + 5);

    assert_eq!(
        p.policy.try_rebase(&h.scheduler),
        Err(Ok(PolicyError::AccessDenied))
    );
    assert_eq!(
        p.orchestrator.try_rebase(&h.scheduler, &CallOrigin::Nested),
        Err(Ok(OrchestratorError::ContractCallerRejected))
    );
    assert_eq!(p.ledger.total_supply(), INITIAL_SUPPLY);
}
