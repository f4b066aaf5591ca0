//! Properties of history composition over generated policies and claims

use chrono::NaiveDate;
use proptest::prelude::*;

use core_kernel::CarId;
use domain_claims::{compose_history, HistoryEventType, UNKNOWN_PROVIDER};
use test_utils::{claim_strategy, date_strategy, policy_strategy};

fn car() -> CarId {
    CarId::from_uuid(uuid::Uuid::from_u128(0x0190a1b2_0000_7000_8000_00000000ffff))
}

proptest! {
    #[test]
    fn history_is_chronological(
        policies in prop::collection::vec(policy_strategy(car()), 0..6),
        claims in prop::collection::vec(claim_strategy(car()), 0..10),
        today in date_strategy(),
    ) {
        let history = compose_history(&policies, &claims, today);
        let dates: Vec<NaiveDate> = history.iter().map(|e| e.date).collect();

        prop_assert!(dates.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn every_input_is_accounted_for(
        policies in prop::collection::vec(policy_strategy(car()), 0..6),
        claims in prop::collection::vec(claim_strategy(car()), 0..10),
        today in date_strategy(),
    ) {
        let history = compose_history(&policies, &claims, today);

        let count = |kind: HistoryEventType| history.iter().filter(|e| e.event_type == kind).count();
        let expired = policies.iter().filter(|p| p.end_date() < today).count();

        prop_assert_eq!(count(HistoryEventType::InsurancePolicyStart), policies.len());
        prop_assert_eq!(count(HistoryEventType::InsurancePolicyEnd), expired);
        prop_assert_eq!(count(HistoryEventType::InsuranceClaim), claims.len());
    }

    #[test]
    fn claim_provider_comes_from_a_covering_policy(
        policies in prop::collection::vec(policy_strategy(car()), 0..6),
        claims in prop::collection::vec(claim_strategy(car()), 1..10),
        today in date_strategy(),
    ) {
        let history = compose_history(&policies, &claims, today);

        for event in history.iter().filter(|e| e.event_type == HistoryEventType::InsuranceClaim) {
            let first_covering = policies.iter().find(|p| p.covers(event.date));
            match first_covering {
                Some(policy) => prop_assert_eq!(&event.provider, &policy.provider),
                None => prop_assert_eq!(event.provider.as_str(), UNKNOWN_PROVIDER),
            }
            prop_assert!(event.amount.is_some());
        }
    }
}
