use std::sync::Arc;

use chart_kit::extensions::{ChartStrategy, StrategyRegistry, define_strategy};
use proptest::prelude::*;

fn named(name: &str) -> Arc<dyn ChartStrategy> {
    define_strategy(name, |_, _, _| None)
}

proptest! {
    #[test]
    fn last_registration_wins_for_every_id(
        ids in proptest::collection::vec("[a-z][a-z0-9-]{0,11}", 1..24)
    ) {
        let registry = StrategyRegistry::new();
        let mut expected: Vec<(String, Arc<dyn ChartStrategy>)> = Vec::new();

        for id in &ids {
            let strategy = named(id);
            registry.register(id.clone(), Arc::clone(&strategy));
            expected.retain(|(known, _)| known != id);
            expected.push((id.clone(), strategy));
        }

        prop_assert_eq!(registry.len(), expected.len());
        for (id, strategy) in &expected {
            let stored = registry.get(id).expect("registered id");
            prop_assert!(Arc::ptr_eq(&stored, strategy));
        }
    }
}
