/// PROPERTY-BASED TESTS: Connection delta invariants
///
/// Uses proptest to drive the connection set with random join/leave
/// sequences.
///
/// Key invariants:
/// 1. added, removed and continued never overlap and hold no duplicates
/// 2. After a cycle, the continued set is exactly the attached set
/// 3. A connection untouched since the last cycle stays continued

use std::collections::HashSet;

use proptest::prelude::*;
use scenesync_server::{ConnectionLog, ConnectionSet};
use scenesync_shared::ConnectionKey;
use scenesync_test::LocalConnection;

#[derive(Clone, Debug)]
enum Op {
    Connect(u64),
    Disconnect(u64),
    Cycle,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u64..6).prop_map(Op::Connect),
        (0u64..6).prop_map(Op::Disconnect),
        Just(Op::Cycle),
    ]
}

fn no_duplicates(keys: &[ConnectionKey]) -> bool {
    keys.iter().collect::<HashSet<_>>().len() == keys.len()
}

proptest! {
    #[test]
    fn prop_delta_partitions_are_disjoint(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut set = ConnectionSet::new(ConnectionLog::new());
        let mut touched: HashSet<ConnectionKey> = HashSet::new();

        for op in ops {
            match op {
                Op::Connect(key) => {
                    set.log().connected(ConnectionKey::new(key), LocalConnection::new());
                    touched.insert(ConnectionKey::new(key));
                }
                Op::Disconnect(key) => {
                    set.log().disconnected(ConnectionKey::new(key));
                    touched.insert(ConnectionKey::new(key));
                }
                Op::Cycle => {
                    let previous: HashSet<ConnectionKey> = set.continued().into_iter().collect();
                    let delta = set.compute_delta();

                    prop_assert!(no_duplicates(&delta.added));
                    prop_assert!(no_duplicates(&delta.removed));
                    prop_assert!(no_duplicates(&delta.continued));

                    let added: HashSet<_> = delta.added.iter().copied().collect();
                    let removed: HashSet<_> = delta.removed.iter().copied().collect();
                    let continued: HashSet<_> = delta.continued.iter().copied().collect();
                    prop_assert!(added.is_disjoint(&continued));
                    prop_assert!(added.is_disjoint(&removed));
                    prop_assert!(removed.is_disjoint(&continued));

                    for key in previous.difference(&touched) {
                        prop_assert!(continued.contains(key));
                    }
                    for key in &removed {
                        prop_assert!(previous.contains(key));
                        prop_assert!(!set.is_attached(key));
                    }

                    set.finish_cycle();
                    let after: HashSet<ConnectionKey> = set.continued().into_iter().collect();
                    let attached: HashSet<ConnectionKey> = (0u64..6)
                        .map(ConnectionKey::new)
                        .filter(|key| set.is_attached(key))
                        .collect();
                    prop_assert_eq!(after, attached);

                    touched.clear();
                }
            }
        }
    }
}
