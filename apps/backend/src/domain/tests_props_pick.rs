use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::pick::{pick_weighted, KindPool};
use crate::domain::placement::PlacementKind;
use crate::domain::test_prelude;

fn pools(d: u64, p: u64, u: u64, w: (u32, u32, u32)) -> Vec<KindPool> {
    vec![
        KindPool {
            kind: PlacementKind::Discussion,
            count: d,
            weight: w.0,
        },
        KindPool {
            kind: PlacementKind::Post,
            count: p,
            weight: w.1,
        },
        KindPool {
            kind: PlacementKind::User,
            count: u,
            weight: w.2,
        },
    ]
}

#[test]
fn empty_pools_pick_nothing() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    assert_eq!(pick_weighted(&pools(0, 0, 0, (1, 1, 1)), &mut rng), None);
    assert_eq!(pick_weighted(&pools(4, 4, 4, (0, 0, 0)), &mut rng), None);
}

#[test]
fn zero_weight_kind_is_never_chosen() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let p = pools(10, 10, 10, (1, 0, 1));
    for _ in 0..500 {
        let (kind, _) = pick_weighted(&p, &mut rng).unwrap();
        assert_ne!(kind, PlacementKind::Post);
    }
}

#[test]
fn equal_weights_are_uniform_over_targets() {
    // 1 discussion, 3 users: users should win about three times as often.
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let p = pools(1, 0, 3, (1, 1, 1));
    let users = (0..4000)
        .filter(|_| pick_weighted(&p, &mut rng).unwrap().0 == PlacementKind::User)
        .count();
    assert!((2800..=3200).contains(&users), "users picked {users} times");
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// A pick always lands inside an eligible pool.
    #[test]
    fn prop_pick_is_in_range(
        d in 0u64..50, p in 0u64..50, u in 0u64..50,
        w in (0u32..5, 0u32..5, 0u32..5),
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let ps = pools(d, p, u, w);
        match pick_weighted(&ps, &mut rng) {
            None => {
                let mass: u64 = ps.iter().map(|k| k.count * u64::from(k.weight)).sum();
                prop_assert_eq!(mass, 0);
            }
            Some((kind, offset)) => {
                let pool = ps.iter().find(|k| k.kind == kind).unwrap();
                prop_assert!(pool.weight > 0);
                prop_assert!(offset < pool.count);
            }
        }
    }
}
