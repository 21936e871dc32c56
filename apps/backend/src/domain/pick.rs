use rand::Rng;

use crate::domain::placement::PlacementKind;

/// Eligible targets of one kind and the kind's configured weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindPool {
    pub kind: PlacementKind,
    pub count: u64,
    pub weight: u32,
}

/// Pick a kind with probability proportional to `weight * count`, then a
/// uniform offset within that kind. With equal weights every eligible target
/// is equally likely. `None` when no pool has positive mass.
pub fn pick_weighted<R: Rng + ?Sized>(
    pools: &[KindPool],
    rng: &mut R,
) -> Option<(PlacementKind, u64)> {
    let mass = |p: &KindPool| u128::from(p.count) * u128::from(p.weight);
    let total: u128 = pools.iter().map(mass).sum();
    if total == 0 {
        return None;
    }

    let mut ticket = rng.random_range(0..total);
    for pool in pools {
        let m = mass(pool);
        if ticket < m {
            // Each target of the kind owns `weight` consecutive tickets.
            let offset = (ticket / u128::from(pool.weight)) as u64;
            return Some((pool.kind, offset));
        }
        ticket -= m;
    }
    None
}
