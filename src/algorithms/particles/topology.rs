use serde::{Deserialize, Serialize};

use crate::{core::utils::minkowski_distance, DVector, Float};

/// Swarm topologies which determine the flow of information between particles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwarmTopology {
    /// Each particle is connected to all others
    #[default]
    Global,
    /// Each particle is connected to itself and its `k - 1` nearest neighbours, measured with the
    /// Minkowski distance of order `p` over the particles' current positions
    KNearest {
        /// Neighbourhood size, including the particle itself
        k: usize,
        /// Minkowski order
        p: u32,
    },
}

impl SwarmTopology {
    /// Compute the neighbour set of every particle from the given positions, or `None` for
    /// [`SwarmTopology::Global`] where every particle follows the swarm best.
    ///
    /// The set for particle `i` always starts with `i` itself, followed by the `min(k, n) - 1`
    /// nearest other particles in order of increasing distance, with ties resolved towards the
    /// lower index.
    pub fn neighbors(&self, positions: &[DVector<Float>]) -> Option<Vec<Vec<usize>>> {
        let Self::KNearest { k, p } = *self else {
            return None;
        };
        let k = k.clamp(1, positions.len().max(1));
        Some(
            positions
                .iter()
                .enumerate()
                .map(|(i, xi)| {
                    let mut others = positions
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(j, xj)| (minkowski_distance(xi, xj, p), j))
                        .collect::<Vec<_>>();
                    others.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
                    std::iter::once(i)
                        .chain(others.into_iter().take(k - 1).map(|(_, j)| j))
                        .collect()
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use fastrand::Rng;
    use nalgebra::dvector;

    use super::*;
    use crate::core::utils::generate_random_vector;

    #[test]
    fn test_knearest_on_a_line() {
        let positions = vec![dvector![0.0], dvector![1.0], dvector![3.0], dvector![10.0]];
        let neighbors = SwarmTopology::KNearest { k: 2, p: 2 }.neighbors(&positions).unwrap();
        assert_eq!(neighbors, vec![vec![0, 1], vec![1, 0], vec![2, 1], vec![3, 2]]);
        let neighbors = SwarmTopology::KNearest { k: 3, p: 1 }.neighbors(&positions).unwrap();
        assert_eq!(neighbors[3], vec![3, 2, 1]);
    }

    #[test]
    fn test_knearest_ties_prefer_lower_index() {
        let positions = vec![dvector![0.0], dvector![-1.0], dvector![1.0]];
        let neighbors = SwarmTopology::KNearest { k: 2, p: 2 }.neighbors(&positions).unwrap();
        assert_eq!(neighbors[0], vec![0, 1]);
    }

    #[test]
    fn test_knearest_with_large_order() {
        let positions = vec![dvector![0.0], dvector![1.0], dvector![10.0]];
        let neighbors = SwarmTopology::KNearest { k: 2, p: u32::MAX }
            .neighbors(&positions)
            .unwrap();
        assert_eq!(neighbors[0], vec![0, 1]);
        let positions = vec![dvector![0.0], dvector![4.0], dvector![3.0]];
        let neighbors = SwarmTopology::KNearest { k: 2, p: 1000 }
            .neighbors(&positions)
            .unwrap();
        assert_eq!(neighbors[0], vec![0, 2]);
        let positions = vec![dvector![0.0, 0.0], dvector![2.0, 2.0], dvector![0.0, 3.0]];
        let neighbors = SwarmTopology::KNearest { k: 2, p: 500 }
            .neighbors(&positions)
            .unwrap();
        assert_eq!(neighbors[0], vec![0, 1]);
    }

    #[test]
    fn test_neighbor_set_sizes() {
        let mut rng = Rng::with_seed(0);
        let positions = (0..10)
            .map(|_| generate_random_vector(3, -5.0, 5.0, &mut rng))
            .collect::<Vec<_>>();
        for k in 1..=10 {
            for p in [1, 2, 3] {
                let neighbors = SwarmTopology::KNearest { k, p }.neighbors(&positions).unwrap();
                assert_eq!(neighbors.len(), 10);
                for (i, set) in neighbors.iter().enumerate() {
                    assert_eq!(set.len(), k);
                    assert_eq!(set[0], i);
                    let mut sorted = set.clone();
                    sorted.sort_unstable();
                    sorted.dedup();
                    assert_eq!(sorted.len(), k);
                    assert!(set.iter().all(|&j| j < 10));
                }
            }
        }
        assert!(SwarmTopology::Global.neighbors(&positions).is_none());
    }
}
