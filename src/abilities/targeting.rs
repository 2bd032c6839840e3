//! Target selection for abilities.

use bevy::prelude::*;

/// The `k` candidates closest to `origin`, nearest first.
///
/// Uses a partial selection so only the chosen prefix gets sorted. Equal
/// distances keep the candidates' input order.
pub fn nearest_targets<T, I>(origin: Vec3, candidates: I, k: usize) -> Vec<T>
where
    T: Copy,
    I: IntoIterator<Item = (T, Vec3)>,
{
    if k == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(f32, usize, T)> = candidates
        .into_iter()
        .enumerate()
        .map(|(order, (target, position))| (origin.distance_squared(position), order, target))
        .collect();

    let by_distance = |a: &(f32, usize, T), b: &(f32, usize, T)| {
        a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
    };

    if scored.len() > k {
        scored.select_nth_unstable_by(k - 1, by_distance);
        scored.truncate(k);
    }
    scored.sort_unstable_by(by_distance);

    scored.into_iter().map(|(_, _, target)| target).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(points: &[f32]) -> Vec<(usize, Vec3)> {
        points
            .iter()
            .enumerate()
            .map(|(i, &x)| (i, Vec3::new(x, 0.0, 0.0)))
            .collect()
    }

    #[test]
    fn picks_closest_in_distance_order() {
        let candidates = line(&[9.0, -1.0, 4.0, 2.0, -7.0]);
        let picked = nearest_targets(Vec3::ZERO, candidates, 3);
        assert_eq!(picked, vec![1, 3, 2]);
    }

    #[test]
    fn returns_everything_when_k_exceeds_candidates() {
        let picked = nearest_targets(Vec3::ZERO, line(&[3.0, 1.0]), 10);
        assert_eq!(picked, vec![1, 0]);
    }

    #[test]
    fn zero_k_or_no_candidates_is_empty() {
        assert!(nearest_targets(Vec3::ZERO, line(&[1.0]), 0).is_empty());
        assert!(nearest_targets::<usize, _>(Vec3::ZERO, Vec::new(), 3).is_empty());
    }

    #[test]
    fn ties_keep_input_order() {
        let picked = nearest_targets(Vec3::ZERO, line(&[2.0, -2.0, 2.0, 5.0]), 2);
        assert_eq!(picked, vec![0, 1]);
    }
}
