use rand::{seq::SliceRandom, Rng};

use crate::models::activity::CandidateActivity;

pub const MAX_ACTIVITIES_PER_DAY: usize = 4;

/// Number of activities each day may take for a pool of `pool_len`.
pub fn per_day_cap(pool_len: usize, day_count: u32) -> usize {
    let days = (day_count as usize).max(1);
    pool_len.div_ceil(days).min(MAX_ACTIVITIES_PER_DAY)
}

/// Splits the pool into `day_count` consecutive slices of at most
/// [`per_day_cap`] activities.
///
/// The cursor only moves forward, so trailing days get fewer (or no)
/// activities once the pool runs out; leftover capacity is never backfilled.
/// Each slice is shuffled with `rng` before it is returned.
pub fn allocate<'a, R>(
    pool: &'a [CandidateActivity],
    day_count: u32,
    rng: &mut R,
) -> Vec<Vec<&'a CandidateActivity>>
where
    R: Rng + ?Sized,
{
    let cap = per_day_cap(pool.len(), day_count);
    let mut cursor = 0usize;
    let mut days = Vec::with_capacity(day_count as usize);

    for _ in 0..day_count {
        let start = cursor.min(pool.len());
        let end = (cursor + cap).min(pool.len());
        let mut slice: Vec<&CandidateActivity> = pool[start..end].iter().collect();
        cursor += cap;

        slice.shuffle(rng);
        days.push(slice);
    }

    days
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::models::activity::ActivityCategory;
    use rand::{rngs::StdRng, SeedableRng};

    fn pool(size: usize) -> Vec<CandidateActivity> {
        (0..size)
            .map(|i| CandidateActivity {
                id: format!("activity-{}", i),
                category: ActivityCategory::Culture,
                tags: vec![],
                approx_price: None,
                duration_min: Some(60),
                start_time: None,
                end_time: None,
            })
            .collect()
    }

    fn ids(day: &[&CandidateActivity]) -> HashSet<String> {
        day.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn test_per_day_cap() {
        assert_eq!(per_day_cap(3, 3), 1);
        assert_eq!(per_day_cap(20, 3), 4);
        assert_eq!(per_day_cap(5, 2), 3);
        assert_eq!(per_day_cap(0, 4), 0);
    }

    #[test]
    fn test_one_per_day_when_pool_matches_days() {
        let activities = pool(3);
        let mut rng = StdRng::seed_from_u64(7);
        let days = allocate(&activities, 3, &mut rng);

        assert_eq!(days.len(), 3);
        for day in &days {
            assert_eq!(day.len(), 1);
        }
        let all: HashSet<String> = days.iter().flat_map(|d| ids(d)).collect();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_large_pool_is_capped_and_leaves_remainder_unused() {
        let activities = pool(20);
        let mut rng = StdRng::seed_from_u64(11);
        let days = allocate(&activities, 3, &mut rng);

        let total: usize = days.iter().map(Vec::len).sum();
        assert_eq!(total, 12);
        assert!(days.iter().all(|d| d.len() <= MAX_ACTIVITIES_PER_DAY));

        // Slices are consecutive; shuffling only reorders within a day.
        let expected: HashSet<String> = (0..4).map(|i| format!("activity-{}", i)).collect();
        assert_eq!(ids(&days[0]), expected);
    }

    #[test]
    fn test_trailing_days_are_not_backfilled() {
        // cap = ceil(5 / 4) = 2 -> [2, 2, 1, 0]
        let activities = pool(5);
        let mut rng = StdRng::seed_from_u64(3);
        let days = allocate(&activities, 4, &mut rng);

        let sizes: Vec<usize> = days.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![2, 2, 1, 0]);
    }

    #[test]
    fn test_no_activity_assigned_twice() {
        let activities = pool(9);
        let mut rng = StdRng::seed_from_u64(42);
        let days = allocate(&activities, 5, &mut rng);

        let mut seen = HashSet::new();
        for day in &days {
            for activity in day {
                assert!(seen.insert(activity.id.clone()), "duplicate {}", activity.id);
            }
        }
    }

    #[test]
    fn test_empty_pool_yields_empty_days() {
        let mut rng = StdRng::seed_from_u64(1);
        let days = allocate(&[], 2, &mut rng);
        assert_eq!(days.len(), 2);
        assert!(days.iter().all(Vec::is_empty));
    }
}
