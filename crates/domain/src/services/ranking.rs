//! Dense ranking over a league's members or an event's participants.
//!
//! Ranking is a full recompute: after any mutation that can change order, the
//! caller loads every standing, runs [`compute_rankings`], and persists every
//! computed rank in one batched write. A leaderboard read only ever sees the
//! ranks of the last completed recompute.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One member's or participant's current standing, as loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub user_id: Uuid,
    pub points: i32,
    pub joined_at: DateTime<Utc>,
}

/// A computed rank for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankAssignment {
    pub user_id: Uuid,
    pub rank: i32,
}

/// Computes dense 1..N ranks over the given standings.
///
/// Order: points descending, ties broken by earlier `joined_at`. Every
/// standing receives a rank, so the result is a permutation of 1..=N.
pub fn compute_rankings(mut standings: Vec<Standing>) -> Vec<RankAssignment> {
    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| a.joined_at.cmp(&b.joined_at))
    });

    standings
        .into_iter()
        .enumerate()
        .map(|(index, standing)| RankAssignment {
            user_id: standing.user_id,
            rank: index as i32 + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashSet;

    fn standing(points: i32, joined_offset_secs: i64) -> Standing {
        Standing {
            user_id: Uuid::new_v4(),
            points,
            joined_at: Utc::now() + Duration::seconds(joined_offset_secs),
        }
    }

    #[test]
    fn test_empty_standings() {
        assert!(compute_rankings(Vec::new()).is_empty());
    }

    #[test]
    fn test_single_member_gets_rank_one() {
        let s = standing(0, 0);
        let ranks = compute_rankings(vec![s.clone()]);
        assert_eq!(ranks.len(), 1);
        assert_eq!(ranks[0].user_id, s.user_id);
        assert_eq!(ranks[0].rank, 1);
    }

    #[test]
    fn test_ranks_are_dense_permutation() {
        let standings: Vec<Standing> = (0..10).map(|i| standing(i % 4, i as i64)).collect();
        let ranks = compute_rankings(standings);

        let assigned: HashSet<i32> = ranks.iter().map(|r| r.rank).collect();
        assert_eq!(assigned, (1..=10).collect::<HashSet<i32>>());
    }

    #[test]
    fn test_ordered_by_points_descending() {
        let low = standing(5, 0);
        let high = standing(50, 100);
        let mid = standing(20, 50);

        let ranks = compute_rankings(vec![low.clone(), high.clone(), mid.clone()]);

        let rank_of = |id: Uuid| ranks.iter().find(|r| r.user_id == id).unwrap().rank;
        assert_eq!(rank_of(high.user_id), 1);
        assert_eq!(rank_of(mid.user_id), 2);
        assert_eq!(rank_of(low.user_id), 3);
    }

    #[test]
    fn test_tie_broken_by_earlier_join() {
        let late = standing(10, 60);
        let early = standing(10, 0);

        let ranks = compute_rankings(vec![late.clone(), early.clone()]);

        let rank_of = |id: Uuid| ranks.iter().find(|r| r.user_id == id).unwrap().rank;
        assert_eq!(rank_of(early.user_id), 1, "earlier join wins the tie");
        assert_eq!(rank_of(late.user_id), 2);
    }

    #[test]
    fn test_negative_points_rank_last() {
        let zero = standing(0, 0);
        let negative = standing(-3, 10);

        let ranks = compute_rankings(vec![negative.clone(), zero.clone()]);

        let rank_of = |id: Uuid| ranks.iter().find(|r| r.user_id == id).unwrap().rank;
        assert_eq!(rank_of(zero.user_id), 1);
        assert_eq!(rank_of(negative.user_id), 2);
    }

    // Owner A creates the league, B then C join at 0 points, B gets +10:
    // the board reads B, A, C.
    #[test]
    fn test_points_beat_join_order() {
        let a = standing(0, 0);
        let b = standing(10, 10);
        let c = standing(0, 20);

        let ranks = compute_rankings(vec![a.clone(), b.clone(), c.clone()]);

        let rank_of = |id: Uuid| ranks.iter().find(|r| r.user_id == id).unwrap().rank;
        assert_eq!(rank_of(b.user_id), 1);
        assert_eq!(rank_of(a.user_id), 2);
        assert_eq!(rank_of(c.user_id), 3);
    }

    #[test]
    fn test_recompute_is_stable_without_changes() {
        let standings: Vec<Standing> = (0..6).map(|i| standing(i * 3, i as i64)).collect();
        let first = compute_rankings(standings.clone());
        let second = compute_rankings(standings);
        assert_eq!(first, second);
    }
}
