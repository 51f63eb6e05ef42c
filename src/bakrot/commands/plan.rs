//! Retention planning. Pure functions over already-discovered candidates: no
//! filesystem access and no clock, `now` is passed in.

use crate::model::{BackupCandidate, RetentionPlan, RetentionPolicy};
use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::path::PathBuf;

/// Ascending by timestamp, unparsed candidates last. Stable, so candidates with
/// equal timestamps keep their discovery order.
pub fn sort_candidates(candidates: &mut [BackupCandidate]) {
    candidates.sort_by(|a, b| match (a.timestamp, b.timestamp) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Decides which backups a cleanup would remove.
///
/// The newest timestamped backup is always retained, however old. Unparsed
/// backups are never deletable and never count as newest.
pub fn plan(
    mut candidates: Vec<BackupCandidate>,
    policy: RetentionPolicy,
    now: NaiveDateTime,
) -> RetentionPlan {
    let total_found = candidates.len();
    sort_candidates(&mut candidates);

    let unparsed_count = candidates.iter().filter(|c| c.timestamp.is_none()).count();
    let Some(newest) = candidates.iter().rposition(|c| c.timestamp.is_some()) else {
        return RetentionPlan {
            total_found,
            to_delete: Vec::new(),
            retained: None,
            unparsed_count,
        };
    };

    let cutoff = policy.cutoff(now);
    let retained = candidates[newest].clone();
    let to_delete = candidates
        .into_iter()
        .take(newest)
        .filter(|c| c.timestamp.is_some_and(|ts| ts.as_naive() < cutoff))
        .collect();

    RetentionPlan {
        total_found,
        to_delete,
        retained: Some(retained),
        unparsed_count,
    }
}

/// Every discovered path, newest and unparsed included. No retention applies.
pub fn plan_all(candidates: &[BackupCandidate]) -> Vec<PathBuf> {
    candidates.iter().map(|c| c.path.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BackupTimestamp;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn dated(name: &str, when: NaiveDateTime) -> BackupCandidate {
        BackupCandidate::new(name, Some(BackupTimestamp::new(when)))
    }

    fn undated(name: &str) -> BackupCandidate {
        BackupCandidate::new(name, None)
    }

    fn days(n: u32) -> RetentionPolicy {
        RetentionPolicy::new(n).unwrap()
    }

    fn names(candidates: &[BackupCandidate]) -> Vec<String> {
        candidates
            .iter()
            .map(|c| c.path.to_string_lossy().into_owned())
            .collect()
    }

    fn three() -> Vec<BackupCandidate> {
        // deliberately out of order
        vec![
            dated("jun01", at(2024, 6, 1)),
            dated("jan01", at(2024, 1, 1)),
            dated("jan10", at(2024, 1, 10)),
        ]
    }

    #[test]
    fn deletes_old_backups_and_keeps_newest() {
        let plan = plan(three(), days(30), at(2024, 6, 5));

        assert_eq!(plan.total_found, 3);
        assert_eq!(names(&plan.to_delete), vec!["jan01", "jan10"]);
        assert_eq!(plan.retained.unwrap().path, PathBuf::from("jun01"));
        assert_eq!(plan.unparsed_count, 0);
    }

    #[test]
    fn empty_input_gives_empty_plan() {
        let plan = plan(Vec::new(), days(7), at(2024, 6, 5));
        assert_eq!(plan, RetentionPlan::default());
    }

    #[test]
    fn single_candidate_is_always_retained() {
        for retention in [1, 7, 365] {
            let plan = plan(
                vec![dated("only", at(2001, 1, 1))],
                days(retention),
                at(2024, 6, 5),
            );
            assert!(plan.to_delete.is_empty());
            assert_eq!(plan.retained.unwrap().path, PathBuf::from("only"));
        }
    }

    #[test]
    fn all_unparsed_means_nothing_to_delete() {
        let plan = plan(vec![undated("a"), undated("b")], days(1), at(2024, 6, 5));
        assert_eq!(plan.total_found, 2);
        assert!(plan.to_delete.is_empty());
        assert!(plan.retained.is_none());
        assert_eq!(plan.unparsed_count, 2);
    }

    #[test]
    fn unparsed_are_counted_but_never_deleted_or_retained() {
        let mut candidates = three();
        candidates.insert(1, undated("junk"));
        let plan = plan(candidates, days(30), at(2024, 6, 5));

        assert_eq!(plan.total_found, 4);
        assert_eq!(plan.unparsed_count, 1);
        assert_eq!(names(&plan.to_delete), vec!["jan01", "jan10"]);
        assert_eq!(plan.retained.unwrap().path, PathBuf::from("jun01"));
    }

    #[test]
    fn cutoff_is_strict() {
        // exactly 30 days before `now` is not older than the cutoff
        let plan = plan(
            vec![dated("edge", at(2024, 5, 6)), dated("new", at(2024, 6, 4))],
            days(30),
            at(2024, 6, 5),
        );
        assert!(plan.to_delete.is_empty());

        let now = at(2024, 6, 5) + chrono::Duration::seconds(1);
        let plan = super::plan(
            vec![dated("edge", at(2024, 5, 6)), dated("new", at(2024, 6, 4))],
            days(30),
            now,
        );
        assert_eq!(names(&plan.to_delete), vec!["edge"]);
    }

    #[test]
    fn recent_backups_are_kept() {
        let plan = plan(three(), days(365), at(2024, 6, 5));
        assert!(plan.to_delete.is_empty());
        assert_eq!(plan.retained.unwrap().path, PathBuf::from("jun01"));
    }

    #[test]
    fn ties_keep_discovery_order() {
        let same = at(2024, 1, 1);
        let plan = plan(
            vec![dated("first", same), dated("second", same)],
            days(1),
            at(2024, 6, 5),
        );
        assert_eq!(names(&plan.to_delete), vec!["first"]);
        assert_eq!(plan.retained.unwrap().path, PathBuf::from("second"));
    }

    #[test]
    fn retained_is_never_in_to_delete() {
        let mut candidates = Vec::new();
        for day in 1..=28 {
            candidates.push(dated(&format!("feb{day:02}"), at(2023, 2, day)));
        }
        candidates.push(undated("x"));

        for retention in [1, 2, 10, 100, 1000] {
            let plan = plan(candidates.clone(), days(retention), at(2024, 6, 5));
            let retained = plan.retained.expect("has timestamped candidates");
            assert!(!plan.to_delete.contains(&retained));
            assert!(plan.to_delete.iter().all(|c| c.timestamp.is_some()));
        }
    }

    #[test]
    fn to_delete_is_ascending() {
        let candidates = vec![
            dated("c", at(2023, 3, 1)),
            dated("a", at(2023, 1, 1)),
            dated("d", at(2024, 6, 1)),
            dated("b", at(2023, 2, 1)),
        ];
        let plan = plan(candidates, days(7), at(2024, 6, 5));
        let stamps: Vec<_> = plan.to_delete.iter().map(|c| c.timestamp).collect();
        let mut sorted = stamps.clone();
        sorted.sort();
        assert_eq!(stamps, sorted);
        assert_eq!(names(&plan.to_delete), vec!["a", "b", "c"]);
    }

    #[test]
    fn planning_is_idempotent() {
        let now = at(2024, 6, 5);
        assert_eq!(plan(three(), days(30), now), plan(three(), days(30), now));
    }

    #[test]
    fn longer_retention_never_deletes_more() {
        let now = at(2024, 6, 5);
        let mut previous = usize::MAX;
        for retention in [1, 5, 30, 140, 150, 160, 365] {
            let count = plan(three(), days(retention), now).to_delete.len();
            assert!(count <= previous, "{retention} days deleted more");
            previous = count;
        }
    }

    #[test]
    fn plan_all_returns_everything() {
        let mut candidates = three();
        candidates.push(undated("junk"));
        let paths = plan_all(&candidates);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("jun01"),
                PathBuf::from("jan01"),
                PathBuf::from("jan10"),
                PathBuf::from("junk"),
            ]
        );
    }

    #[test]
    fn sort_puts_unparsed_last() {
        let mut candidates = vec![
            undated("u"),
            dated("b", at(2024, 2, 1)),
            dated("a", at(2024, 1, 1)),
        ];
        sort_candidates(&mut candidates);
        assert_eq!(names(&candidates), vec!["a", "b", "u"]);
    }
}
