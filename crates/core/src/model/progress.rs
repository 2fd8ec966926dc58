use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{QuestionId, SubjectId, UserId};

/// Per-(user, subject) record of which questions have been read.
///
/// The only entity this system mutates. Membership changes solely through
/// [`mark`](Self::mark) and [`unmark`](Self::unmark); there are no automatic
/// transitions and no terminal state. Unmarking the last question leaves an
/// empty record behind rather than deleting it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub user_id: UserId,
    pub subject_id: SubjectId,
    completed: BTreeSet<QuestionId>,
}

impl ProgressRecord {
    /// Creates an empty record for the pair; records are created lazily on
    /// the first mark.
    #[must_use]
    pub fn new(user_id: UserId, subject_id: SubjectId) -> Self {
        Self {
            user_id,
            subject_id,
            completed: BTreeSet::new(),
        }
    }

    /// Rebuilds a record from a persisted completed set.
    #[must_use]
    pub fn from_completed(
        user_id: UserId,
        subject_id: SubjectId,
        completed: impl IntoIterator<Item = QuestionId>,
    ) -> Self {
        Self {
            user_id,
            subject_id,
            completed: completed.into_iter().collect(),
        }
    }

    /// Marks a question as read. Returns `false` if it was already marked.
    pub fn mark(&mut self, question_id: QuestionId) -> bool {
        self.completed.insert(question_id)
    }

    /// Removes a question from the completed set. Absent ids are a no-op,
    /// not an error; returns `false` in that case.
    pub fn unmark(&mut self, question_id: QuestionId) -> bool {
        self.completed.remove(&question_id)
    }

    #[must_use]
    pub fn is_completed(&self, question_id: QuestionId) -> bool {
        self.completed.contains(&question_id)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Completed question ids in ascending order.
    #[must_use]
    pub fn completed_ids(&self) -> Vec<QuestionId> {
        self.completed.iter().copied().collect()
    }

    /// Completion percentage against the subject's question total.
    ///
    /// The record does not know subject cardinality; callers supply `total`.
    /// `total == 0` is defined as `0` percent, never a division error.
    #[must_use]
    pub fn percent_complete(&self, total: u32) -> u32 {
        if total == 0 {
            return 0;
        }
        // widened so `completed * 100` cannot overflow for large catalogs
        let total = u64::from(total);
        let completed = (self.completed.len() as u64).min(total);
        u32::try_from(completed * 100 / total).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn record() -> ProgressRecord {
        ProgressRecord::new(UserId::new(Uuid::new_v4()), SubjectId::new(1))
    }

    #[test]
    fn mark_is_idempotent() {
        let mut rec = record();
        assert!(rec.mark(QuestionId::new(101)));
        assert!(!rec.mark(QuestionId::new(101)));
        assert_eq!(rec.completed_count(), 1);
    }

    #[test]
    fn unmark_of_absent_id_is_noop() {
        let mut rec = record();
        assert!(!rec.unmark(QuestionId::new(999)));
        assert_eq!(rec.completed_count(), 0);
    }

    #[test]
    fn unmark_removes_only_the_given_id() {
        let mut rec = record();
        rec.mark(QuestionId::new(1));
        rec.mark(QuestionId::new(2));
        rec.unmark(QuestionId::new(1));
        assert!(!rec.is_completed(QuestionId::new(1)));
        assert!(rec.is_completed(QuestionId::new(2)));
    }

    #[test]
    fn percent_with_zero_total_is_zero() {
        let rec = record();
        assert_eq!(rec.percent_complete(0), 0);
    }

    #[test]
    fn percent_three_of_ten_is_thirty() {
        let mut rec = record();
        for id in [1, 2, 3] {
            rec.mark(QuestionId::new(id));
        }
        assert_eq!(rec.percent_complete(10), 30);
    }

    #[test]
    fn percent_scenario_four_questions() {
        let mut rec = record();
        rec.mark(QuestionId::new(1));
        rec.mark(QuestionId::new(3));
        assert_eq!(rec.percent_complete(4), 50);

        rec.unmark(QuestionId::new(1));
        assert_eq!(rec.completed_ids(), vec![QuestionId::new(3)]);
        assert_eq!(rec.percent_complete(4), 25);
    }

    #[test]
    fn percent_stays_exact_near_the_total_ceiling() {
        let mut rec = record();
        for id in 1..=3 {
            rec.mark(QuestionId::new(id));
        }
        assert_eq!(rec.percent_complete(u32::MAX), 0);

        // completed capped at total keeps the result within 0..=100
        assert_eq!(rec.percent_complete(1), 100);
        assert_eq!(rec.percent_complete(3), 100);
    }

    #[test]
    fn completed_ids_are_sorted() {
        let mut rec = record();
        rec.mark(QuestionId::new(30));
        rec.mark(QuestionId::new(10));
        rec.mark(QuestionId::new(20));
        assert_eq!(
            rec.completed_ids(),
            vec![QuestionId::new(10), QuestionId::new(20), QuestionId::new(30)]
        );
    }
}
