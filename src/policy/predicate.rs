//! Row-level visibility predicates.
//!
//! A [`Predicate`] is a pure, store-agnostic description of which rows of an
//! entity collection are visible. It carries no connection handles and does
//! no I/O; the repository layer lowers it to SQL. Keeping the predicate as
//! plain data is what lets list pages and dashboard widgets share the exact
//! same visibility rule.

use serde::Serialize;

/// How an owning class relates to the principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ClassOwnership {
    /// The class has a lesson taught by this teacher id.
    TaughtBy(String),
    /// The class roster contains this student id.
    Enrolls(String),
    /// The class roster contains a student whose parent is this id.
    HasChildOf(String),
}

/// Case-insensitive substring filter on a text field of the entity (or of a
/// related record, resolved per entity kind by the repository layer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TextFilter {
    /// Entity's own name column.
    Name(String),
    /// Entity's own title column.
    Title(String),
    /// Name of the related subject (lessons).
    SubjectName(String),
    /// Name of the related teacher (lessons).
    TeacherName(String),
    /// Name of the related student (results).
    StudentName(String),
    /// Title of the related exam or assignment (results).
    AssessmentTitle(String),
}

/// Exact-match filter on a foreign key of the entity (or a key reachable
/// through its relationship graph).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum KeyFilter {
    ClassId(i32),
    LessonId(i32),
    TeacherId(String),
    StudentId(String),
    SupervisorId(String),
}

/// A composable filter expression restricting which rows are visible.
///
/// Predicates form a small boolean algebra: [`Predicate::All`] is the AND
/// identity and [`Predicate::Nothing`] is absorbing. Caller-supplied search
/// filters are combined with [`Predicate::and`], so they can only narrow a
/// visibility predicate, never widen it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Predicate {
    /// Matches every row. Produced only for admin principals.
    All,
    /// Matches no rows. Produced for principals with an unrecognized role.
    Nothing,
    /// Every branch must match.
    And(Vec<Predicate>),
    /// At least one branch must match.
    Or(Vec<Predicate>),
    /// The row has no owning class.
    ClassUnowned,
    /// The row's owning class satisfies the given ownership relation.
    ClassOwned(ClassOwnership),
    /// Substring match, case-insensitive.
    Text(TextFilter),
    /// Exact foreign-key match.
    Key(KeyFilter),
}

impl Predicate {
    /// Conjoins `self` with `other`, simplifying around the identities.
    pub fn and(self, other: Predicate) -> Predicate {
        match (self, other) {
            (Predicate::All, p) | (p, Predicate::All) => p,
            (Predicate::Nothing, _) | (_, Predicate::Nothing) => Predicate::Nothing,
            (Predicate::And(mut branches), p) => {
                branches.push(p);
                Predicate::And(branches)
            }
            (a, b) => Predicate::And(vec![a, b]),
        }
    }

    /// True if this predicate can never match a row.
    pub fn is_empty(&self) -> bool {
        matches!(self, Predicate::Nothing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_with_all_is_identity() {
        let filter = Predicate::Text(TextFilter::Title("exam".to_string()));
        assert_eq!(Predicate::All.and(filter.clone()), filter.clone());
        assert_eq!(filter.clone().and(Predicate::All), filter);
    }

    #[test]
    fn test_and_with_nothing_is_absorbing() {
        let filter = Predicate::Key(KeyFilter::ClassId(3));
        assert_eq!(Predicate::Nothing.and(filter.clone()), Predicate::Nothing);
        assert_eq!(filter.and(Predicate::Nothing), Predicate::Nothing);
    }

    #[test]
    fn test_and_flattens_into_existing_conjunction() {
        let scope = Predicate::Or(vec![
            Predicate::ClassUnowned,
            Predicate::ClassOwned(ClassOwnership::TaughtBy("t1".to_string())),
        ]);
        let narrowed = scope
            .clone()
            .and(Predicate::Text(TextFilter::Title("meeting".to_string())))
            .and(Predicate::Key(KeyFilter::ClassId(1)));

        match narrowed {
            Predicate::And(branches) => {
                assert_eq!(branches.len(), 3);
                assert_eq!(branches[0], scope);
            }
            other => panic!("expected conjunction, got {other:?}"),
        }
    }
}
