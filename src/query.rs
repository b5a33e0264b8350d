use crate::grade::{classify, Grade};
use crate::model::{Class, Score, Student};
use crate::store::EntityStore;
use serde::Serialize;
use std::cmp::Ordering;

/// Label used wherever a foreign key has no target in the current snapshot.
pub const PLACEHOLDER_LABEL: &str = "—";

pub fn scores_for_student<'a>(store: &'a EntityStore, student_id: &str) -> Vec<&'a Score> {
    store
        .scores()
        .iter()
        .filter(|s| s.student_id == student_id)
        .collect()
}

pub fn scores_for_class<'a>(store: &'a EntityStore, class_id: &str) -> Vec<&'a Score> {
    store
        .scores()
        .iter()
        .filter(|s| s.class_id == class_id)
        .collect()
}

pub fn class_by_id<'a>(store: &'a EntityStore, class_id: &str) -> Option<&'a Class> {
    store.class(class_id)
}

pub fn student_by_id<'a>(store: &'a EntityStore, student_id: &str) -> Option<&'a Student> {
    store.student(student_id)
}

pub fn classes_in_order(store: &EntityStore) -> Vec<&Class> {
    store.classes().iter().collect()
}

fn numeric_id(id: &str) -> Option<i128> {
    id.trim().parse::<i128>().ok()
}

/// Numeric ids ascend by value. Ids that do not parse as integers come after
/// every numeric id, ordered lexically. Equal keys keep record order.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (numeric_id(a), numeric_id(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

pub fn students_sorted_by_id(store: &EntityStore) -> Vec<&Student> {
    let mut out: Vec<&Student> = store.students().iter().collect();
    out.sort_by(|a, b| compare_ids(&a.id, &b.id));
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCourseRow {
    pub score_id: String,
    pub class_id: String,
    pub class_name: String,
    pub class_found: bool,
    pub value: i64,
    pub grade: Grade,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterRow {
    pub score_id: String,
    pub student_id: String,
    pub student_name: String,
    pub student_found: bool,
    pub value: i64,
    pub grade: Grade,
}

pub fn student_course_rows(store: &EntityStore, student_id: &str) -> Vec<StudentCourseRow> {
    scores_for_student(store, student_id)
        .into_iter()
        .map(|s| {
            let class = class_by_id(store, &s.class_id);
            StudentCourseRow {
                score_id: s.id.clone(),
                class_id: s.class_id.clone(),
                class_name: class
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| PLACEHOLDER_LABEL.to_string()),
                class_found: class.is_some(),
                value: s.value,
                grade: classify(s.value),
            }
        })
        .collect()
}

pub fn course_roster_rows(store: &EntityStore, class_id: &str) -> Vec<RosterRow> {
    scores_for_class(store, class_id)
        .into_iter()
        .map(|s| {
            let student = student_by_id(store, &s.student_id);
            RosterRow {
                score_id: s.id.clone(),
                student_id: s.student_id.clone(),
                student_name: student
                    .map(|st| st.display_name())
                    .unwrap_or_else(|| PLACEHOLDER_LABEL.to_string()),
                student_found: student.is_some(),
                value: s.value,
                grade: classify(s.value),
            }
        })
        .collect()
}

pub fn student_label(store: &EntityStore, student_id: &str) -> String {
    student_by_id(store, student_id)
        .map(|s| s.display_name())
        .unwrap_or_else(|| PLACEHOLDER_LABEL.to_string())
}

pub fn class_label(store: &EntityStore, class_id: &str) -> String {
    class_by_id(store, class_id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| PLACEHOLDER_LABEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn student(id: &str, first: &str, last: &str) -> Student {
        Student {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: String::new(),
        }
    }

    fn class(id: &str, name: &str) -> Class {
        Class {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn score(id: &str, student_id: &str, class_id: &str, value: i64) -> Score {
        Score {
            id: id.to_string(),
            student_id: student_id.to_string(),
            class_id: class_id.to_string(),
            value,
        }
    }

    fn sample_store() -> EntityStore {
        EntityStore::new(
            vec![
                student("1", "John", "Doe"),
                student("2", "Jane", "Smith"),
                student("3", "Alice", "Johnson"),
            ],
            vec![class("1", "Math"), class("2", "Science"), class("3", "History")],
            vec![
                score("1", "1", "1", 88),
                score("2", "1", "2", 92),
                score("3", "1", "3", 85),
                score("4", "2", "1", 90),
                score("5", "2", "2", 93),
                score("6", "2", "3", 88),
                score("7", "3", "1", 95),
                score("8", "3", "3", 90),
            ],
        )
    }

    #[test]
    fn scores_keep_record_order() {
        let store = sample_store();
        let ids: Vec<&str> = scores_for_class(&store, "1")
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "4", "7"]);
    }

    #[test]
    fn per_student_scores_partition_the_score_set() {
        let store = sample_store();
        let mut seen = HashSet::new();
        let mut total = 0;
        for s in store.students() {
            for sc in scores_for_student(&store, &s.id) {
                assert!(seen.insert(sc.id.clone()), "score {} counted twice", sc.id);
                total += 1;
            }
        }
        assert_eq!(total, store.scores().len());
    }

    #[test]
    fn missing_ids_are_absent() {
        let store = sample_store();
        assert!(class_by_id(&store, "nonexistent").is_none());
        assert!(student_by_id(&store, "nonexistent").is_none());
        assert!(scores_for_class(&store, "nonexistent").is_empty());
        assert_eq!(class_label(&store, "nonexistent"), PLACEHOLDER_LABEL);
    }

    #[test]
    fn numeric_ids_sort_by_value_then_text_ids_lexically() {
        let store = EntityStore::new(
            vec![
                student("10", "Ten", ""),
                student("b", "Bee", ""),
                student("2", "Two", ""),
                student("a", "Ay", ""),
                student("1", "One", ""),
            ],
            vec![],
            vec![],
        );
        let ids: Vec<&str> = students_sorted_by_id(&store)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2", "10", "a", "b"]);
    }

    #[test]
    fn equal_numeric_ids_keep_record_order() {
        let store = EntityStore::new(
            vec![student("01", "First", ""), student("1", "Second", "")],
            vec![],
            vec![],
        );
        let names: Vec<&str> = students_sorted_by_id(&store)
            .iter()
            .map(|s| s.first_name.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn dangling_class_reference_renders_placeholder() {
        let store = EntityStore::new(
            vec![student("1", "Jane", "Doe")],
            vec![],
            vec![score("1", "1", "99", 72)],
        );
        let rows = student_course_rows(&store, "1");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].class_name, PLACEHOLDER_LABEL);
        assert!(!rows[0].class_found);
        assert_eq!(rows[0].grade, Grade::C);
    }

    #[test]
    fn roster_rows_join_student_names() {
        let store = sample_store();
        let rows = course_roster_rows(&store, "3");
        let names: Vec<&str> = rows.iter().map(|r| r.student_name.as_str()).collect();
        assert_eq!(names, vec!["John Doe", "Jane Smith", "Alice Johnson"]);
        assert_eq!(rows[2].grade, Grade::A);
    }
}
