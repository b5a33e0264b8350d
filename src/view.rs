use crate::grade::{grade_bars, grade_counts, score_summary, GradeBar, GradeCounts, ScoreSummary};
use crate::nav::{NavContext, View};
use crate::query::{self, RosterRow, StudentCourseRow};
use crate::store::EntityStore;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentListItem {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth_iso: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassListItem {
    pub id: String,
    pub name: String,
    pub score_count: usize,
}

/// Header for a drill-down view. `id` is empty when nothing is selected.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Heading {
    pub id: String,
    pub name: String,
    pub found: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub grade_counts: GradeCounts,
    pub bars: Vec<GradeBar>,
    pub summary: ScoreSummary,
}

impl Chart {
    fn from_values(values: Vec<i64>) -> Self {
        let counts = grade_counts(values.iter().copied());
        Self {
            bars: grade_bars(&counts),
            grade_counts: counts,
            summary: score_summary(values),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViewBody {
    Home {
        menu: Vec<View>,
    },
    Classes {
        classes: Vec<ClassListItem>,
    },
    Students {
        students: Vec<StudentListItem>,
    },
    StudentCourses {
        student: Heading,
        rows: Vec<StudentCourseRow>,
        chart: Chart,
    },
    CourseStudents {
        class: Heading,
        rows: Vec<RosterRow>,
        chart: Chart,
    },
}

/// Everything the render shell needs for one screen, as of `revision`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDescriptor {
    pub revision: u64,
    pub can_go_back: bool,
    pub context: NavContext,
    #[serde(flatten)]
    pub body: ViewBody,
}

pub fn resolve(store: &EntityStore, view: View, context: &NavContext) -> ViewBody {
    match view {
        View::Home => ViewBody::Home {
            menu: vec![View::Classes, View::Students],
        },
        View::Classes => ViewBody::Classes {
            classes: query::classes_in_order(store)
                .into_iter()
                .map(|c| ClassListItem {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    score_count: query::scores_for_class(store, &c.id).len(),
                })
                .collect(),
        },
        View::Students => ViewBody::Students {
            students: query::students_sorted_by_id(store)
                .into_iter()
                .map(|s| StudentListItem {
                    id: s.id.clone(),
                    first_name: s.first_name.clone(),
                    last_name: s.last_name.clone(),
                    date_of_birth: s.date_of_birth.clone(),
                    date_of_birth_iso: s.date_of_birth_iso(),
                })
                .collect(),
        },
        View::StudentCourses => {
            let id = context.selected_student_id.clone().unwrap_or_default();
            let rows = query::student_course_rows(store, &id);
            let chart = Chart::from_values(rows.iter().map(|r| r.value).collect());
            ViewBody::StudentCourses {
                student: Heading {
                    name: query::student_label(store, &id),
                    found: query::student_by_id(store, &id).is_some(),
                    id,
                },
                rows,
                chart,
            }
        }
        View::CourseStudents => {
            let id = context.selected_class_id.clone().unwrap_or_default();
            let rows = query::course_roster_rows(store, &id);
            let chart = Chart::from_values(rows.iter().map(|r| r.value).collect());
            ViewBody::CourseStudents {
                class: Heading {
                    name: query::class_label(store, &id),
                    found: query::class_by_id(store, &id).is_some(),
                    id,
                },
                rows,
                chart,
            }
        }
    }
}
