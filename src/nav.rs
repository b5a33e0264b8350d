use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum View {
    Home,
    Classes,
    Students,
    StudentCourses,
    CourseStudents,
}

/// Selection carried alongside the view. It is not part of the view identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavContext {
    pub selected_student_id: Option<String>,
    pub selected_class_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "intent", rename_all = "camelCase")]
pub enum Intent {
    OpenClasses,
    OpenStudents,
    OpenClassRoster {
        #[serde(rename = "classId", deserialize_with = "crate::model::de_id")]
        class_id: String,
    },
    OpenStudentCourses {
        #[serde(rename = "studentId", deserialize_with = "crate::model::de_id")]
        student_id: String,
    },
    OpenCourseRoster {
        #[serde(rename = "classId", deserialize_with = "crate::model::de_id")]
        class_id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Handled,
    /// Nothing changed; the caller may fall through to platform behaviour.
    NotHandled,
}

impl Outcome {
    pub fn handled(self) -> bool {
        self == Outcome::Handled
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Layout {
    /// Landing menu leading to the class list or the student list.
    #[default]
    Menu,
    /// Starts directly on the student list; no menu, no class list.
    Flat,
}

impl Layout {
    pub fn initial_view(self) -> View {
        match self {
            Layout::Menu => View::Home,
            Layout::Flat => View::Students,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavConfig {
    pub layout: Layout,
    /// Whether a roster row opens that student's course list.
    /// Unset means: on for `Menu`, off for `Flat`.
    pub roster_drill: Option<bool>,
}

impl NavConfig {
    pub fn roster_drill_enabled(&self) -> bool {
        self.roster_drill.unwrap_or(matches!(self.layout, Layout::Menu))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    view: View,
    context: NavContext,
}

/// Stack of visited views. The bottom frame is the initial view and is never popped.
#[derive(Debug, Clone)]
pub struct Navigator {
    config: NavConfig,
    stack: Vec<Frame>,
}

impl Navigator {
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            stack: vec![Frame {
                view: config.layout.initial_view(),
                context: NavContext::default(),
            }],
        }
    }

    pub fn config(&self) -> NavConfig {
        self.config
    }

    fn top(&self) -> &Frame {
        // The stack always holds the initial frame.
        &self.stack[self.stack.len() - 1]
    }

    pub fn view(&self) -> View {
        self.top().view
    }

    pub fn context(&self) -> &NavContext {
        &self.top().context
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    fn next_frame(&self, intent: &Intent) -> Option<Frame> {
        let current = self.top();
        let mut context = current.context.clone();
        let view = match (current.view, intent) {
            (View::Home, Intent::OpenClasses) => View::Classes,
            (View::Home, Intent::OpenStudents) => View::Students,
            (View::Classes, Intent::OpenClassRoster { class_id }) => {
                context.selected_class_id = Some(class_id.clone());
                View::CourseStudents
            }
            (View::Students, Intent::OpenStudentCourses { student_id }) => {
                context.selected_student_id = Some(student_id.clone());
                View::StudentCourses
            }
            (View::StudentCourses, Intent::OpenCourseRoster { class_id }) => {
                context.selected_class_id = Some(class_id.clone());
                View::CourseStudents
            }
            (View::CourseStudents, Intent::OpenStudentCourses { student_id })
                if self.config.roster_drill_enabled() =>
            {
                context.selected_student_id = Some(student_id.clone());
                View::StudentCourses
            }
            _ => return None,
        };
        Some(Frame { view, context })
    }

    pub fn open(&mut self, intent: &Intent) -> Outcome {
        match self.next_frame(intent) {
            Some(frame) => {
                self.stack.push(frame);
                Outcome::Handled
            }
            None => Outcome::NotHandled,
        }
    }

    /// Pops one frame and restores the selection that was current there.
    /// Landing on a class roster with a class selected also drops the student
    /// selection, matching the deployed screen.
    pub fn back(&mut self) -> Outcome {
        if !self.can_go_back() {
            return Outcome::NotHandled;
        }
        self.stack.pop();
        let last = self.stack.len() - 1;
        let top = &mut self.stack[last];
        if top.view == View::CourseStudents && top.context.selected_class_id.is_some() {
            top.context.selected_student_id = None;
        }
        Outcome::Handled
    }

    pub fn reset(&mut self) -> Outcome {
        if !self.can_go_back() {
            return Outcome::NotHandled;
        }
        self.stack.truncate(1);
        Outcome::Handled
    }
}
