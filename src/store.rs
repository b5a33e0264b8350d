use crate::model::{Class, Score, Student};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// One delivery from a loader. A `None` set leaves the current one in place.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDelivery {
    pub students: Option<Vec<Student>>,
    pub classes: Option<Vec<Class>>,
    pub scores: Option<Vec<Score>>,
}

impl SnapshotDelivery {
    pub fn is_empty(&self) -> bool {
        self.students.is_none() && self.classes.is_none() && self.scores.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCounts {
    pub students: usize,
    pub classes: usize,
    pub scores: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateId {
    pub set: &'static str,
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub counts: SetCounts,
    pub duplicates: Vec<DuplicateId>,
    pub digest: String,
}

/// Read-only holder of the three record sets. Lookups by id resolve to the
/// first record carrying that id, the same answer a linear scan gives.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    students: Vec<Student>,
    classes: Vec<Class>,
    scores: Vec<Score>,
    student_index: HashMap<String, usize>,
    class_index: HashMap<String, usize>,
}

impl EntityStore {
    pub fn new(students: Vec<Student>, classes: Vec<Class>, scores: Vec<Score>) -> Self {
        let student_index = first_positions(students.iter().map(|s| s.id.as_str()));
        let class_index = first_positions(classes.iter().map(|c| c.id.as_str()));
        Self {
            students,
            classes,
            scores,
            student_index,
            class_index,
        }
    }

    /// Builds the store that results from applying `delivery` on top of `self`.
    /// The caller swaps it in whole, so readers never see a half-applied load.
    pub fn with_delivery(&self, delivery: SnapshotDelivery) -> Self {
        let students = delivery.students.unwrap_or_else(|| self.students.clone());
        let classes = delivery.classes.unwrap_or_else(|| self.classes.clone());
        let scores = delivery.scores.unwrap_or_else(|| self.scores.clone());
        Self::new(students, classes, scores)
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.student_index.get(id).map(|&i| &self.students[i])
    }

    pub fn class(&self, id: &str) -> Option<&Class> {
        self.class_index.get(id).map(|&i| &self.classes[i])
    }

    pub fn counts(&self) -> SetCounts {
        SetCounts {
            students: self.students.len(),
            classes: self.classes.len(),
            scores: self.scores.len(),
        }
    }

    pub fn duplicates(&self) -> Vec<DuplicateId> {
        let mut out = Vec::new();
        collect_duplicates("students", self.students.iter().map(|s| s.id.as_str()), &mut out);
        collect_duplicates("classes", self.classes.iter().map(|c| c.id.as_str()), &mut out);
        collect_duplicates("scores", self.scores.iter().map(|s| s.id.as_str()), &mut out);
        out
    }

    /// SHA-256 over the canonical JSON of all three sets, hex encoded.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for part in [
            serde_json::to_vec(&self.students),
            serde_json::to_vec(&self.classes),
            serde_json::to_vec(&self.scores),
        ] {
            hasher.update(part.unwrap_or_default());
            hasher.update([0u8]);
        }
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }

    pub fn report(&self) -> LoadReport {
        LoadReport {
            counts: self.counts(),
            duplicates: self.duplicates(),
            digest: self.digest(),
        }
    }
}

fn first_positions<'a>(ids: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (i, id) in ids.enumerate() {
        map.entry(id.to_string()).or_insert(i);
    }
    map
}

fn collect_duplicates<'a>(
    set: &'static str,
    ids: impl Iterator<Item = &'a str>,
    out: &mut Vec<DuplicateId>,
) {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for id in ids {
        let n = seen.entry(id).or_insert(0);
        *n += 1;
        // Report each repeated id once.
        if *n == 2 {
            out.push(DuplicateId {
                set,
                id: id.to_string(),
            });
        }
    }
}
