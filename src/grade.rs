use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    /// Display order for chart bars.
    pub const ALL: [Grade; 6] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::E, Grade::F];

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Inclusive lower bounds, highest first. Anything below the last rung is F.
const LADDER: [(i64, Grade); 5] = [
    (90, Grade::A),
    (80, Grade::B),
    (70, Grade::C),
    (60, Grade::D),
    (50, Grade::E),
];

/// No clamping: 105 is an A and -5 is an F.
pub fn classify(score: i64) -> Grade {
    LADDER
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, g)| *g)
        .unwrap_or(Grade::F)
}

/// Per-grade tallies. Every grade is always present, so a chart always has six bars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeCounts {
    counts: [usize; 6],
}

impl GradeCounts {
    pub fn get(&self, grade: Grade) -> usize {
        self.counts[grade.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Grade, usize)> + '_ {
        Grade::ALL.iter().map(move |g| (*g, self.counts[g.index()]))
    }

    fn bump(&mut self, grade: Grade) {
        self.counts[grade.index()] += 1;
    }
}

impl Serialize for GradeCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Grade::ALL.len()))?;
        for (g, n) in self.iter() {
            map.serialize_entry(g.as_str(), &n)?;
        }
        map.end()
    }
}

pub fn grade_counts<I>(values: I) -> GradeCounts
where
    I: IntoIterator<Item = i64>,
{
    let mut out = GradeCounts::default();
    for v in values {
        out.bump(classify(v));
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeBar {
    pub grade: Grade,
    pub count: usize,
}

pub fn grade_bars(counts: &GradeCounts) -> Vec<GradeBar> {
    Grade::ALL
        .iter()
        .map(|&grade| GradeBar {
            grade,
            count: counts.get(grade),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub count: usize,
    pub average: Option<f64>,
    pub median: Option<f64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

pub fn score_summary<I>(values: I) -> ScoreSummary
where
    I: IntoIterator<Item = i64>,
{
    let mut sorted: Vec<i64> = values.into_iter().collect();
    sorted.sort_unstable();
    let n = sorted.len();
    if n == 0 {
        return ScoreSummary {
            count: 0,
            average: None,
            median: None,
            min: None,
            max: None,
        };
    }

    let sum: f64 = sorted.iter().map(|v| *v as f64).sum();
    let median = if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[(n / 2) - 1] as f64 + sorted[n / 2] as f64) / 2.0
    };

    ScoreSummary {
        count: n,
        average: Some(sum / (n as f64)),
        median: Some(median),
        min: sorted.first().copied(),
        max: sorted.last().copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_boundaries() {
        assert_eq!(classify(95), Grade::A);
        assert_eq!(classify(90), Grade::A);
        assert_eq!(classify(89), Grade::B);
        assert_eq!(classify(80), Grade::B);
        assert_eq!(classify(79), Grade::C);
        assert_eq!(classify(60), Grade::D);
        assert_eq!(classify(59), Grade::E);
        assert_eq!(classify(55), Grade::E);
        assert_eq!(classify(50), Grade::E);
        assert_eq!(classify(49), Grade::F);
        assert_eq!(classify(0), Grade::F);
    }

    #[test]
    fn out_of_range_scores_still_classify() {
        assert_eq!(classify(-5), Grade::F);
        assert_eq!(classify(105), Grade::A);
        assert_eq!(classify(i64::MIN), Grade::F);
        assert_eq!(classify(i64::MAX), Grade::A);
    }

    #[test]
    fn empty_input_has_all_six_grades_at_zero() {
        let counts = grade_counts(Vec::new());
        assert_eq!(counts.iter().count(), 6);
        assert_eq!(counts.total(), 0);
        let v = serde_json::to_value(counts).expect("serialize");
        assert_eq!(
            v,
            serde_json::json!({ "A": 0, "B": 0, "C": 0, "D": 0, "E": 0, "F": 0 })
        );
    }

    #[test]
    fn counts_sum_to_input_length() {
        let values = vec![93, 88, 71, 71, 64, 50, 12, -3, 140];
        let counts = grade_counts(values.iter().copied());
        assert_eq!(counts.total(), values.len());
        assert_eq!(counts.get(Grade::A), 2);
        assert_eq!(counts.get(Grade::C), 2);
        assert_eq!(counts.get(Grade::F), 2);
    }

    #[test]
    fn bars_follow_a_to_f_order() {
        let bars = grade_bars(&grade_counts([55]));
        let labels: Vec<&str> = bars.iter().map(|b| b.grade.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C", "D", "E", "F"]);
        assert_eq!(bars[4].count, 1);
    }

    #[test]
    fn summary_handles_even_and_empty_inputs() {
        let s = score_summary([90, 80, 70, 60]);
        assert_eq!(s.count, 4);
        assert_eq!(s.average, Some(75.0));
        assert_eq!(s.median, Some(75.0));
        assert_eq!(s.min, Some(60));
        assert_eq!(s.max, Some(90));

        let empty = score_summary(Vec::new());
        assert_eq!(empty.count, 0);
        assert_eq!(empty.average, None);
        assert_eq!(empty.median, None);
    }
}
