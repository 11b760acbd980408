use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Label of the bucket that totals every labelled grade.
pub const ALL_GRADES_LABEL: &str = "All Grades";

/// Grades that have an ordinal bucket label.
pub const LABELED_GRADES: RangeInclusive<i32> = 1..=10;

/// English ordinal suffix: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st, ...
pub fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

pub fn ordinal(n: u32) -> String {
    format!("{}{}", n, ordinal_suffix(n))
}

/// Bucket label for a grade, e.g. `"3rd Grade"`. `None` outside 1..=10.
pub fn grade_label(grade: i32) -> Option<String> {
    if !LABELED_GRADES.contains(&grade) {
        return None;
    }
    Some(format!("{} Grade", ordinal(grade as u32)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeBucket {
    pub grade: i32,
    pub label: String,
    pub count: usize,
}

/// Per-grade student counts.
///
/// Kindergarten (0) and grades 11-12 have no bucket label. They are left out
/// of both the buckets and the "All Grades" total, and reported as `excluded`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeStatistics {
    /// Non-empty buckets in ascending grade order.
    pub buckets: Vec<GradeBucket>,
    pub all_grades: usize,
    pub excluded: usize,
}

impl GradeStatistics {
    pub fn from_grades<I>(grades: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        let mut excluded = 0;
        for grade in grades {
            if LABELED_GRADES.contains(&grade) {
                *counts.entry(grade).or_default() += 1;
            } else {
                excluded += 1;
            }
        }

        let buckets: Vec<GradeBucket> = counts
            .into_iter()
            .filter_map(|(grade, count)| {
                grade_label(grade).map(|label| GradeBucket {
                    grade,
                    label,
                    count,
                })
            })
            .collect();
        let all_grades = buckets.iter().map(|b| b.count).sum();

        Self {
            buckets,
            all_grades,
            excluded,
        }
    }

    /// Count for a label, including `"All Grades"`.
    pub fn count(&self, label: &str) -> Option<usize> {
        if label == ALL_GRADES_LABEL {
            return Some(self.all_grades);
        }
        self.buckets
            .iter()
            .find(|bucket| bucket.label == label)
            .map(|bucket| bucket.count)
    }

    /// Label/count pairs in display order, "All Grades" last.
    pub fn labeled_counts(&self) -> Vec<(String, usize)> {
        self.buckets
            .iter()
            .map(|bucket| (bucket.label.clone(), bucket.count))
            .chain(std::iter::once((
                ALL_GRADES_LABEL.to_string(),
                self.all_grades,
            )))
            .collect()
    }
}

/// Serialized as `{"counts": {"1st Grade": n, ..., "All Grades": n}, "excluded": n}`
/// with keys kept in grade order.
impl Serialize for GradeStatistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Counts<'a>(&'a GradeStatistics);

        impl Serialize for Counts<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let pairs = self.0.labeled_counts();
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (label, count) in &pairs {
                    map.serialize_entry(label, count)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("counts", &Counts(self))?;
        map.serialize_entry("excluded", &self.excluded)?;
        map.end()
    }
}
