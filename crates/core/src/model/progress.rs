use serde::{Deserialize, Serialize};

/// Grade breakdown for one course, as shown on the progress screen.
///
/// Values are taken as reported by the platform. `earned <= total` is not
/// enforced; [`Subsection::completion`] clamps instead.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseProgress {
    pub sections: Vec<Section>,
    /// Overall course progress, in percent.
    pub progress: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub display_name: String,
    pub subsections: Vec<Subsection>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    pub earned: f32,
    pub total: f32,
    pub percentage_string: String,
    pub display_name: String,
    pub score: Vec<Score>,
    pub show_grades: bool,
    pub graded: bool,
    pub grade_type: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub earned: f32,
    pub possible: f32,
}

impl CourseProgress {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|section| section.subsections.is_empty())
    }

    /// Graded subsections in outline order.
    pub fn graded_subsections(&self) -> impl Iterator<Item = &Subsection> {
        self.sections
            .iter()
            .flat_map(|section| section.subsections.iter())
            .filter(|subsection| subsection.graded)
    }
}

impl Subsection {
    /// Fraction of points earned, clamped to `0.0..=1.0`.
    ///
    /// Returns `0.0` when the subsection has no possible points.
    #[must_use]
    pub fn completion(&self) -> f32 {
        if self.total <= 0.0 {
            return 0.0;
        }
        (self.earned / self.total).clamp(0.0, 1.0)
    }

    /// False when the platform reported more earned than possible points.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.earned <= self.total
            && self.score.iter().all(|score| score.earned <= score.possible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subsection(earned: f32, total: f32, graded: bool) -> Subsection {
        Subsection {
            earned,
            total,
            percentage_string: String::new(),
            display_name: "Homework".into(),
            score: vec![Score {
                earned,
                possible: total,
            }],
            show_grades: true,
            graded,
            grade_type: "Homework".into(),
        }
    }

    #[test]
    fn completion_clamps_over_earned_values() {
        let over = subsection(5.0, 4.0, true);
        assert!((over.completion() - 1.0).abs() < f32::EPSILON);
        assert!(!over.is_consistent());
    }

    #[test]
    fn completion_of_empty_subsection_is_zero() {
        assert!(subsection(0.0, 0.0, false).completion().abs() < f32::EPSILON);
    }

    #[test]
    fn graded_subsections_skip_ungraded_items() {
        let progress = CourseProgress {
            sections: vec![
                Section {
                    display_name: "Week 1".into(),
                    subsections: vec![subsection(1.0, 2.0, true), subsection(0.0, 1.0, false)],
                },
                Section {
                    display_name: "Week 2".into(),
                    subsections: vec![subsection(2.0, 2.0, true)],
                },
            ],
            progress: 40,
        };
        assert_eq!(progress.graded_subsections().count(), 2);
        assert!(!progress.is_empty());
        assert!(CourseProgress::default().is_empty());
    }
}
