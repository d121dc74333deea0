//! Migraine Disability Assessment (MIDAS) scoring.
//!
//! The questionnaire covers the last three months. Questions 1 to 5 count
//! days lost or halved at work, at home and in leisure; their sum is the
//! score. Questions A and B (headache days, average pain) are recorded
//! alongside but do not contribute to the grade.

use chrono::NaiveDate;
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::diary::{Dated, MidasAssessment};
use crate::provider::error::*;
use crate::provider::Result;

pub const MAX_DAYS: u8 = 90;
pub const MAX_PAIN: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidasAnswers {
    pub missed_work: u8,
    pub reduced_work: u8,
    pub missed_household: u8,
    pub reduced_household: u8,
    pub missed_leisure: u8,
    pub headache_days: u8,
    pub pain: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum MidasGrade {
    #[display(fmt = "I")]
    I,
    #[display(fmt = "II")]
    II,
    #[display(fmt = "III")]
    III,
    #[display(fmt = "IV")]
    IV,
}

impl MidasGrade {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=5 => MidasGrade::I,
            6..=10 => MidasGrade::II,
            11..=20 => MidasGrade::III,
            _ => MidasGrade::IV,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MidasGrade::I => "little or no disability",
            MidasGrade::II => "mild disability",
            MidasGrade::III => "moderate disability",
            MidasGrade::IV => "severe disability",
        }
    }
}

fn check_days(name: &str, days: u8) -> Result<u8> {
    if days > MAX_DAYS {
        Err(Error::new(
            ErrorKind::InvalidAnswer,
            &format!("{} = {} exceeds {} days", name, days, MAX_DAYS),
        ))
    } else {
        Ok(days)
    }
}

impl MidasAnswers {
    /// `days` holds questions 1 to 5 in questionnaire order.
    pub fn new(days: [u8; 5], headache_days: u8, pain: u8) -> Result<Self> {
        let [q1, q2, q3, q4, q5] = days;

        if pain > MAX_PAIN {
            return Err(Error::new(
                ErrorKind::InvalidAnswer,
                &format!("pain = {} exceeds {}", pain, MAX_PAIN),
            ));
        }

        Ok(MidasAnswers {
            missed_work: check_days("q1", q1)?,
            reduced_work: check_days("q2", q2)?,
            missed_household: check_days("q3", q3)?,
            reduced_household: check_days("q4", q4)?,
            missed_leisure: check_days("q5", q5)?,
            headache_days: check_days("headache days", headache_days)?,
            pain,
        })
    }

    /// Answers loaded from disk bypass `new`, so they are checked again here.
    pub fn validate(&self) -> Result<()> {
        MidasAnswers::new(
            [
                self.missed_work,
                self.reduced_work,
                self.missed_household,
                self.reduced_household,
                self.missed_leisure,
            ],
            self.headache_days,
            self.pain,
        )
        .map(|_| ())
    }

    pub fn score(&self) -> u32 {
        [
            self.missed_work,
            self.reduced_work,
            self.missed_household,
            self.reduced_household,
            self.missed_leisure,
        ]
        .iter()
        .map(|&days| days as u32)
        .sum()
    }

    pub fn grade(&self) -> MidasGrade {
        MidasGrade::from_score(self.score())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub score: u32,
    pub grade: MidasGrade,
}

/// Chronological score history. Assessments with a malformed date are skipped.
pub fn trend<'a, I>(assessments: I) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = &'a MidasAssessment>,
{
    let mut points: Vec<TrendPoint> = assessments
        .into_iter()
        .filter_map(|assessment| match assessment.date() {
            Some(date) => Some(TrendPoint {
                date,
                score: assessment.answers.score(),
                grade: assessment.answers.grade(),
            }),
            None => {
                log::debug!(
                    "Skipping assessment with malformed date '{}'",
                    assessment.date
                );
                None
            }
        })
        .collect();

    points.sort_by_key(|point| point.date);
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(days: [u8; 5]) -> MidasAnswers {
        MidasAnswers::new(days, 12, 6).unwrap()
    }

    #[test]
    fn score_sums_first_five_questions() {
        let a = answers([1, 2, 3, 4, 5]);
        assert_eq!(a.score(), 15);
        assert_eq!(a.grade(), MidasGrade::III);
    }

    #[test]
    fn grade_thresholds() {
        assert_eq!(MidasGrade::from_score(0), MidasGrade::I);
        assert_eq!(MidasGrade::from_score(5), MidasGrade::I);
        assert_eq!(MidasGrade::from_score(6), MidasGrade::II);
        assert_eq!(MidasGrade::from_score(10), MidasGrade::II);
        assert_eq!(MidasGrade::from_score(11), MidasGrade::III);
        assert_eq!(MidasGrade::from_score(20), MidasGrade::III);
        assert_eq!(MidasGrade::from_score(21), MidasGrade::IV);
        assert_eq!(MidasGrade::from_score(450), MidasGrade::IV);
    }

    #[test]
    fn out_of_range_answers_are_rejected() {
        assert!(MidasAnswers::new([91, 0, 0, 0, 0], 0, 0).is_err());
        assert!(MidasAnswers::new([0, 0, 0, 0, 0], 91, 0).is_err());
        assert!(MidasAnswers::new([0, 0, 0, 0, 0], 0, 11).is_err());
        assert!(MidasAnswers::new([90, 90, 90, 90, 90], 90, 10).is_ok());
    }

    #[test]
    fn trend_is_chronological_and_skips_bad_dates() {
        let mut late = MidasAssessment::new(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            answers([0, 0, 1, 0, 0]),
        );
        let early = MidasAssessment::new(
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            answers([10, 5, 5, 2, 0]),
        );
        let mut broken = late.clone();
        broken.date = "June".to_owned();

        let points = trend(vec![&late, &broken, &early]);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].score, 22);
        assert_eq!(points[0].grade, MidasGrade::IV);
        assert_eq!(points[1].grade, MidasGrade::I);

        late.answers.missed_work = 200;
        assert!(late.answers.validate().is_err());
    }
}
