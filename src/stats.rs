use chrono::Datelike;
use derive_more::Display;
use std::collections::BTreeSet;

use crate::calendar::MonthIndex;
use crate::diary::{Dated, Episode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum IntensityBucket {
    #[display(fmt = "mild")]
    Mild,
    #[display(fmt = "moderate")]
    Moderate,
    #[display(fmt = "severe")]
    Severe,
}

impl IntensityBucket {
    pub const ALL: [IntensityBucket; 3] = [
        IntensityBucket::Mild,
        IntensityBucket::Moderate,
        IntensityBucket::Severe,
    ];

    pub fn of(intensity: u8) -> Self {
        match intensity {
            0..=3 => IntensityBucket::Mild,
            4..=6 => IntensityBucket::Moderate,
            _ => IntensityBucket::Severe,
        }
    }

    fn slot(&self) -> usize {
        match self {
            IntensityBucket::Mild => 0,
            IntensityBucket::Moderate => 1,
            IntensityBucket::Severe => 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodeSummary {
    pub total: usize,
    pub by_bucket: [usize; 3],
    pub mean_intensity: Option<f32>,
    pub with_aura: usize,
    pub total_hours: f32,
    pub headache_days: usize,
}

impl EpisodeSummary {
    pub fn count(&self, bucket: IntensityBucket) -> usize {
        self.by_bucket[bucket.slot()]
    }
}

pub fn summarize<'a, I>(episodes: I) -> EpisodeSummary
where
    I: IntoIterator<Item = &'a Episode>,
{
    let mut summary = EpisodeSummary::default();
    let mut intensity_sum: u32 = 0;
    let mut days = BTreeSet::new();

    for episode in episodes {
        summary.total += 1;
        summary.by_bucket[IntensityBucket::of(episode.intensity).slot()] += 1;
        summary.total_hours += episode.duration_hours;
        intensity_sum += episode.intensity as u32;
        if episode.aura {
            summary.with_aura += 1;
        }
        // Malformed keys still count as episodes, only not as distinct days
        if let Some(date) = episode.date() {
            days.insert(date);
        }
    }

    summary.headache_days = days.len();
    if summary.total > 0 {
        summary.mean_intensity = Some(intensity_sum as f32 / summary.total as f32);
    }

    summary
}

pub fn summarize_month(episodes: &[Episode], index: MonthIndex) -> EpisodeSummary {
    summarize(
        episodes
            .iter()
            .filter(|episode| episode.date().map_or(false, |date| index.contains(&date))),
    )
}

/// Episode count per month of `year`, January first.
pub fn monthly_counts(episodes: &[Episode], year: i32) -> [usize; 12] {
    let mut counts = [0; 12];

    for date in episodes.iter().filter_map(|episode| episode.date()) {
        if date.year() == year {
            counts[date.month0() as usize] += 1;
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, NaiveDate};

    fn episode(y: i32, m: u32, d: u32, intensity: u8, hours: f32) -> Episode {
        Episode::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), intensity, hours).unwrap()
    }

    #[test]
    fn bucket_boundaries() {
        assert_eq!(IntensityBucket::of(0), IntensityBucket::Mild);
        assert_eq!(IntensityBucket::of(3), IntensityBucket::Mild);
        assert_eq!(IntensityBucket::of(4), IntensityBucket::Moderate);
        assert_eq!(IntensityBucket::of(6), IntensityBucket::Moderate);
        assert_eq!(IntensityBucket::of(7), IntensityBucket::Severe);
        assert_eq!(IntensityBucket::of(10), IntensityBucket::Severe);
    }

    #[test]
    fn empty_summary_has_no_mean() {
        let summary = summarize(&Vec::<Episode>::new());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.mean_intensity, None);
        assert_eq!(summary.headache_days, 0);
    }

    #[test]
    fn summary_aggregates_episodes() {
        let episodes = vec![
            episode(2025, 7, 1, 2, 1.5),
            episode(2025, 7, 1, 8, 4.0).with_aura(true),
            episode(2025, 7, 9, 5, 2.5),
        ];

        let summary = summarize(&episodes);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.count(IntensityBucket::Mild), 1);
        assert_eq!(summary.count(IntensityBucket::Moderate), 1);
        assert_eq!(summary.count(IntensityBucket::Severe), 1);
        assert_eq!(summary.mean_intensity, Some(5.0));
        assert_eq!(summary.with_aura, 1);
        assert_eq!(summary.total_hours, 8.0);
        assert_eq!(summary.headache_days, 2);
    }

    #[test]
    fn month_summary_and_counts_filter_by_date() {
        let mut broken = episode(2025, 7, 3, 9, 1.0);
        broken.date = "July 3rd".to_owned();
        let episodes = vec![
            episode(2025, 6, 30, 3, 1.0),
            episode(2025, 7, 1, 4, 1.0),
            episode(2025, 7, 31, 6, 1.0),
            episode(2024, 7, 15, 6, 1.0),
            broken,
        ];

        let july = summarize_month(&episodes, MonthIndex::new(Month::July, 2025));
        assert_eq!(july.total, 2);
        assert_eq!(july.count(IntensityBucket::Moderate), 2);

        let counts = monthly_counts(&episodes, 2025);
        assert_eq!(counts[5], 1);
        assert_eq!(counts[6], 2);
        assert_eq!(counts.iter().sum::<usize>(), 3);
    }
}
