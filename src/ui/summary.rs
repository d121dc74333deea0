use std::fmt;

use crate::stats::{EpisodeSummary, IntensityBucket};

pub struct SummaryView<'s> {
    title: String,
    summary: &'s EpisodeSummary,
}

impl<'s> SummaryView<'s> {
    pub fn new(title: &str, summary: &'s EpisodeSummary) -> Self {
        SummaryView {
            title: title.to_owned(),
            summary,
        }
    }
}

impl fmt::Display for SummaryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;

        writeln!(f, "{}", self.title)?;
        writeln!(f, "  episodes:       {}", s.total)?;
        writeln!(f, "  headache days:  {}", s.headache_days)?;
        writeln!(f, "  with aura:      {}", s.with_aura)?;
        writeln!(f, "  total hours:    {:.1}", s.total_hours)?;
        match s.mean_intensity {
            Some(mean) => writeln!(f, "  mean intensity: {:.1}", mean)?,
            None => writeln!(f, "  mean intensity: -")?,
        }
        for bucket in IntensityBucket::ALL.iter() {
            writeln!(f, "  {:<15} {}", format!("{}:", bucket), s.count(*bucket))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_counts() {
        let summary = EpisodeSummary {
            total: 3,
            by_bucket: [1, 0, 2],
            mean_intensity: Some(6.5),
            with_aura: 1,
            total_hours: 7.5,
            headache_days: 2,
        };

        let text = SummaryView::new("July 2025", &summary).to_string();
        assert!(text.starts_with("July 2025\n"));
        assert!(text.contains("  mean intensity: 6.5\n"));
        assert!(text.contains("  total hours:    7.5\n"));
        assert!(text.contains("  mild:           1\n"));
        assert!(text.contains("  severe:         2\n"));
    }

    #[test]
    fn empty_summary_has_no_mean() {
        let text = SummaryView::new("-", &EpisodeSummary::default()).to_string();
        assert!(text.contains("  mean intensity: -\n"));
    }
}
