use chrono::NaiveDate;

use crate::calendar::{self, MonthIndex, MonthMatrix};
use crate::config::Config;
use crate::diary::{Appointment, Dated, Episode, MidasAssessment};
use crate::provider::*;

/// All configured diaries, merged for display.
pub struct Agenda {
    diaries: Vec<ProviderDiary>,
    appointments: Vec<Appointment>,
    episodes: Vec<Episode>,
    assessments: Vec<MidasAssessment>,
}

impl Agenda {
    pub fn from_config(config: &Config) -> Result<Self> {
        let diaries: Vec<ProviderDiary> = config
            .diaries
            .iter()
            .map(load_diary)
            .inspect(|d| {
                if let Err(e) = d {
                    log::warn!("{}", e)
                }
            })
            .filter_map(std::result::Result::ok)
            .collect();

        Ok(Agenda::from_diaries(diaries))
    }

    pub fn from_diaries(diaries: Vec<ProviderDiary>) -> Self {
        let mut agenda = Agenda {
            diaries,
            appointments: Vec::new(),
            episodes: Vec::new(),
            assessments: Vec::new(),
        };
        agenda.refresh();
        agenda
    }

    /// Rebuilds the merged views after a diary changed.
    pub fn refresh(&mut self) {
        self.appointments = self
            .diaries
            .iter()
            .flat_map(|diary| diary.appointments().iter().cloned())
            .collect();
        self.episodes = self
            .diaries
            .iter()
            .flat_map(|diary| diary.episodes().iter().cloned())
            .collect();
        self.assessments = self
            .diaries
            .iter()
            .flat_map(|diary| diary.assessments().iter().cloned())
            .collect();
    }

    pub fn diaries(&self) -> impl Iterator<Item = &ProviderDiary> {
        self.diaries.iter()
    }

    /// `None` picks the first configured diary.
    pub fn diary_mut(&mut self, name: Option<&str>) -> Result<&mut ProviderDiary> {
        let found = match name {
            Some(name) => self.diaries.iter_mut().find(|diary| diary.name() == name),
            None => self.diaries.first_mut(),
        };

        found.ok_or_else(|| {
            Error::new(
                ErrorKind::UnknownDiary,
                name.unwrap_or("no diary configured"),
            )
        })
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn assessments(&self) -> &[MidasAssessment] {
        &self.assessments
    }

    pub fn month(&self, index: MonthIndex) -> Result<MonthMatrix<'_, Appointment>> {
        calendar::month_matrix_at(index, &self.appointments)
    }

    pub fn episode_month(&self, index: MonthIndex) -> Result<MonthMatrix<'_, Episode>> {
        calendar::month_matrix_at(index, &self.episodes)
    }

    pub fn week(&self, date: NaiveDate) -> Result<Vec<(NaiveDate, Vec<&Appointment>)>> {
        calendar::week_agenda(date, &self.appointments)
    }

    pub fn appointments_of_day<'a>(
        &'a self,
        date: &'a NaiveDate,
    ) -> impl Iterator<Item = &'a Appointment> + 'a {
        self.appointments
            .iter()
            .filter(move |appointment| appointment.date().as_ref() == Some(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiaryConfig;
    use crate::provider::file::FileDiary;
    use chrono::Month;
    use std::fs;
    use std::path::Path;

    fn diary_with(name: &str, appointments: &[(&str, &str)]) -> ProviderDiary {
        let mut diary = FileDiary::new(name, Path::new("unused.toml"));
        for (date, doctor) in appointments {
            diary
                .book(Appointment::new(date, doctor, "10:00 A.M."))
                .unwrap();
        }
        ProviderDiary::File(diary)
    }

    #[test]
    fn merges_diaries() {
        let agenda = Agenda::from_diaries(vec![
            diary_with("a", &[("2025-07-15", "Dr. A")]),
            diary_with("b", &[("2025-07-15", "Dr. B"), ("2025-07-30", "Dr. C")]),
        ]);

        let matrix = agenda.month(MonthIndex::new(Month::July, 2025)).unwrap();
        let fifteenth = matrix
            .current_days()
            .find(|cell| cell.number() == Some(15))
            .unwrap();
        assert_eq!(fifteenth.items().len(), 2);

        let date = NaiveDate::from_ymd_opt(2025, 7, 30).unwrap();
        let doctors: Vec<_> = agenda
            .appointments_of_day(&date)
            .map(|a| a.doctor.as_str())
            .collect();
        assert_eq!(doctors, vec!["Dr. C"]);

        let week = agenda.week(date).unwrap();
        assert_eq!(week[2].1.len(), 1);
    }

    #[test]
    fn diary_lookup_and_refresh() {
        let mut agenda = Agenda::from_diaries(vec![diary_with("a", &[]), diary_with("b", &[])]);

        assert!(agenda.diary_mut(Some("missing")).is_err());
        agenda
            .diary_mut(Some("b"))
            .unwrap()
            .book(Appointment::new("2025-01-02", "Dr. B", "08:00 A.M."))
            .unwrap();
        assert!(agenda.appointments().is_empty());

        agenda.refresh();
        assert_eq!(agenda.appointments().len(), 1);
        assert_eq!(agenda.diary_mut(None).unwrap().name(), "a");
    }

    #[test]
    fn broken_diary_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.toml");
        let bad = dir.path().join("bad.toml");
        fs::write(
            &good,
            "[[appointment]]\ndate = \"2025-07-15\"\ndoctor = \"Dr. A\"\ntime = \"9\"\n",
        )
        .unwrap();
        fs::write(&bad, "this is not toml").unwrap();

        let config = Config {
            diaries: vec![
                DiaryConfig {
                    name: "bad".to_owned(),
                    path: bad,
                    provider: "toml".to_owned(),
                },
                DiaryConfig {
                    name: "good".to_owned(),
                    path: good,
                    provider: "toml".to_owned(),
                },
                DiaryConfig {
                    name: "remote".to_owned(),
                    path: dir.path().join("x"),
                    provider: "caldav".to_owned(),
                },
            ],
            ..Config::default()
        };

        let agenda = Agenda::from_config(&config).unwrap();
        assert_eq!(agenda.diaries().count(), 1);
        assert_eq!(agenda.appointments().len(), 1);
    }
}
