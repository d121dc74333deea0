use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::diary::{parse_date_key, Appointment, Episode, MidasAssessment};

use super::{Diarylike, Error, ErrorKind, MutDiarylike, Result};

pub const PROVIDER_NAME: &str = "toml";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct DiaryFile {
    #[serde(rename = "appointment", default, skip_serializing_if = "Vec::is_empty")]
    appointments: Vec<Appointment>,
    #[serde(rename = "episode", default, skip_serializing_if = "Vec::is_empty")]
    episodes: Vec<Episode>,
    #[serde(rename = "assessment", default, skip_serializing_if = "Vec::is_empty")]
    assessments: Vec<MidasAssessment>,
}

/// A diary kept in a single TOML file.
#[derive(Debug)]
pub struct FileDiary {
    name: String,
    path: PathBuf,
    content: DiaryFile,
}

impl FileDiary {
    pub fn new(name: &str, path: &Path) -> Self {
        FileDiary {
            name: name.to_owned(),
            path: path.to_owned(),
            content: DiaryFile::default(),
        }
    }

    /// A missing file is an empty diary; it gets created on the first `save`.
    pub fn load(name: &str, path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!(
                "Diary '{}' does not exist yet at '{}'",
                name,
                path.display()
            );
            return Ok(FileDiary::new(name, path));
        }

        if !path.is_file() {
            return Err(Error::new(
                ErrorKind::DiaryParse,
                &format!("'{}' is not a file", path.display()),
            ));
        }

        let content: DiaryFile = toml::from_str(&fs::read_to_string(path)?).map_err(|e| {
            Error::new(
                ErrorKind::DiaryParse,
                &format!("{}: {}", path.display(), e),
            )
        })?;

        for assessment in &content.assessments {
            if let Err(e) = assessment.answers.validate() {
                log::warn!("Assessment of {} in '{}': {}", assessment.date, name, e);
            }
        }

        for episode in &content.episodes {
            if let Err(e) = episode.validate() {
                log::warn!("Episode {} in '{}': {}", episode.id, name, e);
            }
        }

        log::debug!(
            "Loaded diary '{}': {} appointments, {} episodes, {} assessments",
            name,
            content.appointments.len(),
            content.episodes.len(),
            content.assessments.len()
        );

        Ok(FileDiary {
            name: name.to_owned(),
            path: path.to_owned(),
            content,
        })
    }
}

impl Diarylike for FileDiary {
    fn name(&self) -> &str {
        &self.name
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn appointments(&self) -> &[Appointment] {
        &self.content.appointments
    }

    fn episodes(&self) -> &[Episode] {
        &self.content.episodes
    }

    fn assessments(&self) -> &[MidasAssessment] {
        &self.content.assessments
    }
}

impl MutDiarylike for FileDiary {
    fn book(&mut self, appointment: Appointment) -> Result<()> {
        parse_date_key(&appointment.date)?;

        if appointment.doctor.trim().is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidAnswer,
                "appointment needs a doctor",
            ));
        }

        self.content.appointments.push(appointment);
        Ok(())
    }

    fn record_episode(&mut self, episode: Episode) -> Result<()> {
        parse_date_key(&episode.date)?;
        episode.validate()?;
        self.content.episodes.push(episode);
        Ok(())
    }

    fn record_assessment(&mut self, assessment: MidasAssessment) -> Result<()> {
        parse_date_key(&assessment.date)?;
        assessment.answers.validate()?;
        self.content.assessments.push(assessment);
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, toml::to_string_pretty(&self.content)?)?;
        log::info!("Saved diary '{}' to '{}'", self.name, self.path.display());
        Ok(())
    }
}
