pub mod error;
pub mod file;

use std::path::Path;

use crate::config::DiaryConfig;
use crate::diary::{Appointment, Episode, MidasAssessment};

pub use error::{Error, ErrorKind};

pub type Result<T> = std::result::Result<T, Error>;

pub trait Diarylike {
    fn name(&self) -> &str;
    fn path(&self) -> &Path;
    fn appointments(&self) -> &[Appointment];
    fn episodes(&self) -> &[Episode];
    fn assessments(&self) -> &[MidasAssessment];
}

pub trait MutDiarylike: Diarylike {
    fn book(&mut self, appointment: Appointment) -> Result<()>;
    fn record_episode(&mut self, episode: Episode) -> Result<()>;
    fn record_assessment(&mut self, assessment: MidasAssessment) -> Result<()>;
    fn save(&self) -> Result<()>;
}

pub enum ProviderDiary {
    File(file::FileDiary),
}

impl ProviderDiary {
    fn inner(&self) -> &dyn MutDiarylike {
        match self {
            ProviderDiary::File(diary) => diary,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn MutDiarylike {
        match self {
            ProviderDiary::File(diary) => diary,
        }
    }
}

impl Diarylike for ProviderDiary {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn path(&self) -> &Path {
        self.inner().path()
    }

    fn appointments(&self) -> &[Appointment] {
        self.inner().appointments()
    }

    fn episodes(&self) -> &[Episode] {
        self.inner().episodes()
    }

    fn assessments(&self) -> &[MidasAssessment] {
        self.inner().assessments()
    }
}

impl MutDiarylike for ProviderDiary {
    fn book(&mut self, appointment: Appointment) -> Result<()> {
        self.inner_mut().book(appointment)
    }

    fn record_episode(&mut self, episode: Episode) -> Result<()> {
        self.inner_mut().record_episode(episode)
    }

    fn record_assessment(&mut self, assessment: MidasAssessment) -> Result<()> {
        self.inner_mut().record_assessment(assessment)
    }

    fn save(&self) -> Result<()> {
        self.inner().save()
    }
}

pub fn load_diary(config: &DiaryConfig) -> Result<ProviderDiary> {
    match config.provider.as_str() {
        file::PROVIDER_NAME => {
            file::FileDiary::load(&config.name, &config.path).map(ProviderDiary::File)
        }
        other => Err(Error::new(
            ErrorKind::ConfigParse,
            &format!(
                "unknown provider '{}' for diary '{}'",
                other, config.name
            ),
        )),
    }
}
