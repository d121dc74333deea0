use chrono::NaiveDate;
use derive_more::Display;
use phf::phf_map;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::convert::Infallible;
use std::str::FromStr;
use uuid::Uuid;

use crate::midas::MidasAnswers;
use crate::provider::error::*;
use crate::provider::Result;

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date key.
pub fn parse_date_key(key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT).map_err(Error::from)
}

pub fn date_key(date: &NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Anything that is pinned to a single calendar day.
pub trait Dated {
    fn date_key(&self) -> &str;

    /// `None` if the key is malformed; such items never show up in a calendar.
    fn date(&self) -> Option<NaiveDate> {
        parse_date_key(self.date_key()).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display, SerializeDisplay, DeserializeFromStr)]
pub enum AppointmentStatus {
    #[display(fmt = "Pendiente")]
    Pending,
    #[display(fmt = "Asistido")]
    Attended,
    #[display(fmt = "Cancelado")]
    Cancelled,
    #[display(fmt = "{}", _0)]
    Other(String),
}

#[derive(Clone, Copy)]
enum KnownStatus {
    Pending,
    Attended,
    Cancelled,
}

static STATUS_LABELS: phf::Map<&'static str, KnownStatus> = phf_map! {
    "pendiente" => KnownStatus::Pending,
    "pending" => KnownStatus::Pending,
    "asistido" => KnownStatus::Attended,
    "attended" => KnownStatus::Attended,
    "cancelado" => KnownStatus::Cancelled,
    "cancelled" => KnownStatus::Cancelled,
    "canceled" => KnownStatus::Cancelled,
};

impl FromStr for AppointmentStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let status = match STATUS_LABELS.get(s.trim().to_lowercase().as_str()) {
            Some(KnownStatus::Pending) => AppointmentStatus::Pending,
            Some(KnownStatus::Attended) => AppointmentStatus::Attended,
            Some(KnownStatus::Cancelled) => AppointmentStatus::Cancelled,
            None => AppointmentStatus::Other(s.to_owned()),
        };

        Ok(status)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub date: String,
    pub doctor: String,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
}

impl Appointment {
    pub fn new(date: &str, doctor: &str, time: &str) -> Self {
        Appointment {
            date: date.to_owned(),
            doctor: doctor.to_owned(),
            time: time.to_owned(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.status, Some(AppointmentStatus::Cancelled))
    }
}

impl Dated for Appointment {
    fn date_key(&self) -> &str {
        &self.date
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: Uuid,
    pub date: String,
    pub duration_hours: f32,
    pub intensity: u8,
    #[serde(default)]
    pub aura: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medication: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Episode {
    pub const MAX_INTENSITY: u8 = 10;

    pub fn new(date: NaiveDate, intensity: u8, duration_hours: f32) -> Result<Self> {
        let episode = Episode {
            id: Uuid::new_v4(),
            date: date_key(&date),
            duration_hours,
            intensity,
            aura: false,
            medication: None,
            notes: None,
        };

        episode.validate()?;
        Ok(episode)
    }

    /// Checks the intensity scale and that the duration is a finite,
    /// non-negative number of hours.
    pub fn validate(&self) -> Result<()> {
        if self.intensity > Self::MAX_INTENSITY {
            return Err(Error::new(
                ErrorKind::InvalidAnswer,
                &format!(
                    "intensity {} exceeds {}",
                    self.intensity,
                    Self::MAX_INTENSITY
                ),
            ));
        }

        if !self.duration_hours.is_finite() || self.duration_hours < 0.0 {
            return Err(Error::new(
                ErrorKind::InvalidAnswer,
                &format!("invalid duration {}h", self.duration_hours),
            ));
        }

        Ok(())
    }

    pub fn with_aura(mut self, aura: bool) -> Self {
        self.aura = aura;
        self
    }

    pub fn with_medication(mut self, medication: Option<String>) -> Self {
        self.medication = medication;
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }
}

impl Dated for Episode {
    fn date_key(&self) -> &str {
        &self.date
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MidasAssessment {
    pub date: String,
    pub answers: MidasAnswers,
}

impl MidasAssessment {
    pub fn new(date: NaiveDate, answers: MidasAnswers) -> Self {
        MidasAssessment {
            date: date_key(&date),
            answers,
        }
    }
}

impl Dated for MidasAssessment {
    fn date_key(&self) -> &str {
        &self.date
    }
}
