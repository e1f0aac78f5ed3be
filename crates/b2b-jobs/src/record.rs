//! Job records and the working-day metrics derived from them.
//!
//! A [`JobRecord`] is created from a [`JobIntake`] when a vehicle enters the
//! workshop and is then edited through [`JobRecord::apply_update`].  Both
//! steps recompute the derived day counts with the configured [`Calendar`].

use b2b_core::errors::{Error, Result};
use b2b_core::BusinessDays;
use b2b_time::{Calendar, Date};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::WorkshopConfig;
use crate::state::JobState;

/// Natural key of a job: plate, workshop entry date, assignment date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobKey {
    /// Licence plate.
    pub targa: String,
    /// Date the vehicle entered the workshop.
    pub entrata: Date,
    /// Date the job was assigned.
    pub data_incarico: Date,
}

impl std::fmt::Display for JobKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} / {})", self.targa, self.entrata, self.data_incarico)
    }
}

/// Working-day counts stored with each job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobMetrics {
    /// Business days from entry to assignment.
    pub gg_entrata_data_incarico: BusinessDays,
    /// Business days from assignment to the start of mechanical work.
    pub gg_inizio_meccanica: Option<BusinessDays>,
    /// Business days from assignment to the start of body work.
    pub gg_inizio_carr: Option<BusinessDays>,
    /// Duration of mechanical work in business days.
    pub gg_lavorazione_mecc: Option<BusinessDays>,
    /// Duration of body work in business days.
    pub gg_lavorazione_carr: Option<BusinessDays>,
    /// Business days from assignment to the latest recorded work date.
    pub downtime: Option<BusinessDays>,
}

/// A repair job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Fleet the vehicle belongs to.
    pub flotta: String,
    /// Licence plate.
    pub targa: String,
    /// Vehicle model.
    pub modello: String,
    /// Workshop entry date.
    pub entrata: Date,
    /// Assignment date.
    pub data_incarico: Date,
    /// Contractor doing the work.
    pub ditta: Option<String>,
    /// Start of mechanical work.
    pub inizio_mecc: Option<Date>,
    /// End of mechanical work.
    pub fine_mecc: Option<Date>,
    /// Start of body work.
    pub inizio_carr: Option<Date>,
    /// End of body work.
    pub fine_carr: Option<Date>,
    /// Number of body parts worked.
    pub pezzi_carr: u32,
    /// Workflow state.
    pub stato: JobState,
    /// Free-form notes.
    pub note: String,
    /// Promised delivery date.
    pub prev_uscita: Date,
    /// Delivery date, set while the job is [`JobState::Consegnata`].
    pub data_consegnata: Option<Date>,
    /// Derived working-day counts.
    #[serde(flatten)]
    pub metrics: JobMetrics,
}

impl JobRecord {
    /// The job's natural key.
    pub fn key(&self) -> JobKey {
        JobKey {
            targa: self.targa.clone(),
            entrata: self.entrata,
            data_incarico: self.data_incarico,
        }
    }

    /// Latest of the recorded work dates, if any.
    pub fn last_work_date(&self) -> Option<Date> {
        [self.fine_mecc, self.fine_carr, self.inizio_mecc, self.inizio_carr]
            .into_iter()
            .flatten()
            .max()
    }

    /// `true` if the fleet, plate or contractor contains `filter`, ignoring
    /// case.  A blank filter matches every job.
    pub fn matches(&self, filter: &str) -> bool {
        let filter = filter.trim().to_uppercase();
        if filter.is_empty() {
            return true;
        }
        [Some(self.flotta.as_str()), Some(self.targa.as_str()), self.ditta.as_deref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_uppercase().contains(&filter))
    }

    /// Business days elapsed since assignment, both ends included.
    pub fn elapsed_business_days(&self, calendar: &dyn Calendar, today: Date) -> BusinessDays {
        calendar.count_business_days(self.data_incarico, today)
    }

    /// Apply an edit, recomputing the derived metrics.
    ///
    /// Work dates are validated before anything is changed: on error the
    /// record is left untouched.
    pub fn apply_update(
        &mut self,
        update: &JobUpdate,
        calendar: &dyn Calendar,
        today: Date,
    ) -> Result<()> {
        let parsed = update.parse_dates().map_err(|e| {
            warn!(targa = %self.targa, error = %e, "rejected job update");
            e
        })?;

        let ditta = normalize(&update.ditta);
        self.ditta = (!ditta.is_empty()).then_some(ditta);
        self.inizio_mecc = parsed.inizio_mecc;
        self.fine_mecc = parsed.fine_mecc;
        self.inizio_carr = parsed.inizio_carr;
        self.fine_carr = parsed.fine_carr;
        self.pezzi_carr = update.pezzi_carr;
        self.stato = update.stato;
        self.note = update.note.clone();

        let count = |from: Date, to: Date| calendar.count_business_days(from, to);
        let incarico = self.data_incarico;
        self.metrics.gg_inizio_meccanica = self.inizio_mecc.map(|d| count(incarico, d));
        self.metrics.gg_inizio_carr = self.inizio_carr.map(|d| count(incarico, d));
        self.metrics.gg_lavorazione_mecc = self
            .inizio_mecc
            .zip(self.fine_mecc)
            .map(|(from, to)| count(from, to));
        self.metrics.gg_lavorazione_carr = self
            .inizio_carr
            .zip(self.fine_carr)
            .map(|(from, to)| count(from, to));
        self.metrics.downtime = self.last_work_date().map(|last| count(incarico, last));

        self.data_consegnata = if self.stato.is_delivered() {
            Some(self.data_consegnata.unwrap_or(today))
        } else {
            None
        };

        debug!(
            targa = %self.targa,
            stato = %self.stato,
            metrics = ?self.metrics,
            "job updated"
        );
        Ok(())
    }
}

/// Input for registering a new job, as typed by the user.
///
/// Dates are `DD/MM/YYYY` strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobIntake {
    /// Fleet.
    pub flotta: String,
    /// Licence plate.
    pub targa: String,
    /// Vehicle model.
    pub modello: String,
    /// Workshop entry date.
    pub entrata: String,
    /// Assignment date.
    pub data_incarico: String,
}

impl JobIntake {
    /// Validate the intake and build the new record.
    ///
    /// Text fields are trimmed and uppercased.  Both dates are moved back to
    /// the last business day on or before the entered date.  The promised
    /// delivery date is `config.delivery_lead_days` business days after the
    /// assignment date.
    ///
    /// # Errors
    /// * [`Error::MissingField`] if any field is blank;
    /// * [`Error::Parse`] if a date is not a valid `DD/MM/YYYY` date;
    /// * [`Error::Date`] if a derived date leaves the supported range.
    pub fn build_record(&self, calendar: &dyn Calendar, config: &WorkshopConfig) -> Result<JobRecord> {
        let (flotta, targa, modello, entrata, data_incarico) = self.validate().map_err(|e| {
            warn!(targa = %self.targa.trim(), error = %e, "rejected job intake");
            e
        })?;

        let entrata = calendar.last_business_day_on_or_before(entrata)?;
        let data_incarico = calendar.last_business_day_on_or_before(data_incarico)?;
        let prev_uscita = calendar.add_business_days(data_incarico, config.delivery_lead_days)?;
        let gg_entrata_data_incarico = calendar.count_business_days(entrata, data_incarico);

        debug!(
            %targa,
            %entrata,
            %data_incarico,
            %prev_uscita,
            gg_entrata_data_incarico,
            calendar = calendar.name(),
            "job intake"
        );

        Ok(JobRecord {
            flotta,
            targa,
            modello,
            entrata,
            data_incarico,
            ditta: None,
            inizio_mecc: None,
            fine_mecc: None,
            inizio_carr: None,
            fine_carr: None,
            pezzi_carr: 0,
            stato: JobState::default(),
            note: String::new(),
            prev_uscita,
            data_consegnata: None,
            metrics: JobMetrics {
                gg_entrata_data_incarico,
                ..JobMetrics::default()
            },
        })
    }

    fn validate(&self) -> Result<(String, String, String, Date, Date)> {
        Ok((
            required("flotta", &self.flotta)?,
            required("targa", &self.targa)?,
            required("modello", &self.modello)?,
            required_date("entrata", &self.entrata)?,
            required_date("data_incarico", &self.data_incarico)?,
        ))
    }
}

/// Edit of an existing job, as typed by the user.
///
/// Work dates are `DD/MM/YYYY` strings; an empty string clears the date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobUpdate {
    /// Contractor.
    pub ditta: String,
    /// Start of mechanical work.
    pub inizio_mecc: String,
    /// End of mechanical work.
    pub fine_mecc: String,
    /// Start of body work.
    pub inizio_carr: String,
    /// End of body work.
    pub fine_carr: String,
    /// Number of body parts worked.
    pub pezzi_carr: u32,
    /// New workflow state.
    pub stato: JobState,
    /// Notes.
    pub note: String,
}

struct WorkDates {
    inizio_mecc: Option<Date>,
    fine_mecc: Option<Date>,
    inizio_carr: Option<Date>,
    fine_carr: Option<Date>,
}

impl JobUpdate {
    /// Pre-fill an update form from an existing record.
    pub fn from_record(record: &JobRecord) -> Self {
        let fmt = |d: Option<Date>| d.map(Date::to_dmy_string).unwrap_or_default();
        Self {
            ditta: record.ditta.clone().unwrap_or_default(),
            inizio_mecc: fmt(record.inizio_mecc),
            fine_mecc: fmt(record.fine_mecc),
            inizio_carr: fmt(record.inizio_carr),
            fine_carr: fmt(record.fine_carr),
            pezzi_carr: record.pezzi_carr,
            stato: record.stato,
            note: record.note.clone(),
        }
    }

    fn parse_dates(&self) -> Result<WorkDates> {
        Ok(WorkDates {
            inizio_mecc: optional_date(&self.inizio_mecc)?,
            fine_mecc: optional_date(&self.fine_mecc)?,
            inizio_carr: optional_date(&self.inizio_carr)?,
            fine_carr: optional_date(&self.fine_carr)?,
        })
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_uppercase()
}

fn required(field: &'static str, value: &str) -> Result<String> {
    let value = normalize(value);
    if value.is_empty() {
        return Err(Error::MissingField(field));
    }
    Ok(value)
}

fn required_date(field: &'static str, value: &str) -> Result<Date> {
    if value.trim().is_empty() {
        return Err(Error::MissingField(field));
    }
    Date::parse_dmy(value)
}

fn optional_date(value: &str) -> Result<Option<Date>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    Date::parse_dmy(value).map(Some)
}
