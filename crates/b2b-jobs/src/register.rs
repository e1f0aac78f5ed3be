//! In-memory register of repair jobs.

use b2b_core::errors::{Error, Result};
use b2b_core::Size;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::record::{JobKey, JobRecord};

/// Jobs in insertion order, unique by [`JobKey`] and by plate plus entry date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobRegister {
    jobs: Vec<JobRecord>,
}

impl JobRegister {
    /// An empty register.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a job.
    ///
    /// # Errors
    /// * [`Error::DuplicateJob`] if a job with the same key exists;
    /// * [`Error::DuplicateEntry`] if the plate already has a job with the
    ///   same entry date.
    pub fn insert(&mut self, job: JobRecord) -> Result<()> {
        if self.get(&job.key()).is_some() {
            warn!(targa = %job.targa, "rejected duplicate job");
            return Err(Error::DuplicateJob {
                targa: job.targa,
                entrata: job.entrata.to_dmy_string(),
                data_incarico: job.data_incarico.to_dmy_string(),
            });
        }
        if self
            .jobs
            .iter()
            .any(|j| j.targa == job.targa && j.entrata == job.entrata)
        {
            warn!(targa = %job.targa, entrata = %job.entrata, "rejected duplicate entry");
            return Err(Error::DuplicateEntry {
                targa: job.targa,
                entrata: job.entrata.to_dmy_string(),
            });
        }
        debug!(targa = %job.targa, "job registered");
        self.jobs.push(job);
        Ok(())
    }

    /// Jobs for a plate, ignoring case and surrounding whitespace.
    pub fn find_by_targa(&self, targa: &str) -> Vec<&JobRecord> {
        let targa = targa.trim();
        self.jobs
            .iter()
            .filter(|j| j.targa.eq_ignore_ascii_case(targa))
            .collect()
    }

    /// The job with the given key.
    pub fn get(&self, key: &JobKey) -> Option<&JobRecord> {
        self.jobs.iter().find(|j| Self::has_key(j, key))
    }

    /// Mutable access to the job with the given key.
    pub fn get_mut(&mut self, key: &JobKey) -> Option<&mut JobRecord> {
        self.jobs.iter_mut().find(|j| Self::has_key(j, key))
    }

    /// Run `edit` on the job with the given key.
    ///
    /// # Errors
    /// [`Error::NotFound`] if no such job exists; otherwise whatever `edit`
    /// returns.
    pub fn update<F>(&mut self, key: &JobKey, edit: F) -> Result<()>
    where
        F: FnOnce(&mut JobRecord) -> Result<()>,
    {
        match self.get_mut(key) {
            Some(job) => edit(job),
            None => {
                warn!(%key, "update of unknown job");
                Err(Error::NotFound(format!("job {key}")))
            }
        }
    }

    /// Remove and return the job with the given key.
    pub fn remove(&mut self, key: &JobKey) -> Option<JobRecord> {
        let pos = self.jobs.iter().position(|j| Self::has_key(j, key))?;
        Some(self.jobs.remove(pos))
    }

    /// All jobs in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, JobRecord> {
        self.jobs.iter()
    }

    /// Number of jobs.
    pub fn len(&self) -> Size {
        self.jobs.len()
    }

    /// `true` if the register is empty.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// The `n` most recently inserted jobs, newest first.
    pub fn recent(&self, n: Size) -> impl Iterator<Item = &JobRecord> + '_ {
        self.jobs.iter().rev().take(n)
    }

    fn has_key(job: &JobRecord, key: &JobKey) -> bool {
        job.targa == key.targa && job.entrata == key.entrata && job.data_incarico == key.data_incarico
    }
}

impl<'a> IntoIterator for &'a JobRegister {
    type Item = &'a JobRecord;
    type IntoIter = std::slice::Iter<'a, JobRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}

impl FromIterator<JobRecord> for JobRegister {
    /// Collects jobs as-is, without duplicate checks.
    fn from_iter<T: IntoIterator<Item = JobRecord>>(iter: T) -> Self {
        Self {
            jobs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkshopConfig;
    use crate::record::JobIntake;
    use b2b_time::Italy;

    fn job(targa: &str, entrata: &str, incarico: &str) -> JobRecord {
        JobIntake {
            flotta: "ALD".into(),
            targa: targa.into(),
            modello: "500".into(),
            entrata: entrata.into(),
            data_incarico: incarico.into(),
        }
        .build_record(&Italy::new(), &WorkshopConfig::default())
        .unwrap()
    }

    #[test]
    fn rejects_duplicates() {
        let mut reg = JobRegister::new();
        reg.insert(job("AA111AA", "03/06/2024", "04/06/2024")).unwrap();

        let err = reg
            .insert(job("AA111AA", "03/06/2024", "04/06/2024"))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateJob { .. }));

        let err = reg
            .insert(job("AA111AA", "03/06/2024", "05/06/2024"))
            .unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateEntry {
                targa: "AA111AA".into(),
                entrata: "03/06/2024".into(),
            }
        );

        // Same plate, later entry: a new job.
        reg.insert(job("AA111AA", "10/06/2024", "10/06/2024")).unwrap();
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn lookup_and_remove() {
        let mut reg: JobRegister = [
            job("AA111AA", "03/06/2024", "04/06/2024"),
            job("BB222BB", "04/06/2024", "04/06/2024"),
        ]
        .into_iter()
        .collect();

        assert_eq!(reg.find_by_targa(" bb222bb ").len(), 1);
        assert!(reg.find_by_targa("BB222").is_empty());

        let key = reg.find_by_targa("AA111AA")[0].key();
        assert!(reg.get(&key).is_some());
        assert!(reg.remove(&key).is_some());
        assert!(reg.get(&key).is_none());
        assert!(matches!(
            reg.update(&key, |_| Ok(())),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn recent_is_newest_first() {
        let mut reg = JobRegister::new();
        for (i, targa) in ["AA111AA", "BB222BB", "CC333CC"].into_iter().enumerate() {
            let d = format!("0{}/07/2024", i + 1);
            reg.insert(job(targa, &d, &d)).unwrap();
        }
        let plates: Vec<_> = reg.recent(2).map(|j| j.targa.as_str()).collect();
        assert_eq!(plates, ["CC333CC", "BB222BB"]);
        assert_eq!(reg.recent(10).count(), 3);
    }
}
