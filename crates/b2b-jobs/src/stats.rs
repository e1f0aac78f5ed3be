//! Aggregate statistics over a set of jobs.

use std::collections::BTreeMap;

use b2b_core::errors::Result;
use b2b_core::BusinessDays;
use b2b_time::{Calendar, Date};
use serde::Serialize;
use tracing::debug;

use crate::record::JobRecord;
use crate::state::JobState;

/// Number of jobs in one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateCount {
    /// State.
    pub stato: JobState,
    /// Number of jobs.
    pub count: usize,
}

/// Per-state summary ("Riepilogo").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StateSummary {
    /// Non-zero counts in board order.
    pub counts: Vec<StateCount>,
    /// Total number of jobs.
    pub total: usize,
}

/// Count jobs per state, in board order.
pub fn state_counts<'a, I>(jobs: I) -> StateSummary
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let mut per_state = [0usize; 9];
    for job in jobs {
        per_state[job.stato.index()] += 1;
    }
    let counts: Vec<StateCount> = JobState::ALL
        .into_iter()
        .zip(per_state)
        .filter(|&(_, count)| count > 0)
        .map(|(stato, count)| StateCount { stato, count })
        .collect();
    StateSummary {
        total: per_state.iter().sum(),
        counts,
    }
}

/// The "Riepilogo" export sheet as of `today`.
///
/// Jobs delivered before `today` are left out.  States are listed by
/// descending count, ties in board order.
pub fn state_report<'a, I>(jobs: I, today: Date) -> StateSummary
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let current = jobs.into_iter().filter(|job| {
        !(job.stato.is_delivered() && job.data_consegnata.is_some_and(|d| d < today))
    });
    let mut summary = state_counts(current);
    // Stable sort keeps board order among equal counts.
    summary.counts.sort_by(|a, b| b.count.cmp(&a.count));
    debug!(total = summary.total, %today, "state report");
    summary
}

/// Monthly intakes and deliveries of one fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FleetMonthStats {
    /// Fleet name, uppercased.
    pub flotta: String,
    /// Jobs assigned in the month.
    pub entrate: usize,
    /// Jobs delivered in the month.
    pub consegnate: usize,
}

/// Intakes and deliveries per fleet in `year`/`month`, sorted by fleet.
///
/// Every fleet with at least one job gets a row, with zero counts when
/// nothing happened in the month.  Jobs with a blank fleet are skipped.
pub fn monthly_fleet_stats<'a, I>(jobs: I, year: u16, month: u8) -> Vec<FleetMonthStats>
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let mut by_fleet: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for job in jobs {
        let flotta = job.flotta.trim().to_uppercase();
        if flotta.is_empty() {
            continue;
        }
        let entered = job.data_incarico.is_in_month(year, month);
        let delivered = job
            .data_consegnata
            .is_some_and(|d| d.is_in_month(year, month));
        let entry = by_fleet.entry(flotta).or_default();
        entry.0 += usize::from(entered);
        entry.1 += usize::from(delivered);
    }
    by_fleet
        .into_iter()
        .map(|(flotta, (entrate, consegnate))| FleetMonthStats {
            flotta,
            entrate,
            consegnate,
        })
        .collect()
}

/// Monthly productivity of one contractor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractorRecap {
    /// Contractor.
    pub ditta: String,
    /// Number of operators.
    pub operators: u32,
    /// Business days in the month.
    pub working_days: BusinessDays,
    /// Vehicles finished in the month.
    pub vehicles_finished: usize,
    /// Body parts on those vehicles.
    pub total_parts: u32,
    /// Vehicles per working day.
    pub avg_vehicles_per_day: f64,
    /// Parts per vehicle.
    pub avg_parts_per_vehicle: f64,
    /// Parts per working day.
    pub avg_parts_per_day: f64,
    /// Parts per operator per working day.
    pub avg_parts_per_operator_per_day: f64,
}

/// Date a finished job was completed: delivery, else the last end-of-work date.
fn finished_on(job: &JobRecord) -> Option<Date> {
    if !job.stato.is_finished() {
        return None;
    }
    job.data_consegnata
        .or_else(|| job.fine_mecc.into_iter().chain(job.fine_carr).max())
}

fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Per-contractor recap for `year`/`month`, sorted by contractor.
///
/// `operators` maps contractor names (uppercase) to head count; a missing
/// entry counts as zero.  Jobs without a contractor are skipped.
///
/// # Errors
/// [`b2b_core::Error::Date`] if `year`/`month` is not a valid month.
pub fn contractor_recap<'a, I>(
    jobs: I,
    calendar: &dyn Calendar,
    year: u16,
    month: u8,
    operators: &BTreeMap<String, u32>,
) -> Result<Vec<ContractorRecap>>
where
    I: IntoIterator<Item = &'a JobRecord>,
{
    let working_days = calendar.business_days_in_month(year, month)?;

    let mut by_ditta: BTreeMap<&str, (usize, u32)> = BTreeMap::new();
    for job in jobs {
        let Some(ditta) = job.ditta.as_deref() else {
            continue;
        };
        if !finished_on(job).is_some_and(|d| d.is_in_month(year, month)) {
            continue;
        }
        let entry = by_ditta.entry(ditta).or_default();
        entry.0 += 1;
        entry.1 += job.pezzi_carr;
    }

    let days = f64::from(working_days);
    let recap: Vec<ContractorRecap> = by_ditta
        .into_iter()
        .map(|(ditta, (vehicles, parts))| {
            let ops = operators.get(ditta).copied().unwrap_or(0);
            let vehicles_f = vehicles as f64;
            let parts_f = f64::from(parts);
            ContractorRecap {
                ditta: ditta.to_string(),
                operators: ops,
                working_days,
                vehicles_finished: vehicles,
                total_parts: parts,
                avg_vehicles_per_day: ratio(vehicles_f, days),
                avg_parts_per_vehicle: ratio(parts_f, vehicles_f),
                avg_parts_per_day: ratio(parts_f, days),
                avg_parts_per_operator_per_day: ratio(parts_f, f64::from(ops) * days),
            }
        })
        .collect();
    debug!(year, month, working_days, contractors = recap.len(), "contractor recap");
    Ok(recap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::JobMetrics;

    fn job(flotta: &str, targa: &str, stato: JobState) -> JobRecord {
        let d = Date::from_ymd(2024, 5, 6).unwrap();
        JobRecord {
            flotta: flotta.into(),
            targa: targa.into(),
            modello: "GOLF".into(),
            entrata: d,
            data_incarico: d,
            ditta: None,
            inizio_mecc: None,
            fine_mecc: None,
            inizio_carr: None,
            fine_carr: None,
            pezzi_carr: 0,
            stato,
            note: String::new(),
            prev_uscita: d,
            data_consegnata: None,
            metrics: JobMetrics::default(),
        }
    }

    #[test]
    fn counts_in_board_order() {
        let jobs = [
            job("A", "X1", JobState::Pronta),
            job("A", "X2", JobState::AttesaPerizia),
            job("A", "X3", JobState::Pronta),
        ];
        let summary = state_counts(&jobs);
        assert_eq!(summary.total, 3);
        assert_eq!(
            summary.counts,
            vec![
                StateCount { stato: JobState::AttesaPerizia, count: 1 },
                StateCount { stato: JobState::Pronta, count: 2 },
            ]
        );
        assert_eq!(state_counts(std::iter::empty()), StateSummary::default());
    }

    #[test]
    fn report_skips_past_deliveries_and_sorts_by_count() {
        let today = Date::from_ymd(2024, 5, 31).unwrap();
        let delivered_on = |day: u8, targa: &str| {
            let mut j = job("A", targa, JobState::Consegnata);
            j.data_consegnata = Date::from_ymd(2024, 5, day).ok();
            j
        };
        let jobs = [
            job("A", "X1", JobState::AttesaPerizia),
            job("A", "X2", JobState::Pronta),
            job("A", "X3", JobState::Pronta),
            delivered_on(30, "X4"),
            delivered_on(31, "X5"),
        ];
        let report = state_report(&jobs, today);
        assert_eq!(report.total, 4);
        assert_eq!(
            report.counts,
            vec![
                StateCount { stato: JobState::Pronta, count: 2 },
                StateCount { stato: JobState::AttesaPerizia, count: 1 },
                StateCount { stato: JobState::Consegnata, count: 1 },
            ]
        );
        // All records, board order.
        assert_eq!(state_counts(&jobs).total, 5);
    }

    #[test]
    fn fleets_without_activity_get_zero_rows() {
        let j = job(" ald ", "X1", JobState::AttesaPerizia);
        let blank = job("  ", "X2", JobState::AttesaPerizia);
        let stats = monthly_fleet_stats([&j, &blank], 2024, 6);
        assert_eq!(
            stats,
            vec![FleetMonthStats { flotta: "ALD".into(), entrate: 0, consegnate: 0 }]
        );
    }

    #[test]
    fn finished_date_prefers_delivery() {
        let mut j = job("A", "X1", JobState::Pronta);
        j.fine_mecc = Date::from_ymd(2024, 5, 8).ok();
        j.fine_carr = Date::from_ymd(2024, 5, 10).ok();
        assert_eq!(finished_on(&j), Date::from_ymd(2024, 5, 10).ok());
        j.data_consegnata = Date::from_ymd(2024, 6, 3).ok();
        assert_eq!(finished_on(&j), Date::from_ymd(2024, 6, 3).ok());
        j.stato = JobState::AttesaRicambi;
        assert_eq!(finished_on(&j), None);
    }

    #[test]
    fn zero_divisors_give_zero() {
        assert_eq!(ratio(5.0, 0.0), 0.0);
        assert_eq!(ratio(6.0, 3.0), 2.0);
    }
}
