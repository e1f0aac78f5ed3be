//! Integration tests: a month of workshop activity run through the register,
//! the notification list, the status board and the monthly reports.
//!
//! The reference day is Friday 31 May 2024.  Business days elapsed since
//! assignment (Italy, May 1 closed): 2 May → 22, 9 May → 17, 16 May → 12,
//! 20 May → 10.

use std::collections::BTreeMap;

use approx::assert_relative_eq;
use b2b_core::ScopedEvaluationDate;
use b2b_jobs::{
    bucket_counts, contractor_recap, monthly_fleet_stats, overdue_jobs, state_counts,
    state_report, AgingBucket, AgingThresholds, CellMarker, FleetMonthStats, JobIntake,
    JobRegister, JobState, JobUpdate, StatusBoard, WorkshopConfig,
};
use b2b_time::{Calendar, Date, Italy};

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn today() -> Date {
    date(2024, 5, 31)
}

fn intake(flotta: &str, targa: &str, incarico: &str) -> JobIntake {
    JobIntake {
        flotta: flotta.into(),
        targa: targa.into(),
        modello: "PANDA".into(),
        entrata: incarico.into(),
        data_incarico: incarico.into(),
    }
}

fn workshop() -> JobRegister {
    let cal = Italy::new();
    let cfg = WorkshopConfig::default();
    let mut register = JobRegister::new();
    for input in [
        intake("leasys", "AA001AA", "02/05/2024"),
        intake("leasys", "BB002BB", "09/05/2024"),
        intake("ald", "CC003CC", "16/05/2024"),
        intake("ald", "DD004DD", "20/05/2024"),
        intake("arval", "EE005EE", "02/05/2024"),
        intake("arval", "FF006FF", "06/05/2024"),
    ] {
        register.insert(input.build_record(&cal, &cfg).unwrap()).unwrap();
    }

    let edit = |register: &mut JobRegister, targa: &str, update: JobUpdate, on: Date| {
        let key = register.find_by_targa(targa)[0].key();
        register
            .update(&key, |job| job.apply_update(&update, &cal, on))
            .unwrap();
    };

    edit(
        &mut register,
        "BB002BB",
        JobUpdate {
            ditta: "officina bianchi".into(),
            fine_carr: "28/05/2024".into(),
            inizio_carr: "20/05/2024".into(),
            pezzi_carr: 3,
            stato: JobState::Pronta,
            ..JobUpdate::default()
        },
        date(2024, 5, 28),
    );
    edit(
        &mut register,
        "EE005EE",
        JobUpdate {
            ditta: "carrozzeria rossi".into(),
            pezzi_carr: 6,
            stato: JobState::Consegnata,
            ..JobUpdate::default()
        },
        today(),
    );
    edit(
        &mut register,
        "FF006FF",
        JobUpdate {
            ditta: "carrozzeria rossi".into(),
            pezzi_carr: 4,
            stato: JobState::Consegnata,
            ..JobUpdate::default()
        },
        date(2024, 5, 30),
    );
    register
}

#[test]
fn default_config_matches_workshop_rules() {
    let cfg = WorkshopConfig::default();
    assert_eq!(cfg.delivery_lead_days, 10);
    assert_eq!(cfg.aging, AgingThresholds::default());
    assert_eq!(cfg.calendar().name(), "Italy");
}

#[test]
fn notifications_oldest_first() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let register = workshop();
    let cal = Italy::new();
    let list = overdue_jobs(&register, &cal, today(), &AgingThresholds::default(), "");

    let rows: Vec<_> = list
        .iter()
        .map(|n| (n.job.targa.as_str(), n.working_days, n.bucket))
        .collect();
    assert_eq!(
        rows,
        [
            ("AA001AA", 22, AgingBucket::Overdue),
            ("BB002BB", 17, AgingBucket::Late),
            ("CC003CC", 12, AgingBucket::Warning),
        ]
    );

    assert_eq!(
        bucket_counts(&list),
        [
            (AgingBucket::Warning, 1),
            (AgingBucket::Late, 1),
            (AgingBucket::Overdue, 1),
        ]
    );

    let filtered = overdue_jobs(&register, &cal, today(), &AgingThresholds::default(), "bb0");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].job.targa, "BB002BB");
}

#[test]
fn notification_search_covers_fleet_and_contractor() {
    let register = workshop();
    let cal = Italy::new();
    let thresholds = AgingThresholds::default();

    // DD004DD is ALD too, but still within the warning threshold.
    let by_fleet = overdue_jobs(&register, &cal, today(), &thresholds, "ald");
    let plates: Vec<_> = by_fleet.iter().map(|n| n.job.targa.as_str()).collect();
    assert_eq!(plates, ["CC003CC"]);

    let by_ditta = overdue_jobs(&register, &cal, today(), &thresholds, "Bianchi");
    assert_eq!(by_ditta.len(), 1);
    assert_eq!(by_ditta[0].bucket, AgingBucket::Late);
    assert_eq!(
        bucket_counts(&by_ditta),
        [
            (AgingBucket::Warning, 0),
            (AgingBucket::Late, 1),
            (AgingBucket::Overdue, 0),
        ]
    );

    // Rossi's jobs are delivered.
    assert!(overdue_jobs(&register, &cal, today(), &thresholds, "rossi").is_empty());
}

#[test]
fn notifications_on_evaluation_date() {
    let _guard = ScopedEvaluationDate::new(today().serial());
    let register = workshop();
    let list = overdue_jobs(
        register.iter(),
        &Italy::new(),
        Date::evaluation_date().unwrap(),
        &AgingThresholds::default(),
        "",
    );
    assert_eq!(list.len(), 3);
}

#[test]
fn status_board_layout() {
    let register = workshop();
    let cal = Italy::new();
    let board = StatusBoard::build(&register, &cal, today(), &AgingThresholds::default(), "");

    // FF006FF was delivered yesterday and is off the board.
    assert_eq!(board.total(), 5);
    assert_eq!(board.row_count(), 3);

    let waiting: Vec<_> = board
        .column(JobState::AttesaPerizia)
        .iter()
        .map(|c| (c.targa.as_str(), c.marker))
        .collect();
    assert_eq!(
        waiting,
        [
            ("AA001AA", CellMarker::Aging(AgingBucket::Overdue)),
            ("CC003CC", CellMarker::Aging(AgingBucket::Warning)),
            ("DD004DD", CellMarker::Unflagged),
        ]
    );
    assert_eq!(board.column(JobState::Consegnata)[0].marker, CellMarker::Delivered);
    assert_eq!(board.column(JobState::Pronta)[0].targa, "BB002BB");

    let consegnata_col = JobState::Consegnata.index();
    assert_eq!(board.cell(0, consegnata_col).map(|c| c.targa.as_str()), Some("EE005EE"));
    assert!(board.cell(1, consegnata_col).is_none());

    let counts = board.column_counts();
    assert_eq!(counts[0], (JobState::AttesaPerizia, 3));
    assert_eq!(counts[7], (JobState::Pronta, 1));
    assert_eq!(board.rows().count(), 3);
}

#[test]
fn status_board_filter() {
    let register = workshop();
    let cal = Italy::new();
    let thresholds = AgingThresholds::default();

    let by_ditta = StatusBoard::build(&register, &cal, today(), &thresholds, "rossi");
    assert_eq!(by_ditta.total(), 1);
    assert_eq!(by_ditta.column(JobState::Consegnata)[0].targa, "EE005EE");

    let by_fleet = StatusBoard::build(&register, &cal, today(), &thresholds, " Leasys ");
    assert_eq!(by_fleet.total(), 2);
}

#[test]
fn state_summary() {
    let register = workshop();
    let summary = state_counts(&register);
    assert_eq!(summary.total, 6);
    let counts: Vec<_> = summary.counts.iter().map(|c| (c.stato, c.count)).collect();
    assert_eq!(
        counts,
        [
            (JobState::AttesaPerizia, 3),
            (JobState::Pronta, 1),
            (JobState::Consegnata, 2),
        ]
    );
}

#[test]
fn fleet_stats_for_may() {
    let register = workshop();
    let rows = |counts: [(&str, usize, usize); 3]| {
        counts.map(|(flotta, entrate, consegnate)| FleetMonthStats {
            flotta: flotta.into(),
            entrate,
            consegnate,
        })
    };
    assert_eq!(
        monthly_fleet_stats(&register, 2024, 5),
        rows([("ALD", 2, 0), ("ARVAL", 2, 2), ("LEASYS", 2, 0)])
    );
    // Every fleet keeps its row in a quiet month.
    assert_eq!(
        monthly_fleet_stats(&register, 2024, 6),
        rows([("ALD", 0, 0), ("ARVAL", 0, 0), ("LEASYS", 0, 0)])
    );
}

#[test]
fn state_report_as_of_today() {
    let register = workshop();
    // FF006FF, delivered yesterday, is no longer reported.
    let report = state_report(&register, today());
    assert_eq!(report.total, 5);
    let counts: Vec<_> = report.counts.iter().map(|c| (c.stato, c.count)).collect();
    assert_eq!(
        counts,
        [
            (JobState::AttesaPerizia, 3),
            (JobState::Pronta, 1),
            (JobState::Consegnata, 1),
        ]
    );
}

#[test]
fn contractor_recap_for_may() {
    let register = workshop();
    let cal = Italy::new();
    assert_eq!(cal.business_days_in_month(2024, 5).unwrap(), 22);

    let operators = BTreeMap::from([("CARROZZERIA ROSSI".to_string(), 2)]);
    let recap = contractor_recap(&register, &cal, 2024, 5, &operators).unwrap();
    assert_eq!(recap.len(), 2);

    let rossi = &recap[0];
    assert_eq!(rossi.ditta, "CARROZZERIA ROSSI");
    assert_eq!(rossi.operators, 2);
    assert_eq!(rossi.working_days, 22);
    assert_eq!(rossi.vehicles_finished, 2);
    assert_eq!(rossi.total_parts, 10);
    assert_relative_eq!(rossi.avg_vehicles_per_day, 2.0 / 22.0);
    assert_relative_eq!(rossi.avg_parts_per_vehicle, 5.0);
    assert_relative_eq!(rossi.avg_parts_per_day, 10.0 / 22.0);
    assert_relative_eq!(rossi.avg_parts_per_operator_per_day, 10.0 / 44.0);

    // Finished on its last end-of-work date; no operators on record.
    let bianchi = &recap[1];
    assert_eq!(bianchi.ditta, "OFFICINA BIANCHI");
    assert_eq!(bianchi.vehicles_finished, 1);
    assert_eq!(bianchi.total_parts, 3);
    assert_relative_eq!(bianchi.avg_parts_per_operator_per_day, 0.0);

    assert!(contractor_recap(&register, &cal, 2024, 6, &operators)
        .unwrap()
        .is_empty());
    assert!(contractor_recap(&register, &cal, 2024, 13, &operators).is_err());
}

#[test]
fn weekends_only_config_counts_holidays_as_workdays() {
    let cfg = WorkshopConfig::from_json(r#"{ "calendar": "weekends_only" }"#).unwrap();
    let cal = cfg.calendar();
    let record = intake("ald", "GG007GG", "02/05/2024")
        .build_record(cal.as_ref(), &cfg)
        .unwrap();
    assert_eq!(record.elapsed_business_days(cal.as_ref(), today()), 22);
    // May 1 counts when only weekends are closed.
    assert_eq!(cal.business_days_in_month(2024, 5).unwrap(), 23);
}
