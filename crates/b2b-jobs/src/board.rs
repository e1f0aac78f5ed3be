//! Status board: one column per workflow state.
//!
//! The board shows every open job plus the jobs delivered today.  Columns
//! follow [`JobState::ALL`] and keep the order the jobs were given in.

use b2b_core::Size;
use b2b_time::{Calendar, Date};
use serde::Serialize;
use tracing::debug;

use crate::aging::{AgingBucket, AgingThresholds};
use crate::record::JobRecord;
use crate::state::JobState;

/// Colour marker of a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CellMarker {
    /// Delivered today.
    Delivered,
    /// Open and past the warning threshold.
    Aging(AgingBucket),
    /// Open and within the warning threshold.
    Unflagged,
}

impl CellMarker {
    /// Cell colour, `None` for an unflagged job.
    pub fn color(&self) -> Option<&'static str> {
        match self {
            CellMarker::Delivered => Some("green"),
            CellMarker::Aging(bucket) => Some(bucket.color()),
            CellMarker::Unflagged => None,
        }
    }
}

/// A job on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardCell {
    /// Licence plate.
    pub targa: String,
    /// Colour marker.
    pub marker: CellMarker,
}

/// Jobs grouped by state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusBoard {
    columns: [Vec<BoardCell>; 9],
}

impl StatusBoard {
    /// Build the board.
    ///
    /// A non-empty `filter` keeps jobs whose fleet, plate or contractor
    /// contains it, ignoring case.
    pub fn build<'a, I>(
        jobs: I,
        calendar: &dyn Calendar,
        today: Date,
        thresholds: &AgingThresholds,
        filter: &str,
    ) -> Self
    where
        I: IntoIterator<Item = &'a JobRecord>,
    {
        let mut board = Self::default();
        for job in jobs {
            let visible = !job.stato.is_delivered() || job.data_consegnata == Some(today);
            if !visible || !job.matches(filter) {
                continue;
            }
            let marker = if job.stato.is_delivered() {
                CellMarker::Delivered
            } else {
                thresholds
                    .classify(job.elapsed_business_days(calendar, today))
                    .map_or(CellMarker::Unflagged, CellMarker::Aging)
            };
            board.columns[job.stato.index()].push(BoardCell {
                targa: job.targa.clone(),
                marker,
            });
        }
        debug!(total = board.total(), rows = board.row_count(), %today, "status board");
        board
    }

    /// Cells in the column of `state`.
    pub fn column(&self, state: JobState) -> &[BoardCell] {
        &self.columns[state.index()]
    }

    /// Number of jobs per state, in board order.
    pub fn column_counts(&self) -> [(JobState, Size); 9] {
        JobState::ALL.map(|s| (s, self.columns[s.index()].len()))
    }

    /// Total number of jobs on the board.
    pub fn total(&self) -> Size {
        self.columns.iter().map(Vec::len).sum()
    }

    /// Length of the longest column.
    pub fn row_count(&self) -> Size {
        self.columns.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Cell at `row` of column `col`, if any.
    pub fn cell(&self, row: Size, col: Size) -> Option<&BoardCell> {
        self.columns.get(col)?.get(row)
    }

    /// Iterate rows, each one cell slot per column.
    pub fn rows(&self) -> impl Iterator<Item = [Option<&BoardCell>; 9]> + '_ {
        (0..self.row_count()).map(move |row| std::array::from_fn(|col| self.cell(row, col)))
    }
}
