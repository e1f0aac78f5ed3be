//! Workflow states of a repair job.

use std::str::FromStr;

use b2b_core::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// Workflow state ("stato") of a repair job.
///
/// Variants are declared in status-board order.  The serialised form is the
/// Italian label shown to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum JobState {
    /// Awaiting the damage estimate.
    #[default]
    #[serde(rename = "Attesa Perizia")]
    AttesaPerizia,
    /// Awaiting the customer's authorisation.
    #[serde(rename = "Attesa Autorizzazione")]
    AttesaAutorizzazione,
    /// Awaiting spare parts.
    #[serde(rename = "Attesa Ricambi")]
    AttesaRicambi,
    /// Body work in progress.
    #[serde(rename = "Lavorazione Carr.")]
    LavorazioneCarrozzeria,
    /// Mechanical work in progress.
    #[serde(rename = "Lavorazione Mecc.")]
    LavorazioneMeccanica,
    /// Sent back to the manufacturer.
    #[serde(rename = "Casa Madre")]
    CasaMadre,
    /// Other work.
    #[serde(rename = "Altri Lavori")]
    AltriLavori,
    /// Ready for pickup.
    #[serde(rename = "Pronta")]
    Pronta,
    /// Delivered to the customer.
    #[serde(rename = "Consegnata")]
    Consegnata,
}

impl JobState {
    /// All states in status-board order.
    pub const ALL: [JobState; 9] = [
        JobState::AttesaPerizia,
        JobState::AttesaAutorizzazione,
        JobState::AttesaRicambi,
        JobState::LavorazioneCarrozzeria,
        JobState::LavorazioneMeccanica,
        JobState::CasaMadre,
        JobState::AltriLavori,
        JobState::Pronta,
        JobState::Consegnata,
    ];

    /// The Italian label.
    pub fn label(&self) -> &'static str {
        match self {
            JobState::AttesaPerizia => "Attesa Perizia",
            JobState::AttesaAutorizzazione => "Attesa Autorizzazione",
            JobState::AttesaRicambi => "Attesa Ricambi",
            JobState::LavorazioneCarrozzeria => "Lavorazione Carr.",
            JobState::LavorazioneMeccanica => "Lavorazione Mecc.",
            JobState::CasaMadre => "Casa Madre",
            JobState::AltriLavori => "Altri Lavori",
            JobState::Pronta => "Pronta",
            JobState::Consegnata => "Consegnata",
        }
    }

    /// Column index on the status board.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// `true` once the vehicle has been handed back.
    pub fn is_delivered(&self) -> bool {
        matches!(self, JobState::Consegnata)
    }

    /// `true` for states in which the repair is finished.
    pub fn is_finished(&self) -> bool {
        matches!(self, JobState::Pronta | JobState::Consegnata)
    }
}

impl FromStr for JobState {
    type Err = Error;

    /// Parses a label, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        JobState::ALL
            .into_iter()
            .find(|state| state.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::Parse {
                input: s.to_string(),
                expected: "a job state label",
            })
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
