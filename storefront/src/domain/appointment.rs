//! Appointment drafts read from the booking form.

use serde::{Deserialize, Serialize};

/// Booking form fields the client reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Barber selector.
    Barbeiro,
    /// Service selector.
    Servico,
    /// Date input.
    Data,
    /// Time slot selector.
    Horario,
    /// Free-text notes.
    Observacoes,
}

impl FormField {
    /// Every booking field, in form order.
    pub const ALL: [Self; 5] = [
        Self::Barbeiro,
        Self::Servico,
        Self::Data,
        Self::Horario,
        Self::Observacoes,
    ];

    /// Document element identifier of the field.
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Barbeiro => "barbeiro",
            Self::Servico => "servico",
            Self::Data => "data",
            Self::Horario => "horario",
            Self::Observacoes => "observacoes",
        }
    }
}

/// Appointment submitted to `/criar-agendamento`.
///
/// Values are kept exactly as the form holds them; validation happens on the
/// server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDraft {
    /// Selected barber identifier.
    pub barbeiro_id: String,
    /// Selected service identifier.
    pub servico_id: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub data: String,
    /// Time slot, `HH:MM`.
    pub horario: String,
    /// Customer notes.
    pub observacoes: String,
}

impl AppointmentDraft {
    /// Value carried for `field`.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Barbeiro => &self.barbeiro_id,
            FormField::Servico => &self.servico_id,
            FormField::Data => &self.data,
            FormField::Horario => &self.horario,
            FormField::Observacoes => &self.observacoes,
        }
    }

    /// Set the value carried for `field`.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Barbeiro => self.barbeiro_id = value,
            FormField::Servico => self.servico_id = value,
            FormField::Data => self.data = value,
            FormField::Horario => self.horario = value,
            FormField::Observacoes => self.observacoes = value,
        }
    }
}

/// Draft stashed by the server when a booking hit the login wall.
///
/// Every key may be missing. Empty strings are treated as missing so the
/// resumer never overwrites a field with nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAppointment {
    /// Stored barber identifier.
    #[serde(default)]
    pub barbeiro_id: Option<String>,
    /// Stored service identifier.
    #[serde(default)]
    pub servico_id: Option<String>,
    /// Stored date.
    #[serde(default)]
    pub data: Option<String>,
    /// Stored time slot.
    #[serde(default)]
    pub horario: Option<String>,
    /// Stored notes.
    #[serde(default)]
    pub observacoes: Option<String>,
}

impl PendingAppointment {
    /// Non-empty stored value for `field`.
    pub fn value(&self, field: FormField) -> Option<&str> {
        let raw = match field {
            FormField::Barbeiro => &self.barbeiro_id,
            FormField::Servico => &self.servico_id,
            FormField::Data => &self.data,
            FormField::Horario => &self.horario,
            FormField::Observacoes => &self.observacoes,
        };
        raw.as_deref().filter(|value| !value.is_empty())
    }
}

impl From<AppointmentDraft> for PendingAppointment {
    fn from(draft: AppointmentDraft) -> Self {
        Self {
            barbeiro_id: Some(draft.barbeiro_id),
            servico_id: Some(draft.servico_id),
            data: Some(draft.data),
            horario: Some(draft.horario),
            observacoes: Some(draft.observacoes),
        }
    }
}
