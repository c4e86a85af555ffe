//! Driven port for the appointment endpoints.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{AppointmentDraft, PendingAppointment};

/// Body of `/horarios-disponiveis`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotQuery {
    /// Barber whose agenda is queried.
    pub barbeiro_id: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub data: String,
}

/// Body of an HTTP 401 from `/criar-agendamento`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthChallenge {
    /// Message explaining why login is needed.
    pub error: Option<String>,
    /// Offer the signup-or-login choice instead of a plain login redirect.
    pub require_auth: bool,
    /// Server-suggested login location.
    pub redirect: Option<String>,
}

/// Outcome of `/criar-agendamento`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentReply {
    /// The appointment was booked.
    Created {
        /// Identifier of the new appointment, when the server returns one.
        appointment_id: Option<u64>,
    },
    /// The server refused the booking.
    Rejected {
        /// Human-readable reason.
        error: Option<String>,
    },
    /// The session is not authenticated (HTTP 401).
    AuthRequired(AuthChallenge),
}

define_port_error! {
    /// Transport-level failures talking to the appointment endpoints.
    pub enum SchedulingApiError {
        /// The request never produced a response.
        Transport { message: String } =>
            "scheduling request failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "scheduling request timed out: {message}",
        /// The response body was not the expected JSON shape.
        Decode { message: String } =>
            "scheduling response decode failed: {message}",
    }
}

/// Port for the appointment endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchedulingApi: Send + Sync {
    /// POST `/horarios-disponiveis`; slots in server order.
    async fn available_slots(&self, query: &SlotQuery) -> Result<Vec<String>, SchedulingApiError>;

    /// POST `/criar-agendamento`.
    async fn create_appointment(
        &self,
        draft: &AppointmentDraft,
    ) -> Result<AppointmentReply, SchedulingApiError>;

    /// GET `/obter-agendamento-pendente`; `None` when nothing is stashed.
    async fn pending_appointment(&self) -> Result<Option<PendingAppointment>, SchedulingApiError>;
}

/// Fixture implementation with an empty agenda and no pending draft.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSchedulingApi;

#[async_trait]
impl SchedulingApi for FixtureSchedulingApi {
    async fn available_slots(&self, _query: &SlotQuery) -> Result<Vec<String>, SchedulingApiError> {
        Ok(Vec::new())
    }

    async fn create_appointment(
        &self,
        _draft: &AppointmentDraft,
    ) -> Result<AppointmentReply, SchedulingApiError> {
        Ok(AppointmentReply::Created {
            appointment_id: None,
        })
    }

    async fn pending_appointment(&self) -> Result<Option<PendingAppointment>, SchedulingApiError> {
        Ok(None)
    }
}
