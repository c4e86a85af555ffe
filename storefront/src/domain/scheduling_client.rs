//! Scheduling client: slot lookup and appointment submission.
//!
//! Appointment creation distinguishes four outcomes: booked, refused with a
//! server message, not authenticated (HTTP 401) and transport failure. The
//! 401 path is an expected branch that sends the user to login or signup; it
//! is never logged as an error.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{
    AppointmentReply, AuthChallenge, SchedulingApi, Scheduler, SlotQuery, SubmitEvent, View,
};
use crate::domain::{
    AppointmentDraft, FormField, NotificationWidget, PROFILE_PAGE, SUCCESS_REDIRECT_DELAY,
};

/// First, empty option of the slot selector.
pub const SLOT_PLACEHOLDER: &str = "Selecione um horário";
/// Banner shown after a booking.
pub const APPOINTMENT_BOOKED_MESSAGE: &str = "Agendamento realizado com sucesso!";
/// Alert shown on a 401 without a server message.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Você precisa fazer login para agendar";
/// Appended to the 401 message when offering signup or login.
pub const SIGNUP_OR_LOGIN_SUFFIX: &str =
    "\n\nClique OK para fazer o cadastro ou Cancelar para fazer login.";
/// Customer signup page.
pub const SIGNUP_PAGE: &str = "/cadastro-cliente";
/// Customer login page.
pub const LOGIN_PAGE: &str = "/login-cliente";

/// Result of a slot lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotLookup {
    /// Barber or date missing; no request was made.
    Skipped,
    /// The selector now offers these slots.
    Loaded(Vec<String>),
    /// The request failed; the selector is unchanged.
    Failed,
}

/// Which branch an appointment submission took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// Booked; the page leaves for the profile after a short delay.
    Booked {
        /// Identifier of the new appointment, when returned.
        appointment_id: Option<u64>,
    },
    /// The server refused; its message (if any) was alerted.
    Rejected {
        /// Server message.
        error: Option<String>,
    },
    /// Not authenticated; the page went to `destination`.
    AuthRequired {
        /// Login or signup location navigated to.
        destination: String,
    },
    /// The request failed in transport; logged only.
    Failed,
}

/// Appointment operations exposed to the booking page.
#[derive(Clone)]
pub struct SchedulingClient {
    api: Arc<dyn SchedulingApi>,
    view: Arc<dyn View>,
    scheduler: Arc<dyn Scheduler>,
    notifications: NotificationWidget,
}

impl SchedulingClient {
    /// Build a client over the given ports.
    pub fn new(
        api: Arc<dyn SchedulingApi>,
        view: Arc<dyn View>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        let notifications = NotificationWidget::new(Arc::clone(&view), Arc::clone(&scheduler));
        Self {
            api,
            view,
            scheduler,
            notifications,
        }
    }

    /// Refresh the slot selector for the selected barber and date.
    ///
    /// Does nothing when either selection is empty.
    pub async fn fetch_available_slots(&self) -> SlotLookup {
        let barbeiro_id = self.read(FormField::Barbeiro);
        let data = self.read(FormField::Data);
        if barbeiro_id.is_empty() || data.is_empty() {
            return SlotLookup::Skipped;
        }

        let query = SlotQuery { barbeiro_id, data };
        match self.api.available_slots(&query).await {
            Ok(slots) => {
                self.view.set_slot_options(SLOT_PLACEHOLDER, &slots);
                SlotLookup::Loaded(slots)
            }
            Err(error) => {
                warn!(%error, barbeiro_id = %query.barbeiro_id, data = %query.data, "slot lookup failed");
                SlotLookup::Failed
            }
        }
    }

    /// Submit the booking form.
    pub async fn create_appointment(&self, event: &dyn SubmitEvent) -> BookingOutcome {
        event.prevent_default();
        let draft = self.draft_from_form();

        match self.api.create_appointment(&draft).await {
            Ok(AppointmentReply::Created { appointment_id }) => {
                self.notifications.show(APPOINTMENT_BOOKED_MESSAGE);
                let view = Arc::clone(&self.view);
                self.scheduler.defer(
                    SUCCESS_REDIRECT_DELAY,
                    Box::pin(async move {
                        view.navigate(PROFILE_PAGE);
                    }),
                );
                BookingOutcome::Booked { appointment_id }
            }
            Ok(AppointmentReply::Rejected { error }) => {
                if let Some(message) = error.as_deref() {
                    self.view.alert(message);
                }
                BookingOutcome::Rejected { error }
            }
            Ok(AppointmentReply::AuthRequired(challenge)) => {
                let destination = self.challenge_login(challenge);
                debug!(%destination, "booking requires authentication");
                BookingOutcome::AuthRequired { destination }
            }
            Err(error) => {
                warn!(%error, "appointment submission failed");
                BookingOutcome::Failed
            }
        }
    }

    /// Send the user to signup or login after a 401.
    fn challenge_login(&self, challenge: AuthChallenge) -> String {
        let message = challenge
            .error
            .unwrap_or_else(|| LOGIN_REQUIRED_MESSAGE.to_owned());
        let destination = if challenge.require_auth {
            let wants_signup = self
                .view
                .confirm(&format!("{message}{SIGNUP_OR_LOGIN_SUFFIX}"));
            let page = if wants_signup { SIGNUP_PAGE } else { LOGIN_PAGE };
            page.to_owned()
        } else {
            self.view.alert(&message);
            challenge
                .redirect
                .filter(|target| !target.is_empty())
                .unwrap_or_else(|| LOGIN_PAGE.to_owned())
        };
        self.view.navigate(&destination);
        destination
    }

    fn draft_from_form(&self) -> AppointmentDraft {
        let mut draft = AppointmentDraft::default();
        for field in FormField::ALL {
            draft.set(field, self.read(field));
        }
        draft
    }

    fn read(&self, field: FormField) -> String {
        self.view.form_value(field).unwrap_or_default()
    }
}
