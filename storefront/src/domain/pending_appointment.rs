//! Resumes a booking interrupted by the login wall.
//!
//! When a guest submits the booking form the server stashes the draft in the
//! session and answers 401. After login the server sends the user back with
//! `?processar_agendamento=true`; on that load the resumer fetches the stashed
//! draft and puts it back into the form.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::domain::ports::{SchedulingApi, Scheduler, View};
use crate::domain::{FormField, NotificationWidget, PendingAppointment, SchedulingClient};

/// Query parameter requesting the resume flow.
pub const RESUME_QUERY_PARAM: &str = "processar_agendamento";
/// Banner shown once the form is repopulated.
pub const RESUME_MESSAGE: &str = "Você pode continuar seu agendamento!";
/// Wait before reselecting the stored slot, letting the selector repopulate.
pub const SLOT_RESELECT_DELAY: Duration = Duration::from_millis(500);

/// Which branch the resume flow took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// The page was not opened with the resume flag.
    NotRequested,
    /// The server had no stashed draft.
    NothingPending,
    /// The form was repopulated from the stashed draft.
    Restored,
    /// Fetching the draft failed; logged only.
    Failed,
}

/// Whether `page_url` asks for the resume flow.
///
/// Only the first occurrence of the parameter counts and it must be exactly
/// `true`.
pub fn resume_requested(page_url: &Url) -> bool {
    page_url
        .query_pairs()
        .find(|(key, _)| key == RESUME_QUERY_PARAM)
        .is_some_and(|(_, value)| value == "true")
}

/// Runs the resume flow once per page load.
#[derive(Clone)]
pub struct PendingAppointmentResumer {
    api: Arc<dyn SchedulingApi>,
    view: Arc<dyn View>,
    scheduler: Arc<dyn Scheduler>,
    scheduling: SchedulingClient,
    notifications: NotificationWidget,
}

impl PendingAppointmentResumer {
    /// Build a resumer. Slot lookups go through `scheduling`.
    pub fn new(
        api: Arc<dyn SchedulingApi>,
        view: Arc<dyn View>,
        scheduler: Arc<dyn Scheduler>,
        scheduling: SchedulingClient,
    ) -> Self {
        let notifications = NotificationWidget::new(Arc::clone(&view), Arc::clone(&scheduler));
        Self {
            api,
            view,
            scheduler,
            scheduling,
            notifications,
        }
    }

    /// Repopulate the booking form if `page_url` requests it.
    ///
    /// Each field is written only when both the form field and the stored
    /// value exist. A restored date triggers a slot lookup and, after
    /// [`SLOT_RESELECT_DELAY`], reselects the stored slot if it is still
    /// offered.
    pub async fn resume(&self, page_url: &Url) -> ResumeOutcome {
        if !resume_requested(page_url) {
            return ResumeOutcome::NotRequested;
        }

        let pending = match self.api.pending_appointment().await {
            Ok(Some(pending)) => pending,
            Ok(None) => {
                debug!("no pending appointment to resume");
                return ResumeOutcome::NothingPending;
            }
            Err(error) => {
                warn!(%error, "failed to fetch pending appointment");
                return ResumeOutcome::Failed;
            }
        };

        self.restore_field(&pending, FormField::Barbeiro);
        self.restore_field(&pending, FormField::Servico);
        let date_restored = self.restore_field(&pending, FormField::Data);
        self.restore_field(&pending, FormField::Observacoes);

        if date_restored {
            self.scheduling.fetch_available_slots().await;
            self.reselect_slot_later(pending.value(FormField::Horario));
        }

        self.notifications.show(RESUME_MESSAGE);
        ResumeOutcome::Restored
    }

    fn restore_field(&self, pending: &PendingAppointment, field: FormField) -> bool {
        let Some(value) = pending.value(field) else {
            return false;
        };
        if self.view.form_value(field).is_none() {
            return false;
        }
        self.view.set_form_value(field, value);
        true
    }

    fn reselect_slot_later(&self, horario: Option<&str>) {
        let Some(horario) = horario.map(str::to_owned) else {
            return;
        };
        let view = Arc::clone(&self.view);
        self.scheduler.defer(
            SLOT_RESELECT_DELAY,
            Box::pin(async move {
                let offered = view.slot_options().iter().any(|slot| *slot == horario);
                if offered && view.form_value(FormField::Horario).is_some() {
                    view.set_form_value(FormField::Horario, &horario);
                } else {
                    debug!(%horario, "stored slot no longer offered");
                }
            }),
        );
    }
}
