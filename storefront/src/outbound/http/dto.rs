//! Wire DTOs for the storefront JSON endpoints.
//!
//! Requests borrow from the port types. Replies decode into envelope DTOs
//! first and then map into port replies in one pass.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ports::{
    AppointmentReply, AuthChallenge, CartItemRequest, CartReply, CheckoutReply, CheckoutRequest,
    RemoveFromCartRequest, SlotQuery,
};
use crate::domain::{CartCount, CartSnapshot, ItemKind, PendingAppointment};

#[derive(Debug, Serialize)]
pub(super) struct CartItemBody {
    tipo: ItemKind,
    id: u64,
    quantidade: u32,
}

impl From<&CartItemRequest> for CartItemBody {
    fn from(request: &CartItemRequest) -> Self {
        Self {
            tipo: request.tipo,
            id: request.id,
            quantidade: request.quantidade,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RemoveBody {
    tipo: ItemKind,
    id: u64,
}

impl From<&RemoveFromCartRequest> for RemoveBody {
    fn from(request: &RemoveFromCartRequest) -> Self {
        Self {
            tipo: request.tipo,
            id: request.id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RestoreBody<'a> {
    pub(super) carrinho: &'a CartSnapshot,
}

#[derive(Debug, Serialize)]
pub(super) struct SlotQueryBody<'a> {
    barbeiro_id: &'a str,
    data: &'a str,
}

impl<'a> From<&'a SlotQuery> for SlotQueryBody<'a> {
    fn from(query: &'a SlotQuery) -> Self {
        Self {
            barbeiro_id: &query.barbeiro_id,
            data: &query.data,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CheckoutBody<'a> {
    metodo_pagamento: &'a str,
    observacoes: &'a str,
}

impl<'a> From<&'a CheckoutRequest> for CheckoutBody<'a> {
    fn from(request: &'a CheckoutRequest) -> Self {
        Self {
            metodo_pagamento: &request.metodo_pagamento,
            observacoes: &request.observacoes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CartEnvelopeDto {
    #[serde(default)]
    success: bool,
    error: Option<String>,
    count: Option<CartCount>,
    carrinho: Option<CartSnapshot>,
}

impl From<CartEnvelopeDto> for CartReply {
    fn from(dto: CartEnvelopeDto) -> Self {
        Self {
            success: dto.success,
            error: dto.error,
            count: dto.count,
            carrinho: dto.carrinho,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CheckoutEnvelopeDto {
    #[serde(default)]
    success: bool,
    error: Option<String>,
    pedido_id: Option<u64>,
    status: Option<String>,
}

impl From<CheckoutEnvelopeDto> for CheckoutReply {
    fn from(dto: CheckoutEnvelopeDto) -> Self {
        Self {
            success: dto.success,
            error: dto.error,
            pedido_id: dto.pedido_id,
            status: dto.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SlotsDto {
    #[serde(default)]
    pub(super) horarios: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct AppointmentEnvelopeDto {
    #[serde(default)]
    success: bool,
    error: Option<String>,
    agendamento_id: Option<u64>,
    #[serde(default)]
    require_auth: bool,
    redirect: Option<String>,
}

impl AppointmentEnvelopeDto {
    /// A 401 is an auth challenge whatever `success` says.
    pub(super) fn into_reply(self, status: StatusCode) -> AppointmentReply {
        if status == StatusCode::UNAUTHORIZED {
            return AppointmentReply::AuthRequired(AuthChallenge {
                error: self.error,
                require_auth: self.require_auth,
                redirect: self.redirect,
            });
        }
        if self.success {
            AppointmentReply::Created {
                appointment_id: self.agendamento_id,
            }
        } else {
            AppointmentReply::Rejected { error: self.error }
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PendingEnvelopeDto {
    #[serde(default)]
    success: bool,
    agendamento: Option<PendingDraftDto>,
}

impl PendingEnvelopeDto {
    pub(super) fn into_pending(self) -> Option<PendingAppointment> {
        let Self {
            success,
            agendamento,
        } = self;
        agendamento
            .filter(|_| success)
            .map(PendingDraftDto::into_domain)
    }
}

/// The server echoes back whatever the form posted, so ids may arrive as
/// strings or numbers.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct PendingDraftDto {
    barbeiro_id: Value,
    servico_id: Value,
    data: Value,
    horario: Value,
    observacoes: Value,
}

impl PendingDraftDto {
    fn into_domain(self) -> PendingAppointment {
        PendingAppointment {
            barbeiro_id: loose_string(self.barbeiro_id),
            servico_id: loose_string(self.servico_id),
            data: loose_string(self.data),
            horario: loose_string(self.horario),
            observacoes: loose_string(self.observacoes),
        }
    }
}

fn loose_string(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
