//! Reqwest-backed adapter for the storefront endpoints.
//!
//! This adapter owns transport details only: URL resolution, the session
//! cookie jar, timeouts, error mapping and envelope decoding. Application
//! failures arrive with error statuses (400, 404, 409) and are still decoded
//! as envelopes; only a 401 from appointment creation changes meaning.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::dto::{
    AppointmentEnvelopeDto, CartEnvelopeDto, CartItemBody, CheckoutBody, CheckoutEnvelopeDto,
    PendingEnvelopeDto, RemoveBody, RestoreBody, SlotQueryBody, SlotsDto,
};
use crate::domain::ports::{
    AppointmentReply, CartApi, CartApiError, CartItemRequest, CartReply, CheckoutReply,
    CheckoutRequest, RemoveFromCartRequest, SchedulingApi, SchedulingApiError, SlotQuery,
};
use crate::domain::{AppointmentDraft, CartSnapshot, PendingAppointment};

const ADD_TO_CART_PATH: &str = "adicionar-carrinho";
const CHANGE_QUANTITY_PATH: &str = "alterar-quantidade-carrinho";
const REMOVE_FROM_CART_PATH: &str = "remover-carrinho";
const CLEAR_CART_PATH: &str = "limpar-carrinho";
const RESTORE_CART_PATH: &str = "restaurar-carrinho";
const CHECKOUT_PATH: &str = "finalizar-pedido";
const AVAILABLE_SLOTS_PATH: &str = "horarios-disponiveis";
const CREATE_APPOINTMENT_PATH: &str = "criar-agendamento";
const PENDING_APPOINTMENT_PATH: &str = "obter-agendamento-pendente";

/// Transport failure before it is attributed to a port.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ExchangeError {
    Transport(String),
    Timeout(String),
    Decode(String),
}

impl From<ExchangeError> for CartApiError {
    fn from(error: ExchangeError) -> Self {
        match error {
            ExchangeError::Transport(message) => Self::transport(message),
            ExchangeError::Timeout(message) => Self::timeout(message),
            ExchangeError::Decode(message) => Self::decode(message),
        }
    }
}

impl From<ExchangeError> for SchedulingApiError {
    fn from(error: ExchangeError) -> Self {
        match error {
            ExchangeError::Transport(message) => Self::transport(message),
            ExchangeError::Timeout(message) => Self::timeout(message),
            ExchangeError::Decode(message) => Self::decode(message),
        }
    }
}

/// Raw reply: status plus body bytes.
struct Exchange {
    status: StatusCode,
    body: Vec<u8>,
}

impl Exchange {
    fn decode<T: DeserializeOwned>(&self, path: &str) -> Result<T, ExchangeError> {
        serde_json::from_slice(&self.body).map_err(|error| {
            let preview = body_preview(&self.body);
            ExchangeError::Decode(if preview.is_empty() {
                format!(
                    "invalid JSON from {path} (status {}): {error}",
                    self.status.as_u16()
                )
            } else {
                format!(
                    "invalid JSON from {path} (status {}): {error}; body: {preview}",
                    self.status.as_u16()
                )
            })
        })
    }
}

/// HTTP implementation of [`CartApi`] and [`SchedulingApi`] against one
/// storefront origin.
///
/// The client keeps cookies, so the server-side cart and pending
/// appointment follow it across calls, exactly as they follow a browser tab.
pub struct StorefrontHttpApi {
    client: Client,
    base_url: Url,
}

impl StorefrontHttpApi {
    /// Build an adapter for the storefront served at `base_url`.
    ///
    /// Requests never time out unless `timeout` is given. A path on
    /// `base_url` is kept as a prefix for every endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: with_trailing_slash(base_url),
        })
    }

    /// Origin (and path prefix) the adapter talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ExchangeError> {
        self.base_url.join(path).map_err(|error| {
            ExchangeError::Transport(format!("cannot resolve {path} against {}: {error}", self.base_url))
        })
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Exchange, ExchangeError> {
        let mut request = self
            .client
            .post(self.endpoint(path)?)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(map_transport_error)?;
        read_exchange(response).await
    }

    async fn get(&self, path: &str) -> Result<Exchange, ExchangeError> {
        let response = self
            .client
            .get(self.endpoint(path)?)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;
        read_exchange(response).await
    }

    async fn cart_call<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<CartReply, CartApiError> {
        let exchange = self.post(path, body).await?;
        let envelope: CartEnvelopeDto = exchange.decode(path)?;
        Ok(envelope.into())
    }
}

async fn read_exchange(response: reqwest::Response) -> Result<Exchange, ExchangeError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    Ok(Exchange {
        status,
        body: body.to_vec(),
    })
}

#[async_trait]
impl CartApi for StorefrontHttpApi {
    async fn add(&self, request: &CartItemRequest) -> Result<CartReply, CartApiError> {
        self.cart_call(ADD_TO_CART_PATH, Some(&CartItemBody::from(request)))
            .await
    }

    async fn change_quantity(&self, request: &CartItemRequest) -> Result<CartReply, CartApiError> {
        self.cart_call(CHANGE_QUANTITY_PATH, Some(&CartItemBody::from(request)))
            .await
    }

    async fn remove(&self, request: &RemoveFromCartRequest) -> Result<CartReply, CartApiError> {
        self.cart_call(REMOVE_FROM_CART_PATH, Some(&RemoveBody::from(request)))
            .await
    }

    async fn clear(&self) -> Result<CartReply, CartApiError> {
        self.cart_call::<()>(CLEAR_CART_PATH, None).await
    }

    async fn restore(&self, snapshot: &CartSnapshot) -> Result<CartReply, CartApiError> {
        self.cart_call(
            RESTORE_CART_PATH,
            Some(&RestoreBody {
                carrinho: snapshot,
            }),
        )
        .await
    }

    async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutReply, CartApiError> {
        let exchange = self
            .post(CHECKOUT_PATH, Some(&CheckoutBody::from(request)))
            .await?;
        let envelope: CheckoutEnvelopeDto = exchange.decode(CHECKOUT_PATH)?;
        Ok(envelope.into())
    }
}

#[async_trait]
impl SchedulingApi for StorefrontHttpApi {
    async fn available_slots(&self, query: &SlotQuery) -> Result<Vec<String>, SchedulingApiError> {
        let exchange = self
            .post(AVAILABLE_SLOTS_PATH, Some(&SlotQueryBody::from(query)))
            .await?;
        let slots: SlotsDto = exchange.decode(AVAILABLE_SLOTS_PATH)?;
        Ok(slots.horarios)
    }

    async fn create_appointment(
        &self,
        draft: &AppointmentDraft,
    ) -> Result<AppointmentReply, SchedulingApiError> {
        let exchange = self.post(CREATE_APPOINTMENT_PATH, Some(draft)).await?;
        let envelope: AppointmentEnvelopeDto = exchange.decode(CREATE_APPOINTMENT_PATH)?;
        Ok(envelope.into_reply(exchange.status))
    }

    async fn pending_appointment(&self) -> Result<Option<PendingAppointment>, SchedulingApiError> {
        let exchange = self.get(PENDING_APPOINTMENT_PATH).await?;
        let envelope: PendingEnvelopeDto = exchange.decode(PENDING_APPOINTMENT_PATH)?;
        Ok(envelope.into_pending())
    }
}

fn with_trailing_slash(mut base_url: Url) -> Url {
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }
    base_url
}

fn map_transport_error(error: reqwest::Error) -> ExchangeError {
    if error.is_timeout() {
        ExchangeError::Timeout(error.to_string())
    } else {
        ExchangeError::Transport(error.to_string())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
