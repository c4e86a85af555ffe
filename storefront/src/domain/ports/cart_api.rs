//! Driven port for the remote cart endpoints.
//!
//! One method per endpoint. The server answers application failures with a
//! `success: false` reply rather than a transport error, so only network and
//! decoding problems surface as [`CartApiError`].

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{CartCount, CartSnapshot, ItemKind};

/// Body of `/adicionar-carrinho` and `/alterar-quantidade-carrinho`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemRequest {
    /// Item category.
    pub tipo: ItemKind,
    /// Item identifier.
    pub id: u64,
    /// Quantity to add, or the new absolute quantity.
    pub quantidade: u32,
}

/// Body of `/remover-carrinho`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveFromCartRequest {
    /// Item category.
    pub tipo: ItemKind,
    /// Item identifier.
    pub id: u64,
}

/// Body of `/finalizar-pedido`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Payment method label understood by the server.
    pub metodo_pagamento: String,
    /// Order notes.
    pub observacoes: String,
}

/// Reply shared by the cart mutation endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartReply {
    /// Whether the server applied the mutation.
    pub success: bool,
    /// Human-readable failure message.
    pub error: Option<String>,
    /// Badge count after the mutation.
    pub count: Option<CartCount>,
    /// Full cart after the mutation, when the endpoint returns one.
    pub carrinho: Option<CartSnapshot>,
}

impl CartReply {
    /// Successful reply carrying a count.
    pub fn applied(count: CartCount) -> Self {
        Self {
            success: true,
            count: Some(count),
            ..Self::default()
        }
    }

    /// Failed reply carrying a message.
    pub fn declined(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Reply of `/finalizar-pedido`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutReply {
    /// Whether the order was placed.
    pub success: bool,
    /// Human-readable failure message.
    pub error: Option<String>,
    /// Identifier of the created order.
    pub pedido_id: Option<u64>,
    /// Initial order status.
    pub status: Option<String>,
}

define_port_error! {
    /// Transport-level failures talking to the cart endpoints.
    pub enum CartApiError {
        /// The request never produced a response.
        Transport { message: String } =>
            "cart request failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "cart request timed out: {message}",
        /// The response body was not the expected JSON envelope.
        Decode { message: String } =>
            "cart response decode failed: {message}",
    }
}

/// Port for the cart endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartApi: Send + Sync {
    /// POST `/adicionar-carrinho`.
    async fn add(&self, request: &CartItemRequest) -> Result<CartReply, CartApiError>;

    /// POST `/alterar-quantidade-carrinho`.
    async fn change_quantity(&self, request: &CartItemRequest) -> Result<CartReply, CartApiError>;

    /// POST `/remover-carrinho`.
    async fn remove(&self, request: &RemoveFromCartRequest) -> Result<CartReply, CartApiError>;

    /// POST `/limpar-carrinho`.
    async fn clear(&self) -> Result<CartReply, CartApiError>;

    /// POST `/restaurar-carrinho` with the locally staged cart.
    async fn restore(&self, snapshot: &CartSnapshot) -> Result<CartReply, CartApiError>;

    /// POST `/finalizar-pedido`.
    async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutReply, CartApiError>;
}

/// Fixture implementation that accepts every mutation with an empty cart.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureCartApi;

#[async_trait]
impl CartApi for FixtureCartApi {
    async fn add(&self, request: &CartItemRequest) -> Result<CartReply, CartApiError> {
        Ok(CartReply::applied(CartCount::new(u64::from(
            request.quantidade,
        ))))
    }

    async fn change_quantity(
        &self,
        request: &CartItemRequest,
    ) -> Result<CartReply, CartApiError> {
        Ok(CartReply::applied(CartCount::new(u64::from(
            request.quantidade,
        ))))
    }

    async fn remove(&self, _request: &RemoveFromCartRequest) -> Result<CartReply, CartApiError> {
        Ok(CartReply::applied(CartCount::ZERO))
    }

    async fn clear(&self) -> Result<CartReply, CartApiError> {
        Ok(CartReply::applied(CartCount::ZERO))
    }

    async fn restore(&self, _snapshot: &CartSnapshot) -> Result<CartReply, CartApiError> {
        Ok(CartReply::applied(CartCount::ZERO))
    }

    async fn checkout(&self, _request: &CheckoutRequest) -> Result<CheckoutReply, CartApiError> {
        Ok(CheckoutReply {
            success: true,
            ..CheckoutReply::default()
        })
    }
}
