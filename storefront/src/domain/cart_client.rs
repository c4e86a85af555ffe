//! Cart client: cart mutations against the server, mirrored into the page.
//!
//! Every operation is one request. Success updates the badge, the local cart
//! cache or reloads the page (the server-rendered cart is authoritative).
//! Transport failures are logged and otherwise leave the page untouched; only
//! messages the server sends explicitly reach the user.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::ports::{
    CartApi, CartItemRequest, CheckoutRequest, RemoveFromCartRequest, Scheduler, View,
};
use crate::domain::{CartCount, ItemKind, LocalCartCache, NotificationWidget};

/// Confirmation asked before emptying the cart.
pub const CLEAR_CART_PROMPT: &str = "Deseja limpar todo o carrinho?";
/// Banner shown after an item was added.
pub const ITEM_ADDED_MESSAGE: &str = "Item adicionado ao carrinho!";
/// Banner shown after an order was placed.
pub const ORDER_PLACED_MESSAGE: &str = "Pedido realizado com sucesso!";
/// Payment method used when checkout does not name one.
pub const DEFAULT_PAYMENT_METHOD: &str = "dinheiro";
/// Page opened after checkout.
pub const PROFILE_PAGE: &str = "/perfil";
/// Delay between the success banner and leaving the page.
pub const SUCCESS_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

/// Which branch a cart operation took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartOutcome {
    /// The server applied the change and the page reflects it.
    Applied,
    /// The server refused; `error` is what it said, if anything.
    Declined {
        /// Server message, shown to the user when present.
        error: Option<String>,
    },
    /// The user dismissed the confirmation; nothing was sent.
    Cancelled,
    /// There was nothing to send.
    Skipped,
    /// The request failed in transport; logged only.
    Failed,
}

/// Set every cart badge to `count`, visible only when it is positive.
pub fn update_badge(view: &dyn View, count: CartCount) {
    view.set_cart_badges(&count.to_string(), count.is_positive());
}

/// Cart operations exposed to the page.
#[derive(Clone)]
pub struct CartClient {
    api: Arc<dyn CartApi>,
    cache: LocalCartCache,
    view: Arc<dyn View>,
    scheduler: Arc<dyn Scheduler>,
    notifications: NotificationWidget,
}

impl CartClient {
    /// Build a client over the given ports.
    pub fn new(
        api: Arc<dyn CartApi>,
        cache: LocalCartCache,
        view: Arc<dyn View>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        let notifications = NotificationWidget::new(Arc::clone(&view), Arc::clone(&scheduler));
        Self {
            api,
            cache,
            view,
            scheduler,
            notifications,
        }
    }

    /// Add `quantidade` of an item.
    ///
    /// On success the badge shows the new count, a banner confirms the add
    /// and a returned cart snapshot is mirrored into the local cache.
    pub async fn add(&self, tipo: ItemKind, id: u64, quantidade: u32) -> CartOutcome {
        let request = CartItemRequest {
            tipo,
            id,
            quantidade,
        };
        let reply = match self.api.add(&request).await {
            Ok(reply) => reply,
            Err(error) => {
                warn!(%error, %tipo, id, "add to cart failed");
                return CartOutcome::Failed;
            }
        };
        if !reply.success {
            debug!(%tipo, id, error = ?reply.error, "add to cart declined");
            return CartOutcome::Declined { error: reply.error };
        }

        self.update_badge_from(reply.count);
        self.notifications.show(ITEM_ADDED_MESSAGE);
        if let Some(snapshot) = reply.carrinho {
            self.cache.save(&snapshot);
        }
        CartOutcome::Applied
    }

    /// Set the quantity of an item already in the cart.
    ///
    /// Success reloads the page. A server message is shown in an alert.
    pub async fn change_quantity(&self, tipo: ItemKind, id: u64, quantidade: u32) -> CartOutcome {
        let request = CartItemRequest {
            tipo,
            id,
            quantidade,
        };
        match self.api.change_quantity(&request).await {
            Ok(reply) if reply.success => {
                self.view.reload();
                CartOutcome::Applied
            }
            Ok(reply) => self.decline(reply.error),
            Err(error) => {
                warn!(%error, %tipo, id, quantidade, "change cart quantity failed");
                CartOutcome::Failed
            }
        }
    }

    /// Remove an item, then reload.
    pub async fn remove(&self, tipo: ItemKind, id: u64) -> CartOutcome {
        let request = RemoveFromCartRequest { tipo, id };
        match self.api.remove(&request).await {
            Ok(reply) if reply.success => {
                self.update_badge_from(reply.count);
                self.view.reload();
                CartOutcome::Applied
            }
            Ok(reply) => {
                debug!(%tipo, id, error = ?reply.error, "remove from cart declined");
                CartOutcome::Declined { error: reply.error }
            }
            Err(error) => {
                warn!(%error, %tipo, id, "remove from cart failed");
                CartOutcome::Failed
            }
        }
    }

    /// Empty the cart after the user confirms.
    pub async fn clear(&self) -> CartOutcome {
        if !self.view.confirm(CLEAR_CART_PROMPT) {
            return CartOutcome::Cancelled;
        }
        match self.api.clear().await {
            Ok(reply) if reply.success => {
                self.cache.clear();
                self.view.reload();
                CartOutcome::Applied
            }
            Ok(reply) => {
                debug!(error = ?reply.error, "clear cart declined");
                CartOutcome::Declined { error: reply.error }
            }
            Err(error) => {
                warn!(%error, "clear cart failed");
                CartOutcome::Failed
            }
        }
    }

    /// Hand the locally staged cart over to the server.
    ///
    /// Sends nothing when the cache is empty or unreadable. Once the server
    /// confirms, the cache is cleared: the server owns the cart from then on.
    pub async fn restore(&self) -> CartOutcome {
        let snapshot = self.cache.load();
        if snapshot.is_empty() {
            return CartOutcome::Skipped;
        }
        match self.api.restore(&snapshot).await {
            Ok(reply) if reply.success => {
                self.cache.clear();
                CartOutcome::Applied
            }
            Ok(reply) => {
                debug!(error = ?reply.error, "restore cart declined");
                CartOutcome::Declined { error: reply.error }
            }
            Err(error) => {
                warn!(%error, items = snapshot.len(), "restore cart failed");
                CartOutcome::Failed
            }
        }
    }

    /// Place an order for the current server-side cart.
    ///
    /// `metodo_pagamento` falls back to [`DEFAULT_PAYMENT_METHOD`]. Success
    /// clears the local cache and badges, confirms with a banner and opens
    /// the profile page after [`SUCCESS_REDIRECT_DELAY`].
    pub async fn checkout(&self, metodo_pagamento: Option<&str>, observacoes: &str) -> CartOutcome {
        let request = CheckoutRequest {
            metodo_pagamento: metodo_pagamento
                .filter(|method| !method.is_empty())
                .unwrap_or(DEFAULT_PAYMENT_METHOD)
                .to_owned(),
            observacoes: observacoes.to_owned(),
        };
        let reply = match self.api.checkout(&request).await {
            Ok(reply) => reply,
            Err(error) => {
                warn!(%error, "checkout failed");
                return CartOutcome::Failed;
            }
        };
        if !reply.success {
            return self.decline(reply.error);
        }

        debug!(pedido_id = ?reply.pedido_id, status = ?reply.status, "order placed");
        self.cache.clear();
        update_badge(self.view.as_ref(), CartCount::ZERO);
        self.notifications.show(ORDER_PLACED_MESSAGE);
        let view = Arc::clone(&self.view);
        self.scheduler.defer(
            SUCCESS_REDIRECT_DELAY,
            Box::pin(async move {
                view.navigate(PROFILE_PAGE);
            }),
        );
        CartOutcome::Applied
    }

    /// Set every cart badge to `count`.
    pub fn update_badge(&self, count: CartCount) {
        update_badge(self.view.as_ref(), count);
    }

    fn update_badge_from(&self, count: Option<CartCount>) {
        match count {
            Some(count) => self.update_badge(count),
            None => debug!("cart reply carried no count; badge left as is"),
        }
    }

    fn decline(&self, error: Option<String>) -> CartOutcome {
        if let Some(message) = error.as_deref() {
            self.view.alert(message);
        }
        CartOutcome::Declined { error }
    }
}
