//! In-memory storefront server with a single session.
//!
//! Mirrors the server rules the client depends on: the session owns the
//! cart, guests booking an appointment get a 401 and have the draft stashed,
//! and the stash is handed back once.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use storefront::domain::ports::{
    AppointmentReply, AuthChallenge, CartApi, CartApiError, CartItemRequest, CartReply,
    CheckoutReply, CheckoutRequest, RemoveFromCartRequest, SchedulingApi, SchedulingApiError,
    SlotQuery,
};
use storefront::domain::{
    AppointmentDraft, CartCount, CartLineItem, CartSnapshot, PendingAppointment,
};

pub const LOGIN_WALL_MESSAGE: &str = "Para agendar, faça login ou cadastre-se";
pub const OUT_OF_STOCK_MESSAGE: &str = "Estoque insuficiente";
pub const SLOT_TAKEN_MESSAGE: &str = "Horário já reservado";

#[derive(Default)]
struct Session {
    logged_in: bool,
    cart: Vec<CartLineItem>,
    pending: Option<AppointmentDraft>,
    booked: Vec<AppointmentDraft>,
    orders: Vec<CheckoutRequest>,
}

#[derive(Clone)]
pub struct FakeStorefrontServer {
    session: Arc<Mutex<Session>>,
    agenda: Vec<String>,
    stock: u32,
}

impl FakeStorefrontServer {
    pub fn new(agenda: &[&str], stock: u32) -> Self {
        Self {
            session: Arc::default(),
            agenda: agenda.iter().map(|slot| (*slot).to_owned()).collect(),
            stock,
        }
    }

    pub fn log_in(&self) {
        self.lock().logged_in = true;
    }

    pub fn cart(&self) -> Vec<CartLineItem> {
        self.lock().cart.clone()
    }

    pub fn booked(&self) -> Vec<AppointmentDraft> {
        self.lock().booked.clone()
    }

    pub fn orders(&self) -> Vec<CheckoutRequest> {
        self.lock().orders.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().expect("session lock")
    }
}

fn count(cart: &[CartLineItem]) -> CartCount {
    CartCount::new(cart.iter().map(|item| u64::from(item.quantidade)).sum())
}

fn merge(cart: &mut Vec<CartLineItem>, incoming: CartLineItem) {
    match cart
        .iter_mut()
        .find(|item| item.tipo == incoming.tipo && item.id == incoming.id)
    {
        Some(existing) => existing.quantidade += incoming.quantidade,
        None => cart.push(incoming),
    }
}

#[async_trait]
impl CartApi for FakeStorefrontServer {
    async fn add(&self, request: &CartItemRequest) -> Result<CartReply, CartApiError> {
        let mut session = self.lock();
        merge(
            &mut session.cart,
            CartLineItem::new(request.tipo, request.id, request.quantidade),
        );
        Ok(CartReply {
            carrinho: Some(CartSnapshot::new(session.cart.clone())),
            ..CartReply::applied(count(&session.cart))
        })
    }

    async fn change_quantity(&self, request: &CartItemRequest) -> Result<CartReply, CartApiError> {
        if request.quantidade > self.stock {
            return Ok(CartReply::declined(OUT_OF_STOCK_MESSAGE));
        }
        let mut session = self.lock();
        let Some(item) = session
            .cart
            .iter_mut()
            .find(|item| item.tipo == request.tipo && item.id == request.id)
        else {
            return Ok(CartReply::declined("Item não encontrado no carrinho"));
        };
        item.quantidade = request.quantidade;
        Ok(CartReply::applied(count(&session.cart)))
    }

    async fn remove(&self, request: &RemoveFromCartRequest) -> Result<CartReply, CartApiError> {
        let mut session = self.lock();
        session
            .cart
            .retain(|item| !(item.tipo == request.tipo && item.id == request.id));
        Ok(CartReply::applied(count(&session.cart)))
    }

    async fn clear(&self) -> Result<CartReply, CartApiError> {
        self.lock().cart.clear();
        Ok(CartReply::applied(CartCount::ZERO))
    }

    async fn restore(&self, snapshot: &CartSnapshot) -> Result<CartReply, CartApiError> {
        let mut session = self.lock();
        for item in snapshot.items() {
            merge(&mut session.cart, item.clone());
        }
        Ok(CartReply::applied(count(&session.cart)))
    }

    async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutReply, CartApiError> {
        let mut session = self.lock();
        if session.cart.is_empty() {
            return Ok(CheckoutReply {
                error: Some("Carrinho vazio".to_owned()),
                ..CheckoutReply::default()
            });
        }
        session.cart.clear();
        session.orders.push(request.clone());
        Ok(CheckoutReply {
            success: true,
            pedido_id: Some(session.orders.len() as u64),
            status: Some("pendente".to_owned()),
            ..CheckoutReply::default()
        })
    }
}

#[async_trait]
impl SchedulingApi for FakeStorefrontServer {
    async fn available_slots(&self, query: &SlotQuery) -> Result<Vec<String>, SchedulingApiError> {
        let session = self.lock();
        Ok(self
            .agenda
            .iter()
            .filter(|slot| {
                !session.booked.iter().any(|booked| {
                    booked.barbeiro_id == query.barbeiro_id
                        && booked.data == query.data
                        && booked.horario == **slot
                })
            })
            .cloned()
            .collect())
    }

    async fn create_appointment(
        &self,
        draft: &AppointmentDraft,
    ) -> Result<AppointmentReply, SchedulingApiError> {
        let mut session = self.lock();
        if !session.logged_in {
            session.pending = Some(draft.clone());
            return Ok(AppointmentReply::AuthRequired(AuthChallenge {
                error: Some(LOGIN_WALL_MESSAGE.to_owned()),
                require_auth: true,
                redirect: Some("/cadastro-cliente".to_owned()),
            }));
        }
        let taken = session.booked.iter().any(|booked| {
            booked.barbeiro_id == draft.barbeiro_id
                && booked.data == draft.data
                && booked.horario == draft.horario
        });
        if taken {
            return Ok(AppointmentReply::Rejected {
                error: Some(SLOT_TAKEN_MESSAGE.to_owned()),
            });
        }
        session.pending = None;
        session.booked.push(draft.clone());
        Ok(AppointmentReply::Created {
            appointment_id: Some(session.booked.len() as u64),
        })
    }

    async fn pending_appointment(&self) -> Result<Option<PendingAppointment>, SchedulingApiError> {
        Ok(self.lock().pending.take().map(PendingAppointment::from))
    }
}
