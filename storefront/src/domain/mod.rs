//! Storefront behaviour, independent of any document or transport.
//!
//! Purpose: keep the cart in step between the server and the local cart
//! cache, submit and resume appointments, and drive the page chrome. All
//! I/O goes through [`ports`]; adapters live in `crate::outbound`.
//!
//! Public surface:
//! - Data model: [`CartLineItem`], [`CartSnapshot`], [`CartCount`],
//!   [`AppointmentDraft`], [`PendingAppointment`].
//! - Components: [`LocalCartCache`], [`NotificationWidget`], [`CartClient`],
//!   [`SchedulingClient`], [`PendingAppointmentResumer`], [`PageChrome`].
//! - [`Storefront`] wires all of them over a [`StorefrontPorts`] bundle.

pub mod appointment;
pub mod cart;
pub mod cart_cache;
pub mod cart_client;
pub mod chrome;
pub mod notification;
pub mod pending_appointment;
pub mod ports;
pub mod scheduling_client;
pub mod storefront;

pub use self::appointment::{AppointmentDraft, FormField, PendingAppointment};
pub use self::cart::{CartCount, CartLineItem, CartSnapshot, ItemKind};
pub use self::cart_cache::{CART_CACHE_KEY, CartCacheError, LocalCartCache};
pub use self::cart_client::{
    CLEAR_CART_PROMPT, CartClient, CartOutcome, DEFAULT_PAYMENT_METHOD, ITEM_ADDED_MESSAGE,
    ORDER_PLACED_MESSAGE, PROFILE_PAGE, SUCCESS_REDIRECT_DELAY, update_badge,
};
pub use self::chrome::{
    ACTIVE_CLASS, ChromeEvent, HIDE_ON_SCROLL_CLASS, MENU_GLYPH, PageChrome,
    SCROLL_HIDE_THRESHOLD, opens_sidebar,
};
pub use self::notification::{NotificationWidget, TOAST_FADE_FOR, TOAST_VISIBLE_FOR};
pub use self::pending_appointment::{
    PendingAppointmentResumer, RESUME_MESSAGE, RESUME_QUERY_PARAM, ResumeOutcome,
    SLOT_RESELECT_DELAY, resume_requested,
};
pub use self::scheduling_client::{
    APPOINTMENT_BOOKED_MESSAGE, BookingOutcome, LOGIN_PAGE, LOGIN_REQUIRED_MESSAGE, SIGNUP_PAGE,
    SIGNUP_OR_LOGIN_SUFFIX, SLOT_PLACEHOLDER, SchedulingClient, SlotLookup,
};
pub use self::storefront::{Storefront, StorefrontPorts};
