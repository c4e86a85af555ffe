//! Headless page adapter.
//!
//! [`InMemoryPage`] keeps the document state the storefront touches (booking
//! form, slot selector, badges, chrome classes, toasts) in memory and records
//! every user-visible effect as a [`PageEvent`]. The terminal view renders on
//! top of it and the test suites assert against it.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::FormField;
use crate::domain::ports::{PageElement, Toast, ToastId, View};

/// User-visible effect recorded by [`InMemoryPage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// A form field was overwritten.
    FieldSet {
        /// Field written.
        field: FormField,
        /// New value.
        value: String,
    },
    /// The slot selector was repopulated.
    SlotsReplaced(Vec<String>),
    /// Badges were updated.
    BadgesSet {
        /// Badge text.
        text: String,
        /// Whether badges are displayed.
        visible: bool,
    },
    /// An alert was shown.
    Alert(String),
    /// A confirmation was asked and answered.
    Confirm {
        /// Prompt text.
        message: String,
        /// User answer.
        accepted: bool,
    },
    /// The page navigated away.
    Navigate(String),
    /// The page reloaded.
    Reload,
    /// A toast was mounted.
    ToastMounted {
        /// Toast handle.
        id: ToastId,
        /// Toast text.
        message: String,
    },
    /// A toast started fading.
    ToastFaded(ToastId),
    /// A toast left the document.
    ToastRemoved(ToastId),
}

/// Toast lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStage {
    /// Fully visible.
    Visible,
    /// Fading out.
    Fading,
}

#[derive(Debug, Default)]
struct PageState {
    fields: HashMap<FormField, String>,
    slot_placeholder: Option<String>,
    slot_options: Vec<String>,
    badge: Option<(String, bool)>,
    elements: HashSet<PageElement>,
    classes: HashMap<PageElement, BTreeSet<String>>,
    attributes: HashMap<(PageElement, String), String>,
    toasts: BTreeMap<ToastId, (Toast, ToastStage)>,
    confirm_answer: bool,
    events: Vec<PageEvent>,
}

/// In-memory [`View`] implementation.
#[derive(Debug)]
pub struct InMemoryPage {
    state: Mutex<PageState>,
    next_toast: AtomicU64,
}

impl Default for InMemoryPage {
    fn default() -> Self {
        Self::blank()
    }
}

impl InMemoryPage {
    /// A page with no form fields and no chrome elements.
    pub fn blank() -> Self {
        Self {
            state: Mutex::new(PageState {
                confirm_answer: true,
                ..PageState::default()
            }),
            next_toast: AtomicU64::new(1),
        }
    }

    /// The booking page: every form field (empty) and every chrome element.
    pub fn booking_form() -> Self {
        let page = Self::blank();
        {
            let mut state = page.lock();
            for field in FormField::ALL {
                state.fields.insert(field, String::new());
            }
            state.elements.extend([
                PageElement::Sidebar,
                PageElement::SidebarOverlay,
                PageElement::SearchBar,
                PageElement::StatusBar,
                PageElement::DateInput,
            ]);
        }
        page
    }

    /// Add `field` to the page holding `value`.
    #[must_use]
    pub fn with_field(self, field: FormField, value: impl Into<String>) -> Self {
        self.lock().fields.insert(field, value.into());
        self
    }

    /// Remove `field` from the page.
    #[must_use]
    pub fn without_field(self, field: FormField) -> Self {
        self.lock().fields.remove(&field);
        self
    }

    /// Add chrome elements to the page.
    #[must_use]
    pub fn with_elements(self, elements: impl IntoIterator<Item = PageElement>) -> Self {
        self.lock().elements.extend(elements);
        self
    }

    /// Answer given to subsequent confirmations.
    pub fn answer_confirms(&self, accepted: bool) {
        self.lock().confirm_answer = accepted;
    }

    /// Record a confirmation answered elsewhere (for example on a terminal).
    pub fn record_confirm(&self, message: &str, accepted: bool) {
        self.lock().events.push(PageEvent::Confirm {
            message: message.to_owned(),
            accepted,
        });
    }

    /// Every recorded effect, oldest first.
    pub fn events(&self) -> Vec<PageEvent> {
        self.lock().events.clone()
    }

    /// Current value of `field`, `None` when absent from the page.
    pub fn field(&self, field: FormField) -> Option<String> {
        self.lock().fields.get(&field).cloned()
    }

    /// Placeholder of the slot selector, once populated.
    pub fn slot_placeholder(&self) -> Option<String> {
        self.lock().slot_placeholder.clone()
    }

    /// Badge text and visibility, once set.
    pub fn badge(&self) -> Option<(String, bool)> {
        self.lock().badge.clone()
    }

    /// Alerts shown so far.
    pub fn alerts(&self) -> Vec<String> {
        self.collect_events(|event| match event {
            PageEvent::Alert(message) => Some(message.clone()),
            _ => None,
        })
    }

    /// Navigation targets so far.
    pub fn navigations(&self) -> Vec<String> {
        self.collect_events(|event| match event {
            PageEvent::Navigate(location) => Some(location.clone()),
            _ => None,
        })
    }

    /// Number of reloads so far.
    pub fn reloads(&self) -> usize {
        self.collect_events(|event| matches!(event, PageEvent::Reload).then_some(()))
            .len()
    }

    /// Messages of the toasts still in the document with their stage.
    pub fn live_toasts(&self) -> Vec<(String, ToastStage)> {
        self.lock()
            .toasts
            .values()
            .map(|(toast, stage)| (toast.message.clone(), *stage))
            .collect()
    }

    /// Whether `element` currently carries `class`.
    pub fn has_class(&self, element: PageElement, class: &str) -> bool {
        self.lock()
            .classes
            .get(&element)
            .is_some_and(|classes| classes.contains(class))
    }

    /// Value of an attribute, once set.
    pub fn attribute(&self, element: PageElement, name: &str) -> Option<String> {
        self.lock()
            .attributes
            .get(&(element, name.to_owned()))
            .cloned()
    }

    fn collect_events<T>(&self, pick: impl Fn(&PageEvent) -> Option<T>) -> Vec<T> {
        self.lock().events.iter().filter_map(pick).collect()
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl View for InMemoryPage {
    fn form_value(&self, field: FormField) -> Option<String> {
        self.field(field)
    }

    fn set_form_value(&self, field: FormField, value: &str) {
        let mut state = self.lock();
        if let Some(current) = state.fields.get_mut(&field) {
            value.clone_into(current);
            state.events.push(PageEvent::FieldSet {
                field,
                value: value.to_owned(),
            });
        }
    }

    fn slot_options(&self) -> Vec<String> {
        self.lock().slot_options.clone()
    }

    fn set_slot_options(&self, placeholder: &str, slots: &[String]) {
        let mut state = self.lock();
        state.slot_placeholder = Some(placeholder.to_owned());
        state.slot_options = slots.to_vec();
        state.events.push(PageEvent::SlotsReplaced(slots.to_vec()));
    }

    fn set_cart_badges(&self, text: &str, visible: bool) {
        let mut state = self.lock();
        state.badge = Some((text.to_owned(), visible));
        state.events.push(PageEvent::BadgesSet {
            text: text.to_owned(),
            visible,
        });
    }

    fn alert(&self, message: &str) {
        self.lock().events.push(PageEvent::Alert(message.to_owned()));
    }

    fn confirm(&self, message: &str) -> bool {
        let accepted = self.lock().confirm_answer;
        self.record_confirm(message, accepted);
        accepted
    }

    fn navigate(&self, location: &str) {
        self.lock()
            .events
            .push(PageEvent::Navigate(location.to_owned()));
    }

    fn reload(&self) {
        self.lock().events.push(PageEvent::Reload);
    }

    fn mount_toast(&self, toast: &Toast) -> ToastId {
        let id = ToastId(self.next_toast.fetch_add(1, Ordering::Relaxed));
        let mut state = self.lock();
        state.toasts.insert(id, (toast.clone(), ToastStage::Visible));
        state.events.push(PageEvent::ToastMounted {
            id,
            message: toast.message.clone(),
        });
        id
    }

    fn fade_toast(&self, toast: ToastId) {
        let mut state = self.lock();
        if let Some((_, stage)) = state.toasts.get_mut(&toast) {
            *stage = ToastStage::Fading;
        }
        state.events.push(PageEvent::ToastFaded(toast));
    }

    fn remove_toast(&self, toast: ToastId) {
        let mut state = self.lock();
        state.toasts.remove(&toast);
        state.events.push(PageEvent::ToastRemoved(toast));
    }

    fn has_element(&self, element: PageElement) -> bool {
        self.lock().elements.contains(&element)
    }

    fn toggle_class(&self, element: PageElement, class: &str) {
        let mut state = self.lock();
        let classes = state.classes.entry(element).or_default();
        if !classes.remove(class) {
            classes.insert(class.to_owned());
        }
    }

    fn set_class(&self, element: PageElement, class: &str, present: bool) {
        let mut state = self.lock();
        let classes = state.classes.entry(element).or_default();
        if present {
            classes.insert(class.to_owned());
        } else {
            classes.remove(class);
        }
    }

    fn set_attribute(&self, element: PageElement, name: &str, value: &str) {
        self.lock()
            .attributes
            .insert((element, name.to_owned()), value.to_owned());
    }
}
