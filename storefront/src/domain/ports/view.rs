//! Driven port for the rendered page.
//!
//! The domain never touches a document directly. Everything it reads from or
//! writes to the page goes through [`View`], which keeps the orchestration
//! testable without a browser.

use crate::domain::FormField;

/// Page elements addressed by the chrome controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageElement {
    /// Slide-in navigation panel.
    Sidebar,
    /// Dimming overlay shown with the sidebar.
    SidebarOverlay,
    /// Fixed search bar at the top of the page.
    SearchBar,
    /// Fixed status bar.
    StatusBar,
    /// Booking date input.
    DateInput,
}

impl PageElement {
    /// CSS selector locating the element.
    pub fn selector(self) -> &'static str {
        match self {
            Self::Sidebar => "#sidebar",
            Self::SidebarOverlay => "#sidebarOverlay",
            Self::SearchBar => ".search-bar",
            Self::StatusBar => ".status-bar",
            Self::DateInput => "#data",
        }
    }
}

/// Handle of a mounted toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToastId(pub u64);

/// Banner rendered by the notification widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Text shown to the user.
    pub message: String,
    /// Inline CSS applied to the banner element.
    pub style: &'static str,
}

/// Port over the rendered page.
///
/// Calls are synchronous; they model direct document mutation on the UI
/// thread.
#[cfg_attr(test, mockall::automock)]
pub trait View: Send + Sync {
    /// Current value of a booking form field, `None` when the field is not on
    /// the page.
    fn form_value(&self, field: FormField) -> Option<String>;

    /// Overwrite a booking form field.
    fn set_form_value(&self, field: FormField, value: &str);

    /// Values of the options currently offered by the slot selector.
    fn slot_options(&self) -> Vec<String>;

    /// Replace the slot selector options with a placeholder followed by one
    /// option per slot, in the given order.
    fn set_slot_options(&self, placeholder: &str, slots: &[String]);

    /// Set the text and visibility of every cart badge on the page.
    fn set_cart_badges(&self, text: &str, visible: bool);

    /// Blocking alert dialog.
    fn alert(&self, message: &str);

    /// Blocking OK/Cancel dialog; `true` when the user pressed OK.
    fn confirm(&self, message: &str) -> bool;

    /// Navigate the page to `location`.
    fn navigate(&self, location: &str);

    /// Reload the current page.
    fn reload(&self);

    /// Append a toast to the document.
    fn mount_toast(&self, toast: &Toast) -> ToastId;

    /// Start the fade-out transition of a mounted toast.
    fn fade_toast(&self, toast: ToastId);

    /// Remove a toast from the document.
    fn remove_toast(&self, toast: ToastId);

    /// Whether the element exists on the current page.
    fn has_element(&self, element: PageElement) -> bool;

    /// Flip a CSS class on an element.
    fn toggle_class(&self, element: PageElement, class: &str);

    /// Add (`present == true`) or remove a CSS class on an element.
    fn set_class(&self, element: PageElement, class: &str, present: bool);

    /// Set an attribute on an element.
    fn set_attribute(&self, element: PageElement, name: &str, value: &str);
}

/// A form submission whose default browser action can be suppressed.
#[cfg_attr(test, mockall::automock)]
pub trait SubmitEvent {
    /// Stop the browser from submitting the form itself.
    fn prevent_default(&self);
}
