//! Page chrome: sidebar toggle, scroll-hidden bars and the booking date floor.
//!
//! Purely presentational. Nothing here survives a reload.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{PageElement, View};

/// Class marking the open sidebar and its overlay.
pub const ACTIVE_CLASS: &str = "active";
/// Class hiding the fixed bars while scrolled down.
pub const HIDE_ON_SCROLL_CLASS: &str = "hide-on-scroll";
/// Vertical offset, in pixels, beyond which the bars hide.
pub const SCROLL_HIDE_THRESHOLD: f64 = 50.0;
/// Glyph identifying the menu buttons that open the sidebar.
pub const MENU_GLYPH: char = '☰';

const HIDEABLE_BARS: [PageElement; 2] = [PageElement::SearchBar, PageElement::StatusBar];

/// User interaction routed to the chrome controller.
#[derive(Debug, Clone, PartialEq)]
pub enum ChromeEvent {
    /// A `.menu-btn` was clicked; `label` is its visible text.
    MenuButtonClicked {
        /// Visible button text.
        label: String,
    },
    /// The sidebar close button was clicked.
    SidebarCloseClicked,
    /// The sidebar overlay was clicked.
    OverlayClicked,
    /// The window scrolled to `offset` pixels from the top.
    Scrolled {
        /// Vertical scroll offset.
        offset: f64,
    },
}

/// Whether a menu button with this label toggles the sidebar.
pub fn opens_sidebar(label: &str) -> bool {
    label.contains(MENU_GLYPH)
}

/// Chrome controller over the page.
#[derive(Clone)]
pub struct PageChrome {
    view: Arc<dyn View>,
    clock: Arc<dyn Clock>,
}

impl PageChrome {
    /// Controller reading "today" from `clock`.
    pub fn new(view: Arc<dyn View>, clock: Arc<dyn Clock>) -> Self {
        Self { view, clock }
    }

    /// Route one interaction.
    pub fn handle(&self, event: &ChromeEvent) {
        match event {
            ChromeEvent::MenuButtonClicked { label } if opens_sidebar(label) => {
                self.toggle_sidebar();
            }
            ChromeEvent::MenuButtonClicked { .. } => {}
            ChromeEvent::SidebarCloseClicked | ChromeEvent::OverlayClicked => {
                self.toggle_sidebar();
            }
            ChromeEvent::Scrolled { offset } => self.on_scroll(*offset),
        }
    }

    /// Flip the sidebar and its overlay together.
    ///
    /// Does nothing unless both are on the page.
    pub fn toggle_sidebar(&self) {
        if self.view.has_element(PageElement::Sidebar)
            && self.view.has_element(PageElement::SidebarOverlay)
        {
            self.view.toggle_class(PageElement::Sidebar, ACTIVE_CLASS);
            self.view
                .toggle_class(PageElement::SidebarOverlay, ACTIVE_CLASS);
        }
    }

    /// Hide the fixed bars past [`SCROLL_HIDE_THRESHOLD`], show them otherwise.
    pub fn on_scroll(&self, offset: f64) {
        let hide = offset > SCROLL_HIDE_THRESHOLD;
        for bar in HIDEABLE_BARS {
            if self.view.has_element(bar) {
                self.view.set_class(bar, HIDE_ON_SCROLL_CLASS, hide);
            }
        }
    }

    /// Stop the date picker from offering past days.
    ///
    /// Uses today's UTC date. This is a picker convenience; the server still
    /// rejects past bookings.
    pub fn apply_date_floor(&self) {
        if self.view.has_element(PageElement::DateInput) {
            let today = self.clock.utc().date_naive().format("%Y-%m-%d").to_string();
            self.view
                .set_attribute(PageElement::DateInput, "min", &today);
        }
    }
}
