//! Terminal page adapter.
//!
//! [`TerminalView`] keeps the document in an [`InMemoryPage`] and renders
//! every user-visible effect as one line on an output stream. Confirmation
//! dialogs are answered on the input stream (`s`, `sim`, `y` or `yes` accept;
//! anything else, including end of input, cancels).

use std::fmt;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::domain::FormField;
use crate::domain::ports::{PageElement, Toast, ToastId, View};
use crate::outbound::page::InMemoryPage;

type Output = Box<dyn Write + Send>;
type Input = Box<dyn BufRead + Send>;

/// [`View`] rendering onto a terminal.
pub struct TerminalView {
    page: InMemoryPage,
    output: Mutex<Output>,
    input: Mutex<Input>,
}

impl TerminalView {
    /// View over `page` writing to `output` and reading answers from `input`.
    pub fn new(page: InMemoryPage, output: Output, input: Input) -> Self {
        Self {
            page,
            output: Mutex::new(output),
            input: Mutex::new(input),
        }
    }

    /// View over `page` on the process's standard streams.
    pub fn stdio(page: InMemoryPage) -> Self {
        Self::new(
            page,
            Box::new(io::stdout()),
            Box::new(BufReader::new(io::stdin())),
        )
    }

    /// Document state behind the terminal.
    pub fn page(&self) -> &InMemoryPage {
        &self.page
    }

    fn line(&self, text: fmt::Arguments<'_>) {
        let mut output = lock(&self.output);
        if let Err(error) = writeln!(output, "{text}").and_then(|()| output.flush()) {
            warn!(%error, "terminal write failed");
        }
    }

    fn read_answer(&self) -> bool {
        let mut answer = String::new();
        match lock(&self.input).read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(error) => {
                warn!(%error, "terminal read failed; treating as cancel");
                false
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}

impl View for TerminalView {
    fn form_value(&self, field: FormField) -> Option<String> {
        self.page.form_value(field)
    }

    fn set_form_value(&self, field: FormField, value: &str) {
        if self.page.form_value(field).is_some() {
            self.page.set_form_value(field, value);
            self.line(format_args!("form: {} = {value}", field.element_id()));
        }
    }

    fn slot_options(&self) -> Vec<String> {
        self.page.slot_options()
    }

    fn set_slot_options(&self, placeholder: &str, slots: &[String]) {
        self.page.set_slot_options(placeholder, slots);
        if slots.is_empty() {
            self.line(format_args!("slots: {placeholder} (none available)"));
        } else {
            self.line(format_args!("slots: {}", slots.join(", ")));
        }
    }

    fn set_cart_badges(&self, text: &str, visible: bool) {
        self.page.set_cart_badges(text, visible);
        if visible {
            self.line(format_args!("cart: {text}"));
        } else {
            self.line(format_args!("cart: empty"));
        }
    }

    fn alert(&self, message: &str) {
        self.page.alert(message);
        self.line(format_args!("alert: {message}"));
    }

    fn confirm(&self, message: &str) -> bool {
        self.line(format_args!("confirm: {message} [s/N]"));
        let accepted = self.read_answer();
        self.page.record_confirm(message, accepted);
        accepted
    }

    fn navigate(&self, location: &str) {
        info!(%location, "navigating");
        self.page.navigate(location);
        self.line(format_args!("navigate: {location}"));
    }

    fn reload(&self) {
        self.page.reload();
        self.line(format_args!("reload"));
    }

    fn mount_toast(&self, toast: &Toast) -> ToastId {
        let id = self.page.mount_toast(toast);
        self.line(format_args!("toast: {}", toast.message));
        id
    }

    fn fade_toast(&self, toast: ToastId) {
        debug!(toast = toast.0, "toast fading");
        self.page.fade_toast(toast);
    }

    fn remove_toast(&self, toast: ToastId) {
        debug!(toast = toast.0, "toast removed");
        self.page.remove_toast(toast);
    }

    fn has_element(&self, element: PageElement) -> bool {
        self.page.has_element(element)
    }

    fn toggle_class(&self, element: PageElement, class: &str) {
        self.page.toggle_class(element, class);
        let state = if self.page.has_class(element, class) {
            "on"
        } else {
            "off"
        };
        self.line(format_args!("chrome: {} .{class} {state}", element.selector()));
    }

    fn set_class(&self, element: PageElement, class: &str, present: bool) {
        self.page.set_class(element, class, present);
        let state = if present { "on" } else { "off" };
        self.line(format_args!("chrome: {} .{class} {state}", element.selector()));
    }

    fn set_attribute(&self, element: PageElement, name: &str, value: &str) {
        self.page.set_attribute(element, name, value);
        self.line(format_args!("chrome: {} [{name}={value}]", element.selector()));
    }
}
