//! Command line driving the storefront behaviours against a live server.
//!
//! Every invocation is one page visit: a fresh booking page (optionally
//! pre-filled from the arguments) on which exactly one behaviour runs.

use clap::{Parser, Subcommand};
use tracing::debug;
use url::Url;

use crate::domain::ports::SubmitEvent;
use crate::domain::{
    BookingOutcome, CartOutcome, ChromeEvent, FormField, ItemKind, ResumeOutcome, SlotLookup,
    Storefront,
};
use crate::outbound::page::InMemoryPage;

/// `storefront` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "storefront",
    about = "Drive the barbershop storefront cart, booking and page behaviours",
    version
)]
pub struct CliArgs {
    /// Storefront origin. Overrides `STOREFRONT_BASE_URL`.
    #[arg(long = "base-url", value_name = "url", global = true)]
    pub base_url: Option<String>,
    /// Behaviour to run.
    #[command(subcommand)]
    pub command: Command,
}

/// One storefront behaviour.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Add an item to the cart.
    Add {
        /// `produto` or `servico`.
        #[arg(long)]
        tipo: ItemKind,
        /// Catalogue identifier.
        #[arg(long)]
        id: u64,
        /// Quantity to add.
        #[arg(long, default_value_t = 1)]
        quantidade: u32,
    },
    /// Set the quantity of an item already in the cart.
    ChangeQuantity {
        /// `produto` or `servico`.
        #[arg(long)]
        tipo: ItemKind,
        /// Catalogue identifier.
        #[arg(long)]
        id: u64,
        /// New quantity.
        #[arg(long)]
        quantidade: u32,
    },
    /// Remove an item from the cart.
    Remove {
        /// `produto` or `servico`.
        #[arg(long)]
        tipo: ItemKind,
        /// Catalogue identifier.
        #[arg(long)]
        id: u64,
    },
    /// Empty the cart after confirmation.
    Clear,
    /// Send the locally cached cart to the server.
    Restore,
    /// Place an order for the server-side cart.
    Checkout {
        /// Payment method; the server default applies when omitted.
        #[arg(long = "metodo-pagamento", value_name = "metodo")]
        metodo_pagamento: Option<String>,
        /// Order notes.
        #[arg(long, default_value = "")]
        observacoes: String,
    },
    /// List the free slots of a barber on a date.
    Slots {
        /// Barber identifier.
        #[arg(long)]
        barbeiro: String,
        /// Date as `YYYY-MM-DD`.
        #[arg(long)]
        data: String,
    },
    /// Submit the booking form.
    Book {
        /// Barber identifier.
        #[arg(long)]
        barbeiro: String,
        /// Service identifier.
        #[arg(long)]
        servico: String,
        /// Date as `YYYY-MM-DD`.
        #[arg(long)]
        data: String,
        /// Time slot as `HH:MM`.
        #[arg(long)]
        horario: String,
        /// Notes for the barber.
        #[arg(long, default_value = "")]
        observacoes: String,
    },
    /// Load a page: apply the date floor and resume a pending booking when
    /// the location asks for it.
    LoadPage {
        /// Location relative to the storefront origin.
        #[arg(long, default_value = "agendamento?processar_agendamento=true")]
        path: String,
    },
    /// Click a menu button.
    Menu {
        /// Visible button text.
        #[arg(long, default_value = "☰")]
        label: String,
    },
    /// Click the sidebar close button.
    CloseSidebar,
    /// Click the sidebar overlay.
    Overlay,
    /// Scroll the page.
    Scroll {
        /// Vertical offset in pixels.
        #[arg(long)]
        offset: f64,
    },
}

/// What a command did.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// A cart operation ran.
    Cart(CartOutcome),
    /// A slot lookup ran.
    Slots(SlotLookup),
    /// A booking was submitted.
    Booking(BookingOutcome),
    /// The page-load behaviour ran.
    PageLoad(ResumeOutcome),
    /// A chrome interaction was handled.
    Chrome,
}

/// Form submission issued from the command line. There is no native
/// submission to suppress.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliSubmission;

impl SubmitEvent for CliSubmission {
    fn prevent_default(&self) {
        debug!("native form submission suppressed");
    }
}

/// Page the command runs on: the booking page, pre-filled with the form
/// values the command carries.
pub fn page_for(command: &Command) -> InMemoryPage {
    let page = InMemoryPage::booking_form();
    match command {
        Command::Slots { barbeiro, data } => page
            .with_field(FormField::Barbeiro, barbeiro.as_str())
            .with_field(FormField::Data, data.as_str()),
        Command::Book {
            barbeiro,
            servico,
            data,
            horario,
            observacoes,
        } => page
            .with_field(FormField::Barbeiro, barbeiro.as_str())
            .with_field(FormField::Servico, servico.as_str())
            .with_field(FormField::Data, data.as_str())
            .with_field(FormField::Horario, horario.as_str())
            .with_field(FormField::Observacoes, observacoes.as_str()),
        _ => page,
    }
}

/// Run `command` against `storefront`.
///
/// # Errors
///
/// Returns an error when a page location does not resolve against
/// `base_url`.
pub async fn dispatch(
    storefront: &Storefront,
    command: Command,
    base_url: &Url,
) -> Result<CommandOutcome, url::ParseError> {
    let cart = storefront.cart();
    let outcome = match command {
        Command::Add {
            tipo,
            id,
            quantidade,
        } => CommandOutcome::Cart(cart.add(tipo, id, quantidade).await),
        Command::ChangeQuantity {
            tipo,
            id,
            quantidade,
        } => CommandOutcome::Cart(cart.change_quantity(tipo, id, quantidade).await),
        Command::Remove { tipo, id } => CommandOutcome::Cart(cart.remove(tipo, id).await),
        Command::Clear => CommandOutcome::Cart(cart.clear().await),
        Command::Restore => CommandOutcome::Cart(cart.restore().await),
        Command::Checkout {
            metodo_pagamento,
            observacoes,
        } => CommandOutcome::Cart(
            cart.checkout(metodo_pagamento.as_deref(), &observacoes)
                .await,
        ),
        Command::Slots { .. } => {
            CommandOutcome::Slots(storefront.scheduling().fetch_available_slots().await)
        }
        Command::Book { .. } => CommandOutcome::Booking(
            storefront
                .scheduling()
                .create_appointment(&CliSubmission)
                .await,
        ),
        Command::LoadPage { path } => {
            let page_url = base_url.join(&path)?;
            CommandOutcome::PageLoad(storefront.on_page_load(&page_url).await)
        }
        Command::Menu { label } => chrome(storefront, &ChromeEvent::MenuButtonClicked { label }),
        Command::CloseSidebar => chrome(storefront, &ChromeEvent::SidebarCloseClicked),
        Command::Overlay => chrome(storefront, &ChromeEvent::OverlayClicked),
        Command::Scroll { offset } => chrome(storefront, &ChromeEvent::Scrolled { offset }),
    };
    Ok(outcome)
}

fn chrome(storefront: &Storefront, event: &ChromeEvent) -> CommandOutcome {
    storefront.chrome().handle(event);
    CommandOutcome::Chrome
}
