//! The BoletaMaster ticket wallet: authenticates a user against the
//! static user list and describes that user's purchased tickets, with
//! locally overridable event images.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

mod auth;
mod catalog;
mod images;
mod store;
mod util;
mod wallet;

pub use auth::{authenticate, AuthError, Credentials};
pub use catalog::{
    Catalog, CatalogError, CatalogLoader, CatalogSources, DataSource, Event, Ticket, TicketId,
    User, UserDocument, Venue,
};
pub use images::{ImageOverrides, DEFAULT_EVENT_IMAGE};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreError};
pub use util::format_currency;
pub use wallet::{
    build_card, locality_zone, qr_payload, CardDetail, TicketCard, WalletStats, WalletView,
};

#[derive(Debug, Error)]
pub enum LoginError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The whole system: catalog, image overrides, and the session slot.
/// One instance per process; dropping it is the "page reload" that
/// clears the session.
pub struct Boletera<S> {
    loader: CatalogLoader,
    overrides: ImageOverrides<S>,
    session: Mutex<Option<User>>,
}

impl<S> Boletera<S>
where
    S: KeyValueStore,
{
    pub fn new(sources: CatalogSources, store: S) -> Self {
        let store = Arc::new(store);

        Self {
            loader: CatalogLoader::new(sources),
            overrides: ImageOverrides::new(&store),
            session: Mutex::new(None),
        }
    }

    /// Authenticates and renders the user's ticket wallet. The catalog
    /// is loaded on the first attempt; rejected credentials leave the
    /// session untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<WalletView, LoginError> {
        let catalog = self.loader.load().await?;
        let user = authenticate(&catalog, credentials)?.clone();

        log::info!("{} logged in", user.login);
        *self.session.lock() = Some(user.clone());

        Ok(self.render_wallet(&catalog, &user).await?)
    }

    /// Re-renders the wallet for the current session, if there is one.
    /// Used after an image override changes what a card displays.
    pub async fn wallet(&self) -> Result<Option<WalletView>, LoginError> {
        let Some(user) = self.current_user() else {
            return Ok(None);
        };

        let catalog = self.loader.load().await?;
        Ok(Some(self.render_wallet(&catalog, &user).await?))
    }

    /// The authenticated user, if any
    pub fn current_user(&self) -> Option<User> {
        self.session.lock().clone()
    }

    /// Saves an image override for an event. Returns whether anything
    /// was written (blank submissions are ignored).
    pub async fn set_event_image(&self, event_id: &str, url: &str) -> Result<bool, StoreError> {
        self.overrides.set(event_id, url).await
    }

    pub fn overrides(&self) -> &ImageOverrides<S> {
        &self.overrides
    }

    async fn render_wallet(&self, catalog: &Catalog, viewer: &User) -> Result<WalletView, StoreError> {
        let tickets = catalog.tickets_of(viewer);
        let stats = WalletStats::from_tickets(&tickets);

        let mut cards = Vec::with_capacity(tickets.len());

        for ticket in tickets {
            // A ticket whose event is missing is skipped, not an error
            let Some(event) = catalog.event_by_id(&ticket.event_id) else {
                log::warn!("ticket {} references unknown event {}", ticket.id, ticket.event_id);
                continue;
            };

            let image = self.overrides.resolve(event).await?;
            cards.push(build_card(ticket, event, Some(viewer), image));
        }

        Ok(WalletView {
            greeting: format!("Hola, {}", viewer.name),
            stats,
            cards,
        })
    }
}
