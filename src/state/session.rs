//! A user's portal session.
//!
//! [`Session`] ties the [`Store`] to the catalog, the notification slot and
//! the chat assistant, and reads the time from a [`Clock`] so every action is
//! stamped consistently. Deferred effects (notification dismissal, chat
//! replies) only happen when [`Session::tick`] is called.

use crate::{
    domain::{
        Config, DataRequest, Dataset, DatasetId, DatasetRequestForm, DownloadStats,
        DownloadedDataset, Intent, RequestForm, RequestId, RequestStats, RequestStatus,
    },
    state::{
        Catalog, Chatbot, Clock, Snackbar, SystemClock,
        store::{Error, Store},
    },
};
use tracing::instrument;

const BOOKMARK_SAVED: &str = "Data telah tersimpan";
const BOOKMARK_REMOVED: &str = "Dataset dihapus dari simpanan";
const ALREADY_IN_CART: &str = "Dataset sudah ada di keranjang";

/// Everything one user interacts with, driven by a clock.
#[derive(Debug)]
pub struct Session<C = SystemClock> {
    store: Store,
    catalog: Catalog,
    config: Config,
    snackbar: Snackbar,
    chatbot: Chatbot,
    clock: C,
}

impl Session<SystemClock> {
    /// Starts a session on the wall clock with the seeded catalog and
    /// requests.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Session<C> {
    /// Starts a session on the given clock with the seeded catalog and
    /// requests.
    #[must_use]
    pub fn with_clock(config: Config, clock: C) -> Self {
        let chatbot = Chatbot::new(clock.now(), config.chat_reply_delay());
        Self {
            store: Store::seeded(),
            catalog: Catalog::seeded(),
            config,
            snackbar: Snackbar::default(),
            chatbot,
            clock,
        }
    }

    /// The underlying state.
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// The dataset catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The session configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The notification slot.
    #[must_use]
    pub const fn snackbar(&self) -> &Snackbar {
        &self.snackbar
    }

    /// The chat conversation.
    #[must_use]
    pub const fn chatbot(&self) -> &Chatbot {
        &self.chatbot
    }

    fn notify(&mut self, message: impl Into<String>) {
        let now = self.clock.now();
        self.snackbar
            .show(message, now, self.config.snackbar_duration());
    }

    fn dataset(&self, id: DatasetId) -> Result<Dataset, Error> {
        self.catalog
            .get(id)
            .cloned()
            .ok_or(Error::DatasetNotFound(id))
    }

    /// Adds a catalog dataset to the cart.
    ///
    /// Returns `false`, without a notification, if it was already there.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetNotFound`] if the catalog has no such dataset.
    #[instrument(level = "debug", skip(self))]
    pub fn add_to_cart(&mut self, id: DatasetId) -> Result<bool, Error> {
        let dataset = self.dataset(id)?;
        let message = format!("\"{}\" berhasil ditambahkan ke keranjang", dataset.title);

        let added = self.store.add_to_cart(dataset);
        if added {
            self.notify(message);
        }
        Ok(added)
    }

    /// Removes a dataset from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetNotFound`] if it is not in the cart.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_from_cart(&mut self, id: DatasetId) -> Result<Dataset, Error> {
        self.store.remove_from_cart(id)
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.store.clear_cart();
    }

    /// Downloads the whole cart at the current time.
    #[instrument(level = "debug", skip(self))]
    pub fn download_all(&mut self) -> &[DownloadedDataset] {
        let now = self.clock.now();
        self.store.download_all(now)
    }

    /// Bookmarks a catalog dataset.
    ///
    /// Returns `false`, without a notification, if it was already bookmarked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetNotFound`] if the catalog has no such dataset.
    #[instrument(level = "debug", skip(self))]
    pub fn bookmark(&mut self, id: DatasetId) -> Result<bool, Error> {
        let dataset = self.dataset(id)?;
        let added = self.store.bookmark(dataset);
        if added {
            self.notify(BOOKMARK_SAVED);
        }
        Ok(added)
    }

    /// Removes a bookmark.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetNotFound`] if the dataset is not bookmarked.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_bookmark(&mut self, id: DatasetId) -> Result<Dataset, Error> {
        let dataset = self.store.unbookmark(id)?;
        self.notify(BOOKMARK_REMOVED);
        Ok(dataset)
    }

    /// Moves a bookmarked dataset into the cart, keeping the bookmark.
    ///
    /// Notifies either way; returns whether it was added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetNotFound`] if the dataset is not bookmarked.
    #[instrument(level = "debug", skip(self))]
    pub fn bookmark_to_cart(&mut self, id: DatasetId) -> Result<bool, Error> {
        let dataset = self
            .store
            .bookmarks()
            .iter()
            .find(|dataset| dataset.id == id)
            .cloned()
            .ok_or(Error::DatasetNotFound(id))?;
        let message = format!("\"{}\" ditambahkan ke keranjang", dataset.title);

        let added = self.store.add_to_cart(dataset);
        if added {
            self.notify(message);
        } else {
            self.notify(ALREADY_IN_CART);
        }
        Ok(added)
    }

    /// Submits the standard request form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] listing every failing field.
    #[instrument(level = "debug", skip(self, form))]
    pub fn submit_request(&mut self, form: &RequestForm) -> Result<&DataRequest, Error> {
        let now = self.clock.now();
        self.store.submit_form(form, &self.config, now)
    }

    /// Submits the dataset request form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] listing every failing field.
    #[instrument(level = "debug", skip(self, form))]
    pub fn submit_dataset_request(
        &mut self,
        form: &DatasetRequestForm,
    ) -> Result<&DataRequest, Error> {
        let details = form.validate(&self.config)?;
        let now = self.clock.now();
        Ok(self.store.submit_request(details, now))
    }

    /// Moves a request to a new status at the current time.
    ///
    /// # Errors
    ///
    /// See [`Store::advance_status`].
    #[instrument(level = "debug", skip(self, description, rejection_reason))]
    pub fn advance_status(
        &mut self,
        id: RequestId,
        to: RequestStatus,
        description: Option<String>,
        rejection_reason: Option<String>,
    ) -> Result<&DataRequest, Error> {
        let now = self.clock.now();
        self.store
            .advance_status(id, to, description, rejection_reason, now)
    }

    /// Sends a chat message; the reply arrives on a later [`tick`](Self::tick).
    #[instrument(level = "debug", skip(self))]
    pub fn send_chat(&mut self, text: &str) -> Option<Intent> {
        let now = self.clock.now();
        self.chatbot.send(text, now)
    }

    /// Opens the request form from a chat reply.
    pub fn open_request_form(&mut self) {
        let now = self.clock.now();
        self.chatbot.open_request_form(now);
    }

    /// Dismisses the notification early.
    pub fn close_snackbar(&mut self) {
        self.snackbar.close();
    }

    /// Runs every deferred effect that has come due.
    ///
    /// Returns `true` if anything visible changed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        let dismissed = self.snackbar.tick(now);
        let replies = self.chatbot.tick(now);
        dismissed || replies > 0
    }

    /// Request counts by lifecycle stage.
    #[must_use]
    pub fn request_stats(&self) -> RequestStats {
        self.store.request_stats()
    }

    /// Download history summary for the current month.
    #[must_use]
    pub fn download_stats(&self) -> DownloadStats {
        self.store.download_stats(self.clock.now())
    }
}
