//! Client-side search interaction controller.
//!
//! [`SearchController`] owns one [`SearchState`] and acts as its event loop.
//! UI events are applied as they arrive; each resulting [`Command`] runs as
//! its own task, and its completion is fed back through a channel and applied
//! in arrival order. Nothing is cancelled or debounced: overlapping searches
//! all run, and the state's sequence guard decides which response is shown.

pub mod form;
pub mod state;

pub use form::{FormError, FormField, ListingForm};
pub use state::{Command, Event, SearchState, Seq};

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::clients::{CatalogApi, ClientError};

pub struct SearchController<C> {
    state: SearchState,
    api: Arc<C>,
    completions_tx: mpsc::UnboundedSender<Event>,
    completions_rx: mpsc::UnboundedReceiver<Event>,
    in_flight: usize,
}

impl<C> SearchController<C>
where
    C: CatalogApi + 'static,
{
    pub fn new(api: Arc<C>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state: SearchState::new(),
            api,
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SearchState {
        &self.state
    }

    /// Number of catalog calls issued but not yet applied.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Applies one event and starts the call it asks for, if any. Returns
    /// without waiting for that call.
    pub fn dispatch(&mut self, event: Event) {
        if let Some(command) = self.state.apply(event) {
            self.spawn(command);
        }
    }

    /// The call runs in its own task so a panic inside it still produces a
    /// completion and `in_flight` always drains.
    fn spawn(&mut self, command: Command) {
        self.in_flight += 1;
        let api = Arc::clone(&self.api);
        let tx = self.completions_tx.clone();

        tokio::spawn(async move {
            let call = tokio::spawn(execute(api, command.clone()));
            let event = match call.await {
                Ok(event) => event,
                Err(e) => {
                    error!("Catalog call aborted: {}", e);
                    failed(command, ClientError::StorageUnavailable(e.to_string()))
                }
            };
            if tx.send(event).is_err() {
                debug!("Controller dropped before call completed");
            }
        });
    }

    /// Waits for the next call to finish and applies its outcome. Returns
    /// `false` when nothing is in flight.
    pub async fn next_completion(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }

        match self.completions_rx.recv().await {
            Some(event) => {
                self.in_flight -= 1;
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Applies completions until no call is outstanding.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }
}

async fn execute<C>(api: Arc<C>, command: Command) -> Event
where
    C: CatalogApi + ?Sized,
{
    match command {
        Command::FetchAll { seq } => Event::CatalogLoaded {
            seq,
            result: api.list().await,
        },
        Command::Search { seq, query } => Event::SearchCompleted {
            seq,
            result: api.search(&query).await,
        },
        Command::Insert(fields) => Event::InsertCompleted(api.insert(fields).await),
    }
}

fn failed(command: Command, err: ClientError) -> Event {
    match command {
        Command::FetchAll { seq } => Event::CatalogLoaded {
            seq,
            result: Err(err),
        },
        Command::Search { seq, .. } => Event::SearchCompleted {
            seq,
            result: Err(err),
        },
        Command::Insert(_) => Event::InsertCompleted(Err(err)),
    }
}
