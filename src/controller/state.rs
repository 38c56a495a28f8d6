//! The search interaction state machine.
//!
//! [`SearchState::apply`] is deterministic: it mutates the state for one
//! event and returns at most one [`Command`] for the runtime to execute.
//! Completed commands come back as events carrying their outcome.

use tracing::{debug, error, warn};

use super::form::{FormField, ListingForm};
use crate::clients::ClientError;
use crate::constants::limits::SUGGESTION_COUNT;
use crate::constants::messages::CATALOG_LOAD_FAILED;
use crate::models::listing::{Listing, NewListing};

/// Issue order of requests whose responses replace the displayed set.
pub type Seq = u64;

#[derive(Debug)]
pub enum Event {
    Mount,
    Keystroke(String),
    SuggestionClick(Listing),
    ClearSearch,
    /// Pointer interaction outside the search input and dropdown.
    OutsideClick,
    InputFocused,
    FormFieldChanged(FormField, String),
    FormSubmit,
    CatalogLoaded {
        seq: Seq,
        result: Result<Vec<Listing>, ClientError>,
    },
    SearchCompleted {
        seq: Seq,
        result: Result<Vec<Listing>, ClientError>,
    },
    InsertCompleted(Result<Listing, ClientError>),
}

/// A catalog call requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FetchAll { seq: Seq },
    Search { seq: Seq, query: String },
    Insert(NewListing),
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    show_suggestions: bool,
    results: Vec<Listing>,
    catalog: Vec<Listing>,
    loading: bool,
    error: Option<String>,
    input_focused: bool,
    form: ListingForm,
    last_issued: Seq,
    /// Newest request whose response replaced the displayed set.
    last_applied: Seq,
    /// Searches at or below this were abandoned by the user.
    search_floor: Seq,
    latest_fetch_all: Seq,
    /// Newest full-list response applied to the cache and error banner.
    newest_list: Seq,
}

impl SearchState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn suggestions_visible(&self) -> bool {
        self.show_suggestions
    }

    /// The listings currently shown in the grid.
    #[must_use]
    pub fn results(&self) -> &[Listing] {
        &self.results
    }

    /// Last successful full catalog, kept so clearing the search can restore
    /// it before the refetch lands.
    #[must_use]
    pub fn catalog(&self) -> &[Listing] {
        &self.catalog
    }

    /// Dropdown entries: the head of the displayed set while visible.
    #[must_use]
    pub fn suggestions(&self) -> &[Listing] {
        if self.show_suggestions {
            &self.results[..self.results.len().min(SUGGESTION_COUNT)]
        } else {
            &[]
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn input_focused(&self) -> bool {
        self.input_focused
    }

    #[must_use]
    pub const fn form(&self) -> &ListingForm {
        &self.form
    }

    fn issue(&mut self) -> Seq {
        self.last_issued += 1;
        self.last_issued
    }

    /// Marks every search issued so far as stale. Pending full lists stay
    /// eligible.
    fn abandon_searches(&mut self) {
        self.search_floor = self.last_issued;
    }

    fn accept(&mut self, seq: Seq) -> bool {
        if seq > self.last_applied {
            self.last_applied = seq;
            true
        } else {
            false
        }
    }

    fn accept_search(&mut self, seq: Seq) -> bool {
        seq > self.search_floor && self.accept(seq)
    }

    /// Only the newest full-list outcome may touch the cache or the banner.
    fn accept_list(&mut self, seq: Seq) -> bool {
        if seq >= self.newest_list {
            self.newest_list = seq;
            true
        } else {
            false
        }
    }

    fn fetch_all(&mut self) -> Command {
        let seq = self.issue();
        self.latest_fetch_all = seq;
        self.loading = true;
        Command::FetchAll { seq }
    }

    pub fn apply(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Mount => Some(self.fetch_all()),

            Event::Keystroke(text) => {
                self.query = text;
                self.input_focused = true;
                if self.query.is_empty() {
                    self.show_suggestions = false;
                    self.abandon_searches();
                    None
                } else {
                    let seq = self.issue();
                    Some(Command::Search {
                        seq,
                        query: self.query.clone(),
                    })
                }
            }

            Event::SuggestionClick(listing) => {
                self.query = listing.label();
                self.show_suggestions = false;
                self.abandon_searches();
                None
            }

            Event::ClearSearch => {
                self.query.clear();
                self.show_suggestions = false;
                self.input_focused = false;
                self.abandon_searches();
                self.results.clone_from(&self.catalog);
                Some(self.fetch_all())
            }

            Event::OutsideClick => {
                self.show_suggestions = false;
                None
            }

            Event::InputFocused => {
                self.input_focused = true;
                None
            }

            Event::FormFieldChanged(field, value) => {
                self.form.set(field, value);
                None
            }

            Event::FormSubmit => match self.form.to_new_listing() {
                Ok(fields) => Some(Command::Insert(fields)),
                Err(e) => {
                    warn!("Not submitting listing: {}", e);
                    None
                }
            },

            Event::CatalogLoaded { seq, result } => {
                if seq >= self.latest_fetch_all {
                    self.loading = false;
                }
                if !self.accept_list(seq) {
                    debug!(seq, "Discarding superseded catalog response");
                    return None;
                }
                match result {
                    Ok(listings) => {
                        self.error = None;
                        if self.accept(seq) {
                            self.results.clone_from(&listings);
                        } else {
                            debug!(seq, "Catalog response older than shown results");
                        }
                        self.catalog = listings;
                    }
                    Err(e) => {
                        error!("Error fetching products: {}", e);
                        self.error = Some(CATALOG_LOAD_FAILED.to_string());
                    }
                }
                None
            }

            Event::SearchCompleted { seq, result } => {
                match result {
                    Ok(listings) if self.accept_search(seq) => {
                        self.results = listings;
                        self.show_suggestions = true;
                    }
                    Ok(_) => debug!(seq, "Discarding stale search response"),
                    Err(e) => warn!("Error searching products: {}", e),
                }
                None
            }

            Event::InsertCompleted(result) => {
                match result {
                    Ok(listing) => {
                        self.catalog.push(listing.clone());
                        self.results.push(listing);
                        self.form.reset();
                    }
                    Err(e) => error!("Error adding product: {}", e),
                }
                None
            }
        }
    }
}
