pub mod limits {

    /// Upper bound on listings returned by a single search.
    pub const MAX_SEARCH_RESULTS: u64 = 5;

    /// Number of search results shown in the suggestion dropdown.
    pub const SUGGESTION_COUNT: usize = 5;
}

pub mod messages {

    pub const CATALOG_LOAD_FAILED: &str = "Unable to load products. Please try again later.";

    pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
}

pub mod timeouts {
    use std::time::Duration;

    pub const DB_CONNECT: Duration = Duration::from_secs(10);

    pub const DB_ACQUIRE: Duration = Duration::from_secs(10);
}
