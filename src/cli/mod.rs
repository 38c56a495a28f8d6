//! CLI module - Command-line interface for mobilestore
//!
//! Every command except `serve` and `init` talks to a running server through
//! the catalog HTTP client.

mod commands;

use clap::{Parser, Subcommand};

/// mobilestore - Mobile phone catalog
/// Serve the catalog API or query a running instance
#[derive(Parser)]
#[command(name = "mobilestore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the catalog API server
    #[command(alias = "web", alias = "daemon")]
    Serve,

    /// List every listing in the catalog
    #[command(alias = "ls", alias = "l")]
    List,

    /// Search brand, model, processor and camera (max 5 results)
    #[command(alias = "s")]
    Search {
        /// Search text, matched literally and case-insensitively
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Add a listing from field=value pairs
    #[command(alias = "a")]
    Add {
        /// e.g. brand=Apple "model=iPhone 15" storage=128 price=79900
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Interactive search session with live suggestions
    #[command(alias = "b")]
    Browse,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
