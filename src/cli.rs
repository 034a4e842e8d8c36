//! Command-line interface of the `catalog-view` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::model::{CategoryId, ProductId};
use crate::sources::FetchPolicy;

#[derive(Debug, Parser)]
#[command(name = "catalog-view", version, about = "Browse a product catalog from the terminal")]
pub struct Cli {
    /// Config file (default: platform config dir/catalog-view/config.toml)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Override api.base_url
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Print views as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Product list, optionally filtered by category
    List {
        /// Category id to filter by (0 = all)
        #[arg(long, default_value_t = 0)]
        category: CategoryId,
        /// Number of placeholder products to add locally
        #[arg(long, default_value_t = 0)]
        add: u32,
    },
    /// Detail view of one product with its suppliers
    Detail { id: ProductId },
    /// Category list
    Categories,
    /// Fetch the demo supplier ids under a fan-out policy
    Suppliers {
        #[arg(long, value_enum, default_value_t = FetchPolicy::Serial)]
        policy: FetchPolicy,
    },
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(url) = &self.base_url {
            config.api.base_url = url.clone();
        }
    }
}
