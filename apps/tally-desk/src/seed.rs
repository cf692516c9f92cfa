//! # Seed Data
//!
//! Sales and products the desk starts with.
//!
//! ## Sources
//! 1. A JSON file named by `TALLY_SEED_PATH`
//! 2. The built-in demo data (four sellers, four products)
//!
//! ## File Format
//! ```json
//! {
//!   "sales":    [ { "seller": "Ana Paula", "amount": "650.00" } ],
//!   "products": [ { "code": 1001, "description": "Notebook Gamer X-Pro", "quantity": 45 } ]
//! }
//! ```
//! Portuguese keys (`vendas`, `estoque`, `vendedor`, `valor`,
//! `codigoProduto`, `descricaoProduto`) are accepted too.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tally_core::{Money, Product, Sale};
use thiserror::Error;
use tracing::info;

/// Errors raised while reading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("could not read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("seed file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Initial sales and stock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default, alias = "vendas")]
    pub sales: Vec<Sale>,

    #[serde(default, alias = "estoque")]
    pub products: Vec<Product>,
}

impl SeedData {
    /// Reads a seed file from disk.
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let seed = SeedData::from_json(&raw).map_err(|source| SeedError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            path = %path.display(),
            sales = seed.sales.len(),
            products = seed.products.len(),
            "seed file loaded"
        );
        Ok(seed)
    }

    /// Parses seed JSON.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Loads `path` when given, otherwise the demo data.
    pub fn load_or_demo(path: Option<&Path>) -> Result<Self, SeedError> {
        match path {
            Some(path) => SeedData::load(path),
            None => Ok(SeedData::demo()),
        }
    }

    /// Demo data covering every commission tier and a small stock list.
    pub fn demo() -> Self {
        let sale = |seller: &str, cents: i64| Sale::new(seller, Money::from_cents(cents));

        SeedData {
            sales: vec![
                // >= 500.00 → 5%
                sale("Ana Paula", 65000),
                sale("Carlos Silva", 120000),
                sale("Ana Paula", 50000),
                // 100.00 to < 500.00 → 1%
                sale("Bianca Lima", 25000),
                sale("Carlos Silva", 15000),
                sale("Bianca Lima", 49999),
                // < 100.00 → 0%
                sale("David Rocha", 9999),
                sale("David Rocha", 5000),
                sale("Ana Paula", 80000),
                sale("Carlos Silva", 30000),
            ],
            products: vec![
                Product::new(1001, "Notebook Gamer X-Pro", 45),
                Product::new(1002, "Monitor Curvo UltraWide", 120),
                Product::new(1003, "Teclado Mecânico RGB", 210),
                Product::new(1004, "Mouse Sem Fio Ergonômico", 88),
            ],
        }
    }
}
