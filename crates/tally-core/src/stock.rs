//! # Stock Ledger
//!
//! The authoritative product collection plus the movement counter.
//!
//! ## State
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StockLedger                                                            │
//! │                                                                         │
//! │  products: [1001 Notebook 45] [1002 Monitor 120] [1003 Teclado 210] ... │
//! │            ▲ display order = insertion order, kept across edits         │
//! │                                                                         │
//! │  next_movement_id: 1 ──accepted movement──► 2 ──accepted──► 3 ...       │
//! │                      (rejected movements never consume an id)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutation Rules
//! Every operation validates completely before it mutates. On error the
//! ledger is exactly as it was before the call.
//!
//! The ledger does not know which product the user has selected for the next
//! movement; that belongs to the caller. [`StockLedger::first_code`] is what
//! the caller needs to keep its selection valid.
//!
//! Single-writer: callers sharing a ledger must serialize access (the desk
//! keeps it behind a `Mutex`).

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{MovementKind, Product, ProductCode};
use crate::validation::{
    is_valid_code, validate_description, validate_movement_quantity, validate_stock_level,
};

// =============================================================================
// Requests & Results
// =============================================================================

/// A stock movement as typed by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MovementRequest {
    /// Target product. `None` when nothing is selected.
    pub product_code: Option<ProductCode>,
    pub kind: MovementKind,
    pub quantity: i64,
    pub description: String,
}

impl MovementRequest {
    pub fn new(product_code: ProductCode, kind: MovementKind, quantity: i64) -> Self {
        MovementRequest {
            product_code: Some(product_code),
            kind,
            quantity,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Outcome of an accepted movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MovementResult {
    /// Counter value at the time the movement was accepted.
    pub movement_id: u64,
    pub product_code: ProductCode,
    pub kind: MovementKind,
    pub quantity: i64,
    /// Quantity on hand after the movement.
    pub new_quantity: i64,
    pub description: String,
}

/// Replacement data for an existing product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductEdit {
    /// New code; may equal the original.
    pub code: ProductCode,
    pub description: String,
    pub quantity: i64,
}

impl From<ProductEdit> for Product {
    fn from(edit: ProductEdit) -> Self {
        Product {
            code: edit.code,
            description: edit.description.trim().to_string(),
            quantity: edit.quantity,
        }
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// In-memory inventory ledger.
///
/// ## Invariants
/// - Product codes are unique and positive
/// - Quantities are never negative
/// - `next_movement_id` starts at 1 and grows by exactly 1 per accepted
///   movement
#[derive(Debug, Clone)]
pub struct StockLedger {
    products: Vec<Product>,
    next_movement_id: u64,
}

impl StockLedger {
    /// Builds a ledger from seed products, checking every invariant.
    ///
    /// ## Errors
    /// - `InvalidCode` for a non-positive code
    /// - `DuplicateCode` when two seed products share a code
    /// - `Validation` for a negative quantity or empty description
    pub fn new(seed: Vec<Product>) -> CoreResult<Self> {
        for (index, product) in seed.iter().enumerate() {
            check_product(product)?;

            if let Some(existing) = seed[..index].iter().find(|p| p.code == product.code) {
                return Err(CoreError::DuplicateCode {
                    code: product.code,
                    existing_description: existing.description.clone(),
                });
            }
        }

        debug!(products = seed.len(), "stock ledger initialised");

        Ok(StockLedger {
            products: seed,
            next_movement_id: 1,
        })
    }

    /// Empty ledger.
    pub fn empty() -> Self {
        StockLedger {
            products: Vec::new(),
            next_movement_id: 1,
        }
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    /// Products in display order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by code.
    pub fn get(&self, code: ProductCode) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }

    pub fn contains(&self, code: ProductCode) -> bool {
        self.get(code).is_some()
    }

    /// Code of the first product, the default movement target.
    pub fn first_code(&self) -> Option<ProductCode> {
        self.products.first().map(|p| p.code)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Id the next accepted movement will receive.
    pub fn next_movement_id(&self) -> u64 {
        self.next_movement_id
    }

    /// Owned copy of the current products (for exports and tables).
    pub fn snapshot(&self) -> Vec<Product> {
        self.products.clone()
    }

    fn position(&self, code: ProductCode) -> Option<usize> {
        self.products.iter().position(|p| p.code == code)
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Applies an inflow or outflow. The only way quantities change.
    ///
    /// ## Flow
    /// ```text
    /// quantity <= 0 ─────────────► Validation(MustBePositive)
    /// no product selected ───────► Validation(Required)
    /// unknown code ──────────────► NotFound
    /// outflow > on hand ─────────► InsufficientStock   (ledger untouched)
    /// otherwise ─────────────────► quantity updated, counter += 1
    /// ```
    pub fn apply_movement(&mut self, request: &MovementRequest) -> CoreResult<MovementResult> {
        let outcome = self.try_apply_movement(request);

        if let Err(err) = &outcome {
            warn!(
                code = ?request.product_code,
                kind = %request.kind,
                quantity = request.quantity,
                error = %err,
                "stock movement rejected"
            );
        }

        outcome
    }

    fn try_apply_movement(&mut self, request: &MovementRequest) -> CoreResult<MovementResult> {
        validate_movement_quantity(request.quantity)?;

        let code = request.product_code.ok_or_else(|| ValidationError::Required {
            field: "product".to_string(),
        })?;

        let index = self.position(code).ok_or(CoreError::NotFound { code })?;
        let current = self.products[index].quantity;

        let new_quantity = match request.kind {
            MovementKind::Inflow => {
                current
                    .checked_add(request.quantity)
                    .ok_or_else(|| ValidationError::OutOfRange {
                        field: "quantity".to_string(),
                        min: 1,
                        max: i64::MAX - current,
                    })?
            }
            MovementKind::Outflow => {
                if !self.products[index].can_ship(request.quantity) {
                    return Err(CoreError::InsufficientStock {
                        code,
                        available: current,
                        requested: request.quantity,
                    });
                }
                current - request.quantity
            }
        };

        // All checks passed: mutate.
        let movement_id = self.next_movement_id;
        self.products[index].quantity = new_quantity;
        self.next_movement_id += 1;

        info!(
            movement_id,
            code,
            kind = %request.kind,
            quantity = request.quantity,
            new_quantity,
            "stock movement applied"
        );

        Ok(MovementResult {
            movement_id,
            product_code: code,
            kind: request.kind,
            quantity: request.quantity,
            new_quantity,
            description: request.description.clone(),
        })
    }

    /// Replaces the product at `original_code` in place, keeping its position.
    ///
    /// ## Errors
    /// - `InvalidCode` if the new code is not positive
    /// - `DuplicateCode` if another product already owns the new code
    /// - `NotFound` if `original_code` is unknown
    /// - `Validation` for a negative quantity or bad description
    ///
    /// When the code changes, whoever tracks the movement target must
    /// retarget from `original_code` to the new code.
    pub fn edit_product(
        &mut self,
        original_code: ProductCode,
        edit: ProductEdit,
    ) -> CoreResult<Product> {
        if !is_valid_code(edit.code) {
            warn!(original_code, code = edit.code, "edit rejected: invalid code");
            return Err(CoreError::InvalidCode { code: edit.code });
        }

        if let Some(existing) = self
            .products
            .iter()
            .find(|p| p.code == edit.code && p.code != original_code)
        {
            warn!(original_code, code = edit.code, "edit rejected: duplicate code");
            return Err(CoreError::DuplicateCode {
                code: edit.code,
                existing_description: existing.description.clone(),
            });
        }

        let index = self.position(original_code).ok_or(CoreError::NotFound {
            code: original_code,
        })?;

        let product = Product::from(edit);
        validate_description(&product.description)?;
        validate_stock_level(product.quantity)?;

        self.products[index] = product.clone();

        info!(original_code, code = product.code, "product edited");
        Ok(product)
    }

    /// Removes a product; the remaining order is preserved.
    ///
    /// Confirmation ("are you sure?") is the caller's business: this call
    /// deletes immediately.
    pub fn delete_product(&mut self, code: ProductCode) -> CoreResult<Product> {
        let index = self.position(code).ok_or_else(|| {
            warn!(code, "delete rejected: not found");
            CoreError::NotFound { code }
        })?;

        let removed = self.products.remove(index);
        info!(code, remaining = self.products.len(), "product deleted");
        Ok(removed)
    }
}

impl Default for StockLedger {
    fn default() -> Self {
        StockLedger::empty()
    }
}

/// Checks a single product record against the ledger invariants.
fn check_product(product: &Product) -> CoreResult<()> {
    if !is_valid_code(product.code) {
        return Err(CoreError::InvalidCode { code: product.code });
    }
    validate_description(&product.description)?;
    validate_stock_level(product.quantity)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
