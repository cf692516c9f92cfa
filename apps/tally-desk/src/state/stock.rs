//! # Stock State
//!
//! Holds the stock ledger together with the per-session selections the
//! screens used to keep in globals: the movement target and a deletion
//! waiting for confirmation.
//!
//! ## Thread Safety
//! Ledger, target and pending deletion sit behind ONE `Arc<Mutex<T>>`, so
//! "check the target, validate, mutate, retarget" runs as a single step.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Session Operations                             │
//! │                                                                         │
//! │  User Action            Command                 Session Change          │
//! │  ───────────            ───────                 ──────────────          │
//! │                                                                         │
//! │  Pick product ────────► select_target() ──────► target = code           │
//! │                                                                         │
//! │  In / Out ────────────► apply_movement() ─────► ledger.apply_movement   │
//! │                                                                         │
//! │  Save edit ───────────► edit_product() ───────► ledger.edit_product     │
//! │                                                 target follows new code │
//! │                                                                         │
//! │  Click delete ────────► request_delete() ─────► pending = code          │
//! │  Confirm ─────────────► confirm_delete() ─────► ledger.delete_product   │
//! │                                                 target → first or none  │
//! │  Cancel ──────────────► cancel_delete() ──────► pending = none          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tally_core::{
    CoreError, CoreResult, MovementKind, MovementRequest, MovementResult, Product, ProductCode,
    ProductEdit, StockLedger,
};
use tracing::{debug, info};
use ts_rs::TS;

/// A deletion the user asked for but has not confirmed yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PendingDeletion {
    pub code: ProductCode,
    pub description: String,
}

/// Outcome of a confirmed deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deletion {
    pub removed: Product,
    /// Target after the deletion.
    pub target: Option<ProductCode>,
}

/// The ledger plus session selections.
///
/// ## Invariants
/// - `target` is `None` only when no product is selectable, or refers to a
///   product in the ledger
/// - `pending_delete` never changes the ledger by itself
#[derive(Debug, Clone)]
pub struct StockSession {
    ledger: StockLedger,
    target: Option<ProductCode>,
    pending_delete: Option<PendingDeletion>,
}

impl StockSession {
    /// Starts a session targeting the first product.
    pub fn new(ledger: StockLedger) -> Self {
        let target = ledger.first_code();
        StockSession {
            ledger,
            target,
            pending_delete: None,
        }
    }

    pub fn ledger(&self) -> &StockLedger {
        &self.ledger
    }

    pub fn target(&self) -> Option<ProductCode> {
        self.target
    }

    pub fn pending_delete(&self) -> Option<&PendingDeletion> {
        self.pending_delete.as_ref()
    }

    /// Selects the movement target.
    ///
    /// ## Errors
    /// `NotFound` when the code is unknown; the current target is kept.
    pub fn select_target(&mut self, code: ProductCode) -> CoreResult<&Product> {
        let product = self
            .ledger
            .get(code)
            .ok_or(CoreError::NotFound { code })?;

        debug!(code, "movement target selected");
        self.target = Some(code);
        Ok(product)
    }

    /// Applies a movement to the current target.
    pub fn apply_movement(
        &mut self,
        kind: MovementKind,
        quantity: i64,
        description: &str,
    ) -> CoreResult<MovementResult> {
        let request = MovementRequest {
            product_code: self.target,
            kind,
            quantity,
            description: description.to_string(),
        };
        self.ledger.apply_movement(&request)
    }

    /// Edits a product; the target follows a code change.
    pub fn edit_product(
        &mut self,
        original_code: ProductCode,
        edit: ProductEdit,
    ) -> CoreResult<Product> {
        let product = self.ledger.edit_product(original_code, edit)?;

        if self.target == Some(original_code) && product.code != original_code {
            debug!(from = original_code, to = product.code, "target follows edited code");
            self.target = Some(product.code);
        }
        if let Some(pending) = self.pending_delete.as_mut() {
            if pending.code == original_code {
                pending.code = product.code;
                pending.description = product.description.clone();
            }
        }

        Ok(product)
    }

    /// Records a deletion request. The ledger is untouched.
    ///
    /// A second request replaces the first.
    pub fn request_delete(&mut self, code: ProductCode) -> CoreResult<PendingDeletion> {
        let product = self
            .ledger
            .get(code)
            .ok_or(CoreError::NotFound { code })?;

        let pending = PendingDeletion {
            code,
            description: product.description.clone(),
        };
        debug!(code, "deletion awaiting confirmation");
        self.pending_delete = Some(pending.clone());
        Ok(pending)
    }

    /// Performs the pending deletion, if any.
    ///
    /// Returns `Ok(None)` when nothing was pending. After removing the
    /// targeted product the target falls back to the new first product, or
    /// none when the ledger is empty.
    pub fn confirm_delete(&mut self) -> CoreResult<Option<Deletion>> {
        let Some(pending) = self.pending_delete.take() else {
            return Ok(None);
        };

        let removed = self.ledger.delete_product(pending.code)?;

        if self.target == Some(removed.code) {
            self.target = self.ledger.first_code();
            info!(code = removed.code, target = ?self.target, "target reset after deletion");
        }

        Ok(Some(Deletion {
            removed,
            target: self.target,
        }))
    }

    /// Drops the pending deletion. Returns what was dropped.
    pub fn cancel_delete(&mut self) -> Option<PendingDeletion> {
        let dropped = self.pending_delete.take();
        if let Some(pending) = &dropped {
            debug!(code = pending.code, "deletion cancelled");
        }
        dropped
    }
}

/// Shared stock session.
///
/// ## Why Not RwLock?
/// Every command that matters writes; reads are short table renders.
#[derive(Debug, Clone)]
pub struct StockState {
    session: Arc<Mutex<StockSession>>,
}

impl StockState {
    pub fn new(ledger: StockLedger) -> Self {
        StockState {
            session: Arc::new(Mutex::new(StockSession::new(ledger))),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let rows = stock_state.with_session(|s| s.ledger().snapshot());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&StockSession) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut StockSession) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }
}
