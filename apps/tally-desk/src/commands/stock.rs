//! # Stock Commands
//!
//! Stock table, movement target, movements, product edits and the
//! two-phase deletion.
//!
//! ## Deletion Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Deletion Lifecycle                                   │
//! │                                                                         │
//! │  ┌──────────┐  request_delete  ┌──────────┐  confirm_delete ┌────────┐  │
//! │  │  Idle    │─────────────────►│ Pending  │────────────────►│Deleted │  │
//! │  │          │◄─────────────────│          │                 │        │  │
//! │  └──────────┘  cancel_delete   └──────────┘                 └────────┘  │
//! │                                                                         │
//! │  The ledger only changes on confirm_delete.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tally_core::validation::{parse_code, parse_quantity};
use tally_core::{Feedback, MovementKind, MovementResult, Product, ProductCode, ProductEdit};
use tracing::debug;
use ts_rs::TS;

use super::timed;
use crate::error::AppError;
use crate::state::{DeskConfig, PendingDeletion, StockState};

// =============================================================================
// Responses
// =============================================================================

/// Current ordered product list plus session selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockTableResponse {
    pub products: Vec<Product>,
    pub target: Option<ProductCode>,
    pub next_movement_id: u64,
    pub pending_delete: Option<PendingDeletion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TargetResponse {
    pub product: Product,
    pub feedback: Feedback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MovementResponse {
    pub movement: MovementResult,
    pub feedback: Feedback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EditResponse {
    pub product: Product,
    /// Target after the edit (follows a code change).
    pub target: Option<ProductCode>,
    pub feedback: Feedback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DeleteRequestResponse {
    pub pending: PendingDeletion,
    pub feedback: Feedback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DeleteResponse {
    /// `None` when nothing was pending.
    pub removed: Option<Product>,
    pub target: Option<ProductCode>,
    pub feedback: Feedback,
}

// =============================================================================
// Commands
// =============================================================================

/// Gets the stock table.
pub fn stock_table(stock: &StockState) -> StockTableResponse {
    debug!("stock_table command");
    stock.with_session(|s| StockTableResponse {
        products: s.ledger().snapshot(),
        target: s.target(),
        next_movement_id: s.ledger().next_movement_id(),
        pending_delete: s.pending_delete().cloned(),
    })
}

/// Selects the product that subsequent movements apply to.
///
/// ## Arguments
/// * `code` - Product code as typed
pub fn select_target(
    config: &DeskConfig,
    stock: &StockState,
    code: &str,
) -> Result<TargetResponse, AppError> {
    debug!(code = %code, "select_target command");
    let code = parse_code(code)?;

    let product = stock.with_session_mut(|s| s.select_target(code).cloned())?;
    let feedback = timed(
        config,
        Feedback::info(format!(
            "Selected {} - {} ({} units)",
            product.code, product.description, product.quantity
        )),
    );

    Ok(TargetResponse { product, feedback })
}

/// Applies an inflow or outflow to the current target.
///
/// ## Arguments
/// * `quantity` - Quantity as typed; blank falls back to the configured
///   default quantity
/// * `description` - Free text; blank falls back to the configured default
///
/// ## Errors
/// - `VALIDATION_ERROR` for a malformed or non-positive quantity, or when
///   no product is selected
/// - `INSUFFICIENT_STOCK` when an outflow exceeds the quantity on hand
pub fn apply_movement(
    config: &DeskConfig,
    stock: &StockState,
    kind: MovementKind,
    quantity: Option<&str>,
    description: Option<&str>,
) -> Result<MovementResponse, AppError> {
    debug!(%kind, ?quantity, "apply_movement command");

    let quantity = match quantity.map(str::trim) {
        None | Some("") => config.default_quantity,
        Some(raw) => parse_quantity(raw)?,
    };
    let description = match description.map(str::trim) {
        None | Some("") => config.default_description.as_str(),
        Some(text) => text,
    };

    let (movement, product_name) = stock.with_session_mut(|s| {
        let movement = s.apply_movement(kind, quantity, description)?;
        let name = s
            .ledger()
            .get(movement.product_code)
            .map(|p| p.description.clone())
            .unwrap_or_default();
        Ok::<_, AppError>((movement, name))
    })?;

    let feedback = timed(
        config,
        Feedback::success(format!(
            "Movement #{}: {} of {} units ({}). Stock of \"{}\" is now {} units.",
            movement.movement_id,
            movement.kind,
            movement.quantity,
            movement.description,
            product_name,
            movement.new_quantity
        )),
    );

    Ok(MovementResponse { movement, feedback })
}

/// Replaces the product at `original_code` in place.
pub fn edit_product(
    config: &DeskConfig,
    stock: &StockState,
    original_code: ProductCode,
    edit: ProductEdit,
) -> Result<EditResponse, AppError> {
    debug!(original_code, code = edit.code, "edit_product command");

    let (product, target) = stock.with_session_mut(|s| {
        let product = s.edit_product(original_code, edit)?;
        Ok::<_, AppError>((product, s.target()))
    })?;

    let feedback = timed(
        config,
        Feedback::success(format!(
            "Product {} saved: \"{}\", {} units.",
            product.code, product.description, product.quantity
        )),
    );

    Ok(EditResponse {
        product,
        target,
        feedback,
    })
}

/// Asks for confirmation before deleting a product.
pub fn request_delete(
    config: &DeskConfig,
    stock: &StockState,
    code: &str,
) -> Result<DeleteRequestResponse, AppError> {
    debug!(code = %code, "request_delete command");
    let code = parse_code(code)?;

    let pending = stock.with_session_mut(|s| s.request_delete(code))?;
    let feedback = timed(
        config,
        Feedback::info(format!(
            "Delete product {} (\"{}\")? Type 'confirm' or 'cancel'.",
            pending.code, pending.description
        )),
    );

    Ok(DeleteRequestResponse { pending, feedback })
}

/// Deletes the product awaiting confirmation.
pub fn confirm_delete(config: &DeskConfig, stock: &StockState) -> Result<DeleteResponse, AppError> {
    debug!("confirm_delete command");

    let deletion = stock.with_session_mut(|s| s.confirm_delete())?;

    let response = match deletion {
        Some(deletion) => {
            let feedback = Feedback::success(format!(
                "Product {} (\"{}\") deleted.",
                deletion.removed.code, deletion.removed.description
            ));
            DeleteResponse {
                removed: Some(deletion.removed),
                target: deletion.target,
                feedback: timed(config, feedback),
            }
        }
        None => DeleteResponse {
            removed: None,
            target: stock.with_session(|s| s.target()),
            feedback: timed(config, Feedback::info("No deletion pending.")),
        },
    };

    Ok(response)
}

/// Drops the pending deletion.
pub fn cancel_delete(config: &DeskConfig, stock: &StockState) -> Feedback {
    debug!("cancel_delete command");

    let feedback = match stock.with_session_mut(|s| s.cancel_delete()) {
        Some(pending) => Feedback::info(format!("Deletion of product {} cancelled.", pending.code)),
        None => Feedback::info("No deletion pending."),
    };
    timed(config, feedback)
}

// =============================================================================
// Unit Tests
// =============================================================================
