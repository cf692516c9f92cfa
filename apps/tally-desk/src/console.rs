//! # Console Front End
//!
//! Line-oriented front end: one command per line in, text out.
//!
//! ```text
//! tally> stock
//!   Code   Description                          Qty
//! > 1001   Notebook Gamer X-Pro                  45
//!   1002   Monitor Curvo UltraWide              120
//! tally> out 50
//! [danger] Error: Insufficient stock for product 1001: available 45, requested 50
//! ```

use std::io::{self, BufRead, Write};

use tally_core::validation::{parse_code, parse_quantity};
use tally_core::{Feedback, MovementKind, ProductEdit, Severity};

use crate::commands::export::{export_stock, ExportFormat};
use crate::commands::{commission, interest, stock};
use crate::error::AppError;
use crate::Desk;

const PROMPT: &str = "tally> ";

const HELP: &str = "\
Commands:
  report                                 commission report
  stock                                  stock table (> marks the movement target)
  target <code>                          select the movement target
  in [qty] [description]                 inflow on the target
  out [qty] [description]                outflow on the target
  edit <code> <new-code> <qty> <desc>    replace a product
  delete <code>                          ask to delete a product
  confirm | cancel                       answer a pending deletion
  interest <principal> <due> <paid>      overdue interest (dates: YYYY-MM-DD or DD/MM/YYYY)
  export xlsx|pdf                        export the stock table
  help                                   this text
  quit                                   leave";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Report,
    Stock,
    Target(String),
    Movement {
        kind: MovementKind,
        quantity: Option<String>,
        description: Option<String>,
    },
    Edit {
        original_code: String,
        edit: ProductEdit,
    },
    Delete(String),
    Confirm,
    Cancel,
    Interest {
        principal: String,
        due_date: Option<String>,
        payment_date: Option<String>,
    },
    Export(ExportFormat),
    Help,
    Quit,
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

/// Parses one line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, AppError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();
    let rest = |from: usize| -> Option<String> {
        let text = args.get(from..).map(|w| w.join(" ")).unwrap_or_default();
        (!text.is_empty()).then_some(text)
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "report" => ConsoleCommand::Report,
        "stock" => ConsoleCommand::Stock,
        "target" => ConsoleCommand::Target(args.first().copied().unwrap_or_default().to_string()),
        "in" | "out" => ConsoleCommand::Movement {
            kind: if verb.eq_ignore_ascii_case("in") {
                MovementKind::Inflow
            } else {
                MovementKind::Outflow
            },
            quantity: args.first().map(|q| q.to_string()),
            description: rest(1),
        },
        "edit" => {
            if args.len() < 4 {
                return Err(AppError::validation(
                    "usage: edit <code> <new-code> <qty> <description>",
                ));
            }
            ConsoleCommand::Edit {
                original_code: args[0].to_string(),
                edit: ProductEdit {
                    code: parse_code(args[1])?,
                    quantity: parse_quantity(args[2])?,
                    description: rest(3).unwrap_or_default(),
                },
            }
        }
        "delete" => ConsoleCommand::Delete(args.first().copied().unwrap_or_default().to_string()),
        "confirm" => ConsoleCommand::Confirm,
        "cancel" => ConsoleCommand::Cancel,
        "interest" => ConsoleCommand::Interest {
            principal: args.first().copied().unwrap_or_default().to_string(),
            due_date: args.get(1).map(|d| d.to_string()),
            payment_date: args.get(2).map(|d| d.to_string()),
        },
        "export" => {
            let name = args.first().copied().unwrap_or_default();
            let format = ExportFormat::from_name(name).ok_or_else(|| {
                AppError::validation(format!("unknown export format '{}' (xlsx or pdf)", name))
            })?;
            ConsoleCommand::Export(format)
        }
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => {
            return Err(AppError::unknown_command(format!(
                "unknown command '{}', type 'help'",
                other
            )))
        }
    };

    Ok(Some(command))
}

/// Runs one command against the desk and renders the result.
pub fn execute(desk: &Desk, command: ConsoleCommand) -> Result<Flow, AppError> {
    let config = &desk.config;

    let text = match command {
        ConsoleCommand::Report => render_report(&commission::commission_report(config, &desk.sales)),
        ConsoleCommand::Stock => render_stock(&stock::stock_table(&desk.stock)),
        ConsoleCommand::Target(code) => {
            render_feedback(&stock::select_target(config, &desk.stock, &code)?.feedback)
        }
        ConsoleCommand::Movement {
            kind,
            quantity,
            description,
        } => {
            let response = stock::apply_movement(
                config,
                &desk.stock,
                kind,
                quantity.as_deref(),
                description.as_deref(),
            )?;
            render_feedback(&response.feedback)
        }
        ConsoleCommand::Edit {
            original_code,
            edit,
        } => {
            let original_code = parse_code(&original_code)?;
            render_feedback(&stock::edit_product(config, &desk.stock, original_code, edit)?.feedback)
        }
        ConsoleCommand::Delete(code) => {
            render_feedback(&stock::request_delete(config, &desk.stock, &code)?.feedback)
        }
        ConsoleCommand::Confirm => {
            let response = stock::confirm_delete(config, &desk.stock)?;
            let target = match response.target {
                Some(code) => format!("Movement target: {}", code),
                None => "No movement target.".to_string(),
            };
            format!("{}\n{}", render_feedback(&response.feedback), target)
        }
        ConsoleCommand::Cancel => render_feedback(&stock::cancel_delete(config, &desk.stock)),
        ConsoleCommand::Interest {
            principal,
            due_date,
            payment_date,
        } => {
            let response = interest::calculate_interest(
                config,
                &principal,
                due_date.as_deref(),
                payment_date.as_deref(),
            )?;
            render_feedback(&response.feedback)
        }
        ConsoleCommand::Export(format) => {
            render_feedback(&export_stock(config, &desk.stock, format))
        }
        ConsoleCommand::Help => HELP.to_string(),
        ConsoleCommand::Quit => return Ok(Flow::Quit),
    };

    Ok(Flow::Continue(text))
}

/// Reads commands from `input` until EOF or `quit`.
///
/// Command errors are printed and the loop goes on; only I/O errors end it.
pub fn run_console<R: BufRead, W: Write>(desk: &Desk, input: R, mut output: W) -> io::Result<()> {
    writeln!(output, "Tally back office. Type 'help' for commands.")?;

    let mut lines = input.lines();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;

        let flow = parse_command(&line).and_then(|command| match command {
            Some(command) => execute(desk, command),
            None => Ok(Flow::Continue(String::new())),
        });

        match flow {
            Ok(Flow::Continue(text)) if text.is_empty() => {}
            Ok(Flow::Continue(text)) => writeln!(output, "{}", text)?,
            Ok(Flow::Quit) => break,
            Err(err) => writeln!(
                output,
                "{}",
                render_feedback(&err.feedback(desk.config.feedback_display_ms))
            )?,
        }
    }

    Ok(())
}

// =============================================================================
// Rendering
// =============================================================================

fn render_feedback(feedback: &Feedback) -> String {
    let tag = match feedback.severity {
        Severity::Success => "success",
        Severity::Danger => "danger",
        Severity::Info => "info",
    };
    format!("[{}] {}", tag, feedback.message)
}

fn render_stock(table: &stock::StockTableResponse) -> String {
    if table.products.is_empty() {
        return "No products in stock.".to_string();
    }

    let mut out = format!("  {:<6} {:<36} {:>5}", "Code", "Description", "Qty");
    for product in &table.products {
        let marker = if table.target == Some(product.code) { '>' } else { ' ' };
        out.push_str(&format!(
            "\n{} {:<6} {:<36} {:>5}",
            marker, product.code, product.description, product.quantity
        ));
    }
    out.push_str(&format!("\nNext movement: #{}", table.next_movement_id));
    if let Some(pending) = &table.pending_delete {
        out.push_str(&format!("\nAwaiting confirmation: delete {}", pending.code));
    }
    out
}

fn render_report(response: &commission::CommissionReportResponse) -> String {
    let mut out = format!("{:<24} {:>16} {:>10}", "Seller", "Commission", "Share");
    for line in &response.lines {
        out.push_str(&format!(
            "\n{:<24} {:>16} {:>10}",
            line.seller, line.commission, line.share
        ));
    }
    out.push_str(&format!(
        "\n{:<24} {:>16} {:>10}",
        "Grand total", response.grand_total, response.grand_total_share
    ));
    out
}
