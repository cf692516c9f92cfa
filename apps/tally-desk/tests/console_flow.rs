//! End-to-end console sessions against the demo data.

use std::io::Cursor;

use rust_decimal::Decimal;
use tally_core::{Money, Product, Sale};
use tally_desk::console::run_console;
use tally_desk::error::ErrorCode;
use tally_desk::seed::SeedData;
use tally_desk::state::DeskConfig;
use tally_desk::Desk;

fn run(desk: &Desk, script: &str) -> String {
    let mut output = Vec::new();
    run_console(desk, Cursor::new(script), &mut output).expect("in-memory I/O");
    String::from_utf8(output).expect("utf-8 output")
}

fn demo_desk() -> Desk {
    Desk::new(DeskConfig::default(), SeedData::demo()).expect("demo seed is valid")
}

#[test]
fn movement_ids_skip_rejected_movements() {
    let desk = demo_desk();
    let out = run(&desk, "out 50\nin 10 Compra\nout 999\nout 5\nquit\n");

    assert!(out.contains("[danger] Error: Insufficient stock for product 1001: available 45, requested 50"));
    assert!(out.contains("Movement #1: INFLOW of 10 units"));
    assert!(out.contains("Movement #2: OUTFLOW of 5 units"));

    let quantity = desk.stock.with_session(|s| s.ledger().get(1001).map(|p| p.quantity));
    assert_eq!(quantity, Some(50));
}

#[test]
fn report_lists_highest_commission_first() {
    let out = run(&demo_desk(), "report\n");

    let ana = out.find("Ana Paula").expect("Ana in report");
    let carlos = out.find("Carlos Silva").expect("Carlos in report");
    let david = out.find("David Rocha").expect("David in report");
    assert!(ana < carlos && carlos < david);
    assert!(out.contains("R$ 169,50"));

    let grand_total = out
        .lines()
        .find(|line| line.starts_with("Grand total"))
        .expect("grand total row");
    assert!(grand_total.contains("R$ 169,50"));
    assert!(grand_total.ends_with("100,00%"));
}

#[test]
fn deleting_target_moves_to_new_first_product() {
    let desk = demo_desk();
    let out = run(&desk, "delete 1001\nstock\nconfirm\nin 1\n");

    assert!(out.contains("Awaiting confirmation: delete 1001"));
    assert!(out.contains("Movement target: 1002"));
    assert!(out.contains("Stock of \"Monitor Curvo UltraWide\" is now 121 units."));
}

#[test]
fn deleting_only_product_leaves_no_target() {
    let seed = SeedData {
        sales: Vec::new(),
        products: vec![Product::new(1001, "Notebook Gamer X-Pro", 45)],
    };
    let desk = Desk::new(DeskConfig::default(), seed).unwrap();
    let out = run(&desk, "delete 1001\nconfirm\nstock\nin 5\n");

    assert!(out.contains("No movement target."));
    assert!(out.contains("No products in stock."));
    assert!(out.contains("[danger] Error: product is required"));
    assert_eq!(desk.stock.with_session(|s| s.target()), None);
}

#[test]
fn edit_keeps_target_on_renamed_product() {
    let desk = demo_desk();
    let out = run(
        &desk,
        "edit 1001 1002 10 Clash\nedit 1001 2001 40 Notebook X-Pro 2\nout 5\n",
    );

    assert!(out.contains("[danger] Error: Code 1002 is already used by another product"));
    assert!(out.contains("Product 2001 saved"));
    assert!(out.contains("Stock of \"Notebook X-Pro 2\" is now 35 units."));
}

#[test]
fn interest_breakdown() {
    let out = run(
        &demo_desk(),
        "interest 500 2024-03-01 2024-03-01\n\
         interest 500 2024-03-01 2024-03-08\n\
         interest -5 2024-03-01 2024-03-08\n\
         interest 79228162514264337593543950335 2024-03-01 2024-03-02\n\
         interest 500 2024-03-01 2024-03-08\n",
    );

    assert!(out.contains("[success] Paid on time."));
    assert!(out.contains("[danger] Paid 7 day(s) late (due 01/03/2024, paid 08/03/2024)."));
    assert!(out.contains("Total due: R$ 511,17"));
    assert!(out.contains("[danger] Error: Invalid input for principal: must be greater than zero"));
    assert!(out.contains("[danger] Error: Invalid input for principal: too large"));
    // The loop keeps going after an oversized principal.
    assert_eq!(out.matches("Total due: R$ 511,17").count(), 2);
}

#[test]
fn overflowing_seed_sales_are_rejected() {
    let seed = SeedData {
        sales: vec![Sale::new("Carlos Silva", Money::new(Decimal::MAX)); 21],
        products: Vec::new(),
    };
    let err = Desk::new(DeskConfig::default(), seed).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn unknown_commands_do_not_stop_the_loop() {
    let out = run(&demo_desk(), "dance\nexport xlsx\nhelp\n");

    assert!(out.contains("unknown command 'dance'"));
    assert!(out.contains("[info] Excel export of 4 product(s)"));
    assert!(out.contains("Commands:"));
}
