//! 端到端: CSV 输入 -> 对账 -> 报表输出

use std::path::Path;
use stock_reconcile::files::{read_catalog, read_ledger, store_label, write_report};
use stock_reconcile::models::Report;
use stock_reconcile::{reconcile, OutputFormat};

const CATALOG: &str = "\
Group ID,Product Name,EAN,Category,Brand,Quantity
G001,Whole Milk 1L,6901234567890.0;6901234567890-6,Dairy,Acme,12
G002,Basmati Rice 5kg,111;222-A,Grocery,Oryza,4
G003,Orange Juice,333-A;444;333-B,Beverage,Sunny,6
G004,Dish Soap,,Household,Clean,10
G005,Sparkling Water,555,Beverage,Fizz,24
";

const LEDGER: &str = "\
Store Name,Barcode,In Stock Qty
Corner Shop,6901234567890-6,4
Corner Shop,6901234567890,3
Corner Shop,333-A,5
Corner Shop,333-B,3
Corner Shop,333-C,2
Corner Shop,444.0,1
Corner Shop,555,0
Corner Shop,nan,9
";

fn run() -> (Report, String) {
    let products = read_catalog(CATALOG.as_bytes(), b',', Path::new("1500Skus.csv")).unwrap();
    let ledger = read_ledger(LEDGER.as_bytes(), b',', Path::new("Instock.csv")).unwrap();
    let store = store_label(&ledger, "Supermarket");
    (reconcile(&products, &ledger), store)
}

#[test]
fn full_run_classifies_products() {
    let (report, store) = run();
    assert_eq!(store, "Corner Shop");

    let table = &report.final_output;
    assert_eq!(table.rows.len(), 5);
    // G003 matches 333-A, 444, 333-B
    assert_eq!(table.max_matches, 3);
    assert!(table.rows.iter().all(|r| r.slots.len() == 3));

    // G001: both barcodes match; base 6901234567890 = 4 + 3
    let milk = &table.rows[0];
    assert_eq!(milk.slots[0].barcode.as_deref(), Some("6901234567890"));
    assert_eq!(milk.slots[1].barcode.as_deref(), Some("6901234567890-6"));
    assert_eq!(milk.slots[0].quantity, 7);
    assert_eq!(milk.slots[1].quantity, 7);
    assert_eq!(milk.total_quantity, 14);

    // G002: no exact match for 111 or 222-A
    let rice = &table.rows[1];
    assert!(rice.slots.iter().all(|s| s.barcode.is_none() && s.quantity == 0));
    assert!(rice.needs_procurement());

    // G003: base 333 = 5 + 3 + 2, resolved per slot
    let juice = &table.rows[2];
    let quantities: Vec<i64> = juice.slots.iter().map(|s| s.quantity).collect();
    assert_eq!(quantities, vec![10, 1, 10]);
    assert_eq!(juice.total_quantity, 21);

    // G004 has a blank EAN; it matches the blank ("nan") ledger row exactly
    let soap = &table.rows[3];
    assert_eq!(soap.slots[0].barcode.as_deref(), Some(""));
    assert_eq!(soap.slots[0].quantity, 9);
    assert_eq!(soap.total_quantity, 9);

    // G005 matched but stock is zero
    let water = &table.rows[4];
    assert_eq!(water.slots[0].barcode.as_deref(), Some("555"));
    assert!(water.needs_procurement());

    let ids: Vec<&str> = report
        .need_to_procure
        .rows
        .iter()
        .map(|r| r.group_id.as_str())
        .collect();
    assert_eq!(ids, vec!["G002", "G005"]);
    assert_eq!(report.summary.in_stock, 3);
    assert_eq!(report.summary.need_to_procure, 2);
    assert_eq!(report.summary.total(), 5);
}

#[test]
fn shuffled_ledger_gives_same_report() {
    let products = read_catalog(CATALOG.as_bytes(), b',', Path::new("1500Skus.csv")).unwrap();
    let mut ledger = read_ledger(LEDGER.as_bytes(), b',', Path::new("Instock.csv")).unwrap();
    let forward = reconcile(&products, &ledger);
    ledger.reverse();
    let backward = reconcile(&products, &ledger);
    assert_eq!(forward, backward);
}

#[test]
fn writes_json_artifact_named_after_store() {
    let (report, store) = run();
    let dir = std::env::temp_dir().join(format!("reconcile-it-{}", std::process::id()));

    let location = write_report(&report, &store, &dir, OutputFormat::Json).unwrap();
    assert_eq!(location, dir.join("Corner Shop_output.json"));

    let value: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&location).unwrap()).unwrap();
    assert_eq!(value["sections"]["Summary"]["rows"][0][0], "Total In Stock");
    assert_eq!(value["sections"]["Summary"]["rows"][1][1], 2);
    assert_eq!(
        value["sections"]["Final Output"]["columns"].as_array().unwrap().len(),
        5 + 3 * 2 + 1
    );
    assert_eq!(
        value["sections"]["Need to Procure"]["rows"].as_array().unwrap().len(),
        2
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn padded_cells_and_huge_quantities_load_cleanly() {
    let catalog = "Group ID,Product Name,EAN,Category,Brand,Quantity\n G9 , Tea ,777,Drinks,Leaf,1\n";
    let ledger = "Store Name,Barcode,In Stock Qty\nShop,777,9223372036854775807\nShop,777-B,9223372036854775807\n";
    let products = read_catalog(catalog.as_bytes(), b',', Path::new("1500Skus.csv")).unwrap();
    let ledger = read_ledger(ledger.as_bytes(), b',', Path::new("Instock.csv")).unwrap();

    let report = reconcile(&products, &ledger);
    let row = &report.final_output.rows[0];
    assert_eq!(row.group_id, "G9");
    assert_eq!(row.name, "Tea");
    assert_eq!(row.total_quantity, i64::MAX);
}

#[test]
fn overflowing_quantity_aborts_load() {
    let ledger = "Store Name,Barcode,In Stock Qty\nS,1,1e30\nS,1-A,1e30\n";
    let err = read_ledger(ledger.as_bytes(), b',', Path::new("Instock.csv")).unwrap_err();
    assert!(err.to_string().contains("1e30"));
}

#[test]
fn missing_ledger_columns_abort_before_reconcile() {
    let bad = "Store Name,Code,Qty\nShop,1,2\n";
    let err = read_ledger(bad.as_bytes(), b',', Path::new("Instock.csv")).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Barcode"));
    assert!(msg.contains("In Stock Qty"));
    assert!(msg.contains("Instock.csv"));
}
