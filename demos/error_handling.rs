//! Error handling example for mastdup-rs
//!
//! Every failure below is reported as a `MastError`; none of them needs the
//! network.

use mastdup_core::prelude::*;

const POINTINGS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data/pointings.csv");

fn main() -> Result<()> {
    println!("=== mastdup Error Handling Example ===\n");

    // Example 1: only `.csv` target files are accepted, checked before opening
    println!("--- Example 1: Unsupported file format ---");
    match load_targets("targets.xlsx", LoadMode::Name, &ColumnSelection::new()) {
        Ok(list) => println!("  Loaded {} rows", list.len()),
        Err(e) => println!("  ✗ {e}"),
    }
    println!();

    // Example 2: mode strings are validated
    println!("--- Example 2: Unsupported load mode ---");
    for mode in ["name", "Coord", "galactic"] {
        match mode.parse::<LoadMode>() {
            Ok(m) => println!("  ✓ {mode} -> {m}"),
            Err(e) => println!("  ✗ {e}"),
        }
    }
    println!();

    // Example 3: a named column that is not in the header
    println!("--- Example 3: Missing column ---");
    let columns = ColumnSelection::new().with_ra("ra_deg").with_dec("dec");
    match load_targets(POINTINGS, LoadMode::Coord, &columns) {
        Ok(list) => println!("  Loaded {} rows", list.len()),
        Err(MastError::MissingColumn { column, available }) => {
            println!("  ✗ no column `{column}`; the file has: {}", available.join(", "))
        }
        Err(e) => return Err(e),
    }
    println!();

    // Example 4: the right columns load fine; values stay raw until queried
    println!("--- Example 4: Coordinates, raw and converted ---");
    let columns = ColumnSelection::new().with_ra("ra").with_dec("dec");
    let list = load_targets(POINTINGS, LoadMode::Coord, &columns)?;
    for coord in list.coords().unwrap_or_default() {
        match coord.to_sky() {
            Ok(sky) => println!("  ✓ {:<28} -> {sky}", coord.identifier()),
            Err(e) => println!("  ✗ {e}"),
        }
    }
    println!();

    // Example 5: angles out of range or unparsable
    println!("--- Example 5: Invalid angles ---");
    for (ra, dec) in [("25:00:00", "+10:00:00"), ("10.0", "-91"), ("ten", "0")] {
        match SkyCoord::parse(ra, dec) {
            Ok(c) => println!("  ✓ {c}"),
            Err(e) => println!("  ✗ {e}"),
        }
    }
    match SkyBox::new(350.0, 10.0, -5.0, 5.0) {
        Ok(b) => println!("  ✓ {b}"),
        Err(e) => println!("  ✗ {e}"),
    }
    println!();

    // Example 6: status URL templates need a placeholder
    println!("--- Example 6: Status URL templates ---");
    match StatusUrlTemplate::new("https://example.org/program") {
        Ok(t) => println!("  ✓ {}", t.build("1234")),
        Err(e) => println!("  ✗ {e}"),
    }
    println!("  ✓ {}", StatusUrlTemplate::default().build("1234"));
    println!();

    // Example 7: reading a table that does not exist
    println!("--- Example 7: Missing result table ---");
    match ResultTable::load("no_such_table.json.gz") {
        Ok(t) => println!("  Loaded {} rows", t.len()),
        Err(e) => println!("  ✗ {e}"),
    }

    Ok(())
}
