//! mastdup-cli
//! ===========
//!
//! Command-line interface for the `mastdup-core` duplicate-observation
//! checker.
//!
//! This crate primarily provides a binary (`mastdup`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install mastdup-cli
//! ```
//!
//! Basic usage:
//!
//! ```text
//! mastdup --help
//! mastdup targets targets.csv --mode coord --ra-col ra --dec-col dec
//! mastdup -c JWST count "NGC 1275" M87
//! mastdup -c JWST check targets.csv --radius 30arcsec -o matches.json.gz
//! mastdup show matches.json.gz
//! mastdup status-url 1234 2345
//! ```
//!
//! For programmatic access use the [`mastdup-core`] crate directly.
//!
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable. The presence of this file enables a rendered page on docs.rs.
