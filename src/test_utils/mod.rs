//! Test utilities for lbrmeta
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration suite:
//!
//! - [`init_test_logging`]: one-time tracing setup for tests
//! - [`LibraryFixture`] and the HTML page constants: sample inputs
//! - [`ScriptedPages`] and [`StubResolver`]: offline stand-ins for the
//!   distributor
//!
//! # Example
//!
//! ```rust,no_run
//! use lbrmeta::test_utils::{LibraryFixture, StubResolver, sample_record};
//!
//! let xml = LibraryFixture::new()
//!     .device("NAND", "DIP14", &[("DISTLINK", "https://www.digikey.com/p/1")])
//!     .to_xml();
//! let resolver = StubResolver::new()
//!     .with_record("https://www.digikey.com/p/1", sample_record("SN74HC00N", "0.35"));
//! ```

pub mod fixtures;
pub mod stubs;

pub use fixtures::{
    LibraryFixture, PRODUCT_PAGE, SEARCH_PAGE, product_page_without_unit_price, sample_record,
};
pub use stubs::{ScriptedPages, StubResolver};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`. With neither, tests run
/// without a subscriber.
///
/// ```bash
/// RUST_LOG=lbrmeta=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
