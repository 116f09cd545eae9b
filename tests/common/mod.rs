use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Install a test logger once per test binary. `RUST_LOG` overrides the
/// default `Info` filter, e.g. `RUST_LOG=chained_symtab=trace`.
pub fn init_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();
        builder
            .filter_level(LevelFilter::Info)
            .is_test(true)
            .format_timestamp_millis()
            .parse_default_env();
        // Another harness may have installed a logger already.
        let _ = builder.try_init();
    });
}
