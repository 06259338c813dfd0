//! Fixtures shared by the unit tests of every module.


pub(crate) use fixture_engine::FixtureEngine;

use crate::schema::Schema;
use std::future::Future;
use std::sync::Once;

/// Install a `tracing` subscriber honoring `RUST_LOG` (silent by default).
pub(crate) fn init_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Drive `future` to completion on a single-threaded runtime inside a
/// `LocalSet`, as the default scheduler requires.
pub(crate) fn run_local<F: Future>(future: F) -> F::Output {
    init_test_logging();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build the test runtime");
    tokio::task::LocalSet::new().block_on(&runtime, future)
}

pub(crate) fn schema(sdl: &str) -> Schema {
    Schema::builder()
        .load_str(None, sdl)
        .and_then(|builder| builder.build())
        .expect("test schema should build")
}
