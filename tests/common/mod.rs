#![allow(dead_code)]

pub use changed_paths_test_utils::builders;
pub use changed_paths_test_utils::fake_lister::FakeLister;
pub use changed_paths_test_utils::{init_tracing, with_timeout};
