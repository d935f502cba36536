//! Test support for service-level tests.

mod helpers;

pub(crate) use context::TestContext;
pub(crate) use helpers::*;
