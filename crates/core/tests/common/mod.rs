//! Common test utilities shared by the integration tests.
//!
//! - Fixtures (project directories, agent configurations)
//! - A harness wiring a scripted mock client into the orchestrators
//! - Event assertions

pub mod assertions;
pub mod fixtures;
pub mod harness;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;
#[allow(unused_imports)]
pub use harness::*;
