//! Buy pipeline and the invocation handler wrapped around it

pub mod buyer;
pub mod handler;

pub use buyer::{BuyOutcome, SpotBuyer};
pub use handler::{handle_invocation, InvocationRequest, InvocationResponse};
