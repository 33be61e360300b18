mod liveness;
mod settle;

pub use liveness::Liveness;
pub use settle::{settle_all, Settled};
