//! Stock [`AiPolicy`](crate::api::AiPolicy) implementations.

pub mod ai;

pub use ai::WeightedRandomPolicy;
