pub mod accumulator;
pub mod paginator;

pub use accumulator::{Accumulator, InsertOutcome};
pub use paginator::{AccumulatingPaginator, CollectionReport, StopReason};
