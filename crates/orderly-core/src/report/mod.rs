//! Whole-run reports over the accumulated order records.

mod aggregate;
pub mod units;
pub mod writer;

pub use aggregate::{
    collate, FreshRow, FrozenByClientRow, FrozenByProductRow, ReportAggregator, ReportPaths,
    Reports, RosterRow, RunWarning,
};
pub use units::merge_units;

/// File names of the run reports, without extension.
pub const CLIENT_ROSTER: &str = "finalOrderList";
pub const FRESH_LIST: &str = "freshList";
pub const FROZEN_PER_CLIENT: &str = "frozenListPerClient";
pub const FROZEN_PER_PRODUCT: &str = "frozenListPerProduct";
pub const UNCATEGORIZED: &str = "uncategorized";

/// Sub-folder receiving one extract per order form.
pub const ORDERS_DIR: &str = "orders";
