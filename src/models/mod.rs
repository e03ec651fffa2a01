pub mod activity;
pub mod molecule;
pub mod table;

pub use activity::{
    has_activity_value, ActivityPage, ActivityValue, PageMeta, RawActivity, ValuePolicy,
};
pub use molecule::MoleculeRecord;
pub use table::{ResultTable, COLUMNS};
