// crates/mastdup-core/src/model/mod.rs

//! Plain data types shared by the loader, the archive client, the
//! duplicate-check workflow and the table writer.

pub mod observation;
pub mod target;

pub use observation::{
    ColumnType, ObservationRecord, DEFAULT_DISPLAY_COLUMNS, OBSERVATION_COLUMNS,
};
pub use target::{ColumnSelection, LoadMode, RawCoord, TargetList};
