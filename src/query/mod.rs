pub mod builder;
pub mod types;

pub use builder::{build, render_sql_preview};
pub use types::{ColumnRef, FilterCondition, FilterOperator, QueryConfig, SortConfig, SortDirection};
