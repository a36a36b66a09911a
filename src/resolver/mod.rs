pub mod lookup;

pub use lookup::{LookupTables, ResolvedRefs};
