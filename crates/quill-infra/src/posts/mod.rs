//! Post storage - the flat-file backed collection.

mod collection;

pub use collection::PostCollection;
