pub mod core;
pub mod grades;
pub mod nav;
pub mod query;
pub mod session;
pub mod snapshot;
