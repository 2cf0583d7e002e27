pub mod config;
pub mod error;
pub mod merge;
pub mod models;
pub mod session;
pub mod store;

pub use error::HachidoriError;
pub use models::{LibraryEntry, LibraryStatus};
pub use session::Session;
pub use store::EntryStore;
