pub mod category;
pub mod date_key;
pub mod event;
pub mod query;
pub mod store;

pub use category::Category;
pub use event::{Event, NewEvent};
pub use query::AgendaGroup;
pub use store::EventStore;
