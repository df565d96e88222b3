// Selection tracking shared by the tree, table and plate panels
pub use store::{ListenerId, SelectionListener, SelectionStore};
pub use tracker::SelectionTracker;
pub use types::*;

pub mod debounce;
pub mod store;
pub mod table;
pub mod tracker;
pub mod tree;
pub mod types;
