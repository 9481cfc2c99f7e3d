pub mod state;

pub use state::{DEFAULT_PAGE_SIZE, EventListState, MAX_SEARCH_LEN};
