mod memory_history;

pub use memory_history::InMemoryHistory;
