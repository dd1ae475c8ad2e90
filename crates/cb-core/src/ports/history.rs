/// Browser-style address bar with a session history.
pub trait HistoryPort: Send + Sync {
    /// The location currently shown in the address bar.
    fn current_location(&self) -> String;

    /// Push a new entry and make it current.
    fn push(&self, location: String);
}
