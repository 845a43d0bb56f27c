/// Behaviour switches shared by the connection-bound and ephemeral executors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssisterOptions {
    /// Emit a `debug` event with the SQL text before each statement is prepared.
    pub log_queries: bool,
}

impl Default for AssisterOptions {
    fn default() -> Self {
        Self { log_queries: true }
    }
}

impl AssisterOptions {
    #[must_use]
    pub fn log_queries(mut self, log_queries: bool) -> Self {
        self.log_queries = log_queries;
        self
    }
}
