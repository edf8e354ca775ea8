/// Result of one orchestrated model call: the normalized value, the
/// explanation shown to the user, and whether defaults were substituted.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentOutcome<T> {
    pub result: T,
    pub reasoning: String,
    pub fallback: bool,
}

impl<T> AgentOutcome<T> {
    pub fn new(result: T, reasoning: String, fallback: bool) -> Self {
        Self {
            result,
            reasoning,
            fallback,
        }
    }
}
