/// Configuration for connection limits
#[derive(Debug, Clone)]
pub struct ConnectionLimits {
    /// Maximum open tabs per owner
    pub max_per_owner: usize,
    /// Maximum total connections across all owners
    pub max_total: usize,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self {
            max_per_owner: 50,
            max_total: 1000,
        }
    }
}
