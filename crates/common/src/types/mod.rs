use serde::Serialize;

/// Body of the root health check.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
}

impl Health {
    pub fn running() -> Self {
        Self { status: "healthy", message: "Simple Message API is running" }
    }
}
