use std::fmt::Display;

use tracing::{error, warn};

/// What a use case does when an external collaborator fails.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackPolicy<T> {
    /// Surface the collaborator error to the caller.
    Propagate,
    /// Continue with this placeholder value and mark the result degraded.
    Substitute(T),
}

/// A collaborator result after the fallback policy has been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub degraded: bool,
}

impl<T: Clone> FallbackPolicy<T> {
    pub fn resolve<E: Display>(&self, result: Result<T, E>) -> Result<Resolved<T>, E> {
        match (result, self) {
            (Ok(value), _) => Ok(Resolved {
                value,
                degraded: false,
            }),
            (Err(e), FallbackPolicy::Substitute(placeholder)) => {
                error!("Collaborator failed: {e}");
                warn!("Continuing with placeholder result");
                Ok(Resolved {
                    value: placeholder.clone(),
                    degraded: true,
                })
            }
            (Err(e), FallbackPolicy::Propagate) => Err(e),
        }
    }
}
