use std::collections::TryReserveError;

/// Errors reported by the fallible (`try_*`) list operations.
///
/// Misusing a [`Position`](crate::Position) is not an error but a broken
/// contract, and panics instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// storage for a new node could not be reserved. The list is left as it was.
    #[error("failed to allocate storage for a list node: {0}")]
    Allocation(#[from] TryReserveError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_error_message_mentions_the_cause() {
        let mut v: Vec<u64> = Vec::new();
        let cause = v.try_reserve(usize::MAX).unwrap_err();
        let err = ListError::from(cause.clone());
        assert_eq!(err, ListError::Allocation(cause));
        assert!(err
            .to_string()
            .starts_with("failed to allocate storage for a list node"));
    }
}
