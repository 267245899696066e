use thiserror::Error;

/// Failure modes of pool operations.
///
/// Every error aborts the whole operation: no partial ledger update survives,
/// and nothing is retried. The caller decides whether to try again with
/// different parameters.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    #[error("math overflow or division by zero")]
    Arithmetic,
    #[error("pricing requires both reserves to be non-empty")]
    EmptyReserve,
    #[error("pool has no outstanding shares")]
    EmptyPool,
    #[error("initial deposit amounts must both be nonzero")]
    InvalidSeed,
    #[error("offered fungible amount does not cover the proportional requirement")]
    InsufficientOfferedAmount,
    #[error("balance too low for requested debit")]
    InsufficientBalance,
    #[error("amount must be positive")]
    InvalidAmount,
    #[error("swap output below declared minimum")]
    SlippageExceeded,
    #[error("asset transfer declined")]
    TransferFailed,
}
