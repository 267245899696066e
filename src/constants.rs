/// Swap fee numerator: the pool keeps 0.3% of every input amount.
pub const FEE_NUMERATOR: u64 = 997;

/// Swap fee denominator.
pub const FEE_DENOMINATOR: u64 = 1000;
