//! Constant-product pool library.
//!
//! A two-asset liquidity pool holding a native asset and a fungible asset,
//! with deposits, withdrawals and swaps priced by the `x * y = k` invariant
//! and a 0.3% input-side fee that accrues to remaining liquidity.

pub mod constants;
pub mod errors;
pub mod liquidity;
pub mod pool;
pub mod state;
pub mod swap;
pub mod transfer;
pub mod utils;

// Re-export the public surface for convenience
pub use constants::{FEE_DENOMINATOR, FEE_NUMERATOR};
pub use errors::PoolError;
pub use liquidity::{add_liquidity, remove_liquidity};
pub use pool::Pool;
pub use state::{
    LiquidityOutcome, LiquidityRequest, OwnerId, ReserveLedger, SwapDirection, SwapRequest,
};
pub use swap::{quote, swap_fungible_for_native, swap_native_for_fungible};
pub use transfer::{
    EventSink, FungibleTransfer, InMemoryBank, NativeTransfer, NullEvents, PoolEvent,
};
pub use utils::mul_div;
