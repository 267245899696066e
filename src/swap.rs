//! Swap pricing and routing.
//!
//! Pricing is the constant-product formula `x * y = k` with a 0.3% fee taken
//! on the input side. The two trade directions share the formula but differ in
//! which reserve snapshot they price against, so each direction gets its own
//! routine with its own documented call site.

use tracing::debug;

use crate::constants::{FEE_DENOMINATOR, FEE_NUMERATOR};
use crate::errors::PoolError;
use crate::state::{OwnerId, ReserveLedger};
use crate::transfer::{EventSink, FungibleTransfer, NativeTransfer, PoolEvent};
use crate::utils::to_u64;

/// Computes the output amount for a given input amount against a reserve pair.
///
/// The input is discounted to `amount_in * 997 / 1000` before it is added to
/// the input-side reserve; the division happens only in the final step:
///
/// `out = floor(amount_in * 997 * output_reserve
///            / (input_reserve * 1000 + amount_in * 997))`
///
/// Stateless and deterministic. A zero input quotes to zero.
pub fn quote(amount_in: u64, input_reserve: u64, output_reserve: u64) -> Result<u64, PoolError> {
    if input_reserve == 0 || output_reserve == 0 {
        return Err(PoolError::EmptyReserve);
    }

    let amount_in_with_fee = (amount_in as u128)
        .checked_mul(FEE_NUMERATOR as u128)
        .ok_or(PoolError::Arithmetic)?;
    let numerator = amount_in_with_fee
        .checked_mul(output_reserve as u128)
        .ok_or(PoolError::Arithmetic)?;
    let denominator = (input_reserve as u128)
        .checked_mul(FEE_DENOMINATOR as u128)
        .and_then(|scaled| scaled.checked_add(amount_in_with_fee))
        .ok_or(PoolError::Arithmetic)?;
    let amount_out = numerator
        .checked_div(denominator)
        .ok_or(PoolError::Arithmetic)?;

    to_u64(amount_out)
}

/// Trades native asset for fungible asset.
///
/// The native input arrives with the request, before this routine runs, and is
/// credited to the ledger only below: the ledger's `reserve_a` read here is the
/// reserve immediately prior to this swap's deposit, which is exactly the
/// snapshot the pricing formula requires.
pub fn swap_native_for_fungible<F, E>(
    ledger: &mut ReserveLedger,
    fungible: &mut F,
    events: &mut E,
    buyer: OwnerId,
    native_in: u64,
    min_fungible_out: u64,
) -> Result<u64, PoolError>
where
    F: FungibleTransfer,
    E: EventSink,
{
    if native_in == 0 {
        return Err(PoolError::InvalidAmount);
    }

    let fungible_out = quote(native_in, ledger.reserve_a(), ledger.reserve_b())?;
    if fungible_out < min_fungible_out {
        return Err(PoolError::SlippageExceeded);
    }

    fungible.pay_fungible(buyer, fungible_out)?;
    ledger.credit_a(native_in)?;
    ledger.debit_b(fungible_out)?;

    debug!(?buyer, native_in, fungible_out, "swap native -> fungible");
    events.emit(PoolEvent::FungiblePurchase {
        buyer,
        native_in,
        fungible_out,
    });
    Ok(fungible_out)
}

/// Trades fungible asset for native asset.
///
/// The fungible input has not been pulled from the buyer yet when pricing
/// runs, so both reserves are read pre-swap. The pull happens afterwards and
/// aborts the operation, ledger untouched, if the buyer cannot cover it.
pub fn swap_fungible_for_native<N, F, E>(
    ledger: &mut ReserveLedger,
    native: &mut N,
    fungible: &mut F,
    events: &mut E,
    buyer: OwnerId,
    fungible_in: u64,
    min_native_out: u64,
) -> Result<u64, PoolError>
where
    N: NativeTransfer,
    F: FungibleTransfer,
    E: EventSink,
{
    if fungible_in == 0 {
        return Err(PoolError::InvalidAmount);
    }

    let native_out = quote(fungible_in, ledger.reserve_b(), ledger.reserve_a())?;
    if native_out < min_native_out {
        return Err(PoolError::SlippageExceeded);
    }

    fungible.pull_fungible(buyer, fungible_in)?;
    native.pay_native(buyer, native_out)?;
    ledger.credit_b(fungible_in)?;
    ledger.debit_a(native_out)?;

    debug!(?buyer, fungible_in, native_out, "swap fungible -> native");
    events.emit(PoolEvent::NativePurchase {
        buyer,
        fungible_in,
        native_out,
    });
    Ok(native_out)
}
