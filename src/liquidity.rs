//! Deposit and withdrawal of pool liquidity.
//!
//! Share accounting: the first deposit defines the share unit as one share per
//! unit of native asset supplied; afterwards shares mint and burn pro rata
//! against the pre-operation reserves. All divisions floor, which keeps
//! rounding dust inside the pool.

use tracing::debug;

use crate::errors::PoolError;
use crate::state::{OwnerId, ReserveLedger};
use crate::transfer::{EventSink, FungibleTransfer, NativeTransfer, PoolEvent};
use crate::utils::mul_div;

/// Deposits `native_amount` plus a proportional fungible amount, minting
/// ownership shares to `provider`.
///
/// On an empty pool both supplied amounts seed the reserves as-is and
/// `native_amount` shares are minted. On a seeded pool the provider must offer
/// strictly more than `floor(native_amount * reserve_b / reserve_a)` fungible
/// asset, computed against the pre-deposit reserves; the full offered amount
/// is pulled and credited, excess is not refunded.
///
/// Returns the number of shares minted.
pub fn add_liquidity<F, E>(
    ledger: &mut ReserveLedger,
    fungible: &mut F,
    events: &mut E,
    provider: OwnerId,
    native_amount: u64,
    max_fungible: u64,
) -> Result<u64, PoolError>
where
    F: FungibleTransfer,
    E: EventSink,
{
    if ledger.total_shares() == 0 {
        if native_amount == 0 || max_fungible == 0 {
            return Err(PoolError::InvalidSeed);
        }

        fungible.pull_fungible(provider, max_fungible)?;
        ledger.credit_a(native_amount)?;
        ledger.credit_b(max_fungible)?;
        ledger.mint_shares(provider, native_amount)?;

        debug!(?provider, native_amount, max_fungible, "pool seeded");
        events.emit(PoolEvent::Deposit {
            provider,
            native_in: native_amount,
            fungible_in: max_fungible,
            shares_minted: native_amount,
        });
        return Ok(native_amount);
    }

    if native_amount == 0 {
        return Err(PoolError::InvalidAmount);
    }

    // Both quotas divide by the pre-deposit native reserve.
    let required_fungible = mul_div(native_amount, ledger.reserve_b(), ledger.reserve_a())?;
    if max_fungible <= required_fungible {
        return Err(PoolError::InsufficientOfferedAmount);
    }
    let minted = mul_div(native_amount, ledger.total_shares(), ledger.reserve_a())?;

    fungible.pull_fungible(provider, max_fungible)?;
    ledger.credit_a(native_amount)?;
    ledger.credit_b(max_fungible)?;
    ledger.mint_shares(provider, minted)?;

    debug!(?provider, native_amount, max_fungible, minted, "liquidity added");
    events.emit(PoolEvent::Deposit {
        provider,
        native_in: native_amount,
        fungible_in: max_fungible,
        shares_minted: minted,
    });
    Ok(minted)
}

/// Burns `shares_to_burn` of the provider's shares and pays out the matching
/// fraction of both reserves.
///
/// Returns `(native_out, fungible_out)`.
pub fn remove_liquidity<N, F, E>(
    ledger: &mut ReserveLedger,
    native: &mut N,
    fungible: &mut F,
    events: &mut E,
    provider: OwnerId,
    shares_to_burn: u64,
) -> Result<(u64, u64), PoolError>
where
    N: NativeTransfer,
    F: FungibleTransfer,
    E: EventSink,
{
    if shares_to_burn == 0 {
        return Err(PoolError::InvalidAmount);
    }
    if ledger.total_shares() == 0 {
        return Err(PoolError::EmptyPool);
    }
    if ledger.shares_of(provider) < shares_to_burn {
        return Err(PoolError::InsufficientBalance);
    }

    let native_out = mul_div(ledger.reserve_a(), shares_to_burn, ledger.total_shares())?;
    let fungible_out = mul_div(ledger.reserve_b(), shares_to_burn, ledger.total_shares())?;

    native.pay_native(provider, native_out)?;
    fungible.pay_fungible(provider, fungible_out)?;
    ledger.burn_shares(provider, shares_to_burn)?;
    ledger.debit_a(native_out)?;
    ledger.debit_b(fungible_out)?;

    debug!(
        ?provider,
        shares_to_burn, native_out, fungible_out, "liquidity removed"
    );
    events.emit(PoolEvent::Withdrawal {
        provider,
        native_out,
        fungible_out,
        shares_burned: shares_to_burn,
    });
    Ok((native_out, fungible_out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::{InMemoryBank, NullEvents};
    use proptest::prelude::*;

    fn provider() -> OwnerId {
        OwnerId::new([7; 32])
    }

    fn funded_bank(fungible: u64) -> InMemoryBank {
        let mut bank = InMemoryBank::new();
        bank.fund_fungible(provider(), fungible);
        bank
    }

    #[test]
    fn first_deposit_seeds_exactly() {
        let mut ledger = ReserveLedger::new();
        let mut bank = funded_bank(2000);

        let minted = add_liquidity(
            &mut ledger,
            &mut bank,
            &mut NullEvents,
            provider(),
            1000,
            2000,
        )
        .unwrap();
        assert_eq!(minted, 1000);
        assert_eq!(ledger.reserve_a(), 1000);
        assert_eq!(ledger.reserve_b(), 2000);
        assert_eq!(ledger.total_shares(), 1000);
        assert_eq!(ledger.shares_of(provider()), 1000);
    }

    #[test]
    fn zero_seed_is_rejected() {
        let mut ledger = ReserveLedger::new();
        let mut bank = funded_bank(2000);
        for (a, b) in [(0, 2000), (1000, 0), (0, 0)] {
            let result =
                add_liquidity(&mut ledger, &mut bank, &mut NullEvents, provider(), a, b);
            assert_eq!(result, Err(PoolError::InvalidSeed));
        }
        assert_eq!(ledger.total_shares(), 0);
    }

    #[test]
    fn offered_amount_must_strictly_exceed_requirement() {
        let mut ledger = ReserveLedger::new();
        let mut bank = funded_bank(10_000);
        add_liquidity(
            &mut ledger,
            &mut bank,
            &mut NullEvents,
            provider(),
            1000,
            2000,
        )
        .unwrap();

        // required = floor(500 * 2000 / 1000) = 1000; offering exactly that fails
        let result = add_liquidity(
            &mut ledger,
            &mut bank,
            &mut NullEvents,
            provider(),
            500,
            1000,
        );
        assert_eq!(result, Err(PoolError::InsufficientOfferedAmount));

        let minted = add_liquidity(
            &mut ledger,
            &mut bank,
            &mut NullEvents,
            provider(),
            500,
            1001,
        )
        .unwrap();
        assert_eq!(minted, 500);
        assert_eq!(ledger.reserve_a(), 1500);
        // the full offered amount is credited, no refund of the excess unit
        assert_eq!(ledger.reserve_b(), 3001);
    }

    #[test]
    fn failed_pull_leaves_ledger_untouched() {
        let mut ledger = ReserveLedger::new();
        let mut bank = funded_bank(100); // not enough to cover the offer
        let result = add_liquidity(
            &mut ledger,
            &mut bank,
            &mut NullEvents,
            provider(),
            1000,
            2000,
        );
        assert_eq!(result, Err(PoolError::TransferFailed));
        assert_eq!(ledger, ReserveLedger::new());
    }

    #[test]
    fn withdrawal_preconditions() {
        let mut ledger = ReserveLedger::new();
        let mut bank = funded_bank(2000);
        let mut payout = InMemoryBank::new();

        assert_eq!(
            remove_liquidity(&mut ledger, &mut payout, &mut bank, &mut NullEvents, provider(), 0),
            Err(PoolError::InvalidAmount)
        );
        assert_eq!(
            remove_liquidity(&mut ledger, &mut payout, &mut bank, &mut NullEvents, provider(), 10),
            Err(PoolError::EmptyPool)
        );

        add_liquidity(
            &mut ledger,
            &mut bank,
            &mut NullEvents,
            provider(),
            1000,
            2000,
        )
        .unwrap();
        assert_eq!(
            remove_liquidity(&mut ledger, &mut payout, &mut bank, &mut NullEvents, provider(), 1001),
            Err(PoolError::InsufficientBalance)
        );
    }

    #[test]
    fn full_withdrawal_returns_reserves() {
        let mut ledger = ReserveLedger::new();
        let mut bank = funded_bank(2000);
        let mut payout = InMemoryBank::new();
        add_liquidity(
            &mut ledger,
            &mut bank,
            &mut NullEvents,
            provider(),
            1000,
            2000,
        )
        .unwrap();

        let (native_out, fungible_out) = remove_liquidity(
            &mut ledger,
            &mut payout,
            &mut bank,
            &mut NullEvents,
            provider(),
            1000,
        )
        .unwrap();
        assert_eq!((native_out, fungible_out), (1000, 2000));
        assert_eq!(ledger.total_shares(), 0);
        assert_eq!(ledger.reserve_a(), 0);
        assert_eq!(ledger.reserve_b(), 0);
        assert_eq!(payout.native_balance(provider()), 1000);
        assert_eq!(bank.fungible_balance(provider()), 2000);
    }

    proptest! {
        #[test]
        fn withdrawal_pays_pro_rata_floor(
            reserve_a in 1u64..=u32::MAX as u64,
            reserve_b in 1u64..=u32::MAX as u64,
            burn_fraction in 1u64..=1000,
        ) {
            let mut ledger = ReserveLedger::new();
            let mut bank = funded_bank(reserve_b);
            let mut payout = InMemoryBank::new();
            add_liquidity(
                &mut ledger,
                &mut bank,
                &mut NullEvents,
                provider(),
                reserve_a,
                reserve_b,
            )
            .unwrap();

            let shares = (ledger.total_shares() * burn_fraction / 1000).max(1);
            let (native_out, fungible_out) = remove_liquidity(
                &mut ledger,
                &mut payout,
                &mut bank,
                &mut NullEvents,
                provider(),
                shares,
            )
            .unwrap();

            // shares minted equal the native seed, so total == reserve_a
            let total = reserve_a as u128;
            let want_native = (reserve_a as u128) * (shares as u128) / total;
            let want_fungible = (reserve_b as u128) * (shares as u128) / total;
            prop_assert_eq!(native_out as u128, want_native);
            prop_assert_eq!(fungible_out as u128, want_fungible);
        }
    }
}
