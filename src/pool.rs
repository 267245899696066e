//! The pool facade: one [`ReserveLedger`] plus its collaborators.
//!
//! Each pool instance owns its ledger outright; all mutation flows through
//! `&mut self`, so operations are totally ordered at the ledger boundary and
//! never observe each other mid-computation.

use crate::errors::PoolError;
use crate::liquidity::{add_liquidity, remove_liquidity};
use crate::state::{
    LiquidityOutcome, LiquidityRequest, OwnerId, ReserveLedger, SwapDirection, SwapRequest,
};
use crate::swap::{quote, swap_fungible_for_native, swap_native_for_fungible};
use crate::transfer::{EventSink, FungibleTransfer, NativeTransfer};

/// A two-asset constant-product pool.
pub struct Pool<N, F, E> {
    ledger: ReserveLedger,
    native: N,
    fungible: F,
    events: E,
}

impl<N, F, E> Pool<N, F, E>
where
    N: NativeTransfer,
    F: FungibleTransfer,
    E: EventSink,
{
    /// Creates an empty pool around the given collaborators.
    pub fn new(native: N, fungible: F, events: E) -> Self {
        Pool {
            ledger: ReserveLedger::new(),
            native,
            fungible,
            events,
        }
    }

    /// Restores a pool around previously persisted ledger state.
    pub fn with_ledger(ledger: ReserveLedger, native: N, fungible: F, events: E) -> Self {
        Pool {
            ledger,
            native,
            fungible,
            events,
        }
    }

    /// Deposits liquidity; returns the shares minted.
    pub fn add_liquidity(
        &mut self,
        provider: OwnerId,
        native_amount: u64,
        max_fungible: u64,
    ) -> Result<u64, PoolError> {
        add_liquidity(
            &mut self.ledger,
            &mut self.fungible,
            &mut self.events,
            provider,
            native_amount,
            max_fungible,
        )
    }

    /// Withdraws liquidity; returns `(native_out, fungible_out)`.
    pub fn remove_liquidity(
        &mut self,
        provider: OwnerId,
        shares: u64,
    ) -> Result<(u64, u64), PoolError> {
        remove_liquidity(
            &mut self.ledger,
            &mut self.native,
            &mut self.fungible,
            &mut self.events,
            provider,
            shares,
        )
    }

    /// Dispatches a liquidity request to the deposit or withdrawal path.
    pub fn modify_liquidity(
        &mut self,
        provider: OwnerId,
        request: LiquidityRequest,
    ) -> Result<LiquidityOutcome, PoolError> {
        match request {
            LiquidityRequest::Deposit {
                native_amount,
                max_fungible,
            } => self
                .add_liquidity(provider, native_amount, max_fungible)
                .map(LiquidityOutcome::Minted),
            LiquidityRequest::Withdraw { shares } => self
                .remove_liquidity(provider, shares)
                .map(|(native_out, fungible_out)| {
                    LiquidityOutcome::Withdrawn(native_out, fungible_out)
                }),
        }
    }

    /// Executes a swap in the requested direction; returns the output amount.
    pub fn swap(&mut self, buyer: OwnerId, request: SwapRequest) -> Result<u64, PoolError> {
        match request.direction {
            SwapDirection::NativeToFungible => swap_native_for_fungible(
                &mut self.ledger,
                &mut self.fungible,
                &mut self.events,
                buyer,
                request.amount_in,
                request.min_amount_out,
            ),
            SwapDirection::FungibleToNative => swap_fungible_for_native(
                &mut self.ledger,
                &mut self.native,
                &mut self.fungible,
                &mut self.events,
                buyer,
                request.amount_in,
                request.min_amount_out,
            ),
        }
    }

    /// Current `(reserve_a, reserve_b)`.
    pub fn get_reserves(&self) -> (u64, u64) {
        (self.ledger.reserve_a(), self.ledger.reserve_b())
    }

    pub fn get_total_shares(&self) -> u64 {
        self.ledger.total_shares()
    }

    pub fn shares_of(&self, owner: OwnerId) -> u64 {
        self.ledger.shares_of(owner)
    }

    /// Read-only price quote for a native-to-fungible swap of `amount`, using
    /// the same formula and reserve snapshot the swap itself would use.
    pub fn quote_native_to_fungible(&self, amount: u64) -> Result<u64, PoolError> {
        quote(amount, self.ledger.reserve_a(), self.ledger.reserve_b())
    }

    /// Read-only price quote for a fungible-to-native swap of `amount`.
    pub fn quote_fungible_to_native(&self, amount: u64) -> Result<u64, PoolError> {
        quote(amount, self.ledger.reserve_b(), self.ledger.reserve_a())
    }

    /// The pool's persistent state, e.g. for borsh serialization.
    pub fn ledger(&self) -> &ReserveLedger {
        &self.ledger
    }

    /// The event sink, e.g. to drain recorded notifications.
    pub fn events(&self) -> &E {
        &self.events
    }
}
