//! Persistent pool state and the ephemeral request types.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::errors::PoolError;

/// Opaque 32-byte account identity for liquidity providers and traders.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize,
)]
pub struct OwnerId(pub [u8; 32]);

impl OwnerId {
    pub const fn new(bytes: [u8; 32]) -> Self {
        OwnerId(bytes)
    }
}

/// The pool's permanent state: both reserves, the outstanding share supply and
/// the per-owner share balances backing it.
///
/// Mutations are only ever reached through the liquidity and swap operations;
/// nothing else writes reserves or share balances. After the pool is first
/// seeded, `total_shares > 0` implies both reserves are positive.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ReserveLedger {
    reserve_a: u64,
    reserve_b: u64,
    total_shares: u64,
    shares: BTreeMap<OwnerId, u64>,
}

impl ReserveLedger {
    /// An empty, unseeded pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current native-asset reserve.
    pub fn reserve_a(&self) -> u64 {
        self.reserve_a
    }

    /// Current fungible-asset reserve.
    pub fn reserve_b(&self) -> u64 {
        self.reserve_b
    }

    /// Total outstanding ownership shares.
    pub fn total_shares(&self) -> u64 {
        self.total_shares
    }

    /// Share balance held by `owner`.
    pub fn shares_of(&self, owner: OwnerId) -> u64 {
        self.shares.get(&owner).copied().unwrap_or(0)
    }

    pub(crate) fn credit_a(&mut self, amount: u64) -> Result<(), PoolError> {
        self.reserve_a = self
            .reserve_a
            .checked_add(amount)
            .ok_or(PoolError::Arithmetic)?;
        Ok(())
    }

    pub(crate) fn debit_a(&mut self, amount: u64) -> Result<(), PoolError> {
        self.reserve_a = self
            .reserve_a
            .checked_sub(amount)
            .ok_or(PoolError::InsufficientBalance)?;
        Ok(())
    }

    pub(crate) fn credit_b(&mut self, amount: u64) -> Result<(), PoolError> {
        self.reserve_b = self
            .reserve_b
            .checked_add(amount)
            .ok_or(PoolError::Arithmetic)?;
        Ok(())
    }

    pub(crate) fn debit_b(&mut self, amount: u64) -> Result<(), PoolError> {
        self.reserve_b = self
            .reserve_b
            .checked_sub(amount)
            .ok_or(PoolError::InsufficientBalance)?;
        Ok(())
    }

    pub(crate) fn mint_shares(&mut self, owner: OwnerId, amount: u64) -> Result<(), PoolError> {
        let total = self
            .total_shares
            .checked_add(amount)
            .ok_or(PoolError::Arithmetic)?;
        let balance = self.shares.entry(owner).or_insert(0);
        // cannot overflow: balance <= total_shares and the supply add passed
        *balance += amount;
        self.total_shares = total;
        Ok(())
    }

    pub(crate) fn burn_shares(&mut self, owner: OwnerId, amount: u64) -> Result<(), PoolError> {
        let balance = self.shares_of(owner);
        let remaining = balance
            .checked_sub(amount)
            .ok_or(PoolError::InsufficientBalance)?;
        if remaining == 0 {
            self.shares.remove(&owner);
        } else {
            self.shares.insert(owner, remaining);
        }
        self.total_shares -= amount;
        Ok(())
    }
}

/// Direction of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    NativeToFungible,
    FungibleToNative,
}

/// Parameters of a single swap; lives only for the duration of the call.
#[derive(Debug, Clone, Copy)]
pub struct SwapRequest {
    pub direction: SwapDirection,
    pub amount_in: u64,
    /// Lowest output the caller will accept before the swap aborts.
    pub min_amount_out: u64,
}

/// Parameters of a single liquidity operation.
#[derive(Debug, Clone, Copy)]
pub enum LiquidityRequest {
    Deposit {
        native_amount: u64,
        /// Fungible amount the provider authorizes the pool to pull. Must be
        /// strictly greater than the proportional requirement on a seeded pool.
        max_fungible: u64,
    },
    Withdraw {
        shares: u64,
    },
}

/// Result of a [`LiquidityRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidityOutcome {
    /// Shares minted by a deposit.
    Minted(u64),
    /// `(native_out, fungible_out)` paid by a withdrawal.
    Withdrawn(u64, u64),
}
