//! Collaborator seams: asset movement and event notification.
//!
//! The pool's accounting treats these as trusted external operations with
//! fixed pre/post-conditions. A failed transfer aborts the whole operation
//! before any ledger mutation happens.

use std::collections::BTreeMap;

use crate::errors::PoolError;
use crate::state::OwnerId;

/// Pays the native asset out of the pool. Receipt of native asset needs no
/// counterpart here: the amount arrives bundled with the request on call entry.
pub trait NativeTransfer {
    /// Must fail the operation if the recipient cannot accept payment.
    fn pay_native(&mut self, to: OwnerId, amount: u64) -> Result<(), PoolError>;
}

/// Moves the fungible asset between accounts and the pool.
pub trait FungibleTransfer {
    /// Fails with [`PoolError::TransferFailed`] if `from` holds less than
    /// `amount` or has not authorized the pull.
    fn pull_fungible(&mut self, from: OwnerId, amount: u64) -> Result<(), PoolError>;

    fn pay_fungible(&mut self, to: OwnerId, amount: u64) -> Result<(), PoolError>;
}

/// Notification emitted after each successful operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolEvent {
    Deposit {
        provider: OwnerId,
        native_in: u64,
        fungible_in: u64,
        shares_minted: u64,
    },
    Withdrawal {
        provider: OwnerId,
        native_out: u64,
        fungible_out: u64,
        shares_burned: u64,
    },
    /// A trader bought fungible asset with native asset.
    FungiblePurchase {
        buyer: OwnerId,
        native_in: u64,
        fungible_out: u64,
    },
    /// A trader bought native asset with fungible asset.
    NativePurchase {
        buyer: OwnerId,
        fungible_in: u64,
        native_out: u64,
    },
}

/// Observer of successful operations. Observational only: no pool logic
/// depends on what a sink does.
pub trait EventSink {
    fn emit(&mut self, _event: PoolEvent) {}
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEvents;

impl EventSink for NullEvents {}

impl EventSink for Vec<PoolEvent> {
    fn emit(&mut self, event: PoolEvent) {
        self.push(event);
    }
}

/// In-memory implementation of both transfer seams, tracking per-owner
/// balances of each asset. Used by the demo binary and the tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBank {
    native: BTreeMap<OwnerId, u64>,
    fungible: BTreeMap<OwnerId, u64>,
}

impl InMemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fund_native(&mut self, owner: OwnerId, amount: u64) {
        *self.native.entry(owner).or_insert(0) += amount;
    }

    pub fn fund_fungible(&mut self, owner: OwnerId, amount: u64) {
        *self.fungible.entry(owner).or_insert(0) += amount;
    }

    pub fn native_balance(&self, owner: OwnerId) -> u64 {
        self.native.get(&owner).copied().unwrap_or(0)
    }

    pub fn fungible_balance(&self, owner: OwnerId) -> u64 {
        self.fungible.get(&owner).copied().unwrap_or(0)
    }
}

impl NativeTransfer for InMemoryBank {
    fn pay_native(&mut self, to: OwnerId, amount: u64) -> Result<(), PoolError> {
        let balance = self.native.entry(to).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(PoolError::TransferFailed)?;
        Ok(())
    }
}

impl FungibleTransfer for InMemoryBank {
    fn pull_fungible(&mut self, from: OwnerId, amount: u64) -> Result<(), PoolError> {
        let balance = self.fungible.entry(from).or_insert(0);
        *balance = balance.checked_sub(amount).ok_or(PoolError::TransferFailed)?;
        Ok(())
    }

    fn pay_fungible(&mut self, to: OwnerId, amount: u64) -> Result<(), PoolError> {
        let balance = self.fungible.entry(to).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(PoolError::TransferFailed)?;
        Ok(())
    }
}
