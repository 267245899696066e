use cpmm_pool::{InMemoryBank, OwnerId, Pool, PoolEvent, SwapDirection, SwapRequest};
use tracing::info;

fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let provider = OwnerId::new([1; 32]);
    let trader = OwnerId::new([2; 32]);

    let mut fungible = InMemoryBank::new();
    fungible.fund_fungible(provider, 2_000);
    fungible.fund_fungible(trader, 500);
    let mut pool: Pool<_, _, Vec<PoolEvent>> =
        Pool::new(InMemoryBank::new(), fungible, Vec::new());

    let minted = pool
        .add_liquidity(provider, 1_000, 2_000)
        .expect("seed deposit");
    info!(minted, reserves = ?pool.get_reserves(), "pool seeded");

    let bought = pool
        .swap(
            trader,
            SwapRequest {
                direction: SwapDirection::NativeToFungible,
                amount_in: 100,
                min_amount_out: 1,
            },
        )
        .expect("native -> fungible swap");
    info!(bought, reserves = ?pool.get_reserves(), "bought fungible with native");

    let native_back = pool
        .swap(
            trader,
            SwapRequest {
                direction: SwapDirection::FungibleToNative,
                amount_in: bought,
                min_amount_out: 1,
            },
        )
        .expect("fungible -> native swap");
    info!(native_back, reserves = ?pool.get_reserves(), "bought native with fungible");

    let (native_out, fungible_out) = pool
        .remove_liquidity(provider, minted)
        .expect("full withdrawal");
    info!(native_out, fungible_out, "provider withdrew all liquidity");
}
