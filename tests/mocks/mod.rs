pub mod mock_market_client;
pub mod mock_supply_client;

#[allow(unused_imports)]
pub use mock_market_client::{MarketBehavior, MockMarketClient};
#[allow(unused_imports)]
pub use mock_supply_client::{MockSupplyClient, SupplyBehavior};
