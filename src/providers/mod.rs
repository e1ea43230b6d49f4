pub mod bitcoin;
pub mod coingecko;
pub mod housing;
pub mod seed;
pub mod util;

pub use bitcoin::BitcoinPrices;
pub use coingecko::CoinGeckoProvider;
pub use housing::HousingPrices;
