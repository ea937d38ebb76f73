use std::collections::HashMap;

use rust_decimal::Decimal;

/// Trading pair key in `BASE-QUOTE` form, e.g. `BTC-USDT`
pub type TradingPair = String;

/// Latest prices keyed by trading pair
pub type Prices = HashMap<TradingPair, Decimal>;

/// Build a `BASE-QUOTE` trading pair key.
pub fn combine_to_pair(base: &str, quote: &str) -> TradingPair {
    format!("{}-{}", base.to_uppercase(), quote.to_uppercase())
}

/// Split a `BASE-QUOTE` key back into its parts.
pub fn split_pair(pair: &str) -> Option<(&str, &str)> {
    let (base, quote) = pair.split_once('-')?;
    if base.is_empty() || quote.is_empty() {
        return None;
    }
    Some((base, quote))
}
