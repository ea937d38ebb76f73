//! Selection of the process-wide oracle through the real environment.
//!
//! Every test mutates `MY_RATE_ORACLE` and the shared singleton, so they
//! run serially.

use std::sync::Arc;

use rate_oracle::{
    BinanceRateSource, BinanceUsRateSource, CoinGeckoRateSource, KucoinRateSource, RateOracle,
    RateSourceId, RATE_ORACLE_ENV_VAR,
};
use serial_test::serial;

fn fresh_oracle_with(value: Option<&str>) -> Arc<RateOracle> {
    match value {
        Some(v) => std::env::set_var(RATE_ORACLE_ENV_VAR, v),
        None => std::env::remove_var(RATE_ORACLE_ENV_VAR),
    }
    RateOracle::reset();
    RateOracle::get_instance()
}

fn is_source<S: 'static>(oracle: &RateOracle) -> bool {
    oracle.source().as_any().is::<S>()
}

fn has_type_of(oracle: &RateOracle, id: RateSourceId) -> bool {
    match id {
        RateSourceId::Binance => is_source::<BinanceRateSource>(oracle),
        RateSourceId::BinanceUs => is_source::<BinanceUsRateSource>(oracle),
        RateSourceId::CoinGecko => is_source::<CoinGeckoRateSource>(oracle),
        RateSourceId::Kucoin => is_source::<KucoinRateSource>(oracle),
    }
}

#[test]
#[serial]
fn env_var_selects_each_registered_source() {
    for id in RateSourceId::ALL {
        let oracle = fresh_oracle_with(Some(id.as_str()));
        assert!(has_type_of(&oracle, id), "source {}", id);
        assert_eq!(oracle.source_id(), id);
    }
}

#[test]
#[serial]
fn env_var_invalid_falls_back_to_binance() {
    let oracle = fresh_oracle_with(Some("not_a_real_oracle"));
    assert!(is_source::<BinanceRateSource>(&oracle));
    assert!(oracle.is_defaulted());
}

#[test]
#[serial]
fn env_var_empty_string_falls_back_to_binance() {
    let oracle = fresh_oracle_with(Some(""));
    assert!(is_source::<BinanceRateSource>(&oracle));
}

#[test]
#[serial]
fn env_var_missing_falls_back_to_binance() {
    let oracle = fresh_oracle_with(None);
    assert!(is_source::<BinanceRateSource>(&oracle));
}

#[test]
#[serial]
fn env_var_is_case_sensitive() {
    let oracle = fresh_oracle_with(Some("CoinGecko"));
    assert!(is_source::<BinanceRateSource>(&oracle));
}

#[test]
#[serial]
fn instance_survives_env_change_until_reset() {
    let first = fresh_oracle_with(Some("coingecko"));

    std::env::set_var(RATE_ORACLE_ENV_VAR, "kucoin");
    let second = RateOracle::get_instance();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(is_source::<CoinGeckoRateSource>(&second));

    RateOracle::reset();
    let third = RateOracle::get_instance();
    assert!(is_source::<KucoinRateSource>(&third));

    std::env::remove_var(RATE_ORACLE_ENV_VAR);
    RateOracle::reset();
}
