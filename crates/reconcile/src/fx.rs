//! Currency conversion into the ledger's base currency.

use splitledger_ledger::FxTable;

/// Converts `amount` of `currency` into base units.
///
/// Rates mean "1 unit of `currency` = rate units of base". A missing,
/// non-finite, zero or negative rate is an unconfigured rate: the amount is
/// taken to be in base units already and returned unchanged.
///
/// Note that `+inf` also falls back to identity, even though it is a
/// positive number: only finite rates above zero ever multiply.
pub fn to_base(amount: f64, currency: &str, fx: &FxTable) -> f64 {
    match fx.rate(currency) {
        Some(rate) if rate.is_finite() && rate > 0.0 => amount * rate,
        _ => amount,
    }
}
