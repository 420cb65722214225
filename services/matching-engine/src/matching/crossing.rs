//! Crossing detection
//!
//! Decides whether an incoming taker may enter a contra price level. The
//! market sentinel (`Price::ZERO`) bypasses the comparison entirely: a
//! market taker matches at every price until filled or the side is
//! exhausted.

use types::numeric::Price;
use types::order::Side;

/// Check whether a taker at `taker_price` crosses a contra level at
/// `level_price`.
///
/// Buy takers cross levels at or below their limit; sell takers cross
/// levels at or above theirs. A zero taker price means no limit at all.
pub fn crosses(taker_side: Side, taker_price: Price, level_price: Price) -> bool {
    if taker_price.is_zero() {
        return true;
    }
    match taker_side {
        Side::Buy => taker_price >= level_price,
        Side::Sell => taker_price <= level_price,
    }
}
