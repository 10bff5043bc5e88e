//! # Bonding-Curve Conversions
//!
//! For a coin with supply `S`, base-coin reserve `R`, and reserve ratio
//! `crr` (percent, 10..=100):
//!
//! ```text
//! purchase_return(d) = S * ((1 + d/R)^(crr/100) - 1)
//! sale_return(a)     = R * (1 - (1 - a/S)^(100/crr))
//! ```
//!
//! `sale_amount` and `purchase_amount` are the inverses: how much must go
//! in to take a desired amount out. At `crr == 100` every conversion
//! degenerates to the linear reserve ratio.

use crate::power::{pow_frac, precision};
use ibig::UBig;
use primitive_types::U256;

fn to_ubig(v: U256) -> UBig {
    let mut buf = [0u8; 32];
    v.to_big_endian(&mut buf);
    UBig::from_be_bytes(&buf)
}

fn to_u256(v: &UBig) -> U256 {
    U256::from_big_endian(&v.to_be_bytes())
}

/// Custom coin minted for depositing `deposit` base coin into the reserve.
pub fn purchase_return(supply: U256, reserve: U256, crr: u32, deposit: U256) -> U256 {
    if supply.is_zero() || reserve.is_zero() || deposit.is_zero() {
        return U256::zero();
    }
    let (s, r, d) = (to_ubig(supply), to_ubig(reserve), to_ubig(deposit));
    if crr == 100 {
        return to_u256(&(d * s / r));
    }

    let f = precision();
    let ratio = (&r + &d) * &f / &r;
    let grown = pow_frac(&ratio, crr, 100);
    to_u256(&(s * (grown - &f) / &f))
}

/// Base coin released from the reserve for burning `amount` custom coin.
/// Selling the entire supply (or more) drains the full reserve.
pub fn sale_return(supply: U256, reserve: U256, crr: u32, amount: U256) -> U256 {
    if supply.is_zero() || reserve.is_zero() || amount.is_zero() {
        return U256::zero();
    }
    if amount >= supply {
        return reserve;
    }
    let (s, r, a) = (to_ubig(supply), to_ubig(reserve), to_ubig(amount));
    if crr == 100 {
        return to_u256(&(a * r / s));
    }

    let f = precision();
    let ratio = (&s - &a) * &f / &s;
    let shrunk = pow_frac(&ratio, 100, crr);
    to_u256(&(r * (&f - shrunk) / &f))
}

/// Custom coin that must be burned for the reserve to release
/// `want_receive` base coin. Inverse of [`sale_return`]; asking for the
/// whole reserve (or more) costs the whole supply.
pub fn sale_amount(supply: U256, reserve: U256, crr: u32, want_receive: U256) -> U256 {
    if supply.is_zero() || reserve.is_zero() || want_receive.is_zero() {
        return U256::zero();
    }
    if want_receive >= reserve {
        return supply;
    }
    let (s, r, w) = (to_ubig(supply), to_ubig(reserve), to_ubig(want_receive));
    if crr == 100 {
        return to_u256(&(w * s / r));
    }

    let f = precision();
    let ratio = (&r - &w) * &f / &r;
    let kept = pow_frac(&ratio, crr, 100);
    to_u256(&(s * (&f - kept) / &f))
}

/// Base-coin deposit required to mint `want_buy` custom coin.
/// Inverse of [`purchase_return`].
pub fn purchase_amount(supply: U256, reserve: U256, crr: u32, want_buy: U256) -> U256 {
    if supply.is_zero() || reserve.is_zero() || want_buy.is_zero() {
        return U256::zero();
    }
    let (s, r, w) = (to_ubig(supply), to_ubig(reserve), to_ubig(want_buy));
    if crr == 100 {
        return to_u256(&(w * r / s));
    }

    let f = precision();
    let ratio = (&s + &w) * &f / &s;
    let grown = pow_frac(&ratio, 100, crr);
    to_u256(&(r * (grown - &f) / &f))
}
