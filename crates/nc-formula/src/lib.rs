//! # nc-formula
//!
//! Bonding-curve pricing for user-issued coins.
//!
//! Every coin is backed by a base-coin reserve under a constant reserve
//! ratio (CRR). The four conversions here — purchase/sale return and their
//! inverses — are consensus-critical: every node must produce bit-identical
//! results, so all arithmetic is integer-only with fixed truncation points.
//!
//! ## Algorithm
//!
//! Fractional powers are evaluated at a fixed-point scale of 10^18 as
//! `x^(p/q) = iroot_q(x^p * F^(q-p))`, with `iroot` the integer k-th root
//! (Newton's method). Intermediates like `x^100` run to thousands of bits,
//! so the internals use arbitrary-precision `ibig::UBig`; the API stays on
//! `U256` like the rest of the state machine.

pub mod curve;
pub mod power;

pub use curve::*;
pub use power::*;
