//! # Fixed-Point Fractional Powers
//!
//! Integer-only evaluation of `x^(p/q)` at a fixed-point scale. Truncation
//! behavior is part of the consensus contract: every division floors.

use ibig::UBig;

/// Fixed-point scale exponent: values carry 18 fractional decimal digits.
pub const PRECISION_EXP: usize = 18;

/// The fixed-point unit, `10^18`.
pub fn precision() -> UBig {
    UBig::from(10u8).pow(PRECISION_EXP)
}

/// Integer k-th root: the largest `r` with `r^k <= n`.
///
/// Newton's method starting from a power-of-two overestimate; the iteration
/// is strictly decreasing until it crosses the root, so it terminates for
/// every input.
pub fn iroot(n: &UBig, k: u32) -> UBig {
    debug_assert!(k > 0);
    let one = UBig::from(1u8);
    if k == 1 || *n <= one {
        return n.clone();
    }

    let k_minus_1 = UBig::from(k - 1);
    let k_big = UBig::from(k);

    // 2^(ceil(bits/k)) >= n^(1/k): a safe overestimate.
    let mut x = &one << (n.bit_len() / k as usize + 1);
    loop {
        let next = (&k_minus_1 * &x + n / x.pow(k as usize - 1)) / &k_big;
        if next >= x {
            return x;
        }
        x = next;
    }
}

/// `x^(p/q)` where `x` is fixed-point scaled by `10^18`; the result carries
/// the same scale.
///
/// Derivation: with `F = 10^18`, the result `r` must satisfy
/// `(r/F)^q = (x/F)^p`, hence `r = iroot_q(x^p * F^(q-p))`. For `p > q` the
/// scale correction divides instead, truncating before the root.
pub fn pow_frac(x: &UBig, p: u32, q: u32) -> UBig {
    debug_assert!(q > 0);
    let f = precision();
    if p == 0 {
        return f;
    }
    if p == q {
        return x.clone();
    }

    let x_pow = x.pow(p as usize);
    let scaled = if q >= p {
        x_pow * f.pow((q - p) as usize)
    } else {
        x_pow / f.pow((p - q) as usize)
    };
    iroot(&scaled, q)
}
