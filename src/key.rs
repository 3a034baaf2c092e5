//! Order-preserving key encodings.
//!
//! Every function here maps a native number to a `u64` whose plain unsigned
//! ordering matches the numeric ordering of the input. Unsigned integers need
//! no encoding; widen them with `u64::from` (or `as u64` for `usize`).
//!
//! Floating-point keys put `-inf` first, `+inf` after every finite value and
//! all NaNs last, whatever their sign bit. `-0.0` sorts directly before `0.0`.

/// Sign bit of the platform-width integer, positioned within a `u64`.
const INT_SIGN: u64 = 1 << (usize::BITS - 1);

const SIGN_64: u64 = 1 << 63;
const SIGN_32: u32 = 1 << 31;
const EXP_64: u64 = 0x7FF0_0000_0000_0000;
const EXP_32: u32 = 0x7F80_0000;

/// Generates a key from an `isize`.
#[inline(always)]
pub const fn int_key(i: isize) -> u64 {
    (i as usize as u64) ^ INT_SIGN
}

/// Generates a key from an `i32`.
#[inline(always)]
pub const fn int32_key(i: i32) -> u64 {
    (i as u32 as u64) ^ (1 << 31)
}

/// Generates a key from an `i64`.
#[inline(always)]
pub const fn int64_key(i: i64) -> u64 {
    (i as u64) ^ SIGN_64
}

/// Generates a key from an `f32`.
///
/// The bit pattern is moved into the high half of the key, so `f32` and
/// `f64` keys share the same partitioning depths.
#[inline(always)]
pub const fn float32_key(f: f32) -> u64 {
    let mut bits = f.to_bits();
    let nan = (((bits & !SIGN_32) > EXP_32) as u32).wrapping_neg();
    bits &= !(nan & SIGN_32);
    flip((bits as u64) << 32)
}

/// Generates a key from an `f64`.
///
/// Comparing these keys is a total order, unlike `<` on the floats themselves,
/// which is why the float adapters in this crate order by key.
#[inline(always)]
pub const fn float64_key(f: f64) -> u64 {
    let mut bits = f.to_bits();
    let nan = (((bits & !SIGN_64) > EXP_64) as u64).wrapping_neg();
    bits &= !(nan & SIGN_64);
    flip(bits)
}

/// XORs with a mask whose sign bit is always set: negative patterns are fully
/// complemented (landing below the midpoint), non-negative ones only gain the
/// sign bit.
#[inline(always)]
const fn flip(b: u64) -> u64 {
    b ^ (!((b >> 63).wrapping_sub(1)) | SIGN_64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_ascending(keys: &[u64]) {
        for w in keys.windows(2) {
            assert!(w[0] < w[1], "{:#018x} !< {:#018x}", w[0], w[1]);
        }
    }

    #[test]
    fn test_signed_extremes() {
        assert_eq!(int32_key(i32::MIN), 0);
        assert_eq!(int32_key(i32::MAX), u32::MAX as u64);
        assert_eq!(int64_key(i64::MIN), 0);
        assert_eq!(int64_key(i64::MAX), u64::MAX);
        assert_eq!(int_key(isize::MIN), 0);
        assert_eq!(int_key(0), INT_SIGN);
    }

    #[test]
    fn test_signed_order() {
        let values = [i64::MIN, -100, -3, -1, 0, 1, 5, 42, i64::MAX];
        let keys: Vec<u64> = values.iter().map(|&v| int64_key(v)).collect();
        assert_ascending(&keys);

        let values = [i32::MIN, -100, -3, 0, 5, 42, i32::MAX];
        let keys: Vec<u64> = values.iter().map(|&v| int32_key(v)).collect();
        assert_ascending(&keys);
    }

    #[test]
    fn test_float64_order() {
        let values = [
            f64::NEG_INFINITY,
            f64::MIN,
            -1.5,
            -f64::MIN_POSITIVE,
            -0.0,
            0.0,
            f64::MIN_POSITIVE,
            2.0,
            f64::MAX,
            f64::INFINITY,
        ];
        let keys: Vec<u64> = values.iter().map(|&v| float64_key(v)).collect();
        assert_ascending(&keys);
    }

    #[test]
    fn test_float32_order() {
        let values = [f32::NEG_INFINITY, -3.25, -0.0, 0.0, 1e-30, 7.0, f32::INFINITY];
        let keys: Vec<u64> = values.iter().map(|&v| float32_key(v)).collect();
        assert_ascending(&keys);
    }

    #[test]
    fn test_nan_sorts_last_for_either_sign() {
        let pos = f64::NAN;
        let neg = -f64::NAN;
        assert!(neg.is_sign_negative());
        assert!(float64_key(pos) > float64_key(f64::INFINITY));
        assert!(float64_key(neg) > float64_key(f64::INFINITY));

        let pos = f32::NAN;
        let neg = -f32::NAN;
        assert!(float32_key(pos) > float32_key(f32::INFINITY));
        assert!(float32_key(neg) > float32_key(f32::INFINITY));
    }

    #[test]
    fn test_non_nan_matches_plain_transform() {
        // Without a NaN the canonicalisation must be a no-op.
        for v in [-2.5f64, 0.0, 3.0, f64::NEG_INFINITY] {
            let b = v.to_bits();
            let expected = if b >> 63 == 1 { !b } else { b | SIGN_64 };
            assert_eq!(float64_key(v), expected);
        }
    }
}
