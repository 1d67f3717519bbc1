/// Check if `n` is a prime number.
///
/// Uses trial division up to sqrt(n). Suitable for validating
/// field parameters, not for high-performance primality testing.
pub const fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut i = 3;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// `base^exp`, or `None` on overflow.
pub const fn checked_pow(base: u64, exp: u32) -> Option<u64> {
    let mut result: u64 = 1;
    let mut i = 0;
    while i < exp {
        result = match result.checked_mul(base) {
            Some(r) => r,
            None => return None,
        };
        i += 1;
    }
    Some(result)
}

/// Split `q` into `(p, n)` with `q = p^n` and `p` prime.
///
/// Returns `None` when `q` is not a prime power.
///
/// # Example
///
/// ```
/// use gfmatrix::utils::prime_power_decomposition;
///
/// assert_eq!(prime_power_decomposition(9), Some((3, 2)));
/// assert_eq!(prime_power_decomposition(7), Some((7, 1)));
/// assert_eq!(prime_power_decomposition(12), None);
/// ```
pub fn prime_power_decomposition(q: u64) -> Option<(u64, u32)> {
    if q < 2 {
        return None;
    }
    // The smallest divisor > 1 is necessarily the only candidate prime.
    let p = smallest_factor(q);
    let mut rest = q;
    let mut n = 0;
    while rest % p == 0 {
        rest /= p;
        n += 1;
    }
    (rest == 1).then_some((p, n))
}

fn smallest_factor(n: u64) -> u64 {
    let mut d = 2;
    while d <= n / d {
        if n % d == 0 {
            return d;
        }
        d += 1;
    }
    n
}

/// Distinct prime divisors of `n`, ascending.
pub fn prime_divisors(mut n: u64) -> Vec<u64> {
    let mut primes = Vec::new();
    let mut d: u64 = 2;

    while d <= n / d {
        if n % d == 0 {
            primes.push(d);
            while n % d == 0 {
                n /= d;
            }
        }
        d += 1;
    }

    if n > 1 {
        primes.push(n);
    }

    primes
}

/// `a * b mod p` without intermediate overflow.
#[inline]
pub fn mul_mod(a: u64, b: u64, p: u64) -> u64 {
    ((a as u128 * b as u128) % p as u128) as u64
}

/// `a + b mod p` for reduced operands.
#[inline]
pub fn add_mod(a: u64, b: u64, p: u64) -> u64 {
    ((a as u128 + b as u128) % p as u128) as u64
}

/// `-a mod p`.
#[inline]
pub fn neg_mod(a: u64, p: u64) -> u64 {
    let a = a % p;
    if a == 0 {
        0
    } else {
        p - a
    }
}

/// `base^exp mod p` by square-and-multiply.
pub fn pow_mod(base: u64, exp: u64, p: u64) -> u64 {
    if p == 1 {
        return 0;
    }
    let mut base = base % p;
    let mut result = 1;
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result = mul_mod(result, base, p);
        }
        base = mul_mod(base, base, p);
        e >>= 1;
    }
    result
}

/// Multiplicative inverse of `a` modulo the prime `p`, if `a != 0 mod p`.
pub fn inv_mod(a: u64, p: u64) -> Option<u64> {
    let a = a % p;
    if a == 0 {
        return None;
    }
    // Fermat: a^(p-2) = a^-1 for prime p.
    Some(pow_mod(a, p - 2, p))
}
