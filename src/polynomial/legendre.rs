//! Legendre polynomials on [-1, 1].
//!
//! Used for node generation (Gauss and Gauss-Lobatto) and for the modal
//! basis of the shock indicator.

/// Evaluate `(P_n(x), P_{n-1}(x))` with the three-term recurrence
/// `(k+1) P_{k+1} = (2k+1) x P_k - k P_{k-1}`.
#[inline]
fn recurrence(n: usize, x: f64) -> (f64, f64) {
    let mut p_prev = 1.0;
    let mut p_curr = x;
    for k in 1..n {
        let p_next = ((2 * k + 1) as f64 * x * p_curr - k as f64 * p_prev) / (k + 1) as f64;
        p_prev = p_curr;
        p_curr = p_next;
    }
    (p_curr, p_prev)
}

/// Legendre polynomial `P_n(x)`.
pub fn legendre(n: usize, x: f64) -> f64 {
    match n {
        0 => 1.0,
        _ => recurrence(n, x).0,
    }
}

/// Legendre polynomial and its derivative, `(P_n(x), P'_n(x))`.
///
/// Uses `P'_n = n (x P_n - P_{n-1}) / (x² - 1)` in the interior and the
/// closed-form endpoint values `P'_n(±1) = (±1)^{n+1} n(n+1)/2`.
pub fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }
    let (p_n, p_n_minus_1) = recurrence(n, x);
    let end_slope = (n * (n + 1)) as f64 / 2.0;

    let dp_n = if (x - 1.0).abs() < 1e-14 {
        end_slope
    } else if (x + 1.0).abs() < 1e-14 {
        if n % 2 == 0 { -end_slope } else { end_slope }
    } else {
        n as f64 * (x * p_n - p_n_minus_1) / (x * x - 1.0)
    };

    (p_n, dp_n)
}
