//! Dormand–Prince 5(4) Butcher tableau.
//!
//! The seventh stage is evaluated at the fifth-order solution, so its
//! derivative is reused as the first stage of the next step.

/// Stage nodes `cᵢ` for stages 2 through 7.
pub(super) const C: [f64; 6] = [1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0, 1.0];

/// Stage coefficients `aᵢⱼ` for stages 2 through 7, by row.
pub(super) const A: [&[f64]; 6] = [
    &[1.0 / 5.0],
    &[3.0 / 40.0, 9.0 / 40.0],
    &[44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0],
    &[
        19372.0 / 6561.0,
        -25360.0 / 2187.0,
        64448.0 / 6561.0,
        -212.0 / 729.0,
    ],
    &[
        9017.0 / 3168.0,
        -355.0 / 33.0,
        46732.0 / 5247.0,
        49.0 / 176.0,
        -5103.0 / 18656.0,
    ],
    &[
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
    ],
];

/// Fourth-order embedded weights over all seven stages.
pub(super) const B4: [f64; 7] = [
    5179.0 / 57600.0,
    0.0,
    7571.0 / 16695.0,
    393.0 / 640.0,
    -92097.0 / 339200.0,
    187.0 / 2100.0,
    1.0 / 40.0,
];

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn rows_sum_to_their_node() {
        for (row, c) in A.iter().zip(C) {
            assert_relative_eq!(row.iter().sum::<f64>(), c, epsilon = 1e-12);
        }
    }

    #[test]
    fn embedded_weights_sum_to_one() {
        assert_relative_eq!(B4.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }
}
