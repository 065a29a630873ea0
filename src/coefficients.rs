use crate::finite_field::FieldTables;

/// Point-dependent Lagrange factors shared by every byte offset
///
/// `in_cross[j]` is the product of `in[j] ^ in[i]` over all `i != j`.
/// `out_cross[i]` is the product of `out[i] ^ in[j]` over all `j`, and is zero
/// exactly when `out[i]` is one of the input points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossCoefficients {
    pub in_cross: Vec<u8>,
    pub out_cross: Vec<u8>,
}

impl CrossCoefficients {
    /// Computes the cross products for the given point sets.
    ///
    /// `in_points` must be pairwise distinct; `out_points` may overlap them.
    pub fn compute(tables: &FieldTables, in_points: &[u8], out_points: &[u8]) -> Self {
        let in_cross = in_points
            .iter()
            .enumerate()
            .map(|(j, &pj)| {
                in_points
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != j)
                    .fold(1u8, |acc, (_, &pi)| tables.multiply(acc, pj ^ pi))
            })
            .collect();

        let out_cross = out_points
            .iter()
            .map(|&o| {
                in_points
                    .iter()
                    .fold(1u8, |acc, &p| tables.multiply(acc, o ^ p))
            })
            .collect();

        Self {
            in_cross,
            out_cross,
        }
    }

    /// Whether output `i` coincides with an input point
    #[inline]
    pub fn is_direct_copy(&self, i: usize) -> bool {
        self.out_cross[i] == 0
    }
}
