//! Lagrange evaluation of the hidden polynomial, one byte offset at a time.
//!
//! Split and join are both calls to [`evaluate`]: split samples the polynomial
//! fixed by the secret and the padding at points 1..=m, join samples the
//! polynomial fixed by the supplied shares at point 0.

use crate::coefficients::CrossCoefficients;
use crate::config::{Config, SplitMode};
use crate::finite_field::FieldTables;
use rayon::prelude::*;
use tracing::trace;

/// How one output buffer is produced
#[derive(Debug, Clone, PartialEq, Eq)]
enum OutputPlan {
    /// The output point is input `j`; copy it
    Copy(usize),
    /// Weighted XOR-sum of the inputs, one weight per input
    Interpolate(Vec<u8>),
}

fn plan_outputs(
    tables: &FieldTables,
    in_points: &[u8],
    out_points: &[u8],
    coeffs: &CrossCoefficients,
) -> Vec<OutputPlan> {
    out_points
        .iter()
        .enumerate()
        .map(|(i, &out)| {
            if coeffs.is_direct_copy(i) {
                if let Some(j) = in_points.iter().position(|&p| p == out) {
                    return OutputPlan::Copy(j);
                }
            }
            let weights = in_points
                .iter()
                .zip(&coeffs.in_cross)
                .map(|(&p, &cross)| {
                    let denominator = tables.multiply(cross, out ^ p);
                    tables.multiply(coeffs.out_cross[i], tables.invert(denominator))
                })
                .collect();
            OutputPlan::Interpolate(weights)
        })
        .collect()
}

/// Fills `dst` with output bytes for offsets `start..start + dst.len()`
#[inline]
fn fill_range(
    tables: &FieldTables,
    inputs: &[&[u8]],
    plan: &OutputPlan,
    start: usize,
    dst: &mut [u8],
) {
    let end = start + dst.len();
    match plan {
        OutputPlan::Copy(j) => dst.copy_from_slice(&inputs[*j][start..end]),
        OutputPlan::Interpolate(weights) => {
            dst.fill(0);
            for (input, &w) in inputs.iter().zip(weights) {
                let row = tables.mul_row(w);
                for (d, &x) in dst.iter_mut().zip(&input[start..end]) {
                    *d ^= row[x as usize];
                }
            }
        }
    }
}

/// Evaluates the polynomial through `(in_points[j], inputs[j])` at every
/// output point, writing one buffer per point into `outputs`.
///
/// Every input and output buffer must have the same length and `in_points`
/// must be pairwise distinct. Sequential and parallel modes produce identical
/// bytes; in parallel mode each worker owns a disjoint chunk of one output.
pub fn evaluate(
    tables: &FieldTables,
    inputs: &[&[u8]],
    in_points: &[u8],
    out_points: &[u8],
    coeffs: &CrossCoefficients,
    outputs: &mut [Vec<u8>],
    config: &Config,
) {
    debug_assert_eq!(inputs.len(), in_points.len());
    debug_assert_eq!(outputs.len(), out_points.len());

    let plans = plan_outputs(tables, in_points, out_points, coeffs);
    let len = outputs.first().map_or(0, Vec::len);
    trace!(
        inputs = inputs.len(),
        outputs = outputs.len(),
        len,
        mode = ?config.mode,
        "evaluating polynomial"
    );

    match config.mode {
        SplitMode::Sequential => {
            for (out, plan) in outputs.iter_mut().zip(&plans) {
                fill_range(tables, inputs, plan, 0, out);
            }
        }
        SplitMode::Parallel => {
            let chunk = config.chunk_size.max(1);
            outputs
                .par_iter_mut()
                .zip(plans.par_iter())
                .for_each(|(out, plan)| {
                    out.par_chunks_mut(chunk)
                        .enumerate()
                        .for_each(|(c, dst)| fill_range(tables, inputs, plan, c * chunk, dst));
                });
        }
    }
}
