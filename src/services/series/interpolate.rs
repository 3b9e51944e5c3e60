/// Fill `None` gaps in an ordered value sequence.
///
/// Interior gaps get a straight-line estimate between the nearest known
/// neighbors; leading gaps copy the first known value backward, trailing
/// gaps carry the last known value forward. An all-null input fills with
/// 0.0 — a documented fallback for degenerate datasets, not an estimate.
///
/// Output has the same length and order as the input and no remaining
/// gaps, so running it on its own output is a no-op.
pub fn fill_gaps(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| match v {
            Some(x) => *x,
            None => fill_at(values, i),
        })
        .collect()
}

fn fill_at(values: &[Option<f64>], i: usize) -> f64 {
    let prev = values[..i]
        .iter()
        .enumerate()
        .rev()
        .find_map(|(p, v)| v.map(|x| (p, x)));
    let next = values[i + 1..]
        .iter()
        .enumerate()
        .find_map(|(off, v)| v.map(|x| (i + 1 + off, x)));

    match (prev, next) {
        (Some((p, pv)), Some((n, nv))) => pv + (i - p) as f64 * (nv - pv) / (n - p) as f64,
        (Some((_, pv)), None) => pv,
        (None, Some((_, nv))) => nv,
        (None, None) => 0.0,
    }
}
