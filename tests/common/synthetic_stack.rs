use cor_tilt::image::ProjectionStack;

/// Stack whose pixel value encodes its position, so sinograms and
/// projections can be told apart in assertions.
pub fn ramp_stack(num_projections: usize, height: usize, width: usize) -> ProjectionStack {
    assert!(width > 0 && height > 0, "stack dimensions must be positive");
    ProjectionStack::from_fn(num_projections, height, width, |p, y, x| {
        (p * 10_000 + y * 100 + x) as f32
    })
    .expect("test stack fits in memory")
}

/// Point-like object off the rotation axis: a bright column per projection
/// that follows a sine around `cor`.
pub fn sine_stack(
    num_projections: usize,
    height: usize,
    width: usize,
    cor: f64,
    radius: f64,
) -> ProjectionStack {
    assert!(num_projections > 1, "need at least two projections");
    let step = std::f64::consts::TAU / (num_projections - 1) as f64;
    ProjectionStack::from_fn(num_projections, height, width, |p, _y, x| {
        let centre = cor + radius * (p as f64 * step).sin();
        if (x as f64 - centre).abs() < 0.5 {
            1.0
        } else {
            0.0
        }
    })
    .expect("test stack fits in memory")
}
