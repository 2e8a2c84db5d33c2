//! Small helpers for 3-vectors stored as `[f64; 3]`.

/// A point or a direction in 3-space.
pub type Vec3 = [f64; 3];

/// The zero vector.
pub const ZERO: Vec3 = [0.0; 3];

/// Returns `a + b`.
#[must_use]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    let mut out = a;
    for (o, &y) in out.iter_mut().zip(b.iter()) {
        *o += y;
    }
    out
}

/// Returns `a - b`.
#[must_use]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    let mut out = a;
    for (o, &y) in out.iter_mut().zip(b.iter()) {
        *o -= y;
    }
    out
}

/// Returns `s * a`.
#[must_use]
pub fn scale(a: Vec3, s: f64) -> Vec3 {
    a.map(|x| x * s)
}

/// Returns the Euclidean norm of `a`.
#[must_use]
pub fn norm(a: Vec3) -> f64 {
    a.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Returns the Euclidean distance between `a` and `b`.
#[must_use]
pub fn distance(a: Vec3, b: Vec3) -> f64 {
    norm(sub(a, b))
}

/// Returns `true` if every component is finite.
#[must_use]
pub fn is_finite(a: Vec3) -> bool {
    a.iter().all(|x| x.is_finite())
}
