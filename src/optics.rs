#![warn(missing_docs)]
//! Snell's law and closed-form intersections of lines with curved surfaces.
//!
//! All functions operate in the local coordinate system of an optical element.
use crate::{
    error::LbResult,
    geometry::{Line2D, Vector2D},
};

/// Calculate the direction of a ray after refraction (or reflection) at a surface.
///
/// `incident` is the direction of the incoming ray and `normal` the (outward) normal of the surface
/// at the point of incidence. Both vectors are normalized before use. An `ior` of `0.0` denotes a
/// fully reflecting surface. Otherwise `ior` is the ratio of refractive indices for a ray travelling
/// along `normal`. If the ray hits the surface from the back side (`incident·normal < 0`) the normal
/// is flipped and the ratio is inverted.
///
/// Total internal reflection is handled automatically. The returned direction always has unit
/// length.
///
/// # Errors
///
/// This function will return [`LbError::DivisionByZero`](crate::error::LbError::DivisionByZero) if
///   - `incident` or `normal` is a null vector.
///   - the resulting direction degenerates to a null vector.
pub fn snell(incident: Vector2D, normal: Vector2D, ior: f64) -> LbResult<Vector2D> {
    let u = incident.unit()?;
    let mut n = normal.unit()?;
    let mut ratio = ior;
    let mut cos_incident = u.dot(&n);
    if cos_incident < 0.0 {
        n = -n;
        cos_incident = u.dot(&n);
        if ior != 0.0 {
            ratio = 1.0 / ior;
        }
    }
    let mut tangent = Vector2D::new(n.y(), -n.x());
    let mut tangential = u.dot(&tangent);
    if tangential < 0.0 {
        tangent = -tangent;
        tangential = u.dot(&tangent);
    }
    let cos2_transmitted = (ratio * ratio).mul_add(-cos_incident.mul_add(-cos_incident, 1.0), 1.0);
    let outgoing = if ior == 0.0 || cos2_transmitted < 0.0 {
        n * (-cos_incident) + tangent * tangential
    } else if tangential == 0.0 {
        u
    } else {
        n * cos2_transmitted.sqrt() + tangent * (tangential * ratio)
    };
    outgoing.unit()
}

/// Solve `a·λ² + b·λ + c = 0` and return the non-negative roots.
///
/// A double root is returned once. Two distinct roots are ordered `[+√D, -√D]`.
fn non_negative_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    let discriminant = b.mul_add(b, -4.0 * a * c);
    let roots = if discriminant == 0.0 {
        vec![-b / (2.0 * a)]
    } else if discriminant > 0.0 {
        let sqrt_d = discriminant.sqrt();
        vec![(-b + sqrt_d) / (2.0 * a), (-b - sqrt_d) / (2.0 * a)]
    } else {
        Vec::new()
    };
    roots
        .into_iter()
        .filter(|lambda| lambda.is_finite() && *lambda >= 0.0)
        .collect()
}

/// Intersection points of a line with a circle of the given `radius` centered at `(center_x, 0)`.
///
/// Only points in the positive half space of the line (λ ≥ 0) are returned. A tangent yields a
/// single point, a secant up to two points.
#[must_use]
pub fn intersect_line_circle(line: &Line2D, center_x: f64, radius: f64) -> Vec<Vector2D> {
    let a = line.base();
    let u = line.direction();
    let dx = a.x() - center_x;
    let qa = u.dot(&u);
    let qb = 2.0 * dx * u.x() + 2.0 * a.y() * u.y();
    let qc = a.y().mul_add(a.y(), dx.mul_add(dx, -radius * radius));
    non_negative_roots(qa, qb, qc)
        .into_iter()
        .map(|lambda| line.point_at(lambda))
        .collect()
}

/// Intersection points of a line with the parabola `y = -((x - f)² / 2f - f / 2)`.
///
/// If the line runs parallel to the axis of the parabola the quadratic degenerates and a linear
/// equation is solved instead. Only points with λ ≥ 0 are returned.
#[must_use]
pub fn intersect_line_parabola(line: &Line2D, focal_length: f64) -> Vec<Vector2D> {
    let f = focal_length;
    if f == 0.0 {
        return Vec::new();
    }
    let a = line.base();
    let u = line.direction();
    let shifted = a.x() - f;
    let qa = -u.x() * u.x() / (2.0 * f);
    let qb = -shifted * u.x() / f - u.y();
    let qc = -shifted * shifted / (2.0 * f) + f / 2.0 - a.y();
    let lambdas = if qa == 0.0 {
        if qb == 0.0 {
            Vec::new()
        } else {
            let lambda = -qc / qb;
            if lambda >= 0.0 {
                vec![lambda]
            } else {
                Vec::new()
            }
        }
    } else {
        non_negative_roots(qa, qb, qc)
    };
    lambdas
        .into_iter()
        .map(|lambda| line.point_at(lambda))
        .collect()
}
