//! Matrices and linear and affine transforms.
//!
//! Matrices are stored in row-major order and operate on column vectors,
//! so that `A.compose(B)` (the matrix product A·B) applies B first, then A.
//! For readability, [`then`][Matrix::then] is provided with the
//! arguments in application order.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::ops::Range;

use super::{
    Angle,
    approx::ApproxEq,
    vec::{ProjVec4, Vec3, Vector, vec3},
};

//
// Types
//

/// A generic matrix type, tagged with the mapping it represents.
#[repr(transparent)]
pub struct Matrix<Repr, Map>(pub Repr, PhantomData<Map>);

/// Tag type for an affine mapping from real space `Src` to real space
/// `Dst`, both of dimension `DIM`.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct RealToReal<const DIM: usize, Src = (), Dst = ()>(
    PhantomData<(Src, Dst)>,
);

/// Tag type for a projective mapping from real space `Src` to clip space.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct RealToProj<Src>(PhantomData<Src>);

/// A 4×4 matrix representing an affine transform from `Src` to `Dst`.
pub type Mat4<Src = (), Dst = Src> =
    Matrix<[[f32; 4]; 4], RealToReal<3, Src, Dst>>;

/// A 4×4 matrix representing a projective transform from `Src` to clip
/// space.
pub type ProjMat4<Src = ()> = Matrix<[[f32; 4]; 4], RealToProj<Src>>;

type Els = [[f32; 4]; 4];

//
// Inherent impls
//

impl<M> Matrix<Els, M> {
    /// Returns a matrix with the given rows.
    #[inline]
    pub const fn new(els: Els) -> Self {
        Self(els, PhantomData)
    }

    /// Returns the 4×4 identity matrix.
    pub const fn identity() -> Self {
        Self::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Returns the row at index `i`.
    #[inline]
    pub fn row(&self, i: usize) -> [f32; 4] {
        self.0[i]
    }

    /// Returns the column at index `i`.
    #[inline]
    pub fn col(&self, i: usize) -> [f32; 4] {
        self.0.map(|row| row[i])
    }

    /// Returns `self` reinterpreted as another mapping.
    ///
    /// This is a type-level cast only; the elements are unchanged.
    #[inline]
    pub fn to<N>(&self) -> Matrix<Els, N> {
        Matrix::new(self.0)
    }

    /// Returns the transpose of `self`.
    pub fn transpose(&self) -> Self {
        Self::new([0, 1, 2, 3].map(|i| self.col(i)))
    }

    /// Returns the elements of `self` in column-major order, the layout
    /// expected by OpenGL-style uniform uploads.
    pub fn to_cols(&self) -> [f32; 16] {
        let mut res = [0.0; 16];
        for (j, col) in res.chunks_exact_mut(4).enumerate() {
            col.copy_from_slice(&self.col(j));
        }
        res
    }

    /// Returns the determinant of `self`.
    pub fn determinant(&self) -> f32 {
        let (s, c) = minors(&self.0);
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1]
            + s[5] * c[0]
    }
}

impl<S, D> Mat4<S, D> {
    /// Returns the composite transform of `self` and `other`.
    ///
    /// Computes the matrix product `self · other`; `other` is applied first.
    pub fn compose<T>(&self, other: &Mat4<T, S>) -> Mat4<T, D> {
        Matrix::new(mul(&self.0, &other.0))
    }

    /// Returns the composite transform of `self` and `other`.
    ///
    /// Computes the matrix product `other · self`; `self` is applied first.
    pub fn then<E>(&self, other: &Mat4<D, E>) -> Mat4<S, E> {
        other.compose(self)
    }

    /// Transforms the point `pt` by `self`, including translation.
    #[inline]
    pub fn apply(&self, pt: &Vec3<S>) -> Vec3<D> {
        let [x, y, z, _] = self.apply4(pt, 1.0);
        vec3(x, y, z)
    }

    /// Transforms the direction `v` by `self`, ignoring translation.
    #[inline]
    pub fn apply_linear(&self, v: &Vec3<S>) -> Vec3<D> {
        let [x, y, z, _] = self.apply4(v, 0.0);
        vec3(x, y, z)
    }

    /// Returns the inverse of `self`, the transform from `Dst` back to `Src`.
    ///
    /// If `self` is singular, the result is non-finite.
    pub fn inverse(&self) -> Mat4<D, S> {
        let a = &self.0;
        let (s, c) = minors(a);
        let det = self.determinant();
        debug_assert!(
            det != 0.0,
            "singular matrix has no inverse: {:?}",
            self.0
        );
        let r = 1.0 / det;

        let [a0, a1, a2, a3] = *a;
        Matrix::new([
            [
                (a1[1] * c[5] - a1[2] * c[4] + a1[3] * c[3]) * r,
                (-a0[1] * c[5] + a0[2] * c[4] - a0[3] * c[3]) * r,
                (a3[1] * s[5] - a3[2] * s[4] + a3[3] * s[3]) * r,
                (-a2[1] * s[5] + a2[2] * s[4] - a2[3] * s[3]) * r,
            ],
            [
                (-a1[0] * c[5] + a1[2] * c[2] - a1[3] * c[1]) * r,
                (a0[0] * c[5] - a0[2] * c[2] + a0[3] * c[1]) * r,
                (-a3[0] * s[5] + a3[2] * s[2] - a3[3] * s[1]) * r,
                (a2[0] * s[5] - a2[2] * s[2] + a2[3] * s[1]) * r,
            ],
            [
                (a1[0] * c[4] - a1[1] * c[2] + a1[3] * c[0]) * r,
                (-a0[0] * c[4] + a0[1] * c[2] - a0[3] * c[0]) * r,
                (a3[0] * s[4] - a3[1] * s[2] + a3[3] * s[0]) * r,
                (-a2[0] * s[4] + a2[1] * s[2] - a2[3] * s[0]) * r,
            ],
            [
                (-a1[0] * c[3] + a1[1] * c[1] - a1[2] * c[0]) * r,
                (a0[0] * c[3] - a0[1] * c[1] + a0[2] * c[0]) * r,
                (-a3[0] * s[3] + a3[1] * s[1] - a3[2] * s[0]) * r,
                (a2[0] * s[3] - a2[1] * s[1] + a2[2] * s[0]) * r,
            ],
        ])
    }

    /// Returns the matrix that transforms surface normals consistently
    /// with `self`: the transpose of the inverse of `self`.
    ///
    /// For a rigid transform such as a camera's view matrix, the upper-left
    /// 3×3 part of the result equals that of `self`.
    pub fn normal_matrix(&self) -> Mat4<S, D> {
        self.inverse().transpose().to()
    }

    fn apply4(&self, v: &Vec3<S>, w: f32) -> [f32; 4] {
        let v = [v.x(), v.y(), v.z(), w];
        self.0.map(|row| dot4(&row, &v))
    }
}

impl<S> ProjMat4<S> {
    /// Transforms the point `pt` into homogeneous clip coordinates.
    #[inline]
    pub fn apply(&self, pt: &Vec3<S>) -> ProjVec4 {
        let v = [pt.x(), pt.y(), pt.z(), 1.0];
        Vector::new(self.0.map(|row| dot4(&row, &v)))
    }
}

//
// Free functions
//

/// Returns a matrix applying a translation by `t`.
pub const fn translate(t: Vec3) -> Mat4 {
    let [x, y, z] = t.0;
    Matrix::new([
        [1.0, 0.0, 0.0, x],
        [0.0, 1.0, 0.0, y],
        [0.0, 0.0, 1.0, z],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix applying a scaling by `s` along each axis.
pub const fn scale(s: Vec3) -> Mat4 {
    let [x, y, z] = s.0;
    Matrix::new([
        [x, 0.0, 0.0, 0.0],
        [0.0, y, 0.0, 0.0],
        [0.0, 0.0, z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a matrix applying a rotation by angle `a` about the y-axis.
///
/// A positive angle turns the positive z-axis towards the positive x-axis.
pub fn rotate_y(a: Angle) -> Mat4 {
    let (s, c) = (a.sin(), a.cos());
    Matrix::new([
        [c, 0.0, s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Returns a right-handed world-to-view matrix for a viewer at `eye`
/// looking at `target`, with `up` pointing approximately upwards.
///
/// In view space, the viewer is at the origin looking towards negative z,
/// with positive y up and positive x to the right.
///
/// The result is non-finite if `eye` = `target` or if `target - eye`
/// is parallel to `up`.
pub fn look_at<S, D>(eye: Vec3<S>, target: Vec3<S>, up: Vec3<S>) -> Mat4<S, D> {
    let back = (eye - target).normalize();
    let right = up.cross(&back).normalize();
    let up = back.cross(&right);

    let row = |v: Vec3<S>| [v.x(), v.y(), v.z(), -v.dot(&eye)];
    Matrix::new([row(right), row(up), row(back), [0.0, 0.0, 0.0, 1.0]])
}

/// Returns a perspective projection matrix.
///
/// `fov_y` is the vertical angle of view, `aspect` the ratio of viewport
/// width to height, and `near_far` the distances of the near and far
/// clipping planes. Depths in `near_far` are mapped to normalized device
/// z coordinates in [-1, 1].
///
/// # Panics
/// If `near_far` is empty or its start is non-positive.
pub fn perspective<S>(
    fov_y: Angle,
    aspect: f32,
    near_far: Range<f32>,
) -> ProjMat4<S> {
    let Range { start: n, end: f } = near_far;
    assert!(0.0 < n && n < f, "invalid near/far range {n}..{f}");

    let focal = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (n - f);
    Matrix::new([
        [focal / aspect, 0.0, 0.0, 0.0],
        [0.0, focal, 0.0, 0.0],
        [0.0, 0.0, (f + n) * nf, 2.0 * f * n * nf],
        [0.0, 0.0, -1.0, 0.0],
    ])
}

#[inline]
fn dot4(a: &[f32; 4], b: &[f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

fn mul(a: &Els, b: &Els) -> Els {
    let cols = [0, 1, 2, 3].map(|j| b.map(|row| row[j]));
    a.map(|row| cols.map(|col| dot4(&row, &col)))
}

/// Returns the 2×2 minors of the top two and bottom two rows of `a`.
fn minors(a: &Els) -> ([f32; 6], [f32; 6]) {
    let det2 = |r: &[f32; 4], s: &[f32; 4], i: usize, j: usize| {
        r[i] * s[j] - s[i] * r[j]
    };
    let pairs = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
    let s = pairs.map(|(i, j)| det2(&a[0], &a[1], i, j));
    let c = pairs.map(|(i, j)| det2(&a[2], &a[3], i, j));
    (s, c)
}

//
// Foreign trait impls
//

impl<R: Copy, M> Copy for Matrix<R, M> {}

impl<R: Clone, M> Clone for Matrix<R, M> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<R: PartialEq, M> PartialEq for Matrix<R, M> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<M> Default for Matrix<Els, M> {
    /// Returns the identity matrix.
    fn default() -> Self {
        Self::identity()
    }
}

impl<M: Debug + Default> Debug for Matrix<Els, M> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix<{:?}>[", M::default())?;
        for row in &self.0 {
            writeln!(f, "    {row:6.2?}")?;
        }
        write!(f, "]")
    }
}

impl<const DIM: usize, S, D> Debug for RealToReal<DIM, S, D>
where
    S: Debug + Default,
    D: Debug + Default,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}→{:?}", S::default(), D::default())
    }
}

impl<S: Debug + Default> Debug for RealToProj<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}→Proj", S::default())
    }
}

impl<M> ApproxEq<Self, f32> for Matrix<Els, M> {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use crate::assert_approx_eq;
    use crate::math::{degs, splat};

    use super::*;

    const M: Mat4 = Matrix::new([
        [2.0, 0.0, 1.0, 3.0],
        [0.0, 1.0, -1.0, 0.5],
        [1.0, 0.0, 3.0, -2.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    #[test]
    fn matrix_debug() {
        let expected = "Matrix<()→()>[
    [  2.00,   0.00,   1.00,   3.00]
    [  0.00,   1.00,  -1.00,   0.50]
    [  1.00,   0.00,   3.00,  -2.00]
    [  0.00,   0.00,   0.00,   1.00]
]";
        assert_eq!(format!("{M:?}"), expected);
    }

    #[test]
    fn identity_is_neutral() {
        assert_eq!(M.compose(&Mat4::identity()), M);
        assert_eq!(Mat4::identity().compose(&M), M);
    }

    #[test]
    fn compose_applies_right_operand_first() {
        let tr = translate(vec3(1.0, 0.0, 0.0));
        let sc = scale(splat(2.0));
        let v = vec3(1.0, 1.0, 1.0);
        assert_eq!(tr.compose(&sc).apply(&v), vec3(3.0, 2.0, 2.0));
        assert_eq!(tr.then(&sc).apply(&v), vec3(4.0, 2.0, 2.0));
    }

    #[test]
    fn apply_linear_ignores_translation() {
        let tr = translate(vec3(1.0, 2.0, 3.0));
        let v = vec3(0.0, 5.0, -3.0);
        assert_eq!(tr.apply(&v), vec3(1.0, 7.0, 0.0));
        assert_eq!(tr.apply_linear(&v), v);
    }

    #[test]
    fn determinant() {
        assert_eq!(Mat4::<()>::identity().determinant(), 1.0);
        assert_eq!(scale(vec3(2.0, 3.0, 4.0)).determinant(), 24.0);
        assert_approx_eq!(M.determinant(), 5.0);
    }

    #[test]
    fn inverse_composes_to_identity() {
        let inv = M.inverse();
        assert_approx_eq!(M.compose(&inv), Mat4::identity(), eps = 1e-6);
        assert_approx_eq!(inv.compose(&M), Mat4::identity(), eps = 1e-6);
    }

    #[test]
    fn transpose_and_cols() {
        let t = M.transpose();
        assert_eq!(t.row(0), M.col(0));
        assert_eq!(t.transpose(), M);
        assert_eq!(
            translate(vec3(1.0, 2.0, 3.0)).to_cols()[12..],
            [1.0, 2.0, 3.0, 1.0]
        );
    }

    #[test]
    fn rotate_y_turns_x_towards_negative_z() {
        let r = rotate_y(degs(90.0));
        assert_approx_eq!(r.apply(&Vec3::X), -Vec3::Z, eps = 1e-6);
        assert_approx_eq!(r.apply(&Vec3::Z), Vec3::X, eps = 1e-6);
        assert_approx_eq!(r.apply(&Vec3::Y), Vec3::Y);
    }

    #[test]
    fn normal_matrix_of_rotation_is_rotation() {
        let r = rotate_y(degs(30.0));
        assert_approx_eq!(r.normal_matrix(), r, eps = 1e-6);
    }

    #[test]
    fn normal_matrix_of_scale_is_inverse_scale() {
        let s = scale(vec3(2.0, 4.0, 1.0));
        assert_approx_eq!(
            s.normal_matrix(),
            scale(vec3(0.5, 0.25, 1.0)),
            eps = 1e-6
        );
    }

    #[test]
    fn look_at_from_positive_x() {
        let m: Mat4 = look_at(vec3(5.0, 0.0, 0.0), Vec3::zero(), Vec3::Y);
        // The target is straight ahead, at distance 5
        assert_approx_eq!(m.apply(&Vec3::zero()), vec3(0.0, 0.0, -5.0));
        // Up stays up
        assert_approx_eq!(m.apply_linear(&Vec3::Y), Vec3::Y);
        // World -z is to the right
        assert_approx_eq!(m.apply_linear(&-Vec3::Z), Vec3::X);
    }

    #[test]
    fn perspective_maps_near_and_far_to_ndc_range() {
        let p: ProjMat4 = perspective(degs(90.0), 1.0, 1.0..10.0);

        let near = p.apply(&vec3(0.0, 0.0, -1.0)).project_to_real::<()>();
        let far = p.apply(&vec3(0.0, 0.0, -10.0)).project_to_real::<()>();
        assert_approx_eq!(near.z(), -1.0, eps = 1e-6);
        assert_approx_eq!(far.z(), 1.0, eps = 1e-6);

        // 90° fov: the frustum edge maps to the NDC edge
        let edge = p.apply(&vec3(0.0, 2.0, -2.0)).project_to_real::<()>();
        assert_approx_eq!(edge.y(), 1.0, eps = 1e-6);
    }

    #[test]
    #[should_panic]
    fn perspective_rejects_bad_range() {
        let _: ProjMat4 = perspective(degs(60.0), 1.0, 0.0..10.0);
    }
}
