//! Mesh approximations of the sphere.

use gs::geom::Mesh;

mod platonic;
mod subdiv;

pub use platonic::*;
pub use subdiv::*;

/// Trait for types that can be turned into a mesh.
pub trait Build {
    /// Builds the mesh.
    fn build(self) -> Mesh;
}
