//! Per-vertex normal accumulation and reduction
//!
//! Every face corner that carries a normal index feeds that normal into the
//! vertex it references. Once all faces are read, each vertex reduces its
//! contributions to the scalars that follow its position in the buffer:
//!
//! - [`ShadingPolicy::Averaged`]: 3 scalars, the componentwise mean of every
//!   contributed normal.
//! - [`ShadingPolicy::Simple`]: 1 scalar, a two-level ambient term derived from
//!   the first contributed normal only (`0.8` when it points straight down,
//!   `1.0` otherwise).

use glam::Vec3;
use serde::Deserialize;

use crate::math::{dot, normalize, COMPONENTS, UP};

/// Ambient term for normals pointing exactly opposite [`UP`]
pub const SHADE_DOWN: f32 = 0.8;

/// Ambient term for everything else
pub const SHADE_LIT: f32 = 1.0;

/// How normals are reduced; fixed for a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingPolicy {
    #[default]
    Averaged,
    Simple,
}

impl ShadingPolicy {
    pub fn from_simple_flag(simple: bool) -> Self {
        if simple {
            ShadingPolicy::Simple
        } else {
            ShadingPolicy::Averaged
        }
    }

    /// Scalars emitted per vertex for the normal attribute
    pub fn width(self) -> usize {
        match self {
            ShadingPolicy::Averaged => COMPONENTS,
            ShadingPolicy::Simple => 1,
        }
    }
}

/// Normals contributed to a single vertex
#[derive(Debug, Clone, PartialEq)]
pub struct NormalAccumulator {
    policy: ShadingPolicy,
    normals: Vec<Vec3>,
    count: u32,
}

impl NormalAccumulator {
    pub fn new(first: Vec3, policy: ShadingPolicy) -> Self {
        Self {
            policy,
            normals: vec![first],
            count: 1,
        }
    }

    /// Record another contribution. Under the simple policy only the first
    /// normal is ever stored.
    pub fn add(&mut self, normal: Vec3) {
        self.count += 1;
        if self.policy == ShadingPolicy::Averaged {
            self.normals.push(normal);
        }
    }

    pub fn policy(&self) -> ShadingPolicy {
        self.policy
    }

    /// Number of `add`/`new` calls seen, including ignored ones
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn width(&self) -> usize {
        self.policy.width()
    }

    /// Reduce the stored normals to output scalars
    pub fn resolve(&self) -> Vec<f32> {
        match self.policy {
            ShadingPolicy::Simple => vec![simple_shade(self.normals[0])],
            ShadingPolicy::Averaged => {
                let sum: Vec3 = self.normals.iter().copied().sum();
                (sum / self.normals.len() as f32).to_array().to_vec()
            }
        }
    }
}

/// Exact comparison against -1: a normal that is only nearly anti-parallel
/// to up is treated as lit.
fn simple_shade(normal: Vec3) -> f32 {
    if dot(normalize(normal), normalize(UP)) == -1.0 {
        SHADE_DOWN
    } else {
        SHADE_LIT
    }
}

/// One entry of the mesh's vertex list
#[derive(Debug, Clone, PartialEq)]
pub enum VertexSlot {
    /// Not yet referenced by any face corner with a normal
    Position(Vec3),
    Shaded {
        position: Vec3,
        normal: NormalAccumulator,
    },
}

impl VertexSlot {
    pub fn position(&self) -> Vec3 {
        match self {
            VertexSlot::Position(position) | VertexSlot::Shaded { position, .. } => *position,
        }
    }

    pub fn normal(&self) -> Option<&NormalAccumulator> {
        match self {
            VertexSlot::Position(_) => None,
            VertexSlot::Shaded { normal, .. } => Some(normal),
        }
    }

    /// Feed a normal into this vertex. The first call attaches an accumulator
    /// with `policy`; later calls reuse it and `policy` is ignored.
    pub fn accumulate(&mut self, normal: Vec3, policy: ShadingPolicy) {
        match self {
            VertexSlot::Shaded { normal: acc, .. } => acc.add(normal),
            VertexSlot::Position(position) => {
                let position = *position;
                *self = VertexSlot::Shaded {
                    position,
                    normal: NormalAccumulator::new(normal, policy),
                };
            }
        }
    }

    /// Scalars this vertex contributes to the buffer
    pub fn width(&self) -> usize {
        COMPONENTS + self.normal().map_or(0, NormalAccumulator::width)
    }

    /// Position followed by the resolved normal data, if any
    pub fn attributes(&self) -> Vec<f32> {
        let mut out = self.position().to_array().to_vec();
        if let Some(normal) = self.normal() {
            out.extend(normal.resolve());
        }
        out
    }
}
