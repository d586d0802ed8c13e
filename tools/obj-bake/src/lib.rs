//! obj-bake library
//!
//! Converts Wavefront OBJ meshes into interleaved vertex buffers and element
//! lists, and renders them as C/C++ declaration and definition files that can
//! be compiled straight into a native build.

pub mod accumulator;
pub mod buffer;
pub mod codegen;
pub mod config;
pub mod convert;
pub mod error;
pub mod math;
pub mod obj;

// Re-export key types for mesh conversion
pub use accumulator::{NormalAccumulator, ShadingPolicy, VertexSlot};
pub use buffer::VertexBuffer;
pub use config::{BakeConfig, Settings};
pub use convert::{
    bake_all, check_all, convert_file, find_obj_files, write_artifacts, BakeReport, BakedMesh,
};
pub use error::{IndexKind, ObjError, ObjResult};
pub use obj::{parse_obj, Face, Mesh, OBJ_HEADER};
