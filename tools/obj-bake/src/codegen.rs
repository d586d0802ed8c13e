//! C/C++ declaration and definition generator
//!
//! Each mesh becomes a pair of files:
//!
//! ```c
//! // arrow.h
//! extern float arrow_buffer_data[24];
//! extern unsigned int arrow_buffer_data_stride;
//! extern unsigned int arrow_elements_data[6];
//!
//! // arrow.cpp
//! float arrow_buffer_data[24] = {
//! 	0.0f, 0.0f, 0.0f, 0.8f,
//! 	...
//! };
//! ```
//!
//! Element entries are emitted as `N-1` so the compiler folds the 1-based
//! OBJ indices down to 0-based ones.

use anyhow::Result;
use std::fmt::Write as FmtWrite;
use std::path::Path;

use crate::buffer::VertexBuffer;
use crate::math::FloatLiteral;

/// Extension of the declaration artifact
pub const HEADER_EXT: &str = "h";

/// Extension of the definition artifact
pub const SOURCE_EXT: &str = "cpp";

/// C identifier prefix derived from an input path: `arrow-v4.obj` -> `arrow_v4`
pub fn symbol_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(".obj").unwrap_or(&file_name);
    stem.replace('-', "_")
}

/// Generate the declaration artifact (no trailing newline)
pub fn generate_header(name: &str, vb: &VertexBuffer) -> Result<String> {
    let mut output = String::new();

    writeln!(output, "extern float {}_buffer_data[{}];", name, vb.data.len())?;
    writeln!(output, "extern unsigned int {}_buffer_data_stride;", name)?;
    write!(
        output,
        "extern unsigned int {}_elements_data[{}];",
        name,
        vb.indices.len()
    )?;

    Ok(output)
}

/// Generate the definition artifact
pub fn generate_source(name: &str, vb: &VertexBuffer) -> Result<String> {
    let mut output = String::new();

    // Vertex buffer, one vertex per line
    writeln!(output, "float {}_buffer_data[{}] = {{", name, vb.data.len())?;
    for vertex in vb.vertices() {
        let scalars: Vec<String> = vertex.iter().map(|&s| FloatLiteral(s).to_string()).collect();
        writeln!(output, "\t{},", scalars.join(", "))?;
    }
    writeln!(output, "}};")?;
    writeln!(output)?;

    writeln!(
        output,
        "unsigned int {}_buffer_data_stride = {};",
        name, vb.stride
    )?;
    writeln!(output)?;

    // Element list, one triangle per line
    writeln!(
        output,
        "unsigned int {}_elements_data[{}] = {{",
        name,
        vb.indices.len()
    )?;
    for tri in vb.triangles() {
        let corners: Vec<String> = tri.iter().map(|i| format!("{}-1", i)).collect();
        writeln!(output, "\t{},", corners.join(", "))?;
    }
    writeln!(output, "}};")?;
    writeln!(output)?;

    Ok(output)
}
