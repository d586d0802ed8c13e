//! Batch conversion: scan a directory, parse each OBJ, write its artifacts

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::accumulator::ShadingPolicy;
use crate::buffer::VertexBuffer;
use crate::codegen::{generate_header, generate_source, symbol_name, HEADER_EXT, SOURCE_EXT};
use crate::config::BakeConfig;
use crate::obj::parse_obj;

/// One converted mesh, rendered but not yet written
#[derive(Debug, Clone)]
pub struct BakedMesh {
    /// Input file
    pub source: PathBuf,
    /// C identifier prefix
    pub name: String,
    pub buffer: VertexBuffer,
    /// Declaration artifact text
    pub header: String,
    /// Definition artifact text
    pub definition: String,
}

impl BakedMesh {
    pub fn header_file_name(&self) -> String {
        format!("{}.{}", self.name, HEADER_EXT)
    }

    pub fn source_file_name(&self) -> String {
        format!("{}.{}", self.name, SOURCE_EXT)
    }
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BakeReport {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl BakeReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// List `*.obj` files directly inside `dir`, sorted by name. Hidden files
/// are skipped.
pub fn find_obj_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Search path is not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to scan {}", dir.display()))?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if entry.file_type().is_file()
            && !hidden
            && entry.path().extension() == Some(OsStr::new("obj"))
        {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Read and convert a single OBJ file in memory
pub fn convert_file(path: &Path, shading: ShadingPolicy) -> Result<BakedMesh> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read OBJ: {}", path.display()))?;

    let mesh = parse_obj(&text, shading)
        .with_context(|| format!("Failed to parse OBJ: {}", path.display()))?;
    let buffer = VertexBuffer::from_mesh(&mesh)
        .with_context(|| format!("Failed to build vertex buffer: {}", path.display()))?;

    let name = symbol_name(path);
    let header = generate_header(&name, &buffer)?;
    let definition = generate_source(&name, &buffer)?;

    tracing::debug!(
        "{}: {} vertices, {} faces, stride={}",
        name,
        buffer.vertex_count(),
        buffer.face_count(),
        buffer.stride
    );

    Ok(BakedMesh {
        source: path.to_path_buf(),
        name,
        buffer,
        header,
        definition,
    })
}

/// Write both artifacts; returns (header path, source path)
pub fn write_artifacts(
    mesh: &BakedMesh,
    header_dir: &Path,
    source_dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    let header_path = write_atomic(header_dir, &mesh.header_file_name(), &mesh.header)?;
    let source_path = write_atomic(source_dir, &mesh.source_file_name(), &mesh.definition)?;
    Ok((header_path, source_path))
}

/// Write through a temp file in `dir` so a failed run never leaves a
/// truncated artifact behind.
fn write_atomic(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(file_name);

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tmp.persist(&path)
        .with_context(|| format!("Failed to create output: {}", path.display()))?;

    Ok(path)
}

/// Convert every OBJ under `config.search_path`.
///
/// Stops at the first failing file unless `keep_going` is set, in which case
/// failures are logged and listed in the report.
pub fn bake_all(config: &BakeConfig) -> Result<BakeReport> {
    for dir in [&config.header_output_path, &config.source_output_path] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    run_batch(&config.search_path, config.keep_going, |path| {
        let mesh = convert_file(path, config.shading)?;
        let (header, source) = write_artifacts(
            &mesh,
            &config.header_output_path,
            &config.source_output_path,
        )?;
        tracing::info!(
            "Converted {:?} -> {:?}, {:?}",
            path,
            header,
            source
        );
        Ok(())
    })
}

/// Parse and assemble every OBJ under `search_path` without writing anything
pub fn check_all(search_path: &Path, shading: ShadingPolicy, keep_going: bool) -> Result<BakeReport> {
    run_batch(search_path, keep_going, |path| {
        let mesh = convert_file(path, shading)?;
        tracing::info!(
            "{:?}: {} vertices, {} faces, stride={}",
            path,
            mesh.buffer.vertex_count(),
            mesh.buffer.face_count(),
            mesh.buffer.stride
        );
        Ok(())
    })
}

fn run_batch<F>(search_path: &Path, keep_going: bool, mut convert: F) -> Result<BakeReport>
where
    F: FnMut(&Path) -> Result<()>,
{
    let files = find_obj_files(search_path)?;
    if files.is_empty() {
        tracing::warn!("No .obj files found in {}", search_path.display());
    }

    let mut report = BakeReport::default();
    for path in files {
        match convert(&path) {
            Ok(()) => report.converted.push(path),
            Err(e) if keep_going => {
                tracing::error!("{:#}", e);
                report.failed.push(path);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}
