//! CLI command for exporting a walk mesh from a scene

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, bail};

use crate::cli::progress::{DISK, LOOKING_GLASS, print_done, print_error, print_step};
use crate::error::Error;
use crate::export::{ExportOptions, export_walk_mesh, parse_scene_arg};
use crate::scene::JsonScene;

pub fn execute(
    scene: &str,
    output: &Path,
    object: Option<&str>,
    config: Option<&Path>,
    strict: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();

    // Flags override the config file
    let mut options = match config {
        Some(path) => ExportOptions::from_toml_file(path)
            .with_context(|| format!("Failed to load export options from {}", path.display()))?,
        None => ExportOptions::default(),
    };
    let (scene_path, layer) = parse_scene_arg(scene);
    if let Some(layer) = layer {
        options = options.with_layer(layer);
    }
    if let Some(name) = object {
        options = options.with_object_name(name);
    }
    if strict {
        options = options.strict();
    }

    print_step(
        1,
        2,
        LOOKING_GLASS,
        &format!("Reading scene {} (layer {})...", scene_path.display(), options.layer),
    );
    let scene = JsonScene::from_path(&scene_path, options.layer)
        .with_context(|| format!("Failed to read scene {}", scene_path.display()))?;

    print_step(2, 2, DISK, &format!("Writing {}...", output.display()));
    let report = match export_walk_mesh(&scene, &options, output) {
        Ok(Some(report)) => report,
        Ok(None) | Err(Error::WalkMeshNotFound { .. }) => {
            print_error("Cannot find walk mesh");
            bail!(
                "No selected object named '{}' on layer {}",
                options.object_name,
                options.layer
            );
        }
        Err(e) => return Err(e.into()),
    };

    println!("  Vertices:  {}", report.vertex_count);
    println!("  Triangles: {}", report.triangle_count);
    println!("  Bytes:     {}", report.bytes_written);
    print_done(started.elapsed());

    Ok(())
}
