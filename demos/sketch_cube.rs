//! Renders a cube once in each shading style and writes the frames out as
//! PPM images next to the working directory.
//!
//! Run with: cargo run --example sketch_cube

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use scrawl::prelude::*;

const FRAME_SIZE: usize = 512;

fn write_ppm(path: &Path, width: usize, height: usize, rgb: &[u8]) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "P6\n{} {}\n255", width, height)?;
    out.write_all(rgb)?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut backend = SoftwareBackend::new(FRAME_SIZE, FRAME_SIZE);
    let mut viewer = Viewer::new(&mut backend, ShadingStyle::BlinnPhong, Instant::now());
    viewer.scene.add_mesh("cube", cube());

    let styles = [
        (ShadingStyle::BlinnPhong, "blinn_phong.ppm"),
        (ShadingStyle::CelShading, "cel_shading.ppm"),
        (ShadingStyle::PencilSketch, "pencil_sketch.ppm"),
    ];

    for (style, file_name) in styles {
        viewer.select_style(style, &mut backend);
        let outcome = viewer.frame(&mut backend, Instant::now());
        log::info!("{:?} frame: {:?}", style, outcome);

        let (width, height) = backend.visible_size();
        write_ppm(Path::new(file_name), width, height, &backend.visible_rgb8())?;
        println!("wrote {}", file_name);
    }

    Ok(())
}
