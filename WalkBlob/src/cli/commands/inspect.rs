//! CLI command for listing the chunks in a blob

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::formats::chunk::{Chunk, Tag, read_chunks};
use crate::formats::walkmesh::{RECORD_SIZE, decode};

fn describe(tag: Tag) -> &'static str {
    match tag {
        Tag::VTX0 => "vertices",
        Tag::TRI0 => "triangles",
        Tag::NOM0 => "normals",
        _ => "unknown",
    }
}

pub fn execute(path: &Path) -> anyhow::Result<()> {
    println!("Inspecting blob: {}", path.display());
    println!();

    let reader = BufReader::new(File::open(path)?);

    println!("{:>8}  {:<6}  {:>10}  {:>8}  KIND", "OFFSET", "TAG", "LENGTH", "RECORDS");

    let mut chunks: Vec<Chunk> = Vec::new();
    let mut offset = 0usize;
    for chunk in read_chunks(reader) {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                println!();
                println!("Blob is damaged after {} chunks ({offset} bytes)", chunks.len());
                return Err(e.into());
            }
        };

        let len = chunk.payload.len();
        let records = if len % RECORD_SIZE == 0 {
            (len / RECORD_SIZE).to_string()
        } else {
            "-".to_string()
        };
        println!(
            "{:>8}  {:<6}  {:>10}  {:>8}  {}",
            offset,
            chunk.tag.to_string(),
            len,
            records,
            describe(chunk.tag)
        );

        offset += chunk.encoded_len();
        chunks.push(chunk);
    }

    println!();
    println!("{} chunks, {offset} bytes", chunks.len());

    match decode(chunks) {
        Ok(mesh) => println!(
            "Walk mesh: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        ),
        Err(e) => println!("(Could not decode walk mesh: {e})"),
    }

    Ok(())
}
