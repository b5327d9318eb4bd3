//! CLI command for placing and walking a point on a walk mesh

use std::path::Path;

use anyhow::bail;
use glam::Vec3;

use crate::formats::walkmesh::read_walkmesh_file;
use crate::navigation::{WalkNavigator, WalkPoint};

fn print_point(label: &str, nav: &WalkNavigator, wp: &WalkPoint) {
    let p = nav.world_point(wp);
    let n = nav.world_normal(wp);
    println!("{label}:");
    println!("  Triangle: {:?}", wp.triangle);
    println!("  Weights:  ({:.4}, {:.4}, {:.4})", wp.weights.x, wp.weights.y, wp.weights.z);
    println!("  Position: ({:.4}, {:.4}, {:.4})", p.x, p.y, p.z);
    println!("  Normal:   ({:.4}, {:.4}, {:.4})", n.x, n.y, n.z);
}

pub fn execute(path: &Path, at: Vec3, step: Option<Vec3>) -> anyhow::Result<()> {
    let mesh = read_walkmesh_file(path)?;
    let nav = WalkNavigator::new(&mesh);

    let Some(mut wp) = nav.start(at) else {
        bail!("Walk mesh {} has no triangles", path.display());
    };
    print_point("Start", &nav, &wp);

    if let Some(step) = step {
        nav.walk(&mut wp, step);
        println!();
        print_point("After step", &nav, &wp);
    }

    Ok(())
}
