//! Demo showing particle filtering and display dispatch.
//!
//! Builds a handful of box-shaped particles in a 32^3 image, applies volume
//! and edge filters, and sends the visible particles to a logging viewer.
//!
//! Run with: `RUST_LOG=debug cargo run --example filter_demo`

use particle_analyser::*;

/// A box particle from inclusive voxel bounds, with a closed box surface.
fn box_particle(min: UVec3, max: UVec3, dims: UVec3) -> ParticleGeometry {
    let size = max - min + UVec3::ONE;
    let extent = size.as_vec3();
    let lo = min.as_vec3();
    let hi = lo + extent;
    let centroid = (lo + hi) * 0.5;

    let vertices = (0..8)
        .map(|i| {
            Vec3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            )
        })
        .collect();
    let triangles = vec![
        UVec3::new(0, 2, 1),
        UVec3::new(1, 2, 3),
        UVec3::new(4, 5, 6),
        UVec3::new(5, 7, 6),
        UVec3::new(0, 1, 4),
        UVec3::new(1, 5, 4),
        UVec3::new(2, 6, 3),
        UVec3::new(3, 6, 7),
        UVec3::new(0, 4, 2),
        UVec3::new(2, 4, 6),
        UVec3::new(1, 3, 5),
        UVec3::new(3, 7, 5),
    ];

    let half = extent * 0.5;
    let voxels = u64::from(size.x) * u64::from(size.y) * u64::from(size.z);

    ParticleGeometry::new(voxels, centroid)
        .with_axes(PrincipalAxes::new(Mat3::IDENTITY, half * half))
        .with_ellipsoid(Ellipsoid::new(centroid, half, Mat3::IDENTITY))
        .with_surface(SurfaceMesh::new(vertices, triangles))
        .with_touched_faces(FaceSet::touched_by(min, max, dims))
}

fn main() -> Result<()> {
    init_logging();

    let dims = UVec3::splat(32);
    let boxes = [
        (UVec3::new(0, 4, 4), UVec3::new(3, 7, 7)),
        (UVec3::new(10, 10, 10), UVec3::new(11, 11, 11)),
        (UVec3::new(12, 2, 20), UVec3::new(19, 9, 27)),
        (UVec3::new(5, 20, 0), UVec3::new(9, 24, 4)),
        (UVec3::new(20, 20, 20), UVec3::new(31, 25, 25)),
    ];
    let geometries = boxes
        .iter()
        .map(|&(min, max)| box_particle(min, max, dims))
        .collect();

    let calibration = Calibration::new(0.1, 0.1, 0.2, "mm")?;
    let mut manager = ParticleManager::new(geometries, calibration);

    for particle in manager.all_particles()? {
        let (direction, spread) = particle.axes().axis(0);
        println!(
            "particle {}: {:.3} mm^3, first axis {direction} ({spread:.1}), touches {:?}",
            particle.id(),
            particle.volume(),
            particle.touched_faces().iter().collect::<Vec<_>>()
        );
    }

    manager.set_min_volume(0.01)?;
    println!("after min volume 0.01: {} visible", manager.visible_count()?);

    manager.exclude_on_edge(false, Face::West)?;
    manager.exclude_on_edge(false, Face::Top)?;
    println!("after excluding west/top: {} visible", manager.visible_count()?);

    let first = manager.visible_particle(0)?.id();
    manager.select_particle(first)?;

    manager.display_surfaces(ColorMode::Split)?;
    manager.display_centroids()?;
    manager.display_axes()?;
    manager.display_ellipsoids()?;
    manager.display_original_image()?;

    manager.reset_particles()?;
    println!("after reset: {} visible", manager.visible_count()?);

    manager.close()?;
    Ok(())
}
