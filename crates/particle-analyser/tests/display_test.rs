//! Display dispatch tests, run against a recording viewer.

use particle_analyser::*;

fn triangle() -> SurfaceMesh {
    SurfaceMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![UVec3::new(0, 1, 2)])
}

/// Four particles; 1 has no surface, 2 has no ellipsoid.
fn setup() -> (ParticleManager, RecordingViewer) {
    init_logging();
    let ellipsoid = Ellipsoid::new(Vec3::ZERO, Vec3::ONE, Mat3::IDENTITY);
    let geometries = vec![
        ParticleGeometry::new(4, Vec3::new(0.0, 0.0, 0.0))
            .with_surface(triangle())
            .with_ellipsoid(ellipsoid),
        ParticleGeometry::new(8, Vec3::new(1.0, 0.0, 0.0)).with_ellipsoid(ellipsoid),
        ParticleGeometry::new(16, Vec3::new(2.0, 0.0, 0.0)).with_surface(triangle()),
        ParticleGeometry::new(32, Vec3::new(3.0, 0.0, 0.0))
            .with_surface(triangle())
            .with_ellipsoid(ellipsoid),
    ];
    let viewer = RecordingViewer::new();
    let manager =
        ParticleManager::new(geometries, Calibration::default()).with_viewer(viewer.clone());
    (manager, viewer)
}

fn ids(request: &DisplayRequest) -> Vec<usize> {
    request.particle_ids().map(ParticleId::index).collect()
}

#[test]
fn test_centroids_only_visible() {
    let (mut manager, viewer) = setup();
    manager.hide_particle(1, HideReason::ManuallyHidden).unwrap();
    manager.display_centroids().unwrap();

    let request = viewer.last().unwrap();
    assert_eq!(request.kind, DisplayKind::Centroids);
    assert_eq!(ids(&request), vec![0, 2, 3]);
    assert_eq!(
        request.items[1].geometry,
        DisplayGeometry::Centroid(Vec3::new(2.0, 0.0, 0.0))
    );
    assert!(request.items.iter().all(|item| item.color.is_none()));
}

#[test]
fn test_surfaces_skip_missing_geometry() {
    let (mut manager, viewer) = setup();
    manager.display_surfaces(ColorMode::Gradient).unwrap();

    let request = viewer.last_of(DisplayKind::Surfaces).unwrap();
    assert_eq!(ids(&request), vec![0, 2, 3]);
    assert!(request.items.iter().all(|item| item.color.is_some()));
    assert!(matches!(
        request.items[0].geometry,
        DisplayGeometry::Surface(_)
    ));
}

#[test]
fn test_split_colors_are_distinct() {
    let (mut manager, viewer) = setup();
    manager.display_surfaces(ColorMode::Split).unwrap();

    let request = viewer.last().unwrap();
    let colors: Vec<Vec3> = request.items.iter().filter_map(|i| i.color).collect();
    assert_eq!(colors.len(), 3);
    for (i, a) in colors.iter().enumerate() {
        for b in &colors[i + 1..] {
            assert!((*a - *b).length() > 0.05);
        }
    }
}

#[test]
fn test_gradient_by_volume_uses_visible_range() {
    let (manager, viewer) = setup();
    let options = ManagerOptions {
        gradient_attribute: GradientAttribute::Volume,
        gradient_color_map: "fire".to_string(),
        ..ManagerOptions::default()
    };
    let mut manager = manager.with_options(options).unwrap();
    manager.set_max_volume(20.0).unwrap();
    manager.display_surfaces(ColorMode::Gradient).unwrap();

    let request = viewer.last().unwrap();
    assert_eq!(ids(&request), vec![0, 2]);
    let registry = ColorMapRegistry::new();
    let fire = registry.get("fire").unwrap();
    assert_eq!(request.items[0].color, Some(fire.sample(0.0)));
    assert_eq!(request.items[1].color, Some(fire.sample(1.0)));
}

#[test]
fn test_custom_color_map() {
    let (manager, viewer) = setup();
    let options = ManagerOptions {
        gradient_color_map: "mono".to_string(),
        ..ManagerOptions::default()
    };
    let mut manager = manager.with_options(options).unwrap();
    manager
        .register_color_map(ColorMap::new("mono", vec![Vec3::ONE]))
        .unwrap();
    manager.display_surfaces(ColorMode::Gradient).unwrap();

    let request = viewer.last().unwrap();
    assert!(request.items.iter().all(|i| i.color == Some(Vec3::ONE)));
}

#[test]
fn test_axes_and_ellipsoids() {
    let (mut manager, viewer) = setup();
    manager.display_axes().unwrap();
    manager.display_ellipsoids().unwrap();

    let axes = viewer.last_of(DisplayKind::Axes).unwrap();
    assert_eq!(ids(&axes), vec![0, 1, 2, 3]);
    assert!(matches!(
        axes.items[3].geometry,
        DisplayGeometry::Axes { centroid, .. } if centroid == Vec3::new(3.0, 0.0, 0.0)
    ));

    let ellipsoids = viewer.last_of(DisplayKind::Ellipsoids).unwrap();
    assert_eq!(ids(&ellipsoids), vec![0, 1, 3]);
}

#[test]
fn test_original_image_request() {
    let (mut manager, viewer) = setup();
    manager.display_original_image().unwrap();

    let request = viewer.last().unwrap();
    assert_eq!(request.kind, DisplayKind::OriginalImage);
    assert!(request.is_empty());
    assert_eq!(request.calibration, Calibration::default());
}

#[test]
fn test_display_does_not_mutate() {
    let (mut manager, viewer) = setup();
    manager.select_particle(0).unwrap();
    manager.display_surfaces(ColorMode::Split).unwrap();
    manager.display_centroids().unwrap();

    assert_eq!(viewer.len(), 2);
    assert_eq!(manager.visible_count().unwrap(), 4);
    assert!(manager.particle(0).unwrap().is_selected());
}

struct OfflineViewer;

impl Viewer for OfflineViewer {
    fn submit(&mut self, _request: DisplayRequest) -> ViewerResult<()> {
        Err(ViewerError::Unavailable)
    }
}

#[test]
fn test_viewer_error_is_reported() {
    let (manager, _) = setup();
    let mut manager = manager.with_viewer(OfflineViewer);
    let err = manager.display_centroids().unwrap_err();
    assert!(matches!(err, ParticleError::RenderError(_)));
    assert!(err.to_string().contains("viewer unavailable"));
}
