//! End-to-end tests for area definition resolution.

use area_resolver::{
    create_area_def, create_area_def_with_sink, create_area_defs, AreaError, AreaExtent,
    AreaParams, CollectingSink, Diagnostic, FieldName, GridDefinition, GridShape, RawValue,
};
use projection::{AngleUnit, MapProjection, ProjParams};

const EASE_EXTENT: f64 = 5_326_849.0625;

fn north_polar_laea() -> ProjParams {
    ProjParams::new()
        .with("proj", "laea")
        .with("lat_0", 90.0)
        .with("lon_0", 0.0)
        .with("a", 6_371_228.0)
}

fn mid_latitude_laea() -> ProjParams {
    ProjParams::new()
        .with("proj", "laea")
        .with("lat_0", 45.0)
        .with("lon_0", 20.0)
}

fn assert_close(a: &[f64], b: &[f64], tolerance: f64) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b.iter()) {
        assert!(
            (x - y).abs() <= tolerance,
            "{a:?} differs from {b:?} beyond {tolerance}"
        );
    }
}

fn fixed(def: GridDefinition) -> (AreaExtent, GridShape) {
    match def {
        GridDefinition::Fixed(area) => (area.area_extent, area.shape),
        other => panic!("expected fixed definition, got {other:?}"),
    }
}

// ============================================================================
// Full resolution and round trips
// ============================================================================

#[test]
fn test_extent_and_shape_give_fixed_definition() {
    let mut params = AreaParams::new("ease_nh", north_polar_laea());
    params.area_extent = Some(RawValue::from([
        -EASE_EXTENT,
        -EASE_EXTENT,
        EASE_EXTENT,
        EASE_EXTENT,
    ]));
    params.shape = Some(RawValue::from([425.0, 425.0]));
    let (extent, shape) = fixed(create_area_def(&params).unwrap());
    assert_eq!(
        extent,
        AreaExtent::new(-EASE_EXTENT, -EASE_EXTENT, EASE_EXTENT, EASE_EXTENT)
    );
    assert_eq!(shape, GridShape::new(425, 425));
}

#[test]
fn test_center_radius_shape_round_trip() {
    // The center and radius implied by the extent reproduce it exactly.
    let mut params = AreaParams::new("ease_nh", north_polar_laea());
    params.center = Some(RawValue::from([0.0, 0.0]));
    params.radius = Some(RawValue::Scalar(EASE_EXTENT));
    params.shape = Some(RawValue::from([425.0, 425.0]));
    let (extent, shape) = fixed(create_area_def(&params).unwrap());
    assert_close(
        &extent.as_array(),
        &[-EASE_EXTENT, -EASE_EXTENT, EASE_EXTENT, EASE_EXTENT],
        1e-6,
    );
    assert_eq!(shape, GridShape::new(425, 425));
}

#[test]
fn test_center_resolution_shape_round_trip() {
    let resolution = 2.0 * EASE_EXTENT / 425.0;
    let mut params = AreaParams::new("ease_nh", north_polar_laea());
    params.center = Some(RawValue::from([0.0, 0.0]));
    params.resolution = Some(RawValue::Scalar(resolution));
    params.shape = Some(RawValue::from([425.0, 425.0]));
    let (extent, shape) = fixed(create_area_def(&params).unwrap());
    assert_close(
        &extent.as_array(),
        &[-EASE_EXTENT, -EASE_EXTENT, EASE_EXTENT, EASE_EXTENT],
        1e-3,
    );
    assert_eq!(shape, GridShape::new(425, 425));
}

#[test]
fn test_upper_left_and_radius_give_extent_only() {
    let mut params = AreaParams::new("box", north_polar_laea());
    params.upper_left_extent = Some(RawValue::from([-1000.0, 1000.0]));
    params.radius = Some(RawValue::Scalar(1000.0));
    match create_area_def(&params).unwrap() {
        GridDefinition::Dynamic(area) => {
            assert_eq!(
                area.area_extent,
                Some(AreaExtent::new(-1000.0, -1000.0, 1000.0, 1000.0))
            );
            assert_eq!(area.shape, None);
        }
        other => panic!("expected dynamic definition, got {other:?}"),
    }
}

#[test]
fn test_shape_only_gives_dynamic_definition() {
    let mut params = AreaParams::new("pending", north_polar_laea());
    params.shape = Some(RawValue::from([512.0, 1024.0]));
    match create_area_def(&params).unwrap() {
        GridDefinition::Dynamic(area) => {
            assert_eq!(area.shape, Some(GridShape::new(512, 1024)));
            assert_eq!(area.area_extent, None);
        }
        other => panic!("expected dynamic definition, got {other:?}"),
    }
}

// ============================================================================
// Unit handling
// ============================================================================

#[test]
fn test_unit_independence_between_degrees_and_meters() {
    let proj = MapProjection::from_params(&mid_latitude_laea()).unwrap();
    let center_xy = proj.forward(20.0, 45.0, AngleUnit::Degrees).unwrap();
    // The projected spans of a one-degree step west and south.
    let dx = center_xy.0 - proj.forward(19.0, 45.0, AngleUnit::Degrees).unwrap().0;
    let dy = center_xy.1 - proj.forward(20.0, 44.0, AngleUnit::Degrees).unwrap().1;

    let mut angular = AreaParams::new("angular", mid_latitude_laea());
    angular.center = Some(RawValue::tagged(vec![20.0, 45.0], "degrees"));
    angular.radius = Some(RawValue::tagged(vec![1.0, 1.0], "degrees"));
    angular.shape = Some(RawValue::from([100.0, 100.0]));

    let mut metric = AreaParams::new("metric", mid_latitude_laea());
    metric.center = Some(RawValue::from([center_xy.0, center_xy.1]));
    metric.radius = Some(RawValue::from([dx.abs(), dy.abs()]));
    metric.shape = Some(RawValue::from([100.0, 100.0]));

    let (extent_a, shape_a) = fixed(create_area_def(&angular).unwrap());
    let (extent_b, shape_b) = fixed(create_area_def(&metric).unwrap());
    assert_close(&extent_a.as_array(), &extent_b.as_array(), 1e-5);
    assert_eq!(shape_a, shape_b);
}

#[test]
fn test_request_wide_km_units() {
    let mut params = AreaParams::new("km_box", north_polar_laea());
    params.units = Some("km".to_string());
    params.area_extent = Some(RawValue::from([-1.0, -1.0, 1.0, 1.0]));
    params.shape = Some(RawValue::from([10.0, 10.0]));
    let (extent, _) = fixed(create_area_def(&params).unwrap());
    assert_eq!(extent, AreaExtent::new(-1000.0, -1000.0, 1000.0, 1000.0));
}

#[test]
fn test_latlong_grid_stays_in_degrees() {
    let mut params = AreaParams::new("global", ProjParams::new().with("proj", "longlat"));
    params.area_extent = Some(RawValue::from([-180.0, -90.0, 180.0, 90.0]));
    params.shape = Some(RawValue::from([180.0, 360.0]));
    let (extent, shape) = fixed(create_area_def(&params).unwrap());
    assert_eq!(extent, AreaExtent::new(-180.0, -90.0, 180.0, 90.0));
    assert_eq!(shape, GridShape::new(180, 360));
}

#[test]
fn test_latlong_rejects_length_units() {
    let mut params = AreaParams::new("bad", ProjParams::new().with("proj", "longlat"));
    params.center = Some(RawValue::tagged(vec![0.0, 0.0], "m"));
    params.shape = Some(RawValue::from([10.0, 10.0]));
    let err = create_area_def(&params).unwrap_err();
    assert_eq!(
        err,
        AreaError::LengthUnitsOnAngularProjection(FieldName::Center)
    );
}

#[test]
fn test_angular_resolution_without_center_fails() {
    let mut params = AreaParams::new("bad", north_polar_laea());
    params.resolution = Some(RawValue::tagged(vec![1.0, 1.0], "degrees"));
    params.shape = Some(RawValue::from([10.0, 10.0]));
    let err = create_area_def(&params).unwrap_err();
    assert_eq!(
        err,
        AreaError::AngularSpanWithoutCenter(FieldName::Resolution)
    );
}

// ============================================================================
// Pole snapping
// ============================================================================

#[test]
fn test_center_snaps_to_pole_within_tolerance() {
    let mut params = AreaParams::new("polar", north_polar_laea());
    params.units = Some("degrees".to_string());
    params.center = Some(RawValue::from([0.0, 89.9999]));
    params.radius = Some(RawValue::tagged(vec![500_000.0, 500_000.0], "m"));
    params.shape = Some(RawValue::from([100.0, 100.0]));
    let (extent, _) = fixed(create_area_def(&params).unwrap());
    let center = extent.center();
    assert!(center.0.abs() < 1e-6, "center x = {}", center.0);
    assert!(center.1.abs() < 1e-6, "center y = {}", center.1);
}

#[test]
fn test_center_outside_pole_tolerance_is_kept() {
    let mut params = AreaParams::new("near_polar", north_polar_laea());
    params.units = Some("degrees".to_string());
    params.center = Some(RawValue::from([0.0, 89.9]));
    params.radius = Some(RawValue::tagged(vec![500_000.0, 500_000.0], "m"));
    params.shape = Some(RawValue::from([100.0, 100.0]));
    let (extent, _) = fixed(create_area_def(&params).unwrap());
    // A tenth of a degree off the pole projects ~11 km away from it.
    assert!(extent.center().1.abs() > 1_000.0);
}

// ============================================================================
// Conflict detection
// ============================================================================

#[test]
fn test_conflicting_upper_left_extent() {
    let mut params = AreaParams::new("conflict", north_polar_laea());
    params.area_extent = Some(RawValue::from([-20.0, -20.0, 20.0, 20.0]));
    params.upper_left_extent = Some(RawValue::from([-10.0, 10.0]));
    let err = create_area_def(&params).unwrap_err();
    match err {
        AreaError::Conflict { field, sources, given, derived } => {
            assert_eq!(field, FieldName::UpperLeftExtent);
            assert!(sources.contains("area_extent"));
            assert_eq!(given, vec![-10.0, 10.0]);
            assert_eq!(derived, vec![-20.0, 20.0]);
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn test_conflicting_shape() {
    let mut params = AreaParams::new("conflict", north_polar_laea());
    params.center = Some(RawValue::from([0.0, 0.0]));
    params.radius = Some(RawValue::Scalar(1000.0));
    params.resolution = Some(RawValue::Scalar(10.0));
    params.shape = Some(RawValue::from([100.0, 100.0]));
    let err = create_area_def(&params).unwrap_err();
    match err {
        AreaError::Conflict { field, .. } => assert_eq!(field, FieldName::Shape),
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn test_matching_redundant_input_is_accepted() {
    let mut params = AreaParams::new("redundant", north_polar_laea());
    params.area_extent = Some(RawValue::from([-20.0, -20.0, 20.0, 20.0]));
    params.center = Some(RawValue::from([0.0, 0.0]));
    params.upper_left_extent = Some(RawValue::from([-20.0, 20.0]));
    params.shape = Some(RawValue::from([40.0, 40.0]));
    let (extent, shape) = fixed(create_area_def(&params).unwrap());
    assert_eq!(extent, AreaExtent::new(-20.0, -20.0, 20.0, 20.0));
    assert_eq!(shape, GridShape::new(40, 40));
}

// ============================================================================
// Shape quantization
// ============================================================================

#[test]
fn test_near_integral_shape_rounds_down() {
    let mut sink = CollectingSink::new();
    let mut params = AreaParams::new("drift", north_polar_laea());
    params.center = Some(RawValue::from([0.0, 0.0]));
    params.radius = Some(RawValue::from([1000.049, 2000.0]));
    params.resolution = Some(RawValue::Scalar(20.0));
    // shape = (2 * 2000 / 20, 2 * 1000.049 / 20) = (200, 100.0049)
    let (_, shape) = fixed(create_area_def_with_sink(&params, &mut sink).unwrap());
    assert_eq!(shape, GridShape::new(200, 100));
    assert!(sink
        .records
        .iter()
        .any(|d| matches!(d, Diagnostic::ShapeRounded { adjusted_resolution: Some(_), .. })));
}

#[test]
fn test_fractional_shape_rounds_up_with_diagnostic() {
    let mut sink = CollectingSink::new();
    let mut params = AreaParams::new("fractional", north_polar_laea());
    params.center = Some(RawValue::from([0.0, 0.0]));
    params.radius = Some(RawValue::Scalar(1005.0));
    params.resolution = Some(RawValue::Scalar(20.0));
    // shape = 2 * 1005 / 20 = 100.5 per axis
    let (_, shape) = fixed(create_area_def_with_sink(&params, &mut sink).unwrap());
    assert_eq!(shape, GridShape::new(101, 101));
    match sink
        .records
        .iter()
        .find(|d| matches!(d, Diagnostic::ShapeRounded { .. }))
    {
        Some(Diagnostic::ShapeRounded {
            adjusted_resolution: Some(resolution),
            ..
        }) => {
            assert!((resolution.0 - 2.0 * 1005.0 / 101.0).abs() < 1e-9);
        }
        other => panic!("expected shape diagnostic, got {other:?}"),
    }
}

#[test]
fn test_supplied_fractional_shape_is_rounded() {
    let mut sink = CollectingSink::new();
    let mut params = AreaParams::new("supplied", north_polar_laea());
    params.area_extent = Some(RawValue::from([-20.0, -20.0, 20.0, 20.0]));
    params.shape = Some(RawValue::from([100.0049, 200.0]));
    let (_, shape) = fixed(create_area_def_with_sink(&params, &mut sink).unwrap());
    assert_eq!(shape, GridShape::new(100, 200));
    assert!(sink.records.iter().any(|d| matches!(
        d,
        Diagnostic::ShapeRounded {
            adjusted_resolution: None,
            ..
        }
    )));
}

// ============================================================================
// Failure modes
// ============================================================================

#[test]
fn test_center_and_resolution_alone_are_insufficient() {
    let mut params = AreaParams::new("short", north_polar_laea());
    params.center = Some(RawValue::from([0.0, 0.0]));
    params.resolution = Some(RawValue::Scalar(1000.0));
    assert_eq!(
        create_area_def(&params).unwrap_err(),
        AreaError::InsufficientInformation
    );
}

#[test]
fn test_wrong_extent_arity() {
    let mut params = AreaParams::new("short", north_polar_laea());
    params.area_extent = Some(RawValue::from([-20.0, -20.0, 20.0]));
    let err = create_area_def(&params).unwrap_err();
    assert_eq!(
        err,
        AreaError::WrongLength {
            field: FieldName::AreaExtent,
            expected: 4,
            actual: 3,
        }
    );
}

#[test]
fn test_negative_shape_dimension_rejected() {
    // A negative pixel count must fail instead of saturating to zero.
    let mut params = AreaParams::new("bad", north_polar_laea());
    params.area_extent = Some(RawValue::from([-20.0, -20.0, 20.0, 20.0]));
    params.shape = Some(RawValue::from([-100.0, 200.0]));
    let err = create_area_def(&params).unwrap_err();
    assert_eq!(
        err,
        AreaError::InvalidDimension {
            field: FieldName::Shape,
            value: -100.0,
        }
    );
}

#[test]
fn test_zero_resolution_rejected() {
    // shape = 2 * radius / 0 is not a pixel count.
    let mut params = AreaParams::new("bad", north_polar_laea());
    params.center = Some(RawValue::from([0.0, 0.0]));
    params.radius = Some(RawValue::Scalar(1000.0));
    params.resolution = Some(RawValue::Scalar(0.0));
    let err = create_area_def(&params).unwrap_err();
    assert!(matches!(err, AreaError::InvalidDimension { .. }));
}

#[test]
fn test_scalar_center_rejected() {
    let mut params = AreaParams::new("bad", north_polar_laea());
    params.center = Some(RawValue::Scalar(0.0));
    let err = create_area_def(&params).unwrap_err();
    assert_eq!(
        err,
        AreaError::ScalarNotAllowed {
            field: FieldName::Center
        }
    );
}

#[test]
fn test_batch_resolution_is_independent() {
    let mut good = AreaParams::new("good", north_polar_laea());
    good.area_extent = Some(RawValue::from([-20.0, -20.0, 20.0, 20.0]));
    good.shape = Some(RawValue::from([10.0, 10.0]));
    let bad = AreaParams::new("bad", north_polar_laea());
    let results = create_area_defs([&bad, &good]);
    assert!(results[0].is_err());
    assert!(results[1].is_ok());
}

// ============================================================================
// Rotation
// ============================================================================

#[test]
fn test_rotation_tagged_radians() {
    let mut params = AreaParams::new("rotated", north_polar_laea());
    params.area_extent = Some(RawValue::from([-20.0, -20.0, 20.0, 20.0]));
    params.shape = Some(RawValue::from([10.0, 10.0]));
    params.rotation = Some(RawValue::tagged(
        vec![std::f64::consts::FRAC_PI_2],
        "radians",
    ));
    match create_area_def(&params).unwrap() {
        GridDefinition::Fixed(area) => assert!((area.rotation - 90.0).abs() < 1e-12),
        other => panic!("expected fixed definition, got {other:?}"),
    }
}

#[test]
fn test_rotation_defaults_to_zero() {
    let mut params = AreaParams::new("flat", north_polar_laea());
    params.shape = Some(RawValue::from([10.0, 10.0]));
    match create_area_def(&params).unwrap() {
        GridDefinition::Dynamic(area) => assert_eq!(area.rotation, 0.0),
        other => panic!("expected dynamic definition, got {other:?}"),
    }
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_resolutions_match_sequential() {
    let mut params = AreaParams::new("parallel", mid_latitude_laea());
    params.center = Some(RawValue::tagged(vec![20.0, 45.0], "degrees"));
    params.radius = Some(RawValue::tagged(vec![1.0, 1.0], "degrees"));
    params.shape = Some(RawValue::from([100.0, 100.0]));

    let sequential = create_area_def(&params).unwrap();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let params = params.clone();
            std::thread::spawn(move || create_area_def(&params).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), sequential);
    }
}
