// tests/workbench_scenarios.rs - End-to-end scenarios through the public API

use std::cell::RefCell;
use std::rc::Rc;

use image::RgbaImage;
use pixscope::{
    annotation::Annotation,
    color::{ColorEdit, DeviceHsv, DisplayHsv, Rgb},
    AnnotationTool, InfoPanel, Point2D, ToolEvent, ToolKind, ToolkitConfig, ViewChange, Workbench,
};

#[test]
fn distance_measurement_with_zoom() {
    let mut bench = Workbench::default();
    bench.activate(Some(ToolKind::Distance));

    bench.dispatch(ToolEvent::PointerDown(Point2D::new(10.0, 10.0)));
    bench.dispatch(ToolEvent::PointerMove(Point2D::new(50.0, 20.0)));
    bench.dispatch(ToolEvent::ModifierChanged(true));
    bench.dispatch(ToolEvent::PointerDown(Point2D::new(50.0, 20.0)));

    let report = bench.distance_tool().report();
    assert_eq!(report.end, Point2D::new(50.0, 10.0));
    assert!((report.distance - 40.0).abs() < 1e-9);

    bench.dispatch(ToolEvent::ScaleChanged(8.0));
    match bench.annotations().as_slice() {
        [Annotation::Distance(d)] => {
            assert_eq!(d.label.text, "40.00 px");
            assert_eq!(d.line.stroke.width, 1.0);
        }
        other => panic!("unexpected annotations {:?}", other),
    }

    let panel = bench.info_panel().unwrap();
    assert_eq!(panel.value("Distance"), Some("40.00 px"));
}

#[test]
fn angle_measurement_scenario() {
    let mut bench = Workbench::default();
    bench.activate(Some(ToolKind::Angle));

    for p in [Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0), Point2D::new(0.0, 10.0)] {
        bench.dispatch(ToolEvent::PointerMove(p));
        bench.dispatch(ToolEvent::PointerDown(p));
    }

    let report = bench.angle_tool().report();
    assert!((report.angle - 90.0).abs() < 1e-9);

    match bench.annotations().as_slice() {
        [Annotation::Angle(a)] => {
            let arc = a.arc.expect("arc after three clicks");
            assert!(arc.start_degrees.abs() < 1e-9);
            assert!((arc.end_degrees() - 90.0).abs() < 1e-9);
            assert_eq!(a.label.text, "90.00°");
        }
        other => panic!("unexpected annotations {:?}", other),
    }

    bench.apply_view_change(ViewChange::RotateRight, 1.0);
    assert!(bench.annotations().is_empty());
    assert!(bench.angle_tool().is_mode_enabled());
}

#[test]
fn color_sync_round_trip_scenario() {
    let mut bench = Workbench::default();
    let notifications = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&notifications);
    bench
        .sampler_mut()
        .on_color_changed(move |sample| sink.borrow_mut().push(sample.hex.clone()));

    bench.activate(Some(ToolKind::ColorPicker));
    assert!(bench.sampler_mut().apply_edit(ColorEdit::Rgb { r: 255, g: 0, b: 0 }));

    let sample = bench.sampler().sample().unwrap();
    assert_eq!(sample.display_hsv, DisplayHsv::new(0, 100, 100));
    assert_eq!(sample.device_hsv, DeviceHsv::new(0, 255, 255));
    assert_eq!(sample.hex, "#FF0000");
    assert!((sample.lab.l - 53.24).abs() < 0.5);
    assert!((sample.lab.a - 80.09).abs() < 0.5);
    assert!((sample.lab.b - 67.20).abs() < 0.5);

    assert!(!bench.sampler_mut().apply_edit(ColorEdit::Hex("red".into())));
    assert_eq!(*notifications.borrow(), vec!["#FF0000".to_string()]);
}

#[test]
fn hover_sampling_then_image_change() {
    let mut image = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 0, 255]));
    image.put_pixel(3, 2, image::Rgba([18, 52, 86, 255]));

    let mut bench = Workbench::default();
    bench.load_image(image);
    bench.activate(Some(ToolKind::ColorPicker));

    assert!(bench.dispatch(ToolEvent::PointerMove(Point2D::new(3.7, 2.2))));
    let sample = bench.sampler().sample().unwrap().clone();
    assert_eq!(sample.rgb, Rgb::new(18, 52, 86));
    assert_eq!(sample.hex, "#123456");

    let panel = InfoPanel::color(Some(&sample), bench.style());
    assert_eq!(panel.value("Position"), Some("(3, 2)"));

    bench.load_image(RgbaImage::new(1, 1));
    assert!(bench.sampler().sample().is_none());
}

#[test]
fn custom_config_flows_into_tools() {
    let mut config = ToolkitConfig::default();
    config.distance_unit = " mm".to_string();
    config.snap_step_degrees = 45.0;

    let mut bench = Workbench::new(config);
    bench.activate(Some(ToolKind::Distance));
    bench.dispatch(ToolEvent::PointerDown(Point2D::origin()));
    bench.dispatch(ToolEvent::PointerDown(Point2D::new(0.0, 2.5)));
    match bench.annotations().as_slice() {
        [Annotation::Distance(d)] => assert_eq!(d.label.text, "2.50 mm"),
        other => panic!("unexpected annotations {:?}", other),
    }

    bench.activate(Some(ToolKind::Angle));
    bench.dispatch(ToolEvent::ModifierChanged(true));
    bench.dispatch(ToolEvent::PointerDown(Point2D::origin()));
    bench.dispatch(ToolEvent::PointerDown(Point2D::origin().polar_offset(10.0, 30.0)));
    let ray1 = bench.angle_tool().report().ray1_angle;
    assert!((ray1 - 45.0).abs() < 1e-6);
}
