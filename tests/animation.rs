//! End-to-end runs of the animation loop without a window.

use lightcone::{App, Config, ControlEvent, ControlId, Vec3};

fn assert_particles_in_bounds(app: &App) {
    let field = app.scene.particles().expect("particles attached");
    for c in field.positions() {
        assert!(c.abs() <= 15.0, "particle coordinate {c} escaped");
    }
}

#[test]
fn test_hundred_ticks_at_full_speed() {
    let mut app = App::new(&Config::default().with_seed(2024)).unwrap();
    app.params.animation_speed = 1.0;

    for _ in 0..100 {
        app.tick();
        assert_particles_in_bounds(&app);
    }

    assert!((app.time.elapsed() - 1.0).abs() < 1e-4);
    assert_eq!(app.time.frame(), 100);
}

#[test]
fn test_long_run_keeps_invariants() {
    let mut app = App::new(&Config::default().with_seed(7)).unwrap();
    app.handle(ControlEvent::AnimationSpeed(100));

    for _ in 0..3_000 {
        app.tick();
        assert_particles_in_bounds(&app);

        let cone = app.scene.cone().unwrap();
        assert!((0.9 - 1e-6..=1.1 + 1e-6).contains(&cone.transform.scale.x));
        assert!((0.9 - 1e-6..=1.1 + 1e-6).contains(&cone.transform.scale.z));

        let p = app.scene.camera.position;
        assert!(((p.x * p.x + p.z * p.z) - 225.0).abs() < 1e-2);
        assert!((2.0 - 1e-5..=8.0 + 1e-5).contains(&p.y));
    }
}

#[test]
fn test_time_is_monotonic_with_slider_changes() {
    let mut app = App::new(&Config::default().with_seed(3)).unwrap();
    let mut last = app.time.elapsed();
    for raw in [0, 10, 100, 0, 55, 30] {
        app.handle(ControlEvent::AnimationSpeed(raw));
        for _ in 0..20 {
            let t = app.tick().time;
            assert!(t >= last);
            last = t;
        }
    }
}

#[test]
fn test_manual_camera_from_pointer() {
    let mut app = App::new(&Config::default().with_seed(4)).unwrap();
    app.run_ticks(10);
    let z = app.scene.camera.position.z;

    app.handle(ControlEvent::AutoRotate(false));
    app.handle(ControlEvent::PointerMoved { x: 640.0, y: 360.0, width: 1280, height: 720 });

    assert!((app.scene.camera.position - Vec3::new(0.0, 5.0, z)).length() < 1e-5);
    assert_eq!(app.scene.camera.target, Vec3::ZERO);

    app.run_ticks(10);
    assert!((app.scene.camera.position - Vec3::new(0.0, 5.0, z)).length() < 1e-5);
}

#[test]
fn test_fog_slider_reaches_scene() {
    let mut app = App::new(&Config::default().with_seed(5)).unwrap();
    app.handle(ControlEvent::FogDensity(50));
    assert!((app.scene.fog.density - 0.05).abs() < 1e-7);
    app.handle(ControlEvent::FogDensity(12));
    assert!((app.scene.fog.density - 0.012).abs() < 1e-7);
}

#[test]
fn test_missing_panel_controls_degrade_to_defaults() {
    let config = Config::default()
        .with_seed(6)
        .with_controls(vec![ControlId::AutoRotate]);
    let mut app = App::new(&config).unwrap();
    assert_eq!(app.binder().missing().len(), 2);

    app.handle(ControlEvent::AnimationSpeed(100));
    app.handle(ControlEvent::FogDensity(90));
    assert_eq!(app.params.animation_speed, 0.3);
    assert_eq!(app.scene.fog.density, 0.05);

    let report = app.run_ticks(10);
    assert!((report.time - 0.03).abs() < 1e-5);
}
