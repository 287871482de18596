use glam::Vec2;
use starweave_core::{
    EmpireColor, EmpireId, EmpireSnapshot, EntityId, EntityKind, EntityLocation, EntitySnapshot,
    GalaxyId, GalaxySnapshot, Intent, ObjectRef, PlanetId, PlanetKind, PlanetSnapshot, PortalId,
    PortalSnapshot, Snapshot, StarColor, SurfaceGrid, SurfaceTile, SystemId, SystemSnapshot,
    TerrainKind, ViewMode, WorldPoint,
};
use starweave_renderer::config::RendererConfig;
use starweave_renderer::scene::{GameScene, HoverAccent, PlanetScene};
use starweave_renderer::{FrameClock, ManualClock, Renderer};

const SURFACE: Vec2 = Vec2::new(800.0, 600.0);

fn demo_snapshot() -> Snapshot {
    Snapshot {
        tick: 41,
        galaxies: vec![GalaxySnapshot {
            id: GalaxyId::new(1),
            name: "Whirl".to_owned(),
            position: WorldPoint::new(0.0, 0.0),
            radius: 400.0,
        }],
        systems: vec![
            SystemSnapshot {
                id: SystemId::new(1),
                galaxy: GalaxyId::new(1),
                name: "Alpha".to_owned(),
                position: WorldPoint::new(0.0, 0.0),
                star: StarColor::Yellow,
                owner: Some(EmpireId::new(1)),
            },
            SystemSnapshot {
                id: SystemId::new(2),
                galaxy: GalaxyId::new(1),
                name: "Beta".to_owned(),
                position: WorldPoint::new(260.0, 0.0),
                star: StarColor::Red,
                owner: None,
            },
            SystemSnapshot {
                id: SystemId::new(3),
                galaxy: GalaxyId::new(1),
                name: "Gamma".to_owned(),
                position: WorldPoint::new(0.0, 200.0),
                star: StarColor::Blue,
                owner: None,
            },
        ],
        planets: vec![
            PlanetSnapshot {
                id: PlanetId::new(10),
                system: SystemId::new(1),
                name: "Alpha I".to_owned(),
                orbit: 0,
                kind: PlanetKind::Terran,
                owner: Some(EmpireId::new(1)),
            },
            PlanetSnapshot {
                id: PlanetId::new(11),
                system: SystemId::new(1),
                name: "Alpha II".to_owned(),
                orbit: 1,
                kind: PlanetKind::Barren,
                owner: None,
            },
        ],
        portals: vec![
            PortalSnapshot {
                id: PortalId::new(1),
                system: SystemId::new(1),
                paired: PortalId::new(2),
            },
            PortalSnapshot {
                id: PortalId::new(2),
                system: SystemId::new(2),
                paired: PortalId::new(1),
            },
        ],
        empires: vec![EmpireSnapshot {
            id: EmpireId::new(1),
            name: "Meridian Combine".to_owned(),
            color: EmpireColor::from_rgb(60, 160, 220),
        }],
        ..Snapshot::default()
    }
}

fn renderer() -> Renderer {
    Renderer::new(RendererConfig::default()).expect("default config is valid")
}

fn step(renderer: &mut Renderer, snapshot: &Snapshot, clock: &mut ManualClock) -> bool {
    let dt = clock.frame_delta();
    renderer.begin_frame(snapshot, SURFACE, dt).plan.redraw_game
}

#[test]
fn tick_advance_dirties_the_game_layer_for_exactly_one_frame() {
    let mut renderer = renderer();
    let mut clock = ManualClock::new(1.0 / 60.0);
    let mut snapshot = demo_snapshot();

    assert!(
        step(&mut renderer, &snapshot, &mut clock),
        "first frame always draws"
    );
    assert!(
        !step(&mut renderer, &snapshot, &mut clock),
        "identical inputs keep the layer clean"
    );

    snapshot.tick = 42;
    assert!(
        step(&mut renderer, &snapshot, &mut clock),
        "tick advance dirties the layer"
    );
    assert!(
        !step(&mut renderer, &snapshot, &mut clock),
        "the very next frame is clean again"
    );
    assert_eq!(renderer.game_redraws(), 2);
}

#[test]
fn zoom_converges_exactly_to_the_wheel_target() {
    let mut renderer = renderer();
    let mut clock = ManualClock::new(1.0 / 60.0);
    let snapshot = demo_snapshot();
    let _ = step(&mut renderer, &snapshot, &mut clock);

    // Universe default is 0.5; a x4 wheel target lands on exactly 2.0.
    renderer.wheel_zoom(4.0);
    for _ in 0..600 {
        let _ = step(&mut renderer, &snapshot, &mut clock);
    }
    assert_eq!(renderer.camera().zoom(), 2.0);
    assert_eq!(renderer.camera().target_zoom(), 2.0);
}

#[test]
fn sticky_planet_survives_mode_switches() {
    let mut renderer = renderer();
    let mut clock = ManualClock::new(1.0 / 60.0);
    let snapshot = demo_snapshot();
    let _ = step(&mut renderer, &snapshot, &mut clock);

    renderer.set_mode(&snapshot, ViewMode::System, None);
    let _ = step(&mut renderer, &snapshot, &mut clock);

    // Select the outer planet, wander off to galaxy view, come back. The
    // resolver's fallback would land on Alpha I, so a surface for Alpha II
    // proves the sticky planet won.
    renderer.select(ObjectRef::Planet(PlanetId::new(11)));
    renderer.set_mode(&snapshot, ViewMode::Galaxy, None);
    let _ = step(&mut renderer, &snapshot, &mut clock);

    renderer.set_mode(&snapshot, ViewMode::Planet, None);
    renderer.provide_surface(grid_for(PlanetId::new(11)));
    let scene = renderer.begin_frame(&snapshot, SURFACE, clock.frame_delta());
    let GameScene::Planet(PlanetScene::Surface { planet, .. }) = scene.game else {
        panic!("expected the sticky planet's surface, got {:?}", scene.game);
    };
    assert_eq!(planet, PlanetId::new(11));
}

fn grid_for(planet: PlanetId) -> SurfaceGrid {
    SurfaceGrid {
        planet,
        columns: 3,
        rows: 2,
        tiles: vec![
            SurfaceTile {
                terrain: TerrainKind::Plains,
                building: None,
            };
            6
        ],
    }
}

#[test]
fn surface_data_is_requested_exactly_once() {
    let mut renderer = renderer();
    let mut clock = ManualClock::new(1.0 / 60.0);
    let snapshot = demo_snapshot();

    renderer.set_mode(&snapshot, ViewMode::Planet, None);
    let first = renderer.begin_frame(&snapshot, SURFACE, clock.frame_delta());
    assert!(matches!(
        first.game,
        GameScene::Planet(PlanetScene::Loading { .. })
    ));

    let requests: Vec<_> = renderer
        .take_intents()
        .into_iter()
        .filter(|intent| matches!(intent, Intent::SurfaceDataNeeded { .. }))
        .collect();
    assert_eq!(requests.len(), 1);

    // Still pending: further frames render the placeholder, no new request.
    let second = renderer.begin_frame(&snapshot, SURFACE, clock.frame_delta());
    assert!(matches!(
        second.game,
        GameScene::Planet(PlanetScene::Loading { .. })
    ));
    assert!(renderer
        .take_intents()
        .iter()
        .all(|intent| !matches!(intent, Intent::SurfaceDataNeeded { .. })));

    renderer.provide_surface(grid_for(PlanetId::new(10)));
    let third = renderer.begin_frame(&snapshot, SURFACE, clock.frame_delta());
    assert!(matches!(
        third.game,
        GameScene::Planet(PlanetScene::Surface { .. })
    ));
}

#[test]
fn clicking_a_system_selects_it_and_enters_system_view() {
    let mut renderer = renderer();
    let mut clock = ManualClock::new(1.0 / 60.0);
    let snapshot = demo_snapshot();

    renderer.set_mode(&snapshot, ViewMode::Galaxy, None);
    let _ = step(&mut renderer, &snapshot, &mut clock);

    // Gamma hosts no portal, so the click resolves to the system itself.
    let screen = renderer
        .camera()
        .world_to_screen(Vec2::new(0.0, 200.0), SURFACE);
    renderer.pointer_clicked(&snapshot, screen);

    assert_eq!(renderer.view().mode, ViewMode::System);
    assert_eq!(
        renderer.view().selected,
        Some(ObjectRef::System(SystemId::new(3)))
    );
    let intents = renderer.take_intents();
    assert!(intents
        .iter()
        .any(|intent| matches!(intent, Intent::SelectionChanged { object }
            if *object == ObjectRef::System(SystemId::new(3)))));
    assert!(intents
        .iter()
        .any(|intent| matches!(intent, Intent::ViewModeChangeRequested { mode }
            if *mode == ViewMode::System)));
}

#[test]
fn double_clicking_a_portal_jumps_to_the_paired_system() {
    let mut renderer = renderer();
    let mut clock = ManualClock::new(1.0 / 60.0);
    let snapshot = demo_snapshot();

    renderer.set_mode(&snapshot, ViewMode::Galaxy, None);
    let _ = step(&mut renderer, &snapshot, &mut clock);

    // Portal 1 lives at system Alpha (the galaxy anchor).
    let screen = renderer
        .camera()
        .world_to_screen(Vec2::new(0.0, 0.0), SURFACE);
    renderer.double_clicked(&snapshot, screen);

    assert_eq!(renderer.view().mode, ViewMode::System);
    assert_eq!(
        renderer.view().selected,
        Some(ObjectRef::System(SystemId::new(2)))
    );
    // The camera recentered on Beta.
    assert_eq!(renderer.camera().position(), Vec2::new(260.0, 0.0));
}

fn planet_screens(game: &GameScene) -> Vec<Vec2> {
    let GameScene::System(system) = game else {
        panic!("expected a system scene, got {game:?}");
    };
    system
        .planets
        .iter()
        .map(|marker| marker.projection.screen)
        .collect()
}

#[test]
fn orbit_projections_hold_still_between_game_layer_redraws() {
    let mut renderer = renderer();
    let mut clock = ManualClock::new(1.0 / 60.0);
    let snapshot = demo_snapshot();

    renderer.set_mode(&snapshot, ViewMode::System, None);
    let first = renderer.begin_frame(&snapshot, SURFACE, clock.frame_delta());
    assert!(first.plan.redraw_game, "first frame always draws");
    let drawn = planet_screens(&first.game);

    // Until the next redraw the hit/overlay geometry must match the cached
    // pixels exactly.
    let mut redrawn = None;
    for _ in 0..16 {
        let scene = renderer.begin_frame(&snapshot, SURFACE, clock.frame_delta());
        if scene.plan.redraw_game {
            redrawn = Some(scene);
            break;
        }
        assert_eq!(planet_screens(&scene.game), drawn, "markers froze mid-cache");
    }

    // The periodic animation tick redraws and only then moves the markers.
    let redrawn = redrawn.expect("animation tick forces a redraw");
    assert_ne!(planet_screens(&redrawn.game), drawn);
}

#[test]
fn hover_highlights_in_the_overlay_without_redrawing_the_game_layer() {
    let mut renderer = renderer();
    let mut clock = ManualClock::new(1.0 / 60.0);
    let snapshot = demo_snapshot();

    renderer.set_mode(&snapshot, ViewMode::Galaxy, None);
    let _ = step(&mut renderer, &snapshot, &mut clock);

    // Two moves because the default throttle divisor is 2.
    let screen = renderer
        .camera()
        .world_to_screen(Vec2::new(0.0, 200.0), SURFACE);
    renderer.pointer_moved(&snapshot, screen);
    renderer.pointer_moved(&snapshot, screen);

    let scene = renderer.begin_frame(&snapshot, SURFACE, clock.frame_delta());
    assert!(
        !scene.plan.redraw_game,
        "hover must never dirty the cached game layer"
    );
    let hover = scene.overlay.hover.expect("hovering Gamma yields a badge");
    assert_eq!(hover.label, "Gamma");
    assert_eq!(hover.accent, HoverAccent::SystemGlow(StarColor::Blue));
}

#[test]
fn hovered_planet_badge_reports_stationed_entities() {
    let mut renderer = renderer();
    let mut clock = ManualClock::new(1.0 / 60.0);
    let mut snapshot = demo_snapshot();
    snapshot.entities.push(EntitySnapshot {
        id: EntityId::new(90),
        kind: EntityKind::Unit,
        owner: Some(EmpireId::new(1)),
        location: EntityLocation::Planet(PlanetId::new(10)),
    });

    renderer.set_mode(&snapshot, ViewMode::System, None);
    let first = renderer.begin_frame(&snapshot, SURFACE, clock.frame_delta());
    let GameScene::System(system) = &first.game else {
        panic!("expected a system scene, got {:?}", first.game);
    };
    let marker = system
        .planets
        .iter()
        .find(|marker| marker.projection.planet == PlanetId::new(10))
        .expect("Alpha I is projected");
    let screen = marker.projection.screen;

    renderer.pointer_moved(&snapshot, screen);
    renderer.pointer_moved(&snapshot, screen);
    let second = renderer.begin_frame(&snapshot, SURFACE, clock.frame_delta());
    let hover = second.overlay.hover.expect("hovering the marker yields a badge");
    assert_eq!(hover.label, "Alpha I (1 stationed)");
    assert_eq!(hover.screen, screen, "badge sits on the projected marker");
}

#[test]
fn culling_counters_accumulate_across_frames() {
    let mut renderer = renderer();
    let mut clock = ManualClock::new(1.0 / 60.0);
    let snapshot = demo_snapshot();

    let _ = step(&mut renderer, &snapshot, &mut clock);
    let stats = renderer.culling_stats();
    assert!(stats.queried > 0, "universe view queries every marker");
    assert!(stats.culled <= stats.queried);
}
