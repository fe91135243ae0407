//! Headless Interaction Session
//!
//! Drives an interaction context without a headset: a loader thread
//! delivers a model, a scripted hand moves into it and presses select and
//! squeeze, and every outcome is logged.
//!
//! Run with `RUST_LOG=debug cargo run --example headless_session`.

use glam::{Quat, Vec3, Vec4};

use myth_xr::assets::{Prefab, PrefabMesh, PrefabNode};
use myth_xr::interaction::{DeviceId, InteractionContext, InteractionSettings, XrEvent};
use myth_xr::resources::primitives::create_box;
use myth_xr::resources::Material;
use myth_xr::scene::{Scene, Transform};

fn build_table() -> anyhow::Result<Prefab> {
    let mut prefab = Prefab::new("Table");
    let top = prefab.add_root(PrefabNode {
        transform: Transform::from_position(Vec3::new(0.0, 0.75, -1.0)),
        mesh: Some(PrefabMesh {
            geometry: create_box(1.2, 0.05, 0.8),
            material: Material::new(Vec4::new(0.55, 0.35, 0.2, 1.0)).with_name("Oak"),
        }),
        ..PrefabNode::named("Top")
    });
    for (i, (x, z)) in [(-0.55, -0.35), (0.55, -0.35), (-0.55, 0.35), (0.55, 0.35)].into_iter().enumerate() {
        prefab.add_child(top, PrefabNode {
            transform: Transform::from_position(Vec3::new(x, -0.375, z)),
            mesh: Some(PrefabMesh {
                geometry: create_box(0.05, 0.7, 0.05),
                material: Material::new(Vec4::new(0.2, 0.2, 0.2, 1.0)).with_name("Steel"),
            }),
            ..PrefabNode::named(&format!("Leg{i}"))
        })?;
    }
    Ok(prefab)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut scene = Scene::default();
    let mut ctx = InteractionContext::new(&mut scene, InteractionSettings::default())?;

    let loader = ctx.model_sender();
    let table = build_table()?;
    std::thread::spawn(move || {
        loader.deliver(table);
        loader.fail("models/chair.glb", "file not found");
    })
    .join()
    .map_err(|_| anyhow::anyhow!("loader thread panicked"))?;

    ctx.poll_loaded(&mut scene);

    let right = DeviceId(1);
    let hand = *ctx.controller(right).ok_or_else(|| anyhow::anyhow!("no right-hand controller"))?;

    // Reach into the front-left leg, the selection sphere 5 cm ahead of the
    // grip. First press selects the table, second narrows to the top.
    hand.set_grip_pose(&mut scene, Vec3::new(-0.55, 0.4, -0.6), Quat::IDENTITY);

    let script = [
        XrEvent::select_start(1),
        XrEvent::select_start(1),
        XrEvent::squeeze_start(1),
        XrEvent::squeeze_end(1),
    ];
    for event in script {
        let outcome = ctx.handle_event(&mut scene, event)?;
        log::info!("{:?} -> {outcome:?}", event.kind);

        if ctx.grabbed(right).is_some() {
            hand.set_grip_pose(&mut scene, Vec3::new(0.3, 1.2, -0.4), Quat::from_rotation_y(0.5));
        }
        scene.update_matrix_world();
    }

    if let Some(top) = scene.find_by_name("Top") {
        log::info!("Table top now at {}", scene.world_matrix(top).map(|m| Vec3::from(m.translation)).unwrap_or_default());
    }
    Ok(())
}
