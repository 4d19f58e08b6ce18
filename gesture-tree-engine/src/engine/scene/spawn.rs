use bevy::prelude::*;
use constants::colours;
use constants::interaction::{PHOTO_FRAME_SIZE, PHOTO_HIT_BOX, PHOTO_PICTURE_SIZE};
use constants::tree::{STAR_DEPTH, STAR_EXPLODED_POSITION, STAR_FORMED_POSITION, STAR_OUTER_RADIUS};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::particles::{ParticleKind, TreeParticle, generate_tree};
use super::photos::{AddPhotoRequest, PhotoPanel, PhotoPlacer};
use crate::engine::assets::scene_settings::SceneSettings;
use crate::engine::interaction::hit_test::{HitBox, Interactive};

/// Meshes shared by every entity of a kind so the renderer can batch them.
#[derive(Resource, Clone)]
pub struct SceneMeshes {
    pub leaf: Handle<Mesh>,
    pub ornament: Handle<Mesh>,
    pub light: Handle<Mesh>,
    pub star: Handle<Mesh>,
    pub frame: Handle<Mesh>,
    pub picture: Handle<Mesh>,
}

impl SceneMeshes {
    pub fn build(meshes: &mut Assets<Mesh>) -> Self {
        let [fw, fh, fd] = PHOTO_FRAME_SIZE;
        Self {
            leaf: meshes.add(Cone::new(0.2, 0.4).mesh().resolution(4)),
            ornament: meshes.add(Sphere::new(0.15).mesh().uv(16, 16)),
            light: meshes.add(Cuboid::new(0.2, 0.2, 0.2)),
            star: meshes.add(Extrusion::new(
                RegularPolygon::new(STAR_OUTER_RADIUS, 5),
                STAR_DEPTH,
            )),
            frame: meshes.add(Cuboid::new(fw, fh, fd)),
            picture: meshes.add(Rectangle::new(PHOTO_PICTURE_SIZE, PHOTO_PICTURE_SIZE)),
        }
    }
}

/// Frame material of a photo panel, tinted while hovered.
#[derive(Component, Debug, Clone)]
pub struct PanelFrame(pub Handle<StandardMaterial>);

/// One material per (kind, colour) pair.
#[derive(Default)]
struct MaterialCache {
    entries: Vec<(ParticleKind, Color, Handle<StandardMaterial>)>,
}

impl MaterialCache {
    fn get(
        &mut self,
        kind: ParticleKind,
        colour: Color,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        if let Some((_, _, handle)) = self
            .entries
            .iter()
            .find(|(k, c, _)| *k == kind && *c == colour)
        {
            return handle.clone();
        }

        let handle = materials.add(particle_material(kind, colour));
        self.entries.push((kind, colour, handle.clone()));
        handle
    }
}

fn particle_material(kind: ParticleKind, colour: Color) -> StandardMaterial {
    match kind {
        ParticleKind::Leaf => StandardMaterial {
            base_color: colour,
            perceptual_roughness: 0.8,
            ..default()
        },
        ParticleKind::Ornament => StandardMaterial {
            base_color: colour,
            metallic: 1.0,
            perceptual_roughness: 0.1,
            ..default()
        },
        ParticleKind::Light => StandardMaterial {
            base_color: colour,
            emissive: colour.to_linear() * colours::LIGHT_EMISSIVE_INTENSITY,
            ..default()
        },
        ParticleKind::Star => StandardMaterial {
            base_color: colour,
            emissive: colour.to_linear() * colours::STAR_EMISSIVE_INTENSITY,
            metallic: 1.0,
            perceptual_roughness: 0.1,
            ..default()
        },
    }
}

fn mesh_for(meshes: &SceneMeshes, kind: ParticleKind) -> Handle<Mesh> {
    match kind {
        ParticleKind::Leaf => meshes.leaf.clone(),
        ParticleKind::Ornament => meshes.ornament.clone(),
        ParticleKind::Light => meshes.light.clone(),
        ParticleKind::Star => meshes.star.clone(),
    }
}

/// Spawn the particle tree and its star. Everything starts scattered and
/// gathers into shape over the first ticks. Returns the particle count.
pub fn spawn_tree(
    commands: &mut Commands,
    settings: &SceneSettings,
    meshes: &SceneMeshes,
    materials: &mut Assets<StandardMaterial>,
) -> usize {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut cache = MaterialCache::default();

    let seeds = generate_tree(settings.particle_count, &mut rng);
    let count = seeds.len();
    for seed in seeds {
        let particle = seed.particle;
        let material = cache.get(particle.kind, seed.colour, materials);
        commands.spawn((
            Mesh3d(mesh_for(meshes, particle.kind)),
            MeshMaterial3d(material),
            Transform::from_translation(particle.exploded)
                .with_rotation(particle.formed_rotation)
                .with_scale(Vec3::splat(particle.scale)),
            particle,
        ));
    }

    let star = TreeParticle {
        id: count as u32,
        kind: ParticleKind::Star,
        formed: Vec3::from_array(STAR_FORMED_POSITION),
        exploded: Vec3::from_array(STAR_EXPLODED_POSITION),
        formed_rotation: Quat::IDENTITY,
        scale: 1.0,
    };
    commands.spawn((
        Mesh3d(meshes.star.clone()),
        MeshMaterial3d(cache.get(ParticleKind::Star, colours::STAR, materials)),
        Transform::from_translation(star.exploded),
        star,
    ));

    count
}

/// Spawn a photo panel root with its frame and picture children. The root
/// carries the pick box so hit testing never walks the hierarchy.
pub fn spawn_photo_panel(
    commands: &mut Commands,
    panel: PhotoPanel,
    picture: Handle<Image>,
    meshes: &SceneMeshes,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let frame_material = materials.add(StandardMaterial {
        base_color: colours::FRAME,
        perceptual_roughness: 0.4,
        ..default()
    });
    let picture_material = materials.add(StandardMaterial {
        base_color_texture: Some(picture),
        unlit: true,
        ..default()
    });

    commands
        .spawn((
            Transform::from_translation(panel.exploded),
            Visibility::default(),
            Interactive {
                id: panel.id.clone(),
            },
            HitBox(Vec3::from_array(PHOTO_HIT_BOX)),
            PanelFrame(frame_material.clone()),
            panel,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(meshes.frame.clone()),
                MeshMaterial3d(frame_material),
                Transform::from_xyz(0.0, 0.0, -0.01),
            ));
            parent.spawn((
                Mesh3d(meshes.picture.clone()),
                MeshMaterial3d(picture_material),
                Transform::from_xyz(0.0, 0.2, 0.02),
            ));
        })
        .id()
}

pub fn spawn_requested_photos(
    mut commands: Commands,
    mut requests: EventReader<AddPhotoRequest>,
    mut placer: ResMut<PhotoPlacer>,
    meshes: Res<SceneMeshes>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
) {
    for request in requests.read() {
        match placer.place(request) {
            Ok(panel) => {
                info!("Hanging photo '{}' from {}", panel.id, request.source);
                let picture = asset_server.load(request.source.clone());
                spawn_photo_panel(&mut commands, panel, picture, &meshes, &mut materials);
            }
            Err(error) => warn!("Rejected photo {}: {}", request.source, error),
        }
    }
}

/// Build the tree and queue the configured photos.
pub fn spawn_scene(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut photo_requests: EventWriter<AddPhotoRequest>,
) {
    let scene_meshes = SceneMeshes::build(&mut meshes);
    let count = spawn_tree(&mut commands, &settings, &scene_meshes, &mut materials);
    info!("Spawned {} tree particles", count);

    commands.insert_resource(scene_meshes);
    commands.insert_resource(PhotoPlacer::new(settings.seed));

    for path in &settings.photos {
        photo_requests.write(AddPhotoRequest::from_source(path.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scene::photos::PhotoId;
    use bevy::ecs::event::Events;

    fn app() -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_event::<AddPhotoRequest>();
        app
    }

    #[test]
    fn scene_spawns_every_particle_plus_star() {
        let mut app = app();
        app.insert_resource(SceneSettings {
            particle_count: 300,
            seed: Some(9),
            photos: vec!["a.png".into(), "b.png".into()],
            ..default()
        })
        .add_systems(Update, spawn_scene);
        app.update();

        let world = app.world_mut();
        let mut particles = world.query::<&TreeParticle>();
        let kinds: Vec<ParticleKind> = particles.iter(world).map(|p| p.kind).collect();
        assert_eq!(kinds.len(), 301);
        assert_eq!(kinds.iter().filter(|k| **k == ParticleKind::Star).count(), 1);
        assert!(world.contains_resource::<SceneMeshes>());

        let requests: Vec<_> = world
            .resource_mut::<Events<AddPhotoRequest>>()
            .drain()
            .collect();
        assert_eq!(requests.len(), 2);
    }

    #[test]
    fn particles_share_materials_per_colour() {
        let mut app = app();
        app.insert_resource(SceneSettings {
            particle_count: 500,
            seed: Some(4),
            ..default()
        })
        .add_systems(Update, spawn_scene);
        app.update();

        // Leaf, gold, red, four lights and the star.
        assert!(app.world().resource::<Assets<StandardMaterial>>().len() <= 8);
    }

    fn spawn_one_panel(
        mut commands: Commands,
        mut meshes: ResMut<Assets<Mesh>>,
        mut materials: ResMut<Assets<StandardMaterial>>,
    ) {
        let scene_meshes = SceneMeshes::build(&mut meshes);
        let panel = PhotoPanel::new(
            PhotoId("p1".into()),
            Some(Vec3::new(3.0, 1.0, 0.0)),
            Some(Vec3::new(0.0, 0.0, 14.0)),
            0.1,
        )
        .unwrap();
        spawn_photo_panel(&mut commands, panel, Handle::default(), &scene_meshes, &mut materials);
    }

    #[test]
    fn photo_panel_root_is_pickable_with_two_children() {
        let mut app = app();
        app.add_systems(Update, spawn_one_panel);
        app.update();

        let world = app.world_mut();
        let mut roots = world.query::<(&Interactive, &HitBox, &Transform, &Children)>();
        let (interactive, hit_box, transform, children) = roots.single(world).unwrap();
        assert_eq!(interactive.id, PhotoId("p1".into()));
        assert_eq!(hit_box.0, Vec3::from_array(PHOTO_HIT_BOX));
        assert_eq!(transform.translation, Vec3::new(0.0, 0.0, 14.0));
        assert_eq!(children.len(), 2);
    }
}
