//! Cornell box scene builder.
//!
//! A closed room of five walls (the side facing the camera is open) with two
//! boxes and two spheres on the floor and a ceiling light. Every object can
//! be switched to a mirror or glass finish, and any one wall can become a
//! mirror.

use glam::Vec3;
use lux_tracer::{Color, Cuboid, Light, Material, Quad, Scene, Sphere};
use serde::{Deserialize, Serialize};

/// The five walls of the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wall {
    Left,
    Right,
    Back,
    Floor,
    Ceiling,
}

/// Surface finish switches for one object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Finish {
    pub mirror: bool,
    pub transparent: bool,
}

impl Finish {
    pub const MATTE: Finish = Finish {
        mirror: false,
        transparent: false,
    };
    pub const MIRROR: Finish = Finish {
        mirror: true,
        transparent: false,
    };
    pub const GLASS: Finish = Finish {
        mirror: false,
        transparent: true,
    };
}

/// Options for [`cornell_box`]. Every field has a default, so a partial JSON
/// object is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CornellOptions {
    /// Half the room's edge length
    pub room_size: f32,
    /// Wall turned into a mirror, if any
    pub mirror_wall: Option<Wall>,

    pub cube: Finish,
    pub tall_box: Finish,
    pub sphere1: Finish,
    pub sphere2: Finish,
    /// Index of refraction for transparent objects
    pub refractive_index: f32,

    pub light1_position: Vec3,
    pub light1_intensity: f32,
    pub light1_radius: f32,

    pub enable_light2: bool,
    pub light2_position: Vec3,
    pub light2_intensity: f32,
    pub light2_radius: f32,

    pub ambient_light: f32,
    pub background_color: Color,
}

impl Default for CornellOptions {
    fn default() -> Self {
        Self {
            room_size: 200.0,
            mirror_wall: None,
            cube: Finish::MATTE,
            tall_box: Finish::MATTE,
            sphere1: Finish::MATTE,
            sphere2: Finish::MATTE,
            refractive_index: 1.5,
            light1_position: Vec3::new(0.0, 190.0, 0.0),
            light1_intensity: 1.0,
            light1_radius: 50.0,
            enable_light2: false,
            light2_position: Vec3::new(150.0, 100.0, 150.0),
            light2_intensity: 0.5,
            light2_radius: 20.0,
            ambient_light: 0.15,
            background_color: Color::new(0.05, 0.05, 0.1),
        }
    }
}

// Wall colors
const WHITE: Color = Color::new(0.73, 0.73, 0.73);
const RED: Color = Color::new(0.65, 0.05, 0.05);
const BLUE: Color = Color::new(0.1, 0.2, 0.6);

// Object colors
const YELLOW: Color = Color::new(0.8, 0.7, 0.2);
const GRAY: Color = Color::new(0.5, 0.45, 0.4);
const SPHERE1: Color = Color::new(0.7, 0.3, 0.3);
const SPHERE2: Color = Color::new(0.3, 0.5, 0.7);

const CUBE_SIZE: f32 = 60.0;
const TALL_BOX_SIZE: Vec3 = Vec3::new(55.0, 130.0, 55.0);
const SPHERE1_RADIUS: f32 = 35.0;
const SPHERE2_RADIUS: f32 = 40.0;

fn wall_material(color: Color) -> Material {
    Material::new(color).with_phong(0.1, 0.8, 0.1, 16.0)
}

/// Material for a wall switched to a mirror.
pub fn mirror_wall_material() -> Material {
    Material::new(Color::splat(0.9))
        .with_phong(0.05, 0.1, 0.8, 128.0)
        .with_reflectivity(0.9)
}

/// Material for one of the room's objects.
pub fn object_material(color: Color, finish: Finish, refractive_index: f32) -> Material {
    match (finish.mirror, finish.transparent) {
        (true, true) => Material::new(color)
            .with_phong(0.05, 0.2, 0.8, 128.0)
            .with_reflectivity(0.4)
            .with_transparency(0.5, refractive_index),
        (true, false) => Material::new(color)
            .with_phong(0.05, 0.1, 0.9, 256.0)
            .with_reflectivity(0.85),
        (false, true) => Material::new(color)
            .with_phong(0.02, 0.1, 0.5, 128.0)
            .with_reflectivity(0.1)
            .with_transparency(0.9, refractive_index),
        (false, false) => Material::new(color).with_phong(0.1, 0.8, 0.2, 32.0),
    }
}

/// Build the Cornell box described by `options`.
pub fn cornell_box(options: &CornellOptions) -> Scene {
    let r = options.room_size;
    let mut scene = Scene::new()
        .with_background(options.background_color)
        .with_ambient(Color::splat(options.ambient_light));

    let material = |wall: Wall, color: Color| {
        if options.mirror_wall == Some(wall) {
            mirror_wall_material()
        } else {
            wall_material(color)
        }
    };

    // Left (x = -r)
    scene.add(Quad::new(
        Vec3::new(-r, -r, r),
        Vec3::new(0.0, 0.0, -2.0 * r),
        Vec3::new(0.0, 2.0 * r, 0.0),
        material(Wall::Left, RED),
    ));
    // Right (x = +r)
    scene.add(Quad::new(
        Vec3::new(r, -r, -r),
        Vec3::new(0.0, 0.0, 2.0 * r),
        Vec3::new(0.0, 2.0 * r, 0.0),
        material(Wall::Right, BLUE),
    ));
    // Back (z = -r)
    scene.add(Quad::new(
        Vec3::new(-r, -r, -r),
        Vec3::new(2.0 * r, 0.0, 0.0),
        Vec3::new(0.0, 2.0 * r, 0.0),
        material(Wall::Back, WHITE),
    ));
    // Floor (y = -r)
    scene.add(Quad::new(
        Vec3::new(-r, -r, -r),
        Vec3::new(2.0 * r, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0 * r),
        material(Wall::Floor, WHITE),
    ));
    // Ceiling (y = +r)
    scene.add(Quad::new(
        Vec3::new(-r, r, -r),
        Vec3::new(2.0 * r, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0 * r),
        material(Wall::Ceiling, WHITE),
    ));

    let ior = options.refractive_index;

    // Cube, front left
    let cube_min = Vec3::new(-120.0, -r, -50.0);
    scene.add(Cuboid::new(
        cube_min,
        cube_min + Vec3::splat(CUBE_SIZE),
        object_material(YELLOW, options.cube, ior),
    ));

    // Tall box, back right
    let box_min = Vec3::new(30.0, -r, -120.0);
    scene.add(Cuboid::new(
        box_min,
        box_min + TALL_BOX_SIZE,
        object_material(GRAY, options.tall_box, ior),
    ));

    // Sphere resting on the cube
    scene.add(Sphere::new(
        Vec3::new(-90.0, -r + CUBE_SIZE + SPHERE1_RADIUS, -20.0),
        SPHERE1_RADIUS,
        object_material(SPHERE1, options.sphere1, ior),
    ));

    // Sphere on the floor, front right
    scene.add(Sphere::new(
        Vec3::new(100.0, -r + SPHERE2_RADIUS, 50.0),
        SPHERE2_RADIUS,
        object_material(SPHERE2, options.sphere2, ior),
    ));

    scene.add_light(Light::area(
        options.light1_position,
        Color::ONE,
        options.light1_intensity,
        options.light1_radius,
    ));

    if options.enable_light2 {
        scene.add_light(Light::area(
            options.light2_position,
            Color::new(1.0, 0.95, 0.9),
            options.light2_intensity,
            options.light2_radius,
        ));
    }

    log::info!(
        "Built Cornell box: {} primitives, {} lights, mirror wall {:?}",
        scene.len(),
        scene.lights().len(),
        options.mirror_wall
    );

    scene
}
