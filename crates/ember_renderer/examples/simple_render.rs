//! Simple path tracer example.
//!
//! Builds a small scene of transformed primitives, renders a few
//! progressively accumulated frames, and saves a PNG.

use anyhow::{Context, Result};
use ember_core::MeshData;
use ember_renderer::{
    Camera, Cube, Cylinder, ImageBuffer, Material, Mesh, Plane, RenderConfig, Renderer, Scene,
    Sphere, Transformed, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;
const FRAMES: u32 = 4;

fn main() -> Result<()> {
    env_logger::init();

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    println!("Scene built in {:?}", start.elapsed());

    let camera = Camera::new(
        Vec3::new(0.0, 1.0, 3.0),
        Vec3::new(0.0, 0.0, -2.0),
        Vec3::Y,
        60.0,
        WIDTH as f32 / HEIGHT as f32,
    )?;

    let config = RenderConfig {
        samples_per_pixel: 32,
        max_depth: 10,
        ..RenderConfig::default()
    };
    let mut renderer = Renderer::new(WIDTH, HEIGHT, config);
    let mut frame = ImageBuffer::new(WIDTH, HEIGHT);

    println!(
        "Rendering {WIDTH}x{HEIGHT} @ {} spp x {FRAMES} frames on {} workers...",
        config.samples_per_pixel,
        renderer.worker_count()
    );

    let start = std::time::Instant::now();
    for index in 0..FRAMES {
        // Stationary camera: every frame refines the accumulated average
        renderer.render_frame(&scene, &camera, false, &mut frame)?;
        println!("frame {}/{FRAMES} done", index + 1);
    }
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    image::RgbaImage::from_raw(WIDTH, HEIGHT, frame.to_rgba())
        .context("frame buffer has wrong size for image")?
        .save(filename)
        .context("failed to save image")?;
    println!("Saved to {filename}");

    Ok(())
}

fn build_scene() -> Result<Scene> {
    let mut scene = Scene::new();

    let ground = Material::Lambertian {
        albedo: Vec3::new(0.8, 0.8, 0.0),
    };
    let matte_red = Material::Lambertian {
        albedo: Vec3::new(0.7, 0.3, 0.3),
    };
    let brushed_green = Material::Metal {
        albedo: Vec3::new(0.3, 0.7, 0.3),
    };
    let glass = Material::Dielectric {
        refraction_index: 1.5,
    };
    let lamp = Material::Emissive {
        albedo: Vec3::new(1.0, 0.9, 0.7),
        intensity: 2.0,
    };

    scene.add(
        Transformed::new(Plane::new(ground))
            .with_position(Vec3::new(0.0, -0.5, -2.0))
            .with_scale(Vec3::splat(6.0)),
    );
    scene.add(
        Transformed::new(Sphere::new(matte_red)).with_position(Vec3::new(0.0, 0.0, -2.0)).with_scale(Vec3::splat(0.5)),
    );
    scene.add(
        Transformed::new(Sphere::new(glass)).with_position(Vec3::new(-1.1, 0.0, -1.6)).with_scale(Vec3::splat(0.5)),
    );
    scene.add(
        Transformed::new(Cube::new(brushed_green))
            .with_position(Vec3::new(1.25, -0.1, -2.5))
            .with_rotation(Vec3::new(0.0, 45.0, 0.0))
            .with_scale(Vec3::splat(0.4)),
    );
    scene.add(
        Transformed::new(Cylinder::new(matte_red))
            .with_position(Vec3::new(-0.4, -0.25, -3.2))
            .with_scale(Vec3::new(0.25, 0.25, 0.25)),
    );
    scene.add(
        Transformed::new(Sphere::new(lamp))
            .with_position(Vec3::new(0.0, 2.5, -2.0))
            .with_scale(Vec3::splat(0.75)),
    );

    // Small pyramid mesh from a flat vertex/index list
    let pyramid = MeshData::new(
        vec![
            Vec3::new(-0.5, 0.0, -0.5),
            Vec3::new(0.5, 0.0, -0.5),
            Vec3::new(0.5, 0.0, 0.5),
            Vec3::new(-0.5, 0.0, 0.5),
            Vec3::new(0.0, 0.8, 0.0),
        ],
        vec![0, 1, 4, 1, 2, 4, 2, 3, 4, 3, 0, 4, 0, 2, 1, 0, 3, 2],
    )?;
    let mut rng = StdRng::seed_from_u64(7);
    let mesh = Mesh::new(
        &pyramid,
        Material::Metal {
            albedo: Vec3::new(0.5, 0.5, 0.9),
        },
        &mut rng,
    )?;
    scene.add(
        Transformed::new(mesh)
            .with_position(Vec3::new(0.9, -0.5, -1.4))
            .with_rotation(Vec3::new(0.0, 30.0, 0.0)),
    );

    println!("Created {} objects", scene.len());
    scene.build_bvh(&mut rng)?;
    Ok(scene)
}
