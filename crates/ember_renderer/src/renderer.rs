//! Frame renderer: drives the pool, the integrator, and the accumulation
//! buffer. Holds no global state; everything a frame needs is passed in.

use crate::{
    gen_f32, trace_ray, AccumulationBuffer, Camera, Color, ImageBuffer, RenderError, RenderTask,
    Scene, ThreadPool,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Samples per pixel per frame
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Queue granularity: tasks per worker per frame
    pub tasks_per_worker: usize,
    /// Fixed base seed for reproducible frames; entropy-seeded when absent
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 50,
            max_depth: 10,
            tasks_per_worker: 4,
            seed: None,
        }
    }
}

/// Progressive tile renderer over a fixed worker pool.
///
/// One instance owns its scratch frame and accumulation state for a single
/// output resolution. Per frame: partition rows, sample every pixel through
/// the integrator, fold the result into the accumulation buffer, and
/// resolve the running average into the caller's frame.
pub struct Renderer {
    config: RenderConfig,
    pool: ThreadPool,
    scratch: ImageBuffer,
    accumulation: AccumulationBuffer,
}

impl Renderer {
    /// Renderer for `width` x `height` frames with a machine-sized pool.
    pub fn new(width: u32, height: u32, config: RenderConfig) -> Self {
        Self::with_pool(width, height, config, ThreadPool::with_default_size())
    }

    /// Renderer with an explicit worker count.
    pub fn with_worker_count(width: u32, height: u32, config: RenderConfig, workers: usize) -> Self {
        Self::with_pool(width, height, config, ThreadPool::new(workers))
    }

    fn with_pool(width: u32, height: u32, config: RenderConfig, pool: ThreadPool) -> Self {
        Self {
            config,
            pool,
            scratch: ImageBuffer::new(width, height),
            accumulation: AccumulationBuffer::new(width, height),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn worker_count(&self) -> usize {
        self.pool.worker_count()
    }

    /// Frames accumulated since the camera last moved.
    pub fn accumulated_frames(&self) -> u32 {
        self.accumulation.frame_count()
    }

    /// Render one frame into `frame`.
    ///
    /// `camera_moved` reports whether any camera motion happened since the
    /// previous frame; motion resets the accumulation immediately, because
    /// averaging frames of different camera geometry ghosts. While the
    /// camera is stationary each call adds one frame of samples and `frame`
    /// receives the running average.
    ///
    /// The scene must not be mutated while this call is in flight; workers
    /// read it unsynchronized.
    pub fn render_frame(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        camera_moved: bool,
        frame: &mut ImageBuffer,
    ) -> Result<(), RenderError> {
        assert_eq!(
            (frame.width(), frame.height()),
            (self.scratch.width(), self.scratch.height()),
            "output frame dimensions must match the renderer"
        );

        if camera_moved {
            self.accumulation.reset();
        }

        let width = self.scratch.width();
        let height = self.scratch.height();
        let config = self.config;
        let tasks = crate::partition_rows(
            height,
            self.pool.worker_count() * self.config.tasks_per_worker.max(1),
        );

        let mut jobs: Vec<Box<dyn FnOnce() + Send + '_>> = Vec::with_capacity(tasks.len());
        let mut rest = self.scratch.pixels_mut();
        for (index, task) in tasks.into_iter().enumerate() {
            let (rows, tail) = rest.split_at_mut(task.row_count() as usize * width as usize);
            rest = tail;

            let mut rng = match config.seed {
                Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(index as u64)),
                None => SmallRng::from_entropy(),
            };
            jobs.push(Box::new(move || {
                render_rows(task, rows, width, height, scene, camera, &config, &mut rng);
            }));
        }
        self.pool.submit_and_wait(jobs)?;

        self.accumulation.add_frame(&self.scratch);
        self.accumulation.resolve_into(frame);
        Ok(())
    }
}

/// Sample every pixel of one task's rows. `rows` is that task's exclusive
/// slice of the frame, so workers never share a pixel.
fn render_rows(
    task: RenderTask,
    rows: &mut [Color],
    width: u32,
    height: u32,
    scene: &Scene,
    camera: &Camera,
    config: &RenderConfig,
    rng: &mut SmallRng,
) {
    let samples = config.samples_per_pixel.max(1);
    let inv_width = 1.0 / (width.saturating_sub(1).max(1)) as f32;
    let inv_height = 1.0 / (height.saturating_sub(1).max(1)) as f32;

    let mut offset = 0;
    for y in task.start_row..task.end_row {
        for x in 0..width {
            let mut pixel = Color::ZERO;
            for _ in 0..samples {
                let s = (x as f32 + gen_f32(rng)) * inv_width;
                // Buffer rows run top-down, camera t runs bottom-up
                let t = ((height - 1 - y) as f32 + gen_f32(rng)) * inv_height;

                let ray = match camera.get_ray(s, t) {
                    Ok(ray) => ray,
                    Err(err) => {
                        log::debug!("sample skipped at ({x}, {y}): {err}");
                        continue;
                    }
                };

                let sample = trace_ray(&ray, scene, config.max_depth, rng);
                if sample.is_finite() {
                    pixel += sample;
                } else {
                    log::warn!("non-finite radiance sample discarded at ({x}, {y})");
                }
            }
            rows[offset] = pixel / samples as f32;
            offset += 1;
        }
    }
}
