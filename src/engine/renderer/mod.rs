// Rendering system using wgpu

pub mod camera;
mod ground;
mod sprite;
pub mod texture;
mod vertex;

pub use camera::{Camera, GroundBasis};
pub use texture::{Texture, TextureError};

use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use log::info;
use std::sync::Arc;
use winit::window::Window;

use crate::core::math::lerp;

use ground::GroundRenderer;
use sprite::{SpriteInstance, SpriteRenderer, SpriteUniform};

/// Draw-call contract for the player billboard: where it is, which sheet
/// cell to show, and whether to mirror it.
#[derive(Debug, Clone, Copy)]
pub struct BillboardDraw {
    /// World-space center of the quad
    pub position: Vec3,
    /// Quad edge length in world units
    pub size: f32,
    /// Sprite sheet columns / rows
    pub grid: (u32, u32),
    /// Selected cell (column, row)
    pub frame: (u32, u32),
    /// Mirror the sprite horizontally
    pub mirrored: bool,
    /// Distance of the quad bottom above the floor, for the shadow
    pub height_above_floor: f32,
}

/// Ground texture asset
const GROUND_TEXTURE_PATH: &str = "assets/textures/grass.png";
/// Player sprite sheet asset (8x8 grid)
const PLAYER_SHEET_PATH: &str = "assets/characters/chicken.png";

/// Resolution of the generated shadow texture
const SHADOW_TEXTURE_SIZE: u32 = 128;
/// Radius where the shadow starts fading, in texture space
const SHADOW_INNER_RADIUS: f32 = 0.25;
/// Radius where the shadow reaches full transparency
const SHADOW_OUTER_RADIUS: f32 = 1.0;
/// Offset above the floor that keeps the shadow clear of the ground depth
const SHADOW_LIFT: f32 = 0.01;
/// Jump height at which the shadow bottoms out
const SHADOW_FADE_HEIGHT: f32 = 2.0;
const SHADOW_GROUNDED_ALPHA: f32 = 0.6;
const SHADOW_AIRBORNE_ALPHA: f32 = 0.15;
const SHADOW_MIN_SCALE: f32 = 0.5;

/// Shadow quad scale and opacity for a player at the given height above
/// the floor. Grounded shadows are large and dark; the higher the jump,
/// the smaller and fainter the shadow.
pub fn shadow_appearance(height_above_floor: f32) -> (f32, f32) {
    let t = (height_above_floor / SHADOW_FADE_HEIGHT).clamp(0.0, 1.0);
    let scale = lerp(1.0, SHADOW_MIN_SCALE, t);
    let alpha = lerp(SHADOW_GROUNDED_ALPHA, SHADOW_AIRBORNE_ALPHA, t);
    (scale, alpha)
}

/// Main renderer: owns the wgpu device and the per-object pipelines.
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    depth_view: wgpu::TextureView,
    ground: GroundRenderer,
    sprites: SpriteRenderer,
    player_sprite: SpriteInstance,
    shadow_sprite: SpriteInstance,
}

impl Renderer {
    /// Create a renderer for the given window and load all textures.
    ///
    /// Every failure here is fatal at startup: a missing GPU, an
    /// unconfigurable surface or an unreadable asset aborts initialization.
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let depth_view = Texture::depth(&device, size.width, size.height);

        let ground_texture =
            Texture::from_path(&device, &queue, GROUND_TEXTURE_PATH, texture::Filtering::Linear)
                .with_context(|| format!("loading ground texture {GROUND_TEXTURE_PATH}"))?;
        let player_texture =
            Texture::from_path(&device, &queue, PLAYER_SHEET_PATH, texture::Filtering::Nearest)
                .with_context(|| format!("loading player sprite sheet {PLAYER_SHEET_PATH}"))?;
        let shadow_texture = Texture::radial_shadow(
            &device,
            &queue,
            SHADOW_TEXTURE_SIZE,
            SHADOW_INNER_RADIUS,
            SHADOW_OUTER_RADIUS,
        );

        let ground = GroundRenderer::new(&device, &config, &ground_texture);
        let sprites = SpriteRenderer::new(&device, &config);
        let player_sprite = sprites.instance(&device, &player_texture);
        let shadow_sprite = sprites.instance(&device, &shadow_texture);

        info!(
            "Renderer initialized with {}x{} resolution",
            size.width, size.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            depth_view,
            ground,
            sprites,
            player_sprite,
            shadow_sprite,
        })
    }

    /// Resize the surface and depth buffer.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = Texture::depth(&self.device, new_size.width, new_size.height);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Render one frame: ground, then shadow, then the player billboard.
    pub fn render(&mut self, camera: &Camera, billboard: &BillboardDraw) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Stale swapchain after a resize; reconfigure and skip
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let view_proj = camera.view_projection_matrix();
        self.ground.write_mvp(&self.queue, view_proj);

        // Shadow: flat circle under the player, shrinking and fading with
        // height above the floor
        let (shadow_scale, shadow_alpha) = shadow_appearance(billboard.height_above_floor);
        let shadow_pos = Vec3::new(
            billboard.position.x,
            billboard.position.y - billboard.height_above_floor - billboard.size / 2.0
                + SHADOW_LIFT,
            billboard.position.z,
        );
        let shadow_model = Mat4::from_translation(shadow_pos)
            * Mat4::from_rotation_x(-std::f32::consts::FRAC_PI_2)
            * Mat4::from_scale(Vec3::splat(billboard.size * shadow_scale));
        self.shadow_sprite.write(
            &self.queue,
            SpriteUniform::new(view_proj * shadow_model, (1, 1), (0, 0), false, shadow_alpha),
        );

        // Player billboard: translate into the world, undo the view
        // rotation so the quad faces the camera, scale to character size
        let sprite_model = Mat4::from_translation(billboard.position)
            * camera.billboard_rotation()
            * Mat4::from_scale(Vec3::splat(billboard.size));
        self.player_sprite.write(
            &self.queue,
            SpriteUniform::new(
                view_proj * sprite_model,
                billboard.grid,
                billboard.frame,
                billboard.mirrored,
                1.0,
            ),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.2,
                            b: 0.3,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.ground.draw(&mut render_pass);
            self.sprites.draw(&mut render_pass, &self.shadow_sprite);
            self.sprites.draw(&mut render_pass, &self.player_sprite);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_shadow_grounded_full_strength() {
        let (scale, alpha) = shadow_appearance(0.0);
        assert_relative_eq!(scale, 1.0);
        assert_relative_eq!(alpha, SHADOW_GROUNDED_ALPHA);
    }

    #[test]
    fn test_shadow_shrinks_and_fades_airborne() {
        let (mid_scale, mid_alpha) = shadow_appearance(1.0);
        assert!(mid_scale < 1.0 && mid_scale > SHADOW_MIN_SCALE);
        assert!(mid_alpha < SHADOW_GROUNDED_ALPHA && mid_alpha > SHADOW_AIRBORNE_ALPHA);

        let (top_scale, top_alpha) = shadow_appearance(SHADOW_FADE_HEIGHT);
        assert_relative_eq!(top_scale, SHADOW_MIN_SCALE);
        assert_relative_eq!(top_alpha, SHADOW_AIRBORNE_ALPHA);
    }

    #[test]
    fn test_shadow_clamps_beyond_fade_height() {
        let capped = shadow_appearance(SHADOW_FADE_HEIGHT);
        let beyond = shadow_appearance(SHADOW_FADE_HEIGHT * 3.0);
        assert_eq!(capped, beyond);
    }
}
