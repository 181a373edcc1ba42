// Texture loading and GPU upload

use std::path::Path;

use image::GenericImageView;
use thiserror::Error;

/// Errors from loading image assets
#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to read texture file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode texture: {0}")]
    Decode(#[from] image::ImageError),
}

/// Depth buffer format used by every pipeline
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// A loaded texture with GPU resources
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

/// Sampler filtering choice per texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filtering {
    /// Crisp pixel-art sampling (sprite sheets)
    Nearest,
    /// Smooth sampling (ground, shadow)
    Linear,
}

impl Texture {
    /// Load a texture from a file path
    pub fn from_path(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: impl AsRef<Path>,
        filtering: Filtering,
    ) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let img = image::load_from_memory(&bytes)?;
        Ok(Self::from_image(
            device,
            queue,
            &img,
            filtering,
            path.to_str(),
        ))
    }

    /// Upload a decoded image
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &image::DynamicImage,
        filtering: Filtering,
        label: Option<&str>,
    ) -> Self {
        let rgba = img.to_rgba8();
        let dimensions = img.dimensions();
        Self::from_rgba(device, queue, &rgba, dimensions, filtering, label)
    }

    /// Upload raw RGBA8 pixels
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &[u8],
        dimensions: (u32, u32),
        filtering: Filtering,
        label: Option<&str>,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * dimensions.0),
                rows_per_image: Some(dimensions.1),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let filter = match filtering {
            Filtering::Nearest => wgpu::FilterMode::Nearest,
            Filtering::Linear => wgpu::FilterMode::Linear,
        };
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            width: dimensions.0,
            height: dimensions.1,
        }
    }

    /// Generate the soft round shadow texture.
    ///
    /// Alpha is 1 inside `inner_radius` and falls off smoothly to 0 at
    /// `outer_radius`; radii are in texture space where 1.0 spans from the
    /// center to an edge. The color is black, the fade happens in alpha.
    pub fn radial_shadow(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        size: u32,
        inner_radius: f32,
        outer_radius: f32,
    ) -> Self {
        let pixels = radial_shadow_pixels(size, inner_radius, outer_radius);
        Self::from_rgba(
            device,
            queue,
            &pixels,
            (size, size),
            Filtering::Linear,
            Some("Shadow Texture"),
        )
    }

    /// Create the depth buffer matching the surface size
    pub fn depth(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }
}

/// RGBA8 pixels for the radial shadow falloff
fn radial_shadow_pixels(size: u32, inner_radius: f32, outer_radius: f32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    let half = size as f32 / 2.0;

    for y in 0..size {
        for x in 0..size {
            let dx = (x as f32 + 0.5 - half) / half;
            let dy = (y as f32 + 0.5 - half) / half;
            let r = (dx * dx + dy * dy).sqrt();

            let t = ((r - inner_radius) / (outer_radius - inner_radius)).clamp(0.0, 1.0);
            // Smoothstep for a soft edge
            let falloff = 1.0 - t * t * (3.0 - 2.0 * t);
            let alpha = (falloff * 255.0) as u8;

            pixels.extend_from_slice(&[0, 0, 0, alpha]);
        }
    }

    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_pixel_buffer_size() {
        let pixels = radial_shadow_pixels(32, 0.25, 1.0);
        assert_eq!(pixels.len(), 32 * 32 * 4);
    }

    #[test]
    fn test_shadow_opaque_center_transparent_corners() {
        let size = 64;
        let pixels = radial_shadow_pixels(size, 0.25, 1.0);

        let alpha_at = |x: u32, y: u32| pixels[((y * size + x) * 4 + 3) as usize];

        // Center is fully dark, corners fully transparent
        assert_eq!(alpha_at(size / 2, size / 2), 255);
        assert_eq!(alpha_at(0, 0), 0);
        assert_eq!(alpha_at(size - 1, size - 1), 0);

        // Falloff is monotonic along a row from the center outward
        let mut previous = 255;
        for x in (size / 2)..size {
            let alpha = alpha_at(x, size / 2);
            assert!(alpha <= previous);
            previous = alpha;
        }
    }

    #[test]
    fn test_shadow_rgb_is_black() {
        let pixels = radial_shadow_pixels(16, 0.25, 1.0);
        for chunk in pixels.chunks(4) {
            assert_eq!(&chunk[0..3], &[0, 0, 0]);
        }
    }
}
