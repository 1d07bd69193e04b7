//! Shared helpers for the examples: tracing setup and top-down PNG renders.
use std::collections::HashMap;
use std::path::Path;

use glam::Vec3;
use image::{Rgb, RgbImage};
use prefab_unfold::prelude::Expansion;
use tracing_subscriber::EnvFilter;

/// Initialize a compact tracing subscriber honoring `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init();
}

/// Marker drawn for a recipe node or batched instance.
#[derive(Debug, Clone, Copy)]
pub enum NodeStyle {
    Circle { color: [u8; 3], radius: i64 },
    Square { color: [u8; 3], half: i64 },
}

/// Top-down render settings: the world window is a square of `world_extent`
/// units centered on the origin, viewed along -Y (world X maps to image X,
/// world Z to image Y).
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub world_extent: f32,
    pub background: [u8; 3],
    default_style: NodeStyle,
    styles: HashMap<String, NodeStyle>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), world_extent: f32) -> Self {
        Self {
            image_size,
            world_extent,
            background: [26, 26, 26],
            default_style: NodeStyle::Circle {
                color: [235, 235, 235],
                radius: 3,
            },
            styles: HashMap::new(),
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_default_style(mut self, style: NodeStyle) -> Self {
        self.default_style = style;
        self
    }

    /// Style markers for nodes with this name or batch groups with this key.
    pub fn set_style(&mut self, name: impl Into<String>, style: NodeStyle) {
        self.styles.insert(name.into(), style);
    }

    fn style_for(&self, name: &str) -> NodeStyle {
        self.styles.get(name).copied().unwrap_or(self.default_style)
    }

    fn world_to_pixel(&self, position: Vec3) -> (i64, i64) {
        let half = self.world_extent * 0.5;
        let u = (position.x + half) / self.world_extent;
        let v = (position.z + half) / self.world_extent;
        (
            (u * self.image_size.0 as f32) as i64,
            (v * self.image_size.1 as f32) as i64,
        )
    }
}

/// Render every recipe node and batched instance of an expansion to a PNG.
pub fn render_expansion_to_png(
    expansion: &Expansion,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (width, height) = config.image_size;
    let mut image = RgbImage::from_pixel(width, height, Rgb(config.background));

    for (_, _, node) in expansion.recipe.iter_depth_first() {
        let center = config.world_to_pixel(node.transform.translation);
        draw_marker(&mut image, center, config.style_for(&node.name));
    }
    for group in &expansion.batches.groups {
        let style = config.style_for(&group.key);
        for transform in &group.transforms {
            let center = config.world_to_pixel(transform.translation);
            draw_marker(&mut image, center, style);
        }
    }

    image.save(path.as_ref())?;
    Ok(())
}

fn draw_marker(image: &mut RgbImage, center: (i64, i64), style: NodeStyle) {
    match style {
        NodeStyle::Circle { color, radius } => {
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx * dx + dy * dy <= radius * radius {
                        put_pixel_clipped(image, center.0 + dx, center.1 + dy, color);
                    }
                }
            }
        }
        NodeStyle::Square { color, half } => {
            for dy in -half..=half {
                for dx in -half..=half {
                    put_pixel_clipped(image, center.0 + dx, center.1 + dy, color);
                }
            }
        }
    }
}

fn put_pixel_clipped(image: &mut RgbImage, x: i64, y: i64, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
        image.put_pixel(x as u32, y as u32, Rgb(color));
    }
}
