// src/core/texture.rs

use std::fmt;
use std::path::Path;

use log::{debug, warn};

use crate::core::handle::{HandleOwner, RendererOwner, TextureOwner};
use crate::core::platform::api::{Flip, Platform, Point, Rect};
use crate::error::{AppError, PlatformResultExt, Result};

/// Optional parameters of a textured draw.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderOptions {
    pub clip: Option<Rect>,     // source rectangle; also sets the drawn size
    pub angle: f64,             // degrees, clockwise
    pub center: Option<Point>,  // rotation pivot, defaults to dst centre
    pub flip: Flip,
}

/// Image file decoded and uploaded to the renderer's device.
///
/// Borrows the renderer it was uploaded to: textures die with their renderer
/// in the native library, so they must not outlive it.
pub struct DecodedImage<'r, P: Platform> {
    texture: TextureOwner<'r, P>,
    width: u32,
    height: u32,
}

impl<'r, P: Platform> DecodedImage<'r, P> {
    pub fn load(renderer: &'r RendererOwner<'_, P>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let platform = renderer.platform();
        let Some(raw_renderer) = renderer.get() else {
            return Err(AppError::resource_load(path, "renderer handle is empty"));
        };

        let surface = platform.load_surface(path).or_load_error(path)?;
        // Freed on every exit path, including a failed upload.
        let surface = HandleOwner::new(platform, surface, P::free_surface, "surface");
        let Some(raw_surface) = surface.get() else {
            return Err(AppError::resource_load(path, "surface handle is empty"));
        };

        let texture = platform
            .create_texture(raw_renderer, raw_surface)
            .or_load_error(path)?;
        let (width, height) = platform.surface_size(raw_surface);
        debug!("loaded {} ({width}x{height})", path.display());

        Ok(Self {
            texture: HandleOwner::new(platform, texture, P::destroy_texture, "texture"),
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Draw at `(x, y)` at full size, unrotated.
    pub fn render(&self, target: &RendererOwner<'_, P>, x: i32, y: i32) {
        self.render_ex(target, x, y, &RenderOptions::default());
    }

    pub fn render_ex(&self, target: &RendererOwner<'_, P>, x: i32, y: i32, opts: &RenderOptions) {
        let (Some(renderer), Some(texture)) = (target.get(), self.texture.get()) else {
            return;
        };

        let dst = match opts.clip {
            Some(clip) => Rect::new(x, y, clip.w, clip.h),
            None => Rect::new(x, y, self.width, self.height),
        };

        if let Err(e) = self.texture.platform().copy_texture(
            renderer, texture, opts.clip, dst, opts.angle, opts.center, opts.flip,
        ) {
            warn!("texture draw failed: {e}");
        }
    }
}

impl<P: Platform> fmt::Debug for DecodedImage<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedImage")
            .field("texture", &self.texture)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::guard::SubsystemGuard;
    use crate::core::handle::{create_renderer, create_window};
    use crate::core::platform::api::{RendererOptions, WindowConfig};
    use crate::core::platform::backend::mock::{Call, MockPlatform, SURFACE_SIZE, Step};

    fn with_renderer(platform: &MockPlatform, f: impl FnOnce(&RendererOwner<'_, MockPlatform>)) {
        let video = SubsystemGuard::init(platform).unwrap();
        let config = WindowConfig {
            title: "t".into(),
            width: 10,
            height: 10,
        };
        let window = create_window(&video, &config).unwrap();
        let renderer = create_renderer(
            &window,
            RendererOptions {
                accelerated: true,
                present_vsync: false,
            },
        )
        .unwrap();
        f(&renderer);
    }

    fn texture_calls(platform: &MockPlatform) -> Vec<Call> {
        platform
            .calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::LoadSurface(_)
                        | Call::FreeSurface(_)
                        | Call::CreateTexture(_)
                        | Call::DestroyTexture(_)
                )
            })
            .collect()
    }

    #[test]
    fn load_records_size_and_frees_surface() {
        let platform = MockPlatform::new();
        with_renderer(&platform, |renderer| {
            let image = DecodedImage::load(renderer, "sprite.png").unwrap();
            assert_eq!((image.width(), image.height()), SURFACE_SIZE);
        });

        // ids: window 1, renderer 2, surface 3, texture 4
        assert_eq!(
            texture_calls(&platform),
            vec![
                Call::LoadSurface("sprite.png".into()),
                Call::CreateTexture(4),
                Call::FreeSurface(3),
                Call::DestroyTexture(4),
            ]
        );
    }

    #[test]
    fn missing_file_names_path_and_releases_nothing() {
        let platform = MockPlatform::failing_at(Step::LoadSurface);
        with_renderer(&platform, |renderer| {
            let err = DecodedImage::load(renderer, "does/not/exist.png").unwrap_err();
            assert!(
                matches!(&err, AppError::ResourceLoad { path, .. } if path == Path::new("does/not/exist.png"))
            );
            assert!(err.to_string().contains("does/not/exist.png"));
        });

        assert_eq!(platform.count(|c| matches!(c, Call::DestroyTexture(_))), 0);
        assert_eq!(platform.count(|c| matches!(c, Call::FreeSurface(_))), 0);
    }

    #[test]
    fn failed_upload_still_frees_surface() {
        let platform = MockPlatform::failing_at(Step::CreateTexture);
        with_renderer(&platform, |renderer| {
            assert!(DecodedImage::load(renderer, "a.png").is_err());
        });

        assert_eq!(
            texture_calls(&platform),
            vec![Call::LoadSurface("a.png".into()), Call::FreeSurface(3)]
        );
    }

    #[test]
    fn render_uses_full_size_without_clip() {
        let platform = MockPlatform::new();
        with_renderer(&platform, |renderer| {
            let image = DecodedImage::load(renderer, "a.png").unwrap();
            image.render(renderer, 5, 6);
        });

        let (w, h) = SURFACE_SIZE;
        assert!(platform.calls().contains(&Call::CopyTexture {
            texture: 4,
            src: None,
            dst: Rect::new(5, 6, w, h),
            angle: 0.0,
            center: None,
            flip: Flip::None,
        }));
    }

    #[test]
    fn render_uses_clip_size_and_passes_transform() {
        let platform = MockPlatform::new();
        let clip = Rect::new(8, 0, 4, 2);
        let opts = RenderOptions {
            clip: Some(clip),
            angle: 90.0,
            center: Some(Point { x: 1, y: 1 }),
            flip: Flip::Horizontal,
        };
        with_renderer(&platform, |renderer| {
            let image = DecodedImage::load(renderer, "a.png").unwrap();
            image.render_ex(renderer, -3, 7, &opts);
        });

        assert!(platform.calls().contains(&Call::CopyTexture {
            texture: 4,
            src: Some(clip),
            dst: Rect::new(-3, 7, 4, 2),
            angle: 90.0,
            center: Some(Point { x: 1, y: 1 }),
            flip: Flip::Horizontal,
        }));
    }

    #[test]
    fn failed_draw_is_not_fatal() {
        let platform = MockPlatform::failing_at(Step::CopyTexture);
        with_renderer(&platform, |renderer| {
            let image = DecodedImage::load(renderer, "a.png").unwrap();
            image.render(renderer, 0, 0);
            image.render(renderer, 0, 0);
        });
        assert_eq!(platform.count(|c| matches!(c, Call::DestroyTexture(4))), 1);
    }
}
