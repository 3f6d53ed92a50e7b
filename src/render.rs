use crate::constants::{page_registry, page_spec, PageSpec, LAZY_SRC_ATTR};
use crate::dom;
use fnv::FnvHashMap;
use gallery_core::{
    DrawFrame, Error, PixelSize, Renderer, SceneKey, TemplateId, TileError, TileKey, TileLoad,
};
use web_sys as web;

mod helpers;
mod plane;

use plane::PlaneMesh;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct TileUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    opacity: f32,
    speed: f32,
    _pad: [f32; 2],
}

/// GPU side of one tile: its texture and the uniforms it is drawn with.
struct TileResources {
    _texture: wgpu::Texture,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    canvas: web::HtmlCanvasElement,
    document: web::Document,
    pages: FnvHashMap<&'static str, PageSpec>,

    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    plane: PlaneMesh,

    // Decoding images, keyed by the tile waiting on them
    loading: FnvHashMap<TileKey, web::HtmlImageElement>,
    tiles: FnvHashMap<TileKey, TileResources>,
    clear_color: wgpu::Color,
}

impl GpuRenderer {
    /// Acquire a WebGPU device for `canvas`. Any failure means the platform
    /// cannot draw the gallery and is reported as a missing capability.
    pub async fn new(
        canvas: web::HtmlCanvasElement,
        document: web::Document,
    ) -> Result<Self, Error> {
        dom::sync_canvas_backing_size(&canvas);
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| {
                log::error!("[gpu] create_surface failed: {:?}", e);
                Error::CapabilityMissing("webgpu surface")
            })?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(Error::CapabilityMissing("webgpu adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| {
                log::error!("[gpu] request_device failed: {:?}", e);
                Error::CapabilityMissing("webgpu device")
            })?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or(Error::CapabilityMissing("webgpu surface format"))?;
        // The canvas sits over the DOM, so it must composite with alpha
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tile_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::constants::TILE_WGSL.into()),
        });
        let bind_group_layout = helpers::tile_bind_group_layout(&device);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tile_pl"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_tile_pipeline(&device, &pipeline_layout, &shader, format);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("tile_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let plane = plane::create_plane(&device);

        log::info!("[gpu] ready {}x{} {:?}", width, height, format);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            canvas,
            document,
            pages: page_registry(),
            pipeline,
            bind_group_layout,
            sampler,
            plane,
            loading: FnvHashMap::default(),
            tiles: FnvHashMap::default(),
            clear_color: wgpu::Color::TRANSPARENT,
        })
    }

    /// Source element for a tile: the n-th media match of its template.
    fn media_element(&self, template: &TemplateId, index: usize) -> Option<web::Element> {
        let selector = page_spec(&self.pages, template).media?;
        let root = self.document.document_element()?;
        dom::query_all(&root, selector).into_iter().nth(index)
    }

    /// Start decoding the tile's image into a private element.
    fn begin_load(&mut self, template: &TemplateId, key: TileKey) -> Result<(), TileError> {
        let index = key.media.index;
        let el = self
            .media_element(template, index)
            .ok_or(TileError::MissingElement(index))?;
        let src = el
            .get_attribute(LAZY_SRC_ATTR)
            .or_else(|| el.get_attribute("src"))
            .filter(|s| !s.is_empty())
            .ok_or_else(|| TileError::Decode {
                index,
                reason: "element has no source".to_string(),
            })?;
        let img = web::HtmlImageElement::new().map_err(|e| TileError::Decode {
            index,
            reason: format!("{:?}", e),
        })?;
        img.set_cross_origin(Some("anonymous"));
        img.set_src(&src);
        self.loading.insert(key, img);
        Ok(())
    }

    fn upload(&mut self, key: TileKey, img: &web::HtmlImageElement) -> TileResources {
        let width = img.natural_width();
        let height = img.natural_height();
        let (texture, view) = helpers::create_media_texture(&self.device, "media", width, height);
        self.queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source: wgpu::ExternalImageSource::HTMLImageElement(img.clone()),
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
        );
        let uniform_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tile_uniforms"),
            size: std::mem::size_of::<TileUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tile_bg"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        log::debug!(
            "[gpu] uploaded media {} of scene {} ({}x{})",
            key.media.index,
            key.scene.0,
            width,
            height
        );
        TileResources {
            _texture: texture,
            uniform_buffer,
            bind_group,
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

impl Renderer for GpuRenderer {
    fn resize(&mut self, _window: PixelSize) {
        dom::sync_canvas_backing_size(&self.canvas);
        let width = self.canvas.width();
        let height = self.canvas.height();
        if width == 0 || height == 0 {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.reconfigure();
        }
    }

    fn prepare_tile(&mut self, template: &TemplateId, key: TileKey) -> Result<TileLoad, TileError> {
        if self.tiles.contains_key(&key) {
            return Ok(TileLoad::Ready);
        }
        if !self.loading.contains_key(&key) {
            self.begin_load(template, key)?;
        }
        let Some(img) = self.loading.get(&key).cloned() else {
            return Ok(TileLoad::Pending);
        };
        if !img.complete() {
            return Ok(TileLoad::Pending);
        }
        self.loading.remove(&key);
        if img.natural_width() == 0 || img.natural_height() == 0 {
            return Err(TileError::Decode {
                index: key.media.index,
                reason: format!("{} did not decode", img.src()),
            });
        }
        let resources = self.upload(key, &img);
        self.tiles.insert(key, resources);
        Ok(TileLoad::Ready)
    }

    fn release_scene(&mut self, scene: SceneKey) {
        let before = self.tiles.len();
        self.tiles.retain(|k, _| k.scene != scene);
        self.loading.retain(|k, _| k.scene != scene);
        log::info!(
            "[gpu] released {} tiles of scene {}",
            before - self.tiles.len(),
            scene.0
        );
    }

    fn set_layer(&mut self, z_index: Option<i32>) {
        match z_index {
            Some(z) => dom::set_style(&self.canvas, "z-index", &z.to_string()),
            None => dom::remove_style(&self.canvas, "z-index"),
        }
    }

    fn draw(&mut self, frame: &DrawFrame<'_>) -> gallery_core::Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(Error::Render(format!("{:?}", e))),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        let view_proj = frame.view_projection.to_cols_array_2d();
        for draw in frame.tiles {
            let Some(tile) = self.tiles.get(&draw.key) else {
                continue;
            };
            let u = TileUniforms {
                view_proj,
                model: draw.model.to_cols_array_2d(),
                opacity: draw.opacity,
                speed: draw.speed,
                _pad: [0.0; 2],
            };
            self.queue
                .write_buffer(&tile.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("gallery_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_vertex_buffer(0, self.plane.vertices.slice(..));
            rpass.set_index_buffer(self.plane.indices.slice(..), wgpu::IndexFormat::Uint16);
            for draw in frame.tiles {
                if let Some(tile) = self.tiles.get(&draw.key) {
                    rpass.set_bind_group(0, &tile.bind_group, &[]);
                    rpass.draw_indexed(0..self.plane.index_count, 0, 0..1);
                }
            }
        }

        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}
