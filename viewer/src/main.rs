//! Magstripe viewer binary.
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

use clap::Parser;
use egui_wgpu::Renderer as EguiRenderer;
use egui_wgpu::ScreenDescriptor;
use egui_winit::State as EguiWinitState;
use engine::griddata::MapField;
use engine::SpreadingRate;
use viewer::cli::ViewerArgs;
use viewer::session::Session;
use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

struct GpuState<'w> {
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w Window) -> Self {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .unwrap_or_else(|e| panic!("create surface: {e}"));
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap_or_else(|| panic!("no suitable GPU adapters"));
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .unwrap_or_else(|e| panic!("request device: {e}"));

        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats.iter().copied().find(|f| f.is_srgb()).unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        Self { surface, device, queue, config }
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }
}

/// Control values edited in the side panel; applied on change.
struct Controls {
    rate: SpreadingRate,
    count: i64,
    field: MapField,
    compare: bool,
}

fn controls_panel(ctx: &egui::Context, ctl: &mut Controls, session: &mut Session) {
    egui::SidePanel::left("controls").resizable(false).show(ctx, |ui| {
        ui.heading("Seafloor spreading");
        let mut regen = false;
        ui.label("Spreading rate");
        ui.horizontal(|ui| {
            regen |= ui.radio_value(&mut ctl.rate, SpreadingRate::Slow, "Slow (5–15 km)").changed();
            regen |= ui.radio_value(&mut ctl.rate, SpreadingRate::Fast, "Fast (15–25 km)").changed();
        });
        let range = viewer::cli::count_slider_range(ctl.count);
        regen |= ui.add(egui::Slider::new(&mut ctl.count, range).text("Anomalies")).changed();
        let reseed = ui.button("New random draw").clicked();
        ui.checkbox(&mut ctl.compare, "Compare slow and fast");
        ui.separator();
        ui.label("Map");
        let mut refield = false;
        ui.horizontal(|ui| {
            refield |= ui.radio_value(&mut ctl.field, MapField::Polarity, "Polarity").changed();
            refield |= ui.radio_value(&mut ctl.field, MapField::Age, "Age").changed();
        });

        let outcome = if reseed {
            session.reseed()
        } else if regen {
            let mut cfg = session.config;
            cfg.anomaly.spreading_rate = ctl.rate;
            cfg.anomaly.num_anomalies = ctl.count;
            session.reconfigure(cfg, ctl.field)
        } else if refield {
            session.set_map_field(ctl.field)
        } else {
            Ok(())
        };
        if let Err(e) = outcome {
            tracing::error!("[viewer] {e}");
        }

        ui.separator();
        let ds = session.active();
        ui.label(format!("rows = {}", ds.summary.rows));
        ui.label(format!("span = {:.0} km", ds.summary.span_km));
        ui.label(format!("oldest = {:.1} Myr", ds.summary.oldest_myr));
        ui.label(format!("mean width = {:.1} km", ds.summary.mean_width_km));
        match ds.fit {
            Some(fit) => ui.label(format!(
                "half-rate ≈ {:.1} mm/yr (r² = {:.3})",
                fit.half_rate_mm_per_yr(),
                fit.r_squared
            )),
            None => ui.label("half-rate: need ≥ 2 anomalies"),
        };
    });
}

fn run_export(args: &ViewerArgs, session: &Session) -> std::process::ExitCode {
    let Some(dir) = args.export.as_ref() else {
        return std::process::ExitCode::SUCCESS;
    };
    let grid_name = match session.map.field {
        MapField::Polarity => "polarity",
        MapField::Age => "age",
    };
    match viewer::export::export_all(
        dir,
        &session.active().table,
        &session.map.points,
        &session.map.grid,
        grid_name,
    ) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("[export] {}: {e}", dir.display());
            std::process::ExitCode::FAILURE
        }
    }
}

fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = ViewerArgs::parse();
    let mut session = match Session::new(args.config(), args.map_field()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("[viewer] {e}");
            return std::process::ExitCode::FAILURE;
        }
    };
    if args.export.is_some() {
        return run_export(&args, &session);
    }

    let event_loop = EventLoop::new().unwrap_or_else(|e| panic!("event loop: {e}"));
    let window_init = WindowBuilder::new()
        .with_title(format!("Magstripe v{}", engine::version()))
        .with_inner_size(PhysicalSize::new(1280u32, 800u32))
        .build(&event_loop)
        .unwrap_or_else(|e| panic!("create window: {e}"));

    // Leak the window to obtain a 'static reference for the surface lifetime without unsafe.
    let window: &'static Window = Box::leak(Box::new(window_init));
    let mut gpu = pollster::block_on(GpuState::new(window));
    let egui_ctx = egui::Context::default();
    let mut egui_state =
        EguiWinitState::new(egui_ctx.clone(), egui::ViewportId::ROOT, &event_loop, None, None);
    let mut egui_renderer = EguiRenderer::new(&gpu.device, gpu.config.format, None, 1);

    let mut ctl = Controls {
        rate: session.config.anomaly.spreading_rate,
        count: session.config.anomaly.num_anomalies,
        field: session.map_field,
        compare: true,
    };

    event_loop
        .run(move |event, elwt| {
            let event = match event {
                Event::AboutToWait => {
                    window.request_redraw();
                    return;
                }
                Event::WindowEvent { event, window_id } if window_id == window.id() => event,
                _ => return,
            };
            let _ = egui_state.on_window_event(window, &event);
            match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(size) => gpu.resize(size),
                WindowEvent::RedrawRequested => {
                    let raw_input = egui_state.take_egui_input(window);
                    let full_output = egui_ctx.run(raw_input, |ctx| {
                        controls_panel(ctx, &mut ctl, &mut session);
                        egui::TopBottomPanel::bottom("map")
                            .resizable(true)
                            .default_height(320.0)
                            .show(ctx, |ui| {
                                ui.label(format!(
                                    "Mirrored {} map, {} flank (ridge axis in red)",
                                    match session.map.field {
                                        MapField::Polarity => "polarity",
                                        MapField::Age => "age",
                                    },
                                    session.config.anomaly.spreading_rate
                                ));
                                viewer::plot_map::ui(ui, &session.map.grid, session.map.field);
                            });
                        egui::CentralPanel::default().show(ctx, |ui| {
                            viewer::plot::ui(ui, &session, ctl.compare);
                        });
                    });

                    for (id, image_delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
                    }
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                    let ppp = window.scale_factor() as f32;
                    let paint_jobs = egui_ctx.tessellate(full_output.shapes, ppp);

                    let frame = match gpu.surface.get_current_texture() {
                        Ok(f) => f,
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu.resize(window.inner_size());
                            return;
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            elwt.exit();
                            return;
                        }
                        Err(wgpu::SurfaceError::Timeout) => return,
                    };
                    let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
                    let mut encoder = gpu
                        .device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("encoder") });
                    let screen_desc = ScreenDescriptor {
                        size_in_pixels: [gpu.config.width, gpu.config.height],
                        pixels_per_point: ppp,
                    };
                    egui_renderer.update_buffers(
                        &gpu.device,
                        &gpu.queue,
                        &mut encoder,
                        &paint_jobs,
                        &screen_desc,
                    );
                    {
                        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                            label: Some("egui pass"),
                            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                view: &view,
                                resolve_target: None,
                                ops: wgpu::Operations {
                                    load: wgpu::LoadOp::Clear(wgpu::Color {
                                        r: 0.96,
                                        g: 0.96,
                                        b: 0.96,
                                        a: 1.0,
                                    }),
                                    store: wgpu::StoreOp::Store,
                                },
                            })],
                            depth_stencil_attachment: None,
                            occlusion_query_set: None,
                            timestamp_writes: None,
                        });
                        egui_renderer.render(&mut rpass, &paint_jobs, &screen_desc);
                    }
                    gpu.queue.submit(std::iter::once(encoder.finish()));
                    frame.present();
                    egui_state.handle_platform_output(window, full_output.platform_output);
                }
                _ => {}
            }
        })
        .unwrap_or_else(|e| panic!("run app: {e}"));
    std::process::ExitCode::SUCCESS
}
