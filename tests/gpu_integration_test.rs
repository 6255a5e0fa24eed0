#[cfg(feature = "integration-tests")]
mod common;

#[cfg(feature = "integration-tests")]
fn context() -> still_life::context::Context {
    still_life::context::Context::headless_blocking().expect("no wgpu adapter available")
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_upload_bind_and_release_textures() {
    use crate::common::test_utils::{init_logger, png_bytes};
    use still_life::registry::texture::TextureRegistry;

    init_logger();
    let ctx = context();
    let mut backend = ctx.textures();
    let mut registry = TextureRegistry::new();

    registry
        .register_bytes(&mut backend, "granite", &png_bytes(8, 4, 3))
        .unwrap();
    registry
        .register_bytes(&mut backend, "lemon_skin", &png_bytes(2, 2, 4))
        .unwrap();
    registry.bind_all(&mut backend);

    assert_eq!(registry.find_handle("granite").unwrap().mip_level_count(), 4);
    assert!(backend.is_bound(0));
    assert!(backend.is_bound(1));
    assert_eq!(backend.bound_slots(), 2);
    let _group = backend.bind_group();

    registry.release_all(&mut backend);

    assert_eq!(backend.bound_slots(), 0);
    assert!(registry.is_empty());
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_stage_one_uniform_block_per_draw() {
    use crate::common::test_utils::{RecordingMeshes, gold, rgb_image};
    use still_life::{
        mesh::Primitive,
        registry::{material::MaterialRegistry, texture::TextureRegistry},
        shader::{DrawId, ShaderPusher},
    };

    let ctx = context();
    let mut backend = ctx.textures();
    let mut textures = TextureRegistry::new();
    textures
        .register_image(&mut backend, "granite", &rgb_image(4, 4))
        .unwrap();
    let mut materials = MaterialRegistry::new();
    materials.add("gold", gold()).unwrap();
    let mut sink = ctx.uniform_sink(1);
    let mut meshes = RecordingMeshes::default();

    {
        let mut pusher = ShaderPusher::new(Some(&mut sink), &textures, &materials);
        pusher.set_texture("granite");
        pusher.draw(&mut meshes, Primitive::Plane);
        pusher.set_color(1.0, 0.0, 0.0, 1.0);
        pusher.set_material("gold");
        pusher.draw(&mut meshes, Primitive::Sphere);
        pusher.set_texture("marble");
        pusher.draw(&mut meshes, Primitive::Box);
    }

    let staged = sink.staged();
    assert_eq!(staged.len(), 3);
    assert_eq!((staged[0].use_texture, staged[0].texture_slot), (1, 0));
    assert_eq!(staged[1].use_texture, 0);
    assert_eq!(staged[1].color, [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(staged[1].material.shininess, 60.0);
    assert_eq!((staged[2].use_texture, staged[2].texture_slot), (1, -1));
    assert_eq!(sink.dynamic_offset(DrawId(2)) as u64, 2 * sink.stride());
    assert_eq!(sink.stride() % 256, 0);

    sink.upload(&ctx.queue);
    assert!(sink.capacity() >= 3);

    sink.begin_frame();
    assert!(sink.staged().is_empty());
    // Pending state carries over into the next frame.
    assert_eq!(sink.current().texture_slot, -1);
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_record_scene_pass_with_depth_attachment() {
    use still_life::{
        data_structures::texture::Texture,
        shader::{DrawId, ShaderSink},
    };

    let ctx = context();
    let textures = ctx.textures();
    let mut sink = ctx.uniform_sink(16);
    let pipeline = ctx.scene_pipeline(Texture::COLOR_FORMAT, &sink, &textures);
    let texture_group = textures.bind_group();
    let depth = ctx.depth_texture(64, 32);
    assert_eq!(depth.texture.format(), Texture::DEPTH_FORMAT);
    assert_eq!((depth.texture.width(), depth.texture.height()), (64, 32));
    let target = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("scene pass target"),
        size: wgpu::Extent3d {
            width: 64,
            height: 32,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: Texture::COLOR_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());
    let draw = sink.commit();
    sink.upload(&ctx.queue);

    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene pass encoder"),
        });
    {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &target_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            multiview_mask: None,
            timestamp_writes: None,
        });
        pass.set_pipeline(&pipeline);
        pass.set_bind_group(0, sink.frame_bind_group(), &[]);
        pass.set_bind_group(1, sink.object_bind_group(), &[sink.dynamic_offset(draw)]);
        pass.set_bind_group(2, &texture_group, &[]);
    }
    ctx.queue.submit(Some(encoder.finish()));

    assert_eq!(draw, DrawId(0));
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_upload_only_the_current_light_rig() {
    use still_life::{
        data_structures::{
            light::{LightSource, Lighting, MAX_LIGHTS},
            texture::Texture,
        },
        registry::{material::MaterialRegistry, texture::TextureRegistry},
        shader::ShaderPusher,
    };

    let ctx = context();
    let textures = TextureRegistry::<Texture>::new();
    let materials = MaterialRegistry::new();
    let mut full = Lighting::new();
    for _ in 0..MAX_LIGHTS {
        full.add(LightSource::default()).unwrap();
    }
    let mut single = Lighting::new();
    single.add(LightSource::default()).unwrap();

    let mut sink = ctx.uniform_sink(1);
    {
        let mut pusher = ShaderPusher::new(Some(&mut sink), &textures, &materials);
        pusher.set_lights(&full);
        pusher.set_lights(&single);
    }
    assert_eq!(sink.frame().light_count, 1);
    assert_eq!(sink.frame().use_lighting, 1);

    let mut unlit = ctx.uniform_sink(1);
    {
        let mut pusher = ShaderPusher::new(Some(&mut unlit), &textures, &materials);
        pusher.set_lights(&Lighting::new());
    }
    assert_eq!(unlit.frame().light_count, 0);
    assert_eq!(unlit.frame().use_lighting, 0);
    unlit.upload(&ctx.queue);
}
