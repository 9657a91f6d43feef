use {
    crate::graphics::vulkan_api::{
        DescriptorSetLayout, Pipeline, PipelineLayout, RenderDevice,
        RenderPass, ShaderModule, VulkanError, IMAGE_FORMAT,
    },
    ash::vk,
    std::sync::Arc,
};

/// Both vertex bindings hold tightly packed vec3 values.
const VERTEX_STRIDE: u32 = 3 * std::mem::size_of::<f32>() as u32;

/// A single color pass which clears the swapchain image and leaves it ready
/// for presentation.
pub unsafe fn create_render_pass(
    render_device: Arc<RenderDevice>,
) -> Result<RenderPass, VulkanError> {
    let attachments = [vk::AttachmentDescription {
        format: IMAGE_FORMAT.format,
        samples: vk::SampleCountFlags::TYPE_1,
        load_op: vk::AttachmentLoadOp::CLEAR,
        store_op: vk::AttachmentStoreOp::STORE,
        stencil_load_op: vk::AttachmentLoadOp::DONT_CARE,
        stencil_store_op: vk::AttachmentStoreOp::DONT_CARE,
        initial_layout: vk::ImageLayout::UNDEFINED,
        final_layout: vk::ImageLayout::PRESENT_SRC_KHR,
        ..Default::default()
    }];
    let color_attachments = [vk::AttachmentReference {
        attachment: 0,
        layout: vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL,
    }];
    let subpasses = [vk::SubpassDescription::default()
        .pipeline_bind_point(vk::PipelineBindPoint::GRAPHICS)
        .color_attachments(&color_attachments)];

    // The acquire semaphore is waited at COLOR_ATTACHMENT_OUTPUT, so the
    // layout transition must not happen before then.
    let dependencies = [vk::SubpassDependency {
        src_subpass: vk::SUBPASS_EXTERNAL,
        dst_subpass: 0,
        src_stage_mask: vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
        dst_stage_mask: vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT,
        src_access_mask: vk::AccessFlags::empty(),
        dst_access_mask: vk::AccessFlags::COLOR_ATTACHMENT_WRITE,
        ..Default::default()
    }];
    let create_info = vk::RenderPassCreateInfo::default()
        .attachments(&attachments)
        .subpasses(&subpasses)
        .dependencies(&dependencies);
    let render_pass = RenderPass::new(render_device, &create_info)?;
    render_pass.set_debug_name("triangle render pass");
    Ok(render_pass)
}

/// One uniform buffer, holding the rotation matrix, for the vertex stage.
pub unsafe fn create_layouts(
    render_device: Arc<RenderDevice>,
) -> Result<(DescriptorSetLayout, PipelineLayout), VulkanError> {
    let descriptor_set_layout = DescriptorSetLayout::new(
        render_device.clone(),
        &[vk::DescriptorSetLayoutBinding {
            binding: 0,
            descriptor_type: vk::DescriptorType::UNIFORM_BUFFER,
            descriptor_count: 1,
            stage_flags: vk::ShaderStageFlags::VERTEX,
            ..Default::default()
        }],
    )?;
    descriptor_set_layout.set_debug_name("triangle descriptor set layout");
    let pipeline_layout =
        PipelineLayout::new(render_device, &[&descriptor_set_layout])?;
    pipeline_layout.set_debug_name("triangle pipeline layout");
    Ok((descriptor_set_layout, pipeline_layout))
}

/// Create the graphics pipeline for the triangle.
///
/// Positions and colors come from separate vertex bindings. The viewport
/// and scissor are dynamic so the pipeline survives swapchain rebuilds.
pub unsafe fn create_pipeline(
    render_device: Arc<RenderDevice>,
    vertex_source: &[u8],
    fragment_source: &[u8],
    layout: &PipelineLayout,
    render_pass: &RenderPass,
) -> Result<Pipeline, VulkanError> {
    let vertex_shader_module =
        ShaderModule::from_spirv_bytes(render_device.clone(), vertex_source)?;
    vertex_shader_module.set_debug_name("triangle vertex shader");
    let fragment_shader_module =
        ShaderModule::from_spirv_bytes(render_device.clone(), fragment_source)?;
    fragment_shader_module.set_debug_name("triangle fragment shader");

    let shader_entry_name = c"main";
    let stages = [
        vk::PipelineShaderStageCreateInfo::default()
            .stage(vk::ShaderStageFlags::VERTEX)
            .module(vertex_shader_module.raw())
            .name(shader_entry_name),
        vk::PipelineShaderStageCreateInfo::default()
            .stage(vk::ShaderStageFlags::FRAGMENT)
            .module(fragment_shader_module.raw())
            .name(shader_entry_name),
    ];

    let vertex_bindings = [
        vk::VertexInputBindingDescription {
            binding: 0,
            stride: VERTEX_STRIDE,
            input_rate: vk::VertexInputRate::VERTEX,
        },
        vk::VertexInputBindingDescription {
            binding: 1,
            stride: VERTEX_STRIDE,
            input_rate: vk::VertexInputRate::VERTEX,
        },
    ];
    let vertex_attributes = [
        vk::VertexInputAttributeDescription {
            location: 0,
            binding: 0,
            format: vk::Format::R32G32B32_SFLOAT,
            offset: 0,
        },
        vk::VertexInputAttributeDescription {
            location: 1,
            binding: 1,
            format: vk::Format::R32G32B32_SFLOAT,
            offset: 0,
        },
    ];
    let vertex_input_state = vk::PipelineVertexInputStateCreateInfo::default()
        .vertex_binding_descriptions(&vertex_bindings)
        .vertex_attribute_descriptions(&vertex_attributes);
    let input_assembly = vk::PipelineInputAssemblyStateCreateInfo {
        topology: vk::PrimitiveTopology::TRIANGLE_LIST,
        primitive_restart_enable: vk::FALSE,
        ..Default::default()
    };
    let rasterization_state = vk::PipelineRasterizationStateCreateInfo {
        depth_clamp_enable: vk::FALSE,
        rasterizer_discard_enable: vk::FALSE,
        polygon_mode: vk::PolygonMode::FILL,
        cull_mode: vk::CullModeFlags::NONE,
        front_face: vk::FrontFace::CLOCKWISE,
        line_width: 1.0,
        ..Default::default()
    };
    let multisample_state = vk::PipelineMultisampleStateCreateInfo {
        rasterization_samples: vk::SampleCountFlags::TYPE_1,
        sample_shading_enable: vk::FALSE,
        ..Default::default()
    };
    let color_blend_attachment_states =
        [vk::PipelineColorBlendAttachmentState {
            color_write_mask: vk::ColorComponentFlags::RGBA,
            blend_enable: vk::FALSE,
            ..Default::default()
        }];
    let color_blend_state = vk::PipelineColorBlendStateCreateInfo::default()
        .attachments(&color_blend_attachment_states);
    let viewport_state = vk::PipelineViewportStateCreateInfo::default()
        .viewport_count(1)
        .scissor_count(1);
    let dynamic_states =
        [vk::DynamicState::VIEWPORT, vk::DynamicState::SCISSOR];
    let dynamic_state = vk::PipelineDynamicStateCreateInfo::default()
        .dynamic_states(&dynamic_states);

    let create_info = vk::GraphicsPipelineCreateInfo::default()
        .stages(&stages)
        .vertex_input_state(&vertex_input_state)
        .input_assembly_state(&input_assembly)
        .rasterization_state(&rasterization_state)
        .multisample_state(&multisample_state)
        .color_blend_state(&color_blend_state)
        .viewport_state(&viewport_state)
        .dynamic_state(&dynamic_state)
        .layout(layout.raw())
        .render_pass(render_pass.raw())
        .subpass(0);
    let pipeline = Pipeline::new_graphics_pipeline(render_device, &create_info)?;
    pipeline.set_debug_name("triangle pipeline");
    Ok(pipeline)
}
