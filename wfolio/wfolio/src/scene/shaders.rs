// WGSL for the hero scene. One module, two vertex entry points:
// `vs_wire` draws the icosahedron edges as a line list, `vs_point` expands
// each particle instance into a camera-facing quad (6 vertices).

pub const HERO_SHADER: &str = r#"
struct ObjectUniforms {
    proj: mat4x4<f32>,
    view: mat4x4<f32>,
    model: mat4x4<f32>,
    color: vec4<f32>,
    point_size: f32,
}

@group(0) @binding(0) var<uniform> object: ObjectUniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
}

@vertex
fn vs_wire(@location(0) position: vec3<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = object.proj * object.view * object.model * vec4<f32>(position, 1.0);
    return out;
}

@vertex
fn vs_point(@builtin(vertex_index) corner: u32, @location(0) center: vec3<f32>) -> VertexOutput {
    var offsets = array<vec2<f32>, 6>(
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, -0.5),
        vec2<f32>(0.5, 0.5),
        vec2<f32>(-0.5, 0.5),
    );

    let view_position = object.view * object.model * vec4<f32>(center, 1.0);
    let offset = offsets[corner] * object.point_size;

    var out: VertexOutput;
    out.clip_position = object.proj * (view_position + vec4<f32>(offset, 0.0, 0.0));
    return out;
}

// Surface is composited premultiplied.
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(object.color.rgb * object.color.a, object.color.a);
}
"#;
