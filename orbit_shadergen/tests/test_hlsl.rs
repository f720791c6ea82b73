mod common;
use common::*;
use orbit_shadergen::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn mvp_shader_source() {
    let code = hlsl(&mvp_shader());
    let expected = "\
#define vec2 float2
#define vec3 float3
#define vec4 float4
#define mat4 float4x4
#define ivec2 int2
#define ivec3 int3
#define ivec4 int4

float4 CanonicalScreenPos( float4 p ) { return float4( p.xy, ( p.z + p.w ) * 0.5, p.w ); }

struct VertexData
{
    vec4 attribute_0 : POSITION;
    vec3 attribute_1 : NORMAL;
};

struct PixelData
{
    vec4 position : SV_POSITION;
    vec3 varying_0 : NORMAL;
};

#if defined(VERTEX)
cbuffer VertexUniforms : register( b0 )
{
    mat4 uniform_0;
};

PixelData VSMain( VertexData input )
{
    PixelData output;
    output.varying_0 = input.attribute_1;
    output.position = mul( input.attribute_0, uniform_0 );
    return output;
}
#elif defined(FRAGMENT)
cbuffer PixelUniforms : register( b1 )
{
    vec4 uniform_1;
};

float4 PSMain( PixelData input ) : SV_TARGET
{
    return ( uniform_1 * vec4( input.varying_0, 1.0 ) );
}
#endif
";
    assert_eq!(code, expected);
}

#[test]
fn matrix_products_use_mul() {
    let shader = stages(
        || {
            (
                Attribute::new(VertexComponent::Position),
                Uniform::<Mat4>::new(),
                Uniform::<Mat4>::new(),
            )
        },
        |(pos, view_projection, model)| {
            let mut m = Variable::from(view_projection);
            m *= model;
            let mut p = Variable::from(pos);
            p *= 2.0;
            m * p
        },
        |_| Vec4::splat(1.0),
    );

    let code = hlsl(&shader);
    let expected_body = "\
PixelData VSMain( VertexData input )
{
    PixelData output;
    mat4 local_0 = uniform_0;
    local_0 = mul( uniform_1, local_0 );
    vec4 local_1 = input.attribute_0;
    local_1 *= 2.0;
    output.position = mul( local_1, local_0 );
    return output;
}
";
    assert!(code.contains(expected_body), "{code}");

    // the same program in glsl keeps the operator
    let code = glsl(&shader);
    assert!(code.contains("    local_0 *= uniform_1;\n"), "{code}");
    assert!(code.contains("gl_Position = ( local_0 * local_1 );"), "{code}");
}

#[test]
fn textures_and_screen_position() {
    let shader = stages(
        || {
            (
                Attribute::new(VertexComponent::Position),
                Attribute::new(VertexComponent::TexCoord),
                Varying::new(VertexComponent::TexCoord),
                Sampler::new(),
                Sampler::new(),
            )
        },
        |(pos, uv, v_uv, _, _)| {
            v_uv.set(uv);
            canonical_screen_pos(pos)
        },
        |(_, _, v_uv, _, detail)| detail.sample(v_uv),
    );
    let code = hlsl(&shader);

    assert!(code.contains("Texture2D texture_0 : register( t0 );\nSamplerState sampler_0 : register( s0 );\n"));
    assert!(code.contains("Texture2D texture_1 : register( t1 );\nSamplerState sampler_1 : register( s1 );\n"));
    assert!(code.contains("output.position = CanonicalScreenPos( input.attribute_0 );"));
    assert!(code.contains("return texture_1.Sample( sampler_1, input.varying_0 );"));
    // no uniforms, no constant buffers
    assert!(!code.contains("cbuffer"), "{code}");
}

#[test]
fn repeated_semantics_get_an_index() {
    let shader = stages(
        || {
            (
                Attribute::new(VertexComponent::Position),
                Attribute::new(VertexComponent::TexCoord),
                Attribute::new(VertexComponent::TexCoord),
                Varying::new(VertexComponent::TexCoord),
                Varying::new(VertexComponent::Color),
                Varying::new(VertexComponent::TexCoord),
            )
        },
        |(pos, ..)| Variable::from(pos),
        |_| Vec4::splat(1.0),
    );
    let code = hlsl(&shader);
    let vertex_data = "\
struct VertexData
{
    vec4 attribute_0 : POSITION;
    vec2 attribute_1 : TEXCOORD;
    vec2 attribute_2 : TEXCOORD1;
};
";
    let pixel_data = "\
struct PixelData
{
    vec4 position : SV_POSITION;
    vec2 varying_0 : TEXCOORD;
    vec4 varying_1 : COLOR;
    vec2 varying_2 : TEXCOORD1;
};
";
    assert!(code.contains(vertex_data), "{code}");
    assert!(code.contains(pixel_data), "{code}");
}

#[test]
fn constant_buffer_registers_follow_settings() {
    let settings = Settings {
        vertex_uniforms_register: 3,
        pixel_uniforms_register: 4,
        ..Settings::default()
    };
    let code = mvp_shader().generate_with(&GraphicsApi::Direct3D11, &settings).code;
    assert!(code.contains("cbuffer VertexUniforms : register( b3 )"));
    assert!(code.contains("cbuffer PixelUniforms : register( b4 )"));
}

#[test]
fn varyings_are_read_from_input_in_pixel_stage() {
    let shader = stages(
        || (Attribute::new(VertexComponent::Color), Varying::new(VertexComponent::Color)),
        |(color, v_color)| {
            v_color.swizzle_mut("rgb").set(color.swizzle("bgr"));
            v_color.swizzle_mut("a").set(1.0);
            Vec4::splat(0.0)
        },
        |(_, v_color)| v_color.swizzle("rgba"),
    );
    let code = hlsl(&shader);
    assert!(code.contains("    output.varying_0.rgb = input.attribute_0.bgr;\n    output.varying_0.a = 1.0;\n"));
    assert!(code.contains("return input.varying_0.rgba;"));
}
