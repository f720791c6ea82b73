//! prints the generated source of a few shaders for every graphics api.
//!
//! `RUST_LOG=orbit_shadergen=trace cargo run -p print_shaders` also shows
//! every recorded statement.
use orbit_shadergen::prelude::*;
use tracing_subscriber::EnvFilter;

/// a textured mesh lit by a single directional light
struct TexturedLit {
    position: Attribute,
    normal: Attribute,
    uv: Attribute,
    v_normal: Varying,
    v_uv: Varying,
    model: Uniform<Mat4>,
    view_projection: Uniform<Mat4>,
    light_dir: Uniform<Vec3>,
    albedo: Sampler,
}

impl ShaderProgram for TexturedLit {
    fn vs_main(&self) -> Variable {
        let world_normal = &self.model * Vec4::compose([Variable::from(&self.normal), Variable::float(0.0)]);
        self.v_normal.set(world_normal.swizzle("xyz"));
        self.v_uv.set(&self.uv);

        let mut world_pos = &self.model * &self.position;
        world_pos.store_value();
        canonical_screen_pos(&self.view_projection * world_pos)
    }

    fn ps_main(&self) -> Variable {
        let n = normalize(&self.v_normal);
        let diffuse = dot(n, -&self.light_dir);
        let mut color = self.albedo.sample(&self.v_uv);
        color.store_value();
        let shaded = color.swizzle("rgb") * (diffuse * 0.8 + 0.2);
        color.swizzle_mut("rgb").set(shaded);
        color
    }
}

/// linear blend skinning with up to four joints per vertex
struct Skinned {
    position: Attribute,
    joints: Attribute,
    weights: Attribute,
    color: Varying,
    view_projection: Uniform<Mat4>,
    joint_matrices: UniformArray<Mat4, 64>,
    tint: Uniform<Vec4>,
}

impl ShaderProgram for Skinned {
    fn vs_main(&self) -> Variable {
        let mut skinned = Variable::new();
        for (i, c) in ["x", "y", "z", "w"].into_iter().enumerate() {
            let joint = self.joint_matrices.at(self.joints.swizzle(c));
            let contribution = joint * &self.position * self.weights.swizzle(c);
            match i {
                0 => skinned.set(contribution),
                _ => skinned += contribution,
            }
        }
        self.color.set(&self.weights);
        &self.view_projection * skinned
    }

    fn ps_main(&self) -> Variable { &self.tint * &self.color }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let lit = Shader::new(|| TexturedLit {
        position: Attribute::new(VertexComponent::Position),
        normal: Attribute::new(VertexComponent::Normal),
        uv: Attribute::new(VertexComponent::TexCoord),
        v_normal: Varying::new(VertexComponent::Normal),
        v_uv: Varying::new(VertexComponent::TexCoord),
        model: Uniform::new(),
        view_projection: Uniform::new(),
        light_dir: Uniform::new(),
        albedo: Sampler::new(),
    });

    let skinned = Shader::new(|| Skinned {
        position: Attribute::new(VertexComponent::Position),
        joints: Attribute::new(VertexComponent::JointIDs),
        weights: Attribute::new(VertexComponent::Weights),
        color: Varying::new(VertexComponent::Color),
        view_projection: Uniform::new(),
        joint_matrices: UniformArray::new(),
        tint: Uniform::new(),
    });

    let settings = Settings {
        emit_glsl_preamble: true,
        ..Settings::default()
    };

    for api in [GraphicsApi::OpenGL, GraphicsApi::Direct3D11, GraphicsApi::Vulkan] {
        for (name, generated) in [
            ("textured lit", lit.generate_with(&api, &settings)),
            ("skinned", skinned.generate_with(&api, &settings)),
        ] {
            println!("// ---- {name} ({api}), vertex stride {} bytes", generated.vertex_layout.stride());
            println!("{generated}");
        }
    }
}
