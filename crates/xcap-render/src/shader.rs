//! The surface shader program: GLSL sources, location lookup and per-frame
//! uniform upload.

use xcap_core::Result;

use crate::backend::{RenderBackend, UniformValue};
use crate::pipeline::FrameUniforms;

pub const ATTRIB_VERTEX: &str = "vertex";
pub const ATTRIB_NORMAL: &str = "normal";
pub const ATTRIB_TEXCOORD: &str = "textCoord";

pub const UNIFORM_MVP: &str = "ModelViewProjectionMatrix";
pub const UNIFORM_NORMAL_MATRIX: &str = "ModelNormalMatrix";
pub const UNIFORM_LIGHT_POSITION: &str = "lightPosition";
pub const UNIFORM_TEXTURE_UNIT: &str = "tmu";
pub const UNIFORM_ANGLE: &str = "angleInRadians";
pub const UNIFORM_USER_POINT: &str = "userPoint";

/// Default GLSL ES 1.0 vertex stage. Rotates the texture about `userPoint`.
pub const VERTEX_SHADER_SOURCE: &str = r#"
attribute vec3 vertex;
attribute vec3 normal;
attribute vec2 textCoord;
uniform mat4 ModelViewProjectionMatrix;
uniform mat4 ModelNormalMatrix;
uniform float angleInRadians;
uniform vec2 userPoint;
varying vec3 vNormal;
varying vec2 vTextCoord;

void main() {
    vec2 p = textCoord - userPoint;
    float c = cos(angleInRadians);
    float s = sin(angleInRadians);
    vTextCoord = vec2(c * p.x - s * p.y, s * p.x + c * p.y) + userPoint;
    vNormal = normalize((ModelNormalMatrix * vec4(normal, 0.0)).xyz);
    gl_Position = ModelViewProjectionMatrix * vec4(vertex, 1.0);
}
"#;

/// Default GLSL ES 1.0 fragment stage.
pub const FRAGMENT_SHADER_SOURCE: &str = r#"
#ifdef GL_FRAGMENT_PRECISION_HIGH
    precision highp float;
#else
    precision mediump float;
#endif
uniform vec3 lightPosition;
uniform sampler2D tmu;
varying vec3 vNormal;
varying vec2 vTextCoord;

void main() {
    float diffuse = max(dot(normalize(vNormal), normalize(lightPosition)), 0.0);
    vec4 texel = texture2D(tmu, vTextCoord);
    gl_FragColor = vec4(texel.rgb * (0.2 + 0.8 * diffuse), 1.0);
}
"#;

/// A linked program plus the locations of everything the surface feeds it.
#[derive(Debug, Clone)]
pub struct ShaderProgram<B: RenderBackend> {
    pub name: String,
    pub program: B::Program,
    pub attrib_vertex: Option<u32>,
    pub attrib_normal: Option<u32>,
    pub attrib_texcoord: Option<u32>,
    pub model_view_projection: Option<B::UniformLocation>,
    pub normal_matrix: Option<B::UniformLocation>,
    pub light_position: Option<B::UniformLocation>,
    pub texture_unit: Option<B::UniformLocation>,
    pub angle: Option<B::UniformLocation>,
    pub user_point: Option<B::UniformLocation>,
}

impl<B: RenderBackend> ShaderProgram<B> {
    /// Compile, link and look up locations.
    pub fn link(backend: &mut B, name: &str, vertex_source: &str, fragment_source: &str) -> Result<Self> {
        let program = backend.create_program(vertex_source, fragment_source)?;
        let attrib = |n: &str| backend.attribute_location(program, n);
        let uniform = |n: &str| backend.uniform_location(program, n);

        let shader = Self {
            name: name.to_string(),
            program,
            attrib_vertex: attrib(ATTRIB_VERTEX),
            attrib_normal: attrib(ATTRIB_NORMAL),
            attrib_texcoord: attrib(ATTRIB_TEXCOORD),
            model_view_projection: uniform(UNIFORM_MVP),
            normal_matrix: uniform(UNIFORM_NORMAL_MATRIX),
            light_position: uniform(UNIFORM_LIGHT_POSITION),
            texture_unit: uniform(UNIFORM_TEXTURE_UNIT),
            angle: uniform(UNIFORM_ANGLE),
            user_point: uniform(UNIFORM_USER_POINT),
        };
        if shader.attrib_vertex.is_none() {
            log::warn!("program '{name}' has no active '{ATTRIB_VERTEX}' attribute");
        }
        Ok(shader)
    }

    /// Link the built-in surface shaders.
    pub fn surface(backend: &mut B) -> Result<Self> {
        Self::link(backend, "Basic", VERTEX_SHADER_SOURCE, FRAGMENT_SHADER_SOURCE)
    }

    pub fn use_program(&self, backend: &mut B) {
        backend.use_program(self.program);
    }

    /// Upload the per-frame uniforms; inactive uniforms are skipped.
    pub fn apply(&self, backend: &mut B, uniforms: &FrameUniforms) {
        let values = [
            (self.model_view_projection, UniformValue::Mat4(uniforms.model_view_projection)),
            (self.normal_matrix, UniformValue::Mat4(uniforms.normal_matrix)),
            (self.light_position, UniformValue::Vec3(uniforms.light_position)),
            (self.angle, UniformValue::Float(uniforms.angle_radians)),
            (self.user_point, UniformValue::Vec2(uniforms.user_point)),
            (self.texture_unit, UniformValue::Int(uniforms.texture_unit)),
        ];
        for (location, value) in values {
            if let Some(location) = location {
                backend.set_uniform(location, value);
            }
        }
    }
}
