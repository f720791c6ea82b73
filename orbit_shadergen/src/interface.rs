use crate::{Binding, DataType, VertexComponent, VertexLayout};

/// a uniform declared by a shader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformSlot {
    pub index: u32,
    /// element type for uniform arrays
    pub data_type: DataType,
    pub array_len: Option<usize>,
}

impl UniformSlot {
    pub fn binding(&self) -> Binding { Binding::Uniform(self.index) }
}

/// everything a shader declared while it was constructed, in declaration order.
///
/// indices are assigned per table in registration order and never reused,
/// regardless of which stage uses the declared value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interface {
    attributes: VertexLayout,
    varyings: VertexLayout,
    uniforms: Vec<UniformSlot>,
    sampler_count: u32,
}

impl Interface {
    /// per-vertex inputs, the layout vertex buffers have to match
    pub fn attributes(&self) -> &VertexLayout { &self.attributes }

    /// values passed from the vertex to the fragment stage
    pub fn varyings(&self) -> &VertexLayout { &self.varyings }

    pub fn uniforms(&self) -> &[UniformSlot] { &self.uniforms }

    pub fn sampler_count(&self) -> u32 { self.sampler_count }

    pub(crate) fn add_attribute(&mut self, component: VertexComponent) -> u32 {
        self.attributes.add(component) as u32
    }

    pub(crate) fn add_varying(&mut self, component: VertexComponent) -> u32 { self.varyings.add(component) as u32 }

    pub(crate) fn add_uniform(&mut self, data_type: DataType, array_len: Option<usize>) -> u32 {
        let index = self.uniforms.len() as u32;
        self.uniforms.push(UniformSlot {
            index,
            data_type,
            array_len,
        });
        index
    }

    pub(crate) fn add_sampler(&mut self) -> u32 {
        let index = self.sampler_count;
        self.sampler_count += 1;
        index
    }
}
