//! vertex layouts shared by vertex attributes and inter-stage varyings
use std::fmt::Display;

use enum_properties::*;
use smallvec::SmallVec;

use crate::{DataType, ScalarKind};

/// byte size of every scalar of a vertex component
pub const SCALAR_SIZE: usize = 4;

pub struct VertexComponentProps {
    /// amount of scalars per vertex
    pub arity: u8,
    pub scalar: ScalarKind,
    /// hlsl semantic name of the component
    pub semantic: &'static str,
    pub name: &'static str,
}

enum_properties! {
    /// the semantic meaning of a per-vertex value.
    ///
    /// arity and scalar type are fixed per component.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum VertexComponent: VertexComponentProps {
        Position {arity: 4, scalar: ScalarKind::Float, semantic: "POSITION", name: "position"},
        Normal   {arity: 3, scalar: ScalarKind::Float, semantic: "NORMAL",   name: "normal"},
        Color    {arity: 4, scalar: ScalarKind::Float, semantic: "COLOR",    name: "color"},
        TexCoord {arity: 2, scalar: ScalarKind::Float, semantic: "TEXCOORD", name: "texcoord"},
        JointIDs {arity: 4, scalar: ScalarKind::Int,   semantic: "JOINTIDS", name: "joint_ids"},
        Weights  {arity: 4, scalar: ScalarKind::Float, semantic: "WEIGHTS",  name: "weights"},
    }
}

impl VertexComponent {
    pub const ALL: [VertexComponent; 6] = [
        VertexComponent::Position,
        VertexComponent::Normal,
        VertexComponent::Color,
        VertexComponent::TexCoord,
        VertexComponent::JointIDs,
        VertexComponent::Weights,
    ];

    /// the type of a value holding this component
    pub fn data_type(self) -> DataType {
        match DataType::vector(self.scalar, self.arity) {
            Some(ty) => ty,
            None => unreachable!("vertex component {self:?} has an arity of {}", self.arity),
        }
    }

    /// byte size of the component within a vertex
    pub fn size(self) -> usize { self.arity as usize * SCALAR_SIZE }
}

impl Display for VertexComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.name) }
}

/// an ordered list of vertex components.
///
/// the order is significant: it defines the slot index of every component
/// and where it is placed in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VertexLayout {
    components: SmallVec<[VertexComponent; 8]>,
}

impl VertexLayout {
    pub fn new() -> Self { Self::default() }

    /// appends `component`, returning its slot index
    pub fn add(&mut self, component: VertexComponent) -> usize {
        self.components.push(component);
        self.components.len() - 1
    }

    pub fn len(&self) -> usize { self.components.len() }

    pub fn is_empty(&self) -> bool { self.components.is_empty() }

    pub fn get(&self, slot: usize) -> Option<VertexComponent> { self.components.get(slot).copied() }

    pub fn components(&self) -> &[VertexComponent] { &self.components }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = VertexComponent> + '_ { self.components.iter().copied() }

    pub fn contains(&self, component: VertexComponent) -> bool { self.components.contains(&component) }

    /// byte size of one vertex
    pub fn stride(&self) -> usize { self.iter().map(VertexComponent::size).sum() }

    /// byte offset of the first occurrence of `component` within a vertex
    pub fn offset_of(&self, component: VertexComponent) -> Option<usize> {
        let slot = self.components.iter().position(|c| *c == component)?;
        Some(self.components[..slot].iter().map(|c| c.size()).sum())
    }

    /// `(slot, byte offset, component)` of every component in order
    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, VertexComponent)> + '_ {
        self.iter().enumerate().scan(0, |offset, (slot, c)| {
            let entry = (slot, *offset, c);
            *offset += c.size();
            Some(entry)
        })
    }
}

impl FromIterator<VertexComponent> for VertexLayout {
    fn from_iter<T: IntoIterator<Item = VertexComponent>>(iter: T) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a VertexLayout {
    type Item = &'a VertexComponent;
    type IntoIter = std::slice::Iter<'a, VertexComponent>;

    fn into_iter(self) -> Self::IntoIter { self.components.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use VertexComponent::*;

    #[test]
    fn component_types() {
        assert_eq!(Position.data_type(), DataType::FVec4);
        assert_eq!(Normal.data_type(), DataType::FVec3);
        assert_eq!(Color.data_type(), DataType::FVec4);
        assert_eq!(TexCoord.data_type(), DataType::FVec2);
        assert_eq!(JointIDs.data_type(), DataType::IVec4);
        assert_eq!(Weights.data_type(), DataType::FVec4);
    }

    #[test]
    fn stride_and_offsets() {
        let layout: VertexLayout = [Position, Normal, TexCoord].into_iter().collect();
        assert_eq!(layout.stride(), 36);
        assert_eq!(layout.offset_of(Position), Some(0));
        assert_eq!(layout.offset_of(Normal), Some(16));
        assert_eq!(layout.offset_of(TexCoord), Some(28));
        assert_eq!(layout.offset_of(Color), None);
        assert!(layout.contains(Normal));
        assert!(!layout.contains(Weights));

        let entries: Vec<_> = layout.entries().collect();
        assert_eq!(entries, vec![(0, 0, Position), (1, 16, Normal), (2, 28, TexCoord)]);
    }

    #[test]
    fn offset_of_first_occurrence() {
        let mut layout = VertexLayout::new();
        assert_eq!(layout.add(TexCoord), 0);
        assert_eq!(layout.add(Color), 1);
        assert_eq!(layout.add(TexCoord), 2);
        assert_eq!(layout.offset_of(TexCoord), Some(0));
        assert_eq!(layout.stride(), 8 + 16 + 8);
    }
}
