//! parsed swizzle selectors (`"xyz"`, `"rgba"`, `"wx"` ...)
use std::{fmt::Display, str::FromStr};

use smallvec::SmallVec;

use crate::{DataType, Error, SwizzleError};

/// the two alphabets a swizzle can be spelled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentSet {
    Xyzw,
    Rgba,
}

impl ComponentSet {
    const fn letters(self) -> [char; 4] {
        match self {
            ComponentSet::Xyzw => ['x', 'y', 'z', 'w'],
            ComponentSet::Rgba => ['r', 'g', 'b', 'a'],
        }
    }

    fn classify(c: char) -> Option<(ComponentSet, u8)> {
        [ComponentSet::Xyzw, ComponentSet::Rgba].into_iter().find_map(|set| {
            set.letters()
                .iter()
                .position(|l| *l == c)
                .map(|i| (set, i as u8))
        })
    }
}

/// a selection of 1 to 4 components of a vector, e.g. `.wzy`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Swizzle {
    set: ComponentSet,
    /// component indices, `0` is `x`/`r`
    components: SmallVec<[u8; 4]>,
}

impl Swizzle {
    /// parses a swizzle for reading. Repeated components (`"xx"`) are allowed.
    pub fn parse(name: &str) -> Result<Swizzle, Error> {
        Self::parse_inner(name).map_err(|reason| Error::Swizzle {
            name: name.to_string(),
            reason,
        })
    }

    /// parses a swizzle that is going to be assigned to.
    /// In addition to [`Swizzle::parse`] every component may only appear once.
    pub fn parse_writable(name: &str) -> Result<Swizzle, Error> {
        let sw = Self::parse(name)?;
        match sw.first_duplicate() {
            Some(c) => Err(Error::Swizzle {
                name: name.to_string(),
                reason: SwizzleError::DuplicateComponent(c),
            }),
            None => Ok(sw),
        }
    }

    fn parse_inner(name: &str) -> Result<Swizzle, SwizzleError> {
        let len = name.chars().count();
        if !(1..=4).contains(&len) {
            return Err(SwizzleError::Length(len));
        }

        let mut set = None;
        let mut components = SmallVec::new();
        for c in name.chars() {
            let (c_set, index) = ComponentSet::classify(c).ok_or(SwizzleError::UnknownComponent(c))?;
            match set {
                Some(s) if s != c_set => return Err(SwizzleError::MixedSets),
                _ => set = Some(c_set),
            }
            components.push(index);
        }

        Ok(Swizzle {
            set: set.unwrap_or(ComponentSet::Xyzw),
            components,
        })
    }

    fn first_duplicate(&self) -> Option<char> {
        let c = &self.components;
        c.iter()
            .enumerate()
            .find(|(i, x)| c[..*i].contains(x))
            .map(|(_, x)| self.letter(*x))
    }

    fn letter(&self, index: u8) -> char { self.set.letters()[index as usize] }

    /// amount of selected components
    pub fn len(&self) -> usize { self.components.len() }

    pub fn components(&self) -> &[u8] { &self.components }

    pub fn component_set(&self) -> ComponentSet { self.set }

    /// whether the swizzle may appear on the left hand side of an assignment
    pub fn is_writable(&self) -> bool { self.first_duplicate().is_none() }

    /// the type of `parent.<self>`.
    ///
    /// the result only depends on the amount of components and whether
    /// `parent` is a float or int vector.
    pub fn result_type(&self, parent: DataType) -> Result<DataType, Error> {
        let err = |reason| Error::Swizzle {
            name: self.to_string(),
            reason,
        };
        let (Some(arity), Some(kind)) = (parent.arity(), parent.scalar_kind()) else {
            return Err(err(SwizzleError::NotAVector(parent)));
        };
        if !parent.is_vector() {
            return Err(err(SwizzleError::NotAVector(parent)));
        }
        if let Some(c) = self.components.iter().find(|c| **c >= arity) {
            return Err(err(SwizzleError::OutOfRange {
                component: self.letter(*c),
                arity,
            }));
        }
        DataType::vector(kind, self.len() as u8).ok_or_else(|| err(SwizzleError::Length(self.len())))
    }
}

impl FromStr for Swizzle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Swizzle::parse(s) }
}

impl Display for Swizzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.components.iter().try_for_each(|c| write!(f, "{}", self.letter(*c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        let sw = Swizzle::parse("wzy").unwrap();
        assert_eq!(sw.components(), &[3, 2, 1]);
        assert_eq!(sw.component_set(), ComponentSet::Xyzw);
        assert_eq!(sw.to_string(), "wzy");

        let sw = Swizzle::parse("bgr").unwrap();
        assert_eq!(sw.components(), &[2, 1, 0]);
        assert_eq!(sw.component_set(), ComponentSet::Rgba);
    }

    #[test]
    fn parse_rejects() {
        let reason = |s: &str| match Swizzle::parse(s) {
            Err(Error::Swizzle { reason, .. }) => reason,
            x => panic!("expected swizzle error, got {x:?}"),
        };
        assert_eq!(reason(""), SwizzleError::Length(0));
        assert_eq!(reason("xyzwx"), SwizzleError::Length(5));
        assert_eq!(reason("xq"), SwizzleError::UnknownComponent('q'));
        assert_eq!(reason("xg"), SwizzleError::MixedSets);
    }

    #[test]
    fn duplicates_are_read_only() {
        assert!(Swizzle::parse("xx").is_ok());
        assert!(!Swizzle::parse("xx").unwrap().is_writable());
        assert_eq!(
            Swizzle::parse_writable("xyx"),
            Err(Error::Swizzle {
                name: "xyx".into(),
                reason: SwizzleError::DuplicateComponent('x')
            })
        );
        assert!(Swizzle::parse_writable("zyx").is_ok());
    }

    #[test]
    fn result_type_checks_parent() {
        let sw = Swizzle::parse("xz").unwrap();
        assert_eq!(sw.result_type(DataType::FVec3), Ok(DataType::FVec2));
        assert_eq!(sw.result_type(DataType::IVec4), Ok(DataType::IVec2));
        assert!(sw.result_type(DataType::FVec2).is_err());
        assert!(sw.result_type(DataType::Float).is_err());
        assert!(sw.result_type(DataType::Mat4).is_err());
    }
}
