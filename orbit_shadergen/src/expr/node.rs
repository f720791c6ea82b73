use std::{fmt::Display, rc::Rc};

use enum_properties::*;
use smallvec::SmallVec;

use super::*;

/// an interface value of the shader that is declared once and referenced by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Binding {
    Attribute(u32),
    Varying(u32),
    Uniform(u32),
    Sampler(u32),
}

impl Binding {
    /// the raw identifier of the binding, e.g. `uniform_3`
    pub fn ident(&self) -> String {
        match self {
            Binding::Attribute(i) => format!("attribute_{i}"),
            Binding::Varying(i) => format!("varying_{i}"),
            Binding::Uniform(i) => format!("uniform_{i}"),
            Binding::Sampler(i) => format!("sampler_{i}"),
        }
    }
}

impl Display for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.ident()) }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    Float(f64),
    Int(i32),
}

pub struct OperatorProps {
    pub argc: usize,
    pub symbol: &'static str,
}

enum_properties! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Operator: OperatorProps {
        Negative {argc: 1, symbol: "-"},
        Add      {argc: 2, symbol: "+"},
        Sub      {argc: 2, symbol: "-"},
        Mul      {argc: 2, symbol: "*"},
        Div      {argc: 2, symbol: "/"},
    }
}

pub struct AssignOpProps {
    pub symbol: &'static str,
    /// the operator whose result is stored, `None` for plain assignment
    pub operator: Option<Operator>,
}

enum_properties! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum AssignOp: AssignOpProps {
        Assign    {symbol: "=",  operator: None},
        AddAssign {symbol: "+=", operator: Some(Operator::Add)},
        SubAssign {symbol: "-=", operator: Some(Operator::Sub)},
        MulAssign {symbol: "*=", operator: Some(Operator::Mul)},
        DivAssign {symbol: "/=", operator: Some(Operator::Div)},
    }
}

pub struct BuiltinProps {
    pub argc: usize,
    /// function name in both languages, unused by builtins
    /// that are lowered differently per language
    pub name: &'static str,
}

enum_properties! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Builtin: BuiltinProps {
        Transpose          {argc: 1, name: "transpose"},
        Dot                {argc: 2, name: "dot"},
        Normalize          {argc: 1, name: "normalize"},
        Cos                {argc: 1, name: "cos"},
        Sin                {argc: 1, name: "sin"},
        Sample             {argc: 2, name: "texture"},
        CanonicalScreenPos {argc: 1, name: "CanonicalScreenPos"},
    }
}

pub type Args<const N: usize> = SmallVec<[Rc<Node>; N]>;

/// a node of the expression tree that a [`Variable`](crate::Variable) wraps.
///
/// nodes are immutable and shared between all variables that were derived
/// from them. They are turned into text by the backend that is currently
/// emitting, so the same tree can be lowered to glsl and hlsl.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    /// the value of a default constructed variable
    #[default]
    Empty,
    Literal(Literal),
    /// a named local variable of the stage's main function, `local_N`
    Local(u32),
    /// expression text written as is in every language
    Raw(String),
    Binding(Binding),
    Operator {
        op: Operator,
        args: Args<2>,
        /// whether any operand is a matrix, which changes how hlsl spells `*`
        matrix: bool,
    },
    Swizzle(Swizzle, Rc<Node>),
    Subscript(Rc<Node>, Rc<Node>),
    Builtin(Builtin, Args<2>),
    Construct(DataType, Args<4>),
}

impl Node {
    /// calls `f` for every binding referenced within this tree
    pub fn visit_bindings(&self, f: &mut impl FnMut(Binding)) {
        match self {
            Node::Empty | Node::Literal(_) | Node::Local(_) | Node::Raw(_) => (),
            Node::Binding(b) => f(*b),
            Node::Operator { args, .. } | Node::Builtin(_, args) => args.iter().for_each(|a| a.visit_bindings(f)),
            Node::Construct(_, args) => args.iter().for_each(|a| a.visit_bindings(f)),
            Node::Swizzle(_, a) => a.visit_bindings(f),
            Node::Subscript(a, i) => {
                a.visit_bindings(f);
                i.visit_bindings(f);
            }
        }
    }
}
