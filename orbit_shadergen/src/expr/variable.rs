use std::{marker::PhantomData, rc::Rc};

use smallvec::smallvec;

use super::*;
use crate::{
    Language, ShaderKind,
    backend::render::{self, Target},
    context::session::with_session,
    error::{Error, OrFail, fail},
};

/// one value of a shader's data flow.
///
/// a `Variable` does not compute anything, it describes how its value is
/// computed in the generated shader. Arithmetic operators produce new
/// variables that wrap a larger expression, while assignments
/// ([`Variable::set`], `+=`, `*=`, ...) record statements into the shader
/// stage that is currently being emitted.
///
/// a variable is *stored* once it has a stable name in the generated code
/// (a local variable or an interface binding). Mutating a variable that is
/// not stored yet first stores it, see [`Variable::store_value`].
///
/// cloning a variable creates a new value that shares the expression but
/// not the name, mutating the clone never affects the original.
#[derive(Debug, Default)]
pub struct Variable {
    node: Rc<Node>,
    ty: DataType,
    stored: bool,
}

impl Clone for Variable {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            ty: self.ty,
            stored: false,
        }
    }
}

impl Variable {
    /// an empty variable. Assigning to it defines it with the assigned type.
    pub fn new() -> Self { Self::default() }

    /// a floating point literal. Subnormal values are flushed to zero.
    #[track_caller]
    pub fn float(x: f64) -> Self {
        use std::num::FpCategory::*;
        let x = match x.classify() {
            Normal | Zero => x,
            Subnormal => 0.0_f64.copysign(x),
            cat => fail(Error::UnsupportedFloatingPointCategory(cat)),
        };
        Self::from_node(Node::Literal(Literal::Float(x)), DataType::Float)
    }

    /// an integer literal
    pub fn int(x: i32) -> Self { Self::from_node(Node::Literal(Literal::Int(x)), DataType::Int) }

    /// a value of type `ty` spelled by `text`, which is written into the
    /// generated code unchanged.
    ///
    /// `stored` marks `text` as a name that can be assigned to, such as a
    /// builtin output. Otherwise mutating the variable first copies `text`
    /// into a local, see [`Variable::store_value`].
    #[track_caller]
    pub fn expression(text: impl Into<String>, ty: DataType, stored: bool) -> Self {
        if ty == DataType::Unknown {
            fail(Error::InvalidArgument {
                function: "Variable::expression",
                found: ty,
            })
        }
        Self {
            node: Rc::new(Node::Raw(text.into())),
            ty,
            stored,
        }
    }

    pub(crate) fn from_node(node: Node, ty: DataType) -> Self {
        Self {
            node: Rc::new(node),
            ty,
            stored: false,
        }
    }

    /// a variable that refers to an interface binding by name
    pub(crate) fn bound(binding: Binding, ty: DataType) -> Self {
        Self {
            node: Rc::new(Node::Binding(binding)),
            ty,
            stored: true,
        }
    }

    pub(crate) fn node(&self) -> &Rc<Node> { &self.node }

    pub fn data_type(&self) -> DataType { self.ty }

    /// whether the variable has a stable name in the generated code
    pub fn is_stored(&self) -> bool { self.stored }

    /// whether the variable was default constructed and never assigned
    pub fn is_empty(&self) -> bool { matches!(*self.node, Node::Empty) }

    /// the expression text of this variable in the stage that is currently
    /// being emitted.
    ///
    /// Interface values are spelled differently depending on the language and
    /// stage (`input.attribute_0` in an hlsl vertex shader, `attribute_0` in glsl).
    #[track_caller]
    pub fn value(&self) -> String { with_session("Variable::value", |s| s.render(&self.node)) }

    /// the expression text of this variable as it would be written in
    /// `language` within a `kind` shader, without requiring an active emission.
    #[track_caller]
    pub fn to_code(&self, language: Language, kind: ShaderKind) -> String {
        render::write_node(&self.node, Target { language, kind })
    }

    /// declares a new uninitialized local variable of type `ty`
    #[track_caller]
    pub fn local(ty: DataType) -> Variable {
        if !ty.is_numeric() {
            fail(Error::InvalidArgument {
                function: "Variable::local",
                found: ty,
            })
        }
        let local = with_session("Variable::local", |s| {
            let local = s.allocate_local();
            s.record_definition(ty, local, None);
            local
        });
        Variable {
            node: Rc::new(Node::Local(local)),
            ty,
            stored: true,
        }
    }

    /// gives the value a stable name by defining a local variable initialized
    /// with the current expression. The variable then refers to that local.
    ///
    /// does nothing if the variable is already stored.
    #[track_caller]
    pub fn store_value(&mut self) {
        if self.stored {
            return;
        }
        if self.is_empty() {
            fail(Error::Uninitialized)
        }
        if !self.ty.is_numeric() {
            fail(Error::InvalidArgument {
                function: "Variable::store_value",
                found: self.ty,
            })
        }
        let local = with_session("Variable::store_value", |s| {
            let local = s.allocate_local();
            s.record_definition(self.ty, local, Some(&self.node));
            local
        });
        self.node = Rc::new(Node::Local(local));
        self.stored = true;
    }

    /// `self = rhs;`
    ///
    /// both sides must have the same type, unless `self` is empty, in which
    /// case it is defined as a new local variable holding `rhs`.
    #[track_caller]
    pub fn set(&mut self, rhs: impl Into<Variable>) {
        let rhs = rhs.into();
        if rhs.is_empty() {
            fail(Error::Uninitialized)
        }
        if self.is_empty() {
            *self = rhs;
            self.stored = false;
            self.store_value();
            return;
        }
        self.assign(AssignOp::Assign, rhs)
    }

    #[track_caller]
    fn assign(&mut self, op: AssignOp, rhs: Variable) {
        if self.is_empty() {
            fail(Error::Uninitialized)
        }
        check_assignment(self.ty, op, &rhs).or_fail();
        self.store_value();
        record_assignment(self, op, &rhs);
    }

    /// reads a swizzle of this vector, e.g. `v.swizzle("zyx")`.
    ///
    /// the result is a scalar or vector with as many components as the
    /// swizzle has letters. Letters may repeat.
    #[track_caller]
    pub fn swizzle(&self, name: &str) -> Variable {
        let sw = Swizzle::parse(name).or_fail();
        let ty = sw.result_type(self.ty).or_fail();
        Variable::from_node(Node::Swizzle(sw, self.node.clone()), ty)
    }

    /// a writable swizzle of this vector: `v.swizzle_mut("xy").set(uv)`.
    ///
    /// letters may not repeat. `self` is stored before the swizzle is
    /// returned, so the assignment only overwrites part of a named value.
    #[track_caller]
    pub fn swizzle_mut(&mut self, name: &str) -> SwizzleMut<'_> {
        let sw = Swizzle::parse_writable(name).or_fail();
        let ty = sw.result_type(self.ty).or_fail();
        self.store_value();
        SwizzleMut::new(self, sw, ty)
    }

    /// `self[index]`. Vectors yield a scalar, matrices yield a `vec4`.
    #[track_caller]
    pub fn at(&self, index: impl Into<Variable>) -> Variable {
        let index = index.into();
        let ty = self.ty.element().or_fail();
        subscript(self, index, ty)
    }
}

#[track_caller]
pub(crate) fn subscript(base: &Variable, index: Variable, element: DataType) -> Variable {
    if index.ty != DataType::Int {
        fail(Error::InvalidOperands {
            op: "[]",
            lhs: base.ty,
            rhs: index.ty,
        })
    }
    Variable::from_node(Node::Subscript(base.node.clone(), index.node), element)
}

fn operator_result_type(op: Operator, lhs: DataType, rhs: DataType) -> Result<DataType, Error> {
    match op {
        Operator::Add | Operator::Sub => DataType::sum(op.symbol, lhs, rhs),
        Operator::Mul => DataType::product(lhs, rhs),
        Operator::Div => DataType::quotient(lhs, rhs),
        Operator::Negative => Err(Error::InvalidOperands { op: "-", lhs, rhs }),
    }
}

/// checks that `target <op> rhs;` keeps the target's type
pub(crate) fn check_assignment(target: DataType, op: AssignOp, rhs: &Variable) -> Result<(), Error> {
    if rhs.is_empty() {
        return Err(Error::Uninitialized);
    }
    let result = match op.operator {
        None => rhs.ty,
        Some(o) => operator_result_type(o, target, rhs.ty)?,
    };
    match result == target {
        true => Ok(()),
        false => Err(Error::TypeMismatch(format!(
            "cannot assign a value of type `{}` with `{}` to a variable of type `{target}`",
            rhs.ty, op.symbol
        ))),
    }
}

/// records `target <op> rhs;`, `target` must already be stored
#[track_caller]
pub(crate) fn record_assignment(target: &Variable, op: AssignOp, rhs: &Variable) {
    debug_assert!(target.stored, "assignment target without a name");
    let matrix = target.ty == DataType::Mat4 || rhs.ty == DataType::Mat4;
    with_session("assignment", |s| s.record_assignment(&target.node, op, &rhs.node, matrix))
}

#[track_caller]
pub(crate) fn binary(op: Operator, lhs: Variable, rhs: Variable) -> Variable {
    debug_assert_eq!(op.argc, 2);
    let ty = operator_result_type(op, lhs.ty, rhs.ty).or_fail();
    let matrix = lhs.ty == DataType::Mat4 || rhs.ty == DataType::Mat4;
    Variable::from_node(
        Node::Operator {
            op,
            args: smallvec![lhs.node, rhs.node],
            matrix,
        },
        ty,
    )
}

#[track_caller]
pub(crate) fn negate(x: Variable) -> Variable {
    if !x.ty.is_numeric() {
        fail(Error::InvalidArgument {
            function: "-",
            found: x.ty,
        })
    }
    debug_assert_eq!(Operator::Negative.argc, 1);
    let ty = x.ty;
    Variable::from_node(
        Node::Operator {
            op: Operator::Negative,
            args: smallvec![x.node],
            matrix: false,
        },
        ty,
    )
}

/// writable swizzle of a stored vector, see [`Variable::swizzle_mut`]
pub struct SwizzleMut<'a> {
    target: Variable,
    phantom: PhantomData<&'a Variable>,
}

impl<'a> SwizzleMut<'a> {
    /// `parent` must be stored
    pub(crate) fn new(parent: &'a Variable, swizzle: Swizzle, ty: DataType) -> Self {
        debug_assert!(parent.stored);
        Self {
            target: Variable {
                node: Rc::new(Node::Swizzle(swizzle, parent.node.clone())),
                ty,
                stored: true,
            },
            phantom: PhantomData,
        }
    }

    /// `parent.swizzle = rhs;`
    #[track_caller]
    pub fn set(self, rhs: impl Into<Variable>) { self.apply(AssignOp::Assign, rhs.into()) }

    /// reads the current value of the swizzled components
    pub fn get(&self) -> Variable { self.target.clone() }

    #[track_caller]
    fn apply(&self, op: AssignOp, rhs: Variable) {
        check_assignment(self.target.ty, op, &rhs).or_fail();
        record_assignment(&self.target, op, &rhs);
    }
}

impl From<f64> for Variable {
    #[track_caller]
    fn from(x: f64) -> Self { Variable::float(x) }
}

impl From<i32> for Variable {
    fn from(x: i32) -> Self { Variable::int(x) }
}

impl From<&Variable> for Variable {
    fn from(x: &Variable) -> Self { x.clone() }
}

macro_rules! impl_binary_operators {
    ($($Trait: ident $method: ident $op: ident;)*) => {$(
        impl<R: Into<Variable>> std::ops::$Trait<R> for Variable {
            type Output = Variable;
            #[track_caller]
            fn $method(self, rhs: R) -> Variable { binary(Operator::$op, self, rhs.into()) }
        }

        impl<R: Into<Variable>> std::ops::$Trait<R> for &Variable {
            type Output = Variable;
            #[track_caller]
            fn $method(self, rhs: R) -> Variable { binary(Operator::$op, self.clone(), rhs.into()) }
        }

        impl std::ops::$Trait<Variable> for f64 {
            type Output = Variable;
            #[track_caller]
            fn $method(self, rhs: Variable) -> Variable { binary(Operator::$op, self.into(), rhs) }
        }

        impl std::ops::$Trait<&Variable> for f64 {
            type Output = Variable;
            #[track_caller]
            fn $method(self, rhs: &Variable) -> Variable { binary(Operator::$op, self.into(), rhs.clone()) }
        }

        impl std::ops::$Trait<Variable> for i32 {
            type Output = Variable;
            #[track_caller]
            fn $method(self, rhs: Variable) -> Variable { binary(Operator::$op, self.into(), rhs) }
        }

        impl std::ops::$Trait<&Variable> for i32 {
            type Output = Variable;
            #[track_caller]
            fn $method(self, rhs: &Variable) -> Variable { binary(Operator::$op, self.into(), rhs.clone()) }
        }
    )*};
}

impl_binary_operators! {
    Add add Add;
    Sub sub Sub;
    Mul mul Mul;
    Div div Div;
}

macro_rules! impl_assign_operators {
    ($($Trait: ident $method: ident $op: ident;)*) => {$(
        impl<R: Into<Variable>> std::ops::$Trait<R> for Variable {
            #[track_caller]
            fn $method(&mut self, rhs: R) { self.assign(AssignOp::$op, rhs.into()) }
        }

        impl<R: Into<Variable>> std::ops::$Trait<R> for SwizzleMut<'_> {
            #[track_caller]
            fn $method(&mut self, rhs: R) { self.apply(AssignOp::$op, rhs.into()) }
        }
    )*};
}

impl_assign_operators! {
    AddAssign add_assign AddAssign;
    SubAssign sub_assign SubAssign;
    MulAssign mul_assign MulAssign;
    DivAssign div_assign DivAssign;
}

impl std::ops::Neg for Variable {
    type Output = Variable;
    #[track_caller]
    fn neg(self) -> Variable { negate(self) }
}

impl std::ops::Neg for &Variable {
    type Output = Variable;
    #[track_caller]
    fn neg(self) -> Variable { negate(self.clone()) }
}

/// implements the arithmetic operators for references to a type that
/// converts into a [`Variable`], so interface values can be used directly
/// in expressions: `&self.mvp * &self.position`
macro_rules! forward_operators {
    ($(@[$($gen: tt)*])? $ty: ty) => {
        impl<$($($gen)*,)? R: Into<$crate::Variable>> std::ops::Add<R> for &$ty {
            type Output = $crate::Variable;
            #[track_caller]
            fn add(self, rhs: R) -> $crate::Variable { $crate::Variable::from(self) + rhs }
        }
        impl<$($($gen)*,)? R: Into<$crate::Variable>> std::ops::Sub<R> for &$ty {
            type Output = $crate::Variable;
            #[track_caller]
            fn sub(self, rhs: R) -> $crate::Variable { $crate::Variable::from(self) - rhs }
        }
        impl<$($($gen)*,)? R: Into<$crate::Variable>> std::ops::Mul<R> for &$ty {
            type Output = $crate::Variable;
            #[track_caller]
            fn mul(self, rhs: R) -> $crate::Variable { $crate::Variable::from(self) * rhs }
        }
        impl<$($($gen)*,)? R: Into<$crate::Variable>> std::ops::Div<R> for &$ty {
            type Output = $crate::Variable;
            #[track_caller]
            fn div(self, rhs: R) -> $crate::Variable { $crate::Variable::from(self) / rhs }
        }
        impl<$($($gen)*)?> std::ops::Neg for &$ty {
            type Output = $crate::Variable;
            #[track_caller]
            fn neg(self) -> $crate::Variable { -$crate::Variable::from(self) }
        }
    };
}
pub(crate) use forward_operators;
