//! turns expression trees into the text of one language and stage
use crate::{
    DataType, Language, ShaderKind,
    error::{Error, fail},
    expr::node::{AssignOp, Binding, Builtin, Literal, Node, Operator},
};

use super::{glsl::Glsl, hlsl::Hlsl};

/// the language and stage an expression is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    pub language: Language,
    pub kind: ShaderKind,
}

/// the places where the two languages spell the same expression differently
pub(crate) trait Dialect {
    /// how an interface value is referred to from within a stage's main function
    fn binding(binding: Binding, kind: ShaderKind) -> String;
    /// `lhs * rhs`, `matrix` if either operand is a `mat4`
    fn product(lhs: &str, rhs: &str, matrix: bool) -> String;
    /// `lhs *= rhs;`
    fn mul_assign(lhs: &str, rhs: &str, matrix: bool) -> String;
    fn sample(sampler: u32, coords: &str) -> String;
    fn canonical_screen_pos(position: &str) -> String;
}

#[track_caller]
pub(crate) fn write_node(node: &Node, target: Target) -> String {
    match target.language {
        Language::Glsl => node_to_string::<Glsl>(node, target.kind),
        Language::Hlsl => node_to_string::<Hlsl>(node, target.kind),
    }
}

/// `<ty> local_N = <init>;`
pub(crate) fn write_definition(ty: DataType, local: u32, init: Option<&str>) -> String {
    match init {
        Some(init) => format!("{ty} local_{local} = {init};"),
        None => format!("{ty} local_{local};"),
    }
}

pub(crate) fn write_assignment(language: Language, target: &str, op: AssignOp, value: &str, matrix: bool) -> String {
    match (op, language) {
        (AssignOp::MulAssign, Language::Glsl) => Glsl::mul_assign(target, value, matrix),
        (AssignOp::MulAssign, Language::Hlsl) => Hlsl::mul_assign(target, value, matrix),
        _ => format!("{target} {} {value};", op.symbol),
    }
}

pub(crate) fn write_literal(literal: &Literal) -> String {
    match literal {
        Literal::Float(x) => {
            let mut s = format!("{x}");
            if !s.contains(['.', 'e', 'E']) {
                s += ".0";
            }
            s
        }
        Literal::Int(x) => format!("{x}"),
    }
}

fn arg_list<D: Dialect>(args: &[std::rc::Rc<Node>], kind: ShaderKind) -> String {
    args.iter()
        .map(|a| node_to_string::<D>(a, kind))
        .collect::<Vec<_>>()
        .join(", ")
}

#[track_caller]
fn node_to_string<D: Dialect>(node: &Node, kind: ShaderKind) -> String {
    let sub = |node: &Node| node_to_string::<D>(node, kind);
    match node {
        Node::Empty => fail(Error::Uninitialized),
        Node::Literal(x) => write_literal(x),
        Node::Local(i) => format!("local_{i}"),
        Node::Raw(text) => text.clone(),
        Node::Binding(b) => {
            if let (Binding::Attribute(_), ShaderKind::Fragment) = (b, kind) {
                fail(Error::NotAvailableInStage {
                    what: format!("vertex attribute `{b}`"),
                    stage: kind,
                })
            }
            D::binding(*b, kind)
        }
        Node::Operator { op, args, matrix } => match (op, args.as_slice()) {
            (Operator::Negative, [a]) => format!("-( {} )", sub(a)),
            (Operator::Mul, [a, b]) => D::product(&sub(a), &sub(b), *matrix),
            (op, [a, b]) => format!("( {} {} {} )", sub(a), op.symbol, sub(b)),
            (op, args) => unreachable!("operator {op:?} recorded with {} arguments", args.len()),
        },
        Node::Swizzle(sw, a) => format!("{}.{sw}", sub(a)),
        Node::Subscript(a, i) => format!("{}[ {} ]", sub(a), sub(i)),
        Node::Builtin(f, args) => match (f, args.as_slice()) {
            (Builtin::Sample, [sampler, coords]) => match **sampler {
                Node::Binding(Binding::Sampler(i)) => D::sample(i, &sub(coords)),
                _ => unreachable!("sampling from a non-sampler expression"),
            },
            (Builtin::CanonicalScreenPos, [p]) => D::canonical_screen_pos(&sub(p)),
            (f, args) => format!("{}( {} )", f.name, arg_list::<D>(args, kind)),
        },
        Node::Construct(ty, args) => format!("{ty}( {} )", arg_list::<D>(args, kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_literals_keep_a_decimal_point() {
        assert_eq!(write_literal(&Literal::Float(1.0)), "1.0");
        assert_eq!(write_literal(&Literal::Float(0.25)), "0.25");
        assert_eq!(write_literal(&Literal::Float(-3.0)), "-3.0");
        assert_eq!(write_literal(&Literal::Int(-3)), "-3");
    }

    #[test]
    fn definitions() {
        assert_eq!(write_definition(DataType::FVec3, 2, Some("attribute_1")), "vec3 local_2 = attribute_1;");
        assert_eq!(write_definition(DataType::Mat4, 0, None), "mat4 local_0;");
    }
}
