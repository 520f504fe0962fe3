//! The guard/reset expression AST.
//!
//! Controller source stores guards and resets as language-level expression
//! trees and evaluates them by compiling into the host language (§9). Here
//! they are a dedicated tagged-variant AST instead: no compilation step, and
//! the same tree is walked by three different evaluators in `verse-guard`
//! (discrete, hybrid, continuous) without re-parsing.

use std::fmt;

/// Arithmetic and comparison operators over two operands.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
        };
        write!(f, "{s}")
    }
}

/// Unary arithmetic operator.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnOp {
    Neg,
}

/// Logical connective joining two or more boolean operands.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoolOp {
    And,
    Or,
    Not,
}

/// Quantifier kind over the `others` namespace (§4.2.1).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuantKind {
    ForAll,
    Exists,
}

/// A guard/reset expression.
///
/// Variable references are dotted paths (`ego.x`, `others.v`, `track.lane`)
/// resolved against the packed environment at evaluation time (§3
/// "Environment binding"); this AST never embeds a resolved value.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// A numeric literal.
    Lit(f64),

    /// A mode-enum literal, e.g. `SwitchLeft`.
    ModeLit(String),

    /// A boolean literal.
    BoolLit(bool),

    /// A dotted variable reference, e.g. `"ego.x"`, `"others.v"`.
    Var(String),

    Unary(UnOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),

    /// `Not` carries exactly one operand; `And`/`Or` fold over `operands`.
    Bool(BoolOp, Vec<Expr>),

    /// `∀`/`∃ <bound> ∈ others . body`, where `bound` is the name bound
    /// inside `body` (conventionally `"other"`, referenced as `other.<f>`).
    Quantifier {
        kind: QuantKind,
        bound: String,
        body: Box<Expr>,
    },

    /// A whitelisted function call (§4.2, §9): `min`, `max`, `abs`, `sin`,
    /// `cos`, `sqrt`. Unknown names are a `GuardError::UnknownFunction` at
    /// evaluation time, not at parse/construction time.
    Call(String, Vec<Expr>),

    /// A reset value that evaluates to a *set* of candidate values rather
    /// than one, supporting nondeterministic mode assignment (§4.3
    /// "if it evaluates to a list of enum values keep it"). Never
    /// meaningful as a guard condition — only as a `ModePath::val`.
    List(Vec<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn lit(v: f64) -> Self {
        Expr::Lit(v)
    }

    pub fn bin(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn and(operands: Vec<Expr>) -> Self {
        Expr::Bool(BoolOp::And, operands)
    }

    pub fn not(operand: Expr) -> Self {
        Expr::Bool(BoolOp::Not, vec![operand])
    }

    /// Every dotted variable name referenced anywhere in this expression,
    /// in first-appearance order (used by `apply_reset`'s first-appearance
    /// ordering requirement, §5, and by cache-diffing equality).
    pub fn referenced_vars(&self, out: &mut Vec<String>) {
        match self {
            Expr::Lit(_) | Expr::ModeLit(_) | Expr::BoolLit(_) => {}
            Expr::Var(name) => {
                if !out.contains(name) {
                    out.push(name.clone());
                }
            }
            Expr::Unary(_, e) => e.referenced_vars(out),
            Expr::Binary(_, l, r) => {
                l.referenced_vars(out);
                r.referenced_vars(out);
            }
            Expr::Bool(_, operands) => {
                for o in operands {
                    o.referenced_vars(out);
                }
            }
            Expr::Quantifier { body, .. } => body.referenced_vars(out),
            Expr::Call(_, args) => {
                for a in args {
                    a.referenced_vars(out);
                }
            }
            Expr::List(items) => {
                for i in items {
                    i.referenced_vars(out);
                }
            }
        }
    }
}
