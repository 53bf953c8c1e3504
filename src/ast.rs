use std::{fmt, mem};

/// An abstract syntax tree (AST) node representing an expression.
///
/// Every child is boxed and owned by its parent; the root is handed from
/// the parser to the evaluator. Each node remembers the source position of
/// the token that produced it so evaluation errors can point back into the
/// submitted text.
#[derive(Debug, PartialEq, Eq)]
pub enum Expr {
    /// A single digit from 1 to 6.
    Literal {
        /// The digit's value.
        value:    u8,
        /// Character position in the source.
        position: usize,
    },
    /// A postfix unary operation.
    UnaryOp {
        /// The unary operator to apply.
        op:       UnaryOperator,
        /// The operand expression.
        expr:     Box<Self>,
        /// Position of the operator.
        position: usize,
    },
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the operator.
        position: usize,
    },
}

// A deep tree would recurse once per level when dropped, so children are
// detached onto a heap stack first and every node is dropped as a leaf.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

impl Expr {
    /// Moves this node's children onto `pending`, leaving leaves behind.
    fn detach_children(&mut self, pending: &mut Vec<Self>) {
        let leaf = || Self::Literal { value:    1,
                                      position: 0, };
        match self {
            Self::Literal { .. } => {},
            Self::UnaryOp { expr, .. } => pending.push(mem::replace(&mut **expr, leaf())),
            Self::BinaryOp { left, right, .. } => {
                pending.push(mem::replace(&mut **left, leaf()));
                pending.push(mem::replace(&mut **right, leaf()));
            },
        }
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`), right-associative
    Pow,
}

/// Represents a unary operator.
///
/// Only postfix factorial exists; there is no unary minus.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Factorial (`x!`). Repeated bangs nest: `3!!` is `(3!)!`.
    Factorial,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factorial => write!(f, "!"),
        }
    }
}
