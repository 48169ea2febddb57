// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Plain-value attribute types: modifiers, operators and primitive types.

use std::fmt;

/// Declaration modifier keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
    Transitive,
    Default,
    Sealed,
    NonSealed,
}

/// Modifier set stored in `modifiers` attributes, in source order.
pub type Modifiers = Vec<Modifier>;

impl Modifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Synchronized => "synchronized",
            Modifier::Native => "native",
            Modifier::Strictfp => "strictfp",
            Modifier::Transitive => "transitive",
            Modifier::Default => "default",
            Modifier::Sealed => "sealed",
            Modifier::NonSealed => "non-sealed",
        }
    }
}

/// Compound assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOperator {
    Assign,
    Plus,
    Minus,
    Multiply,
    Divide,
    BinaryAnd,
    BinaryOr,
    Xor,
    Remainder,
    LeftShift,
    SignedRightShift,
    UnsignedRightShift,
}

impl AssignOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOperator::Assign => "=",
            AssignOperator::Plus => "+=",
            AssignOperator::Minus => "-=",
            AssignOperator::Multiply => "*=",
            AssignOperator::Divide => "/=",
            AssignOperator::BinaryAnd => "&=",
            AssignOperator::BinaryOr => "|=",
            AssignOperator::Xor => "^=",
            AssignOperator::Remainder => "%=",
            AssignOperator::LeftShift => "<<=",
            AssignOperator::SignedRightShift => ">>=",
            AssignOperator::UnsignedRightShift => ">>>=",
        }
    }

    /// The binary operator a compound assignment applies, if any.
    pub fn to_binary(&self) -> Option<BinaryOperator> {
        match self {
            AssignOperator::Assign => None,
            AssignOperator::Plus => Some(BinaryOperator::Plus),
            AssignOperator::Minus => Some(BinaryOperator::Minus),
            AssignOperator::Multiply => Some(BinaryOperator::Multiply),
            AssignOperator::Divide => Some(BinaryOperator::Divide),
            AssignOperator::BinaryAnd => Some(BinaryOperator::BinaryAnd),
            AssignOperator::BinaryOr => Some(BinaryOperator::BinaryOr),
            AssignOperator::Xor => Some(BinaryOperator::Xor),
            AssignOperator::Remainder => Some(BinaryOperator::Remainder),
            AssignOperator::LeftShift => Some(BinaryOperator::LeftShift),
            AssignOperator::SignedRightShift => Some(BinaryOperator::SignedRightShift),
            AssignOperator::UnsignedRightShift => Some(BinaryOperator::UnsignedRightShift),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Or,
    And,
    BinaryOr,
    BinaryAnd,
    Xor,
    Equals,
    NotEquals,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    LeftShift,
    SignedRightShift,
    UnsignedRightShift,
    Plus,
    Minus,
    Multiply,
    Divide,
    Remainder,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::BinaryOr => "|",
            BinaryOperator::BinaryAnd => "&",
            BinaryOperator::Xor => "^",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::LeftShift => "<<",
            BinaryOperator::SignedRightShift => ">>",
            BinaryOperator::UnsignedRightShift => ">>>",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Remainder => "%",
        }
    }
}

/// Unary operators, prefix and postfix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Plus,
    Minus,
    PrefixIncrement,
    PrefixDecrement,
    LogicalComplement,
    BitwiseComplement,
    PostfixIncrement,
    PostfixDecrement,
}

impl UnaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::PrefixIncrement | UnaryOperator::PostfixIncrement => "++",
            UnaryOperator::PrefixDecrement | UnaryOperator::PostfixDecrement => "--",
            UnaryOperator::LogicalComplement => "!",
            UnaryOperator::BitwiseComplement => "~",
        }
    }

    pub fn is_postfix(&self) -> bool {
        matches!(
            self,
            UnaryOperator::PostfixIncrement | UnaryOperator::PostfixDecrement
        )
    }

    pub fn is_prefix(&self) -> bool {
        !self.is_postfix()
    }
}

/// Primitive type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Boolean,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Char => "char",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display_as_str!(Modifier, AssignOperator, BinaryOperator, UnaryOperator, Primitive);
