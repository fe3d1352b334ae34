use crate::MemberKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Syntactic kind of a body-tree node.
///
/// This mirrors the tree-kind vocabulary a javac-style front end exposes:
/// statement and expression shapes, per-operator binary/unary/compound
/// assignment kinds, and per-type literal kinds. The fingerprint is sensitive
/// to these kinds, so the set is intentionally fine-grained.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum TreeKind {
    // Declarations and structure.
    Method,
    Variable,
    Block,
    Modifiers,
    Annotation,
    AnnotatedType,
    TypeAnnotation,
    CompilationUnit,
    Import,
    Package,
    EmptyStatement,
    LabeledStatement,
    Uses,
    Requires,
    Opens,
    Exports,
    Provides,
    IntersectionType,
    ExtendsWildcard,
    SuperWildcard,
    UnboundedWildcard,

    // Statements.
    ExpressionStatement,
    If,
    #[serde(rename = "FOR_LOOP")]
    For,
    #[serde(rename = "ENHANCED_FOR_LOOP")]
    EnhancedFor,
    #[serde(rename = "WHILE_LOOP")]
    While,
    #[serde(rename = "DO_WHILE_LOOP")]
    DoWhile,
    Switch,
    SwitchExpression,
    Case,
    Break,
    Continue,
    Return,
    Throw,
    Try,
    Catch,
    Synchronized,
    Assert,
    Yield,

    // Expressions.
    Identifier,
    MemberSelect,
    MemberReference,
    MethodInvocation,
    NewClass,
    NewArray,
    InstanceOf,
    TypeCast,
    Parenthesized,
    ArrayAccess,
    #[serde(rename = "LAMBDA_EXPRESSION")]
    Lambda,
    ConditionalExpression,
    Assignment,

    // Binary operators.
    Plus,
    Minus,
    Multiply,
    Divide,
    Remainder,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    EqualTo,
    NotEqualTo,
    And,
    Or,
    Xor,
    ConditionalAnd,
    ConditionalOr,

    // Unary operators.
    UnaryPlus,
    UnaryMinus,
    BitwiseComplement,
    LogicalComplement,
    PrefixIncrement,
    PrefixDecrement,
    PostfixIncrement,
    PostfixDecrement,

    // Compound assignments.
    PlusAssignment,
    MinusAssignment,
    MultiplyAssignment,
    DivideAssignment,
    RemainderAssignment,
    AndAssignment,
    OrAssignment,
    XorAssignment,
    LeftShiftAssignment,
    RightShiftAssignment,
    UnsignedRightShiftAssignment,

    // Literals.
    IntLiteral,
    LongLiteral,
    FloatLiteral,
    DoubleLiteral,
    BooleanLiteral,
    CharLiteral,
    StringLiteral,
    NullLiteral,

    // Type references.
    PrimitiveType,
    ArrayType,
    ParameterizedType,
    TypeParameter,
}

impl TreeKind {
    pub fn name(self) -> &'static str {
        match self {
            TreeKind::Method => "METHOD",
            TreeKind::Variable => "VARIABLE",
            TreeKind::Block => "BLOCK",
            TreeKind::Modifiers => "MODIFIERS",
            TreeKind::Annotation => "ANNOTATION",
            TreeKind::AnnotatedType => "ANNOTATED_TYPE",
            TreeKind::TypeAnnotation => "TYPE_ANNOTATION",
            TreeKind::CompilationUnit => "COMPILATION_UNIT",
            TreeKind::Import => "IMPORT",
            TreeKind::Package => "PACKAGE",
            TreeKind::EmptyStatement => "EMPTY_STATEMENT",
            TreeKind::LabeledStatement => "LABELED_STATEMENT",
            TreeKind::Uses => "USES",
            TreeKind::Requires => "REQUIRES",
            TreeKind::Opens => "OPENS",
            TreeKind::Exports => "EXPORTS",
            TreeKind::Provides => "PROVIDES",
            TreeKind::IntersectionType => "INTERSECTION_TYPE",
            TreeKind::ExtendsWildcard => "EXTENDS_WILDCARD",
            TreeKind::SuperWildcard => "SUPER_WILDCARD",
            TreeKind::UnboundedWildcard => "UNBOUNDED_WILDCARD",
            TreeKind::ExpressionStatement => "EXPRESSION_STATEMENT",
            TreeKind::If => "IF",
            TreeKind::For => "FOR_LOOP",
            TreeKind::EnhancedFor => "ENHANCED_FOR_LOOP",
            TreeKind::While => "WHILE_LOOP",
            TreeKind::DoWhile => "DO_WHILE_LOOP",
            TreeKind::Switch => "SWITCH",
            TreeKind::SwitchExpression => "SWITCH_EXPRESSION",
            TreeKind::Case => "CASE",
            TreeKind::Break => "BREAK",
            TreeKind::Continue => "CONTINUE",
            TreeKind::Return => "RETURN",
            TreeKind::Throw => "THROW",
            TreeKind::Try => "TRY",
            TreeKind::Catch => "CATCH",
            TreeKind::Synchronized => "SYNCHRONIZED",
            TreeKind::Assert => "ASSERT",
            TreeKind::Yield => "YIELD",
            TreeKind::Identifier => "IDENTIFIER",
            TreeKind::MemberSelect => "MEMBER_SELECT",
            TreeKind::MemberReference => "MEMBER_REFERENCE",
            TreeKind::MethodInvocation => "METHOD_INVOCATION",
            TreeKind::NewClass => "NEW_CLASS",
            TreeKind::NewArray => "NEW_ARRAY",
            TreeKind::InstanceOf => "INSTANCE_OF",
            TreeKind::TypeCast => "TYPE_CAST",
            TreeKind::Parenthesized => "PARENTHESIZED",
            TreeKind::ArrayAccess => "ARRAY_ACCESS",
            TreeKind::Lambda => "LAMBDA_EXPRESSION",
            TreeKind::ConditionalExpression => "CONDITIONAL_EXPRESSION",
            TreeKind::Assignment => "ASSIGNMENT",
            TreeKind::Plus => "PLUS",
            TreeKind::Minus => "MINUS",
            TreeKind::Multiply => "MULTIPLY",
            TreeKind::Divide => "DIVIDE",
            TreeKind::Remainder => "REMAINDER",
            TreeKind::LeftShift => "LEFT_SHIFT",
            TreeKind::RightShift => "RIGHT_SHIFT",
            TreeKind::UnsignedRightShift => "UNSIGNED_RIGHT_SHIFT",
            TreeKind::LessThan => "LESS_THAN",
            TreeKind::GreaterThan => "GREATER_THAN",
            TreeKind::LessThanEqual => "LESS_THAN_EQUAL",
            TreeKind::GreaterThanEqual => "GREATER_THAN_EQUAL",
            TreeKind::EqualTo => "EQUAL_TO",
            TreeKind::NotEqualTo => "NOT_EQUAL_TO",
            TreeKind::And => "AND",
            TreeKind::Or => "OR",
            TreeKind::Xor => "XOR",
            TreeKind::ConditionalAnd => "CONDITIONAL_AND",
            TreeKind::ConditionalOr => "CONDITIONAL_OR",
            TreeKind::UnaryPlus => "UNARY_PLUS",
            TreeKind::UnaryMinus => "UNARY_MINUS",
            TreeKind::BitwiseComplement => "BITWISE_COMPLEMENT",
            TreeKind::LogicalComplement => "LOGICAL_COMPLEMENT",
            TreeKind::PrefixIncrement => "PREFIX_INCREMENT",
            TreeKind::PrefixDecrement => "PREFIX_DECREMENT",
            TreeKind::PostfixIncrement => "POSTFIX_INCREMENT",
            TreeKind::PostfixDecrement => "POSTFIX_DECREMENT",
            TreeKind::PlusAssignment => "PLUS_ASSIGNMENT",
            TreeKind::MinusAssignment => "MINUS_ASSIGNMENT",
            TreeKind::MultiplyAssignment => "MULTIPLY_ASSIGNMENT",
            TreeKind::DivideAssignment => "DIVIDE_ASSIGNMENT",
            TreeKind::RemainderAssignment => "REMAINDER_ASSIGNMENT",
            TreeKind::AndAssignment => "AND_ASSIGNMENT",
            TreeKind::OrAssignment => "OR_ASSIGNMENT",
            TreeKind::XorAssignment => "XOR_ASSIGNMENT",
            TreeKind::LeftShiftAssignment => "LEFT_SHIFT_ASSIGNMENT",
            TreeKind::RightShiftAssignment => "RIGHT_SHIFT_ASSIGNMENT",
            TreeKind::UnsignedRightShiftAssignment => "UNSIGNED_RIGHT_SHIFT_ASSIGNMENT",
            TreeKind::IntLiteral => "INT_LITERAL",
            TreeKind::LongLiteral => "LONG_LITERAL",
            TreeKind::FloatLiteral => "FLOAT_LITERAL",
            TreeKind::DoubleLiteral => "DOUBLE_LITERAL",
            TreeKind::BooleanLiteral => "BOOLEAN_LITERAL",
            TreeKind::CharLiteral => "CHAR_LITERAL",
            TreeKind::StringLiteral => "STRING_LITERAL",
            TreeKind::NullLiteral => "NULL_LITERAL",
            TreeKind::PrimitiveType => "PRIMITIVE_TYPE",
            TreeKind::ArrayType => "ARRAY_TYPE",
            TreeKind::ParameterizedType => "PARAMETERIZED_TYPE",
            TreeKind::TypeParameter => "TYPE_PARAMETER",
        }
    }

    /// Kinds whose name is not emitted into the normalized sequence.
    ///
    /// These are formatting- or metadata-level constructs (plus string
    /// literals, which contribute their value but no kind tag).
    pub fn is_suppressed(self) -> bool {
        matches!(
            self,
            TreeKind::Modifiers
                | TreeKind::Annotation
                | TreeKind::AnnotatedType
                | TreeKind::TypeAnnotation
                | TreeKind::Block
                | TreeKind::EmptyStatement
                | TreeKind::CompilationUnit
                | TreeKind::Import
                | TreeKind::Package
                | TreeKind::Uses
                | TreeKind::Requires
                | TreeKind::LabeledStatement
                | TreeKind::Opens
                | TreeKind::Exports
                | TreeKind::Provides
                | TreeKind::IntersectionType
                | TreeKind::StringLiteral
                | TreeKind::SuperWildcard
                | TreeKind::ExtendsWildcard
        )
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TreeKind::IntLiteral
                | TreeKind::LongLiteral
                | TreeKind::FloatLiteral
                | TreeKind::DoubleLiteral
                | TreeKind::BooleanLiteral
                | TreeKind::CharLiteral
                | TreeKind::StringLiteral
                | TreeKind::NullLiteral
        )
    }

    pub fn is_compound_assignment(self) -> bool {
        matches!(
            self,
            TreeKind::PlusAssignment
                | TreeKind::MinusAssignment
                | TreeKind::MultiplyAssignment
                | TreeKind::DivideAssignment
                | TreeKind::RemainderAssignment
                | TreeKind::AndAssignment
                | TreeKind::OrAssignment
                | TreeKind::XorAssignment
                | TreeKind::LeftShiftAssignment
                | TreeKind::RightShiftAssignment
                | TreeKind::UnsignedRightShiftAssignment
        )
    }
}

/// Index of a node within its owning [`BodyTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// One node of a resolved body tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyNode {
    pub kind: TreeKind,
    #[serde(default)]
    pub children: Vec<NodeId>,
    /// Kind-specific primary text: identifier text, literal value, checked or
    /// created type text, a variable's resolved declared type, an
    /// invocation's last name segment, a member reference's mode, or the
    /// entry declaration's simple name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Source spelling of the node, used only as the fallback when a
    /// position does not resolve to an element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
    /// The member this position resolves to, when the front end could
    /// resolve one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<MemberKey>,
}

/// An arena-backed body tree for one method or constructor.
///
/// The root is the member declaration node itself; a tree is owned by exactly
/// one member and shared with nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyTree {
    pub nodes: Vec<BodyNode>,
    pub root: NodeId,
}

impl BodyTree {
    pub fn node(&self, id: NodeId) -> &BodyNode {
        &self.nodes[id.idx()]
    }

    pub fn root_node(&self) -> &BodyNode {
        self.node(self.root)
    }
}

/// Incremental constructor for [`BodyTree`], for front ends and fixtures
/// that build trees bottom-up.
#[derive(Debug, Default)]
pub struct BodyTreeBuilder {
    nodes: Vec<BodyNode>,
}

impl BodyTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: BodyNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Replace the child list of an already-pushed node, for front ends that
    /// allocate parents before their children.
    pub fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        self.nodes[id.idx()].children = children;
    }

    pub fn build(self, root: NodeId) -> BodyTree {
        BodyTree {
            nodes: self.nodes,
            root,
        }
    }
}
