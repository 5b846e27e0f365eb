//! Node kind tag for tag-driven dispatch.
//!
//! Every node carries a `NodeKind` fixed at construction. The kind decides
//! which payload the node has, which flag family each bank uses, and which
//! checked accessors accept it.
//!
//! # Kind Ranges
//!
//! Kinds are organized into semantic ranges:
//! - 0-15: Exceptional nodes (error mark, identifiers, lists, blocks)
//! - 16-31: Constants
//! - 32-47: Declarations
//! - 48-79: Types
//! - 80-95: Statements
//! - 96-159: Expressions
//! - 160-191: Front-end specific nodes (overloads, baselinks, template info)

use std::fmt;

/// Node kind discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum NodeKind {
    // === Exceptional (0-15) ===
    ErrorMark = 0,
    Identifier = 1,
    /// Purpose/value pair with a successor link.
    TreeList = 2,
    /// Fixed-length vector of nodes.
    TreeVec = 3,
    /// Lexical block (variables and sub-blocks).
    Block = 4,

    // === Constants (16-31) ===
    IntegerCst = 16,
    RealCst = 17,
    StringCst = 18,
    /// Pointer-to-member constant.
    PtrmemCst = 19,

    // === Declarations (32-47) ===
    FunctionDecl = 32,
    VarDecl = 33,
    FieldDecl = 34,
    ParmDecl = 35,
    ResultDecl = 36,
    TypeDecl = 37,
    TemplateDecl = 38,
    NamespaceDecl = 39,
    UsingDecl = 40,
    ConstDecl = 41,
    LabelDecl = 42,
    ConceptDecl = 43,

    // === Types (48-79) ===
    VoidType = 48,
    BooleanType = 49,
    IntegerType = 50,
    RealType = 51,
    NullptrType = 52,
    /// Placeholder type of an unresolved overload set.
    UnknownType = 53,
    PointerType = 54,
    ReferenceType = 55,
    /// Pointer-to-data-member type.
    OffsetType = 56,
    ArrayType = 57,
    FunctionType = 58,
    MethodType = 59,
    RecordType = 60,
    UnionType = 61,
    EnumeralType = 62,
    TemplateTypeParm = 63,
    TemplateTemplateParm = 64,
    BoundTemplateTemplateParm = 65,
    TypenameType = 66,
    DecltypeType = 67,
    TypePackExpansion = 68,

    // === Statements (80-95) ===
    StatementList = 80,
    ExprStmt = 81,
    IfStmt = 82,
    SwitchStmt = 83,
    RangeForStmt = 84,
    TryBlock = 85,
    Handler = 86,
    CleanupStmt = 87,
    EhSpecBlock = 88,
    UsingStmt = 89,
    BindExpr = 90,
    StmtExpr = 91,

    // === Expressions (96-159) ===
    CallExpr = 96,
    AggrInitExpr = 97,
    NewExpr = 98,
    DeleteExpr = 99,
    CondExpr = 100,
    NopExpr = 101,
    ConvertExpr = 102,
    ViewConvertExpr = 103,
    NonLvalueExpr = 104,
    StaticCastExpr = 105,
    ImplicitConvExpr = 106,
    TargetExpr = 107,
    Constructor = 108,
    AddrExpr = 109,
    IndirectRef = 110,
    ComponentRef = 111,
    ScopeRef = 112,
    OffsetRef = 113,
    ArrayRef = 114,
    ModifyExpr = 115,
    CompoundExpr = 116,
    ParenExpr = 117,
    SizeofExpr = 118,
    AlignofExpr = 119,
    VecInitExpr = 120,
    ExprPackExpansion = 121,
    ThrowExpr = 122,

    // === Front-end specific (160-191) ===
    Overload = 160,
    Baselink = 161,
    TemplateInfo = 162,
    TemplateParmIndex = 163,
    LambdaExpr = 164,
    TraitExpr = 165,
    StaticAssert = 166,
    /// Base-class information for one position in a class hierarchy.
    Binfo = 167,
}

/// Coarse classification of kinds (`TREE_CODE_CLASS`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TreeClass {
    Exceptional,
    Constant,
    Declaration,
    Type,
    Statement,
    Expression,
}

/// Number of operands a kind carries in its operand payload.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Arity {
    /// The kind has a dedicated payload, not an operand vector.
    None,
    /// Exactly this many operand slots.
    Fixed(u8),
    /// At least this many operand slots, more may follow.
    AtLeast(u8),
}

impl Arity {
    /// Check if `len` operand slots satisfy this arity.
    #[inline]
    pub const fn accepts(self, len: usize) -> bool {
        match self {
            Arity::None => false,
            Arity::Fixed(n) => len == n as usize,
            Arity::AtLeast(n) => len >= n as usize,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::None => f.write_str("no"),
            Arity::Fixed(n) => write!(f, "exactly {n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

impl NodeKind {
    /// All kinds, in discriminant order.
    pub const ALL: &'static [NodeKind] = &[
        NodeKind::ErrorMark,
        NodeKind::Identifier,
        NodeKind::TreeList,
        NodeKind::TreeVec,
        NodeKind::Block,
        NodeKind::IntegerCst,
        NodeKind::RealCst,
        NodeKind::StringCst,
        NodeKind::PtrmemCst,
        NodeKind::FunctionDecl,
        NodeKind::VarDecl,
        NodeKind::FieldDecl,
        NodeKind::ParmDecl,
        NodeKind::ResultDecl,
        NodeKind::TypeDecl,
        NodeKind::TemplateDecl,
        NodeKind::NamespaceDecl,
        NodeKind::UsingDecl,
        NodeKind::ConstDecl,
        NodeKind::LabelDecl,
        NodeKind::ConceptDecl,
        NodeKind::VoidType,
        NodeKind::BooleanType,
        NodeKind::IntegerType,
        NodeKind::RealType,
        NodeKind::NullptrType,
        NodeKind::UnknownType,
        NodeKind::PointerType,
        NodeKind::ReferenceType,
        NodeKind::OffsetType,
        NodeKind::ArrayType,
        NodeKind::FunctionType,
        NodeKind::MethodType,
        NodeKind::RecordType,
        NodeKind::UnionType,
        NodeKind::EnumeralType,
        NodeKind::TemplateTypeParm,
        NodeKind::TemplateTemplateParm,
        NodeKind::BoundTemplateTemplateParm,
        NodeKind::TypenameType,
        NodeKind::DecltypeType,
        NodeKind::TypePackExpansion,
        NodeKind::StatementList,
        NodeKind::ExprStmt,
        NodeKind::IfStmt,
        NodeKind::SwitchStmt,
        NodeKind::RangeForStmt,
        NodeKind::TryBlock,
        NodeKind::Handler,
        NodeKind::CleanupStmt,
        NodeKind::EhSpecBlock,
        NodeKind::UsingStmt,
        NodeKind::BindExpr,
        NodeKind::StmtExpr,
        NodeKind::CallExpr,
        NodeKind::AggrInitExpr,
        NodeKind::NewExpr,
        NodeKind::DeleteExpr,
        NodeKind::CondExpr,
        NodeKind::NopExpr,
        NodeKind::ConvertExpr,
        NodeKind::ViewConvertExpr,
        NodeKind::NonLvalueExpr,
        NodeKind::StaticCastExpr,
        NodeKind::ImplicitConvExpr,
        NodeKind::TargetExpr,
        NodeKind::Constructor,
        NodeKind::AddrExpr,
        NodeKind::IndirectRef,
        NodeKind::ComponentRef,
        NodeKind::ScopeRef,
        NodeKind::OffsetRef,
        NodeKind::ArrayRef,
        NodeKind::ModifyExpr,
        NodeKind::CompoundExpr,
        NodeKind::ParenExpr,
        NodeKind::SizeofExpr,
        NodeKind::AlignofExpr,
        NodeKind::VecInitExpr,
        NodeKind::ExprPackExpansion,
        NodeKind::ThrowExpr,
        NodeKind::Overload,
        NodeKind::Baselink,
        NodeKind::TemplateInfo,
        NodeKind::TemplateParmIndex,
        NodeKind::LambdaExpr,
        NodeKind::TraitExpr,
        NodeKind::StaticAssert,
        NodeKind::Binfo,
    ];

    /// Get the raw discriminant.
    #[inline]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Coarse class of this kind.
    pub const fn class(self) -> TreeClass {
        match self as u8 {
            16..=31 => TreeClass::Constant,
            32..=47 => TreeClass::Declaration,
            48..=79 => TreeClass::Type,
            80..=95 => TreeClass::Statement,
            96..=159 | 164..=166 => TreeClass::Expression,
            _ => TreeClass::Exceptional,
        }
    }

    #[inline]
    pub const fn is_decl(self) -> bool {
        matches!(self.class(), TreeClass::Declaration)
    }

    #[inline]
    pub const fn is_type(self) -> bool {
        matches!(self.class(), TreeClass::Type)
    }

    #[inline]
    pub const fn is_stmt(self) -> bool {
        matches!(self.class(), TreeClass::Statement)
    }

    #[inline]
    pub const fn is_expr(self) -> bool {
        matches!(self.class(), TreeClass::Expression)
    }

    #[inline]
    pub const fn is_constant(self) -> bool {
        matches!(self.class(), TreeClass::Constant)
    }

    /// Record or union (`RECORD_OR_UNION_CODE_P`).
    #[inline]
    pub const fn is_record_or_union(self) -> bool {
        matches!(self, NodeKind::RecordType | NodeKind::UnionType)
    }

    /// Class-like type that may carry a tag declaration (`TAGGED_TYPE_P`).
    #[inline]
    pub const fn is_tagged_type(self) -> bool {
        matches!(
            self,
            NodeKind::RecordType | NodeKind::UnionType | NodeKind::EnumeralType
        )
    }

    /// Function or method type (`FUNC_OR_METHOD_TYPE_P`).
    #[inline]
    pub const fn is_func_or_method_type(self) -> bool {
        matches!(self, NodeKind::FunctionType | NodeKind::MethodType)
    }

    /// Pointer or reference type.
    #[inline]
    pub const fn is_indirect_type(self) -> bool {
        matches!(self, NodeKind::PointerType | NodeKind::ReferenceType)
    }

    /// Template parameter standing for a type (`TEMPLATE_TYPE_PARM` family).
    #[inline]
    pub const fn is_template_parm_type(self) -> bool {
        matches!(
            self,
            NodeKind::TemplateTypeParm
                | NodeKind::TemplateTemplateParm
                | NodeKind::BoundTemplateTemplateParm
        )
    }

    /// Arithmetic scalar (`ARITHMETIC_TYPE_P`).
    #[inline]
    pub const fn is_arithmetic_type(self) -> bool {
        matches!(
            self,
            NodeKind::BooleanType | NodeKind::IntegerType | NodeKind::RealType
        )
    }

    /// Pack expansion of either sort (`PACK_EXPANSION_P`).
    #[inline]
    pub const fn is_pack_expansion(self) -> bool {
        matches!(
            self,
            NodeKind::TypePackExpansion | NodeKind::ExprPackExpansion
        )
    }

    /// Declarations whose extension data starts with the minimal record
    /// (`LANG_DECL_HAS_MIN`).
    #[inline]
    pub const fn has_lang_decl_min(self) -> bool {
        matches!(
            self,
            NodeKind::VarDecl
                | NodeKind::FunctionDecl
                | NodeKind::FieldDecl
                | NodeKind::ConstDecl
                | NodeKind::TypeDecl
                | NodeKind::TemplateDecl
                | NodeKind::UsingDecl
                | NodeKind::ConceptDecl
        )
    }

    /// Declarations that may carry template info (`template_info_decl_check`).
    #[inline]
    pub const fn may_have_template_info(self) -> bool {
        matches!(
            self,
            NodeKind::VarDecl
                | NodeKind::FunctionDecl
                | NodeKind::FieldDecl
                | NodeKind::TypeDecl
                | NodeKind::ConceptDecl
                | NodeKind::TemplateDecl
        )
    }

    /// Variable or function (`VAR_OR_FUNCTION_DECL_P`).
    #[inline]
    pub const fn is_var_or_function_decl(self) -> bool {
        matches!(self, NodeKind::VarDecl | NodeKind::FunctionDecl)
    }

    /// Operand layout for expression and statement kinds.
    pub const fn arity(self) -> Arity {
        use NodeKind as K;
        match self {
            K::StatementList | K::Constructor => Arity::AtLeast(0),
            K::CallExpr => Arity::AtLeast(1),
            K::AggrInitExpr => Arity::AtLeast(2),
            K::ExprStmt
            | K::UsingStmt
            | K::StmtExpr
            | K::NopExpr
            | K::ConvertExpr
            | K::ViewConvertExpr
            | K::NonLvalueExpr
            | K::StaticCastExpr
            | K::ImplicitConvExpr
            | K::AddrExpr
            | K::IndirectRef
            | K::ParenExpr
            | K::SizeofExpr
            | K::AlignofExpr
            | K::ThrowExpr => Arity::Fixed(1),
            K::TryBlock
            | K::Handler
            | K::EhSpecBlock
            | K::DeleteExpr
            | K::ComponentRef
            | K::ScopeRef
            | K::OffsetRef
            | K::ArrayRef
            | K::ModifyExpr
            | K::CompoundExpr
            | K::VecInitExpr
            | K::ExprPackExpansion => Arity::Fixed(2),
            K::CleanupStmt | K::BindExpr | K::CondExpr | K::TargetExpr => Arity::Fixed(3),
            K::IfStmt | K::SwitchStmt | K::NewExpr => Arity::Fixed(4),
            K::RangeForStmt => Arity::Fixed(6),
            _ => Arity::None,
        }
    }

    /// Lower-case tree code name, for dumps and contract violation reports.
    pub const fn name(self) -> &'static str {
        use NodeKind as K;
        match self {
            K::ErrorMark => "error_mark",
            K::Identifier => "identifier_node",
            K::TreeList => "tree_list",
            K::TreeVec => "tree_vec",
            K::Block => "block",
            K::IntegerCst => "integer_cst",
            K::RealCst => "real_cst",
            K::StringCst => "string_cst",
            K::PtrmemCst => "ptrmem_cst",
            K::FunctionDecl => "function_decl",
            K::VarDecl => "var_decl",
            K::FieldDecl => "field_decl",
            K::ParmDecl => "parm_decl",
            K::ResultDecl => "result_decl",
            K::TypeDecl => "type_decl",
            K::TemplateDecl => "template_decl",
            K::NamespaceDecl => "namespace_decl",
            K::UsingDecl => "using_decl",
            K::ConstDecl => "const_decl",
            K::LabelDecl => "label_decl",
            K::ConceptDecl => "concept_decl",
            K::VoidType => "void_type",
            K::BooleanType => "boolean_type",
            K::IntegerType => "integer_type",
            K::RealType => "real_type",
            K::NullptrType => "nullptr_type",
            K::UnknownType => "unknown_type",
            K::PointerType => "pointer_type",
            K::ReferenceType => "reference_type",
            K::OffsetType => "offset_type",
            K::ArrayType => "array_type",
            K::FunctionType => "function_type",
            K::MethodType => "method_type",
            K::RecordType => "record_type",
            K::UnionType => "union_type",
            K::EnumeralType => "enumeral_type",
            K::TemplateTypeParm => "template_type_parm",
            K::TemplateTemplateParm => "template_template_parm",
            K::BoundTemplateTemplateParm => "bound_template_template_parm",
            K::TypenameType => "typename_type",
            K::DecltypeType => "decltype_type",
            K::TypePackExpansion => "type_pack_expansion",
            K::StatementList => "statement_list",
            K::ExprStmt => "expr_stmt",
            K::IfStmt => "if_stmt",
            K::SwitchStmt => "switch_stmt",
            K::RangeForStmt => "range_for_stmt",
            K::TryBlock => "try_block",
            K::Handler => "handler",
            K::CleanupStmt => "cleanup_stmt",
            K::EhSpecBlock => "eh_spec_block",
            K::UsingStmt => "using_stmt",
            K::BindExpr => "bind_expr",
            K::StmtExpr => "stmt_expr",
            K::CallExpr => "call_expr",
            K::AggrInitExpr => "aggr_init_expr",
            K::NewExpr => "new_expr",
            K::DeleteExpr => "delete_expr",
            K::CondExpr => "cond_expr",
            K::NopExpr => "nop_expr",
            K::ConvertExpr => "convert_expr",
            K::ViewConvertExpr => "view_convert_expr",
            K::NonLvalueExpr => "non_lvalue_expr",
            K::StaticCastExpr => "static_cast_expr",
            K::ImplicitConvExpr => "implicit_conv_expr",
            K::TargetExpr => "target_expr",
            K::Constructor => "constructor",
            K::AddrExpr => "addr_expr",
            K::IndirectRef => "indirect_ref",
            K::ComponentRef => "component_ref",
            K::ScopeRef => "scope_ref",
            K::OffsetRef => "offset_ref",
            K::ArrayRef => "array_ref",
            K::ModifyExpr => "modify_expr",
            K::CompoundExpr => "compound_expr",
            K::ParenExpr => "paren_expr",
            K::SizeofExpr => "sizeof_expr",
            K::AlignofExpr => "alignof_expr",
            K::VecInitExpr => "vec_init_expr",
            K::ExprPackExpansion => "expr_pack_expansion",
            K::ThrowExpr => "throw_expr",
            K::Overload => "overload",
            K::Baselink => "baselink",
            K::TemplateInfo => "template_info",
            K::TemplateParmIndex => "template_parm_index",
            K::LambdaExpr => "lambda_expr",
            K::TraitExpr => "trait_expr",
            K::StaticAssert => "static_assert",
            K::Binfo => "tree_binfo",
        }
    }
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of kinds accepted by a checked accessor.
///
/// Stored as a static slice so contract violation reports can list the
/// expected kinds without allocating.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct KindSet(pub &'static [NodeKind]);

impl KindSet {
    pub const DECLS: KindSet = KindSet(&[
        NodeKind::FunctionDecl,
        NodeKind::VarDecl,
        NodeKind::FieldDecl,
        NodeKind::ParmDecl,
        NodeKind::ResultDecl,
        NodeKind::TypeDecl,
        NodeKind::TemplateDecl,
        NodeKind::NamespaceDecl,
        NodeKind::UsingDecl,
        NodeKind::ConstDecl,
        NodeKind::LabelDecl,
        NodeKind::ConceptDecl,
    ]);

    pub const CLASS_TYPES: KindSet = KindSet(&[NodeKind::RecordType, NodeKind::UnionType]);

    #[inline]
    pub fn contains(self, kind: NodeKind) -> bool {
        self.0.contains(&kind)
    }
}

impl fmt::Debug for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl fmt::Display for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            f.write_str(kind.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
