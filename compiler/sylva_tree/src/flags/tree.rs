//! Node-generic bank (`TREE_LANG_FLAG_0` .. `TREE_LANG_FLAG_6`).
//!
//! Families are listed in kind order: identifiers and lists, front-end
//! nodes, expressions, statements, declarations, types.

flag_bank! {
    /// Node-generic flags, one family per group of kinds.
    pub enum TreeLangFlags {
        Identifier(IdentifierFlags),
        TreeList(TreeListFlags),
        Block(BlockFlags),
        StringCst(StringCstFlags),
        Overload(OverloadFlags),
        Baselink(BaselinkFlags),
        TemplateInfo(TemplateInfoFlags),
        TemplateParmIndex(TemplateParmIndexFlags),
        Lambda(LambdaExprFlags),
        NewExpr(NewExprFlags),
        DeleteExpr(DeleteExprFlags),
        CondExpr(CondExprFlags),
        CallExpr(CallExprFlags),
        AggrInit(AggrInitFlags),
        PtrmemOk(PtrmemOkFlags),
        ScopeRef(ScopeRefFlags),
        Parenthesized(ParenthesizedFlags),
        IndirectRef(IndirectRefFlags),
        NopExpr(NopExprFlags),
        ConvertExpr(ConvertExprFlags),
        ImplicitRvalue(ImplicitRvalueFlags),
        ImplicitConv(ImplicitConvFlags),
        TargetExpr(TargetExprFlags),
        Constructor(ConstructorFlags),
        SizeofExpr(SizeofExprFlags),
        AlignofExpr(AlignofExprFlags),
        VecInit(VecInitFlags),
        PackExpansion(PackExpansionFlags),
        StatementList(StatementListFlags),
        ExprStmt(ExprStmtFlags),
        IfStmt(IfStmtFlags),
        SwitchStmt(SwitchStmtFlags),
        RangeFor(RangeForFlags),
        TryBlock(TryBlockFlags),
        Stmt(StmtFlags),
        BindExpr(BindExprFlags),
        StmtExpr(StmtExprFlags),
        VarDecl(VarDeclTreeFlags),
        FunctionDecl(FunctionDeclTreeFlags),
        NamespaceDecl(NamespaceDeclTreeFlags),
        FieldDecl(FieldDeclTreeFlags),
        TypeDecl(TypeDeclTreeFlags),
        Decl(DeclTreeFlags),
        RecordType(RecordTypeTreeFlags),
        TaggedType(TaggedTypeTreeFlags),
        FunctionType(FunctionTypeTreeFlags),
        TypenameType(TypenameTypeFlags),
        DecltypeType(DecltypeTypeFlags),
        TypePackExpansion(TypePackExpansionFlags),
        Type(TypeTreeFlags),
    }
}

// === Identifiers and lists ===

lang_flags! {
    /// Identifier flags. Slots 0-2 hold the 3-bit identifier kind code read
    /// by [`IdentifierKind`](crate::IdentifierKind); they are set through
    /// [`Tree::set_identifier_kind`](crate::Tree::set_identifier_kind).
    pub struct IdentifierFlags in TreeLangFlags::Identifier for [Identifier] {
        const KIND_BIT_0 = 0;
        const KIND_BIT_1 = 1;
        const KIND_BIT_2 = 2;
        /// Scratch mark for lookup walks (`IDENTIFIER_MARKED`).
        const MARKED = 4;
        /// A virtual function with this name is declared in the class being
        /// defined (`IDENTIFIER_VIRTUAL_P`).
        const VIRTUAL = 5;
    }
}

lang_flags! {
    /// List flags. The single slot's meaning is fixed by the list's
    /// [`ListRole`](crate::ListRole): dependent attribute, implicit ABI tag,
    /// explicit lambda capture or parenthesized parameter list.
    pub struct TreeListFlags in TreeLangFlags::TreeList for [TreeList] {
        const ROLE_MARK = 0;
    }
}

lang_flags! {
    pub struct BlockFlags in TreeLangFlags::Block for [Block] {
        /// Outermost braces of a function body.
        const OUTER_CURLY_BRACE = 0;
    }
}

lang_flags! {
    pub struct StringCstFlags in TreeLangFlags::StringCst for [StringCst] {
        /// Literal was written in parentheses.
        const PAREN_STRING_LITERAL = 0;
    }
}

// === Front-end nodes ===

lang_flags! {
    /// Overload set flags.
    pub struct OverloadFlags in TreeLangFlags::Overload for [Overload] {
        /// Set may contain duplicates introduced by using-declarations.
        const DEDUP = 0;
        /// This entry came from a using-declaration.
        const USING = 1;
        /// Hidden (friend injection or anticipated builtin). Hidden entries
        /// precede visible ones.
        const HIDDEN = 2;
        /// Entry is itself a nested overload set.
        const NESTED = 3;
        /// Built by lookup, not owned by a binding.
        const LOOKUP = 4;
        /// Exported using-declaration.
        const EXPORT = 5;
    }
}

lang_flags! {
    pub struct BaselinkFlags in TreeLangFlags::Baselink for [Baselink] {
        /// Name was qualified.
        const QUALIFIED = 0;
        /// Function set may grow once the class is complete.
        const FUNCTIONS_MAYBE_INCOMPLETE = 1;
    }
}

lang_flags! {
    pub struct TemplateInfoFlags in TreeLangFlags::TemplateInfo for [TemplateInfo] {
        const HAS_ACCESS_ERRORS = 0;
        /// Specialization was named with an explicit template-id.
        const USED_TEMPLATE_ID = 1;
    }
}

lang_flags! {
    pub struct TemplateParmIndexFlags in TreeLangFlags::TemplateParmIndex for [TemplateParmIndex] {
        const PARAMETER_PACK = 0;
    }
}

lang_flags! {
    pub struct LambdaExprFlags in TreeLangFlags::Lambda for [LambdaExpr] {
        const MUTABLE = 1;
        /// Captures were pruned after the body was parsed.
        const CAPTURE_OPTIMIZED = 2;
    }
}

// === Expressions ===

lang_flags! {
    pub struct NewExprFlags in TreeLangFlags::NewExpr for [NewExpr] {
        /// `::new`.
        const USE_GLOBAL = 0;
    }
}

lang_flags! {
    pub struct DeleteExprFlags in TreeLangFlags::DeleteExpr for [DeleteExpr] {
        /// `::delete`.
        const USE_GLOBAL = 0;
        /// `delete[]`.
        const USE_VEC = 1;
    }
}

lang_flags! {
    pub struct CondExprFlags in TreeLangFlags::CondExpr for [CondExpr] {
        const IS_VEC_DELETE = 0;
    }
}

lang_flags! {
    pub struct CallExprFlags in TreeLangFlags::CallExpr for [CallExpr] {
        /// Argument-dependent lookup applies.
        const KOENIG_LOOKUP = 0;
        const ORDERED_ARGS = 3;
        const HAS_CONSTRUCTOR = 4;
        const REVERSE_ARGS = 5;
        /// Written with operator syntax.
        const OPERATOR_SYNTAX = 6;
    }
}

lang_flags! {
    pub struct AggrInitFlags in TreeLangFlags::AggrInit for [AggrInitExpr] {
        /// Initialization goes through a constructor call.
        const VIA_CTOR = 0;
        /// Zero-initialize before calling the constructor.
        const ZERO_FIRST = 2;
        const ORDERED_ARGS = 3;
        const REVERSE_ARGS = 5;
        const OPERATOR_SYNTAX = 6;
    }
}

lang_flags! {
    pub struct PtrmemOkFlags in TreeLangFlags::PtrmemOk for [AddrExpr, OffsetRef] {
        /// May form a pointer to member.
        const PTRMEM_OK = 0;
    }
}

lang_flags! {
    pub struct ScopeRefFlags in TreeLangFlags::ScopeRef for [ScopeRef] {
        const PTRMEM_OK = 0;
        const QUALIFIED_NAME_IS_TEMPLATE = 1;
        const PARENTHESIZED = 2;
    }
}

lang_flags! {
    pub struct ParenthesizedFlags in TreeLangFlags::Parenthesized for [ComponentRef, ViewConvertExpr, ParenExpr] {
        /// Reference was wrapped in parentheses (matters for `decltype`).
        const PARENTHESIZED = 2;
    }
}

lang_flags! {
    pub struct IndirectRefFlags in TreeLangFlags::IndirectRef for [IndirectRef] {
        const PARENTHESIZED = 2;
        const HAS_CONSTRUCTOR = 4;
    }
}

lang_flags! {
    pub struct NopExprFlags in TreeLangFlags::NopExpr for [NopExpr] {
        const REINTERPRET_CAST = 0;
    }
}

lang_flags! {
    pub struct ConvertExprFlags in TreeLangFlags::ConvertExpr for [ConvertExpr] {
        /// Conversion follows a path through a virtual base.
        const VBASE_PATH = 0;
    }
}

lang_flags! {
    pub struct ImplicitRvalueFlags in TreeLangFlags::ImplicitRvalue for [NonLvalueExpr, StaticCastExpr] {
        const IMPLICIT_RVALUE = 3;
    }
}

lang_flags! {
    pub struct ImplicitConvFlags in TreeLangFlags::ImplicitConv for [ImplicitConvExpr] {
        const DIRECT_INIT = 0;
        const NONTYPE_ARG = 1;
        const BRACED_INIT = 2;
    }
}

lang_flags! {
    pub struct TargetExprFlags in TreeLangFlags::TargetExpr for [TargetExpr] {
        /// Temporary introduced implicitly.
        const IMPLICIT = 0;
        const LIST_INIT = 1;
        const DIRECT_INIT = 2;
    }
}

lang_flags! {
    pub struct ConstructorFlags in TreeLangFlags::Constructor for [Constructor] {
        const IS_DIRECT_INIT = 0;
        const IS_DEPENDENT = 1;
        const MUTABLE_POISON = 2;
        const C99_COMPOUND_LITERAL = 3;
        const HAS_CONSTRUCTOR = 4;
        const PLACEHOLDER_BOUNDARY = 5;
        const IS_DESIGNATED_INIT = 6;
    }
}

lang_flags! {
    pub struct SizeofExprFlags in TreeLangFlags::SizeofExpr for [SizeofExpr] {
        /// Operand is a type, not an expression.
        const TYPE_P = 0;
    }
}

lang_flags! {
    pub struct AlignofExprFlags in TreeLangFlags::AlignofExpr for [AlignofExpr] {
        /// Standard `alignof` rather than `__alignof__`.
        const STD_P = 0;
    }
}

lang_flags! {
    pub struct VecInitFlags in TreeLangFlags::VecInit for [VecInitExpr] {
        const IS_CONSTEXPR = 0;
        const VALUE_INIT = 1;
    }
}

lang_flags! {
    pub struct PackExpansionFlags in TreeLangFlags::PackExpansion for [ExprPackExpansion] {
        const LOCAL = 0;
        const SIZEOF = 1;
        const AUTO = 2;
        const FORCE_EXTRA_ARGS = 3;
    }
}

// === Statements ===

lang_flags! {
    pub struct StatementListFlags in TreeLangFlags::StatementList for [StatementList] {
        const NO_SCOPE = 0;
        const TRY_BLOCK = 2;
    }
}

lang_flags! {
    pub struct ExprStmtFlags in TreeLangFlags::ExprStmt for [ExprStmt] {
        /// Value of the enclosing statement-expression.
        const STMT_EXPR_RESULT = 0;
        const FULL_EXPR = 1;
    }
}

lang_flags! {
    pub struct IfStmtFlags in TreeLangFlags::IfStmt for [IfStmt] {
        const CONSTEXPR = 0;
        const FULL_EXPR = 1;
        const CONSTEVAL = 2;
    }
}

lang_flags! {
    pub struct SwitchStmtFlags in TreeLangFlags::SwitchStmt for [SwitchStmt] {
        /// Every enumerator has a case label.
        const ALL_CASES = 0;
        const FULL_EXPR = 1;
        const NO_BREAK = 2;
    }
}

lang_flags! {
    pub struct RangeForFlags in TreeLangFlags::RangeFor for [RangeForStmt] {
        const FULL_EXPR = 1;
        const IVDEP = 6;
    }
}

lang_flags! {
    pub struct TryBlockFlags in TreeLangFlags::TryBlock for [TryBlock] {
        /// Block only runs cleanups.
        const CLEANUP = 0;
        const FULL_EXPR = 1;
        /// Function-try-block.
        const FN_TRY_BLOCK = 3;
    }
}

lang_flags! {
    pub struct StmtFlags in TreeLangFlags::Stmt for [Handler, CleanupStmt, EhSpecBlock, UsingStmt] {
        const FULL_EXPR = 1;
    }
}

lang_flags! {
    pub struct BindExprFlags in TreeLangFlags::BindExpr for [BindExpr] {
        const TRY_BLOCK = 0;
        const VEC_DTOR = 1;
        const BODY_BLOCK = 3;
    }
}

lang_flags! {
    pub struct StmtExprFlags in TreeLangFlags::StmtExpr for [StmtExpr] {
        const NO_SCOPE = 0;
    }
}

// === Declarations ===

lang_flags! {
    pub struct VarDeclTreeFlags in TreeLangFlags::VarDecl for [VarDecl] {
        const THREAD_LOCAL = 0;
        /// Initializer has been seen.
        const INITIALIZED = 1;
        const INITIALIZED_BY_CONSTANT_EXPRESSION = 2;
        const MODULE_EXPORT = 3;
        /// Variable is a typeinfo object.
        const TINFO = 4;
        const NONTRIVIALLY_INITIALIZED = 6;
    }
}

lang_flags! {
    pub struct FunctionDeclTreeFlags in TreeLangFlags::FunctionDecl for [FunctionDecl] {
        /// Declared with `override`.
        const OVERRIDE = 0;
        /// Declared with `final`.
        const FINAL = 1;
        /// Return type deduced from `auto`.
        const USED_AUTO = 2;
        const MODULE_EXPORT = 3;
        const MANIFESTLY_CONST_EVALUATED = 4;
    }
}

lang_flags! {
    pub struct NamespaceDeclTreeFlags in TreeLangFlags::NamespaceDecl for [NamespaceDecl] {
        const INLINE = 0;
        const MODULE_EXPORT = 3;
        const LOOKUP_FOUND = 4;
    }
}

lang_flags! {
    pub struct FieldDeclTreeFlags in TreeLangFlags::FieldDecl for [FieldDecl] {
        const MODULE_EXPORT = 3;
        const HAS_CONSTRUCTOR = 4;
    }
}

lang_flags! {
    pub struct TypeDeclTreeFlags in TreeLangFlags::TypeDecl for [TypeDecl] {
        const MODULE_EXPORT = 3;
        /// Declaration of a typeinfo type.
        const TINFO = 4;
    }
}

lang_flags! {
    pub struct DeclTreeFlags in TreeLangFlags::Decl for [
        ParmDecl, ResultDecl, TemplateDecl, UsingDecl, ConstDecl, LabelDecl, ConceptDecl
    ] {
        const MODULE_EXPORT = 3;
    }
}

// === Types ===

lang_flags! {
    pub struct RecordTypeTreeFlags in TreeLangFlags::RecordType for [RecordType] {
        /// Record is the slice representation (`SLICE_TYPE_P`).
        const SLICE = 0;
        const LOOKUP_FOUND = 4;
        const MARKED = 6;
    }
}

lang_flags! {
    pub struct TaggedTypeTreeFlags in TreeLangFlags::TaggedType for [UnionType, EnumeralType] {
        const LOOKUP_FOUND = 4;
        const MARKED = 6;
    }
}

lang_flags! {
    pub struct FunctionTypeTreeFlags in TreeLangFlags::FunctionType for [FunctionType, MethodType] {
        /// Has a ref-qualifier.
        const REF_QUALIFIED = 4;
        /// The ref-qualifier is `&&`.
        const RVALUE_QUALIFIED = 5;
        const MARKED = 6;
    }
}

lang_flags! {
    pub struct TypenameTypeFlags in TreeLangFlags::TypenameType for [TypenameType] {
        const IS_ENUM = 0;
        const IS_CLASS = 1;
        const IS_RESOLVING = 2;
        const MARKED = 6;
    }
}

lang_flags! {
    pub struct DecltypeTypeFlags in TreeLangFlags::DecltypeType for [DecltypeType] {
        const FOR_LAMBDA_CAPTURE = 0;
        const FOR_LAMBDA_PROXY = 2;
        const FOR_REF_CAPTURE = 3;
        const MARKED = 6;
    }
}

lang_flags! {
    pub struct TypePackExpansionFlags in TreeLangFlags::TypePackExpansion for [TypePackExpansion] {
        const LOCAL = 0;
        const SIZEOF = 1;
        const AUTO = 2;
        const FORCE_EXTRA_ARGS = 3;
        const MARKED = 6;
    }
}

lang_flags! {
    pub struct TypeTreeFlags in TreeLangFlags::Type for [
        VoidType, BooleanType, IntegerType, RealType, NullptrType, UnknownType,
        PointerType, ReferenceType, OffsetType, ArrayType,
        TemplateTypeParm, TemplateTemplateParm, BoundTemplateTemplateParm
    ] {
        /// Scratch mark for type walks (`TYPE_MARKED_P`).
        const MARKED = 6;
    }
}
