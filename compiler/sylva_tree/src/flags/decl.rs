//! Declaration bank (`DECL_LANG_FLAG_0` .. `DECL_LANG_FLAG_8`).
//!
//! Slots 3 (`IN_AGGR`) and 5 (`INTERFACE_KNOWN`) are common to most
//! declaration kinds. Slot 2 on parameters is the constraint-variable flag
//! only; `THIS_EXTERN` shares that slot on variables and functions and is
//! not defined for parameters.

flag_bank! {
    /// Declaration flags, present on declaration kinds only.
    pub enum DeclLangFlags {
        Var(VarDeclFlags),
        Function(FunctionDeclFlags),
        Field(FieldDeclFlags),
        Parm(ParmDeclFlags),
        Type(TypeDeclFlags),
        Template(TemplateDeclFlags),
        Const(ConstDeclFlags),
        Using(UsingDeclFlags),
        Label(LabelDeclFlags),
        Other(OtherDeclFlags),
    }
}

lang_flags! {
    pub struct VarDeclFlags in DeclLangFlags::Var for [VarDecl] {
        /// Block-scope declaration of a namespace-scope entity.
        const LOCAL_DECL = 0;
        const TEMPLATE_INSTANTIATED = 1;
        /// Declared `extern`.
        const THIS_EXTERN = 2;
        /// Declared inside a class body.
        const IN_AGGR = 3;
        /// Member of an anonymous union.
        const ANON_UNION_VAR = 4;
        const INTERFACE_KNOWN = 5;
        /// Declared `static`.
        const THIS_STATIC = 6;
        const DECLARED_CONSTINIT = 7;
        const DECLARED_CONSTEXPR = 8;
    }
}

lang_flags! {
    pub struct FunctionDeclFlags in DeclLangFlags::Function for [FunctionDecl] {
        const LOCAL_DECL = 0;
        const TEMPLATE_INSTANTIATED = 1;
        const THIS_EXTERN = 2;
        const IN_AGGR = 3;
        /// Overrider with an incompatible return type.
        const INVALID_OVERRIDER = 4;
        const INTERFACE_KNOWN = 5;
        const THIS_STATIC = 6;
        const DECLARED_CONSTEXPR = 8;
    }
}

lang_flags! {
    pub struct FieldDeclFlags in DeclLangFlags::Field for [FieldDecl] {
        /// Declared `mutable`.
        const MUTABLE = 0;
        /// Capture proxy for a variable-length array.
        const VLA_CAPTURE = 1;
        /// Default member initializer is being instantiated.
        const INSTANTIATING_NSDMI = 2;
        const IN_AGGR = 3;
        const C_BIT_FIELD = 4;
        const INTERFACE_KNOWN = 5;
        /// Artificial field holding a base-class subobject.
        const FIELD_IS_BASE = 6;
        /// Lambda capture field for a normal (non-`this`) capture.
        const NORMAL_CAPTURE = 7;
    }
}

lang_flags! {
    pub struct ParmDeclFlags in DeclLangFlags::Parm for [ParmDecl] {
        const TEMPLATE_PARM = 0;
        /// Declared with array syntax.
        const ARRAY_PARAMETER = 1;
        /// Parameter of a requires-expression.
        const CONSTRAINT_VAR = 2;
        const IN_AGGR = 3;
        const INTERFACE_KNOWN = 5;
        const THIS_STATIC = 6;
    }
}

lang_flags! {
    pub struct TypeDeclFlags in DeclLangFlags::Type for [TypeDecl] {
        const TEMPLATE_PARM = 0;
        const TYPEDEF_EXPLICITLY_SIGNED = 1;
        /// Typedef created implicitly for a class or enum name.
        const IMPLICIT_TYPEDEF = 2;
        const IN_AGGR = 3;
        /// Injected-class-name.
        const SELF_REFERENCE = 4;
        const INTERFACE_KNOWN = 5;
        /// Alias-declaration (`using T = ...`).
        const ALIAS = 6;
    }
}

lang_flags! {
    pub struct TemplateDeclFlags in DeclLangFlags::Template for [TemplateDecl] {
        const TEMPLATE_PARM = 0;
        const MEMBER_TEMPLATE = 1;
        /// Alias template that is not equivalent to its pattern.
        const COMPLEX_ALIAS = 2;
        const IN_AGGR = 3;
        const UNINSTANTIATED_TEMPLATE_FRIEND = 4;
        const INTERFACE_KNOWN = 5;
    }
}

lang_flags! {
    pub struct ConstDeclFlags in DeclLangFlags::Const for [ConstDecl] {
        const TEMPLATE_PARM = 0;
        const IN_AGGR = 3;
        const INTERFACE_KNOWN = 5;
    }
}

lang_flags! {
    pub struct UsingDeclFlags in DeclLangFlags::Using for [UsingDecl] {
        /// Names a dependent scope.
        const DEPENDENT = 0;
        /// Written with `typename`.
        const TYPENAME = 1;
        /// Does not name a member of a base class.
        const UNRELATED = 2;
        const IN_AGGR = 3;
    }
}

lang_flags! {
    pub struct LabelDeclFlags in DeclLangFlags::Label for [LabelDecl] {
        /// Target of `break`.
        const BREAK = 0;
        /// Target of `continue`.
        const CONTINUE = 1;
        /// Return label of a constructor or destructor.
        const CDTOR = 2;
    }
}

lang_flags! {
    pub struct OtherDeclFlags in DeclLangFlags::Other for [
        ResultDecl, NamespaceDecl, ConceptDecl
    ] {
        const IN_AGGR = 3;
        const INTERFACE_KNOWN = 5;
    }
}
