//! Type bank (`TYPE_LANG_FLAG_0` .. `TYPE_LANG_FLAG_6`).
//!
//! Slots 0 and 6 mean the same thing on every type: dependence and whether
//! the cached dependence is valid. The remaining slots are kind specific.

flag_bank! {
    /// Type flags, present on type kinds only.
    pub enum TypeLangFlags {
        Class(ClassTypeFlags),
        Enum(EnumTypeFlags),
        Function(FunctionTypeFlags),
        TemplateTypeParm(TemplateTypeParmFlags),
        Other(OtherTypeFlags),
    }
}

lang_flags! {
    /// Records and unions.
    pub struct ClassTypeFlags in TypeLangFlags::Class for [RecordType, UnionType] {
        /// Depends on a template parameter.
        const DEPENDENT = 0;
        /// Has a user-declared constructor.
        const HAS_USER_CONSTRUCTOR = 1;
        /// Record is the representation of a pointer to member function.
        const PTRMEMFUNC = 2;
        const HAS_NONTRIVIAL_DESTRUCTOR = 4;
        /// Record is a class in the source language sense (`CLASS_TYPE_P`).
        const CLASS_TYPE = 5;
        /// `DEPENDENT` has been computed.
        const DEPENDENT_VALID = 6;
    }
}

lang_flags! {
    pub struct EnumTypeFlags in TypeLangFlags::Enum for [EnumeralType] {
        const DEPENDENT = 0;
        /// Declared with an explicit underlying type.
        const FIXED_UNDERLYING = 5;
        const DEPENDENT_VALID = 6;
    }
}

lang_flags! {
    pub struct FunctionTypeFlags in TypeLangFlags::Function for [FunctionType, MethodType] {
        const DEPENDENT = 0;
        /// Written with a trailing return type.
        const HAS_LATE_RETURN_TYPE = 2;
        const DEPENDENT_VALID = 6;
    }
}

lang_flags! {
    pub struct TemplateTypeParmFlags in TypeLangFlags::TemplateTypeParm for [TemplateTypeParm] {
        const DEPENDENT = 0;
        /// Placeholder is `decltype(auto)`.
        const AUTO_IS_DECLTYPE = 5;
        const DEPENDENT_VALID = 6;
    }
}

lang_flags! {
    pub struct OtherTypeFlags in TypeLangFlags::Other for [
        VoidType, BooleanType, IntegerType, RealType, NullptrType, UnknownType,
        PointerType, ReferenceType, OffsetType, ArrayType,
        TemplateTemplateParm, BoundTemplateTemplateParm,
        TypenameType, DecltypeType, TypePackExpansion
    ] {
        const DEPENDENT = 0;
        const DEPENDENT_VALID = 6;
    }
}
