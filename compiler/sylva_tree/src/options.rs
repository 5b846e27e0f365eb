//! Option sets passed between client passes.
//!
//! None of these change how the tree behaves; they are the vocabulary that
//! lookup, conversion and template code use when calling each other.

use bitflags::bitflags;

bitflags! {
    /// How a lookup or overload resolution behaves (`LOOKUP_*`).
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct LookupFlags: u32 {
        /// Check access.
        const PROTECT = 1 << 0;
        /// Call a virtual function directly.
        const NONVIRTUAL = 1 << 1;
        /// Explicit constructors are not candidates.
        const ONLYCONVERTING = 1 << 2;
        /// A temporary lives as long as the current bindings.
        const DIRECT_BIND = 1 << 3;
        /// Inside a user-defined conversion; no second one allowed.
        const NO_CONVERSION = 1 << 4;
        /// Explicit destructor call.
        const DESTRUCTOR = 1 << 5;
        /// References may not bind to temporaries.
        const NO_TEMP_BIND = 1 << 6;
        const PREFER_RVALUE = 1 << 7;
        /// Narrowing conversions are ill-formed.
        const NO_NARROWING = 1 << 8;
        const LIST_INIT_CTOR = 1 << 9;
        /// First parameter of a copy constructor.
        const COPY_PARM = 1 << 10;
        /// Only initializer-list constructors.
        const LIST_ONLY = 1 << 11;
        /// Stop once the callee is known and access is checked.
        const SPECULATIVE = 1 << 12;
        /// Call from a defaulted function.
        const DEFAULTED = 1 << 13;
        const ALREADY_DIGESTED = 1 << 14;
        /// Like `NO_TEMP_BIND`, and no binding to xvalues either.
        const NO_RVAL_BIND = 1 << 15;
        const NO_NON_INTEGRAL = 1 << 16;
        const DELEGATING_CONS = 1 << 17;
        const ALLOW_FLEXARRAY_INIT = 1 << 18;
        /// Rewritten comparison candidate.
        const REWRITTEN = 1 << 19;
        /// Arguments of a rewritten comparison are swapped.
        const REVERSED = 1 << 20;
        const AGGREGATE_PAREN_INIT = 1 << 21;
    }
}

impl LookupFlags {
    /// `LOOKUP_NORMAL`.
    pub const NORMAL: LookupFlags = LookupFlags::PROTECT;
    /// `LOOKUP_IMPLICIT`: copy-initialization.
    pub const IMPLICIT: LookupFlags = LookupFlags::PROTECT.union(LookupFlags::ONLYCONVERTING);
}

bitflags! {
    /// Conversions a conversion request may perform (`CONV_*`).
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct ConvFlags: u8 {
        /// Standard and user-defined implicit conversions.
        const IMPLICIT = 1 << 0;
        /// Those of `static_cast`.
        const STATIC = 1 << 1;
        /// Those of `const_cast`.
        const CONST = 1 << 2;
        /// Those of `reinterpret_cast`.
        const REINTERPRET = 1 << 3;
        /// Upcasts to private bases.
        const PRIVATE = 1 << 4;
        /// Always make a new temporary for same-type aggregates.
        const FORCE_TEMP = 1 << 5;
        /// Fold the result.
        const FOLD = 1 << 6;
    }
}

impl ConvFlags {
    /// `CONV_OLD_CONVERT`.
    pub const OLD_CONVERT: ConvFlags = ConvFlags::IMPLICIT
        .union(ConvFlags::STATIC)
        .union(ConvFlags::CONST)
        .union(ConvFlags::REINTERPRET);
    /// `CONV_C_CAST`: everything a C-style cast may do.
    pub const C_CAST: ConvFlags = ConvFlags::OLD_CONVERT
        .union(ConvFlags::PRIVATE)
        .union(ConvFlags::FORCE_TEMP);
    /// `CONV_BACKEND_CONVERT`.
    pub const BACKEND_CONVERT: ConvFlags = ConvFlags::OLD_CONVERT.union(ConvFlags::FOLD);
}

bitflags! {
    /// Types acceptable to an expression-type conversion (`WANT_*`).
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct WantFlags: u8 {
        /// Integer types, `bool` included.
        const INT = 1 << 0;
        const FLOAT = 1 << 1;
        const ENUM = 1 << 2;
        const POINTER = 1 << 3;
        /// Null pointer constant.
        const NULL = 1 << 4;
        const VECTOR_OR_COMPLEX = 1 << 5;
    }
}

impl WantFlags {
    /// `WANT_ARITH`.
    pub const ARITH: WantFlags = WantFlags::INT.union(WantFlags::FLOAT).union(WantFlags::VECTOR_OR_COMPLEX);
}

/// Where an expression is converted to `void` (`impl_conv_void`). Decides
/// the wording of discarded-value diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ImplConvVoid {
    /// Explicit conversion to `void`.
    Cast,
    SecondOfCond,
    ThirdOfCond,
    RightOfComma,
    LeftOfComma,
    Statement,
    /// Increment expression of a `for`.
    ThirdInFor,
}

impl ImplConvVoid {
    /// Only an explicit cast asks for the discard; every other context
    /// discards implicitly.
    pub const fn is_explicit(self) -> bool {
        matches!(self, ImplConvVoid::Cast)
    }

    /// Phrase naming the context in a diagnostic.
    pub const fn describe(self) -> &'static str {
        match self {
            ImplConvVoid::Cast => "conversion to void",
            ImplConvVoid::SecondOfCond => "second operand of conditional expression",
            ImplConvVoid::ThirdOfCond => "third operand of conditional expression",
            ImplConvVoid::RightOfComma => "right operand of comma operator",
            ImplConvVoid::LeftOfComma => "left operand of comma operator",
            ImplConvVoid::Statement => "statement",
            ImplConvVoid::ThirdInFor => "for increment expression",
        }
    }
}

/// How much of two template argument lists must agree.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TmplArgsMatch {
    /// Every level, element by element.
    #[default]
    Exact,
    /// Only the innermost level of each list (`INNERMOST_TEMPLATE_ARGS`).
    Innermost,
}
