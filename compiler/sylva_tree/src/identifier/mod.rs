//! Identifier nodes, identifier categories, and the operator table.
//!
//! Identifiers are interned: one node per spelling. Each identifier carries
//! a 3-bit category code in its tree flag bank:
//!
//! | Code | Category |
//! |------|----------|
//! | 0 | ordinary name |
//! | 1 | keyword |
//! | 2 | constructor name |
//! | 3 | destructor name |
//! | 4 | overloaded operator |
//! | 5 | assignment operator |
//! | 6 | conversion operator |
//! | 7 | reserved (user-defined literal) |
//!
//! Every category predicate is a mask test on those three bits, so an
//! identifier belongs to exactly one category or to none.

use bitflags::bitflags;
use tracing::trace;

use crate::check::{ContractViolation, OrViolation};
use crate::flags::IdentifierFlags;
use crate::node::{Node, Payload};
use crate::scope::BindingId;
use crate::{KindSet, NodeId, NodeKind, Span, Tree};

const IDENTIFIER: KindSet = KindSet(&[NodeKind::Identifier]);

/// Identifier category code.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum IdentifierKind {
    Normal = 0,
    Keyword = 1,
    Ctor = 2,
    Dtor = 3,
    SimpleOp = 4,
    AssignOp = 5,
    ConvOp = 6,
    ReservedForUdlit = 7,
}

impl IdentifierKind {
    const BIT_0: u8 = 1 << 0;
    const BIT_1: u8 = 1 << 1;
    const BIT_2: u8 = 1 << 2;

    /// Decode the low three bits.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => IdentifierKind::Normal,
            1 => IdentifierKind::Keyword,
            2 => IdentifierKind::Ctor,
            3 => IdentifierKind::Dtor,
            4 => IdentifierKind::SimpleOp,
            5 => IdentifierKind::AssignOp,
            6 => IdentifierKind::ConvOp,
            _ => IdentifierKind::ReservedForUdlit,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "kind code occupies slots 0-2"
    )]
    pub(crate) fn from_flags(flags: IdentifierFlags) -> Self {
        Self::from_bits((flags.bits() & 0b111) as u8)
    }

    pub(crate) fn apply(self, flags: IdentifierFlags) -> IdentifierFlags {
        let kept = flags.bits() & !0b111;
        IdentifierFlags::from_bits_retain(kept | u16::from(self.bits()))
    }

    /// `IDENTIFIER_KEYWORD_P`.
    #[inline]
    pub const fn is_keyword(self) -> bool {
        self.bits() & (Self::BIT_2 | Self::BIT_1 | Self::BIT_0) == Self::BIT_0
    }

    /// `IDENTIFIER_CDTOR_P`.
    #[inline]
    pub const fn is_cdtor(self) -> bool {
        self.bits() & (Self::BIT_2 | Self::BIT_1) == Self::BIT_1
    }

    /// `IDENTIFIER_CTOR_P`.
    #[inline]
    pub const fn is_ctor(self) -> bool {
        self.bits() & (Self::BIT_2 | Self::BIT_1 | Self::BIT_0) == Self::BIT_1
    }

    /// `IDENTIFIER_DTOR_P`.
    #[inline]
    pub const fn is_dtor(self) -> bool {
        self.bits() & (Self::BIT_2 | Self::BIT_1 | Self::BIT_0) == Self::BIT_1 | Self::BIT_0
    }

    /// Any operator name, including conversion operators
    /// (`IDENTIFIER_ANY_OP_P`).
    #[inline]
    pub const fn is_any_op(self) -> bool {
        self.bits() & Self::BIT_2 != 0
    }

    /// Overloadable operator, assignment forms included
    /// (`IDENTIFIER_OVL_OP_P`).
    #[inline]
    pub const fn is_ovl_op(self) -> bool {
        self.bits() & (Self::BIT_2 | Self::BIT_1) == Self::BIT_2
    }

    /// Overloadable operator that is not an assignment form.
    #[inline]
    pub const fn is_simple_op(self) -> bool {
        self.bits() & (Self::BIT_2 | Self::BIT_1 | Self::BIT_0) == Self::BIT_2
    }

    /// `IDENTIFIER_ASSIGN_OP_P`.
    #[inline]
    pub const fn is_assign_op(self) -> bool {
        self.bits() & (Self::BIT_2 | Self::BIT_1 | Self::BIT_0) == Self::BIT_2 | Self::BIT_0
    }

    /// `IDENTIFIER_CONV_OP_P`.
    #[inline]
    pub const fn is_conv_op(self) -> bool {
        self.bits() & (Self::BIT_2 | Self::BIT_1 | Self::BIT_0) == Self::BIT_2 | Self::BIT_1
    }
}

bitflags! {
    /// Operator table flags (`ovl_op_flags`).
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct OperatorFlags: u8 {
        const UNARY = 1 << 0;
        const BINARY = 1 << 1;
        /// Allocation function (`operator new`).
        const ALLOC = 1 << 2;
        /// Deallocation function (`operator delete`).
        const DELETE = 1 << 3;
        /// Array form.
        const VEC = 1 << 4;
    }
}

/// Overloadable operator code (`ovl_op_code`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum OvlOpCode {
    New,
    VecNew,
    Delete,
    VecDelete,
    Plus,
    Minus,
    Mult,
    Div,
    Mod,
    BitAnd,
    BitIor,
    BitXor,
    BitNot,
    TruthNot,
    Lt,
    Gt,
    Eq,
    Ne,
    Le,
    Ge,
    Spaceship,
    TruthAnd,
    TruthOr,
    Lshift,
    Rshift,
    Increment,
    Decrement,
    MemberRefPtr,
    Arrow,
    Call,
    Subscript,
    Comma,
    /// Plain assignment; only has an assignment form.
    Nop,
}

/// One operator table entry.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct OperatorInfo {
    pub code: OvlOpCode,
    /// Spelling after `operator`.
    pub name: &'static str,
    /// Itanium ABI mangling.
    pub mangled: &'static str,
    pub flags: OperatorFlags,
}

const fn op(
    code: OvlOpCode,
    name: &'static str,
    mangled: &'static str,
    flags: OperatorFlags,
) -> OperatorInfo {
    OperatorInfo {
        code,
        name,
        mangled,
        flags,
    }
}

const UN: OperatorFlags = OperatorFlags::UNARY;
const BIN: OperatorFlags = OperatorFlags::BINARY;
const BOTH: OperatorFlags = OperatorFlags::UNARY.union(OperatorFlags::BINARY);

/// Plain operators, indexed by `OvlOpCode`.
pub const OPERATORS: &[OperatorInfo] = &[
    op(OvlOpCode::New, "new", "nw", OperatorFlags::ALLOC),
    op(OvlOpCode::VecNew, "new []", "na", OperatorFlags::ALLOC.union(OperatorFlags::VEC)),
    op(OvlOpCode::Delete, "delete", "dl", OperatorFlags::DELETE),
    op(OvlOpCode::VecDelete, "delete []", "da", OperatorFlags::DELETE.union(OperatorFlags::VEC)),
    op(OvlOpCode::Plus, "+", "pl", BOTH),
    op(OvlOpCode::Minus, "-", "mi", BOTH),
    op(OvlOpCode::Mult, "*", "ml", BOTH),
    op(OvlOpCode::Div, "/", "dv", BIN),
    op(OvlOpCode::Mod, "%", "rm", BIN),
    op(OvlOpCode::BitAnd, "&", "an", BOTH),
    op(OvlOpCode::BitIor, "|", "or", BIN),
    op(OvlOpCode::BitXor, "^", "eo", BIN),
    op(OvlOpCode::BitNot, "~", "co", UN),
    op(OvlOpCode::TruthNot, "!", "nt", UN),
    op(OvlOpCode::Lt, "<", "lt", BIN),
    op(OvlOpCode::Gt, ">", "gt", BIN),
    op(OvlOpCode::Eq, "==", "eq", BIN),
    op(OvlOpCode::Ne, "!=", "ne", BIN),
    op(OvlOpCode::Le, "<=", "le", BIN),
    op(OvlOpCode::Ge, ">=", "ge", BIN),
    op(OvlOpCode::Spaceship, "<=>", "ss", BIN),
    op(OvlOpCode::TruthAnd, "&&", "aa", BIN),
    op(OvlOpCode::TruthOr, "||", "oo", BIN),
    op(OvlOpCode::Lshift, "<<", "ls", BIN),
    op(OvlOpCode::Rshift, ">>", "rs", BIN),
    op(OvlOpCode::Increment, "++", "pp", UN),
    op(OvlOpCode::Decrement, "--", "mm", UN),
    op(OvlOpCode::MemberRefPtr, "->*", "pm", BIN),
    op(OvlOpCode::Arrow, "->", "pt", UN),
    op(OvlOpCode::Call, "()", "cl", OperatorFlags::empty()),
    op(OvlOpCode::Subscript, "[]", "ix", BIN),
    op(OvlOpCode::Comma, ",", "cm", BIN),
];

/// Assignment operators (`=` and the compound forms).
pub const ASSIGN_OPERATORS: &[OperatorInfo] = &[
    op(OvlOpCode::Nop, "=", "aS", BIN),
    op(OvlOpCode::Plus, "+=", "pL", BIN),
    op(OvlOpCode::Minus, "-=", "mI", BIN),
    op(OvlOpCode::Mult, "*=", "mL", BIN),
    op(OvlOpCode::Div, "/=", "dV", BIN),
    op(OvlOpCode::Mod, "%=", "rM", BIN),
    op(OvlOpCode::BitAnd, "&=", "aN", BIN),
    op(OvlOpCode::BitIor, "|=", "oR", BIN),
    op(OvlOpCode::BitXor, "^=", "eO", BIN),
    op(OvlOpCode::Lshift, "<<=", "lS", BIN),
    op(OvlOpCode::Rshift, ">>=", "rS", BIN),
];

/// An operator name: a code and whether the assignment form is meant.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct OperatorName {
    pub code: OvlOpCode,
    pub assign: bool,
}

impl OperatorName {
    pub const fn plain(code: OvlOpCode) -> Self {
        OperatorName {
            code,
            assign: false,
        }
    }

    pub const fn assign(code: OvlOpCode) -> Self {
        OperatorName { code, assign: true }
    }

    /// Table entry, `None` if the combination does not exist
    /// (e.g. `operator!=` has no assignment form).
    pub fn info(self) -> Option<&'static OperatorInfo> {
        let table = if self.assign {
            ASSIGN_OPERATORS
        } else {
            OPERATORS
        };
        table.iter().find(|info| info.code == self.code)
    }
}

/// Fixed keyword spellings interned at tree creation.
pub const KEYWORDS: &[&str] = &[
    "alignof", "auto", "bool", "break", "case", "catch", "char", "class", "const",
    "constexpr", "consteval", "constinit", "continue", "decltype", "default", "delete",
    "do", "double", "else", "enum", "explicit", "extern", "false", "for", "friend", "if",
    "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "nullptr",
    "operator", "private", "protected", "public", "return", "short", "signed", "sizeof",
    "static", "static_assert", "struct", "switch", "template", "this", "throw", "true",
    "try", "typedef", "typename", "union", "unsigned", "using", "virtual", "void",
    "volatile", "while",
];

/// Payload of an identifier node.
#[derive(Clone, Debug)]
pub struct IdentifierData {
    pub(crate) text: Box<str>,
    /// Operator table entry for operator names (`IDENTIFIER_OVL_OP_INFO`).
    pub(crate) operator: Option<OperatorName>,
    /// Innermost active binding (`IDENTIFIER_BINDING`).
    pub(crate) binding: Option<BindingId>,
    /// Type named at global scope (`IDENTIFIER_GLOBAL_TYPE_VALUE`).
    pub(crate) type_value: Option<NodeId>,
}

/// Interned identifiers plus the operator name lookup.
#[derive(Clone, Debug, Default)]
pub(crate) struct IdentifierTable {
    by_text: rustc_hash::FxHashMap<Box<str>, NodeId>,
    plain_ops: Vec<NodeId>,
    assign_ops: Vec<NodeId>,
}

impl Tree {
    /// Create the special identifiers at their fixed ids, then the keywords
    /// and the operator names.
    pub(crate) fn init_identifiers(&mut self) {
        let special: [(&str, IdentifierKind); 12] = [
            (" ctor", IdentifierKind::Ctor),
            (" complete_ctor", IdentifierKind::Ctor),
            (" base_ctor", IdentifierKind::Ctor),
            (" dtor", IdentifierKind::Dtor),
            (" complete_dtor", IdentifierKind::Dtor),
            (" base_dtor", IdentifierKind::Dtor),
            (" deleting_dtor", IdentifierKind::Dtor),
            (" conv_op", IdentifierKind::ConvOp),
            ("this", IdentifierKind::Keyword),
            ("__in_chrg", IdentifierKind::Normal),
            ("__vtt_parm", IdentifierKind::Normal),
            (" anon", IdentifierKind::Normal),
        ];
        for (text, kind) in special {
            let id = self.get_identifier(text);
            self.set_identifier_kind(id, kind);
        }
        debug_assert_eq!(self.len(), NodeId::PREDEFINED_COUNT as usize);

        for keyword in KEYWORDS {
            let id = self.get_identifier(keyword);
            self.set_identifier_kind(id, IdentifierKind::Keyword);
        }

        for info in OPERATORS {
            let id = self.intern_operator(info, OperatorName::plain(info.code));
            self.identifiers.plain_ops.push(id);
        }
        for info in ASSIGN_OPERATORS {
            let id = self.intern_operator(info, OperatorName::assign(info.code));
            self.identifiers.assign_ops.push(id);
        }
    }

    fn intern_operator(&mut self, info: &OperatorInfo, name: OperatorName) -> NodeId {
        let id = self.get_identifier(&format!("operator{}", info.name));
        let kind = if name.assign {
            IdentifierKind::AssignOp
        } else {
            IdentifierKind::SimpleOp
        };
        self.set_identifier_kind(id, kind);
        self.identifier_mut(id, "intern_operator").operator = Some(name);
        id
    }

    /// Intern `text`, creating the identifier on first use
    /// (`get_identifier`).
    pub fn get_identifier(&mut self, text: &str) -> NodeId {
        if let Some(&id) = self.identifiers.by_text.get(text) {
            return id;
        }
        let data = IdentifierData {
            text: text.into(),
            operator: None,
            binding: None,
            type_value: None,
        };
        let id = self.push(Node::new(
            NodeKind::Identifier,
            Span::DUMMY,
            Payload::Identifier(Box::new(data)),
        ));
        trace!(%id, text, "interned identifier");
        self.identifiers.by_text.insert(text.into(), id);
        id
    }

    /// Look up without creating (`maybe_get_identifier`).
    pub fn maybe_get_identifier(&self, text: &str) -> Option<NodeId> {
        self.identifiers.by_text.get(text).copied()
    }

    pub(crate) fn try_identifier(
        &self,
        id: NodeId,
        accessor: &'static str,
    ) -> Result<&IdentifierData, ContractViolation> {
        self.try_payload(id, IDENTIFIER, accessor, "identifier", |payload| match payload {
            Payload::Identifier(data) => Some(&**data),
            _ => None,
        })
    }

    #[track_caller]
    fn identifier_mut(&mut self, id: NodeId, accessor: &'static str) -> &mut IdentifierData {
        self.try_payload_mut(id, IDENTIFIER, accessor, "identifier", |payload| match payload {
            Payload::Identifier(data) => Some(&mut **data),
            _ => None,
        })
        .or_violation()
    }

    /// Spelling of an identifier (`IDENTIFIER_POINTER`).
    #[track_caller]
    pub fn identifier_text(&self, id: NodeId) -> &str {
        &self.try_identifier(id, "identifier_text").or_violation().text
    }

    /// Category code of an identifier.
    #[track_caller]
    pub fn identifier_kind(&self, id: NodeId) -> IdentifierKind {
        IdentifierKind::from_flags(self.lang_flags::<IdentifierFlags>(id))
    }

    #[track_caller]
    pub fn set_identifier_kind(&mut self, id: NodeId, kind: IdentifierKind) {
        let flags = self.lang_flags::<IdentifierFlags>(id);
        *self.lang_flags_mut::<IdentifierFlags>(id, "set_identifier_kind") = kind.apply(flags);
    }

    /// Identifier of the given operator, `None` for combinations missing
    /// from the table.
    pub fn operator_identifier(&self, name: OperatorName) -> Option<NodeId> {
        let (table, ids) = if name.assign {
            (ASSIGN_OPERATORS, &self.identifiers.assign_ops)
        } else {
            (OPERATORS, &self.identifiers.plain_ops)
        };
        let position = table.iter().position(|info| info.code == name.code)?;
        ids.get(position).copied()
    }

    /// Operator table entry of an operator identifier.
    #[track_caller]
    pub fn identifier_operator(&self, id: NodeId) -> Option<OperatorName> {
        self.try_identifier(id, "identifier_operator").or_violation().operator
    }

    /// `IDENTIFIER_NEWDEL_OP_P`: names an allocation or deallocation function.
    #[track_caller]
    pub fn identifier_newdel_op_p(&self, id: NodeId) -> bool {
        self.identifier_kind(id).is_simple_op()
            && self
                .identifier_operator(id)
                .and_then(OperatorName::info)
                .is_some_and(|info| info.flags.intersects(OperatorFlags::ALLOC | OperatorFlags::DELETE))
    }

    /// `IDENTIFIER_NEW_OP_P`.
    #[track_caller]
    pub fn identifier_new_op_p(&self, id: NodeId) -> bool {
        self.identifier_newdel_op_p(id)
            && self
                .identifier_operator(id)
                .and_then(OperatorName::info)
                .is_some_and(|info| info.flags.contains(OperatorFlags::ALLOC))
    }

    /// Conversion operator name for `ty` (`make_conv_op_name`). The
    /// identifier's type slot records the target type.
    pub fn make_conv_op_name(&mut self, ty: NodeId) -> NodeId {
        let id = self.get_identifier(&format!("operator {ty}"));
        self.set_identifier_kind(id, IdentifierKind::ConvOp);
        self.set_ty(id, Some(ty));
        id
    }

    /// Innermost binding of a name (`IDENTIFIER_BINDING`).
    #[track_caller]
    pub fn identifier_binding(&self, id: NodeId) -> Option<BindingId> {
        self.try_identifier(id, "identifier_binding").or_violation().binding
    }

    #[track_caller]
    pub fn set_identifier_binding(&mut self, id: NodeId, binding: Option<BindingId>) {
        self.identifier_mut(id, "set_identifier_binding").binding = binding;
    }

    /// Global type value (`IDENTIFIER_GLOBAL_TYPE_VALUE`).
    #[track_caller]
    pub fn identifier_type_value(&self, id: NodeId) -> Option<NodeId> {
        self.try_identifier(id, "identifier_type_value").or_violation().type_value
    }

    #[track_caller]
    pub fn set_identifier_type_value(&mut self, id: NodeId, ty: Option<NodeId>) {
        self.identifier_mut(id, "set_identifier_type_value").type_value = ty;
    }
}

#[cfg(test)]
mod tests;
