//! Expressions and statements.
//!
//! Most expression and statement kinds store their children as operand
//! slots (see [`NodeKind::arity`]); the accessors here give those slots
//! their names. Kinds with richer payloads (lists, blocks, lambdas, trait
//! expressions, static assertions) live in the submodules.

mod lambda;
mod list;

pub use lambda::{CaptureDefault, CpTraitKind, LambdaData, StaticAssertData, TraitData, TraitOperands};
pub use list::{BlockData, ListData, ListRole};

use crate::check::{ContractViolation, OrViolation};
use crate::flags::{
    CallExprFlags, DeleteExprFlags, IfStmtFlags, NewExprFlags, TargetExprFlags, TryBlockFlags,
};
use crate::{KindSet, NodeId, NodeKind, Span, Tree};

/// Named getter/setter pairs over fixed operand slots.
macro_rules! operand_accessors {
    ($(
        $(#[$meta:meta])*
        $kind:ident[$index:literal] => $get:ident, $set:ident;
    )+) => {
        impl Tree {
            $(
                $(#[$meta])*
                #[track_caller]
                pub fn $get(&self, id: NodeId) -> Option<NodeId> {
                    const KINDS: KindSet = KindSet(&[NodeKind::$kind]);
                    self.try_named_operand(id, KINDS, $index, stringify!($get)).or_violation()
                }

                #[track_caller]
                pub fn $set(&mut self, id: NodeId, value: Option<NodeId>) {
                    const KINDS: KindSet = KindSet(&[NodeKind::$kind]);
                    self.check_kind(id, KINDS, stringify!($set)).or_violation();
                    self.set_operand_checked(id, $index, value, stringify!($set));
                }
            )+
        }
    };
}

operand_accessors! {
    /// `IF_COND`.
    IfStmt[0] => if_cond, set_if_cond;
    /// `THEN_CLAUSE`.
    IfStmt[1] => then_clause, set_then_clause;
    /// `ELSE_CLAUSE`.
    IfStmt[2] => else_clause, set_else_clause;
    /// `IF_SCOPE`.
    IfStmt[3] => if_scope, set_if_scope;

    SwitchStmt[0] => switch_stmt_cond, set_switch_stmt_cond;
    SwitchStmt[1] => switch_stmt_body, set_switch_stmt_body;
    /// Original type of the condition, before promotions.
    SwitchStmt[2] => switch_stmt_type, set_switch_stmt_type;
    SwitchStmt[3] => switch_stmt_scope, set_switch_stmt_scope;

    /// `RANGE_FOR_DECL`.
    RangeForStmt[0] => range_for_decl, set_range_for_decl;
    /// `RANGE_FOR_EXPR`.
    RangeForStmt[1] => range_for_expr, set_range_for_expr;
    RangeForStmt[2] => range_for_body, set_range_for_body;
    RangeForStmt[3] => range_for_scope, set_range_for_scope;
    /// Unroll factor from a `#pragma GCC unroll`.
    RangeForStmt[4] => range_for_unroll, set_range_for_unroll;
    RangeForStmt[5] => range_for_init_stmt, set_range_for_init_stmt;

    /// `TRY_STMTS`.
    TryBlock[0] => try_stmts, set_try_stmts;
    /// `TRY_HANDLERS`.
    TryBlock[1] => try_handlers, set_try_handlers;

    /// `HANDLER_PARMS`: the catch parameter declaration.
    Handler[0] => handler_parms, set_handler_parms;
    Handler[1] => handler_body, set_handler_body;

    CleanupStmt[0] => cleanup_body, set_cleanup_body;
    CleanupStmt[1] => cleanup_expr, set_cleanup_expr;
    /// Variable whose destruction the cleanup performs.
    CleanupStmt[2] => cleanup_decl, set_cleanup_decl;

    /// `EXPR_STMT_EXPR`.
    ExprStmt[0] => expr_stmt_expr, set_expr_stmt_expr;

    /// `STMT_EXPR_STMT`.
    StmtExpr[0] => stmt_expr_stmt, set_stmt_expr_stmt;

    EhSpecBlock[0] => eh_spec_stmts, set_eh_spec_stmts;
    /// Exception types the block may raise.
    EhSpecBlock[1] => eh_spec_raises, set_eh_spec_raises;

    /// `USING_STMT_NAMESPACE`.
    UsingStmt[0] => using_stmt_namespace, set_using_stmt_namespace;

    BindExpr[0] => bind_expr_vars, set_bind_expr_vars;
    BindExpr[1] => bind_expr_body, set_bind_expr_body;
    BindExpr[2] => bind_expr_block, set_bind_expr_block;

    /// `TARGET_EXPR_SLOT`: the temporary.
    TargetExpr[0] => target_expr_slot, set_target_expr_slot;
    TargetExpr[1] => target_expr_initial, set_target_expr_initial;
    TargetExpr[2] => target_expr_cleanup, set_target_expr_cleanup;

    /// `CALL_EXPR_FN`.
    CallExpr[0] => call_expr_fn, set_call_expr_fn;

    /// `AGGR_INIT_EXPR_FN`.
    AggrInitExpr[0] => aggr_init_expr_fn, set_aggr_init_expr_fn;
    /// `AGGR_INIT_EXPR_SLOT`: the object being initialized.
    AggrInitExpr[1] => aggr_init_expr_slot, set_aggr_init_expr_slot;

    /// Placement arguments of a new-expression.
    NewExpr[0] => new_expr_placement, set_new_expr_placement;
    NewExpr[1] => new_expr_type, set_new_expr_type;
    /// Element count of an array new.
    NewExpr[2] => new_expr_nelts, set_new_expr_nelts;
    NewExpr[3] => new_expr_init, set_new_expr_init;

    DeleteExpr[0] => delete_expr_operand, set_delete_expr_operand;
    DeleteExpr[1] => delete_expr_size, set_delete_expr_size;

    /// `COND_EXPR_COND`.
    CondExpr[0] => cond_expr_cond, set_cond_expr_cond;
    CondExpr[1] => cond_expr_then, set_cond_expr_then;
    CondExpr[2] => cond_expr_else, set_cond_expr_else;

    /// The object of a member access.
    ComponentRef[0] => component_ref_object, set_component_ref_object;
    /// The `FIELD_DECL`, or an overload set or baselink for member
    /// functions.
    ComponentRef[1] => component_ref_member, set_component_ref_member;
}

impl Tree {
    fn try_named_operand(
        &self,
        id: NodeId,
        kinds: KindSet,
        index: usize,
        accessor: &'static str,
    ) -> Result<Option<NodeId>, ContractViolation> {
        self.check_kind(id, kinds, accessor)?;
        self.try_operand(id, index, accessor)
    }

    /// Operands from `first` on, for the variable-length tails of calls and
    /// aggregate initializations.
    #[track_caller]
    fn trailing_operands(&self, id: NodeId, kinds: KindSet, first: usize, accessor: &'static str) -> &[Option<NodeId>] {
        self.check_kind(id, kinds, accessor).or_violation();
        self.try_operands(id, accessor)
            .or_violation()
            .get(first..)
            .unwrap_or_default()
    }

    /// Arguments of a call (`CALL_EXPR_ARG` over `0..call_expr_nargs`).
    #[track_caller]
    pub fn call_expr_args(&self, id: NodeId) -> &[Option<NodeId>] {
        const CALL: KindSet = KindSet(&[NodeKind::CallExpr]);
        self.trailing_operands(id, CALL, 1, "call_expr_args")
    }

    /// `call_expr_nargs`.
    #[track_caller]
    pub fn call_expr_nargs(&self, id: NodeId) -> usize {
        self.call_expr_args(id).len()
    }

    /// `AGGR_INIT_EXPR_ARG` over all arguments.
    #[track_caller]
    pub fn aggr_init_expr_args(&self, id: NodeId) -> &[Option<NodeId>] {
        const AGGR_INIT: KindSet = KindSet(&[NodeKind::AggrInitExpr]);
        self.trailing_operands(id, AGGR_INIT, 2, "aggr_init_expr_args")
    }

    /// Statements of a statement list, in order.
    #[track_caller]
    pub fn statement_list_stmts(&self, id: NodeId) -> &[Option<NodeId>] {
        const STATEMENT_LIST: KindSet = KindSet(&[NodeKind::StatementList]);
        self.trailing_operands(id, STATEMENT_LIST, 0, "statement_list_stmts")
    }

    /// Elements of a brace-enclosed initializer (`CONSTRUCTOR_ELTS`).
    #[track_caller]
    pub fn constructor_elts(&self, id: NodeId) -> &[Option<NodeId>] {
        const CONSTRUCTOR: KindSet = KindSet(&[NodeKind::Constructor]);
        self.trailing_operands(id, CONSTRUCTOR, 0, "constructor_elts")
    }

    /// `HANDLER_TYPE`: the caught type, stored as the handler's type.
    #[track_caller]
    pub fn handler_type(&self, id: NodeId) -> Option<NodeId> {
        const HANDLER: KindSet = KindSet(&[NodeKind::Handler]);
        self.check_kind(id, HANDLER, "handler_type").or_violation();
        self.ty(id)
    }

    // === Locations and callees ===

    /// `EXPR_LOCATION`: unknown for anything but expressions and
    /// statements.
    #[track_caller]
    pub fn expr_location(&self, id: NodeId) -> Span {
        let kind = self.kind(id);
        if kind.is_expr() || kind.is_stmt() {
            self.span(id)
        } else {
            Span::DUMMY
        }
    }

    #[track_caller]
    pub fn expr_loc_or_loc(&self, id: NodeId, or_loc: Span) -> Span {
        let span = self.expr_location(id);
        if span.is_dummy() {
            or_loc
        } else {
            span
        }
    }

    #[track_caller]
    pub fn expr_loc_or_input_loc(&self, id: NodeId) -> Span {
        self.expr_loc_or_loc(id, self.input_location())
    }

    /// `STRIP_NOPS`: look through value-preserving conversions.
    #[track_caller]
    pub fn strip_nops(&self, mut id: NodeId) -> NodeId {
        while matches!(
            self.kind(id),
            NodeKind::NopExpr | NodeKind::ConvertExpr | NodeKind::NonLvalueExpr
        ) {
            match self.operand(id, 0) {
                Some(inner) => id = inner,
                None => break,
            }
        }
        id
    }

    /// `get_fndecl_from_callee`: the function declaration a call's callee
    /// names, either directly or through the address of the function.
    #[track_caller]
    pub fn get_fndecl_from_callee(&self, callee: Option<NodeId>) -> Option<NodeId> {
        let callee = callee?;
        if self.kind(callee) == NodeKind::FunctionDecl {
            return Some(callee);
        }
        let ty = self.ty(callee)?;
        if !matches!(self.kind(ty), NodeKind::PointerType | NodeKind::ReferenceType) {
            return None;
        }
        let mut callee = self.strip_nops(callee);
        if self.kind(callee) == NodeKind::AddrExpr {
            callee = self.operand(callee, 0)?;
        }
        (self.kind(callee) == NodeKind::FunctionDecl).then_some(callee)
    }

    // === Statement and expression flags ===

    /// `IF_STMT_CONSTEXPR_P`.
    #[track_caller]
    pub fn if_stmt_constexpr_p(&self, id: NodeId) -> bool {
        self.lang_flag(id, IfStmtFlags::CONSTEXPR)
    }

    /// `IF_STMT_CONSTEVAL_P`.
    #[track_caller]
    pub fn if_stmt_consteval_p(&self, id: NodeId) -> bool {
        self.lang_flag(id, IfStmtFlags::CONSTEVAL)
    }

    /// `FN_TRY_BLOCK_P`: the try block is a function-try-block.
    #[track_caller]
    pub fn fn_try_block_p(&self, id: NodeId) -> bool {
        self.lang_flag(id, TryBlockFlags::FN_TRY_BLOCK)
    }

    /// `CLEANUP_P`: the try block is really a cleanup.
    #[track_caller]
    pub fn cleanup_p(&self, id: NodeId) -> bool {
        self.lang_flag(id, TryBlockFlags::CLEANUP)
    }

    /// `NEW_EXPR_USE_GLOBAL`.
    #[track_caller]
    pub fn new_expr_use_global(&self, id: NodeId) -> bool {
        self.lang_flag(id, NewExprFlags::USE_GLOBAL)
    }

    /// `DELETE_EXPR_USE_GLOBAL`.
    #[track_caller]
    pub fn delete_expr_use_global(&self, id: NodeId) -> bool {
        self.lang_flag(id, DeleteExprFlags::USE_GLOBAL)
    }

    /// `DELETE_EXPR_USE_VEC`.
    #[track_caller]
    pub fn delete_expr_use_vec(&self, id: NodeId) -> bool {
        self.lang_flag(id, DeleteExprFlags::USE_VEC)
    }

    /// `KOENIG_LOOKUP_P`.
    #[track_caller]
    pub fn koenig_lookup_p(&self, id: NodeId) -> bool {
        self.lang_flag(id, CallExprFlags::KOENIG_LOOKUP)
    }

    /// `TARGET_EXPR_IMPLICIT_P`.
    #[track_caller]
    pub fn target_expr_implicit_p(&self, id: NodeId) -> bool {
        self.lang_flag(id, TargetExprFlags::IMPLICIT)
    }
}

#[cfg(test)]
mod tests;
