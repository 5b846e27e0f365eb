use super::*;
use crate::Span;
use pretty_assertions::assert_eq;

fn int(tree: &mut Tree, value: i64) -> NodeId {
    tree.build_int_cst(NodeId::INT_TYPE, value)
}

// Operand slots

#[test]
fn if_statements_name_their_slots() {
    let mut tree = Tree::new();
    let cond = int(&mut tree, 1);
    let then = tree.build_nt(NodeKind::ExprStmt, Span::DUMMY, &[Some(cond)]);
    let stmt = tree.build_nt(NodeKind::IfStmt, Span::new(0, 20), &[Some(cond), Some(then), None, None]);

    assert_eq!(tree.if_cond(stmt), Some(cond));
    assert_eq!(tree.then_clause(stmt), Some(then));
    assert_eq!(tree.else_clause(stmt), None);
    assert_eq!(tree.expr_stmt_expr(then), Some(cond));

    tree.set_else_clause(stmt, Some(then));
    assert_eq!(tree.else_clause(stmt), Some(then));
    assert!(!tree.if_stmt_constexpr_p(stmt));
    tree.set_lang_flag(stmt, IfStmtFlags::CONSTEXPR, true);
    assert!(tree.if_stmt_constexpr_p(stmt));
    assert!(!tree.if_stmt_consteval_p(stmt));
}

#[test]
#[should_panic(expected = "then_clause: node")]
fn slot_names_belong_to_one_kind() {
    let mut tree = Tree::new();
    let stmt = tree.build_nt(NodeKind::SwitchStmt, Span::DUMMY, &[None, None, None, None]);
    tree.then_clause(stmt);
}

#[test]
fn try_blocks_and_handlers() {
    let mut tree = Tree::new();
    let name = tree.get_identifier("e");
    let parm = tree.build_decl(NodeKind::VarDecl, Span::DUMMY, Some(name), Some(NodeId::INT_TYPE));
    let handler = tree.build_nt(NodeKind::Handler, Span::DUMMY, &[Some(parm), None]);
    tree.set_ty(handler, Some(NodeId::INT_TYPE));
    let body = tree.build_nt(NodeKind::StatementList, Span::DUMMY, &[]);
    let block = tree.build_nt(NodeKind::TryBlock, Span::DUMMY, &[Some(body), Some(handler)]);

    assert_eq!(tree.try_stmts(block), Some(body));
    assert_eq!(tree.try_handlers(block), Some(handler));
    assert_eq!(tree.handler_parms(handler), Some(parm));
    assert_eq!(tree.handler_type(handler), Some(NodeId::INT_TYPE));
    assert!(tree.statement_list_stmts(body).is_empty());

    tree.set_lang_flag(block, TryBlockFlags::FN_TRY_BLOCK, true);
    assert!(tree.fn_try_block_p(block));
    assert!(!tree.cleanup_p(block));
}

#[test]
fn calls_keep_the_callee_in_slot_zero() {
    let mut tree = Tree::new();
    let name = tree.get_identifier("f");
    let f = tree.build_decl(NodeKind::FunctionDecl, Span::DUMMY, Some(name), None);
    let a = int(&mut tree, 1);
    let b = int(&mut tree, 2);
    let call = tree.build_nt(NodeKind::CallExpr, Span::DUMMY, &[Some(f), Some(a), Some(b)]);

    assert_eq!(tree.call_expr_fn(call), Some(f));
    assert_eq!(tree.call_expr_args(call), &[Some(a), Some(b)]);
    assert_eq!(tree.call_expr_nargs(call), 2);
    assert!(!tree.koenig_lookup_p(call));

    let bare = tree.build_nt(NodeKind::CallExpr, Span::DUMMY, &[Some(f)]);
    assert_eq!(tree.call_expr_nargs(bare), 0);
}

#[test]
fn aggregate_inits_keep_callee_and_slot_first() {
    let mut tree = Tree::new();
    let f = tree.build_decl(NodeKind::FunctionDecl, Span::DUMMY, None, None);
    let slot = tree.build_decl(NodeKind::VarDecl, Span::DUMMY, None, Some(NodeId::INT_TYPE));
    let arg = int(&mut tree, 7);
    let init = tree.build_nt(NodeKind::AggrInitExpr, Span::DUMMY, &[Some(f), Some(slot), Some(arg)]);

    assert_eq!(tree.aggr_init_expr_fn(init), Some(f));
    assert_eq!(tree.aggr_init_expr_slot(init), Some(slot));
    assert_eq!(tree.aggr_init_expr_args(init), &[Some(arg)]);
}

#[test]
fn new_and_delete_expressions() {
    let mut tree = Tree::new();
    let n = int(&mut tree, 4);
    let new = tree.build_nt(NodeKind::NewExpr, Span::DUMMY, &[None, Some(NodeId::INT_TYPE), Some(n), None]);
    let delete = tree.build_nt(NodeKind::DeleteExpr, Span::DUMMY, &[Some(new), None]);

    assert_eq!(tree.new_expr_type(new), Some(NodeId::INT_TYPE));
    assert_eq!(tree.new_expr_nelts(new), Some(n));
    assert_eq!(tree.delete_expr_operand(delete), Some(new));
    assert!(!tree.new_expr_use_global(new));

    tree.set_lang_flag(delete, DeleteExprFlags::USE_VEC, true);
    assert!(tree.delete_expr_use_vec(delete));
    assert!(!tree.delete_expr_use_global(delete));
    tree.set_lang_flag(new, NewExprFlags::USE_GLOBAL, true);
    assert!(tree.new_expr_use_global(new));
}

#[test]
fn temporaries_and_conditionals() {
    let mut tree = Tree::new();
    let slot = tree.build_decl(NodeKind::VarDecl, Span::DUMMY, None, Some(NodeId::INT_TYPE));
    let zero = int(&mut tree, 0);
    let one = int(&mut tree, 1);
    let target = tree.build_nt(NodeKind::TargetExpr, Span::DUMMY, &[Some(slot), Some(zero), None]);
    let cond = tree.build_nt(NodeKind::CondExpr, Span::DUMMY, &[Some(one), Some(target), Some(zero)]);

    assert_eq!(tree.target_expr_slot(target), Some(slot));
    assert_eq!(tree.target_expr_initial(target), Some(zero));
    assert_eq!(tree.target_expr_cleanup(target), None);
    assert!(!tree.target_expr_implicit_p(target));
    tree.set_lang_flag(target, TargetExprFlags::IMPLICIT, true);
    assert!(tree.target_expr_implicit_p(target));

    assert_eq!(tree.cond_expr_cond(cond), Some(one));
    assert_eq!(tree.cond_expr_then(cond), Some(target));
    assert_eq!(tree.cond_expr_else(cond), Some(zero));
}

#[test]
fn braced_initializers_list_their_elements() {
    let mut tree = Tree::new();
    let a = int(&mut tree, 1);
    let b = int(&mut tree, 2);
    let ctor = tree.build_nt(NodeKind::Constructor, Span::DUMMY, &[Some(a), Some(b)]);
    assert_eq!(tree.constructor_elts(ctor), &[Some(a), Some(b)]);
}

// Lists

#[test]
fn tree_cons_builds_chains() {
    let mut tree = Tree::new();
    let a = int(&mut tree, 1);
    let b = int(&mut tree, 2);
    let tail = tree.tree_cons(None, Some(b), None);
    let head = tree.tree_cons(Some(a), Some(a), Some(tail));

    assert_eq!(tree.list_length(Some(head)), 2);
    assert_eq!(tree.list_length(None), 0);
    assert_eq!(tree.tree_purpose(head), Some(a));
    assert_eq!(tree.tree_value(tail), Some(b));
    assert_eq!(tree.chain(head), Some(tail));
    assert_eq!(tree.list_role(head), ListRole::Plain);

    tree.set_tree_value(tail, None);
    tree.set_tree_purpose(tail, Some(b));
    assert_eq!(tree.tree_value(tail), None);
    assert_eq!(tree.tree_purpose(tail), Some(b));
}

#[test]
fn role_flags_read_under_their_role() {
    let mut tree = Tree::new();
    let attr = tree.build_list_with_role(ListRole::Attribute, None, None);
    let tag = tree.build_list_with_role(ListRole::AbiTag, None, None);
    let parms = tree.build_list_with_role(ListRole::ParameterList, None, None);

    tree.set_attr_is_dependent(attr, true);
    tree.set_parenthesized_list_p(parms, true);
    assert!(tree.attr_is_dependent(attr));
    assert!(!tree.abi_tag_implicit(tag));
    assert!(tree.parenthesized_list_p(parms));

    tree.set_abi_tag_implicit(tag, true);
    assert!(tree.abi_tag_implicit(tag));
}

#[test]
#[should_panic(expected = "holds the attribute list interpretation, not abi tag list")]
fn role_flags_under_another_role_abort() {
    let mut tree = Tree::new();
    let attr = tree.build_list_with_role(ListRole::Attribute, None, None);
    tree.abi_tag_implicit(attr);
}

// Blocks

#[test]
fn blocks_nest() {
    let mut tree = Tree::new();
    let var = tree.build_decl(NodeKind::VarDecl, Span::DUMMY, None, Some(NodeId::INT_TYPE));
    let outer = tree.build_block(Span::new(0, 50), None, None, None);
    let inner = tree.build_block(Span::new(10, 20), Some(var), None, Some(outer));
    tree.set_block_subblocks(outer, Some(inner));

    assert_eq!(tree.block_subblocks(outer), Some(inner));
    assert_eq!(tree.block_supercontext(inner), Some(outer));
    assert_eq!(tree.block_vars(inner), Some(var));
    assert_eq!(tree.block_vars(outer), None);

    tree.set_block_vars(outer, Some(var));
    tree.set_block_outer_curly_brace_p(outer, true);
    assert_eq!(tree.block_vars(outer), Some(var));
    assert!(tree.block_outer_curly_brace_p(outer));
    assert!(!tree.block_outer_curly_brace_p(inner));
}

// Lambdas

#[test]
fn lambda_captures_are_prepended() {
    let mut tree = Tree::new();
    let lambda = tree.build_lambda_expr(Span::new(3, 30));
    let x = tree.build_decl(NodeKind::FieldDecl, Span::DUMMY, None, Some(NodeId::INT_TYPE));
    let y = tree.build_decl(NodeKind::FieldDecl, Span::DUMMY, None, Some(NodeId::INT_TYPE));
    let init = int(&mut tree, 5);

    let first = tree.add_lambda_capture(lambda, x, None, false);
    let second = tree.add_lambda_capture(lambda, y, Some(init), true);

    assert_eq!(tree.lambda_expr_capture_list(lambda), Some(second));
    assert_eq!(tree.chain(second), Some(first));
    assert_eq!(tree.tree_purpose(second), Some(y));
    assert_eq!(tree.tree_value(second), Some(init));
    assert!(tree.lambda_capture_explicit_p(second));
    assert!(!tree.lambda_capture_explicit_p(first));
    assert_eq!(tree.list_role(first), ListRole::LambdaCapture);
}

#[test]
fn lambda_properties() {
    let mut tree = Tree::new();
    let lambda = tree.build_lambda_expr(Span::DUMMY);
    let closure = tree.make_class_type(NodeKind::RecordType, None);
    let this = tree.build_decl(NodeKind::FieldDecl, Span::DUMMY, None, None);
    let scope = tree.build_decl(NodeKind::VarDecl, Span::DUMMY, None, None);

    assert_eq!(tree.lambda_expr_closure(lambda), None);
    assert_eq!(tree.lambda_expr_default_capture_mode(lambda), CaptureDefault::None);
    assert!(!tree.lambda_expr_captures_this_p(lambda));

    tree.set_ty(lambda, Some(closure));
    tree.set_lambda_expr_default_capture_mode(lambda, CaptureDefault::Reference);
    tree.set_lambda_expr_this_capture(lambda, Some(this));
    tree.set_lambda_expr_extra_scope(lambda, Some(scope));
    tree.set_lambda_expr_discriminator(lambda, 2);
    tree.set_lambda_expr_mutable_p(lambda, true);

    assert_eq!(tree.lambda_expr_closure(lambda), Some(closure));
    assert_eq!(tree.lambda_expr_default_capture_mode(lambda), CaptureDefault::Reference);
    assert!(tree.lambda_expr_captures_this_p(lambda));
    assert_eq!(tree.lambda_expr_this_capture(lambda), Some(this));
    assert_eq!(tree.lambda_expr_extra_scope(lambda), Some(scope));
    assert_eq!(tree.lambda_expr_discriminator(lambda), 2);
    assert!(tree.lambda_expr_mutable_p(lambda));
    assert!(!tree.lambda_expr_capture_optimized(lambda));

    tree.set_lambda_expr_capture_optimized(lambda, true);
    assert!(tree.lambda_expr_capture_optimized(lambda));
}

// Trait expressions and static assertions

#[test]
fn trait_operand_counts() {
    assert_eq!(CpTraitKind::IsClass.operands(), TraitOperands::Unary);
    assert_eq!(CpTraitKind::IsBaseOf.operands(), TraitOperands::Binary);
    assert_eq!(CpTraitKind::IsConstructible.operands(), TraitOperands::Variadic);
    assert!(CpTraitKind::UnderlyingType.yields_type());
    assert!(!CpTraitKind::IsPod.yields_type());
}

#[test]
fn trait_expressions_check_their_arity() {
    let mut tree = Tree::new();
    let class = tree.make_class_type(NodeKind::RecordType, None);

    let unary = tree.build_trait_expr(Span::DUMMY, CpTraitKind::IsClass, class, None);
    assert_eq!(tree.trait_expr_kind(unary), CpTraitKind::IsClass);
    assert_eq!(tree.trait_expr_type1(unary), class);
    assert_eq!(tree.trait_expr_type2(unary), None);
    assert_eq!(tree.ty(unary), Some(NodeId::BOOL_TYPE));

    let binary = tree.build_trait_expr(Span::DUMMY, CpTraitKind::IsBaseOf, class, Some(class));
    assert_eq!(tree.trait_expr_type2(binary), Some(class));

    let underlying = tree.build_trait_expr(Span::DUMMY, CpTraitKind::UnderlyingType, class, None);
    assert_eq!(tree.ty(underlying), None);

    tree.build_trait_expr(Span::DUMMY, CpTraitKind::IsConstructible, class, None);
    tree.build_trait_expr(Span::DUMMY, CpTraitKind::IsConstructible, class, Some(class));

    assert_eq!(
        tree.try_build_trait_expr(Span::DUMMY, CpTraitKind::IsSameAs, class, None),
        Err(ContractViolation::ArityMismatch {
            accessor: "build_trait_expr",
            kind: NodeKind::TraitExpr,
            found: 1,
            expected: crate::Arity::Fixed(2),
        })
    );
    assert!(tree
        .try_build_trait_expr(Span::DUMMY, CpTraitKind::IsEnum, class, Some(class))
        .is_err());
}

#[test]
fn static_assertions_keep_their_location() {
    let mut tree = Tree::new();
    let cond = int(&mut tree, 1);
    let message = tree.build_string(Span::new(20, 30), "too big");
    let assertion = tree.build_static_assert(Span::new(0, 40), cond, Some(message), Span::new(14, 15));

    assert_eq!(tree.static_assert_condition(assertion), cond);
    assert_eq!(tree.static_assert_message(assertion), Some(message));
    assert_eq!(tree.static_assert_source_location(assertion), Span::new(14, 15));
    assert_eq!(tree.span(assertion), Span::new(0, 40));
}

// Locations and callees

#[test]
fn locations_fall_back_when_unknown() {
    let mut tree = Tree::new();
    let fallback = Span::new(100, 104);
    let one = int(&mut tree, 1);
    let located = tree.build_expr(NodeKind::NopExpr, Span::new(3, 9), Some(NodeId::INT_TYPE), &[Some(one)]);
    let unlocated = tree.build_expr(NodeKind::NopExpr, Span::DUMMY, Some(NodeId::INT_TYPE), &[Some(one)]);
    let stmt = tree.build_nt(NodeKind::ExprStmt, Span::new(0, 10), &[Some(located)]);
    let name = tree.get_identifier("v");
    let decl = tree.build_decl(NodeKind::VarDecl, Span::new(20, 21), Some(name), Some(NodeId::INT_TYPE));

    assert_eq!(tree.expr_loc_or_loc(located, fallback), Span::new(3, 9));
    assert_eq!(tree.expr_loc_or_loc(stmt, fallback), Span::new(0, 10));
    assert_eq!(tree.expr_loc_or_loc(unlocated, fallback), fallback);
    // Declarations have no expression location.
    assert_eq!(tree.expr_location(decl), Span::DUMMY);
    assert_eq!(tree.expr_loc_or_loc(decl, fallback), fallback);

    assert_eq!(tree.expr_loc_or_input_loc(unlocated), Span::DUMMY);
    tree.set_input_location(Span::new(40, 44));
    assert_eq!(tree.expr_loc_or_input_loc(unlocated), Span::new(40, 44));
    assert_eq!(tree.expr_loc_or_input_loc(located), Span::new(3, 9));
}

#[test]
fn callees_resolve_through_addresses_and_conversions() {
    let mut tree = Tree::new();
    let name = tree.get_identifier("f");
    let fn_type = tree.build_function_type(NodeId::VOID_TYPE, &[]);
    let fn_ptr = tree.build_pointer_type(fn_type);
    let f = tree.build_lang_decl(NodeKind::FunctionDecl, Span::DUMMY, Some(name), Some(fn_type));
    let addr = tree.build_expr(NodeKind::AddrExpr, Span::DUMMY, Some(fn_ptr), &[Some(f)]);
    let converted = tree.build_expr(NodeKind::NopExpr, Span::DUMMY, Some(fn_ptr), &[Some(addr)]);
    let call = tree.build_expr(NodeKind::CallExpr, Span::DUMMY, Some(NodeId::VOID_TYPE), &[Some(converted)]);

    assert_eq!(tree.get_fndecl_from_callee(Some(f)), Some(f));
    assert_eq!(tree.get_fndecl_from_callee(Some(addr)), Some(f));
    assert_eq!(tree.strip_nops(converted), addr);
    assert_eq!(tree.get_fndecl_from_callee(tree.call_expr_fn(call)), Some(f));
    assert_eq!(tree.get_fndecl_from_callee(None), None);
}

#[test]
fn indirect_callees_have_no_declaration() {
    let mut tree = Tree::new();
    let fn_type = tree.build_function_type(NodeId::VOID_TYPE, &[]);
    let fn_ptr = tree.build_pointer_type(fn_type);
    let name = tree.get_identifier("p");
    let var = tree.build_decl(NodeKind::VarDecl, Span::DUMMY, Some(name), Some(fn_ptr));
    let int_ptr = tree.build_pointer_type(NodeId::INT_TYPE);
    let addr_of_var = tree.build_expr(NodeKind::AddrExpr, Span::DUMMY, Some(int_ptr), &[Some(var)]);
    let untyped = tree.build_expr(NodeKind::NopExpr, Span::DUMMY, None, &[Some(var)]);
    let value = tree.build_expr(NodeKind::NopExpr, Span::DUMMY, Some(fn_type), &[Some(var)]);

    assert_eq!(tree.get_fndecl_from_callee(Some(var)), None);
    assert_eq!(tree.get_fndecl_from_callee(Some(addr_of_var)), None);
    assert_eq!(tree.get_fndecl_from_callee(Some(untyped)), None);
    assert_eq!(tree.get_fndecl_from_callee(Some(value)), None);
}
