//! Static extraction of `setup()` keyword arguments from `setup.py`.
//!
//! The script is parsed with `rustpython-parser` and never executed. Only
//! top-level statements are inspected: simple assignments feed an
//! [`AssignmentTable`], and the single `setup(...)` expression statement
//! provides the [`CallArguments`].
//!
//! The table holds only assignments that precede the call, last write wins.
//! A name rebound after `setup(...)` keeps its earlier value, matching what
//! Python sees when it runs the script. This is narrower than collecting
//! every top-level assignment in the module.

use std::path::Path;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use rustpython_parser::Parse;
use rustpython_parser::ast::{self, Ranged};
use tracing::{debug, trace, warn};

use crate::error::{ExtractionError, MigrateError};
use crate::legacy::value::LiteralValue;

/// The name of the build-declaration function.
const SETUP_FUNCTION: &str = "setup";

/// Top-level variable bindings, last write wins.
pub type AssignmentTable = FxHashMap<String, LiteralValue>;

/// Keyword arguments of the `setup()` call, in source order.
pub type CallArguments = IndexMap<String, LiteralValue>;

/// Outcome of scanning a module for its `setup()` call.
#[derive(Debug, PartialEq)]
pub enum SetupCall {
    NotFound,
    Found(CallArguments),
    /// More than one top-level `setup()` call; holds the number found.
    Ambiguous(usize),
}

/// Extract the `setup()` keyword arguments from the text of a `setup.py`.
pub fn extract(source: &str, path: &Path) -> Result<CallArguments, MigrateError> {
    let suite = parse(source, path)?;
    match scan_setup_call(&suite) {
        SetupCall::Found(arguments) => {
            debug!(
                "Extracted {} keyword arguments from {}",
                arguments.len(),
                path.display()
            );
            Ok(arguments)
        }
        SetupCall::NotFound => Err(ExtractionError::NotFound.into()),
        SetupCall::Ambiguous(count) => Err(ExtractionError::Ambiguous { count }.into()),
    }
}

/// Parse Python source into its top-level statements.
pub fn parse(source: &str, path: &Path) -> Result<Vec<ast::Stmt>, MigrateError> {
    let source_path = path.to_string_lossy();
    ast::Suite::parse(source, &source_path).map_err(|err| {
        let (line, column) = line_column(source, usize::from(err.offset));
        MigrateError::Parse {
            path: path.to_path_buf(),
            line,
            column,
            message: err.error.to_string(),
        }
    })
}

/// Locate the single top-level `setup()` call and resolve its keyword arguments.
///
/// Bare names inside the call resolve against assignments that precede it.
pub fn scan_setup_call(suite: &[ast::Stmt]) -> SetupCall {
    let calls: Vec<(usize, &ast::ExprCall)> = suite
        .iter()
        .enumerate()
        .filter_map(|(index, stmt)| setup_call(stmt).map(|call| (index, call)))
        .collect();

    match calls.as_slice() {
        [] => SetupCall::NotFound,
        [(index, call)] => {
            let assignments = collect_assignments(&suite[..*index]);
            SetupCall::Found(call_arguments(call, &assignments))
        }
        _ => SetupCall::Ambiguous(calls.len()),
    }
}

/// Build the assignment table from a run of top-level statements.
pub fn collect_assignments(suite: &[ast::Stmt]) -> AssignmentTable {
    let mut assignments = AssignmentTable::default();
    for stmt in suite {
        match stmt {
            ast::Stmt::Assign(ast::StmtAssign { targets, value, .. }) => {
                let resolved = resolve(value, &assignments);
                for target in targets {
                    if let ast::Expr::Name(ast::ExprName { id, .. }) = target {
                        trace!("Recorded assignment to `{}`", id.as_str());
                        assignments.insert(id.as_str().to_owned(), resolved.clone());
                    }
                }
            }
            ast::Stmt::AnnAssign(ast::StmtAnnAssign {
                target,
                value: Some(value),
                ..
            }) => {
                if let ast::Expr::Name(ast::ExprName { id, .. }) = target.as_ref() {
                    let resolved = resolve(value, &assignments);
                    assignments.insert(id.as_str().to_owned(), resolved);
                }
            }
            _ => {}
        }
    }
    assignments
}

/// Resolve an expression to a literal value without evaluating it.
///
/// Unknown bare names resolve to [`LiteralValue::Symbol`]; anything that
/// would need evaluation resolves to [`LiteralValue::Unresolved`] with a
/// warning.
pub fn resolve(expr: &ast::Expr, assignments: &AssignmentTable) -> LiteralValue {
    match expr {
        ast::Expr::Constant(ast::ExprConstant { value, .. }) => {
            resolve_constant(value, expr.range().start().into())
        }
        ast::Expr::Name(ast::ExprName { id, .. }) => assignments
            .get(id.as_str())
            .cloned()
            .unwrap_or_else(|| LiteralValue::Symbol(id.as_str().to_owned())),
        ast::Expr::List(ast::ExprList { elts, .. })
        | ast::Expr::Tuple(ast::ExprTuple { elts, .. })
        | ast::Expr::Set(ast::ExprSet { elts, .. }) => {
            LiteralValue::List(elts.iter().map(|elt| resolve(elt, assignments)).collect())
        }
        ast::Expr::Dict(ast::ExprDict { keys, values, .. }) => {
            LiteralValue::dict(keys.iter().zip(values).filter_map(|(key, value)| {
                let Some(key) = key else {
                    warn!(
                        offset = usize::from(value.range().start()),
                        "Skipping `**` unpacking inside a dict literal"
                    );
                    return None;
                };
                Some((resolve(key, assignments), resolve(value, assignments)))
            }))
        }
        _ => {
            warn!(
                kind = expr_kind(expr),
                offset = usize::from(expr.range().start()),
                "Cannot statically resolve expression; using an empty value"
            );
            LiteralValue::Unresolved
        }
    }
}

fn resolve_constant(constant: &ast::Constant, offset: usize) -> LiteralValue {
    match constant {
        ast::Constant::None => LiteralValue::None,
        ast::Constant::Bool(b) => LiteralValue::Bool(*b),
        ast::Constant::Str(s) => LiteralValue::Str(s.clone()),
        ast::Constant::Int(int) => match int.to_string().parse::<i64>() {
            Ok(int) => LiteralValue::Int(int),
            Err(_) => {
                warn!(offset, "Integer literal `{int}` does not fit in 64 bits");
                LiteralValue::Unresolved
            }
        },
        ast::Constant::Float(f) => LiteralValue::Float(*f),
        ast::Constant::Tuple(items) => LiteralValue::List(
            items
                .iter()
                .map(|item| resolve_constant(item, offset))
                .collect(),
        ),
        ast::Constant::Bytes(_) | ast::Constant::Complex { .. } | ast::Constant::Ellipsis => {
            warn!(offset, "Cannot represent constant `{constant:?}`; using an empty value");
            LiteralValue::Unresolved
        }
    }
}

/// Return the call if this statement is a bare `setup(...)` or `<module>.setup(...)`.
fn setup_call(stmt: &ast::Stmt) -> Option<&ast::ExprCall> {
    let ast::Stmt::Expr(ast::StmtExpr { value, .. }) = stmt else {
        return None;
    };
    let ast::Expr::Call(call) = value.as_ref() else {
        return None;
    };
    let is_setup = match call.func.as_ref() {
        ast::Expr::Name(ast::ExprName { id, .. }) => id.as_str() == SETUP_FUNCTION,
        ast::Expr::Attribute(ast::ExprAttribute { attr, .. }) => attr.as_str() == SETUP_FUNCTION,
        _ => false,
    };
    is_setup.then_some(call)
}

fn call_arguments(call: &ast::ExprCall, assignments: &AssignmentTable) -> CallArguments {
    if !call.args.is_empty() {
        debug!(
            "Ignoring {} positional argument(s) to `setup()`",
            call.args.len()
        );
    }

    let mut arguments = CallArguments::default();
    for keyword in &call.keywords {
        match &keyword.arg {
            Some(name) => {
                arguments.insert(name.as_str().to_owned(), resolve(&keyword.value, assignments));
            }
            None => warn!("Ignoring `**` keyword unpacking in `setup()`"),
        }
    }
    arguments
}

fn expr_kind(expr: &ast::Expr) -> &'static str {
    match expr {
        ast::Expr::Call(_) => "call",
        ast::Expr::BinOp(_) => "binary operation",
        ast::Expr::UnaryOp(_) => "unary operation",
        ast::Expr::BoolOp(_) => "boolean operation",
        ast::Expr::Compare(_) => "comparison",
        ast::Expr::Attribute(_) => "attribute access",
        ast::Expr::Subscript(_) => "subscript",
        ast::Expr::JoinedStr(_) => "f-string",
        ast::Expr::ListComp(_)
        | ast::Expr::SetComp(_)
        | ast::Expr::DictComp(_)
        | ast::Expr::GeneratorExp(_) => "comprehension",
        ast::Expr::Lambda(_) => "lambda",
        ast::Expr::IfExp(_) => "conditional expression",
        _ => "expression",
    }
}

/// Convert a byte offset into a 1-based line and column.
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for (index, ch) in source.char_indices() {
        if index >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}
