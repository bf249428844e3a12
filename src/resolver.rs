use std::collections::HashMap;
use std::mem;

use crate::error::ResolveError;
use crate::expr::*;
use crate::stmt::*;
use crate::token::Token;

enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

enum ClassType {
    None,
    Class,
    Subclass,
}

/// Walks the AST once after parsing to bind every variable reference to a
/// scope distance, written directly onto the node's `depth` cell (spec 3,
/// "mutation of shared nodes is acceptable"). Also enforces every static rule
/// that can only be checked with lexical scope in hand: illegal `return`,
/// `this`, and `super` contexts, self-inheriting classes, and `break` outside
/// a loop.
pub struct Resolver {
    scopes: Vec<HashMap<String, bool>>,
    current_function: FunctionType,
    current_class: ClassType,
    loop_depth: u32,
    errors: Vec<ResolveError>,
}

impl Resolver {
    pub fn new() -> Self {
        Resolver {
            scopes: vec![],
            current_function: FunctionType::None,
            current_class: ClassType::None,
            loop_depth: 0,
            errors: vec![],
        }
    }

    pub fn resolve(mut self, statements: &[Stmt]) -> Vec<ResolveError> {
        for statement in statements {
            self.resolve_stmt(statement);
        }
        self.errors
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        expr.accept(self);
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        stmt.accept(self);
    }

    fn resolve_function(&mut self, params: &[Token], body: &[Stmt], r#type: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, r#type);
        let enclosing_loop_depth = mem::replace(&mut self.loop_depth, 0);

        self.begin_scope();
        for param in params {
            self.declare(param);
            self.define(param);
        }
        for statement in body {
            self.resolve_stmt(statement);
        }
        self.end_scope();

        self.current_function = enclosing_function;
        self.loop_depth = enclosing_loop_depth;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.contains_key(&name.lexeme) {
            self.errors.push(ResolveError {
                token: name.clone(),
                message: "Already a variable with this name in this scope.".to_string(),
            });
        }
        scope.insert(name.lexeme.clone(), false);
    }

    fn define(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };
        scope.insert(name.lexeme.clone(), true);
    }

    /// Finds how many scopes out `name` is declared and writes that distance
    /// into `depth`. Leaves the sentinel `UNRESOLVED` (global, dynamic
    /// lookup) in place if no enclosing scope declares it.
    fn resolve_local(&self, name: &Token, depth: &std::cell::Cell<i32>) {
        for (i, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                depth.set(i as i32);
                return;
            }
        }
    }
}

impl ExprVisitor<()> for Resolver {
    fn visit_literal_expr(&mut self, _literal: &crate::literal::Literal) {}

    fn visit_grouping_expr(&mut self, data: &GroupingData) {
        self.resolve_expr(&data.expr);
    }

    fn visit_unary_expr(&mut self, data: &UnaryData) {
        self.resolve_expr(&data.expr);
    }

    fn visit_binary_expr(&mut self, data: &BinaryData) {
        self.resolve_expr(&data.left);
        self.resolve_expr(&data.right);
    }

    fn visit_logical_expr(&mut self, data: &LogicalData) {
        self.resolve_expr(&data.left);
        self.resolve_expr(&data.right);
    }

    fn visit_variable_expr(&mut self, data: &VariableData) {
        if let Some(scope) = self.scopes.last() {
            if let Some(false) = scope.get(&data.name.lexeme) {
                self.errors.push(ResolveError {
                    token: data.name.clone(),
                    message: "Can't read local variable in its own initializer.".to_string(),
                });
            }
        }

        self.resolve_local(&data.name, &data.depth);
    }

    fn visit_assign_expr(&mut self, data: &AssignData) {
        self.resolve_expr(&data.value);
        self.resolve_local(&data.name, &data.depth);
    }

    fn visit_call_expr(&mut self, data: &CallData) {
        self.resolve_expr(&data.callee);
        for argument in &data.arguments {
            self.resolve_expr(argument);
        }
    }

    fn visit_get_expr(&mut self, data: &GetData) {
        self.resolve_expr(&data.object);
    }

    fn visit_set_expr(&mut self, data: &SetData) {
        self.resolve_expr(&data.value);
        self.resolve_expr(&data.object);
    }

    fn visit_this_expr(&mut self, data: &ThisData) {
        if let ClassType::None = self.current_class {
            self.errors.push(ResolveError {
                token: data.keyword.clone(),
                message: "Can't use 'this' outside of a class.".to_string(),
            });
            return;
        }

        self.resolve_local(&data.keyword, &data.depth);
    }

    fn visit_super_expr(&mut self, data: &SuperData) {
        match self.current_class {
            ClassType::Subclass => {},
            ClassType::None => self.errors.push(ResolveError {
                token: data.keyword.clone(),
                message: "Can't use 'super' outside of a class.".to_string(),
            }),
            ClassType::Class => self.errors.push(ResolveError {
                token: data.keyword.clone(),
                message: "Can't use 'super' in a class with no superclass.".to_string(),
            }),
        }

        self.resolve_local(&data.keyword, &data.depth);
    }
}

impl StmtVisitor<()> for Resolver {
    fn visit_block_stmt(&mut self, data: &BlockData) {
        self.begin_scope();
        for statement in &data.statements {
            self.resolve_stmt(statement);
        }
        self.end_scope();
    }

    fn visit_var_stmt(&mut self, data: &VarData) {
        self.declare(&data.name);
        if let Some(initializer) = &data.initializer {
            self.resolve_expr(initializer);
        }
        self.define(&data.name);
    }

    fn visit_function_stmt(&mut self, data: &FunctionData) {
        self.declare(&data.name);
        self.define(&data.name);

        self.resolve_function(&data.params, &data.body, FunctionType::Function);
    }

    fn visit_expression_stmt(&mut self, data: &ExpressionData) {
        self.resolve_expr(&data.expr);
    }

    fn visit_if_stmt(&mut self, data: &IfData) {
        self.resolve_expr(&data.condition);
        self.resolve_stmt(&data.then_branch);
        if let Some(else_branch) = &data.else_branch {
            self.resolve_stmt(else_branch);
        }
    }

    fn visit_print_stmt(&mut self, data: &PrintData) {
        self.resolve_expr(&data.expr);
    }

    fn visit_return_stmt(&mut self, data: &ReturnData) {
        if let FunctionType::None = self.current_function {
            self.errors.push(ResolveError {
                token: data.keyword.clone(),
                message: "Can't return from top-level code.".to_string(),
            });
        }

        if let Some(value) = &data.value {
            if let FunctionType::Initializer = self.current_function {
                self.errors.push(ResolveError {
                    token: data.keyword.clone(),
                    message: "Can't return a value from an initializer.".to_string(),
                });
            } else {
                self.resolve_expr(value);
            }
        }
    }

    fn visit_break_stmt(&mut self, data: &BreakData) {
        if self.loop_depth == 0 {
            self.errors.push(ResolveError {
                token: data.keyword.clone(),
                message: "Can't use 'break' outside of a loop.".to_string(),
            });
        }
    }

    fn visit_while_stmt(&mut self, data: &WhileData) {
        self.resolve_expr(&data.condition);

        self.loop_depth += 1;
        self.resolve_stmt(&data.body);
        self.loop_depth -= 1;
    }

    fn visit_class_stmt(&mut self, data: &ClassData) {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(&data.name);
        self.define(&data.name);

        if let Some(superclass) = &data.superclass {
            if let Expr::Variable(variable) = superclass {
                if data.name.lexeme == variable.name.lexeme {
                    self.errors.push(ResolveError {
                        token: variable.name.clone(),
                        message: "A class can't inherit from itself.".to_string(),
                    });
                }
            }

            self.current_class = ClassType::Subclass;
            self.resolve_expr(superclass);

            self.begin_scope();
            self.scopes.last_mut().expect("scope stack to be non-empty").insert("super".to_string(), true);
        }

        self.begin_scope();
        self.scopes.last_mut().expect("scope stack to be non-empty").insert("this".to_string(), true);

        for method in &data.methods {
            if let Stmt::Function(function) = method {
                let declaration = if function.name.lexeme == "init" {
                    FunctionType::Initializer
                } else {
                    FunctionType::Method
                };
                self.resolve_function(&function.params, &function.body, declaration);
            }
        }

        self.end_scope();

        if data.superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }
}
