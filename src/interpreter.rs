use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use log::trace;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{ExecResult, ExecSignal, RuntimeError};
use crate::expr::*;
use crate::function::{Function, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::*;
use crate::token::{Token, Type};

/// Walks the resolved AST and evaluates it. Holds the global frame plus the
/// frame currently in scope, and owns the sink that both `print` output and
/// runtime error diagnostics are written to (spec 3, "print statements and
/// error diagnostics go to stdout").
pub struct Interpreter {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    output: Box<dyn Write>,
    call_depth: usize,
}

/// Calls nested this deep raise a catchable `RuntimeError` instead of
/// exhausting the real Rust call stack (spec.md 4.4, "Stack overflow
/// manifests as runtime error 'Stack overflow.'").
const MAX_CALL_DEPTH: usize = 255;

impl Interpreter {
    pub fn new(output: Box<dyn Write>) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new(None)));
        register_natives(&globals);

        Interpreter { environment: Rc::clone(&globals), globals, output, call_depth: 0 }
    }

    /// The sink `print` writes to; error diagnostics are reported through
    /// the same stream so output and errors interleave in the order they
    /// actually occurred (spec 3).
    pub fn output_mut(&mut self) -> &mut dyn Write {
        &mut self.output
    }

    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        trace!("interpreting {} top-level statements", statements.len());

        for statement in statements {
            match self.execute(statement) {
                Ok(()) => {},
                Err(ExecSignal::Runtime(error)) => return Err(error),
                Err(ExecSignal::Return(_)) | Err(ExecSignal::Break) => {
                    unreachable!("resolver guarantees return/break never escape top-level code")
                },
            }
        }

        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult<()> {
        stmt.accept(self)
    }

    /// Runs `statements` with `environment` as the active frame, restoring
    /// the previous frame afterward even if execution unwinds early via `?`.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> ExecResult<()> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let result = statements.iter().try_for_each(|statement| self.execute(statement));

        self.environment = previous;
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        expr.accept(self)
    }

    fn lookup_variable(&self, name: &Token, depth: &Cell<i32>) -> Result<Object, RuntimeError> {
        let result = if depth.get() == UNRESOLVED {
            self.globals.borrow().get_global(&name.lexeme)
        } else {
            self.environment.borrow().get_at(depth.get(), &name.lexeme)
        };

        result.map_err(|_| RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    fn assign_variable(&mut self, name: &Token, depth: &Cell<i32>, value: Object) -> Result<(), RuntimeError> {
        let result = if depth.get() == UNRESOLVED {
            self.globals.borrow_mut().assign_global(&name.lexeme, value)
        } else {
            self.environment.borrow_mut().assign_at(depth.get(), &name.lexeme, value)
        };

        result.map_err(|_| RuntimeError {
            token: name.clone(),
            message: format!("Undefined variable '{}'.", name.lexeme),
        })
    }

    fn call_value(&mut self, callee: Object, paren: &Token, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let arity = match &callee {
            Object::Function(function) => function.arity(),
            Object::NativeFunction(function) => function.arity(),
            Object::Class(class) => class.borrow().arity(),
            _ => {
                return Err(RuntimeError {
                    token: paren.clone(),
                    message: "Can only call functions and classes.".to_string(),
                });
            },
        };

        if arguments.len() != arity {
            return Err(RuntimeError {
                token: paren.clone(),
                message: format!("Expected {} arguments but got {}.", arity, arguments.len()),
            });
        }

        trace!("calling {callee} with {} argument(s)", arguments.len());

        if self.call_depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError { token: paren.clone(), message: "Stack overflow.".to_string() });
        }

        self.call_depth += 1;
        let result = match callee {
            Object::Function(function) => function.call(self, arguments),
            Object::NativeFunction(function) => function.call(self, arguments),
            Object::Class(class) => Class::instantiate(&class, self, arguments),
            _ => unreachable!("checked above"),
        };
        self.call_depth -= 1;

        result
    }
}

impl ExprVisitor<Result<Object, RuntimeError>> for Interpreter {
    fn visit_literal_expr(&mut self, literal: &Literal) -> Result<Object, RuntimeError> {
        Ok(Object::Literal(literal.clone()))
    }

    fn visit_grouping_expr(&mut self, data: &GroupingData) -> Result<Object, RuntimeError> {
        self.evaluate(&data.expr)
    }

    fn visit_unary_expr(&mut self, data: &UnaryData) -> Result<Object, RuntimeError> {
        let right = self.evaluate(&data.expr)?;

        match data.operator.r#type {
            Type::Minus => {
                let n = right.as_number().ok_or_else(|| RuntimeError {
                    token: data.operator.clone(),
                    message: "Operand must be a number.".to_string(),
                })?;
                Ok(Object::from(-n))
            },
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!("parser only ever produces '!' or '-' as a unary operator"),
        }
    }

    fn visit_binary_expr(&mut self, data: &BinaryData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;

        let numbers = |op: &Token| -> Result<(f64, f64), RuntimeError> {
            match (left.as_number(), right.as_number()) {
                (Some(l), Some(r)) => Ok((l, r)),
                _ => Err(RuntimeError { token: op.clone(), message: "Operands must be numbers.".to_string() }),
            }
        };

        match data.operator.r#type {
            Type::Greater => numbers(&data.operator).map(|(l, r)| Object::from(l > r)),
            Type::GreaterEqual => numbers(&data.operator).map(|(l, r)| Object::from(l >= r)),
            Type::Less => numbers(&data.operator).map(|(l, r)| Object::from(l < r)),
            Type::LessEqual => numbers(&data.operator).map(|(l, r)| Object::from(l <= r)),
            Type::Minus => numbers(&data.operator).map(|(l, r)| Object::from(l - r)),
            Type::Slash => numbers(&data.operator).map(|(l, r)| Object::from(l / r)),
            Type::Star => numbers(&data.operator).map(|(l, r)| Object::from(l * r)),
            Type::EqualEqual => Ok(Object::from(left.lox_eq(&right))),
            Type::BangEqual => Ok(Object::from(!left.lox_eq(&right))),
            Type::Plus => match (left.as_number(), right.as_number(), left.as_string(), right.as_string()) {
                (Some(l), Some(r), _, _) => Ok(Object::from(l + r)),
                (_, _, Some(l), Some(r)) => Ok(Object::from(format!("{l}{r}"))),
                _ => Err(RuntimeError {
                    token: data.operator.clone(),
                    message: "Operands must be two numbers or two strings.".to_string(),
                }),
            },
            _ => unreachable!("parser only ever produces a comparison/arithmetic/equality operator here"),
        }
    }

    fn visit_logical_expr(&mut self, data: &LogicalData) -> Result<Object, RuntimeError> {
        let left = self.evaluate(&data.left)?;

        match data.operator.r#type {
            Type::Or if left.is_truthy() => Ok(left),
            Type::And if !left.is_truthy() => Ok(left),
            _ => self.evaluate(&data.right),
        }
    }

    fn visit_variable_expr(&mut self, data: &VariableData) -> Result<Object, RuntimeError> {
        self.lookup_variable(&data.name, &data.depth)
    }

    fn visit_assign_expr(&mut self, data: &AssignData) -> Result<Object, RuntimeError> {
        let value = self.evaluate(&data.value)?;
        self.assign_variable(&data.name, &data.depth, value.clone())?;
        Ok(value)
    }

    fn visit_call_expr(&mut self, data: &CallData) -> Result<Object, RuntimeError> {
        let callee = self.evaluate(&data.callee)?;

        let mut arguments = Vec::with_capacity(data.arguments.len());
        for argument in &data.arguments {
            arguments.push(self.evaluate(argument)?);
        }

        self.call_value(callee, &data.paren, arguments)
    }

    fn visit_get_expr(&mut self, data: &GetData) -> Result<Object, RuntimeError> {
        let object = self.evaluate(&data.object)?;

        match &object {
            Object::Instance(instance) => instance.borrow().get(&data.name, &object),
            _ => Err(RuntimeError { token: data.name.clone(), message: "Only instances have properties.".to_string() }),
        }
    }

    fn visit_set_expr(&mut self, data: &SetData) -> Result<Object, RuntimeError> {
        let object = self.evaluate(&data.object)?;

        let Object::Instance(instance) = object else {
            return Err(RuntimeError { token: data.name.clone(), message: "Only instances have fields.".to_string() });
        };

        let value = self.evaluate(&data.value)?;
        instance.borrow_mut().set(&data.name, value.clone());
        Ok(value)
    }

    fn visit_this_expr(&mut self, data: &ThisData) -> Result<Object, RuntimeError> {
        self.lookup_variable(&data.keyword, &data.depth)
    }

    fn visit_super_expr(&mut self, data: &SuperData) -> Result<Object, RuntimeError> {
        let distance = data.depth.get();

        let superclass = self.environment.borrow().get_at(distance, "super")
            .expect("resolver guarantees 'super' is bound wherever this node appears");
        let Object::Class(superclass) = superclass else {
            unreachable!("'super' is only ever bound to a class value")
        };

        let this_instance = self.environment.borrow().get_at(distance - 1, "this")
            .expect("resolver guarantees 'this' is bound one frame inside 'super'");

        superclass.borrow().find_method(&data.method.lexeme)
            .map(|method| Object::from(method.bind(this_instance)))
            .ok_or_else(|| RuntimeError {
                token: data.method.clone(),
                message: format!("Undefined property '{}'.", data.method.lexeme),
            })
    }
}

impl StmtVisitor<ExecResult<()>> for Interpreter {
    fn visit_expression_stmt(&mut self, data: &ExpressionData) -> ExecResult<()> {
        self.evaluate(&data.expr)?;
        Ok(())
    }

    fn visit_print_stmt(&mut self, data: &PrintData) -> ExecResult<()> {
        let value = self.evaluate(&data.expr)?;
        let _ = writeln!(self.output, "{value}");
        Ok(())
    }

    fn visit_var_stmt(&mut self, data: &VarData) -> ExecResult<()> {
        let value = match &data.initializer {
            Some(initializer) => self.evaluate(initializer)?,
            None => Object::NIL,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, data: &BlockData) -> ExecResult<()> {
        let block_env = Rc::new(RefCell::new(Environment::new(Some(Rc::clone(&self.environment)))));
        self.execute_block(&data.statements, block_env)
    }

    fn visit_if_stmt(&mut self, data: &IfData) -> ExecResult<()> {
        if self.evaluate(&data.condition)?.is_truthy() {
            self.execute(&data.then_branch)
        } else if let Some(else_branch) = &data.else_branch {
            self.execute(else_branch)
        } else {
            Ok(())
        }
    }

    fn visit_while_stmt(&mut self, data: &WhileData) -> ExecResult<()> {
        while self.evaluate(&data.condition)?.is_truthy() {
            match self.execute(&data.body) {
                Ok(()) => {},
                Err(ExecSignal::Break) => break,
                Err(other) => return Err(other),
            }
        }

        Ok(())
    }

    fn visit_function_stmt(&mut self, data: &FunctionData) -> ExecResult<()> {
        let function = Function::new(data.name.clone(), data.params.clone(), Rc::clone(&data.body), Rc::clone(&self.environment), false);
        self.environment.borrow_mut().define(&data.name.lexeme, Object::from(function));
        Ok(())
    }

    fn visit_return_stmt(&mut self, data: &ReturnData) -> ExecResult<()> {
        let value = match &data.value {
            Some(expr) => self.evaluate(expr)?,
            None => Object::NIL,
        };

        Err(ExecSignal::Return(value))
    }

    fn visit_break_stmt(&mut self, _data: &BreakData) -> ExecResult<()> {
        Err(ExecSignal::Break)
    }

    fn visit_class_stmt(&mut self, data: &ClassData) -> ExecResult<()> {
        let superclass = match &data.superclass {
            Some(expr) => {
                let value = self.evaluate(expr)?;
                match value {
                    Object::Class(class) => Some(class),
                    _ => {
                        let token = match expr {
                            Expr::Variable(variable) => variable.name.clone(),
                            _ => data.name.clone(),
                        };
                        return Err(RuntimeError { token, message: "Superclass must be a class.".to_string() }.into());
                    },
                }
            },
            None => None,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, Object::NIL);

        let previous_environment = superclass.as_ref().map(|superclass| {
            let mut super_env = Environment::new(Some(Rc::clone(&self.environment)));
            super_env.define("super", Object::Class(Rc::clone(superclass)));
            std::mem::replace(&mut self.environment, Rc::new(RefCell::new(super_env)))
        });

        let mut methods = HashMap::new();
        for method in &data.methods {
            if let Stmt::Function(function_data) = method {
                let is_initializer = function_data.name.lexeme == "init";
                let function = Function::new(
                    function_data.name.clone(),
                    function_data.params.clone(),
                    Rc::clone(&function_data.body),
                    Rc::clone(&self.environment),
                    is_initializer,
                );
                methods.insert(function_data.name.lexeme.clone(), function);
            }
        }

        if let Some(previous_environment) = previous_environment {
            self.environment = previous_environment;
        }

        let class = Object::from(Rc::new(RefCell::new(Class::new(data.name.lexeme.clone(), superclass, methods))));
        self.environment.borrow_mut().assign_at(0, &data.name.lexeme, class)
            .map_err(|_| RuntimeError { token: data.name.clone(), message: format!("Undefined variable '{}'.", data.name.lexeme) })?;

        Ok(())
    }
}

/// Registers the single host-provided callable the language defines: `clock`,
/// the number of seconds since the Unix epoch.
fn register_natives(globals: &Rc<RefCell<Environment>>) {
    let clock = NativeFunction {
        name: "clock",
        arity: 0,
        function: Rc::new(|_interpreter, _arguments| {
            let seconds = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs_f64())
                .unwrap_or(0.0);
            Ok(Object::from(seconds))
        }),
    };

    globals.borrow_mut().define("clock", Object::from(clock));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::resolver::Resolver;
    use crate::scanner::Scanner;

    fn run(source: &str) -> (String, Option<RuntimeError>) {
        let (tokens, scan_errors) = Scanner::new(source).scan_tokens();
        assert!(scan_errors.is_empty(), "unexpected scan errors: {scan_errors:?}");

        let (statements, parse_errors) = Parser::new(tokens).parse();
        assert!(parse_errors.is_empty(), "unexpected parse errors: {parse_errors:?}");

        let resolve_errors = Resolver::new().resolve(&statements);
        assert!(resolve_errors.is_empty(), "unexpected resolve errors: {resolve_errors:?}");

        let mut output = Vec::new();
        let error = {
            let mut interpreter = Interpreter::new(Box::new(&mut output));
            interpreter.interpret(&statements).err()
        };

        (String::from_utf8(output).unwrap(), error)
    }

    #[test]
    fn prints_arithmetic() {
        let (output, error) = run("print 1 + 2 * 3;");
        assert_eq!(output, "7\n");
        assert!(error.is_none());
    }

    #[test]
    fn string_concatenation() {
        let (output, error) = run(r#"print "foo" + "bar";"#);
        assert_eq!(output, "foobar\n");
        assert!(error.is_none());
    }

    #[test]
    fn closures_capture_by_reference() {
        let (output, error) = run(
            "fun makeCounter() {
               var i = 0;
               fun count() { i = i + 1; print i; }
               return count;
             }
             var counter = makeCounter();
             counter();
             counter();",
        );
        assert_eq!(output, "1\n2\n");
        assert!(error.is_none());
    }

    #[test]
    fn classes_and_inheritance() {
        let (output, error) = run(
            "class Animal {
               speak() { print \"...\"; }
             }
             class Dog < Animal {
               speak() { print \"Woof\"; }
               parent() { super.speak(); }
             }
             var d = Dog();
             d.speak();
             d.parent();",
        );
        assert_eq!(output, "Woof\n...\n");
        assert!(error.is_none());
    }

    #[test]
    fn break_exits_innermost_loop() {
        let (output, error) = run(
            "for (var i = 0; i < 5; i = i + 1) {
               if (i == 2) break;
               print i;
             }",
        );
        assert_eq!(output, "0\n1\n");
        assert!(error.is_none());
    }

    #[test]
    fn type_error_reports_runtime_error() {
        let (_output, error) = run("print 1 + \"a\";");
        let error = error.expect("a runtime error");
        assert_eq!(error.message, "Operands must be two numbers or two strings.");
    }

    #[test]
    fn division_by_zero_is_infinity_not_an_error() {
        let (output, error) = run("print 1 / 0;");
        assert_eq!(output, "inf\n");
        assert!(error.is_none());
    }

    #[test]
    fn unbounded_recursion_is_a_catchable_stack_overflow() {
        let (_output, error) = run("fun f() { return f() + 1; } print f();");
        let error = error.expect("a runtime error");
        assert_eq!(error.message, "Stack overflow.");
    }
}
