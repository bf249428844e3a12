use std::cell::RefCell;
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::{ExecSignal, RuntimeError};
use crate::interpreter::Interpreter;
use crate::object::{Callable, Object};
use crate::stmt::Stmt;
use crate::token::Token;

/// A user-declared function or method: a reference to its declaration plus
/// the environment frame captured at the point it was declared (the closure,
/// spec 3 "Invariants": "shared by reference with the frame extant at
/// declaration time").
#[derive(Debug, Clone)]
pub struct Function {
    pub name: Token,
    pub params: Vec<Token>,
    pub body: Rc<Vec<Stmt>>,
    pub closure: Rc<RefCell<Environment>>,
    pub is_initializer: bool,
}

impl Function {
    pub fn new(name: Token, params: Vec<Token>, body: Rc<Vec<Stmt>>, closure: Rc<RefCell<Environment>>, is_initializer: bool) -> Self {
        Function { name, params, body, closure, is_initializer }
    }

    /// Binds `this` to `instance` by pushing one more environment frame onto
    /// the method's captured environment. The result is a new function value
    /// sharing the same declaration (spec 3, "when a method is bound...").
    pub fn bind(&self, instance: Object) -> Function {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));
        environment.define("this", instance);

        Function {
            name: self.name.clone(),
            params: self.params.clone(),
            body: Rc::clone(&self.body),
            closure: Rc::new(RefCell::new(environment)),
            is_initializer: self.is_initializer,
        }
    }

    pub fn identity_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.closure, &other.closure) && self.name == other.name
    }
}

impl Callable for Function {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let mut environment = Environment::new(Some(Rc::clone(&self.closure)));

        for (param, arg) in self.params.iter().zip(arguments.into_iter()) {
            environment.define(&param.lexeme, arg);
        }

        let environment = Rc::new(RefCell::new(environment));

        let bound_this = || {
            self.closure.borrow().get_at(0, "this")
                .expect("an initializer's closure always binds 'this'")
        };

        match interpreter.execute_block(&self.body, environment) {
            Ok(()) => Ok(if self.is_initializer { bound_this() } else { Object::NIL }),
            Err(ExecSignal::Return(value)) => {
                Ok(if self.is_initializer { bound_this() } else { value })
            },
            Err(ExecSignal::Runtime(error)) => Err(error),
            Err(ExecSignal::Break) => unreachable!("resolver rejects break outside a loop"),
        }
    }

    fn arity(&self) -> usize {
        self.params.len()
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<fn {}>", self.name.lexeme)
    }
}

/// A host-provided callable with fixed arity. `clock` is the only one the
/// interpreter registers into the global scope.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: usize,
    pub function: Rc<dyn Fn(&mut Interpreter, Vec<Object>) -> Result<Object, RuntimeError>>,
}

impl NativeFunction {
    pub fn identity_eq(&self, other: &NativeFunction) -> bool {
        self.name == other.name
    }
}

impl Callable for NativeFunction {
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        (self.function)(interpreter, arguments)
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn>")
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<native fn>")
    }
}
