use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Object;

/// One lexical scope frame: a map of names to values plus a link to the
/// enclosing frame. Frames form a chain; the root frame is the global frame
/// and is the only one whose names may be referenced without having been
/// `declare`d by the resolver (globals resolve dynamically, spec 3).
///
/// Kept behind `Rc<RefCell<_>>` wherever it's shared (see [`crate::function`]
/// and [`crate::interpreter`]) so that multiple closures, and a closure and
/// the frame it was declared in, can all observe the same mutations.
#[derive(Debug)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    values: HashMap<String, Object>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Self {
        Environment { enclosing, values: HashMap::new() }
    }

    /// Writes into the current frame. Used for `var`, function, and class
    /// declarations — never implicitly walks outward.
    pub fn define(&mut self, name: &str, value: Object) {
        self.values.insert(name.to_string(), value);
    }

    fn ancestor(&self, distance: i32) -> Option<Rc<RefCell<Environment>>> {
        let mut environment = self.enclosing.clone()?;
        for _ in 1..distance {
            let next = environment.borrow().enclosing.clone()?;
            environment = next;
        }
        Some(environment)
    }

    /// Walks `distance` enclosing links, then reads `name`. `distance <= 0`
    /// reads the current frame directly.
    pub fn get_at(&self, distance: i32, name: &str) -> Result<Object, String> {
        if distance <= 0 {
            return self.values.get(name).cloned().ok_or_else(|| name.to_string());
        }

        self.ancestor(distance)
            .and_then(|env| env.borrow().values.get(name).cloned())
            .ok_or_else(|| name.to_string())
    }

    /// Same traversal as [`Environment::get_at`], but reassigns instead.
    pub fn assign_at(&mut self, distance: i32, name: &str, value: Object) -> Result<(), String> {
        if distance <= 0 {
            self.values.insert(name.to_string(), value);
            return Ok(());
        }

        match self.ancestor(distance) {
            Some(env) => {
                env.borrow_mut().values.insert(name.to_string(), value);
                Ok(())
            },
            None => Err(name.to_string()),
        }
    }

    /// Dynamic lookup used for globals (`distance == -1`): walk outward
    /// until a frame defines `name`, or fail if none does.
    pub fn get_global(&self, name: &str) -> Result<Object, String> {
        if let Some(value) = self.values.get(name) {
            return Ok(value.clone());
        }

        match &self.enclosing {
            Some(enclosing) => enclosing.borrow().get_global(name),
            None => Err(name.to_string()),
        }
    }

    pub fn assign_global(&mut self, name: &str, value: Object) -> Result<(), String> {
        if self.values.contains_key(name) {
            self.values.insert(name.to_string(), value);
            return Ok(());
        }

        match &mut self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign_global(name, value),
            None => Err(name.to_string()),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None)
    }
}
