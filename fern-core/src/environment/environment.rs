use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::value::Object;

pub type Env = Rc<RefCell<Environment>>;

#[derive(Default, Debug)]
pub struct Environment {
    pub store: HashMap<String, Object>,
    pub enclosing: Option<Env>,
}

impl Environment {
    pub fn new() -> Env {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Fresh scope whose lookups fall back to `outer`.
    pub fn enclosed(outer: &Env) -> Env {
        Rc::new(RefCell::new(Self {
            store: HashMap::new(),
            enclosing: Some(Rc::clone(outer))
        }))
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self.enclosing.as_ref()
                .and_then(|outer| outer.borrow().get(name))
        }
    }

    /// Binds `name` in this scope only, shadowing outer bindings.
    pub fn set(&mut self, name: impl Into<String>, value: Object) {
        self.store.insert(name.into(), value);
    }
}
