pub mod builtins;

#[cfg(test)]
mod tests;

use std::rc::Rc;

use crate::{
    environment::prelude::{Env, Environment, Function, Object, FALSE, NULL, TRUE},
    lexer::prelude::TokenKind,
    parser::prelude::{BlockStatement, Call, Expression, Primitive, Program, Statement},
    utils::prelude::{ConsoleOutput, OutputIO}
};

pub struct Evaluator {
    output: Rc<dyn OutputIO>,
}

impl Evaluator {
    pub fn new(output: Rc<dyn OutputIO>) -> Self {
        Self { output }
    }

    pub fn console() -> Self {
        Self::new(Rc::new(ConsoleOutput))
    }

    /// Runs every statement in order. An error stops evaluation and
    /// becomes the result; a top level `return` is unwrapped.
    pub fn eval_program(&self, program: &Program, env: &Env) -> Object {
        tracing::debug!(statements = program.statements.len(), "evaluating program");

        let mut result = NULL;

        for statement in &program.statements {
            result = self.eval_statement(statement, env);

            if matches!(result, Object::Return(_) | Object::Error(_)) {
                break;
            }
        }

        match result {
            Object::Return(value) => *value,
            result => result
        }
    }

    pub fn eval_statement(&self, statement: &Statement, env: &Env) -> Object {
        tracing::trace!(location = %statement.location(), "statement");

        match statement {
            Statement::Expression(statement) => self.eval_expression(&statement.expression, env),
            Statement::Var(var) => {
                let value = match &var.value {
                    Some(value) => self.eval_expression(value, env),
                    None => NULL
                };

                if value.is_error() {
                    return value;
                }

                env.borrow_mut().set(var.identifier.value.clone(), value);

                NULL
            },
            Statement::Block(block) => self.eval_block(block, env),
            Statement::If(statement) => {
                let condition = self.eval_expression(&statement.condition, env);

                if condition.is_error() {
                    return condition;
                }

                if condition.is_truthy() {
                    self.eval_block(&statement.body, env)
                } else if let Some(alternative) = &statement.alternative {
                    self.eval_block(alternative, env)
                } else {
                    NULL
                }
            },
            Statement::While(statement) => {
                let mut result = NULL;

                loop {
                    let condition = self.eval_expression(&statement.condition, env);

                    if condition.is_error() {
                        return condition;
                    }

                    if !condition.is_truthy() {
                        break;
                    }

                    result = self.eval_block(&statement.body, env);

                    if matches!(result, Object::Return(_) | Object::Error(_)) {
                        return result;
                    }
                }

                result
            },
            Statement::Return(statement) => {
                let value = match &statement.value {
                    Some(value) => self.eval_expression(value, env),
                    None => NULL
                };

                if value.is_error() {
                    return value;
                }

                Object::Return(Box::new(value))
            },
            Statement::Function(statement) => {
                let function = Object::Function(Rc::new(Function {
                    parameters: statement.parameters.clone(),
                    body: Rc::clone(&statement.body),
                    env: Rc::clone(env)
                }));

                env.borrow_mut().set(statement.name.value.clone(), function.clone());

                function
            }
        }
    }

    /// Blocks share the surrounding scope. `Return` is passed up unchanged.
    fn eval_block(&self, block: &BlockStatement, env: &Env) -> Object {
        let mut result = NULL;

        for statement in &block.statements {
            result = self.eval_statement(statement, env);

            if matches!(result, Object::Return(_) | Object::Error(_)) {
                return result;
            }
        }

        result
    }

    pub fn eval_expression(&self, expression: &Expression, env: &Env) -> Object {
        match expression {
            Expression::Identifier(ident) => self.eval_identifier(&ident.value, env),
            Expression::Primitive(primitive) => match primitive {
                Primitive::Int { value, .. } => Object::Integer(*value),
                Primitive::Float { value, .. } => Object::Float(*value),
                Primitive::Bool { value, .. } => Object::from(*value),
                Primitive::String { value, .. } => Object::String(value.clone()),
                Primitive::Nil { .. } => NULL,
            },
            Expression::Array(array) => match self.eval_expressions(&array.elements, env) {
                Ok(elements) => Object::Array(elements),
                Err(err) => err
            },
            Expression::Prefix(prefix) => {
                let operand = self.eval_expression(&prefix.expression, env);

                if operand.is_error() {
                    return operand;
                }

                eval_prefix(prefix.operator, operand)
            },
            Expression::Infix(infix) => {
                let left = self.eval_expression(&infix.left, env);

                if left.is_error() {
                    return left;
                }

                let right = self.eval_expression(&infix.right, env);

                if right.is_error() {
                    return right;
                }

                eval_infix(infix.operator, left, right)
            },
            Expression::Index(index) => {
                let left = self.eval_expression(&index.left, env);

                if left.is_error() {
                    return left;
                }

                let position = self.eval_expression(&index.index, env);

                if position.is_error() {
                    return position;
                }

                eval_index(left, position)
            },
            Expression::Call(call) => self.eval_call(call, env),
        }
    }

    fn eval_identifier(&self, name: &str, env: &Env) -> Object {
        if let Some(value) = env.borrow().get(name) {
            return value;
        }

        match builtins::lookup(name) {
            Some(builtin) => Object::Builtin(builtin),
            None => Object::error(format!("identifier not found: {name}"))
        }
    }

    /// Evaluates left to right, stopping at the first error.
    fn eval_expressions(&self, expressions: &[Expression], env: &Env) -> Result<Vec<Object>, Object> {
        let mut values = Vec::with_capacity(expressions.len());

        for expression in expressions {
            let value = self.eval_expression(expression, env);

            if value.is_error() {
                return Err(value);
            }

            values.push(value);
        }

        Ok(values)
    }

    fn eval_call(&self, call: &Call, env: &Env) -> Object {
        let callee = self.eval_identifier(&call.function.value, env);

        match callee {
            Object::Error(_) => return callee,
            Object::Function(_) | Object::Builtin(_) => {},
            other => return Object::error(format!("not a function: {}", other.kind()))
        }

        let arguments = match self.eval_expressions(&call.arguments, env) {
            Ok(arguments) => arguments,
            Err(err) => return err
        };

        tracing::trace!(function = %call.function, arguments = arguments.len(), "call");

        self.apply(callee, arguments)
    }

    fn apply(&self, callee: Object, arguments: Vec<Object>) -> Object {
        match callee {
            Object::Function(function) => {
                if function.parameters.len() != arguments.len() {
                    return builtins::wrong_arguments(function.parameters.len(), arguments.len());
                }

                let call_env = Environment::enclosed(&function.env);

                {
                    let mut scope = call_env.borrow_mut();

                    for (parameter, argument) in function.parameters.iter().zip(arguments) {
                        scope.set(parameter.value.clone(), argument);
                    }
                }

                match self.eval_block(&function.body, &call_env) {
                    Object::Return(value) => *value,
                    result => result
                }
            },
            Object::Builtin(builtin) => (builtin.func)(self.output.as_ref(), arguments),
            other => Object::error(format!("not a function: {}", other.kind()))
        }
    }
}

fn eval_prefix(operator: TokenKind, operand: Object) -> Object {
    match operator {
        TokenKind::Bang => match operand {
            Object::Boolean(value) => Object::from(!value),
            Object::Null => TRUE,
            _ => FALSE
        },
        TokenKind::Minus => match operand {
            Object::Integer(value) => Object::Integer(value.wrapping_neg()),
            Object::Float(value) => Object::Float(-value),
            other => Object::error(format!("unknown operator: -{}", other.kind()))
        },
        _ => Object::error(format!("unknown operator: {}{}", operator.as_literal(), operand.kind()))
    }
}

fn eval_infix(operator: TokenKind, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix(operator, *l, *r)
            .unwrap_or_else(|| unknown_operator(operator, &left, &right)),
        (Object::Integer(_) | Object::Float(_), Object::Integer(_) | Object::Float(_)) => {
            eval_float_infix(operator, as_float(&left), as_float(&right))
                .unwrap_or_else(|| unknown_operator(operator, &left, &right))
        },
        _ if operator == TokenKind::Equal => Object::from(left == right),
        _ if operator == TokenKind::NotEqual => Object::from(left != right),
        (Object::Boolean(l), Object::Boolean(r)) => match operator {
            TokenKind::And => Object::from(*l && *r),
            TokenKind::Or => Object::from(*l || *r),
            _ => unknown_operator(operator, &left, &right)
        },
        _ if left.kind() != right.kind() => Object::error(format!(
            "type mismatch: {} {} {}",
            left.kind(),
            operator.as_literal(),
            right.kind()
        )),
        (Object::String(l), Object::String(r)) if operator == TokenKind::Plus => {
            Object::String(format!("{l}{r}"))
        },
        _ => unknown_operator(operator, &left, &right)
    }
}

fn unknown_operator(operator: TokenKind, left: &Object, right: &Object) -> Object {
    Object::error(format!(
        "unknown operator: {} {} {}",
        left.kind(),
        operator.as_literal(),
        right.kind()
    ))
}

fn as_float(value: &Object) -> f64 {
    match value {
        Object::Integer(value) => *value as f64,
        Object::Float(value) => *value,
        _ => f64::NAN
    }
}

fn eval_integer_infix(operator: TokenKind, left: i64, right: i64) -> Option<Object> {
    match operator {
        TokenKind::Plus => Some(Object::Integer(left.wrapping_add(right))),
        TokenKind::Minus => Some(Object::Integer(left.wrapping_sub(right))),
        TokenKind::Asterisk => Some(Object::Integer(left.wrapping_mul(right))),
        TokenKind::Slash if right == 0 => Some(Object::error("division by zero")),
        TokenKind::Slash => Some(Object::Integer(left.wrapping_div(right))),
        TokenKind::LessThan => Some(Object::from(left < right)),
        TokenKind::GreaterThan => Some(Object::from(left > right)),
        TokenKind::LessThanOrEqual => Some(Object::from(left <= right)),
        TokenKind::GreaterThanOrEqual => Some(Object::from(left >= right)),
        TokenKind::Equal => Some(Object::from(left == right)),
        TokenKind::NotEqual => Some(Object::from(left != right)),
        _ => None
    }
}

fn eval_float_infix(operator: TokenKind, left: f64, right: f64) -> Option<Object> {
    match operator {
        TokenKind::Plus => Some(Object::Float(left + right)),
        TokenKind::Minus => Some(Object::Float(left - right)),
        TokenKind::Asterisk => Some(Object::Float(left * right)),
        TokenKind::Slash => Some(Object::Float(left / right)),
        TokenKind::LessThan => Some(Object::from(left < right)),
        TokenKind::GreaterThan => Some(Object::from(left > right)),
        TokenKind::LessThanOrEqual => Some(Object::from(left <= right)),
        TokenKind::GreaterThanOrEqual => Some(Object::from(left >= right)),
        TokenKind::Equal => Some(Object::from(left == right)),
        TokenKind::NotEqual => Some(Object::from(left != right)),
        _ => None
    }
}

fn eval_index(left: Object, index: Object) -> Object {
    match (left, index) {
        (Object::Array(elements), Object::Integer(index)) => {
            usize::try_from(index).ok()
                .and_then(|index| elements.get(index).cloned())
                .unwrap_or(NULL)
        },
        (Object::Array(_), other) => Object::error(format!("index must be INTEGER, got {}", other.kind())),
        (other, _) => Object::error(format!("index operator not supported: {}", other.kind()))
    }
}
