use super::{Expression, Value, VariableContext};
use crate::error::EvalError;

// This macro generates a match arm for a binary operation.
macro_rules! eval_op {
    ($self:ident, $l:ident, $r:ident, $op_str:expr, $op_fn:expr, number) => {
        $self.eval_binary($l, $r, $op_str, $op_fn)
    };
    ($self:ident, $l:ident, $r:ident, $op_str:expr, $op_fn:expr, bool) => {
        $self.eval_comparison($l, $r, $op_str, $op_fn)
    };
}

/// The core recursive engine for evaluating a parsed expression against a
/// variable store.
pub(super) struct ExprEngine<'a> {
    vars: &'a VariableContext,
}

impl<'a> ExprEngine<'a> {
    pub(super) fn new(vars: &'a VariableContext) -> Self {
        Self { vars }
    }

    pub(super) fn evaluate(&self, expr: &Expression) -> Result<Value, EvalError> {
        match expr {
            // --- Arithmetic Operations ---
            Expression::Sum(l, r) => eval_op!(self, l, r, "+", |a, b| a + b, number),
            Expression::Subtract(l, r) => eval_op!(self, l, r, "-", |a, b| a - b, number),
            Expression::Multiply(l, r) => eval_op!(self, l, r, "*", |a, b| a * b, number),
            Expression::Divide(l, r) => eval_op!(self, l, r, "/", |a, b| a / b, number),
            Expression::Negate(v) => match self.evaluate(v)? {
                Value::Number(n) => Ok(Value::Number(-n)),
                val => Err(self.type_mismatch("-", "Number", val)),
            },

            // --- Comparison Operations ---
            Expression::GreaterThan(l, r) => eval_op!(self, l, r, ">", |a, b| a > b, bool),
            Expression::SmallerThan(l, r) => eval_op!(self, l, r, "<", |a, b| a < b, bool),
            Expression::GreaterThanOrEqual(l, r) => eval_op!(self, l, r, ">=", |a, b| a >= b, bool),
            Expression::SmallerThanOrEqual(l, r) => eval_op!(self, l, r, "<=", |a, b| a <= b, bool),

            // --- Equality ---
            // Literal value equality: string-typed values compare as strings.
            Expression::Equal(l, r) => {
                Ok(Value::Bool(self.evaluate(l)? == self.evaluate(r)?))
            }
            Expression::NotEqual(l, r) => {
                Ok(Value::Bool(self.evaluate(l)? != self.evaluate(r)?))
            }

            // --- Leaf Nodes ---
            Expression::Literal(val) => Ok(val.clone()),
            Expression::Variable(name) => self
                .vars
                .get(name)
                .cloned()
                .ok_or_else(|| EvalError::UndefinedVariable(name.clone())),
        }
    }

    fn eval_binary<F>(
        &self,
        l: &Expression,
        r: &Expression,
        op: &'static str,
        f: F,
    ) -> Result<Value, EvalError>
    where
        F: Fn(f64, f64) -> f64,
    {
        match (self.evaluate(l)?, self.evaluate(r)?) {
            (Value::Number(lv), Value::Number(rv)) => Ok(Value::Number(f(lv, rv))),
            (l_val, _) => Err(self.type_mismatch(op, "Number", l_val)),
        }
    }

    fn eval_comparison<F>(
        &self,
        l: &Expression,
        r: &Expression,
        op: &'static str,
        f: F,
    ) -> Result<Value, EvalError>
    where
        F: Fn(f64, f64) -> bool,
    {
        match (self.evaluate(l)?, self.evaluate(r)?) {
            (Value::Number(lv), Value::Number(rv)) => Ok(Value::Bool(f(lv, rv))),
            (l_val, _) => Err(self.type_mismatch(op, "Number", l_val)),
        }
    }

    fn type_mismatch(&self, op: &str, expected: &str, found: Value) -> EvalError {
        EvalError::TypeMismatch {
            operation: op.to_string(),
            expected: expected.to_string(),
            found,
        }
    }
}
