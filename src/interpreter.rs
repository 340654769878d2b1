use std::io::Write;

use derivative::Derivative;
use tracing::{debug, instrument, trace};

use crate::config::{Config, ForLoop};
use crate::parser::{
    ArithmeticFault, Error, ExprId, Expression, Operator, Program, Statement, StmtId,
};
use crate::symbol_table::SymbolTable;

const OUTPUT_PREFIX: &str = "TURKON Output: ";

/// Walks a parsed [`Program`], writing one line per `yazdır` to `out`.
///
/// The symbol table belongs to the interpreter, so running several programs
/// on one instance (as the REPL does) lets later ones see earlier variables.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Interpreter<W: Write> {
    symbols: SymbolTable,
    config: Config,
    steps: u64,
    #[derivative(Debug = "ignore")]
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self::with_config(out, Config::default())
    }
    pub fn with_config(out: W, config: Config) -> Self {
        Self {
            symbols: SymbolTable::new(),
            config,
            steps: 0,
            out,
        }
    }
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
    pub fn into_output(self) -> W {
        self.out
    }

    #[instrument(level = "debug", skip_all, fields(statements = program.body().len()))]
    pub fn run(&mut self, program: &Program) -> Result<(), Error> {
        self.steps = 0;
        let result = self.execute_block(program, program.body());
        let flushed = self.out.flush();
        debug!(steps = self.steps, ok = result.is_ok(), "program finished");
        // A runtime fault outranks a failed flush.
        result?;
        Ok(flushed?)
    }

    fn execute_block(&mut self, program: &Program, block: &[StmtId]) -> Result<(), Error> {
        for &id in block {
            self.evaluate(program, id)?;
        }
        Ok(())
    }

    pub fn evaluate(&mut self, program: &Program, id: StmtId) -> Result<(), Error> {
        self.step()?;
        match program.statement(id) {
            Statement::Assignment(name, value) => {
                let value = self.evaluate_expr(program, *value)?;
                trace!(name = name.as_str(), value, "assign");
                self.symbols.assign(name.as_str(), value);
            }
            Statement::Print(value) => {
                let value = self.evaluate_expr(program, *value)?;
                writeln!(self.out, "{OUTPUT_PREFIX}{value}")?;
            }
            Statement::If(condition, then_block, else_block) => {
                if self.evaluate_expr(program, *condition)? != 0 {
                    self.execute_block(program, then_block)?;
                } else if let Some(else_block) = else_block {
                    self.execute_block(program, else_block)?;
                }
            }
            Statement::While(condition, body) => {
                while self.evaluate_expr(program, *condition)? != 0 {
                    self.step()?;
                    self.execute_block(program, body)?;
                }
            }
            Statement::For(initializer, condition, increment, body) => {
                self.evaluate(program, *initializer)?;
                let mut running = self.evaluate_expr(program, *condition)? != 0;
                if self.config.for_loop == ForLoop::EagerIncrement {
                    self.evaluate(program, *increment)?;
                }
                while running {
                    self.step()?;
                    self.execute_block(program, body)?;
                    self.evaluate(program, *increment)?;
                    running = self.evaluate_expr(program, *condition)? != 0;
                }
            }
        }
        Ok(())
    }

    pub fn evaluate_expr(&self, program: &Program, id: ExprId) -> Result<i64, Error> {
        match program.expression(id) {
            Expression::Number(value) => Ok(*value),
            Expression::Name(name) => self
                .symbols
                .get(name.as_str())
                .ok_or_else(|| Error::UndefinedVariable(name.as_str().to_string())),
            Expression::BinaryOperation(..) => {
                // `a + b + c + ...` is left-deep: fold its left spine in a loop.
                let mut spine = vec![];
                let mut leftmost = id;
                while let Expression::BinaryOperation(op, lhs, rhs) = program.expression(leftmost) {
                    spine.push((*op, *rhs));
                    leftmost = *lhs;
                }
                let mut value = self.evaluate_expr(program, leftmost)?;
                for (op, rhs) in spine.into_iter().rev() {
                    let rhs = self.evaluate_expr(program, rhs)?;
                    value = apply(op, value, rhs)?;
                }
                Ok(value)
            }
        }
    }

    fn step(&mut self) -> Result<(), Error> {
        self.steps += 1;
        match self.config.step_limit {
            Some(limit) if self.steps > limit => Err(Error::StepLimitExceeded(limit)),
            _ => Ok(()),
        }
    }
}

// Comparisons yield 1 or 0; there is no separate boolean value.
fn apply(op: Operator, lhs: i64, rhs: i64) -> Result<i64, ArithmeticFault> {
    match op {
        Operator::Plus => lhs.checked_add(rhs).ok_or(ArithmeticFault::Overflow),
        Operator::Minus => lhs.checked_sub(rhs).ok_or(ArithmeticFault::Overflow),
        Operator::Times => lhs.checked_mul(rhs).ok_or(ArithmeticFault::Overflow),
        Operator::Divide | Operator::Modulo if rhs == 0 => Err(ArithmeticFault::DivisionByZero),
        Operator::Divide => lhs.checked_div(rhs).ok_or(ArithmeticFault::Overflow),
        Operator::Modulo => lhs.checked_rem(rhs).ok_or(ArithmeticFault::Overflow),
        Operator::Equal => Ok(i64::from(lhs == rhs)),
        Operator::NotEqual => Ok(i64::from(lhs != rhs)),
        Operator::Less => Ok(i64::from(lhs < rhs)),
        Operator::Greater => Ok(i64::from(lhs > rhs)),
        Operator::LessEqual => Ok(i64::from(lhs <= rhs)),
        Operator::GreaterEqual => Ok(i64::from(lhs >= rhs)),
    }
}
