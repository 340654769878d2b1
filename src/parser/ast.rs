use super::tokenizer::TokenType as TT;

/// Index of a statement in [`Program`]'s statement arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StmtId(u32);

/// Index of an expression in [`Program`]'s expression arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExprId(u32);

pub type Block = Vec<StmtId>;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assignment(Name, ExprId),
    Print(ExprId),
    If(ExprId, Block, Option<Block>),
    While(ExprId, Block),
    For(
        StmtId, // initializer
        ExprId, // condition
        StmtId, // increment
        Block,
    ),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Name(Name),
    Number(i64),
    BinaryOperation(Operator, ExprId, ExprId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl Operator {
    pub(super) fn additive(typ: TT) -> Option<Self> {
        match typ {
            TT::PLUS => Some(Self::Plus),
            TT::MINUS => Some(Self::Minus),
            TT::EQ => Some(Self::Equal),
            TT::NE => Some(Self::NotEqual),
            TT::LT => Some(Self::Less),
            TT::GT => Some(Self::Greater),
            TT::LE => Some(Self::LessEqual),
            TT::GE => Some(Self::GreaterEqual),
            _ => None,
        }
    }
    pub(super) fn multiplicative(typ: TT) -> Option<Self> {
        match typ {
            TT::MULT => Some(Self::Times),
            TT::DIV => Some(Self::Divide),
            TT::MOD => Some(Self::Modulo),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    pub(super) fn new(identifier: String) -> Self {
        Self(identifier)
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Name(\"{}\")", self.0)
    }
}

/// A parsed program: two arenas plus the top-level statement list.
/// Loop bodies refer back into the arenas, so a body is parsed once and
/// executed as many times as the loop runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    statements: Vec<Statement>,
    expressions: Vec<Expression>,
    body: Block,
}

impl Program {
    pub(crate) fn body(&self) -> &[StmtId] {
        &self.body
    }
    // Ids are only ever minted by this program's own push_* calls.
    pub(crate) fn statement(&self, id: StmtId) -> &Statement {
        &self.statements[id.0 as usize]
    }
    pub(crate) fn expression(&self, id: ExprId) -> &Expression {
        &self.expressions[id.0 as usize]
    }
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
    pub(super) fn push_statement(&mut self, statement: Statement) -> StmtId {
        let id = StmtId(self.statements.len() as u32);
        self.statements.push(statement);
        id
    }
    pub(super) fn push_expression(&mut self, expression: Expression) -> ExprId {
        let id = ExprId(self.expressions.len() as u32);
        self.expressions.push(expression);
        id
    }
    pub(super) fn set_body(&mut self, body: Block) {
        self.body = body;
    }
}
