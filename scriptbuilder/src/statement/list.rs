use super::{Line, Statement};
use crate::error::Result;
use crate::os_family::OsFamily;
use serde::Deserialize;

/// An ordered sequence of statements, rendered one after another.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StatementList {
    statements: Vec<Statement>,
}

impl StatementList {
    #[must_use]
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub(super) fn lines(&self, family: OsFamily) -> Result<Vec<Line>> {
        let mut lines = Vec::new();
        for statement in &self.statements {
            lines.extend(statement.lines(family)?);
        }
        Ok(lines)
    }
}

impl FromIterator<Statement> for StatementList {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a StatementList {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
