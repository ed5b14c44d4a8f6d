//! Query sessions.
//!
//! A [`Session`] owns everything that outlives a single result: the host,
//! the scope stack, the binding table, the method resolvers and the list
//! of tracked queries shown by a watch window.

use std::fmt;

use duel_ir::Expr;
use duel_parse::ParseError;
use tracing::debug;

use crate::bindings::Bindings;
use crate::context::EvalContext;
use crate::errors::EvalError;
use crate::exec::Stream;
use crate::host::Host;
use crate::resolvers::{MethodDispatcher, MethodResolver};
use crate::scope::ScopeStack;

/// A parsed query and its source text.
#[derive(Clone, Debug)]
pub struct Query {
    pub text: String,
    pub expr: Expr,
}

impl Query {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Ok(Query {
            text: text.to_string(),
            expr: duel_parse::parse(text)?,
        })
    }
}

/// Errors reported to the user of a session.
#[derive(Clone, Debug)]
pub enum SessionError {
    Parse(ParseError),
    Eval(EvalError),
    /// `remove` of a number that was never added or is already removed.
    NoSuchExpression(usize),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Eval(err) => write!(f, "{err}"),
            Self::NoSuchExpression(n) => write!(f, "no duel expression number {n}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Eval(err) => Some(err),
            Self::NoSuchExpression(_) => None,
        }
    }
}

impl From<ParseError> for SessionError {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<EvalError> for SessionError {
    fn from(err: EvalError) -> Self {
        Self::Eval(err)
    }
}

/// Rendered results of one tracked query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackedRender {
    /// 1-based number shown to the user.
    pub number: usize,
    pub text: String,
    /// `(label, value text)` pairs.
    pub results: Vec<(String, String)>,
    /// Message of the error that ended the query, if any.
    pub error: Option<String>,
    /// More results existed than `max_results`.
    pub truncated: bool,
}

pub struct Session<H: Host> {
    host: H,
    scopes: ScopeStack<H>,
    bindings: Bindings<H>,
    dispatcher: MethodDispatcher<H>,
    tracked: Vec<Option<Query>>,
    max_results: Option<usize>,
    fresh_bindings: bool,
}

impl<H: Host> Session<H> {
    /// Session with no extra method resolvers and default settings.
    pub fn new(host: H) -> Self {
        Self::builder(host).build()
    }

    pub fn builder(host: H) -> SessionBuilder<H> {
        SessionBuilder::new(host)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn bindings(&self) -> &Bindings<H> {
        &self.bindings
    }

    pub fn scope_depth(&self) -> usize {
        self.scopes.depth()
    }

    pub fn context(&self) -> EvalContext<'_, H> {
        EvalContext::new(&self.host, &self.scopes, &self.bindings, &self.dispatcher)
    }

    /// Start evaluating `query`. A submission starts with an empty binding
    /// table unless the session was built to keep bindings.
    pub fn evaluate<'a>(&'a self, query: &'a Query) -> Stream<'a, H> {
        if self.fresh_bindings && !self.bindings.is_empty() {
            debug!(count = self.bindings.len(), "bindings cleared");
            self.bindings.clear();
        }
        debug!(query = %query.text, "evaluating");
        self.context().eval(&query.expr)
    }

    /// Parse, evaluate and render every result of `text`.
    pub fn collect(&self, text: &str) -> Result<Vec<(String, String)>, SessionError> {
        let query = Query::parse(text)?;
        let mut results = Vec::new();
        for item in self.evaluate(&query) {
            let (label, value) = item?;
            results.push((label, value.text(&self.host)));
        }
        debug!(query = text, results = results.len(), "evaluation finished");
        Ok(results)
    }

    /// Track a query; returns its number.
    pub fn add(&mut self, text: &str) -> Result<usize, SessionError> {
        let query = Query::parse(text)?;
        self.scopes.clear();
        self.tracked.push(Some(query));
        let number = self.tracked.len();
        debug!(number, query = text, "query added");
        Ok(number)
    }

    /// Stop tracking query `number`. Numbers of the others do not change.
    pub fn remove(&mut self, number: usize) -> Result<(), SessionError> {
        let slot = number
            .checked_sub(1)
            .and_then(|index| self.tracked.get_mut(index))
            .filter(|slot| slot.is_some())
            .ok_or(SessionError::NoSuchExpression(number))?;
        *slot = None;
        debug!(number, "query removed");
        Ok(())
    }

    /// Live tracked queries with their numbers.
    pub fn tracked(&self) -> impl Iterator<Item = (usize, &Query)> {
        self.tracked
            .iter()
            .enumerate()
            .filter_map(|(index, query)| query.as_ref().map(|q| (index + 1, q)))
    }

    /// Evaluate every tracked query, in the order they were added.
    pub fn render_tracked(&self) -> Vec<TrackedRender> {
        self.tracked()
            .map(|(number, query)| self.render_query(number, query))
            .collect()
    }

    fn render_query(&self, number: usize, query: &Query) -> TrackedRender {
        let mut render = TrackedRender {
            number,
            text: query.text.clone(),
            results: Vec::new(),
            error: None,
            truncated: false,
        };
        for item in self.context().eval(&query.expr) {
            if self
                .max_results
                .is_some_and(|max| render.results.len() >= max)
            {
                render.truncated = true;
                break;
            }
            match item {
                Ok((label, value)) => render.results.push((label, value.text(&self.host))),
                Err(err) => {
                    render.error = Some(err.to_string());
                    break;
                }
            }
        }
        render
    }
}

/// Builder for [`Session`].
pub struct SessionBuilder<H: Host> {
    host: H,
    resolvers: Vec<Box<dyn MethodResolver<H>>>,
    max_results: Option<usize>,
    fresh_bindings: bool,
}

impl<H: Host> SessionBuilder<H> {
    pub fn new(host: H) -> Self {
        SessionBuilder {
            host,
            resolvers: Vec::new(),
            max_results: None,
            fresh_bindings: true,
        }
    }

    /// Add a method resolver to the dispatch chain.
    #[must_use]
    pub fn resolver(mut self, resolver: impl MethodResolver<H> + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Cap on results rendered per tracked query.
    #[must_use]
    pub fn max_results(mut self, max: Option<usize>) -> Self {
        self.max_results = max;
        self
    }

    /// Whether each submission starts with an empty binding table.
    #[must_use]
    pub fn fresh_bindings(mut self, fresh: bool) -> Self {
        self.fresh_bindings = fresh;
        self
    }

    pub fn build(self) -> Session<H> {
        Session {
            host: self.host,
            scopes: ScopeStack::new(),
            bindings: Bindings::new(),
            dispatcher: MethodDispatcher::new(self.resolvers),
            tracked: Vec::new(),
            max_results: self.max_results,
            fresh_bindings: self.fresh_bindings,
        }
    }
}
