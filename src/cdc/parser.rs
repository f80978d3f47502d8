//! Recursive-descent parser for CDC text.

use super::tokenizer::{parse_number, Token, TokenKind, Tokenizer};
use crate::circuit::{Circuit, Connection, ConnectionKind, Node};
use crate::elements::{Element, ElementKind};
use crate::error::{ConnectionError, ElementError, ParsingError};

/// Parser for CDC text.
///
/// A parser can be reused for any number of inputs; every call to
/// [`Parser::process`] starts from a clean state.
#[derive(Debug, Default)]
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    end: usize,
}

impl Parser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a complete CDC string into a circuit.
    pub fn process(&mut self, input: &str) -> Result<Circuit, ParsingError> {
        self.tokens = Tokenizer::new(input).tokenize()?;
        self.index = 0;
        self.end = input.len();
        log::trace!("tokenized {:?} into {} token(s)", input, self.tokens.len());

        let children = self.parse_series(None)?;
        if children.is_empty() {
            return Err(ParsingError::InsufficientTokens {
                position: self.end,
                context: "circuit",
            });
        }
        let root = Connection::new(ConnectionKind::Series, children)
            .map_err(|e| connection_error(e, 0))?;
        let circuit = Circuit::from_connection(root);

        log::debug!(
            "parsed CDC of {} byte(s) into {} element(s)",
            input.len(),
            circuit.flattened_elements().len()
        );
        Ok(circuit)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Consume the next token; running out is an `InsufficientTokens` error.
    fn next(&mut self, context: &'static str) -> Result<Token, ParsingError> {
        let token = self.tokens.get(self.index).cloned().ok_or(ParsingError::InsufficientTokens {
            position: self.end,
            context,
        })?;
        self.index += 1;
        Ok(token)
    }

    fn expect(&mut self, kind: TokenKind, context: &'static str) -> Result<Token, ParsingError> {
        let token = self.next(context)?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(unexpected(&token))
        }
    }

    /// `Series := (Element | Parallel | SeriesGroup)+`
    ///
    /// Stops before `closing`; without one (top level) it stops at the end
    /// of the input.
    fn parse_series(&mut self, closing: Option<TokenKind>) -> Result<Vec<Node>, ParsingError> {
        let mut children = Vec::new();
        loop {
            match self.peek_kind() {
                None if closing.is_some() => {
                    return Err(ParsingError::InsufficientTokens {
                        position: self.end,
                        context: "connection",
                    });
                }
                None => break,
                Some(kind) if Some(kind) == closing => break,
                Some(_) => children.push(self.parse_node()?),
            }
        }
        Ok(children)
    }

    /// `Branch := Element | Parallel | SeriesGroup`
    fn parse_node(&mut self) -> Result<Node, ParsingError> {
        match self.peek_kind() {
            Some(TokenKind::Symbol) => Ok(Node::Element(self.parse_element()?)),
            Some(TokenKind::OpenParen) => self.parse_parallel(),
            Some(TokenKind::OpenBracket) => self.parse_series_group(),
            Some(_) => Err(unexpected(&self.tokens[self.index])),
            None => Err(ParsingError::InsufficientTokens {
                position: self.end,
                context: "connection",
            }),
        }
    }

    /// `SeriesGroup := '[' Series ']'`
    fn parse_series_group(&mut self) -> Result<Node, ParsingError> {
        let open = self.expect(TokenKind::OpenBracket, "series connection")?;
        let children = self.parse_series(Some(TokenKind::CloseBracket))?;
        self.expect(TokenKind::CloseBracket, "series connection")?;
        Connection::new(ConnectionKind::Series, children)
            .map(Node::Connection)
            .map_err(|e| connection_error(e, open.position))
    }

    /// `Parallel := '(' Branch Branch+ ')'`
    fn parse_parallel(&mut self) -> Result<Node, ParsingError> {
        let open = self.expect(TokenKind::OpenParen, "parallel connection")?;
        let mut branches = Vec::new();
        loop {
            match self.peek_kind() {
                Some(TokenKind::CloseParen) => break,
                _ => branches.push(self.parse_node()?),
            }
        }
        self.expect(TokenKind::CloseParen, "parallel connection")?;
        Connection::new(ConnectionKind::Parallel, branches)
            .map(Node::Connection)
            .map_err(|e| connection_error(e, open.position))
    }

    /// `Element := SYMBOL ParamBlock?`
    fn parse_element(&mut self) -> Result<Element, ParsingError> {
        let token = self.expect(TokenKind::Symbol, "element")?;
        let kind = ElementKind::from_symbol(&token.text).ok_or_else(|| ParsingError::InvalidElementSymbol {
            position: token.position,
            symbol: token.text.clone(),
        })?;
        let mut element = Element::new(kind);
        if self.peek_kind() == Some(TokenKind::OpenBrace) {
            self.parse_parameter_block(&mut element)?;
        }
        Ok(element)
    }

    /// `ParamBlock := '{' ParamDef (',' ParamDef)* (':' LABEL)? '}'`
    fn parse_parameter_block(&mut self, element: &mut Element) -> Result<(), ParsingError> {
        const CONTEXT: &str = "parameter block";
        self.expect(TokenKind::OpenBrace, CONTEXT)?;

        let mut defined: Vec<String> = Vec::new();
        loop {
            self.parse_parameter_definition(element, &mut defined)?;
            let separator = self.next(CONTEXT)?;
            match separator.kind {
                TokenKind::Comma => continue,
                TokenKind::CloseBrace => return Ok(()),
                TokenKind::Colon => break,
                _ => return Err(unexpected(&separator)),
            }
        }

        let label = self.expect(TokenKind::Label, CONTEXT)?;
        element.set_label(&label.text).map_err(|_| unexpected(&label))?;
        self.expect(TokenKind::CloseBrace, CONTEXT)?;
        Ok(())
    }

    /// `ParamDef := IDENT '=' Value`
    fn parse_parameter_definition(
        &mut self,
        element: &mut Element,
        defined: &mut Vec<String>,
    ) -> Result<(), ParsingError> {
        const CONTEXT: &str = "parameter definition";
        let name = self.next(CONTEXT)?;
        match name.kind {
            TokenKind::Identifier => {}
            TokenKind::Equals => {
                return Err(ParsingError::ExpectedParameterIdentifier {
                    position: name.position,
                });
            }
            _ => return Err(unexpected(&name)),
        }

        let symbol = element.get_symbol();
        let definitions = element.definition().parameters;
        if defined.len() >= definitions.len() {
            return Err(ParsingError::TooManyParameterDefinitions {
                position: name.position,
                symbol: symbol.to_string(),
                expected: definitions.len(),
            });
        }
        let Some(definition) = element.definition().parameter(&name.text) else {
            return Err(ParsingError::InvalidParameterDefinition {
                position: name.position,
                symbol: symbol.to_string(),
                name: name.text,
            });
        };
        if defined.contains(&name.text) {
            return Err(ParsingError::DuplicateParameterDefinition {
                position: name.position,
                name: name.text,
            });
        }

        self.expect(TokenKind::Equals, CONTEXT)?;
        let value = self.parse_value()?;

        // value[/lower[/upper]]; an empty lower slot keeps the default
        let mut lower = definition.lower;
        let mut upper = definition.upper;
        if self.peek_kind() == Some(TokenKind::Slash) {
            self.index += 1;
            if self.peek_kind() != Some(TokenKind::Slash) {
                lower = self.parse_value()?;
            }
            if self.peek_kind() == Some(TokenKind::Slash) {
                self.index += 1;
                upper = self.parse_value()?;
            }
        }

        let fixed = matches!(self.peek(), Some(t) if t.kind == TokenKind::Identifier && t.text == "F");
        if fixed {
            self.index += 1;
        }

        element
            .set_parameter(definition.name, value, lower, upper, fixed)
            .map_err(|e| parameter_error(e, &name, value))?;
        defined.push(name.text);
        Ok(())
    }

    /// `NUMBER`; a missing or malformed literal is `ExpectedNumericValue`.
    fn parse_value(&mut self) -> Result<f64, ParsingError> {
        let Some(token) = self.peek() else {
            return Err(ParsingError::ExpectedNumericValue {
                position: self.end,
                found: "end of input".to_string(),
            });
        };
        let value = (token.kind == TokenKind::Number)
            .then(|| parse_number(&token.text))
            .flatten()
            .ok_or_else(|| ParsingError::ExpectedNumericValue {
                position: token.position,
                found: format!("'{}'", token.text),
            })?;
        self.index += 1;
        Ok(value)
    }
}

fn unexpected(token: &Token) -> ParsingError {
    ParsingError::UnexpectedToken {
        position: token.position,
        token: token.text.clone(),
    }
}

fn connection_error(error: ConnectionError, position: usize) -> ParsingError {
    match error {
        ConnectionError::Empty { .. } => ParsingError::ConnectionWithoutElements { position },
        ConnectionError::InsufficientBranches { count } => {
            ParsingError::InsufficientElementsInParallelConnection {
                position,
                branches: count,
            }
        }
    }
}

fn parameter_error(error: ElementError, token: &Token, value: f64) -> ParsingError {
    let position = token.position;
    match error {
        // Crossed limits leave the value outside at least one of them.
        ElementError::LimitOrder { name, lower, .. } if value < lower => {
            ParsingError::InvalidParameterLowerLimit {
                position,
                name,
                value,
                lower,
            }
        }
        ElementError::LimitOrder { name, upper, .. } => ParsingError::InvalidParameterUpperLimit {
            position,
            name,
            value,
            upper,
        },
        ElementError::LowerLimit { name, value, lower } => ParsingError::InvalidParameterLowerLimit {
            position,
            name,
            value,
            lower,
        },
        ElementError::UpperLimit { name, value, upper } => ParsingError::InvalidParameterUpperLimit {
            position,
            name,
            value,
            upper,
        },
        ElementError::UnknownParameter { symbol, name } => ParsingError::InvalidParameterDefinition {
            position,
            symbol,
            name,
        },
        other => ParsingError::ExpectedNumericValue {
            position,
            found: other.to_string(),
        },
    }
}
