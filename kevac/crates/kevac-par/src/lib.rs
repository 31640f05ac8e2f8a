//! kevac-par - Parser node emission for the Keva language.
//!
//! The parser consumes the lexer's validated token stream left to
//! right and emits a flat node array: scopes with forward links to
//! their ends, and identification blocks whose children chain through
//! `child1`. Expression material between those constructs is not
//! represented at this stage; later phases read it straight off the
//! token stream.
//!
//! Node emission order equals token consumption order. An
//! identification block is parsed speculatively: the node arena cursor
//! is saved first, and a malformed block restores it (releasing every
//! chunk allocated since) before the error propagates. All parser
//! errors are fatal; the node arena is destroyed on failure.
//!
//! # Examples
//!
//! ```
//! use kevac_lex::{tokenize, Source};
//! use kevac_par::{parse, NodeKind};
//! use kevac_util::Handler;
//!
//! let handler = Handler::new();
//! let tokens = tokenize(&Source::new("#foo:bar"), &handler).unwrap();
//! let nodes = parse(&tokens, &handler).unwrap();
//! assert_eq!(nodes.len(), 1);
//! assert_eq!(nodes.iter().next().unwrap().kind, NodeKind::Identification);
//! ```

mod edge_cases;
pub mod node;

pub use node::{ChildKind, CommandKind, IdentificationKind, Node, NodeId, NodeKind, NodeSubtype, TokenId};

use kevac_lex::{Punct, Subtype, Token, TokenKind, TokenStream};
use kevac_util::{Chain, DiagnosticCode, Handler, Span};
use thiserror::Error;

/// Nodes per arena chunk.
pub const NODES_CHUNK: usize = 256;

/// Failures of the parsing phase. All are fatal: the node arena is
/// destroyed and nothing is recovered.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("scope closed without a matching open (token {at})")]
    UnmatchedScopeClose { at: usize },
    #[error("{count} scopes left open at end of input")]
    UnclosedScopes { count: usize },
    #[error("malformed identification block (token {at})")]
    MalformedIdentification { at: usize },
}

/// The parser's output: the node array with its NO sentinel at index 0.
pub struct NodeList {
    nodes: Chain<Node>,
    count: usize,
}

impl NodeList {
    /// Number of real nodes, the sentinel excluded.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true when nothing was emitted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Total array length including the sentinel.
    #[inline]
    pub fn raw_len(&self) -> usize {
        self.nodes.len()
    }

    /// A node by id.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Iterate over real nodes in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().skip(1)
    }

    /// For a ScopeStart, the number of nodes strictly between it and
    /// its matching end.
    pub fn contained_nodes(&self, start: NodeId) -> Option<usize> {
        let node = self.get(start)?;
        if node.kind != NodeKind::ScopeStart {
            return None;
        }
        node.child.map(|end| end.index() - start.index() - 1)
    }
}

impl std::ops::Index<NodeId> for NodeList {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl PartialEq for NodeList {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl std::fmt::Debug for NodeList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Parse a token stream into a node list.
pub fn parse(tokens: &TokenStream, handler: &Handler) -> Result<NodeList, ParseError> {
    Parser::new(tokens, handler).run()
}

/// The node emitter. Construction is cheap; all work happens in
/// [`Parser::run`].
pub struct Parser<'a> {
    tokens: &'a TokenStream,
    handler: &'a Handler,
    nodes: Chain<Node>,
    /// Raw token cursor; starts past the NO sentinel at index 0.
    cursor: usize,
    /// In-progress ScopeStarts, innermost last.
    scopes: Vec<NodeId>,
}

impl<'a> Parser<'a> {
    /// Create a parser with the default arena chunk size.
    pub fn new(tokens: &'a TokenStream, handler: &'a Handler) -> Self {
        Self::with_chunk_len(tokens, handler, NODES_CHUNK)
    }

    /// Create a parser with an explicit arena chunk size.
    pub fn with_chunk_len(tokens: &'a TokenStream, handler: &'a Handler, chunk_len: usize) -> Self {
        Self {
            tokens,
            handler,
            nodes: Chain::new(chunk_len),
            cursor: 1,
            scopes: Vec::new(),
        }
    }

    /// Consume the whole token stream.
    pub fn run(mut self) -> Result<NodeList, ParseError> {
        // index 0 is the arena's NO sentinel, like the token array's
        self.nodes.push(Node::default());

        while self.cursor <= self.tokens.len() {
            let token = self.current();
            match (token.kind, token.subtype) {
                (TokenKind::Special, Subtype::Punct(Punct::Lcbrace)) => {
                    let id = self.push_node(Node {
                        kind: NodeKind::ScopeStart,
                        token: TokenId(self.cursor as u32),
                        ..Node::default()
                    });
                    self.scopes.push(id);
                    self.advance();
                }
                (TokenKind::Special, Subtype::Punct(Punct::Rcbrace)) => {
                    self.close_scope()?;
                    self.advance();
                }
                (TokenKind::Command, _) => self.parse_identification()?,
                _ => self.advance(),
            }
        }

        if !self.scopes.is_empty() {
            let count = self.scopes.len();
            self.handler
                .build_error(Span::DUMMY, format!("{count} scopes left open"))
                .code(DiagnosticCode::E_PARSE_UNMATCHED_SCOPE)
                .emit(self.handler);
            return Err(ParseError::UnclosedScopes { count });
        }

        self.nodes.release_tail();
        let count = self.nodes.len() - 1;
        log::debug!("parsed {} nodes from {} tokens", count, self.tokens.len());
        Ok(NodeList {
            nodes: self.nodes,
            count,
        })
    }

    /// The token under the cursor; NO past either end.
    fn current(&self) -> Token {
        self.tokens.get(self.cursor).copied().unwrap_or_default()
    }

    fn advance(&mut self) {
        self.cursor += 1;
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        NodeId(self.nodes.push(node) as u32)
    }

    fn close_scope(&mut self) -> Result<(), ParseError> {
        let Some(start) = self.scopes.pop() else {
            self.handler
                .build_error(
                    self.token_span(self.cursor),
                    "scope closed without a matching open",
                )
                .code(DiagnosticCode::E_PARSE_UNMATCHED_SCOPE)
                .emit(self.handler);
            return Err(ParseError::UnmatchedScopeClose { at: self.cursor });
        };
        let end = self.push_node(Node {
            kind: NodeKind::ScopeEnd,
            token: TokenId(self.cursor as u32),
            ..Node::default()
        });
        if let Some(node) = self.nodes.get_mut(start.index()) {
            node.child = Some(end);
        }
        Ok(())
    }

    /// Parse one identification block under a saved arena cursor; a
    /// malformed block restores the arena before the error propagates.
    fn parse_identification(&mut self) -> Result<(), ParseError> {
        self.nodes.save();
        match self.identification_block() {
            Ok(()) => {
                self.nodes.clear_mark();
                Ok(())
            }
            Err(error) => {
                self.nodes.restore();
                self.handler
                    .build_error(self.token_span(self.cursor), error.to_string())
                    .code(DiagnosticCode::E_PARSE_MALFORMED_IDENTIFICATION)
                    .emit(self.handler);
                Err(error)
            }
        }
    }

    fn identification_block(&mut self) -> Result<(), ParseError> {
        let command = match self.current().subtype {
            Subtype::Punct(Punct::Hash) => CommandKind::Hash,
            Subtype::Punct(Punct::At) => CommandKind::At,
            _ => return Err(ParseError::MalformedIdentification { at: self.cursor }),
        };
        self.advance();

        let name_index = self.cursor;
        let name = self.current();
        let mut last_child: Option<NodeId> = None;
        let ident = match (name.kind, name.subtype) {
            (TokenKind::L | TokenKind::Lr | TokenKind::Identifier, _) => {
                let id = self.push_node(Node {
                    kind: NodeKind::Identification,
                    subtype: NodeSubtype::Identification {
                        command,
                        kind: IdentificationKind::Declaration,
                    },
                    token: TokenId(name_index as u32),
                    ..Node::default()
                });
                self.advance();
                id
            }
            // an unnamed scope: the command binds a lock directly
            (TokenKind::R, Subtype::No) => {
                let id = self.push_node(Node {
                    kind: NodeKind::Identification,
                    subtype: NodeSubtype::Identification {
                        command,
                        kind: IdentificationKind::Declaration,
                    },
                    token: TokenId(name_index as u32),
                    ..Node::default()
                });
                self.advance();
                self.attach_child(id, &mut last_child, ChildKind::Lock, TokenId(name_index as u32));
                id
            }
            _ => return Err(ParseError::MalformedIdentification { at: name_index }),
        };

        loop {
            let token = self.current();
            match (token.kind, token.subtype) {
                // a parameter list, then the return part
                (TokenKind::R, Subtype::Punct(Punct::Lparenthesis)) => {
                    self.advance();
                    self.parse_parameters(ident, &mut last_child)?;
                    let ret = self.current();
                    if ret.kind == TokenKind::R && ret.subtype == Subtype::No {
                        self.attach_child(
                            ident,
                            &mut last_child,
                            ChildKind::ReturnLock,
                            TokenId(self.cursor as u32),
                        );
                        self.advance();
                    } else {
                        self.attach_child(
                            ident,
                            &mut last_child,
                            ChildKind::ReturnNone,
                            TokenId::SENTINEL,
                        );
                    }
                    break;
                }
                (TokenKind::R, Subtype::Punct(Punct::Rparenthesis)) => break,
                // the declared lock and its decorations ride on the
                // token stream; no node
                (TokenKind::R, _) | (TokenKind::Qr, _) => self.advance(),
                _ => break,
            }
        }

        // a value directly after the block makes it an initialization
        let next = self.current();
        let initializes = next.kind == TokenKind::Literal
            || (next.kind == TokenKind::Special && next.subtype == Subtype::Punct(Punct::Lcbrace));
        if initializes {
            if let Some(node) = self.nodes.get_mut(ident.index()) {
                node.subtype = NodeSubtype::Identification {
                    command,
                    kind: IdentificationKind::Initialization,
                };
            }
        }

        Ok(())
    }

    fn parse_parameters(
        &mut self,
        ident: NodeId,
        last_child: &mut Option<NodeId>,
    ) -> Result<(), ParseError> {
        let first = self.current();
        if first.kind == TokenKind::R && first.subtype == Subtype::Punct(Punct::Rparenthesis) {
            self.attach_child(ident, last_child, ChildKind::ParameterNone, TokenId::SENTINEL);
            self.advance();
            return Ok(());
        }

        loop {
            let index = self.cursor;
            let token = self.current();
            match (token.kind, token.subtype) {
                (TokenKind::R, Subtype::Punct(Punct::Rparenthesis)) => {
                    self.advance();
                    return Ok(());
                }
                (TokenKind::Special, Subtype::Punct(Punct::Comma)) => self.advance(),
                // parameter qualifiers ride on the token stream
                (TokenKind::Ql | TokenKind::Qlr | TokenKind::Qr, _) => self.advance(),
                (TokenKind::L | TokenKind::Identifier, _) => {
                    self.attach_child(ident, last_child, ChildKind::Parameter, TokenId(index as u32));
                    self.advance();
                    let lock = self.current();
                    if lock.kind == TokenKind::R && lock.subtype == Subtype::No {
                        self.attach_child(
                            ident,
                            last_child,
                            ChildKind::ParameterLock,
                            TokenId(self.cursor as u32),
                        );
                        self.advance();
                    }
                }
                // a fused pair carries the name in its L range and the
                // lock in its R range
                (TokenKind::Lr, _) => {
                    self.attach_child(ident, last_child, ChildKind::Parameter, TokenId(index as u32));
                    self.attach_child(
                        ident,
                        last_child,
                        ChildKind::ParameterLock,
                        TokenId(index as u32),
                    );
                    self.advance();
                }
                _ => return Err(ParseError::MalformedIdentification { at: index }),
            }
        }
    }

    /// Emit a child node and link it into the identification's list.
    fn attach_child(
        &mut self,
        ident: NodeId,
        last: &mut Option<NodeId>,
        kind: ChildKind,
        token: TokenId,
    ) {
        let id = self.push_node(Node {
            kind: NodeKind::Child,
            subtype: NodeSubtype::Child(kind),
            token,
            ..Node::default()
        });
        match *last {
            Some(previous) => {
                if let Some(node) = self.nodes.get_mut(previous.index()) {
                    node.child1 = Some(id);
                }
            }
            None => {
                if let Some(node) = self.nodes.get_mut(ident.index()) {
                    node.child = Some(id);
                }
            }
        }
        *last = Some(id);
    }

    /// The source span of a token, for diagnostics.
    fn token_span(&self, index: usize) -> Span {
        match self.tokens.get(index) {
            Some(token) => {
                let (start, end) = token.extent();
                Span::new(start, end)
            }
            None => Span::DUMMY,
        }
    }
}
