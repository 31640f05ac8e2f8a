//! Node model - the parser's flat output records.
//!
//! Nodes form a flat array in an append-only arena; relations are
//! integer indices, never pointers, so arena growth cannot invalidate a
//! link. A node borrows its originating token by index into the lexer's
//! token array and never owns it.

/// Index of a token in the lexer's token array. Index 0 is the NO
/// sentinel, which doubles as "no originating token".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TokenId(pub u32);

impl TokenId {
    /// The NO-sentinel token index.
    pub const SENTINEL: TokenId = TokenId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a node in the parser's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Node classification. The all-[`Default`] node is the arena's NO
/// sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeKind {
    /// Sentinel, never emitted for a token
    #[default]
    No,
    /// `{`, linked forward to its matching end
    ScopeStart,
    /// `}`
    ScopeEnd,
    /// A `#`/`@` block declaring or initializing an entity
    Identification,
    /// A typed child attached to an identification
    Child,
}

/// Which command character introduced an identification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    Hash,
    At,
}

/// Whether an identification declares or initializes. Orthogonal to
/// [`CommandKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentificationKind {
    Declaration,
    Initialization,
}

/// The kinds of child node an identification can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChildKind {
    /// An unnamed scope's lock; the token's R range holds the name
    Lock,
    /// Declared absence of a return
    ReturnNone,
    /// A locked return; the token's R range holds the name
    ReturnLock,
    /// An empty parameter list
    ParameterNone,
    /// A parameter; the token's L range holds the name
    Parameter,
    /// A parameter's lock; the token's R range holds the name
    ParameterLock,
}

/// Secondary node classification, interpreted per [`NodeKind`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeSubtype {
    #[default]
    No,
    /// For IDENTIFICATION nodes: the command bit and the type bit
    Identification {
        command: CommandKind,
        kind: IdentificationKind,
    },
    /// For CHILD nodes
    Child(ChildKind),
}

/// One parser output record.
///
/// `child` is polymorphic over the node kind: a ScopeStart's `child` is
/// its matching ScopeEnd, an Identification's `child` is its first
/// child node. `child1` chains siblings inside an identification's
/// child list; `None` terminates the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub subtype: NodeSubtype,
    /// Originating token, borrowed from the lexer by index.
    pub token: TokenId,
    /// Forward link, meaning depends on `kind`.
    pub child: Option<NodeId>,
    /// Next sibling in a child list.
    pub child1: Option<NodeId>,
}

impl Node {
    /// Returns true for the NO sentinel.
    #[inline]
    pub fn is_no(&self) -> bool {
        self.kind == NodeKind::No
    }
}
