//! Replays parse events into a rowan green tree.

use rowan::GreenNodeBuilder;

use crate::lexer::Token;
use crate::parser::event::Event;
use crate::syntax_kind::{SyntaxKind, SyntaxNode};

pub struct Sink<'t, 'input> {
    builder: GreenNodeBuilder<'static>,
    tokens: &'t [Token<'input>],
    next_token: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Sink<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>], events: Vec<Event>) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            tokens,
            next_token: 0,
            events,
        }
    }

    pub fn finish(mut self) -> SyntaxNode {
        let mut chain = Vec::new();

        for i in 0..self.events.len() {
            match std::mem::replace(&mut self.events[i], Event::Placeholder) {
                Event::Start {
                    kind,
                    forward_parent,
                } => {
                    // Collect this node and its forward parents, innermost
                    // first. Taking each parent out leaves a Placeholder, so
                    // it is not opened twice when the loop reaches it.
                    chain.push(kind);
                    let mut parent = forward_parent;
                    while let Some(idx) = parent {
                        parent = match std::mem::replace(&mut self.events[idx], Event::Placeholder)
                        {
                            Event::Start {
                                kind,
                                forward_parent,
                            } => {
                                chain.push(kind);
                                forward_parent
                            }
                            _ => None,
                        };
                    }
                    for kind in chain.drain(..).rev() {
                        self.builder.start_node(kind.into());
                    }
                }
                Event::Token { kind } => self.token(kind),
                Event::Finish => self.builder.finish_node(),
                Event::Placeholder => {}
            }
        }

        SyntaxNode::new_root(self.builder.finish())
    }

    fn token(&mut self, kind: SyntaxKind) {
        if let Some(token) = self.tokens.get(self.next_token) {
            self.builder.token(kind.into(), token.text);
            self.next_token += 1;
        }
    }
}
