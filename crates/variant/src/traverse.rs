//! Stack-safe tree rebuilding.
//!
//! Deep copy, both JSON directions and limit checks all walk a tree of
//! nested sequences and mappings and rebuild it in some target shape.
//! [`rebuild`] does that with a heap-allocated frame stack, so nesting depth
//! is bounded by memory instead of by the thread's call stack.

use std::slice;

use crate::value::{Variant, VariantRef};

/// A non-container node, borrowed from its tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Scalar<'a> {
    Empty,
    Boolean(bool),
    Signed(i64),
    Unsigned(u64),
    Floating(f64),
    Text(&'a str),
}

pub(crate) type Entries<'a, S> = Box<dyn ExactSizeIterator<Item = (&'a String, &'a S)> + 'a>;

/// How a node looks to the traversal
pub(crate) enum Shape<'a, S> {
    Leaf(Scalar<'a>),
    Sequence(slice::Iter<'a, S>),
    Mapping(Entries<'a, S>),
}

/// A tree the traversal can walk
pub(crate) trait Tree: Sized {
    fn shape(&self) -> Shape<'_, Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Container {
    Sequence,
    Mapping,
}

/// Produces the target tree bottom-up
pub(crate) trait Builder {
    type Output;
    type Error;

    fn leaf(&mut self, scalar: Scalar<'_>) -> Result<Self::Output, Self::Error>;

    /// Called before the children of a container are visited. The root
    /// container sits at depth 1.
    fn open(
        &mut self,
        _depth: usize,
        _len: usize,
        _container: Container,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn sequence(&mut self, items: Vec<Self::Output>) -> Self::Output;

    fn mapping(&mut self, entries: Vec<(String, Self::Output)>) -> Self::Output;
}

enum Frame<'a, S, T> {
    Sequence {
        children: slice::Iter<'a, S>,
        done: Vec<T>,
    },
    Mapping {
        children: Entries<'a, S>,
        pending: &'a String,
        done: Vec<(String, T)>,
    },
}

/// Walk `root` depth-first and rebuild it with `builder`.
pub(crate) fn rebuild<'a, S, B>(root: &'a S, builder: &mut B) -> Result<B::Output, B::Error>
where
    S: Tree,
    B: Builder,
{
    let mut stack: Vec<Frame<'a, S, B::Output>> = Vec::new();
    let mut current = root;

    loop {
        // Descend along first children until something completes.
        let mut output = loop {
            match current.shape() {
                Shape::Leaf(scalar) => break builder.leaf(scalar)?,
                Shape::Sequence(mut children) => {
                    builder.open(stack.len() + 1, children.len(), Container::Sequence)?;
                    match children.next() {
                        Some(first) => {
                            stack.push(Frame::Sequence {
                                done: Vec::with_capacity(children.len() + 1),
                                children,
                            });
                            current = first;
                        }
                        None => break builder.sequence(Vec::new()),
                    }
                }
                Shape::Mapping(mut children) => {
                    builder.open(stack.len() + 1, children.len(), Container::Mapping)?;
                    match children.next() {
                        Some((key, first)) => {
                            stack.push(Frame::Mapping {
                                done: Vec::with_capacity(children.len() + 1),
                                pending: key,
                                children,
                            });
                            current = first;
                        }
                        None => break builder.mapping(Vec::new()),
                    }
                }
            }
        };

        // Climb, handing each finished node to its parent, until a parent
        // still has children left.
        loop {
            let Some(mut frame) = stack.pop() else {
                return Ok(output);
            };
            match &mut frame {
                Frame::Sequence { children, done } => {
                    done.push(output);
                    if let Some(next) = children.next() {
                        current = next;
                        stack.push(frame);
                        break;
                    }
                }
                Frame::Mapping {
                    children,
                    pending,
                    done,
                } => {
                    done.push(((*pending).clone(), output));
                    if let Some((key, next)) = children.next() {
                        *pending = key;
                        current = next;
                        stack.push(frame);
                        break;
                    }
                }
            }

            output = match frame {
                Frame::Sequence { done, .. } => builder.sequence(done),
                Frame::Mapping { done, .. } => builder.mapping(done),
            };
        }
    }
}

impl Tree for Variant {
    fn shape(&self) -> Shape<'_, Self> {
        match self.view() {
            VariantRef::Empty => Shape::Leaf(Scalar::Empty),
            VariantRef::Boolean(b) => Shape::Leaf(Scalar::Boolean(b)),
            VariantRef::Signed(i) => Shape::Leaf(Scalar::Signed(i)),
            VariantRef::Unsigned(u) => Shape::Leaf(Scalar::Unsigned(u)),
            VariantRef::Floating(f) => Shape::Leaf(Scalar::Floating(f)),
            VariantRef::Text(t) => Shape::Leaf(Scalar::Text(t)),
            VariantRef::Sequence(items) => Shape::Sequence(items.iter()),
            VariantRef::Mapping(entries) => Shape::Mapping(Box::new(entries.iter())),
        }
    }
}
