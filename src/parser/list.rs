//! Grouping of bullet lines into list containers.

use crate::model::{Block, Inline, List, ListEntry};

/// Marker that starts a list item line.
pub const ITEM_MARKER: &str = "- ";

/// A scanned body line before list grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scanned {
    /// A finished block
    Block(Block),
    /// A `- ` line
    Item {
        /// Content after the marker
        content: Vec<Inline>,
        /// The whole line, used when the item stands alone
        line: Vec<Inline>,
    },
    /// A blank line
    Blank,
}

/// Wrap runs of two or more items in list containers.
///
/// Pause markers between items stay inside the list. A lone item is kept
/// as ordinary text; blank lines end a run and are dropped.
pub fn group_lists(scanned: Vec<Scanned>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut iter = scanned.into_iter().peekable();

    while let Some(entry) = iter.next() {
        match entry {
            Scanned::Blank => {}
            Scanned::Block(block) => blocks.push(block),
            Scanned::Item { content, line } => {
                let mut entries = vec![ListEntry::Item(content)];
                let mut lone_line = Some(line);
                let mut pending_pauses = 0;

                loop {
                    match iter.peek() {
                        Some(Scanned::Block(Block::Pause)) => {
                            pending_pauses += 1;
                            iter.next();
                        }
                        Some(Scanned::Item { .. }) => {
                            if let Some(Scanned::Item { content, .. }) = iter.next() {
                                entries.extend((0..pending_pauses).map(|_| ListEntry::Pause));
                                entries.push(ListEntry::Item(content));
                                pending_pauses = 0;
                                lone_line = None;
                            }
                        }
                        _ => break,
                    }
                }

                match lone_line {
                    Some(line) => blocks.push(Block::paragraph(line)),
                    None => blocks.push(Block::List(List { entries })),
                }
                blocks.extend((0..pending_pauses).map(|_| Block::Pause));
            }
        }
    }

    blocks
}
