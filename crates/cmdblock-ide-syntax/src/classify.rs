//! Two-pass symbol classification.
//!
//! The first pass assigns every kind that can be decided from the symbol alone. The second pass
//! resolves the rest from their neighbors: an argument next to an `=` or `:` marker becomes a
//! left/right-of-operator symbol, anything else is [`SymbolKind::Normal`].

use crate::symbol::{Symbol, SymbolKind};
use regex::Regex;
use std::sync::LazyLock;

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]+[fbBsl]?$").expect("number pattern is valid"));

pub(crate) fn classify(lines: &mut [Vec<Symbol>]) {
    let order: Vec<(usize, usize)> = lines
        .iter()
        .enumerate()
        .flat_map(|(line, symbols)| (0..symbols.len()).map(move |index| (line, index)))
        .collect();

    let first: Vec<Option<SymbolKind>> = order
        .iter()
        .map(|&(line, index)| first_pass(&lines[line][index]))
        .collect();
    let blank: Vec<bool> = order
        .iter()
        .map(|&(line, index)| lines[line][index].is_blank())
        .collect();

    for (position, &(line, index)) in order.iter().enumerate() {
        let kind = first[position].unwrap_or_else(|| second_pass(position, &first, &blank));
        lines[line][index].kind = kind;
    }
}

/// Kind decided by the symbol's own content, in priority order.
pub(crate) fn first_pass(symbol: &Symbol) -> Option<SymbolKind> {
    let text = symbol.text.as_str();

    let kind = if symbol.in_string || text.contains('"') {
        SymbolKind::String
    } else if symbol.coordinate {
        SymbolKind::Coordinate
    } else if text.contains('=') {
        SymbolKind::Equal
    } else if text.contains(',') {
        SymbolKind::Comma
    } else if text.contains(':') {
        SymbolKind::Colon
    } else if text.contains('\'') {
        SymbolKind::Quote
    } else if text.contains(['{', '}']) {
        SymbolKind::Brace
    } else if text.contains(['[', ']']) {
        SymbolKind::Bracket
    } else if text.contains('.') {
        SymbolKind::Dot
    } else if text.contains('/') {
        SymbolKind::Slash
    } else if NUMBER.is_match(text.trim()) {
        SymbolKind::Number
    } else {
        return None;
    };

    Some(kind)
}

/// Resolve an unclassified symbol from its nearest non-blank neighbors (lines are crossed).
fn second_pass(position: usize, first: &[Option<SymbolKind>], blank: &[bool]) -> SymbolKind {
    let next = (position + 1..first.len()).find(|&p| !blank[p]);
    match next.and_then(|p| first[p]) {
        Some(SymbolKind::Equal) => return SymbolKind::LeftOfEqual,
        Some(SymbolKind::Colon) => return SymbolKind::LeftOfColon,
        _ => {}
    }

    let prev = (0..position).rev().find(|&p| !blank[p]);
    match prev.and_then(|p| first[p]) {
        Some(SymbolKind::Equal) => SymbolKind::RightOfEqual,
        Some(SymbolKind::Colon) => SymbolKind::RightOfColon,
        _ => SymbolKind::Normal,
    }
}
