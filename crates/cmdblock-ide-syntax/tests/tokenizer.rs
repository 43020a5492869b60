use cmdblock_ide_syntax::{ScopeKind, Symbol, SymbolKind, Tokenizer};
use pretty_assertions::assert_eq;

fn trimmed(tokenizer: &Tokenizer, line: usize) -> Vec<&str> {
    tokenizer.line(line).iter().map(Symbol::trimmed).collect()
}

fn find<'a>(tokenizer: &'a Tokenizer, text: &str) -> &'a Symbol {
    tokenizer
        .symbols()
        .find(|symbol| symbol.trimmed() == text)
        .unwrap_or_else(|| panic!("no symbol {text:?}"))
}

#[test]
fn test_plain_words_are_normal_symbols() {
    let tokenizer = Tokenizer::parse("say hello");

    assert_eq!(trimmed(&tokenizer, 0), vec!["say", "hello"]);
    assert!(
        tokenizer
            .symbols()
            .all(|symbol| symbol.kind() == SymbolKind::Normal)
    );
    assert!(!tokenizer.has_errors());
}

#[test]
fn test_coordinate_triple_is_one_symbol() {
    let tokenizer = Tokenizer::parse("execute if block ~ ~ ~ minecraft:stone run say hi");

    let coords: Vec<&Symbol> = tokenizer
        .symbols()
        .filter(|symbol| symbol.kind() == SymbolKind::Coordinate)
        .collect();
    assert_eq!(coords.len(), 1);
    assert_eq!(coords[0].trimmed(), "~ ~ ~");
    assert!(tokenizer.symbols().all(|symbol| symbol.trimmed() != "~"));
    assert_eq!(find(&tokenizer, "minecraft").kind(), SymbolKind::LeftOfColon);
    assert_eq!(find(&tokenizer, "stone").kind(), SymbolKind::RightOfColon);
}

#[test]
fn test_local_and_absolute_coordinates() {
    let tokenizer = Tokenizer::parse("tp @s ^ ^1.5 ^-2\nsetblock 10 64 -5 stone");

    assert_eq!(find(&tokenizer, "^ ^1.5 ^-2").kind(), SymbolKind::Coordinate);
    assert_eq!(find(&tokenizer, "10 64 -5").kind(), SymbolKind::Coordinate);
    assert_eq!(find(&tokenizer, "stone").kind(), SymbolKind::Normal);
}

#[test]
fn test_coordinates_are_not_detected_inside_scopes() {
    let tokenizer = Tokenizer::parse("summon pig ~ ~ ~ {Motion:[1 2 3]}");

    let coords = tokenizer
        .symbols()
        .filter(|symbol| symbol.kind() == SymbolKind::Coordinate)
        .count();
    assert_eq!(coords, 1);
}

#[test]
fn test_well_bracketed_text_links_siblings() {
    let tokenizer =
        Tokenizer::parse("data merge entity @s {Tags:[\"a\",\"b\"],Pos:[1d,2d,3d],Data:{}}");

    assert!(!tokenizer.has_errors());
    assert!(tokenizer.unclosed().is_empty());

    for symbol in tokenizer.symbols() {
        let trimmed = symbol.trimmed();
        let Some(kind) = trimmed.chars().next().and_then(ScopeKind::from_open) else {
            continue;
        };
        if trimmed.chars().count() != 1 {
            continue;
        }
        let sibling = tokenizer.sibling_of(symbol).expect("opener has a sibling");
        assert_eq!(sibling.trimmed().chars().next(), Some(kind.closer()));
        assert_eq!(sibling.sibling(), Some(symbol.reference()));
        assert!(!sibling.is_error());
    }
}

#[test]
fn test_siblings_link_across_lines() {
    let tokenizer = Tokenizer::parse("give @s stone{\n  Count:1b\n}");

    let opener = find(&tokenizer, "{");
    let closer = find(&tokenizer, "}");
    assert_eq!(opener.line(), 0);
    assert_eq!(closer.line(), 2);
    assert_eq!(opener.sibling(), Some(closer.reference()));
    assert_eq!(closer.sibling(), Some(opener.reference()));
}

#[test]
fn test_extra_closer_is_the_only_error() {
    let tokenizer = Tokenizer::parse("give @s stone[]]");

    let errors: Vec<&Symbol> = tokenizer.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].trimmed(), "]");
    assert_eq!(errors[0].index(), tokenizer.line(0).len() - 1);
    assert_eq!(errors[0].sibling(), None);
    assert!(tokenizer.unclosed().is_empty());
}

#[test]
fn test_mismatched_closer_flags_both_ends() {
    let tokenizer = Tokenizer::parse("{a:[1}");

    let open_bracket = find(&tokenizer, "[");
    let close_brace = find(&tokenizer, "}");
    assert!(open_bracket.is_error());
    assert!(close_brace.is_error());
    assert_eq!(open_bracket.sibling(), None);
    assert_eq!(close_brace.sibling(), None);

    // Both openers stay on the stack once the text ends.
    assert_eq!(tokenizer.unclosed().len(), 2);
    assert!(find(&tokenizer, "{").is_error());
}

#[test]
fn test_strings_are_inert() {
    let tokenizer = Tokenizer::parse("say \"a [ b, c=d\"");

    assert_eq!(trimmed(&tokenizer, 0), vec!["say", "\"a [ b, c=d\""]);
    assert_eq!(tokenizer.line(0)[1].kind(), SymbolKind::String);
    assert!(!tokenizer.has_errors());
}

#[test]
fn test_escaped_quote_stays_inside_string() {
    let tokenizer = Tokenizer::parse(r#"tellraw @a "say \"hi\" [x]" ]"#);

    assert_eq!(find(&tokenizer, r#""say \"hi\" [x]""#).kind(), SymbolKind::String);
    let errors: Vec<&str> = tokenizer.errors().map(Symbol::trimmed).collect();
    assert_eq!(errors, vec!["]"]);
}

#[test]
fn test_string_split_by_newline_keeps_string_kind() {
    let tokenizer = Tokenizer::parse("say \"first\nsecond\" done");

    assert_eq!(tokenizer.line_count(), 2);
    assert_eq!(tokenizer.line(0)[1].kind(), SymbolKind::String);
    assert_eq!(tokenizer.line(1)[0].trimmed(), "second\"");
    assert_eq!(tokenizer.line(1)[0].kind(), SymbolKind::String);
    assert_eq!(tokenizer.line(1)[1].kind(), SymbolKind::Normal);
}

#[test]
fn test_symbol_offsets_increase_without_overlap() {
    let samples = [
        "execute as @e[type=pig,tag=!done] at @s run tp @s ~ ~1 ~",
        "data merge block ~ ~ ~ {\n  Items:[\n    {Slot:0b,id:\"minecraft:stone\"}\n  ]\n}",
        "  say   spaced    out  ",
        "tellraw @a {\"text\":\"x\"}]]",
    ];

    for sample in samples {
        let tokenizer = Tokenizer::parse(sample);
        for line in 0..tokenizer.line_count() {
            let symbols = tokenizer.line(line);
            for pair in symbols.windows(2) {
                assert!(pair[0].end() <= pair[1].start(), "overlap in {sample:?}");
                assert!(pair[0].start() < pair[1].start());
            }
            for (index, symbol) in symbols.iter().enumerate() {
                assert_eq!(symbol.index(), index);
                assert_eq!(symbol.line(), line);
            }
        }
    }
}

#[test]
fn test_symbol_text_matches_source_columns() {
    let text = "scoreboard players set @s score 5\nfunction ns:path/to/fn";
    let tokenizer = Tokenizer::parse(text);

    for (line_index, line) in text.split('\n').enumerate() {
        for symbol in tokenizer.line(line_index) {
            let slice: String = line
                .chars()
                .skip(symbol.start())
                .take(symbol.char_len())
                .collect();
            assert_eq!(slice, symbol.text());
        }
    }
}

#[test]
fn test_refresh_rebuilds_the_table() {
    let mut tokenizer = Tokenizer::parse("give @s stone[]]");
    assert!(tokenizer.has_errors());

    tokenizer.refresh("say ok\nsay again");
    assert!(!tokenizer.has_errors());
    assert_eq!(tokenizer.line_count(), 2);
    assert_eq!(tokenizer.text(), "say ok\nsay again");
}

#[test]
fn test_symbol_at_column() {
    let tokenizer = Tokenizer::parse("say hello");

    assert_eq!(tokenizer.symbol_at(0, 0).map(Symbol::trimmed), Some("say"));
    assert_eq!(tokenizer.symbol_at(0, 5).map(Symbol::trimmed), Some("hello"));
    assert!(tokenizer.symbol_at(0, 9).is_none());
    assert!(tokenizer.symbol_at(4, 0).is_none());
}
