use cmdblock_ide_syntax::{Symbol, SymbolKind, Tokenizer};
use pretty_assertions::assert_eq;

fn kinds(text: &str) -> Vec<(String, SymbolKind)> {
    Tokenizer::parse(text)
        .symbols()
        .map(|symbol| (symbol.trimmed().to_string(), symbol.kind()))
        .collect()
}

fn kind_of(tokenizer: &Tokenizer, text: &str) -> SymbolKind {
    tokenizer
        .symbols()
        .find(|symbol| symbol.trimmed() == text)
        .map(Symbol::kind)
        .unwrap_or_else(|| panic!("no symbol {text:?}"))
}

#[test]
fn test_selector_arguments_around_equal_signs() {
    let tokenizer = Tokenizer::parse("kill @e[type=pig,limit=1]");

    assert_eq!(kind_of(&tokenizer, "type"), SymbolKind::LeftOfEqual);
    assert_eq!(kind_of(&tokenizer, "pig"), SymbolKind::RightOfEqual);
    assert_eq!(kind_of(&tokenizer, "limit"), SymbolKind::LeftOfEqual);
    // Numbers are decided in the first pass and keep their own color.
    assert_eq!(kind_of(&tokenizer, "1"), SymbolKind::Number);
    assert_eq!(kind_of(&tokenizer, "="), SymbolKind::Equal);
    assert_eq!(kind_of(&tokenizer, ","), SymbolKind::Comma);
    assert_eq!(kind_of(&tokenizer, "["), SymbolKind::Bracket);
}

#[test]
fn test_compound_keys_around_colons() {
    let tokenizer = Tokenizer::parse("give @s stone{display:{Name:'x'},Enchanted:true}");

    assert_eq!(kind_of(&tokenizer, "display"), SymbolKind::LeftOfColon);
    assert_eq!(kind_of(&tokenizer, "Name"), SymbolKind::LeftOfColon);
    assert_eq!(kind_of(&tokenizer, "'x'"), SymbolKind::Quote);
    assert_eq!(kind_of(&tokenizer, "Enchanted"), SymbolKind::LeftOfColon);
    assert_eq!(kind_of(&tokenizer, "true"), SymbolKind::RightOfColon);
    assert_eq!(kind_of(&tokenizer, "{"), SymbolKind::Brace);
}

#[test]
fn test_neighbor_lookup_skips_blank_symbols_and_crosses_lines() {
    let tokenizer = Tokenizer::parse("{\n  Name\n    \n  :\n  stone\n}");

    assert_eq!(kind_of(&tokenizer, "Name"), SymbolKind::LeftOfColon);
    assert_eq!(kind_of(&tokenizer, "stone"), SymbolKind::RightOfColon);
}

#[test]
fn test_dots_slashes_and_numbers() {
    assert_eq!(
        kinds("tp @s 1.5 run function ns:a/b"),
        vec![
            ("tp".to_string(), SymbolKind::Normal),
            ("@s".to_string(), SymbolKind::Normal),
            ("1".to_string(), SymbolKind::Number),
            (".".to_string(), SymbolKind::Dot),
            ("5".to_string(), SymbolKind::Number),
            ("run".to_string(), SymbolKind::Normal),
            ("function".to_string(), SymbolKind::Normal),
            ("ns".to_string(), SymbolKind::LeftOfColon),
            (":".to_string(), SymbolKind::Colon),
            ("a/b".to_string(), SymbolKind::Slash),
        ]
    );
}

#[test]
fn test_nbt_number_suffixes() {
    let tokenizer = Tokenizer::parse("{a:1b,b:-20s,c:3f,d:4l,e:5B,f:6x}");

    for number in ["1b", "-20s", "3f", "4l", "5B"] {
        assert_eq!(kind_of(&tokenizer, number), SymbolKind::Number, "{number}");
    }
    assert_eq!(kind_of(&tokenizer, "6x"), SymbolKind::RightOfColon);
}

#[test]
fn test_every_symbol_is_classified_after_parse() {
    let tokenizer = Tokenizer::parse("execute store result score @s x run data get entity @s Pos[0]");

    let normal = tokenizer
        .symbols()
        .filter(|symbol| symbol.kind() == SymbolKind::Normal)
        .count();
    assert!(normal > 0);
    assert_eq!(kind_of(&tokenizer, "0"), SymbolKind::Number);
    assert_eq!(kind_of(&tokenizer, "Pos"), SymbolKind::Normal);
}
