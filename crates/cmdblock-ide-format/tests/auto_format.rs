use cmdblock_ide_format::{FormatPolicy, auto_format};
use pretty_assertions::assert_eq;

fn format(text: &str) -> String {
    auto_format(text, &FormatPolicy::default())
}

#[test]
fn test_command_without_brackets_is_unchanged() {
    assert_eq!(format("say hello"), "say hello");
}

#[test]
fn test_selector_arguments_get_one_line_each() {
    assert_eq!(
        format("execute as @e[type=pig,tag=!done] run say hi"),
        "execute as @e\n[\n  type = pig,\n  tag = !done\n]\nrun say hi"
    );
}

#[test]
fn test_nested_compounds_are_indented_by_depth() {
    let expected = "\
give @s stone
{
  Count:1b,
  tag:
  {
    list:
    [
      1,
      2
    ]
  }
}";
    assert_eq!(format("give @s stone{Count:1b,tag:{list:[1,2]}}"), expected);
}

#[test]
fn test_empty_scope_keeps_an_indented_line() {
    assert_eq!(format("data merge entity @s {}"), "data merge entity @s\n{\n  \n}");
    assert_eq!(format("say []"), "say\n[\n  \n]");
}

#[test]
fn test_single_quoted_json_stays_glued_to_its_quotes() {
    let expected = "\
give @s stone
{
  display:
  {
    Name:
    '[
      {
        \"text\":\"Hi\"
      }
    ]'
  }
}";
    assert_eq!(
        format("give @s stone{display:{Name:'[{\"text\":\"Hi\"}]'}}"),
        expected
    );
}

#[test]
fn test_closers_stay_glued_to_commas() {
    assert_eq!(
        format("summon pig ~ ~ ~ {Tags:[a],Pos:[1d]}"),
        "summon pig ~ ~ ~\n{\n  Tags:\n  [\n    a\n  ],\n  Pos:\n  [\n    1d\n  ]\n}"
    );
}

#[test]
fn test_double_quoted_strings_are_never_split() {
    assert_eq!(
        format(r#"tellraw @a {"text":"a, b [c] = d"}"#),
        "tellraw @a\n{\n  \"text\":\"a, b [c] = d\"\n}"
    );
}

#[test]
fn test_policy_controls_equals_and_indent_width() {
    let policy = FormatPolicy {
        spaced_equals: false,
        tab_width: 4,
        ..FormatPolicy::default()
    };
    assert_eq!(
        auto_format("kill @e[type=pig]", &policy),
        "kill @e\n[\n    type=pig\n]"
    );
}

#[test]
fn test_already_formatted_text_is_stable() {
    let once = format("execute as @e[type=pig] run data merge entity @s {NoAI:1b,Tags:[a,b]}");
    assert_eq!(format(&once), once);
}

#[test]
fn test_only_bare_equals_get_spaced() {
    assert_eq!(
        format("execute as @e[scores={a=1..}] if score @s a >= @s b"),
        "execute as @e\n[\n  scores =\n  {\n    a = 1..\n  }\n]\nif score @s a >= @s b"
    );
}
