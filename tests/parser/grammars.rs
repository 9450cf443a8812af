//! Integration tests for argument grammars

use parley_parser::{Element, Grammar, GrammarError, ReferenceError, Scope};

use crate::parlor;

fn hold() -> Grammar {
    Grammar::new().or([Element::object("pet", Scope::Held)])
}

fn give() -> Grammar {
    Grammar::new()
        .or([
            Element::object("item", Scope::Held),
            Element::keyword("to"),
            Element::object("recipient", Scope::Nearby),
        ])
        .or([
            Element::object("recipient", Scope::Nearby),
            Element::object("item", Scope::Held),
        ])
}

#[test]
fn inventory_grammar_picks_the_held_cat() {
    let p = parlor();
    let args = hold().parse(&p.world, p.player, "cat").unwrap();
    assert_eq!(args.object("pet"), Some(p.held_cat));
}

#[test]
fn keywords_split_the_input() {
    let p = parlor();
    let args = give().parse(&p.world, p.player, "cat to brass lamp").unwrap();
    assert_eq!(args.object("item"), Some(p.held_cat));
    assert_eq!(args.object("recipient"), Some(p.lamp));
}

#[test]
fn later_alternatives_are_tried() {
    let p = parlor();
    let args = give().parse(&p.world, p.player, "lamp cat").unwrap();
    assert_eq!(args.object("item"), Some(p.held_cat));
    assert_eq!(args.object("recipient"), Some(p.lamp));
}

#[test]
fn reference_failures_beat_syntax_errors() {
    let p = parlor();
    let err = give().parse(&p.world, p.player, "dog to lamp").unwrap_err();
    assert!(matches!(
        err,
        GrammarError::Reference(ReferenceError::NotFound { .. })
    ));
}

#[test]
fn shapeless_input_is_a_syntax_error() {
    let p = parlor();
    let err = Grammar::empty().parse(&p.world, p.player, "cat").unwrap_err();
    assert!(err.is_syntax());
    assert!(Grammar::empty().parse(&p.world, p.player, "").unwrap().is_empty());
    assert_eq!(
        err.into_error(&p.world, "Usage: look").user_message(),
        "Usage: look"
    );
}

#[test]
fn text_slots_take_the_rest() {
    let p = parlor();
    let grammar = Grammar::new().or([Element::text("message")]);
    let args = grammar.parse(&p.world, p.player, "hello  there").unwrap();
    assert_eq!(args.text("message"), Some("hello  there"));
}

#[test]
fn multi_object_slots_keep_every_match() {
    let p = parlor();
    let grammar = Grammar::new().or([Element::objects("things", Scope::Reachable)]);
    let args = grammar.parse(&p.world, p.player, "cat").unwrap();
    assert_eq!(args.objects("things").len(), 2);
}
