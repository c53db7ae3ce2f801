mod common;

use common::RecordingFilter;
use replaystat::core::{Category, Color, Game, GameResult, GameType, Move, Player};
use replaystat::filters::FilterChain;
use std::sync::atomic::Ordering;

fn any_game() -> Game {
    Game::new(
        Player::new("alice", Some(1800)),
        Player::new("bob", Some(1700)),
        GameType::Base,
        GameResult::WhiteWins,
        vec![Move {
            color: Color::White,
            token: "Q".to_string(),
            position: ".".to_string(),
        }],
    )
}

#[test]
fn empty_chain_accepts_everything() {
    let chain = FilterChain::new();
    assert!(chain.is_empty());
    assert!(chain.accepts(Category::All, &any_game()));
    assert!(chain.accepts(Category::Tournament, &any_game()));
}

#[test]
fn rejection_short_circuits_later_filters() {
    let rejecting = RecordingFilter::new("rejects", false);
    let after = RecordingFilter::new("after", true);
    let after_invocations = after.invocations_handle();

    let chain = FilterChain::new()
        .with(Box::new(rejecting))
        .with(Box::new(after));

    assert!(!chain.accepts(Category::All, &any_game()));
    assert_eq!(
        after_invocations.load(Ordering::SeqCst),
        0,
        "filters after the rejecting one must not run"
    );
}

#[test]
fn all_filters_run_when_every_one_accepts() {
    let first = RecordingFilter::new("first", true);
    let second = RecordingFilter::new("second", true);
    let first_invocations = first.invocations_handle();
    let second_invocations = second.invocations_handle();

    let chain = FilterChain::new()
        .with(Box::new(first))
        .with(Box::new(second));

    assert!(chain.accepts(Category::All, &any_game()));
    assert_eq!(first_invocations.load(Ordering::SeqCst), 1);
    assert_eq!(second_invocations.load(Ordering::SeqCst), 1);
}

#[test]
fn chain_result_is_the_conjunction() {
    let chain = FilterChain::new()
        .with(Box::new(RecordingFilter::new("yes", true)))
        .with(Box::new(RecordingFilter::new("no", false)));
    assert!(!chain.accepts(Category::All, &any_game()));
}

#[test]
fn filters_do_not_mutate_the_game() {
    let game = any_game();
    let snapshot = game.clone();
    let chain = FilterChain::new().with(Box::new(RecordingFilter::new("probe", true)));
    chain.accepts(Category::All, &game);
    assert_eq!(game, snapshot);
}
